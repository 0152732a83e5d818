//! Offline embedding build and artifact inspection.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use viralplan_core::AppConfig;
use viralplan_lookalike::{build_artifact, EmbeddingArtifact, EmbeddingTable, TeiEncoder};

/// Sub-commands available under `embeddings`.
#[derive(Debug, Subcommand)]
pub enum EmbeddingsCommands {
    /// Embed every influencer's content text and write the artifact
    Build {
        /// Artifact path (defaults to `VIRALPLAN_EMBEDDINGS_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load an artifact and print its size and model
    Inspect {
        /// Artifact path (defaults to `VIRALPLAN_EMBEDDINGS_PATH`)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Build the embedding artifact from the warehouse and write it atomically.
///
/// # Errors
///
/// Returns an error if the text query, the TEI encoder, or the artifact write
/// fails.
pub(crate) async fn run_embeddings_build(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let output = output.unwrap_or(&config.embeddings_path);

    let rows = viralplan_db::list_embedding_texts(pool).await?;
    if rows.is_empty() {
        anyhow::bail!("no influencers in raw_influencers; load source data before building embeddings");
    }

    let documents: Vec<(i64, String)> = rows
        .iter()
        .map(|row| (row.influencer_id, row.document()))
        .collect();

    tracing::info!(
        influencers = documents.len(),
        model = %config.embedding_model,
        tei_url = %config.tei_url,
        "encoding influencer documents"
    );

    let encoder = TeiEncoder::new(
        &config.tei_url,
        &config.embedding_model,
        config.tei_timeout_secs,
    )?;
    let artifact = build_artifact(&encoder, &documents).await?;
    artifact.write(output)?;

    tracing::info!(
        influencers = artifact.ids.len(),
        dimension = artifact.dimension,
        path = %output.display(),
        "embeddings artifact written"
    );
    println!(
        "wrote {} embeddings (dimension {}) to {}",
        artifact.ids.len(),
        artifact.dimension,
        output.display()
    );
    Ok(())
}

/// Print a summary of the artifact after validating it as the server would.
///
/// # Errors
///
/// Returns an error if the artifact is missing or malformed.
pub(crate) fn run_embeddings_inspect(config: &AppConfig, path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.unwrap_or(&config.embeddings_path);

    let artifact = EmbeddingArtifact::read(path)?;
    let model = artifact.model.clone();
    let built_at = artifact.built_at;
    let table = EmbeddingTable::try_from(artifact)?;

    println!("path:        {}", path.display());
    println!("model:       {model}");
    println!("built_at:    {}", built_at.to_rfc3339());
    println!("influencers: {}", table.len());
    println!("dimension:   {}", table.dimension());
    Ok(())
}
