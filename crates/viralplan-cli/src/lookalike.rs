use std::collections::HashMap;
use std::sync::Arc;

use clap::{ArgGroup, Args};
use viralplan_core::AppConfig;
use viralplan_lookalike::{LookalikeEngine, Neighbor, TeiEncoder, DEFAULT_TOP_K};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("query").required(true).args(["id", "text"])))]
pub struct LookalikeArgs {
    /// Influencer to find lookalikes for
    #[arg(long)]
    pub id: Option<i64>,
    /// Free-text description of the creator you want
    #[arg(long)]
    pub text: Option<String>,
    /// Number of results
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,
}

/// Run a lookalike query against the local artifact and print the results.
///
/// # Errors
///
/// Returns an error if the artifact cannot be loaded, the encoder fails, or
/// the handle lookup fails.
pub(crate) async fn run_lookalike(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    args: &LookalikeArgs,
) -> anyhow::Result<()> {
    if args.top_k == 0 {
        anyhow::bail!("--top-k must be at least 1");
    }

    let encoder = TeiEncoder::new(
        &config.tei_url,
        &config.embedding_model,
        config.tei_timeout_secs,
    )?;
    let engine = LookalikeEngine::load(&config.embeddings_path, Arc::new(encoder))?;

    let neighbors = match (&args.id, &args.text) {
        (Some(id), _) => {
            if !viralplan_db::influencer_exists(pool, *id).await? {
                anyhow::bail!("influencer {id} not found");
            }
            engine.by_influencer(*id, args.top_k)
        }
        (None, Some(text)) => {
            if text.trim().is_empty() {
                anyhow::bail!("--text must not be empty");
            }
            engine.by_text(text, args.top_k).await?
        }
        (None, None) => anyhow::bail!("either --id or --text is required"),
    };

    let ids: Vec<i64> = neighbors.iter().map(|n| n.influencer_id).collect();
    let handles = viralplan_db::list_handles(pool, &ids).await?;

    if neighbors.is_empty() {
        println!("no lookalikes found");
        return Ok(());
    }
    for line in format_neighbors(&neighbors, &handles) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn format_neighbors(
    neighbors: &[Neighbor],
    handles: &HashMap<i64, String>,
) -> Vec<String> {
    neighbors
        .iter()
        .enumerate()
        .map(|(rank, n)| {
            let handle = handles.get(&n.influencer_id).map_or("", String::as_str);
            format!(
                "{:>3}. {:<24} id={:<8} similarity={:.4}",
                rank + 1,
                handle,
                n.influencer_id,
                n.score
            )
        })
        .collect()
}
