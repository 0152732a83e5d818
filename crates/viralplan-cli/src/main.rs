mod embeddings;
mod lookalike;
mod plan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use viralplan_core::AppConfig;

use crate::embeddings::EmbeddingsCommands;
use crate::lookalike::LookalikeArgs;
use crate::plan::PlanArgs;

#[derive(Debug, Parser)]
#[command(name = "viralplan-cli")]
#[command(about = "Influencer campaign planning and lookalike search")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Build or inspect the influencer embeddings artifact
    Embeddings {
        #[command(subcommand)]
        command: EmbeddingsCommands,
    },
    /// Plan a campaign under a budget and print it as JSON
    Plan(PlanArgs),
    /// Find influencers similar to an influencer or a text description
    Lookalike(LookalikeArgs),
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("viralplan-cli: run with --help for available commands");
        return Ok(());
    };

    let config = viralplan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    viralplan_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = viralplan_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::Embeddings { command } => match command {
            EmbeddingsCommands::Build { output } => {
                let pool = connect(&config).await?;
                embeddings::run_embeddings_build(&pool, &config, output.as_deref()).await?;
            }
            EmbeddingsCommands::Inspect { path } => {
                embeddings::run_embeddings_inspect(&config, path.as_deref())?;
            }
        },
        Commands::Plan(args) => plan::run_plan(&config, &args).await?,
        Commands::Lookalike(args) => {
            let pool = connect(&config).await?;
            lookalike::run_lookalike(&pool, &config, &args).await?;
        }
    }

    Ok(())
}

pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = viralplan_db::PoolConfig::from_app_config(config);
    let pool = viralplan_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}
