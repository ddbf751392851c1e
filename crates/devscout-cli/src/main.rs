mod scrape;
#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "devscout-cli")]
#[command(about = "devscout talent-sourcing command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape GitHub for qualifying profiles and store them as candidates.
    Scrape {
        /// How many accepted profiles to store before stopping.
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Database maintenance.
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database connection.
    Ping,
    /// Apply pending migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = devscout_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Scrape { count }) => scrape::run(&config, count).await,
        Some(Commands::Db {
            command: DbCommands::Ping,
        }) => {
            let pool = connect(&config).await?;
            devscout_db::ping(&pool).await?;
            println!("database ok");
            Ok(())
        }
        Some(Commands::Db {
            command: DbCommands::Migrate,
        }) => {
            let pool = connect(&config).await?;
            let applied = devscout_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        None => {
            println!("devscout-cli: nothing to do (try `scrape --count 10`)");
            Ok(())
        }
    }
}

async fn connect(config: &devscout_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = devscout_db::PoolConfig::from_app_config(config);
    let pool = devscout_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}
