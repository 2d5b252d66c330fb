use clap::{Parser, ValueEnum};
use message_backend::{config::Config, database::pool::create_pool};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

/// Applies or reverts the `messages` schema.
#[derive(Debug, Parser)]
struct Cli {
    #[arg(value_enum, default_value_t = Direction::Up)]
    direction: Direction,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = create_pool(&config).await?;
    let migrator = sqlx::migrate!("./migrations");

    let result = match cli.direction {
        Direction::Up => {
            info!("Running migration up...");
            migrator.run(&pool).await
        }
        Direction::Down => {
            info!("Running migration down...");
            migrator.undo(&pool, 0).await
        }
    };
    pool.close().await;
    result?;

    info!("Migration completed successfully");
    Ok(())
}
