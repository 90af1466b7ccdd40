use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use vitrina::catalogue::{Controller, SqliteCatalogue, SqliteCursors};
use vitrina::cli::{Cli, Commands};
use vitrina::core::{config, init_logger};
use vitrina::storage::db::{self, CatalogueItem};
use vitrina::storage::{create_pool, get_connection};
use vitrina::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::SeedCatalogue { file }) => seed_catalogue(&file),
    }
}

/// Run the bot in long polling mode
async fn run_bot() -> Result<()> {
    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );
    log::info!("Database ready at {}", config::DATABASE_PATH.as_str());

    let controller = Arc::new(Controller::new(
        SqliteCatalogue::new(Arc::clone(&db_pool)),
        SqliteCursors::new(Arc::clone(&db_pool)),
    ));

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(db_pool, controller);
    let handler = schema(deps);

    log::info!("Starting bot in long polling mode");
    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Load catalogue items from a JSON file, assigning positions in file order
fn seed_catalogue(file: &str) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let mut items: Vec<CatalogueItem> = serde_json::from_str(&raw)?;

    let db_pool = create_pool(&config::DATABASE_PATH)
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;
    let conn = get_connection(&db_pool)?;

    for (index, item) in items.iter_mut().enumerate() {
        item.index = index as i64;
        db::insert_catalogue_item(&conn, item)?;
    }

    log::info!("Seeded {} catalogue items from {}", items.len(), file);
    Ok(())
}
