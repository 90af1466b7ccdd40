//! Vitrina - Telegram bot for browsing an NFT catalogue
//!
//! This library provides the functionality for the Vitrina bot: the
//! pagination cursor controller, database operations, localization and
//! the Telegram handler tree.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors and logging
//! - `storage`: Database pool, migrations, users and catalogue tables
//! - `catalogue`: Cursor controller and its store seams
//! - `telegram`: Telegram bot integration and handlers

pub mod catalogue;
pub mod cli;
pub mod core;
pub mod i18n;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use catalogue::{Controller, CursorController, Direction, ItemCard};
pub use crate::core::{config, AppError, AppResult};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
pub use telegram::{schema, HandlerDeps};
