//! Database access: pool, schema migrations, users and catalogue tables

pub mod db;
pub mod migrations;

// Re-exports for convenience
pub use db::{create_pool, get_connection, CatalogueItem, DbConnection, DbPool};
