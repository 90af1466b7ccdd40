//! Catalogue pagination: cursor controller and its store seams

pub mod controller;
pub mod store;

pub use controller::{CursorController, Direction, ItemCard};
pub use store::{CatalogueStore, CursorStore, SqliteCatalogue, SqliteCursors};

/// Controller wired to the SQLite stores, as used by the bot handlers.
pub type Controller = CursorController<SqliteCatalogue, SqliteCursors>;
