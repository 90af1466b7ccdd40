//! Store seams the cursor controller talks through.
//!
//! The controller never touches SQL directly; it sees the catalogue and the
//! per-user cursors through these two traits. Production uses the SQLite
//! implementations below, tests substitute in-memory fakes.

use std::sync::Arc;

use crate::core::error::AppResult;
use crate::storage::db::{self, CatalogueItem, DbPool};

/// Read-only view of the ordered NFT catalogue.
pub trait CatalogueStore {
    /// Returns the item at `index`, or `None` if the index is not present.
    fn item(&self, index: i64) -> AppResult<Option<CatalogueItem>>;

    /// Returns the total number of items.
    fn count(&self) -> AppResult<i64>;

    /// Returns `(name, index)` pairs for every item, in storage order.
    fn list(&self) -> AppResult<Vec<(String, i64)>>;
}

/// Per-user cursor positions.
pub trait CursorStore {
    /// Returns the stored position for `user_id`, or `None` if the user has no cursor yet.
    fn position(&self, user_id: i64) -> AppResult<Option<i64>>;

    /// Persists `position` as the user's cursor, creating the row if needed.
    fn set_position(&self, user_id: i64, position: i64) -> AppResult<()>;
}

/// Catalogue table access through the shared connection pool.
#[derive(Clone)]
pub struct SqliteCatalogue {
    pool: Arc<DbPool>,
}

impl SqliteCatalogue {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CatalogueStore for SqliteCatalogue {
    fn item(&self, index: i64) -> AppResult<Option<CatalogueItem>> {
        let conn = db::get_connection(&self.pool)?;
        Ok(db::get_catalogue_item(&conn, index)?)
    }

    fn count(&self) -> AppResult<i64> {
        let conn = db::get_connection(&self.pool)?;
        Ok(db::count_catalogue(&conn)?)
    }

    fn list(&self) -> AppResult<Vec<(String, i64)>> {
        let conn = db::get_connection(&self.pool)?;
        Ok(db::list_catalogue(&conn)?)
    }
}

/// `users.page` access through the shared connection pool.
#[derive(Clone)]
pub struct SqliteCursors {
    pool: Arc<DbPool>,
}

impl SqliteCursors {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CursorStore for SqliteCursors {
    fn position(&self, user_id: i64) -> AppResult<Option<i64>> {
        let conn = db::get_connection(&self.pool)?;
        Ok(db::get_user_page(&conn, user_id)?)
    }

    fn set_position(&self, user_id: i64, position: i64) -> AppResult<()> {
        let conn = db::get_connection(&self.pool)?;
        db::set_user_page(&conn, user_id, position)?;
        Ok(())
    }
}
