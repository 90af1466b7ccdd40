//! Cursor controller: circular pagination over the catalogue.
//!
//! One parameterized `advance` replaces the three copy-pasted next/previous/
//! select handlers of the old bot. The cursor has a single state variable
//! (the position), transitions wrap around at both ends, and every transition
//! persists exactly one write before resolving the item to display.

use crate::core::error::{AppError, AppResult};

use super::store::{CatalogueStore, CursorStore};

/// Navigation direction for [`CursorController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What a dialog screen needs to render one catalogue item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub name: String,
    pub image: String,
    pub description: String,
    /// Position of the item, which is also the user's new cursor value
    pub position: i64,
    /// Catalogue length at the time of the call
    pub total: i64,
}

/// Computes and persists cursor moves, and resolves positions to items.
///
/// Generic over the two store seams so the pagination rules can be tested
/// without a database.
pub struct CursorController<C, U> {
    catalogue: C,
    cursors: U,
    create_missing: bool,
}

impl<C, U> CursorController<C, U>
where
    C: CatalogueStore,
    U: CursorStore,
{
    /// Controller that creates a cursor at position 0 on first contact.
    pub fn new(catalogue: C, cursors: U) -> Self {
        Self {
            catalogue,
            cursors,
            create_missing: true,
        }
    }

    /// Controller that signals `NotFound` for users without a cursor
    /// instead of creating one.
    pub fn strict(catalogue: C, cursors: U) -> Self {
        Self {
            catalogue,
            cursors,
            create_missing: false,
        }
    }

    /// Moves the user's cursor one step with wraparound and returns the item
    /// at the new position.
    ///
    /// Equivalent to `(p ± 1) mod len` for every `0 <= p < len`.
    pub fn advance(&self, user_id: i64, direction: Direction) -> AppResult<ItemCard> {
        let len = self.catalogue_len()?;
        let page = self.current_position(user_id)?;

        if page < 0 || page >= len {
            return Err(AppError::Consistency(format!(
                "stored position {} for user {} is outside catalogue of {} items",
                page, user_id, len
            )));
        }

        let new_page = match direction {
            Direction::Previous => {
                if page == 0 {
                    len - 1
                } else {
                    page - 1
                }
            }
            Direction::Next => {
                if page == len - 1 {
                    0
                } else {
                    page + 1
                }
            }
        };

        self.cursors.set_position(user_id, new_page)?;
        log::info!("User {} page is updated to {}", user_id, new_page);

        self.resolve(new_page, len)
    }

    /// Jumps the cursor straight to `item_id`.
    ///
    /// The target is validated against the catalogue length before anything
    /// is persisted, so an out-of-range selection never corrupts the cursor.
    pub fn select(&self, user_id: i64, item_id: i64) -> AppResult<ItemCard> {
        let len = self.catalogue_len()?;

        if item_id < 0 || item_id >= len {
            return Err(AppError::InvalidArgument(format!(
                "item {} is outside catalogue of {} items",
                item_id, len
            )));
        }

        self.cursors.set_position(user_id, item_id)?;
        log::info!("User {} page is updated to {}", user_id, item_id);

        self.resolve(item_id, len)
    }

    /// Full ordered `(name, index)` listing for the selection menu.
    pub fn list_catalogue(&self) -> AppResult<Vec<(String, i64)>> {
        self.catalogue.list()
    }

    /// Current cursor for the user without moving it, resolved to a card.
    /// Used by the start screen.
    pub fn current(&self, user_id: i64) -> AppResult<ItemCard> {
        let len = self.catalogue_len()?;
        let page = self.current_position(user_id)?;

        if page < 0 || page >= len {
            return Err(AppError::Consistency(format!(
                "stored position {} for user {} is outside catalogue of {} items",
                page, user_id, len
            )));
        }

        self.resolve(page, len)
    }

    fn catalogue_len(&self) -> AppResult<i64> {
        let len = self.catalogue.count()?;
        if len == 0 {
            return Err(AppError::NotFound("catalogue is empty".to_string()));
        }
        Ok(len)
    }

    fn current_position(&self, user_id: i64) -> AppResult<i64> {
        match self.cursors.position(user_id)? {
            Some(page) => Ok(page),
            None if self.create_missing => {
                log::info!("User {} has no cursor yet, creating at position 0", user_id);
                self.cursors.set_position(user_id, 0)?;
                Ok(0)
            }
            None => Err(AppError::NotFound(format!("no cursor for user {}", user_id))),
        }
    }

    fn resolve(&self, position: i64, total: i64) -> AppResult<ItemCard> {
        // A miss here means the count and the rows disagree, not a user error.
        let item = self.catalogue.item(position)?.ok_or_else(|| {
            AppError::Consistency(format!(
                "position {} not resolvable in catalogue of {} items",
                position, total
            ))
        })?;

        Ok(ItemCard {
            name: item.name,
            image: item.image,
            description: item.description,
            position,
            total,
        })
    }
}
