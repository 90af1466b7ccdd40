//! Handler types, dependencies, and user management helpers

use std::sync::Arc;

use teloxide::types::Message;

use crate::catalogue::Controller;
use crate::storage::db::{self, create_user, get_user};
use crate::storage::get_connection;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<db::DbPool>,
    pub controller: Arc<Controller>,
}

impl HandlerDeps {
    pub fn new(db_pool: Arc<db::DbPool>, controller: Arc<Controller>) -> Self {
        Self { db_pool, controller }
    }
}

/// User info extracted from an inbound message
#[derive(Clone)]
pub struct UserInfo {
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
}

impl UserInfo {
    /// Extract user info from a Telegram message
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id.0,
            first_name: msg.from.as_ref().map(|u| u.first_name.clone()),
            last_name: msg.from.as_ref().and_then(|u| u.last_name.clone()),
            language_code: msg.from.as_ref().and_then(|u| u.language_code.clone()),
        }
    }
}

/// Result of ensure_user_exists operation
pub enum UserCreationResult {
    /// User already existed
    Existed,
    /// User was newly created
    Created,
    /// Failed to get DB connection
    DbError,
}

/// Ensures a user exists in the database, creating them if needed.
///
/// Deduplicates the common pattern of: get a connection, check for the user,
/// create the row with the referral code on first contact.
pub fn ensure_user_exists(db_pool: &Arc<db::DbPool>, user: &UserInfo, referrer: Option<&str>) -> UserCreationResult {
    let conn = match get_connection(db_pool) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to get DB connection: {}", e);
            return UserCreationResult::DbError;
        }
    };

    match get_user(&conn, user.chat_id) {
        Ok(Some(_)) => UserCreationResult::Existed,
        Ok(None) => {
            log::info!("{} is new user", user.chat_id);
            let created = create_user(
                &conn,
                user.chat_id,
                user.first_name.as_deref(),
                user.last_name.as_deref(),
                referrer,
            );
            if let Err(e) = created {
                log::error!("Failed to create user {}: {}", user.chat_id, e);
                return UserCreationResult::DbError;
            }
            if let Some(lang) = user.language_code.as_deref().and_then(crate::i18n::is_language_supported) {
                let _ = db::set_user_language(&conn, user.chat_id, lang);
            }
            UserCreationResult::Created
        }
        Err(e) => {
            log::error!("Failed to read user {}: {}", user.chat_id, e);
            UserCreationResult::DbError
        }
    }
}
