//! Command handlers: /start (with referral deep link), /catalogue, /account

use teloxide::prelude::*;

use crate::core::error::AppError;
use crate::i18n;
use crate::storage::db;
use crate::storage::get_connection;
use crate::telegram::deep_link;
use crate::telegram::menu::{send_account_screen, send_catalogue_menu, send_item_card, send_start_greeting};

use super::types::{ensure_user_exists, HandlerDeps, HandlerError, UserCreationResult, UserInfo};

/// Handles /start, optionally carrying an encoded referral payload.
///
/// Creates the user row on first contact and shows the greeting plus the
/// item the user's cursor currently points at.
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let text = msg.text().unwrap_or_default();
    let payload = text.strip_prefix("/start").map(str::trim).unwrap_or("");
    let referral = deep_link::decode_payload(payload);

    log::info!(
        "Process START command from user {} (referral: {:?})",
        msg.chat.id.0,
        referral
    );

    let user = UserInfo::from_message(msg);
    if let UserCreationResult::Created = ensure_user_exists(&deps.db_pool, &user, referral.as_deref()) {
        log::info!("Created user {} (referrer: {:?})", user.chat_id, referral);
    }

    let lang = i18n::user_lang_from_pool(&deps.db_pool, msg.chat.id.0);
    send_start_greeting(bot, msg.chat.id, &lang).await?;

    match deps.controller.current(msg.chat.id.0) {
        Ok(card) => {
            send_item_card(bot, msg.chat.id, &lang, &card).await?;
        }
        Err(AppError::NotFound(_)) => {
            bot.send_message(msg.chat.id, i18n::t(&lang, "catalogue-empty")).await?;
        }
        Err(e) => {
            log::error!("Failed to resolve start card for user {}: {}", msg.chat.id.0, e);
            bot.send_message(msg.chat.id, i18n::t(&lang, "error-generic")).await?;
        }
    }

    Ok(())
}

/// Handles /catalogue: the full selection menu.
pub(super) async fn handle_catalogue_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    log::info!("Switch to Catalogue dialog by user {}", msg.chat.id.0);

    let lang = i18n::user_lang_from_pool(&deps.db_pool, msg.chat.id.0);
    match deps.controller.list_catalogue() {
        Ok(items) => {
            send_catalogue_menu(bot, msg.chat.id, &lang, &items).await?;
        }
        Err(e) => {
            log::error!("Failed to list catalogue for user {}: {}", msg.chat.id.0, e);
            bot.send_message(msg.chat.id, i18n::t(&lang, "error-generic")).await?;
        }
    }

    Ok(())
}

/// Handles /account: shows the user's id and stored cursor position.
pub(super) async fn handle_account_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    log::info!("Switch to Account dialog by user {}", msg.chat.id.0);

    let lang = i18n::user_lang_from_pool(&deps.db_pool, msg.chat.id.0);
    let position = get_connection(&deps.db_pool)
        .ok()
        .and_then(|conn| db::get_user_page(&conn, msg.chat.id.0).ok().flatten())
        .unwrap_or(0);

    send_account_screen(bot, msg.chat.id, &lang, msg.chat.id.0, position).await?;
    Ok(())
}
