//! Callback routing for the catalogue dialog
//!
//! Callback data uses prefixed actions:
//! `cat:prev`, `cat:next`, `cat:sel:<idx>` mutate the pagination cursor,
//! `nav:*` switches between screens without touching it.

use teloxide::prelude::*;
use unic_langid::LanguageIdentifier;

use crate::catalogue::Direction;
use crate::core::error::AppError;
use crate::i18n;
use crate::storage::db;
use crate::storage::get_connection;

use super::catalogue::{send_catalogue_menu, send_item_card};
use super::screens::{send_account_screen, send_start_greeting, send_want_screen};
use crate::telegram::handlers::HandlerDeps;

/// Handles callback queries from the catalogue inline keyboards.
///
/// Every cursor mutation goes through the controller; this layer only
/// translates button presses into controller calls and errors into a
/// user-visible message.
pub async fn handle_menu_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> ResponseResult<()> {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(data) = q.data else { return Ok(()) };
    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    let message_id = q.message.as_ref().map(|m| m.id());
    let (Some(chat_id), Some(message_id)) = (chat_id, message_id) else {
        log::warn!("Callback {:?} without an accessible message, ignoring", data);
        return Ok(());
    };

    let user_id = i64::try_from(q.from.id.0).unwrap_or(0);
    let lang = i18n::user_lang_from_pool(&deps.db_pool, user_id);

    match data.as_str() {
        "cat:prev" | "cat:next" => {
            let direction = if data == "cat:prev" {
                Direction::Previous
            } else {
                Direction::Next
            };
            log::info!("User {} pressed {:?}", user_id, direction);

            match deps.controller.advance(user_id, direction) {
                Ok(card) => {
                    let _ = bot.delete_message(chat_id, message_id).await;
                    send_item_card(&bot, chat_id, &lang, &card).await?;
                }
                Err(e) => report_error(&bot, chat_id, &lang, user_id, &e).await,
            }
        }
        "nav:catalogue" => match deps.controller.list_catalogue() {
            Ok(items) => {
                let _ = bot.delete_message(chat_id, message_id).await;
                send_catalogue_menu(&bot, chat_id, &lang, &items).await?;
            }
            Err(e) => report_error(&bot, chat_id, &lang, user_id, &e).await,
        },
        "nav:account" => {
            let position = current_page(&deps, user_id);
            send_account_screen(&bot, chat_id, &lang, user_id, position).await?;
        }
        "nav:want" => {
            log::info!("User {} pressed WANT on position {}", user_id, current_page(&deps, user_id));
            send_want_screen(&bot, chat_id, &lang).await?;
        }
        "nav:start" => {
            let _ = bot.delete_message(chat_id, message_id).await;
            send_start_greeting(&bot, chat_id, &lang).await?;
            match deps.controller.current(user_id) {
                Ok(card) => {
                    send_item_card(&bot, chat_id, &lang, &card).await?;
                }
                Err(e) => report_error(&bot, chat_id, &lang, user_id, &e).await,
            }
        }
        other => {
            if let Some(raw) = other.strip_prefix("cat:sel:") {
                let Ok(item_id) = raw.parse::<i64>() else {
                    log::warn!("User {} sent malformed selection {:?}", user_id, other);
                    return Ok(());
                };
                log::info!("User {} selected item {} from catalogue", user_id, item_id);

                match deps.controller.select(user_id, item_id) {
                    Ok(card) => {
                        let _ = bot.delete_message(chat_id, message_id).await;
                        send_item_card(&bot, chat_id, &lang, &card).await?;
                    }
                    Err(e) => report_error(&bot, chat_id, &lang, user_id, &e).await,
                }
            } else {
                log::warn!("Unknown callback data {:?} from user {}", other, user_id);
            }
        }
    }

    Ok(())
}

/// Current stored page for screens that only display it (0 when absent).
fn current_page(deps: &HandlerDeps, user_id: i64) -> i64 {
    get_connection(&deps.db_pool)
        .ok()
        .and_then(|conn| db::get_user_page(&conn, user_id).ok().flatten())
        .unwrap_or(0)
}

/// Logs a controller error and tells the user something went wrong.
async fn report_error(bot: &Bot, chat_id: ChatId, lang: &LanguageIdentifier, user_id: i64, err: &AppError) {
    match err {
        AppError::NotFound(_) | AppError::InvalidArgument(_) => {
            log::warn!("Catalogue action failed for user {}: {}", user_id, err)
        }
        other => log::error!("Catalogue action failed for user {}: {}", user_id, other),
    }
    let _ = bot.send_message(chat_id, i18n::t(lang, "error-generic")).await;
}
