//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use super::commands::{handle_account_command, handle_catalogue_command, handle_start_command};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::menu::handle_menu_callback;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema is used in production and in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_start = deps.clone();
    let deps_commands = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        // /start needs raw text access for the deep-link payload, so it is
        // matched before the Command parser (which rejects trailing args).
        .branch(start_handler(deps_start))
        .branch(command_handler(deps_commands))
        .branch(callback_handler(deps_callback))
}

/// Handler for /start with or without a referral payload
fn start_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| {
            msg.text()
                .map(|text| text == "/start" || text.starts_with("/start "))
                .unwrap_or(false)
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_start_command(&bot, &msg, &deps).await }
        })
}

/// Handler for the commands registered in the Telegram UI
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                    Command::Catalogue => handle_catalogue_command(&bot, &msg, &deps).await,
                    Command::Account => handle_account_command(&bot, &msg, &deps).await,
                }
            }
        })
}

/// Handler for inline keyboard callbacks
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move { handle_menu_callback(bot, q, deps).await.map_err(HandlerError::from) }
    })
}
