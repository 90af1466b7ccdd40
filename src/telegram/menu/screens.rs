//! Start, account and want screens

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use unic_langid::LanguageIdentifier;

use crate::i18n;

/// Sends the greeting shown on /start before the current item card.
pub async fn send_start_greeting(bot: &Bot, chat_id: ChatId, lang: &LanguageIdentifier) -> ResponseResult<Message> {
    bot.send_message(chat_id, i18n::t(lang, "start-greeting")).await
}

/// Sends the account screen with the user's id and cursor position.
pub async fn send_account_screen(
    bot: &Bot,
    chat_id: ChatId,
    lang: &LanguageIdentifier,
    user_id: i64,
    position: i64,
) -> ResponseResult<Message> {
    let mut args = FluentArgs::new();
    args.set("user_id", user_id);
    args.set("position", position + 1);

    let text = format!(
        "{}\n\n{}",
        i18n::t(lang, "account-title"),
        i18n::t_args(lang, "account-text", &args)
    );
    bot.send_message(chat_id, text).await
}

/// Sends the confirmation shown after pressing the want button.
pub async fn send_want_screen(bot: &Bot, chat_id: ChatId, lang: &LanguageIdentifier) -> ResponseResult<Message> {
    bot.send_message(chat_id, i18n::t(lang, "want-text")).await
}
