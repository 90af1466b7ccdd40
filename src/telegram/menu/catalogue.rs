//! Rendering of the item card and the catalogue selection menu

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use unic_langid::LanguageIdentifier;
use url::Url;

use crate::catalogue::ItemCard;
use crate::i18n;
use crate::telegram::cb;

/// Keyboard under every item card: paging row, want, navigation row.
pub(crate) fn item_keyboard(lang: &LanguageIdentifier) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            cb(i18n::t(lang, "button-back"), "cat:prev"),
            cb(i18n::t(lang, "button-next"), "cat:next"),
        ],
        vec![cb(i18n::t(lang, "button-want"), "nav:want")],
        vec![
            cb(i18n::t(lang, "button-account"), "nav:account"),
            cb(i18n::t(lang, "button-catalogue"), "nav:catalogue"),
        ],
    ])
}

/// Sends one catalogue item as a photo with caption and paging keyboard.
///
/// Falls back to a plain text message when the stored image reference is not
/// a valid URL, so a bad row never makes navigation unusable.
pub async fn send_item_card(
    bot: &Bot,
    chat_id: ChatId,
    lang: &LanguageIdentifier,
    card: &ItemCard,
) -> ResponseResult<Message> {
    let mut args = FluentArgs::new();
    args.set("name", card.name.as_str());
    args.set("description", card.description.as_str());

    let mut position_args = FluentArgs::new();
    position_args.set("position", card.position + 1);
    position_args.set("total", card.total);

    let caption = format!(
        "{}\n\n{}",
        i18n::t_args(lang, "item-caption", &args),
        i18n::t_args(lang, "item-position", &position_args)
    );
    let keyboard = item_keyboard(lang);

    match Url::parse(&card.image) {
        Ok(url) => {
            bot.send_photo(chat_id, InputFile::url(url))
                .caption(caption)
                .reply_markup(keyboard)
                .await
        }
        Err(e) => {
            log::warn!("Item at position {} has unparsable image {:?}: {}", card.position, card.image, e);
            bot.send_message(chat_id, caption).reply_markup(keyboard).await
        }
    }
}

/// Sends the catalogue as a selection menu, one button per item.
pub async fn send_catalogue_menu(
    bot: &Bot,
    chat_id: ChatId,
    lang: &LanguageIdentifier,
    items: &[(String, i64)],
) -> ResponseResult<Message> {
    if items.is_empty() {
        return bot.send_message(chat_id, i18n::t(lang, "catalogue-empty")).await;
    }

    let mut rows: Vec<Vec<InlineKeyboardButton>> = items
        .iter()
        .map(|(name, index)| vec![cb(name.clone(), format!("cat:sel:{}", index))])
        .collect();
    rows.push(vec![cb(i18n::t(lang, "button-back"), "nav:start")]);

    bot.send_message(chat_id, i18n::t(lang, "catalogue-title"))
        .reply_markup(InlineKeyboardMarkup::new(rows))
        .await
}
