//! Inline menus: item card, catalogue selection, navigation screens

mod callback_router;
mod catalogue;
mod screens;

pub use callback_router::handle_menu_callback;
pub use catalogue::{send_catalogue_menu, send_item_card};
pub use screens::{send_account_screen, send_start_greeting, send_want_screen};
