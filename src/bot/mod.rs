//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles commands and incoming text messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages
//! - `dialogue_manager`: Applies input to stored sessions and sends the reply

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::dialogue::FitDialogue;
use crate::session::SessionStore;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{command_handler, message_handler};

// Re-export utility functions that might be used elsewhere
pub use dialogue_manager::{handle_input, process_input};
pub use ui_builder::{format_reply, OutgoingMessage};

/// Bot commands; `/start` and `/restart` both restart the sizing flow
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Perfect Fit commands:")]
pub enum Command {
    #[command(description = "start sizing")]
    Start,
    #[command(description = "start sizing again")]
    Restart,
    #[command(description = "measuring tips")]
    Help,
}

/// Open the sender's dialogue in `store`
///
/// Dialogues are keyed by user id rather than chat id, and a missing dialogue
/// is left missing so the flow can tell a first contact from a restart.
pub fn enter_user_dialogue(store: Arc<SessionStore>, upd: Update) -> Option<FitDialogue> {
    let user = upd.from()?;
    Some(FitDialogue::new(store, ChatId::from(user.id)))
}

/// Dispatcher schema. Expects an `Arc<SessionStore>` dependency.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let message_branch = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(dptree::endpoint(message_handler));

    dptree::entry()
        .filter_map(enter_user_dialogue)
        .branch(message_branch)
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}
