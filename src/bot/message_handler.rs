//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::dialogue::{FitDialogue, Input};

use super::dialogue_manager::handle_input;
use super::ui_builder::format_help;
use super::Command;

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_deref())
}

/// Handle `/start`, `/restart` and `/help`
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: FitDialogue,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    debug!(user_id = %user.id, command = ?cmd, "Received command from user");

    match cmd {
        Command::Start | Command::Restart => {
            handle_input(
                &bot,
                msg.chat.id,
                language_code(&msg),
                &dialogue,
                Input::Restart,
            )
            .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, format_help(language_code(&msg)))
                .await?;
        }
    }

    Ok(())
}

/// Handle every other message as dialogue input
///
/// Non-text messages are passed on as empty text, which re-prompts the
/// current step or starts a fresh session.
pub async fn message_handler(bot: Bot, msg: Message, dialogue: FitDialogue) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let text = msg.text().unwrap_or_default();
    debug!(user_id = %user.id, message_length = text.len(), "Received message from user");

    handle_input(
        &bot,
        msg.chat.id,
        language_code(&msg),
        &dialogue,
        Input::Text(text.to_string()),
    )
    .await
}
