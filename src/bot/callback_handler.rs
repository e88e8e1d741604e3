//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error};

use crate::dialogue::{FitDialogue, Input};

use super::dialogue_manager::handle_input;

/// Handle callback queries from the garment and budget keyboards
pub async fn callback_handler(bot: Bot, q: CallbackQuery, dialogue: FitDialogue) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    let input = q.data.as_deref().and_then(Input::from_callback_data);
    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat().id)
        .unwrap_or_else(|| q.from.id.into());

    let result = match input {
        Some(input) => {
            // Drop the keyboard so the same choice cannot be sent twice
            if let Some(msg) = &q.message {
                if let Err(e) = bot.edit_message_reply_markup(chat_id, msg.id()).await {
                    error!(user_id = %q.from.id, error = %e, "Failed to remove inline keyboard");
                }
            }

            handle_input(
                &bot,
                chat_id,
                q.from.language_code.as_deref(),
                &dialogue,
                input,
            )
            .await
        }
        None => Ok(()),
    };

    // Answer the callback query to remove the loading state, even when handling failed
    bot.answer_callback_query(q.id).await?;

    result
}
