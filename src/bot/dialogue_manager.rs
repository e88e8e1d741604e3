//! Dialogue Manager module for applying user input to the stored dialogue

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use crate::dialogue::{advance, FitDialogue, Input, Reply, StartReason, Transition};

// Import UI builder functions
use super::ui_builder::format_reply;

/// Load the dialogue state, apply one input and store the result
///
/// Returns the transition so the caller can render its reply.
pub async fn process_input(dialogue: &FitDialogue, input: Input) -> Result<Transition> {
    let state = dialogue.get().await?;
    let previous_step = state.as_ref().map(|s| s.step());
    let user_id = dialogue.chat_id();

    let transition = advance(state, input);

    match &transition.reply {
        Reply::AskUnderbust {
            reason: StartReason::OutOfSequence,
        } => {
            warn!(user_id = %user_id, previous_step = ?previous_step, "Out-of-sequence choice, restarting");
        }
        Reply::InvalidMeasurement { step, error } => {
            debug!(user_id = %user_id, step = ?step, error = %error, "Measurement rejected");
        }
        Reply::Results { size, garment, budget } => {
            info!(user_id = %user_id, size = %size, garment = %garment, budget = %budget, "Sizing flow completed");
        }
        _ => {
            debug!(
                user_id = %user_id,
                previous_step = ?previous_step,
                step = ?transition.state.step(),
                "Dialogue advanced"
            );
        }
    }

    dialogue.update(transition.state.clone()).await?;
    Ok(transition)
}

/// Apply one input and send the single reply it produces to `chat_id`
pub async fn handle_input(
    bot: &Bot,
    chat_id: ChatId,
    language_code: Option<&str>,
    dialogue: &FitDialogue,
    input: Input,
) -> Result<()> {
    let transition = process_input(dialogue, input).await?;
    let outgoing = format_reply(&transition.reply, language_code)?;

    let request = bot.send_message(chat_id, outgoing.text);
    match outgoing.keyboard {
        Some(keyboard) => request.reply_markup(keyboard).await?,
        None => request.await?,
    };

    Ok(())
}
