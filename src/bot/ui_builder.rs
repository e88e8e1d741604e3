//! UI Builder module for creating keyboards and formatting messages

use anyhow::Result;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::catalog::{shopping_links, BudgetTier, GarmentType};
use crate::dialogue::{budget_callback_data, garment_callback_data, Reply, StartReason};
use crate::sizing::{SizeLabel, MAX_MEASUREMENT_CM, MIN_MEASUREMENT_CM};
use crate::errors::MeasurementError;
use crate::dialogue::Step;

/// A rendered reply, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl OutgoingMessage {
    fn text(text: String) -> Self {
        Self {
            text,
            keyboard: None,
        }
    }
}

/// Create inline keyboard with one button per garment type
pub fn create_garment_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    let row = GarmentType::ALL
        .iter()
        .map(|garment| {
            InlineKeyboardButton::callback(
                t_lang(garment.label_key(), language_code),
                garment_callback_data(*garment),
            )
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(vec![row])
}

/// Create inline keyboard with one row per budget tier
pub fn create_budget_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    let rows = BudgetTier::ALL
        .iter()
        .map(|budget| {
            vec![InlineKeyboardButton::callback(
                t_lang(budget.label_key(), language_code),
                budget_callback_data(*budget),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(rows)
}

pub fn format_welcome(language_code: Option<&str>) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        t_lang("welcome-title", language_code),
        t_lang("welcome-description", language_code),
        t_lang("prompt-underbust", language_code)
    )
}

pub fn format_help(language_code: Option<&str>) -> String {
    [
        "help-title",
        "help-measure-underbust",
        "help-measure-bust",
        "help-sports",
        "help-daily",
        "help-commands",
    ]
    .iter()
    .map(|key| t_lang(key, language_code))
    .collect::<Vec<_>>()
    .join("\n\n")
}

fn format_measurement_error(error: &MeasurementError, language_code: Option<&str>) -> String {
    match error {
        MeasurementError::OutOfRange { .. } => {
            let min = MIN_MEASUREMENT_CM.to_string();
            let max = MAX_MEASUREMENT_CM.to_string();
            t_args_lang(
                error.message_key(),
                &[("min", min.as_str()), ("max", max.as_str())],
                language_code,
            )
        }
        MeasurementError::BustNotAboveUnderbust { underbust, .. } => {
            let underbust = underbust.to_string();
            t_args_lang(
                error.message_key(),
                &[("underbust", underbust.as_str())],
                language_code,
            )
        }
        _ => t_lang(error.message_key(), language_code),
    }
}

/// Format the product list shown once the budget is chosen
pub fn format_results(
    size: SizeLabel,
    garment: GarmentType,
    budget: BudgetTier,
    language_code: Option<&str>,
) -> Result<String> {
    let links = shopping_links(size, garment, budget)?;

    let garment_label = t_lang(garment.label_key(), language_code);
    let size_label = size.to_string();
    let mut result = t_args_lang(
        "results-title",
        &[("garment", garment_label.as_str()), ("size", size_label.as_str())],
        language_code,
    );
    result.push('\n');

    for link in &links {
        result.push_str(&format!("\n• {}: {}", link.store, link.url));
    }

    result.push_str(&format!(
        "\n\n{}\n\n{}",
        t_lang(garment.tip_key(), language_code),
        t_lang("results-restart", language_code)
    ));

    Ok(result)
}

/// Render a dialogue reply into message text and an optional keyboard
pub fn format_reply(reply: &Reply, language_code: Option<&str>) -> Result<OutgoingMessage> {
    let message = match reply {
        Reply::AskUnderbust {
            reason: StartReason::OutOfSequence,
        } => OutgoingMessage::text(format!(
            "{}\n\n{}",
            t_lang("out-of-sequence", language_code),
            t_lang("prompt-underbust", language_code)
        )),
        Reply::AskUnderbust { .. } => OutgoingMessage::text(format_welcome(language_code)),
        Reply::AskBust => OutgoingMessage::text(t_lang("prompt-bust", language_code)),
        Reply::InvalidMeasurement { step, error } => {
            let prompt = match step {
                Step::AwaitingBust => "prompt-bust",
                _ => "prompt-underbust",
            };
            OutgoingMessage::text(format!(
                "{}\n\n{}",
                format_measurement_error(error, language_code),
                t_lang(prompt, language_code)
            ))
        }
        Reply::ChooseGarment { size, repeat } => {
            let text = if *repeat {
                t_lang("prompt-garment", language_code)
            } else {
                let size_label = size.to_string();
                format!(
                    "{}\n\n{}",
                    t_args_lang("size-result", &[("size", size_label.as_str())], language_code),
                    t_lang("prompt-garment", language_code)
                )
            };
            OutgoingMessage {
                text,
                keyboard: Some(create_garment_keyboard(language_code)),
            }
        }
        Reply::ChooseBudget { .. } => OutgoingMessage {
            text: t_lang("prompt-budget", language_code),
            keyboard: Some(create_budget_keyboard(language_code)),
        },
        Reply::Results {
            size,
            garment,
            budget,
        } => OutgoingMessage::text(format_results(*size, *garment, *budget, language_code)?),
    };

    Ok(message)
}
