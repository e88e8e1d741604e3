//! Sizing dialogue module: the per-user conversation state machine.
//!
//! [`advance`] is pure: it takes the stored state (if any) and one piece of
//! user input, and returns the state to store plus the single reply to send.
//! Storing goes through [`FitDialogue`]; sending is left to the bot layer.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::Dialogue;

use crate::catalog::{BudgetTier, GarmentType};
use crate::errors::MeasurementError;
use crate::session::SessionStore;
use crate::sizing::{calculate_size, parse_measurement, validate_bust, SizeLabel};

const GARMENT_PREFIX: &str = "garment:";
const BUDGET_PREFIX: &str = "budget:";

/// Where a user is in the sizing conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    AwaitingUnderbust,
    AwaitingBust,
    AwaitingType,
    AwaitingBudget,
    Done,
}

/// Conversation state together with everything collected so far
///
/// Each variant carries the values gathered by the previous steps, so a
/// measurement can only be written by the step that asks for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitDialogueState {
    #[default]
    AwaitingUnderbust,
    AwaitingBust {
        underbust_cm: u32,
    },
    AwaitingType {
        underbust_cm: u32,
        bust_cm: u32,
        size: SizeLabel,
    },
    AwaitingBudget {
        underbust_cm: u32,
        bust_cm: u32,
        size: SizeLabel,
        garment: GarmentType,
    },
    Done {
        underbust_cm: u32,
        bust_cm: u32,
        size: SizeLabel,
        garment: GarmentType,
        budget: BudgetTier,
    },
}

impl FitDialogueState {
    pub fn step(&self) -> Step {
        match self {
            FitDialogueState::AwaitingUnderbust => Step::AwaitingUnderbust,
            FitDialogueState::AwaitingBust { .. } => Step::AwaitingBust,
            FitDialogueState::AwaitingType { .. } => Step::AwaitingType,
            FitDialogueState::AwaitingBudget { .. } => Step::AwaitingBudget,
            FitDialogueState::Done { .. } => Step::Done,
        }
    }

    pub fn underbust_cm(&self) -> Option<u32> {
        match self {
            FitDialogueState::AwaitingUnderbust => None,
            FitDialogueState::AwaitingBust { underbust_cm }
            | FitDialogueState::AwaitingType { underbust_cm, .. }
            | FitDialogueState::AwaitingBudget { underbust_cm, .. }
            | FitDialogueState::Done { underbust_cm, .. } => Some(*underbust_cm),
        }
    }

    pub fn bust_cm(&self) -> Option<u32> {
        match self {
            FitDialogueState::AwaitingType { bust_cm, .. }
            | FitDialogueState::AwaitingBudget { bust_cm, .. }
            | FitDialogueState::Done { bust_cm, .. } => Some(*bust_cm),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<SizeLabel> {
        match self {
            FitDialogueState::AwaitingType { size, .. }
            | FitDialogueState::AwaitingBudget { size, .. }
            | FitDialogueState::Done { size, .. } => Some(*size),
            _ => None,
        }
    }

    pub fn garment(&self) -> Option<GarmentType> {
        match self {
            FitDialogueState::AwaitingBudget { garment, .. }
            | FitDialogueState::Done { garment, .. } => Some(*garment),
            _ => None,
        }
    }

    pub fn budget(&self) -> Option<BudgetTier> {
        match self {
            FitDialogueState::Done { budget, .. } => Some(*budget),
            _ => None,
        }
    }
}

/// Type alias for the sizing dialogue, keyed by the sender's user id
pub type FitDialogue = Dialogue<FitDialogueState, SessionStore>;

/// One piece of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `/start` or `/restart`
    Restart,
    /// Free text
    Text(String),
    /// Garment button
    Garment(GarmentType),
    /// Budget button
    Budget(BudgetTier),
}

impl Input {
    /// Decode inline keyboard callback data
    pub fn from_callback_data(data: &str) -> Option<Input> {
        if let Some(id) = data.strip_prefix(GARMENT_PREFIX) {
            return id.parse().ok().map(Input::Garment);
        }
        if let Some(id) = data.strip_prefix(BUDGET_PREFIX) {
            return id.parse().ok().map(Input::Budget);
        }
        None
    }
}

pub fn garment_callback_data(garment: GarmentType) -> String {
    format!("{}{}", GARMENT_PREFIX, garment.id())
}

pub fn budget_callback_data(budget: BudgetTier) -> String {
    format!("{}{}", BUDGET_PREFIX, budget.id())
}

/// Why the conversation (re)started at the underbust question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartReason {
    /// Explicit restart command
    Command,
    /// No live dialogue, or the previous one finished
    Fresh,
    /// A button from another step was pressed
    OutOfSequence,
}

/// The message to send back for a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    AskUnderbust {
        reason: StartReason,
    },
    AskBust,
    InvalidMeasurement {
        step: Step,
        error: MeasurementError,
    },
    ChooseGarment {
        size: SizeLabel,
        repeat: bool,
    },
    ChooseBudget {
        garment: GarmentType,
        repeat: bool,
    },
    Results {
        size: SizeLabel,
        garment: GarmentType,
        budget: BudgetTier,
    },
}

/// State to store and reply to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FitDialogueState,
    pub reply: Reply,
}

impl Transition {
    fn restart(reason: StartReason) -> Self {
        Self {
            state: FitDialogueState::AwaitingUnderbust,
            reply: Reply::AskUnderbust { reason },
        }
    }

    fn to(state: FitDialogueState, reply: Reply) -> Self {
        Self { state, reply }
    }
}

/// Apply one input to a user's conversation
pub fn advance(state: Option<FitDialogueState>, input: Input) -> Transition {
    let state = match state {
        Some(state) if state.step() != Step::Done => state,
        _ => {
            let reason = if input == Input::Restart {
                StartReason::Command
            } else {
                StartReason::Fresh
            };
            return Transition::restart(reason);
        }
    };

    match (state.clone(), input) {
        (_, Input::Restart) => Transition::restart(StartReason::Command),

        (FitDialogueState::AwaitingUnderbust, Input::Text(text)) => {
            match parse_measurement(&text) {
                Ok(underbust_cm) => Transition::to(
                    FitDialogueState::AwaitingBust { underbust_cm },
                    Reply::AskBust,
                ),
                Err(error) => Transition::to(
                    state,
                    Reply::InvalidMeasurement {
                        step: Step::AwaitingUnderbust,
                        error,
                    },
                ),
            }
        }

        (FitDialogueState::AwaitingBust { underbust_cm }, Input::Text(text)) => {
            match parse_measurement(&text).and_then(|bust| validate_bust(underbust_cm, bust)) {
                Ok(bust_cm) => {
                    let size = calculate_size(underbust_cm, bust_cm);
                    Transition::to(
                        FitDialogueState::AwaitingType {
                            underbust_cm,
                            bust_cm,
                            size,
                        },
                        Reply::ChooseGarment {
                            size,
                            repeat: false,
                        },
                    )
                }
                Err(error) => Transition::to(
                    state,
                    Reply::InvalidMeasurement {
                        step: Step::AwaitingBust,
                        error,
                    },
                ),
            }
        }

        (
            FitDialogueState::AwaitingType {
                underbust_cm,
                bust_cm,
                size,
            },
            input @ (Input::Garment(_) | Input::Text(_)),
        ) => {
            let garment = match input {
                Input::Garment(garment) => Some(garment),
                Input::Text(text) => text.parse::<GarmentType>().ok(),
                _ => None,
            };
            match garment {
                Some(garment) => Transition::to(
                    FitDialogueState::AwaitingBudget {
                        underbust_cm,
                        bust_cm,
                        size,
                        garment,
                    },
                    Reply::ChooseBudget {
                        garment,
                        repeat: false,
                    },
                ),
                None => Transition::to(state, Reply::ChooseGarment { size, repeat: true }),
            }
        }

        (
            FitDialogueState::AwaitingBudget {
                underbust_cm,
                bust_cm,
                size,
                garment,
            },
            input @ (Input::Budget(_) | Input::Text(_)),
        ) => {
            let budget = match input {
                Input::Budget(budget) => Some(budget),
                Input::Text(text) => text.parse::<BudgetTier>().ok(),
                _ => None,
            };
            match budget {
                Some(budget) => Transition::to(
                    FitDialogueState::Done {
                        underbust_cm,
                        bust_cm,
                        size,
                        garment,
                        budget,
                    },
                    Reply::Results {
                        size,
                        garment,
                        budget,
                    },
                ),
                None => Transition::to(
                    state,
                    Reply::ChooseBudget {
                        garment,
                        repeat: true,
                    },
                ),
            }
        }

        // Finished dialogues were replaced above
        (FitDialogueState::Done { .. }, _) => Transition::restart(StartReason::Fresh),

        // A button that does not belong to the current step
        (_, Input::Garment(_) | Input::Budget(_)) => {
            Transition::restart(StartReason::OutOfSequence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    fn run(inputs: Vec<Input>) -> Transition {
        let mut state = None;
        let mut last = None;
        for input in inputs {
            let transition = advance(state.take(), input);
            state = Some(transition.state.clone());
            last = Some(transition);
        }
        last.unwrap()
    }

    #[test]
    fn test_callback_data_round_trip() {
        for garment in GarmentType::ALL {
            assert_eq!(
                Input::from_callback_data(&garment_callback_data(garment)),
                Some(Input::Garment(garment))
            );
        }
        assert_eq!(Input::from_callback_data("budget:mid"), Some(Input::Budget(BudgetTier::Mid)));
        assert_eq!(Input::from_callback_data("budget:free"), None);
        assert_eq!(Input::from_callback_data("confirm"), None);
    }

    #[test]
    fn test_first_contact_starts_fresh() {
        let t = advance(None, text("hello"));
        assert_eq!(t.state.step(), Step::AwaitingUnderbust);
        assert_eq!(t.reply, Reply::AskUnderbust { reason: StartReason::Fresh });
    }

    #[test]
    fn test_non_numeric_underbust_reprompts() {
        let t = run(vec![Input::Restart, text("about seventy")]);
        assert_eq!(t.state.step(), Step::AwaitingUnderbust);
        assert_eq!(
            t.reply,
            Reply::InvalidMeasurement {
                step: Step::AwaitingUnderbust,
                error: MeasurementError::NotANumber,
            }
        );
    }

    #[test]
    fn test_accessors_follow_state() {
        let t = run(vec![Input::Restart, text("70"), text("84"), text("party")]);
        assert_eq!(t.state.step(), Step::AwaitingBudget);
        assert_eq!(t.state.underbust_cm(), Some(70));
        assert_eq!(t.state.bust_cm(), Some(84));
        assert_eq!(t.state.size().map(|s| s.to_string()), Some("35C".to_string()));
        assert_eq!(t.state.garment(), Some(GarmentType::Party));
        assert_eq!(t.state.budget(), None);
    }

    #[test]
    fn test_typed_choices_are_accepted() {
        let t = run(vec![Input::Restart, text("70"), text("84"), text("sports"), text("High")]);
        assert_eq!(t.state.step(), Step::Done);
        assert_eq!(t.state.garment(), Some(GarmentType::Sports));
        assert_eq!(t.state.budget(), Some(BudgetTier::High));
    }

    #[test]
    fn test_unknown_choice_repeats_keyboard() {
        let t = run(vec![Input::Restart, text("70"), text("84"), text("bridal")]);
        assert_eq!(t.state.step(), Step::AwaitingType);
        assert!(matches!(t.reply, Reply::ChooseGarment { repeat: true, .. }));
    }

    #[test]
    fn test_budget_button_during_type_step_restarts() {
        let t = run(vec![
            Input::Restart,
            text("70"),
            text("84"),
            Input::Budget(BudgetTier::Low),
        ]);
        assert_eq!(t.state.step(), Step::AwaitingUnderbust);
        assert_eq!(t.reply, Reply::AskUnderbust { reason: StartReason::OutOfSequence });
    }
}
