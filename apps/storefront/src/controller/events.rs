//! Order panel commands and the text shown for each submission phase.

use client_core::{error::SubmitRejected, SubmissionState};
use shared::domain::ProductId;

pub const SUBMITTING_TEXT: &str = "Отправка...";
pub const SUCCESS_TEXT: &str = "Спасибо! Мы получили ваш заказ и скоро перезвоним для подтверждения.";
pub const IN_FLIGHT_TEXT: &str = "Заказ уже отправляется, подождите.";
pub const AWAITING_RESET_TEXT: &str = "Заказ уже принят. Чтобы отправить еще один, очистите форму.";

/// Which of the two order forms a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSurface {
    /// The order section on the page.
    Section,
    /// The quick-order dialog opened from a catalog card.
    Dialog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    OpenDialog(Option<ProductId>),
    CloseDialog,
    EditField { field: String, value: String },
    Dispatched(FormSurface),
    Refused(SubmitRejected),
    Finished(SubmissionState),
    /// Clears the panel's status line only. Callers pair it with
    /// `OrderSubmissionController::reset` so the controller also returns to idle.
    Reset,
}

pub fn status_line(state: &SubmissionState) -> Option<String> {
    match state {
        SubmissionState::Idle => None,
        SubmissionState::Submitting => Some(SUBMITTING_TEXT.to_string()),
        SubmissionState::Succeeded => Some(SUCCESS_TEXT.to_string()),
        SubmissionState::Failed(err) => Some(err.user_message()),
    }
}

pub fn refusal_line(rejected: SubmitRejected) -> &'static str {
    match rejected {
        SubmitRejected::InFlight => IN_FLIGHT_TEXT,
        SubmitRejected::AwaitingReset => AWAITING_RESET_TEXT,
    }
}
