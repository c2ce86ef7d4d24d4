//! Lifecycle of one form's submission to the relay.
//!
//! `Idle -> Submitting -> Succeeded | Failed`, back to `Idle` only through
//! [`OrderSubmissionController::reset`]. Each accepted `submit` gets a fresh
//! attempt number; a response is applied only while its attempt is still the
//! current one, so a reply arriving after `reset` is dropped.

use shared::{
    domain::{OrderFields, OrderSubmission},
    error::SubmissionError,
};
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::{error::SubmitRejected, relay::FormRelay};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(SubmissionError),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failed(err) => Some(err.user_message()),
            _ => None,
        }
    }
}

/// What happened to an accepted `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response was applied; carries the terminal state.
    Completed(SubmissionState),
    /// The form was reset while the request was in flight; the response was dropped.
    Superseded,
}

struct Attempt {
    state: SubmissionState,
    epoch: u64,
}

pub struct OrderSubmissionController<R> {
    relay: R,
    endpoint: String,
    attempt: Mutex<Attempt>,
    state_tx: watch::Sender<SubmissionState>,
}

impl<R: FormRelay> OrderSubmissionController<R> {
    pub fn new(relay: R, endpoint: impl Into<String>) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        Self {
            relay,
            endpoint: endpoint.into(),
            attempt: Mutex::new(Attempt {
                state: SubmissionState::Idle,
                epoch: 0,
            }),
            state_tx,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> SubmissionState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state_tx.subscribe()
    }

    pub async fn submit(
        &self,
        fields: OrderFields,
        access_key: &str,
    ) -> Result<SubmitOutcome, SubmitRejected> {
        let epoch = {
            let mut attempt = self.attempt.lock().await;
            match attempt.state {
                SubmissionState::Submitting => {
                    warn!("ignoring submit while a submission is in flight");
                    return Err(SubmitRejected::InFlight);
                }
                SubmissionState::Succeeded => return Err(SubmitRejected::AwaitingReset),
                SubmissionState::Idle | SubmissionState::Failed(_) => {}
            }
            attempt.epoch += 1;
            self.transition(&mut attempt, SubmissionState::Submitting);
            attempt.epoch
        };

        let submission = OrderSubmission {
            fields,
            target_endpoint: self.endpoint.clone(),
            access_key: access_key.to_string(),
        };
        info!(epoch, endpoint = %self.endpoint, "submitting order form");

        let next = match self.relay.deliver(&submission).await {
            Ok(response) if response.success => {
                info!(epoch, "form relay accepted submission");
                SubmissionState::Succeeded
            }
            Ok(response) => {
                let err = SubmissionError::rejected(response.remote_message());
                warn!(epoch, message = %err, "form relay rejected submission");
                SubmissionState::Failed(err)
            }
            Err(err) => {
                warn!(epoch, error = %err, "form relay unreachable");
                SubmissionState::Failed(SubmissionError::Transport)
            }
        };

        let mut attempt = self.attempt.lock().await;
        if attempt.epoch != epoch || !attempt.state.is_submitting() {
            warn!(
                epoch,
                current = attempt.epoch,
                "dropping relay response for a superseded attempt"
            );
            return Ok(SubmitOutcome::Superseded);
        }
        self.transition(&mut attempt, next.clone());
        Ok(SubmitOutcome::Completed(next))
    }

    /// Back to `Idle` from any state. An in-flight request keeps running but its
    /// response will not be applied.
    pub async fn reset(&self) {
        let mut attempt = self.attempt.lock().await;
        if attempt.state.is_submitting() {
            info!(epoch = attempt.epoch, "reset while submitting; response will be dropped");
        }
        attempt.epoch += 1;
        self.transition(&mut attempt, SubmissionState::Idle);
    }

    fn transition(&self, attempt: &mut Attempt, next: SubmissionState) {
        attempt.state = next.clone();
        self.state_tx.send_replace(next);
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
