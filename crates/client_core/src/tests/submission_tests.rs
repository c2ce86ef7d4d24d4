use super::*;
use crate::error::TransportError;
use async_trait::async_trait;
use shared::{
    error::{DEFAULT_REJECTION_MESSAGE, NETWORK_ERROR_MESSAGE},
    protocol::{RelayResponse, NAME_FIELD, PHONE_FIELD},
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::Notify;

const ENDPOINT: &str = "https://relay.test/submit";

#[derive(Clone)]
enum Reply {
    Respond(RelayResponse),
    Unreachable,
}

struct ScriptedRelay {
    reply: Reply,
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<OrderSubmission>>,
    gates: Vec<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedRelay {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
            gates: Vec::new(),
        }
    }

    /// Relay that signals `started` and then blocks until `release` fires.
    fn gated(reply: Reply) -> (Self, Arc<Notify>, Arc<Notify>) {
        let (relay, mut gates) = Self::gated_calls(reply, 1);
        let (started, release) = gates.remove(0);
        (relay, started, release)
    }

    /// One `(started, release)` pair per call, in call order.
    fn gated_calls(reply: Reply, calls: usize) -> (Self, Vec<(Arc<Notify>, Arc<Notify>)>) {
        let gates: Vec<_> = (0..calls)
            .map(|_| (Arc::new(Notify::new()), Arc::new(Notify::new())))
            .collect();
        let mut relay = Self::new(reply);
        relay.gates = gates.clone();
        (relay, gates)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FormRelay for ScriptedRelay {
    async fn deliver(
        &self,
        submission: &OrderSubmission,
    ) -> Result<RelayResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("seen lock")
            .push(submission.clone());
        if let Some((started, release)) = self.gates.get(call) {
            started.notify_one();
            release.notified().await;
        }
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Unreachable => Err(TransportError::Timeout(Duration::from_secs(15))),
        }
    }
}

fn fields() -> OrderFields {
    let mut fields = OrderFields::new();
    fields.insert(NAME_FIELD.into(), "Иван".into());
    fields.insert(PHONE_FIELD.into(), "+7 (999) 000-00-00".into());
    fields
}

#[tokio::test]
async fn accepted_submission_succeeds() {
    let (relay, started, release) = ScriptedRelay::gated(Reply::Respond(RelayResponse::accepted()));
    let relay = Arc::new(relay);
    let controller = Arc::new(OrderSubmissionController::new(relay.clone(), ENDPOINT));
    assert_eq!(controller.state(), SubmissionState::Idle);

    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(fields(), "key-1").await })
    };
    started.notified().await;
    assert_eq!(controller.state(), SubmissionState::Submitting);

    release.notify_one();
    let outcome = task.await.expect("join").expect("accepted");
    assert_eq!(outcome, SubmitOutcome::Completed(SubmissionState::Succeeded));
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert_eq!(controller.state().error_message(), None);

    let seen = relay.seen.lock().expect("seen lock");
    assert_eq!(seen[0].access_key, "key-1");
    assert_eq!(seen[0].target_endpoint, ENDPOINT);
    assert_eq!(seen[0].fields, fields());
}

#[tokio::test]
async fn rejection_with_message_is_shown_verbatim() {
    let controller = OrderSubmissionController::new(
        ScriptedRelay::new(Reply::Respond(RelayResponse::rejected(Some("X".into())))),
        ENDPOINT,
    );
    controller.submit(fields(), "key").await.expect("accepted");
    assert_eq!(
        controller.state(),
        SubmissionState::Failed(SubmissionError::RemoteRejection {
            message: "X".into()
        })
    );
    assert_eq!(controller.state().error_message().as_deref(), Some("X"));
}

#[tokio::test]
async fn rejection_without_message_uses_default() {
    let controller = OrderSubmissionController::new(
        ScriptedRelay::new(Reply::Respond(RelayResponse::rejected(None))),
        ENDPOINT,
    );
    controller.submit(fields(), "key").await.expect("accepted");
    assert_eq!(
        controller.state().error_message().as_deref(),
        Some(DEFAULT_REJECTION_MESSAGE)
    );
}

#[tokio::test]
async fn transport_failure_uses_network_message() {
    let controller =
        OrderSubmissionController::new(ScriptedRelay::new(Reply::Unreachable), ENDPOINT);
    let outcome = controller.submit(fields(), "key").await.expect("accepted");
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(SubmissionState::Failed(SubmissionError::Transport))
    );
    let message = controller.state().error_message().expect("message");
    assert_eq!(message, NETWORK_ERROR_MESSAGE);
    assert_ne!(message, DEFAULT_REJECTION_MESSAGE);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_refused() {
    let (relay, started, release) = ScriptedRelay::gated(Reply::Respond(RelayResponse::accepted()));
    let relay = Arc::new(relay);
    let controller = Arc::new(OrderSubmissionController::new(relay.clone(), ENDPOINT));

    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(fields(), "key").await })
    };
    started.notified().await;

    assert_eq!(
        controller.submit(fields(), "key").await,
        Err(SubmitRejected::InFlight)
    );
    assert_eq!(relay.calls(), 1);

    release.notify_one();
    task.await.expect("join").expect("accepted");
    assert_eq!(relay.calls(), 1);
    assert_eq!(controller.state(), SubmissionState::Succeeded);
}

#[tokio::test]
async fn submit_after_success_requires_reset() {
    let relay = Arc::new(ScriptedRelay::new(Reply::Respond(RelayResponse::accepted())));
    let controller = OrderSubmissionController::new(relay.clone(), ENDPOINT);
    controller.submit(fields(), "key").await.expect("accepted");

    assert_eq!(
        controller.submit(fields(), "key").await,
        Err(SubmitRejected::AwaitingReset)
    );
    assert_eq!(relay.calls(), 1);

    controller.reset().await;
    controller.submit(fields(), "key").await.expect("accepted");
    assert_eq!(relay.calls(), 2);
}

#[tokio::test]
async fn failed_attempt_can_be_retried_manually() {
    let relay = Arc::new(ScriptedRelay::new(Reply::Unreachable));
    let controller = OrderSubmissionController::new(relay.clone(), ENDPOINT);
    controller.submit(fields(), "key").await.expect("accepted");
    controller.submit(fields(), "key").await.expect("retry accepted");
    assert_eq!(relay.calls(), 2);
}

#[tokio::test]
async fn reset_clears_success_and_failure() {
    let controller = OrderSubmissionController::new(
        ScriptedRelay::new(Reply::Respond(RelayResponse::accepted())),
        ENDPOINT,
    );
    controller.submit(fields(), "key").await.expect("accepted");
    controller.reset().await;
    assert_eq!(controller.state(), SubmissionState::Idle);

    let controller =
        OrderSubmissionController::new(ScriptedRelay::new(Reply::Unreachable), ENDPOINT);
    controller.submit(fields(), "key").await.expect("accepted");
    controller.reset().await;
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.state().error_message(), None);
}

#[tokio::test]
async fn late_response_after_reset_is_dropped() {
    let (relay, started, release) = ScriptedRelay::gated(Reply::Unreachable);
    let controller = Arc::new(OrderSubmissionController::new(relay, ENDPOINT));
    let mut updates = controller.subscribe();

    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(fields(), "key").await })
    };
    started.notified().await;
    controller.reset().await;
    assert_eq!(*updates.borrow_and_update(), SubmissionState::Idle);

    release.notify_one();
    let outcome = task.await.expect("join").expect("accepted");
    assert_eq!(outcome, SubmitOutcome::Superseded);
    assert_eq!(controller.state(), SubmissionState::Idle);

    assert!(!updates.has_changed().expect("sender alive"));
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_attempt() {
    let (relay, gates) = ScriptedRelay::gated_calls(Reply::Respond(RelayResponse::accepted()), 2);
    let relay = Arc::new(relay);
    let controller = Arc::new(OrderSubmissionController::new(relay.clone(), ENDPOINT));

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(fields(), "key").await })
    };
    gates[0].0.notified().await;
    controller.reset().await;

    let second = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(fields(), "key").await })
    };
    gates[1].0.notified().await;
    assert_eq!(relay.calls(), 2);
    assert_eq!(controller.state(), SubmissionState::Submitting);

    gates[0].1.notify_one();
    let first = first.await.expect("join").expect("accepted");
    assert_eq!(first, SubmitOutcome::Superseded);
    assert_eq!(controller.state(), SubmissionState::Submitting);

    gates[1].1.notify_one();
    let second = second.await.expect("join").expect("accepted");
    assert_eq!(second, SubmitOutcome::Completed(SubmissionState::Succeeded));
    assert_eq!(controller.state(), SubmissionState::Succeeded);
}

#[tokio::test]
async fn subscribers_observe_terminal_state() {
    let controller = OrderSubmissionController::new(
        ScriptedRelay::new(Reply::Respond(RelayResponse::rejected(None))),
        ENDPOINT,
    );
    let mut updates = controller.subscribe();
    controller.submit(fields(), "key").await.expect("accepted");

    assert!(updates.has_changed().expect("sender alive"));
    let seen = updates.borrow_and_update().clone();
    assert!(matches!(seen, SubmissionState::Failed(SubmissionError::RemoteRejection { .. })));
}
