//! Delivery of order submissions to the third-party form relay.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use shared::{domain::OrderSubmission, protocol::RelayResponse};
use tracing::debug;

use crate::error::TransportError;

#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn deliver(&self, submission: &OrderSubmission)
        -> Result<RelayResponse, TransportError>;
}

#[async_trait]
impl<T: FormRelay + ?Sized> FormRelay for Arc<T> {
    async fn deliver(
        &self,
        submission: &OrderSubmission,
    ) -> Result<RelayResponse, TransportError> {
        (**self).deliver(submission).await
    }
}

/// POSTs the form-encoded fields and reads back `{ success, message }`.
///
/// The whole round trip, body included, is bounded by `timeout`.
pub struct HttpFormRelay {
    http: Client,
    timeout: Duration,
}

impl HttpFormRelay {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl FormRelay for HttpFormRelay {
    async fn deliver(
        &self,
        submission: &OrderSubmission,
    ) -> Result<RelayResponse, TransportError> {
        let request = self
            .http
            .post(&submission.target_endpoint)
            .header(ACCEPT, "application/json")
            .form(&submission.form_pairs());

        let round_trip = async {
            let res = request.send().await?;
            let status = res.status();
            let body = res.bytes().await?;
            Ok::<_, TransportError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, round_trip)
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;
        debug!(%status, bytes = body.len(), "form relay responded");

        // Rejections arrive with 4xx statuses and a JSON body, so the status
        // alone does not decide the outcome.
        serde_json::from_slice::<RelayResponse>(&body)
            .map_err(|err| TransportError::Decode(format!("status {status}: {err}")))
    }
}

#[cfg(test)]
#[path = "tests/relay_tests.rs"]
mod tests;
