//! # Submission Transport
//!
//! The capability the form controller sends validated submissions through.
//! Hosts inject their own implementation; [`SimulatedTransport`] stands in for
//! a real endpoint with a fixed latency and a random failure rate.

use crate::page::models::FormSubmission;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

/// Default simulated round-trip time
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// Default probability of a simulated failure
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Reasons a submission did not go through
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("submission was rejected by the endpoint")]
    Rejected,
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Acknowledgement of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub accepted_fields: usize,
}

/// Sends one form submission
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, submission: &FormSubmission) -> Result<SubmissionReceipt, TransportError>;
}

/// Sleeps for `latency`, then fails with probability `failure_rate`
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedTransport {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY, DEFAULT_FAILURE_RATE)
    }
}

#[async_trait]
impl SubmissionTransport for SimulatedTransport {
    async fn submit(&self, submission: &FormSubmission) -> Result<SubmissionReceipt, TransportError> {
        let payload = serde_json::to_string(submission)?;
        tracing::info!("Submitting form data: {}", payload);

        tokio::time::sleep(self.latency).await;

        let failed = rand::thread_rng().gen_bool(self.failure_rate);
        if failed {
            tracing::warn!("Simulated transport failure");
            return Err(TransportError::Rejected);
        }
        Ok(SubmissionReceipt {
            accepted_fields: submission.fields.len(),
        })
    }
}
