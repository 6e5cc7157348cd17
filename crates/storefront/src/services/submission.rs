//! Contact form delivery.
//!
//! The storefront has no mail backend; [`SimulatedContactSubmitter`] stands in
//! for one by waiting a fixed delay and then accepting the message.

use std::time::Duration;

use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use super::BoxFuture;
use crate::forms::ContactSubmission;

/// Errors a submission service can report.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The service could not be reached.
    #[error("submission service unavailable: {0}")]
    Unavailable(String),

    /// The service refused the message.
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Acknowledgement for an accepted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
}

/// Delivers validated contact messages.
pub trait ContactSubmitter: Send + Sync {
    /// Deliver one message. Resolves once the service has accepted or
    /// refused it; there is no retry and no cancellation.
    fn submit<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> BoxFuture<'a, Result<SubmissionReceipt, SubmitError>>;
}

/// Accepts every message after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedContactSubmitter {
    delay: Duration,
}

impl SimulatedContactSubmitter {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ContactSubmitter for SimulatedContactSubmitter {
    fn submit<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> BoxFuture<'a, Result<SubmissionReceipt, SubmitError>> {
        Box::pin(simulate(self.delay, submission))
    }
}

#[instrument(skip_all, fields(department = submission.department.id, delay = ?delay))]
async fn simulate(
    delay: Duration,
    submission: &ContactSubmission,
) -> Result<SubmissionReceipt, SubmitError> {
    tokio::time::sleep(delay).await;
    let receipt = SubmissionReceipt {
        reference: Uuid::new_v4(),
    };
    tracing::info!(
        reference = %receipt.reference,
        preferred_contact = submission.preferred_contact.as_str(),
        "Contact message accepted"
    );
    Ok(receipt)
}
