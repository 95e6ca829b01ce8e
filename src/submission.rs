//! Submission port: the seam where KYC applications and registrations
//! leave the client.
//!
//! `SimulatedSubmission` stands in for the identity-verification and
//! account services by waiting a fixed delay and then accepting.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SubmissionConfig;
use crate::kyc::KycForm;
use crate::register::RegistrationForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Kyc,
    Registration,
}

/// Acknowledgement returned by a port that accepted a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub kind: SubmissionKind,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new(kind: SubmissionKind) -> Self {
        Self {
            reference: Uuid::new_v4(),
            kind,
            submitted_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{service} rejected the submission: {reason}")]
    Rejected { service: String, reason: String },

    #[error("{service} is unavailable")]
    Unavailable { service: String },
}

#[async_trait]
pub trait SubmissionPort: Send + Sync {
    /// Port name (for logging)
    fn name(&self) -> &str;

    async fn submit_kyc(&self, form: &KycForm) -> Result<SubmissionReceipt, SubmissionError>;

    async fn submit_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Accepts everything after a fixed per-kind delay
#[derive(Debug, Clone)]
pub struct SimulatedSubmission {
    kyc_delay: Duration,
    registration_delay: Duration,
}

impl SimulatedSubmission {
    pub fn new(kyc_delay: Duration, registration_delay: Duration) -> Self {
        Self {
            kyc_delay,
            registration_delay,
        }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(config.kyc_delay(), config.registration_delay())
    }

    async fn accept(&self, kind: SubmissionKind, delay: Duration) -> SubmissionReceipt {
        tracing::debug!(?kind, delay_ms = delay.as_millis() as u64, "Simulating submission");
        tokio::time::sleep(delay).await;
        let receipt = SubmissionReceipt::new(kind);
        tracing::info!(?kind, reference = %receipt.reference, "Submission accepted");
        receipt
    }
}

impl Default for SimulatedSubmission {
    fn default() -> Self {
        Self::from_config(&crate::config::Config::default().submission)
    }
}

#[async_trait]
impl SubmissionPort for SimulatedSubmission {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn submit_kyc(&self, _form: &KycForm) -> Result<SubmissionReceipt, SubmissionError> {
        Ok(self.accept(SubmissionKind::Kyc, self.kyc_delay).await)
    }

    async fn submit_registration(
        &self,
        _form: &RegistrationForm,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        Ok(self
            .accept(SubmissionKind::Registration, self.registration_delay)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_kyc_waits_configured_delay() {
        let port = SimulatedSubmission::default();
        let started = tokio::time::Instant::now();

        let receipt = port.submit_kyc(&KycForm::default()).await.unwrap();

        assert_eq!(receipt.kind, SubmissionKind::Kyc);
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_waits_configured_delay() {
        let port = SimulatedSubmission::new(Duration::from_secs(9), Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        let receipt = port
            .submit_registration(&RegistrationForm::default())
            .await
            .unwrap();

        assert_eq!(receipt.kind, SubmissionKind::Registration);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1500));
        assert!(elapsed < Duration::from_secs(9));
    }

    #[tokio::test]
    async fn test_receipts_are_unique() {
        let port = SimulatedSubmission::new(Duration::ZERO, Duration::ZERO);
        let a = port.submit_kyc(&KycForm::default()).await.unwrap();
        let b = port.submit_kyc(&KycForm::default()).await.unwrap();
        assert_ne!(a.reference, b.reference);
    }

    #[test]
    fn test_error_messages() {
        let err = SubmissionError::Unavailable {
            service: "kyc-review".into(),
        };
        assert_eq!(err.to_string(), "kyc-review is unavailable");
    }
}
