//! Five-step KYC wizard state machine.

use serde::{Deserialize, Serialize};

use super::{FieldValue, KycError, KycField, KycForm};
use crate::notifications::NotificationEvent;
use crate::submission::{SubmissionError, SubmissionPort, SubmissionReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycStep {
    Personal,
    Address,
    Profile,
    Documents,
    Declarations,
}

impl KycStep {
    pub const COUNT: u8 = 5;

    pub fn all() -> &'static [KycStep] {
        &[
            KycStep::Personal,
            KycStep::Address,
            KycStep::Profile,
            KycStep::Documents,
            KycStep::Declarations,
        ]
    }

    /// 1-based position
    pub fn number(self) -> u8 {
        match self {
            KycStep::Personal => 1,
            KycStep::Address => 2,
            KycStep::Profile => 3,
            KycStep::Documents => 4,
            KycStep::Declarations => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_first(self) -> bool {
        self == KycStep::Personal
    }

    pub fn is_last(self) -> bool {
        self == KycStep::Declarations
    }

    pub fn heading(self) -> &'static str {
        match self {
            KycStep::Personal => "Personal Information",
            KycStep::Address => "Address Information",
            KycStep::Profile => "Investment Profile",
            KycStep::Documents => "Document Verification",
            KycStep::Declarations => "Declarations & Submission",
        }
    }

    /// Label under the progress bar
    pub fn tab_label(self) -> &'static str {
        match self {
            KycStep::Personal => "Personal",
            KycStep::Address => "Address",
            KycStep::Profile => "Profile",
            KycStep::Documents => "Documents",
            KycStep::Declarations => "Submit",
        }
    }

    /// Caption of the forward button; the last step submits instead
    pub fn next_label(self) -> Option<&'static str> {
        match self {
            KycStep::Personal => Some("Next: Address Information"),
            KycStep::Address => Some("Next: Investment Profile"),
            KycStep::Profile => Some("Next: Document Upload"),
            KycStep::Documents => Some("Next: Declarations"),
            KycStep::Declarations => None,
        }
    }

    pub fn progress_percent(self) -> u16 {
        u16::from(self.number()) * 100 / u16::from(Self::COUNT)
    }
}

/// State of one KYC page: the current step, the application being filled
/// in and whether a submission is in flight.
#[derive(Debug, Clone)]
pub struct KycStepper {
    step: KycStep,
    form: KycForm,
    submitting: bool,
}

impl Default for KycStepper {
    fn default() -> Self {
        Self::new()
    }
}

impl KycStepper {
    pub fn new() -> Self {
        Self {
            step: KycStep::Personal,
            form: KycForm::default(),
            submitting: false,
        }
    }

    pub fn step(&self) -> KycStep {
        self.step
    }

    pub fn form(&self) -> &KycForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Move one step forward. At the last step nothing changes and `None`
    /// is returned.
    pub fn advance(&mut self) -> Option<KycStep> {
        let next = self.step.next()?;
        tracing::debug!(from = self.step.number(), to = next.number(), "KYC step advanced");
        self.step = next;
        Some(next)
    }

    /// Move one step back. At the first step nothing changes and `None`
    /// is returned.
    pub fn retreat(&mut self) -> Option<KycStep> {
        let previous = self.step.previous()?;
        tracing::debug!(
            from = self.step.number(),
            to = previous.number(),
            "KYC step retreated"
        );
        self.step = previous;
        Some(previous)
    }

    pub fn update_field(&mut self, field: KycField, value: FieldValue) -> Result<(), KycError> {
        self.form.set(field, value)
    }

    pub fn update_field_by_name(&mut self, name: &str, value: FieldValue) -> Result<(), KycError> {
        let field =
            KycField::from_name(name).ok_or_else(|| KycError::UnknownField(name.to_string()))?;
        self.update_field(field, value)
    }

    /// The submit action is available iff the compliance declaration is
    /// checked and nothing is in flight. No other field matters.
    pub fn submit_enabled(&self) -> bool {
        self.form.is_compliant && !self.submitting
    }

    /// Enter the submitting state and hand out the application to send.
    pub fn begin_submission(&mut self) -> Result<KycForm, KycError> {
        if !self.step.is_last() {
            return Err(KycError::NotAtFinalStep(self.step));
        }
        if self.submitting {
            return Err(KycError::AlreadySubmitting);
        }
        if !self.form.is_compliant {
            return Err(KycError::NotCompliant);
        }
        self.submitting = true;
        tracing::info!("KYC submission started");
        Ok(self.form.clone())
    }

    /// Leave the submitting state and produce the single notification for
    /// the outcome.
    pub fn complete_submission(
        &mut self,
        outcome: Result<SubmissionReceipt, SubmissionError>,
    ) -> NotificationEvent {
        self.submitting = false;
        match outcome {
            Ok(receipt) => {
                tracing::info!(reference = %receipt.reference, "KYC submission finished");
                NotificationEvent::KycSubmitted {
                    reference: receipt.reference,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "KYC submission failed");
                NotificationEvent::KycFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Run a whole submission against `port`
    pub async fn submit(&mut self, port: &dyn SubmissionPort) -> Result<NotificationEvent, KycError> {
        let form = self.begin_submission()?;
        let outcome = port.submit_kyc(&form).await;
        Ok(self.complete_submission(outcome))
    }
}
