//! Account registration form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notifications::NotificationEvent;
use crate::submission::{SubmissionError, SubmissionPort, SubmissionReceipt};

/// Shown under the password field; not enforced
pub const PASSWORD_HINT: &str = "Password must be at least 8 characters long";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl RegisterField {
    pub fn all() -> &'static [RegisterField] {
        &[
            RegisterField::FirstName,
            RegisterField::LastName,
            RegisterField::Email,
            RegisterField::Password,
            RegisterField::ConfirmPassword,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            RegisterField::FirstName => "first_name",
            RegisterField::LastName => "last_name",
            RegisterField::Email => "email",
            RegisterField::Password => "password",
            RegisterField::ConfirmPassword => "confirm_password",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegisterField::FirstName => "First Name",
            RegisterField::LastName => "Last Name",
            RegisterField::Email => "Email",
            RegisterField::Password => "Password",
            RegisterField::ConfirmPassword => "Confirm Password",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            RegisterField::Email => Some("your@email.com"),
            _ => None,
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, RegisterField::Password | RegisterField::ConfirmPassword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("passwords don't match")]
    PasswordMismatch,

    #[error("the terms and conditions must be accepted")]
    TermsNotAccepted,

    #[error("a registration is already in progress")]
    AlreadySubmitting,
}

impl RegistrationError {
    /// The notification this error surfaces as, if any
    pub fn notification(&self) -> Option<NotificationEvent> {
        match self {
            RegistrationError::PasswordMismatch => Some(NotificationEvent::PasswordMismatch),
            RegistrationError::TermsNotAccepted => Some(NotificationEvent::TermsRequired),
            RegistrationError::AlreadySubmitting => None,
        }
    }
}

impl RegistrationForm {
    pub fn field(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::FirstName => &self.first_name,
            RegisterField::LastName => &self.last_name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set_field(&mut self, field: RegisterField, value: impl Into<String>) {
        let slot = match field {
            RegisterField::FirstName => &mut self.first_name,
            RegisterField::LastName => &mut self.last_name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }

    /// Checks, in order: the passwords match, then the terms are accepted.
    /// Nothing else is validated.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        if !self.accept_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }
        Ok(())
    }
}

/// State of one registration page
#[derive(Debug, Clone, Default)]
pub struct RegisterController {
    form: RegistrationForm,
    submitting: bool,
}

impl RegisterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn update_field(&mut self, field: RegisterField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn set_accept_terms(&mut self, accepted: bool) {
        self.form.accept_terms = accepted;
    }

    pub fn toggle_terms(&mut self) {
        self.form.accept_terms = !self.form.accept_terms;
    }

    pub fn submit_enabled(&self) -> bool {
        !self.submitting
    }

    /// Validate and enter the submitting state. Validation failures leave
    /// the controller idle so the user can edit and resubmit.
    pub fn begin_submission(&mut self) -> Result<RegistrationForm, RegistrationError> {
        if self.submitting {
            return Err(RegistrationError::AlreadySubmitting);
        }
        if let Err(e) = self.form.validate() {
            tracing::debug!(error = %e, "Registration rejected by validation");
            return Err(e);
        }
        self.submitting = true;
        tracing::info!("Registration submission started");
        Ok(self.form.clone())
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<SubmissionReceipt, SubmissionError>,
    ) -> NotificationEvent {
        self.submitting = false;
        match outcome {
            Ok(receipt) => {
                tracing::info!(reference = %receipt.reference, "Registration finished");
                NotificationEvent::RegistrationSubmitted {
                    email: self.form.email.clone(),
                    reference: receipt.reference,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                NotificationEvent::RegistrationFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Run a whole registration against `port`
    pub async fn submit(
        &mut self,
        port: &dyn SubmissionPort,
    ) -> Result<NotificationEvent, RegistrationError> {
        let form = self.begin_submission()?;
        let outcome = port.submit_registration(&form).await;
        Ok(self.complete_submission(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::SimulatedSubmission;
    use std::time::Duration;

    fn filled(password: &str, confirm: &str, terms: bool) -> RegisterController {
        let mut controller = RegisterController::new();
        controller.update_field(RegisterField::FirstName, "Youssef");
        controller.update_field(RegisterField::LastName, "Benali");
        controller.update_field(RegisterField::Email, "youssef@example.ma");
        controller.update_field(RegisterField::Password, password);
        controller.update_field(RegisterField::ConfirmPassword, confirm);
        controller.set_accept_terms(terms);
        controller
    }

    #[test]
    fn test_mismatch_is_checked_before_terms() {
        let mut controller = filled("secret-one", "secret-two", false);
        assert_eq!(
            controller.begin_submission().unwrap_err(),
            RegistrationError::PasswordMismatch
        );
        assert!(!controller.is_submitting());
    }

    #[test]
    fn test_terms_required() {
        let mut controller = filled("secret-one", "secret-one", false);
        let err = controller.begin_submission().unwrap_err();
        assert_eq!(err, RegistrationError::TermsNotAccepted);
        assert_eq!(err.notification(), Some(NotificationEvent::TermsRequired));
    }

    #[test]
    fn test_short_password_is_not_rejected() {
        let mut controller = filled("abc", "abc", true);
        assert!(controller.begin_submission().is_ok());
    }

    #[test]
    fn test_empty_names_are_not_rejected() {
        let mut controller = RegisterController::new();
        controller.set_accept_terms(true);
        assert!(controller.begin_submission().is_ok());
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut controller = filled("pw", "pw", true);
        controller.begin_submission().unwrap();
        assert!(!controller.submit_enabled());
        let err = controller.begin_submission().unwrap_err();
        assert_eq!(err, RegistrationError::AlreadySubmitting);
        assert_eq!(err.notification(), None);
    }

    #[test]
    fn test_toggle_terms() {
        let mut controller = RegisterController::new();
        controller.toggle_terms();
        assert!(controller.form().accept_terms);
        controller.toggle_terms();
        assert!(!controller.form().accept_terms);
    }

    #[test]
    fn test_secret_fields() {
        let secret: Vec<&str> = RegisterField::all()
            .iter()
            .filter(|f| f.is_secret())
            .map(|f| f.name())
            .collect();
        assert_eq!(secret, vec!["password", "confirm_password"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_and_reports_placeholder() {
        let mut controller = filled("pw-12345", "pw-12345", true);
        let port = SimulatedSubmission::new(Duration::ZERO, Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        let event = controller.submit(&port).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(event.to_toast().title, "Registration not implemented yet");
        assert!(!controller.is_submitting());
    }
}
