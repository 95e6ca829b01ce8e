//! Tests for the KYC wizard

use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::notifications::NotificationEvent;
use crate::register::RegistrationForm;
use crate::submission::{
    SimulatedSubmission, SubmissionError, SubmissionPort, SubmissionReceipt,
};

fn at_declarations() -> KycStepper {
    let mut stepper = KycStepper::new();
    while stepper.advance().is_some() {}
    stepper
}

struct RejectingPort;

#[async_trait]
impl SubmissionPort for RejectingPort {
    fn name(&self) -> &str {
        "rejecting"
    }

    async fn submit_kyc(&self, _form: &KycForm) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Rejected {
            service: "kyc-review".into(),
            reason: "document unreadable".into(),
        })
    }

    async fn submit_registration(
        &self,
        _form: &RegistrationForm,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Unavailable {
            service: "accounts".into(),
        })
    }
}

// ─── Step Transitions ───────────────────────────────────────────────────────

#[test]
fn test_stepper_starts_on_personal_step() {
    let stepper = KycStepper::new();
    assert_eq!(stepper.step(), KycStep::Personal);
    assert_eq!(stepper.step().number(), 1);
    assert!(!stepper.is_submitting());
}

#[test]
fn test_advance_walks_every_step_in_order() {
    let mut stepper = KycStepper::new();
    let mut seen = vec![stepper.step()];
    while let Some(step) = stepper.advance() {
        seen.push(step);
    }
    assert_eq!(seen, KycStep::all().to_vec());
}

#[test]
fn test_advance_at_last_step_is_a_no_op() {
    let mut stepper = at_declarations();
    assert_eq!(stepper.advance(), None);
    assert_eq!(stepper.step(), KycStep::Declarations);
}

#[test]
fn test_retreat_at_first_step_is_a_no_op() {
    let mut stepper = KycStepper::new();
    assert_eq!(stepper.retreat(), None);
    assert_eq!(stepper.step(), KycStep::Personal);
}

#[test]
fn test_any_action_sequence_stays_in_range() {
    let mut stepper = KycStepper::new();
    // Deterministic pseudo-random walk of advance/retreat
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        if seed % 2 == 0 {
            stepper.advance();
        } else {
            stepper.retreat();
        }
        assert!((1..=5).contains(&stepper.step().number()));
    }
}

#[test]
fn test_step_transitions_keep_form_data() {
    let mut stepper = KycStepper::new();
    stepper
        .update_field(KycField::FullName, FieldValue::text("Amina El Idrissi"))
        .unwrap();
    stepper.advance();
    stepper.advance();
    stepper.retreat();
    assert_eq!(stepper.form().full_name, "Amina El Idrissi");
}

#[test]
fn test_step_metadata() {
    assert_eq!(KycStep::Personal.progress_percent(), 20);
    assert_eq!(KycStep::Declarations.progress_percent(), 100);
    assert_eq!(
        KycStep::Profile.next_label(),
        Some("Next: Document Upload")
    );
    assert_eq!(KycStep::Declarations.next_label(), None);
    assert_eq!(KycStep::Declarations.tab_label(), "Submit");
    assert_eq!(KycStep::from_number(0), None);
    assert_eq!(KycStep::from_number(6), None);
}

// ─── Field Updates ──────────────────────────────────────────────────────────

#[test]
fn test_update_field_touches_only_that_field() {
    let mut stepper = KycStepper::new();
    let before = stepper.form().clone();

    stepper
        .update_field(KycField::Occupation, FieldValue::text("Architect"))
        .unwrap();

    let mut expected = before;
    expected.occupation = "Architect".to_string();
    assert_eq!(stepper.form(), &expected);
}

#[test]
fn test_update_field_is_idempotent() {
    let mut once = KycStepper::new();
    once.update_field(KycField::City, FieldValue::text("Fez"))
        .unwrap();

    let mut twice = KycStepper::new();
    twice
        .update_field(KycField::City, FieldValue::text("Fez"))
        .unwrap();
    twice
        .update_field(KycField::City, FieldValue::text("Fez"))
        .unwrap();

    assert_eq!(once.form(), twice.form());
}

#[test]
fn test_update_field_last_write_wins() {
    let mut stepper = KycStepper::new();
    stepper
        .update_field(KycField::IdType, FieldValue::text("national_id"))
        .unwrap();
    stepper
        .update_field(KycField::IdType, FieldValue::text("drivers_license"))
        .unwrap();
    assert_eq!(stepper.form().id_type, "drivers_license");
}

#[test]
fn test_update_field_by_name() {
    let mut stepper = KycStepper::new();
    stepper
        .update_field_by_name("postal_code", FieldValue::text("20000"))
        .unwrap();
    assert_eq!(stepper.form().postal_code, "20000");

    let err = stepper
        .update_field_by_name("favourite_colour", FieldValue::text("blue"))
        .unwrap_err();
    assert_eq!(err, KycError::UnknownField("favourite_colour".into()));
}

#[test]
fn test_document_fields_hold_handles_only() {
    let mut stepper = KycStepper::new();
    stepper
        .update_field(
            KycField::ProofOfAddress,
            FieldValue::Document(Some(DocumentHandle::new("/does/not/exist/bill.pdf"))),
        )
        .unwrap();
    let doc = stepper.form().proof_of_address.as_ref().unwrap();
    assert_eq!(doc.display_name(), "bill.pdf");

    stepper
        .update_field(KycField::ProofOfAddress, FieldValue::Document(None))
        .unwrap();
    assert!(stepper.form().proof_of_address.is_none());
}

// ─── Submission Gate ────────────────────────────────────────────────────────

#[test]
fn test_submit_enabled_follows_compliance_flag_only() {
    let mut stepper = at_declarations();
    assert!(!stepper.submit_enabled());

    // Other declarations do not matter
    stepper
        .update_field(KycField::IsPep, FieldValue::Flag(true))
        .unwrap();
    stepper
        .update_field(KycField::IsSanctioned, FieldValue::Flag(true))
        .unwrap();
    assert!(!stepper.submit_enabled());

    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(true))
        .unwrap();
    assert!(stepper.submit_enabled());

    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(false))
        .unwrap();
    assert!(!stepper.submit_enabled());
}

#[test]
fn test_empty_fields_do_not_block_submission() {
    let mut stepper = at_declarations();
    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(true))
        .unwrap();
    let form = stepper.begin_submission().unwrap();
    assert!(form.full_name.is_empty());
    assert!(stepper.is_submitting());
}

#[test]
fn test_begin_submission_errors() {
    let mut stepper = KycStepper::new();
    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(true))
        .unwrap();
    assert_eq!(
        stepper.begin_submission().unwrap_err(),
        KycError::NotAtFinalStep(KycStep::Personal)
    );

    let mut stepper = at_declarations();
    assert_eq!(
        stepper.begin_submission().unwrap_err(),
        KycError::NotCompliant
    );

    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(true))
        .unwrap();
    stepper.begin_submission().unwrap();
    assert!(!stepper.submit_enabled());
    assert_eq!(
        stepper.begin_submission().unwrap_err(),
        KycError::AlreadySubmitting
    );
}

#[tokio::test(start_paused = true)]
async fn test_submit_succeeds_after_delay() {
    let mut stepper = at_declarations();
    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(true))
        .unwrap();
    let port = SimulatedSubmission::new(Duration::from_millis(2000), Duration::ZERO);

    let started = tokio::time::Instant::now();
    let event = stepper.submit(&port).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(2000));
    assert!(matches!(event, NotificationEvent::KycSubmitted { .. }));
    assert!(!stepper.is_submitting());
    assert!(stepper.submit_enabled());
}

#[tokio::test]
async fn test_port_failure_yields_destructive_notification() {
    let mut stepper = at_declarations();
    stepper
        .update_field(KycField::IsCompliant, FieldValue::Flag(true))
        .unwrap();

    let event = stepper.submit(&RejectingPort).await.unwrap();

    match &event {
        NotificationEvent::KycFailed { error } => {
            assert!(error.contains("document unreadable"));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(event.is_failure());
    assert!(!stepper.is_submitting());
}

#[tokio::test]
async fn test_submit_without_compliance_never_reaches_port() {
    let mut stepper = at_declarations();
    let err = stepper.submit(&RejectingPort).await.unwrap_err();
    assert_eq!(err, KycError::NotCompliant);
    assert!(!stepper.is_submitting());
}
