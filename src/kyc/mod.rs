//! KYC (identity verification) application flow.

use thiserror::Error;

mod form;
mod stepper;

#[cfg(test)]
mod tests;

pub use form::{
    option_label, DocumentHandle, FieldKind, FieldValue, KycField, KycForm,
    ANNUAL_INCOME_RANGES, COUNTRIES, EMPLOYMENT_STATUSES, ID_TYPES, INVESTMENT_EXPERIENCE,
    INVESTMENT_GOALS, SOURCES_OF_FUNDS,
};
pub use stepper::{KycStep, KycStepper};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KycError {
    #[error("cannot submit from the {} step", .0.heading())]
    NotAtFinalStep(KycStep),

    #[error("the compliance declaration must be accepted before submitting")]
    NotCompliant,

    #[error("a KYC submission is already in progress")]
    AlreadySubmitting,

    #[error("unknown KYC field: {0}")]
    UnknownField(String),

    #[error("field {field} takes a {expected} value, got {found}")]
    ValueMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
