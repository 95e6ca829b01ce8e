//! estate-rise - client core of the Moroccan Real Estate Rise crowdfunding
//! platform
//!
//! Project catalog and filtering, the five-step KYC wizard, registration
//! and a simulated submission port, rendered as a terminal UI.

pub mod app;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod kyc;
pub mod logging;
pub mod notifications;
pub mod register;
pub mod routes;
pub mod submission;
pub mod ui;
