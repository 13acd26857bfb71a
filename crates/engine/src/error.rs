//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`SplitInvalid`] returned when a split definition is empty, carries
//!   negative weights, does not sum to the required total, or does not list
//!   the expense payer.
//! - [`ExpenseInvalid`] returned when an expense handed to a calculator is
//!   malformed (non-positive amount, missing split).
//! - [`InvalidAmount`] returned when a money value cannot be represented.
//! - [`InvalidConfig`] returned when an engine setting cannot be parsed.
//!
//! None of them is retryable: they describe bad input, and the engine never
//! repairs input on its own. Non-fatal data problems are reported as
//! [`DataIntegrityWarning`](crate::DataIntegrityWarning) values instead.
//!
//!  [`SplitInvalid`]: EngineError::SplitInvalid
//!  [`ExpenseInvalid`]: EngineError::ExpenseInvalid
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidConfig`]: EngineError::InvalidConfig
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid split: {0}")]
    SplitInvalid(String),
    #[error("Invalid expense: {0}")]
    ExpenseInvalid(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
