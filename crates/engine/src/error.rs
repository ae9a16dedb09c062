//! The module contains the error the engine can throw.
//!
//! Operations on unknown ids are absorbed as no-ops. Errors come from
//! building the engine, from running out of ids and from parsing user or
//! seed input:
//!
//! - [`ExistingKey`] thrown when a seed contains the same id twice.
//! - [`IdsExhausted`] thrown when no transaction id is left to hand out.
//! - [`InvalidAmount`] thrown when an amount cannot be parsed.
//! - [`InvalidKind`] thrown when a transaction type is not recognised.
//!
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`IdsExhausted`]: EngineError::IdsExhausted
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidKind`]: EngineError::InvalidKind
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("No transaction id left")]
    IdsExhausted,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),
}
