//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, caller mistakes). Collaborator failures (catalog fetch, lead
/// storage) are surfaced by the crates that call those collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A category outside the supported set was requested.
    ///
    /// This is a caller bug, never "no matches".
    #[error("invalid category: {0}")]
    InvalidCategory(String),

    /// A catalog record could not be accepted into the catalog.
    #[error("malformed product {id}: {reason}")]
    MalformedProduct { id: String, reason: String },

    /// A quote submission carried no items.
    #[error("select at least one item before requesting a quote")]
    EmptySubmission,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_category(msg: impl Into<String>) -> Self {
        Self::InvalidCategory(msg.into())
    }

    pub fn malformed_product(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedProduct {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the end user can fix this by changing their input.
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::EmptySubmission)
    }
}
