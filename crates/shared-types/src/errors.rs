//! # Error Types
//!
//! The custody error taxonomy and the ledger accessor error.
//!
//! Every failure is reported synchronously by the operation that detected
//! it. None is retried internally and none leaves ledger state modified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors raised by a ledger accessor implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The store has no indexed-query capability.
    #[error("Indexed query not supported by this ledger")]
    QueryUnsupported,

    /// The predicate string could not be interpreted by the query engine.
    #[error("Invalid query predicate: {0}")]
    InvalidPredicate(String),

    /// The backing store failed.
    #[error("Ledger backend error: {0}")]
    Backend(String),
}

// =============================================================================
// CUSTODY ERRORS
// =============================================================================

/// Errors returned by the custody engine, the repository and the query
/// projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// Referenced key is absent.
    #[error("Not found: {key}")]
    NotFound { key: String },

    /// Id collision on create.
    #[error("Already exists: {key}")]
    AlreadyExists { key: String },

    /// Caller organization is not permitted to perform this transition.
    #[error("Unauthorized: org {org} cannot {operation}: {reason}")]
    Unauthorized {
        org: String,
        operation: &'static str,
        reason: String,
    },

    /// Entity is not in a state that accepts this operation.
    #[error("Invalid state: {key} is {status}, cannot {operation}")]
    InvalidState {
        key: String,
        status: String,
        operation: &'static str,
    },

    /// Current owner of a unit is not the expected party.
    #[error("Ownership mismatch on {unit_id}: expected {expected_org}, found {actual_org}")]
    OwnershipMismatch {
        unit_id: String,
        expected_org: String,
        actual_org: String,
    },

    /// Accepting identity is not the designated one.
    #[error("Recipient mismatch on {delivery_id}: expected {expected}, got {actual}")]
    RecipientMismatch {
        delivery_id: String,
        expected: String,
        actual: String,
    },

    /// Scanned ids differ from the delivery's member set.
    #[error(
        "Content mismatch on {delivery_id}: missing {missing:?}, unexpected {unexpected:?}"
    )]
    ContentMismatch {
        delivery_id: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A stored value failed to decode.
    #[error("Malformed record {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    /// Predicate query attempted against a non-indexed store.
    #[error("Indexed query not supported")]
    QueryUnsupported,

    /// Request arguments failed validation before any ledger access.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The ledger accessor itself failed.
    #[error("Ledger error: {0}")]
    Ledger(String),
}

impl CustodyError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> CustodyErrorCode {
        match self {
            Self::NotFound { .. } => CustodyErrorCode::NotFound,
            Self::AlreadyExists { .. } => CustodyErrorCode::AlreadyExists,
            Self::Unauthorized { .. } => CustodyErrorCode::Unauthorized,
            Self::InvalidState { .. } => CustodyErrorCode::InvalidState,
            Self::OwnershipMismatch { .. } => CustodyErrorCode::OwnershipMismatch,
            Self::RecipientMismatch { .. } => CustodyErrorCode::RecipientMismatch,
            Self::ContentMismatch { .. } => CustodyErrorCode::ContentMismatch,
            Self::MalformedRecord { .. } => CustodyErrorCode::MalformedRecord,
            Self::QueryUnsupported => CustodyErrorCode::QueryUnsupported,
            Self::InvalidArgument(_) => CustodyErrorCode::InvalidArgument,
            Self::Ledger(_) => CustodyErrorCode::LedgerFailure,
        }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<LedgerError> for CustodyError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::QueryUnsupported => Self::QueryUnsupported,
            LedgerError::InvalidPredicate(reason) => Self::InvalidArgument(reason),
            LedgerError::Backend(message) => Self::Ledger(message),
        }
    }
}

// =============================================================================
// GATEWAY PAYLOAD
// =============================================================================

/// Error code enumeration for the gateway boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustodyErrorCode {
    NotFound,
    AlreadyExists,
    Unauthorized,
    InvalidState,
    OwnershipMismatch,
    RecipientMismatch,
    ContentMismatch,
    MalformedRecord,
    QueryUnsupported,
    InvalidArgument,
    LedgerFailure,
}

/// Serializable error returned across the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyErrorPayload {
    pub code: CustodyErrorCode,
    pub message: String,
}

impl From<&CustodyError> for CustodyErrorPayload {
    fn from(err: &CustodyError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<CustodyError> for CustodyErrorPayload {
    fn from(err: CustodyError) -> Self {
        Self::from(&err)
    }
}
