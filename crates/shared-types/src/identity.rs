//! # Identity Context
//!
//! Who is calling, and when, for the current invocation.
//!
//! The execution environment has already authenticated the caller before the
//! core runs. The core only reads the resulting (organization, identity) pair
//! and the ledger-assigned logical timestamp of the transaction. Wall-clock
//! time is never consulted, so every replica stamps events identically.

/// Ambient caller identity for one invocation.
pub trait IdentityContext {
    /// Organization the caller belongs to.
    fn caller_org(&self) -> &str;

    /// Unique identity string of the caller within its organization.
    fn caller_identity(&self) -> &str;

    /// Logical timestamp assigned to the enclosing ledger transaction.
    fn logical_timestamp(&self) -> &str;
}

/// Plain-data [`IdentityContext`] built by the execution environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    org: String,
    identity: String,
    timestamp: String,
}

impl Invocation {
    pub fn new(
        org: impl Into<String>,
        identity: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            identity: identity.into(),
            timestamp: timestamp.into(),
        }
    }
}

impl IdentityContext for Invocation {
    fn caller_org(&self) -> &str {
        &self.org
    }

    fn caller_identity(&self) -> &str {
        &self.identity
    }

    fn logical_timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl<T: IdentityContext + ?Sized> IdentityContext for &T {
    fn caller_org(&self) -> &str {
        (**self).caller_org()
    }

    fn caller_identity(&self) -> &str {
        (**self).caller_identity()
    }

    fn logical_timestamp(&self) -> &str {
        (**self).logical_timestamp()
    }
}
