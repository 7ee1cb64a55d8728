//! Optimistic-concurrency primitives for snapshot commits.

use crate::error::{DomainError, DomainResult};

/// Version a writer expects the stored snapshot to be at when it commits.
///
/// Concurrent writers against the same product race on this check: the loser
/// gets a `Conflict` and is expected to reload and retry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip the check (idempotent backfills, migrations).
    Any,
    /// Require the stored snapshot to be at exactly this version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(expected) => expected == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "stale snapshot version (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
