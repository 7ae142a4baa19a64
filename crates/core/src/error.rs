//! Fatal error type for the PKTO runtime.
//!
//! Per the protocol's error model only two outcomes cross the `stmRead` /
//! `stmWrite` / `stmTryCommit` boundary: success, or `ABORTED`. A transaction
//! losing a priority race, missing a predecessor version, or being
//! invalidated by a committer is an expected, non-exceptional outcome and is
//! represented by `pkto_concurrency::Aborted`, not by this type.
//!
//! `Error` is reserved for conditions the protocol treats as fatal: they
//! indicate the runtime has exhausted a hard resource limit, not that a
//! transaction lost a race. Caller misuse (an out-of-range tobj id, reusing a
//! descriptor after a terminal state) is not represented here: the former
//! panics the same way an out-of-bounds index does, the latter is prevented
//! outright by `Transaction<V>` being consumed by value.

use thiserror::Error as ThisError;

/// Fatal, non-recoverable conditions.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum Error {
    /// The monotonic timestamp allocator reached `u64::MAX`.
    #[error("timestamp allocator exhausted: u64::MAX reached")]
    TimestampOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_overflow_displays() {
        assert_eq!(
            Error::TimestampOverflow.to_string(),
            "timestamp allocator exhausted: u64::MAX reached"
        );
    }
}
