//! The non-fatal, expected outcome of a protocol operation.

use thiserror::Error as ThisError;

use crate::descriptor::AbortReason;

/// A transaction lost a race and did not make progress. This is the normal,
/// expected `ABORTED` outcome described by the protocol — callers are
/// expected to retry, not to treat this as exceptional.
#[derive(Debug, ThisError, Clone, Copy, PartialEq, Eq)]
#[error("transaction aborted: {reason:?}")]
pub struct Aborted {
    pub reason: AbortReason,
}

impl Aborted {
    pub(crate) fn new(reason: AbortReason) -> Self {
        Aborted { reason }
    }

    pub fn reason(&self) -> AbortReason {
        self.reason
    }
}
