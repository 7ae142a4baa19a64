//! Transaction descriptor: the global facet (shared, reachable from reader
//! lists) and the local facet (owned by the thread running the transaction).
//!
//! The original keeps `g_valid` and `g_state` as two independently-written
//! fields, guarded informally. Here both live behind one `parking_lot::Mutex`
//! so a reader can never observe `valid == true` paired with a `state` that
//! was mid-transition — the collapsing option noted in the design notes is
//! *not* taken (they remain two distinct fields, for parity with the
//! original's state machine), but they are always locked together.

use std::sync::Arc;

use parking_lot::Mutex;
use pkto_core::TxnId;

/// Terminal and non-terminal states of a transaction descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Live,
    Commit,
    Abort,
}

/// Why a transaction ended up `ABORTED`. Carried for diagnostics only —
/// nothing downstream of the API boundary may branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// A write-set tobj had no version with `cts < g_cts` (should not
    /// happen given `Runtime::new` installs a bootstrap version at `cts == 0`,
    /// but is checked defensively, matching the original's `findLTS_STL`
    /// returning null).
    MissingPredecessor,
    /// The descriptor was marked invalid by a higher-priority committer
    /// before this transaction reached `stmTryCommit`.
    Invalidated,
    /// This transaction lost a priority race against a live competitor with
    /// a smaller `g_its` during its own commit attempt.
    PriorityLoss,
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) valid: bool,
    pub(crate) state: TxState,
}

/// The part of a transaction descriptor reachable from reader lists.
/// Cloned (as `Arc`) into every version's reader list the transaction reads
/// from, so a committer can invalidate a competitor without owning its
/// local facet.
#[derive(Debug)]
pub struct Shared {
    /// `g_its`: initial timestamp, inherited across retries. Used only to
    /// break priority ties in the commit protocol.
    pub(crate) g_its: TxnId,
    /// `g_cts`: current timestamp, fresh on every `tbegin`. Used for
    /// predecessor lookup and as the total order for descriptor-lock
    /// acquisition.
    pub(crate) g_cts: TxnId,
    pub(crate) inner: Mutex<Inner>,
}

impl Shared {
    pub(crate) fn new(g_its: TxnId, g_cts: TxnId) -> Arc<Self> {
        Arc::new(Shared {
            g_its,
            g_cts,
            inner: Mutex::new(Inner {
                valid: true,
                state: TxState::Live,
            }),
        })
    }

    pub fn g_its(&self) -> TxnId {
        self.g_its
    }

    pub fn g_cts(&self) -> TxnId {
        self.g_cts
    }

    /// `isAborted`: true once either the descriptor was invalidated by
    /// another transaction or it reached the terminal `Abort` state itself.
    pub(crate) fn is_aborted(&self) -> bool {
        let inner = self.inner.lock();
        !inner.valid || inner.state == TxState::Abort
    }

    pub fn state(&self) -> TxState {
        self.inner.lock().state
    }

    /// Marks another transaction's descriptor invalid (cascade-abort). The
    /// victim discovers this on its next operation and self-aborts; it is
    /// never forced to stop running by the committer.
    pub(crate) fn invalidate(&self) {
        self.inner.lock().valid = false;
    }
}
