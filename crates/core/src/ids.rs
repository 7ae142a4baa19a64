//! Newtype ids shared between the runtime and its callers.

use std::fmt;

/// Index of a transactional object. Always in `[0, N)` for a runtime of size
/// `N`; constructed only by `Runtime::new` and validated at the API
/// boundary, never trusted blindly inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TobjId(pub usize);

impl TobjId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TobjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tobj#{}", self.0)
    }
}

impl From<usize> for TobjId {
    fn from(v: usize) -> Self {
        TobjId(v)
    }
}

/// A logical timestamp, monotonically allocated. Used both as `g_its`
/// (initial timestamp, inherited across retries) and `g_cts` (current
/// timestamp, fresh on every begin) — the two fields share this type
/// because the protocol copies one into the other on a fresh `tbegin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxnId(pub u64);

impl TxnId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
