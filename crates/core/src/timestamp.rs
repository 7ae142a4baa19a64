//! Monotonic timestamp allocation.
//!
//! Mirrors the original `g_tCntr` atomic counter: a single process-wide
//! `fetch_add`, shared by every `tbegin` call regardless of which tobj the
//! resulting transaction will touch. Overflow is treated as fatal via a
//! `checked_add` + typed `Result`, since this is library code a driver
//! should be able to catch rather than a panic that ends the process.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Error, Result, TxnId};

/// Process-wide monotonic counter handing out `TxnId`s.
#[derive(Debug)]
pub struct TimestampAllocator {
    next: AtomicU64,
}

impl TimestampAllocator {
    /// Counter starts at 1, matching the original's `g_tCntr(1)` so that `0`
    /// remains reserved for the bootstrap version installed by `Runtime::new`.
    pub fn new() -> Self {
        TimestampAllocator {
            next: AtomicU64::new(1),
        }
    }

    pub fn allocate(&self) -> Result<TxnId> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1))
            .map(TxnId)
            .map_err(|_| Error::TimestampOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_strictly_increasing_ids() {
        let alloc = TimestampAllocator::new();
        let a = alloc.allocate().unwrap();
        let b = alloc.allocate().unwrap();
        assert!(b.get() > a.get());
    }

    #[test]
    fn overflow_is_fatal() {
        let alloc = TimestampAllocator {
            next: AtomicU64::new(u64::MAX),
        };
        assert_eq!(alloc.allocate().unwrap_err(), Error::TimestampOverflow);
    }
}
