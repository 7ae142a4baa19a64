//! A single committed version of a tobj, and the reader list attached to it.

use std::sync::Arc;

use parking_lot::Mutex;
use pkto_core::TxnId;

use crate::descriptor::Shared;

/// Ascending, deduplicated list of transactions that have read a given
/// version. Entries are weak in the sense that they carry no exclusive
/// ownership claim over the reader — any number of versions may reference
/// the same descriptor, and the descriptor's lifetime is independent of any
/// one reader list.
#[derive(Debug, Default)]
pub struct ReaderList {
    readers: Vec<Arc<Shared>>,
}

impl ReaderList {
    fn new() -> Self {
        ReaderList {
            readers: Vec::new(),
        }
    }

    /// `insertAndSortRL`: sorted insert by `g_cts`, deduplicated by
    /// descriptor identity, and rejects descriptors already aborted — a
    /// transaction that has already lost a race gains nothing by being
    /// recorded as a reader, and the original explicitly guards against it.
    pub(crate) fn insert(&mut self, txn: Arc<Shared>) -> bool {
        if txn.is_aborted() {
            return false;
        }
        if self.readers.iter().any(|r| Arc::ptr_eq(r, &txn)) {
            return false;
        }
        let pos = self
            .readers
            .partition_point(|r| r.g_cts() < txn.g_cts());
        self.readers.insert(pos, txn);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Shared>> {
        self.readers.iter()
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    /// `getLar`: readers with `g_cts` strictly greater than `cts`.
    pub(crate) fn readers_after(&self, cts: TxnId) -> impl Iterator<Item = Arc<Shared>> + '_ {
        self.readers
            .iter()
            .filter(move |r| r.g_cts() > cts)
            .cloned()
    }
}

/// A committed version of one tobj: the timestamp it was installed at, its
/// payload, and the set of transactions that have read it.
#[derive(Debug)]
pub struct Version<V> {
    pub(crate) cts: TxnId,
    pub(crate) value: V,
    pub(crate) readers: Mutex<ReaderList>,
}

impl<V: Clone> Version<V> {
    pub(crate) fn new(cts: TxnId, value: V) -> Self {
        Version {
            cts,
            value,
            readers: Mutex::new(ReaderList::new()),
        }
    }

    pub fn cts(&self) -> TxnId {
        self.cts
    }

    pub fn value(&self) -> V {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkto_core::TimestampAllocator;

    fn desc(alloc: &TimestampAllocator) -> Arc<Shared> {
        let its = alloc.allocate().unwrap();
        Shared::new(its, its)
    }

    #[test]
    fn reader_list_is_sorted_and_deduped() {
        let alloc = TimestampAllocator::new();
        let mut rl = ReaderList::new();
        let a = desc(&alloc);
        let b = desc(&alloc);
        assert!(rl.insert(a.clone()));
        assert!(rl.insert(b.clone()));
        assert!(!rl.insert(a.clone()));
        let ctss: Vec<_> = rl.iter().map(|r| r.g_cts().get()).collect();
        let mut sorted = ctss.clone();
        sorted.sort_unstable();
        assert_eq!(ctss, sorted);
        assert_eq!(rl.len(), 2);
    }

    #[test]
    fn aborted_descriptor_is_rejected() {
        let alloc = TimestampAllocator::new();
        let mut rl = ReaderList::new();
        let a = desc(&alloc);
        a.invalidate();
        assert!(!rl.insert(a));
        assert!(rl.is_empty());
    }

    #[test]
    fn readers_after_filters_by_cts() {
        let alloc = TimestampAllocator::new();
        let mut rl = ReaderList::new();
        let a = desc(&alloc);
        let b = desc(&alloc);
        rl.insert(a.clone());
        rl.insert(b.clone());
        let after: Vec<_> = rl.readers_after(a.g_cts()).collect();
        assert_eq!(after.len(), 1);
        assert!(Arc::ptr_eq(&after[0], &b));
    }
}
