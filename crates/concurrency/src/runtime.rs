//! The shared runtime (`new`, `tbegin`) and the transaction handle
//! (`stmRead`, `stmWrite`, `stmTryCommit`, `stmAbort`).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pkto_core::{Result, TimestampAllocator, TobjId, TxnId};
use tracing::{debug, trace};

use crate::commit;
use crate::descriptor::{AbortReason, Shared, TxState};
use crate::error::Aborted;
use crate::tobj::Tobj;
use crate::version_list::DEFAULT_K;

/// The shared store of tobjs plus the monotonic timestamp source. Cheap to
/// share across threads behind an `Arc` — every method takes `&self`.
#[derive(Debug)]
pub struct Runtime<V> {
    tobjs: Vec<Tobj<V>>,
    allocator: TimestampAllocator,
    /// `totalVersions`: observational only, consulted by nothing in the
    /// protocol.
    version_count: AtomicU64,
    /// `totalReadListNodes`: observational only, consulted by nothing in the
    /// protocol.
    reader_list_node_count: AtomicU64,
}

impl<V: Clone + Default> Runtime<V> {
    /// `new(N)`: allocates `N` tobjs, each bootstrapped with a version at
    /// `cts == 0` holding `V::default()`, and a bounded history of the
    /// default size `K`.
    pub fn new(n: usize) -> Self {
        Self::with_k(n, DEFAULT_K)
    }

    /// As `new`, but with an explicit bound on versions retained per tobj.
    pub fn with_k(n: usize, k: usize) -> Self {
        let tobjs = (0..n)
            .map(|i| Tobj::new(TobjId(i), k, V::default()))
            .collect();
        Runtime {
            tobjs,
            allocator: TimestampAllocator::new(),
            version_count: AtomicU64::new(n as u64),
            reader_list_node_count: AtomicU64::new(0),
        }
    }
}

impl<V: Clone> Runtime<V> {
    pub fn len(&self) -> usize {
        self.tobjs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tobjs.is_empty()
    }

    pub fn version_count(&self) -> u64 {
        self.version_count.load(Ordering::Relaxed)
    }

    pub fn reader_list_node_count(&self) -> u64 {
        self.reader_list_node_count.load(Ordering::Relaxed)
    }

    pub(crate) fn record_version_installed(&self, evicted: bool) {
        self.version_count.fetch_add(1, Ordering::Relaxed);
        if evicted {
            self.version_count.fetch_sub(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_reader_inserted(&self) {
        self.reader_list_node_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Out-of-range tobj ids are caller misuse, the same way indexing a raw
    /// array out of bounds is in the original: not part of the OK/ABORTED
    /// surface at all, so this panics rather than returning a third kind of
    /// outcome through `read`/`write`.
    fn assert_id(&self, id: TobjId) {
        assert!(
            id.index() < self.tobjs.len(),
            "tobj id {} out of range for runtime of size {}",
            id.index(),
            self.tobjs.len()
        );
    }

    pub(crate) fn tobj(&self, id: TobjId) -> &Tobj<V> {
        &self.tobjs[id.index()]
    }

    /// `tbegin(its)`: allocates a fresh `g_cts`; `g_its` is either inherited
    /// from a prior attempt (`retry_seed`, the original's `its != NIL`
    /// branch) or set equal to the fresh `g_cts` for a brand-new transaction.
    pub fn tbegin(&self, retry_seed: Option<TxnId>) -> Result<Transaction<V>> {
        let g_cts = self.allocator.allocate()?;
        let g_its = retry_seed.unwrap_or(g_cts);
        trace!(g_its = g_its.get(), g_cts = g_cts.get(), "tbegin");
        Ok(Transaction {
            shared: Shared::new(g_its, g_cts),
            read_set: Vec::new(),
            write_set: Vec::new(),
        })
    }

    /// `stmRead`: read-your-own-writes, then read-your-own-reads, then a
    /// fresh read that installs `txn` into the predecessor version's reader
    /// list.
    pub fn read(&self, txn: &mut Transaction<V>, id: TobjId) -> std::result::Result<V, Aborted> {
        self.assert_id(id);
        if let Some((_, v)) = txn.write_set.iter().find(|(wid, _)| *wid == id) {
            return Ok(v.clone());
        }
        if let Some(entry) = txn.read_set.iter().find(|e| e.id == id) {
            return Ok(entry.value.clone());
        }
        if txn.shared.is_aborted() {
            return Err(Aborted::new(AbortReason::Invalidated));
        }
        let tobj = self.tobj(id);
        let versions = tobj.versions.lock();
        let Some(predecessor) = versions.find_predecessor(txn.shared.g_cts()) else {
            return Err(Aborted::new(AbortReason::MissingPredecessor));
        };
        let value = predecessor.value();
        let cts = predecessor.cts();
        let inserted = predecessor.readers.lock().insert(txn.shared.clone());
        drop(versions);
        if inserted {
            self.record_reader_inserted();
        }
        txn.read_set.push(ReadEntry { id, cts, value: value.clone() });
        Ok(value)
    }

    /// `stmWrite`: local-only buffering, sorted and deduplicated by tobj id
    /// so the commit protocol can walk write-set and tobj registry in
    /// lock-step.
    pub fn write(&self, txn: &mut Transaction<V>, id: TobjId, value: V) {
        self.assert_id(id);
        match txn.write_set.binary_search_by_key(&id, |(wid, _)| *wid) {
            Ok(pos) => txn.write_set[pos].1 = value,
            Err(pos) => txn.write_set.insert(pos, (id, value)),
        }
    }

    /// `stmTryCommit`: see `commit::run` for the nine-step protocol.
    pub fn try_commit(&self, txn: Transaction<V>) -> std::result::Result<(), Aborted> {
        commit::run(self, txn)
    }

    /// `stmAbort`: unconditional self-abort, always succeeds.
    pub fn abort(&self, txn: Transaction<V>) {
        let mut inner = txn.shared.inner.lock();
        inner.valid = false;
        inner.state = TxState::Abort;
        drop(inner);
        debug!(g_its = txn.shared.g_its().get(), "stmAbort");
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ReadEntry<V> {
    pub(crate) id: TobjId,
    pub(crate) cts: TxnId,
    pub(crate) value: V,
}

/// The local facet of a transaction descriptor: read-set, write-set, and a
/// handle to the shared facet other transactions can see through reader
/// lists.
#[derive(Debug)]
pub struct Transaction<V> {
    pub(crate) shared: Arc<Shared>,
    pub(crate) read_set: Vec<ReadEntry<V>>,
    pub(crate) write_set: Vec<(TobjId, V)>,
}

/// What a retried `tbegin` needs to preserve priority across attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySeed(pub(crate) TxnId);

impl<V> Transaction<V> {
    pub fn g_its(&self) -> TxnId {
        self.shared.g_its()
    }

    pub fn g_cts(&self) -> TxnId {
        self.shared.g_cts()
    }

    pub fn state(&self) -> TxState {
        self.shared.state()
    }

    /// Returns the seed a caller should pass to the next `tbegin` after this
    /// transaction aborted, preserving its priority.
    pub fn into_retry_seed(self) -> RetrySeed {
        RetrySeed(self.shared.g_its())
    }
}

impl RetrySeed {
    pub fn into_inner(self) -> TxnId {
        self.0
    }
}
