//! `stmTryCommit`: the nine-step commit protocol.
//!
//! 1. Self-validity recheck.
//! 2. Phase-1: lock every write-set tobj in ascending id order, find each
//!    one's predecessor version, accumulate its reader list into `allRL`.
//! 3. Derive `largeRL`: every reader with `g_cts` greater than the
//!    committer's, plus the committer itself.
//! 4. Phase-2: lock every descriptor in `largeRL`, in ascending `g_cts`
//!    order.
//! 5. Re-validate self under lock (a concurrent committer may have
//!    invalidated this transaction between steps 1 and 4).
//! 6. Resolve conflicts: for every live competitor, the smaller `g_its`
//!    wins; a losing live competitor is queued for cascade-abort, a losing
//!    committer self-aborts immediately.
//! 7. Cascade-abort every queued competitor still live.
//! 8. Install a new version for every write-set entry.
//! 9. Mark self committed, release descriptor locks then tobj locks.
//!
//! Lock ordering (tobj id ascending, then descriptor `g_cts` ascending) is
//! fixed and total across the whole runtime, which is what makes this
//! deadlock-free under arbitrary concurrent commits.

use std::sync::Arc;

use parking_lot::MutexGuard;
use tracing::{debug, warn};

use crate::descriptor::{AbortReason, Inner, Shared, TxState};
use crate::error::Aborted;
use crate::runtime::{Runtime, Transaction};
use crate::version_list::VersionList;

pub(crate) fn run<V: Clone>(
    rt: &Runtime<V>,
    txn: Transaction<V>,
) -> std::result::Result<(), Aborted> {
    let shared = txn.shared.clone();
    let g_its = txn.g_its();
    let g_cts = txn.g_cts();
    let write_set = txn.write_set;

    // Step 1: self-validity recheck, released before any tobj lock is taken
    // (the original's `T.lock` pattern — held briefly, never across Phase-1).
    {
        let inner = shared.inner.lock();
        if !inner.valid || inner.state != TxState::Live {
            drop(inner);
            return Err(Aborted::new(AbortReason::Invalidated));
        }
    }

    // Step 2: Phase-1 tobj locks, in write-set order (already ascending by
    // id); step 3 (`getLar`) is folded in here, per predecessor, rather than
    // merged-then-filtered, since a version's reader list is already sorted
    // and `readers_after` is exactly `getLar`.
    let mut tobj_guards: Vec<MutexGuard<'_, VersionList<V>>> =
        Vec::with_capacity(write_set.len());
    let mut large_rl: Vec<Arc<Shared>> = Vec::new();
    for (id, _) in &write_set {
        let guard = rt.tobj(*id).versions.lock();
        match guard.find_predecessor(g_cts) {
            Some(predecessor) => {
                let readers = predecessor.readers.lock();
                for r in readers.readers_after(g_cts) {
                    if !large_rl.iter().any(|x| Arc::ptr_eq(x, &r)) {
                        large_rl.push(r);
                    }
                }
            }
            None => {
                return Err(Aborted::new(AbortReason::MissingPredecessor));
            }
        }
        tobj_guards.push(guard);
    }

    // Step 3 (cont'd): largeRL always includes the committer itself.
    large_rl.push(shared.clone());
    large_rl.sort_by_key(|r| r.g_cts());
    large_rl.dedup_by(|a, b| Arc::ptr_eq(a, b));

    // Step 4: Phase-2 descriptor locks, ascending g_cts order.
    let mut desc_guards: Vec<MutexGuard<'_, Inner>> =
        large_rl.iter().map(|d| d.inner.lock()).collect();

    let self_idx = large_rl
        .iter()
        .position(|d| Arc::ptr_eq(d, &shared))
        .expect("committer always inserted into large_rl");

    // Step 5: re-validate self under lock.
    if !desc_guards[self_idx].valid || desc_guards[self_idx].state != TxState::Live {
        desc_guards[self_idx].state = TxState::Abort;
        return Err(Aborted::new(AbortReason::Invalidated));
    }

    // Step 6: conflict resolution.
    let mut abort_idxs: Vec<usize> = Vec::new();
    for i in 0..large_rl.len() {
        if i == self_idx {
            continue;
        }
        // Skip R if it is aborted or invalidated — the same `isAborted`
        // check `Shared::is_aborted` makes, applied here to the guard
        // already held instead of re-locking through it.
        if !desc_guards[i].valid || desc_guards[i].state != TxState::Live {
            continue;
        }
        if g_its < large_rl[i].g_its() {
            abort_idxs.push(i);
        } else {
            // A live, higher-priority competitor beat us to this write set.
            desc_guards[self_idx].state = TxState::Abort;
            warn!(
                g_its = g_its.get(),
                competitor_its = large_rl[i].g_its().get(),
                "stmTryCommit: lost priority race"
            );
            return Err(Aborted::new(AbortReason::PriorityLoss));
        }
    }

    // Step 7: cascade-abort every queued competitor still live.
    for idx in abort_idxs {
        desc_guards[idx].valid = false;
        debug!(
            g_its = large_rl[idx].g_its().get(),
            g_cts = large_rl[idx].g_cts().get(),
            "stmTryCommit: cascade-aborted lower-priority competitor"
        );
    }

    // Step 8: install a new version for every write-set entry.
    for (guard, (_, value)) in tobj_guards.iter_mut().zip(write_set.into_iter()) {
        let evicted = guard.insert(g_cts, value);
        rt.record_version_installed(evicted);
    }

    // Step 9: mark committed; descriptor locks drop first, then tobj locks.
    desc_guards[self_idx].state = TxState::Commit;
    debug!(g_its = g_its.get(), g_cts = g_cts.get(), "stmTryCommit: committed");
    drop(desc_guards);
    drop(tobj_guards);
    Ok(())
}
