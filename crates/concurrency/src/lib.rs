//! Priority-based K-version software transactional memory engine.
//!
//! A [`Runtime`] owns a fixed number of transactional objects (tobjs), each
//! holding a bounded history of committed versions. A [`Transaction`]
//! buffers reads and writes against a snapshot implied by its timestamp and
//! is resolved by [`Runtime::try_commit`], which validates against readers
//! of the versions it is about to supersede and resolves any conflict by
//! comparing transaction priority (`g_its`, inherited across retries).
//!
//! ```
//! use pkto_concurrency::Runtime;
//!
//! let rt: Runtime<i64> = Runtime::new(2);
//! let mut t1 = rt.tbegin(None).unwrap();
//! rt.write(&mut t1, 0.into(), 7);
//! rt.try_commit(t1).unwrap();
//!
//! let mut t2 = rt.tbegin(None).unwrap();
//! assert_eq!(rt.read(&mut t2, 0.into()).unwrap(), 7);
//! rt.try_commit(t2).unwrap();
//! ```

mod commit;
mod descriptor;
mod error;
mod runtime;
mod tobj;
mod version;
mod version_list;

pub use descriptor::{AbortReason, TxState};
pub use error::Aborted;
pub use runtime::{RetrySeed, Runtime, Transaction};
pub use version_list::DEFAULT_K;

#[cfg(test)]
mod static_checks {
    use static_assertions::assert_impl_all;

    use crate::{Runtime, Transaction};

    assert_impl_all!(Runtime<i64>: Send, Sync);
    assert_impl_all!(Transaction<i64>: Send);
}
