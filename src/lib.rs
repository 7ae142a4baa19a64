//! Priority-based K-version software transactional memory.
//!
//! # Quick start
//!
//! ```
//! use pkto::Runtime;
//!
//! let rt: Runtime<i64> = Runtime::new(4);
//! let mut txn = rt.tbegin(None).unwrap();
//! rt.write(&mut txn, 0.into(), 42);
//! rt.try_commit(txn).unwrap();
//!
//! let mut reader = rt.tbegin(None).unwrap();
//! assert_eq!(rt.read(&mut reader, 0.into()).unwrap(), 42);
//! rt.try_commit(reader).unwrap();
//! ```
//!
//! This crate re-exports the engine from `pkto-concurrency` and the shared
//! types from `pkto-core`. Most callers only need this crate.

pub use pkto_concurrency::{
    AbortReason, Aborted, Runtime, Transaction, TxState,
};
pub use pkto_core::{Error, Result, TobjId, TxnId};
