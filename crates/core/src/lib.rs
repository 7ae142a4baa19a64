//! Shared ids, errors and timestamp allocation for the PKTO runtime.
//!
//! This crate has no concurrency logic of its own; it exists so that
//! `pkto-concurrency` and any future driver crate share one definition of
//! "what a tobj id is", "what a timestamp is", and "what a fatal error
//! looks like".

mod error;
mod ids;
mod timestamp;

pub use error::{Error, Result};
pub use ids::{TobjId, TxnId};
pub use timestamp::TimestampAllocator;

#[cfg(test)]
mod static_checks {
    use static_assertions::assert_impl_all;

    use crate::{Error, TimestampAllocator, TobjId, TxnId};

    assert_impl_all!(TimestampAllocator: Send, Sync);
    assert_impl_all!(Error: Send, Sync, Clone);
    assert_impl_all!(TobjId: Send, Sync, Copy);
    assert_impl_all!(TxnId: Send, Sync, Copy);
}
