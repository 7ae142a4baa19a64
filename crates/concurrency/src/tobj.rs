//! A single transactional object: an id and its version history, each
//! guarded by its own lock so unrelated tobjs never contend with each other.

use parking_lot::Mutex;
use pkto_core::TobjId;

use crate::version_list::VersionList;

#[derive(Debug)]
pub struct Tobj<V> {
    pub(crate) id: TobjId,
    pub(crate) versions: Mutex<VersionList<V>>,
}

impl<V: Clone> Tobj<V> {
    pub(crate) fn new(id: TobjId, k: usize, bootstrap: V) -> Self {
        Tobj {
            id,
            versions: Mutex::new(VersionList::new(k, bootstrap)),
        }
    }

    pub fn id(&self) -> TobjId {
        self.id
    }
}
