//! The id attribute accessor and the default id cache.
//!
//! This should remain the only module in the codebase that cares (or directly
//! knows) which attribute the id registry is keyed on.

use std::collections::HashMap;
use std::sync::Mutex;

use grove_traits::IdCacheProvider;
use markup5ever::{QualName, local_name, ns};

use crate::BaseDocument;

pub(crate) fn id_qual_name() -> QualName {
    QualName::new(None, ns!(), local_name!("id"))
}

/// Only the null-namespace `id` attribute is registry-backed. A namespaced
/// `id` (e.g. `xml:id`) is stored as an ordinary attribute.
pub(crate) fn is_id_attr(name: &QualName) -> bool {
    *name == id_qual_name()
}

impl BaseDocument {
    /// Returns the id attribute of the given node.
    ///
    /// Reading the id of something that is not an element (the document root, a text
    /// node, a stale node id) yields `""` rather than an error.
    pub fn element_id(&self, node_id: usize) -> &str {
        self.nodes
            .get(node_id)
            .and_then(|node| node.element_data())
            .and_then(|element| element.id.as_deref())
            .unwrap_or("")
    }

    /// Writes the id attribute of the given node and keeps the id cache in sync.
    ///
    /// The old entry is purged before the attribute is written so that a stale entry
    /// is never visible under the old key, and the new id is primed only once the
    /// write has happened.
    pub fn set_element_id(&mut self, node_id: usize, id: &str) {
        let Some(element) = self
            .nodes
            .get_mut(node_id)
            .and_then(|node| node.element_data_mut())
        else {
            #[cfg(feature = "tracing")]
            tracing::warn!("set_element_id on non-element node {node_id}");
            return;
        };

        if let Some(old_id) = element.id.take() {
            self.id_cache.purge_id(&old_id);
        }

        element.attrs.set(id_qual_name(), id);
        element.flush_id();
        self.id_cache.prime_id(id, node_id);
    }
}

/// The default id cache: a process-local map behind a mutex.
#[derive(Default)]
pub struct InMemoryIdCache {
    /// Map of node ids for fast lookups
    nodes_to_id: Mutex<HashMap<String, usize>>,
}

impl IdCacheProvider for InMemoryIdCache {
    fn purge_id(&self, id: &str) {
        self.nodes_to_id.lock().unwrap().remove(id);
    }

    fn prime_id(&self, id: &str, node_id: usize) {
        self.nodes_to_id.lock().unwrap().insert(id.to_string(), node_id);
    }

    fn node_from_id(&self, id: &str) -> Option<usize> {
        self.nodes_to_id.lock().unwrap().get(id).copied()
    }
}
