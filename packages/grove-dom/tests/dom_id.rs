use std::sync::{Arc, Mutex};

use grove_dom::{
    Attribute, BaseDocument, DocumentConfig, IdCacheProvider, LocalName, QualName, local_name, ns,
};

fn element_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

fn attr_name(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

fn attr(local: &str, value: &str) -> Attribute {
    Attribute {
        name: attr_name(local),
        value: value.to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum CacheOp {
    Purge(String),
    Prime(String, usize),
}

#[derive(Default)]
struct RecordingIdCache {
    ops: Mutex<Vec<CacheOp>>,
}

impl RecordingIdCache {
    fn ops(&self) -> Vec<CacheOp> {
        std::mem::take(&mut *self.ops.lock().unwrap())
    }
}

impl IdCacheProvider for RecordingIdCache {
    fn purge_id(&self, id: &str) {
        self.ops.lock().unwrap().push(CacheOp::Purge(id.to_string()));
    }

    fn prime_id(&self, id: &str, node_id: usize) {
        self.ops
            .lock()
            .unwrap()
            .push(CacheOp::Prime(id.to_string(), node_id));
    }

    fn node_from_id(&self, _id: &str) -> Option<usize> {
        None
    }
}

#[test]
fn unset_id_reads_as_empty_string() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let div = doc.mutate().create_element(element_name("div"), vec![]);
    assert_eq!(doc.element_id(div), "");
}

#[test]
fn non_element_nodes_read_as_empty_string() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let text = doc.create_text_node("hello");
    let comment = doc.mutate().create_comment_node();

    assert_eq!(doc.element_id(text), "");
    assert_eq!(doc.element_id(comment), "");
    // The document root is not an element either
    assert_eq!(doc.element_id(0), "");
    // A node id that was never allocated degrades the same way
    assert_eq!(doc.element_id(usize::MAX), "");
}

#[test]
fn id_round_trips() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    doc.set_element_id(div, "sidebar");
    assert_eq!(doc.element_id(div), "sidebar");

    // The attribute itself is visible through the generic reader
    let node = doc.get_node(div).unwrap();
    assert_eq!(node.attr(local_name!("id")), Some("sidebar"));
}

#[test]
fn set_updates_lookup() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    assert_eq!(doc.get_element_by_id("sidebar"), None);
    doc.set_element_id(div, "sidebar");
    assert_eq!(doc.get_element_by_id("sidebar"), Some(div));

    doc.set_element_id(div, "main");
    assert_eq!(doc.get_element_by_id("sidebar"), None);
    assert_eq!(doc.get_element_by_id("main"), Some(div));
}

#[test]
fn reassigning_purges_the_old_id_before_priming_the_new_one() {
    let cache = Arc::new(RecordingIdCache::default());
    let mut doc = BaseDocument::new(DocumentConfig {
        id_cache: Some(cache.clone()),
    });
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    doc.set_element_id(div, "old");
    assert_eq!(cache.ops(), vec![CacheOp::Prime("old".to_string(), div)]);

    doc.set_element_id(div, "new");
    let ops = cache.ops();
    assert_eq!(
        ops,
        vec![
            CacheOp::Purge("old".to_string()),
            CacheOp::Prime("new".to_string(), div),
        ]
    );

    // The ordering is the point: the stale entry must be gone before the new
    // id is registered.
    let purge_idx = ops
        .iter()
        .position(|op| matches!(op, CacheOp::Purge(_)))
        .unwrap();
    let prime_idx = ops
        .iter()
        .position(|op| matches!(op, CacheOp::Prime(..)))
        .unwrap();
    assert!(purge_idx < prime_idx);
}

#[test]
fn setting_the_same_id_purges_then_reprimes() {
    let cache = Arc::new(RecordingIdCache::default());
    let mut doc = BaseDocument::new(DocumentConfig {
        id_cache: Some(cache.clone()),
    });
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    doc.set_element_id(div, "sidebar");
    cache.ops();

    doc.set_element_id(div, "sidebar");
    assert_eq!(
        cache.ops(),
        vec![
            CacheOp::Purge("sidebar".to_string()),
            CacheOp::Prime("sidebar".to_string(), div),
        ]
    );
}

#[test]
fn setting_on_a_non_element_is_a_noop() {
    let cache = Arc::new(RecordingIdCache::default());
    let mut doc = BaseDocument::new(DocumentConfig {
        id_cache: Some(cache.clone()),
    });
    let text = doc.create_text_node("hello");

    doc.set_element_id(text, "sidebar");
    assert_eq!(doc.element_id(text), "");
    assert_eq!(cache.ops(), vec![]);
}

#[test]
fn create_element_primes_an_initial_id() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let nav = doc
        .mutate()
        .create_element(element_name("nav"), vec![attr("id", "menu")]);

    assert_eq!(doc.element_id(nav), "menu");
    assert_eq!(doc.get_element_by_id("menu"), Some(nav));
}

#[test]
fn duplicate_attrs_at_creation_collapse_to_the_first() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let div = doc.mutate().create_element(
        element_name("div"),
        vec![attr("id", "first"), attr("id", "second")],
    );

    let node = doc.get_node(div).unwrap();
    assert_eq!(node.attrs().unwrap().len(), 1);
    assert_eq!(doc.element_id(div), "first");
    assert_eq!(doc.get_element_by_id("first"), Some(div));
    assert_eq!(doc.get_element_by_id("second"), None);

    // Clearing the id leaves no shadowed duplicate behind
    doc.mutate().clear_attribute(div, attr_name("id"));
    assert_eq!(doc.element_id(div), "");
    assert_eq!(doc.get_element_by_id("first"), None);
    assert_eq!(doc.get_element_by_id("second"), None);
}

#[test]
fn a_namespaced_id_attribute_never_touches_the_registry() {
    let cache = Arc::new(RecordingIdCache::default());
    let mut doc = BaseDocument::new(DocumentConfig {
        id_cache: Some(cache.clone()),
    });
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    let xml_id = QualName::new(None, ns!(xml), LocalName::from("id"));
    doc.mutate().set_attribute(div, xml_id.clone(), "legacy");
    assert_eq!(doc.element_id(div), "");
    assert_eq!(cache.ops(), vec![]);

    // It coexists with the null-namespace id as an ordinary attribute
    doc.mutate().set_attribute(div, attr_name("id"), "modern");
    assert_eq!(doc.element_id(div), "modern");
    assert_eq!(cache.ops(), vec![CacheOp::Prime("modern".to_string(), div)]);
    assert_eq!(doc.get_node(div).unwrap().attrs().unwrap().len(), 2);

    // Clearing the namespaced attribute leaves the registry alone
    doc.mutate().clear_attribute(div, xml_id);
    assert_eq!(doc.element_id(div), "modern");
    assert_eq!(cache.ops(), vec![]);
}

#[test]
fn set_attribute_routes_id_writes_through_the_registry() {
    let cache = Arc::new(RecordingIdCache::default());
    let mut doc = BaseDocument::new(DocumentConfig {
        id_cache: Some(cache.clone()),
    });
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    doc.mutate().set_attribute(div, attr_name("id"), "sidebar");
    assert_eq!(doc.element_id(div), "sidebar");
    assert_eq!(cache.ops(), vec![CacheOp::Prime("sidebar".to_string(), div)]);

    // Non-id attributes never touch the registry
    doc.mutate().set_attribute(div, attr_name("class"), "wide");
    assert_eq!(cache.ops(), vec![]);
}

#[test]
fn clearing_the_id_attribute_purges_the_entry() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let div = doc
        .mutate()
        .create_element(element_name("div"), vec![attr("id", "sidebar")]);
    assert_eq!(doc.get_element_by_id("sidebar"), Some(div));

    doc.mutate().clear_attribute(div, attr_name("id"));
    assert_eq!(doc.element_id(div), "");
    assert_eq!(doc.get_element_by_id("sidebar"), None);
}

#[test]
fn removing_a_subtree_purges_its_ids() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let section = doc
        .mutate()
        .create_element(element_name("section"), vec![attr("id", "outer")]);
    let div = doc
        .mutate()
        .create_element(element_name("div"), vec![attr("id", "inner")]);
    doc.mutate().append_children(0, &[section]);
    doc.mutate().append_children(section, &[div]);

    assert_eq!(doc.get_element_by_id("outer"), Some(section));
    assert_eq!(doc.get_element_by_id("inner"), Some(div));

    doc.remove_node(section);

    assert_eq!(doc.get_element_by_id("outer"), None);
    assert_eq!(doc.get_element_by_id("inner"), None);
    // Only the document root is left
    assert_eq!(doc.tree().len(), 1);
}

#[test]
fn dummy_provider_never_resolves() {
    let mut doc = BaseDocument::new(DocumentConfig {
        id_cache: Some(Arc::new(grove_dom::DummyIdCacheProvider)),
    });
    let div = doc.mutate().create_element(element_name("div"), vec![]);

    doc.set_element_id(div, "sidebar");
    // The attribute write still happens, only the cache is inert
    assert_eq!(doc.element_id(div), "sidebar");
    assert_eq!(doc.get_element_by_id("sidebar"), None);
}

#[test]
fn swapping_the_provider_starts_from_an_empty_cache() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let div = doc.mutate().create_element(element_name("div"), vec![]);
    doc.set_element_id(div, "sidebar");
    assert_eq!(doc.get_element_by_id("sidebar"), Some(div));

    doc.set_id_cache_provider(Arc::new(grove_dom::InMemoryIdCache::default()));
    assert_eq!(doc.get_element_by_id("sidebar"), None);

    doc.set_element_id(div, "sidebar");
    assert_eq!(doc.get_element_by_id("sidebar"), Some(div));
}

#[test]
fn duplicate_ids_resolve_to_the_last_primed_node() {
    let mut doc = BaseDocument::new(DocumentConfig::default());
    let first = doc.mutate().create_element(element_name("div"), vec![]);
    let second = doc.mutate().create_element(element_name("div"), vec![]);

    doc.set_element_id(first, "dup");
    doc.set_element_id(second, "dup");
    assert_eq!(doc.get_element_by_id("dup"), Some(second));
}
