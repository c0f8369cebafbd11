use grove_traits::SharedIdCache;

/// Options used when constructing a [`BaseDocument`](crate::BaseDocument)
#[derive(Default)]
pub struct DocumentConfig {
    /// Id cache provider mapping element ids to node ids for fast lookup.
    /// Defaults to [`InMemoryIdCache`](crate::InMemoryIdCache).
    pub id_cache: Option<SharedIdCache>,
}
