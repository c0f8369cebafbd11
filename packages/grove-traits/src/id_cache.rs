use std::sync::Arc;

pub type SharedIdCache = Arc<dyn IdCacheProvider>;

/// A type that maps element ids to node ids for fast lookup.
///
/// The document keeps the mapping current as id attributes are written, cleared,
/// or dropped together with their node. Implementations own their concurrency
/// discipline: methods take `&self` and use interior mutability where required.
pub trait IdCacheProvider: Send + Sync + 'static {
    /// Drop the entry stored under `id` (if any).
    fn purge_id(&self, id: &str);

    /// Store `node_id` under `id`, replacing any previous entry under that key.
    fn prime_id(&self, id: &str, node_id: usize);

    /// Look up the node registered under `id`.
    fn node_from_id(&self, id: &str) -> Option<usize>;
}

/// A default noop IdCacheProvider
pub struct DummyIdCacheProvider;
impl IdCacheProvider for DummyIdCacheProvider {
    fn purge_id(&self, _id: &str) {}
    fn prime_id(&self, _id: &str, _node_id: usize) {}
    fn node_from_id(&self, _id: &str) -> Option<usize> {
        None
    }
}
