mod id_cache;
pub use id_cache::{DummyIdCacheProvider, IdCacheProvider, SharedIdCache};
