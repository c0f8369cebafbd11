//! The core DOM abstraction in Grove
//!
//! This crate implements a small headless DOM tree ([`BaseDocument`]) which is designed to be
//! embedded in and "driven" by external code. It includes a slab-backed node tree, a mutation
//! API ([`DocumentMutator`]), and an id registry which maps element ids to nodes for fast
//! lookup ([`get_element_by_id`](BaseDocument::get_element_by_id)).
//!
//! The registry is kept behind the [`IdCacheProvider`] seam so that embedders can substitute
//! their own cache. The document guarantees the registry is never stale: an id write purges
//! the old entry before the attribute changes, and registers the new id only once the write
//! has happened.

// TODO: Document features
// ## Feature flags
//  - `default`: Enables the features listed below.
//  - `tracing`: Enables tracing support.

/// The DOM implementation.
///
/// This is the primary entry point for this crate.
mod document;

/// The nodes themselves, and their data.
pub mod node;

mod config;
mod dom_id;
mod mutator;
mod traversal;

pub use config::DocumentConfig;
pub use document::BaseDocument;
pub use dom_id::InMemoryIdCache;
pub use grove_traits::{DummyIdCacheProvider, IdCacheProvider, SharedIdCache};
pub use markup5ever::{
    LocalName, Namespace, Prefix, QualName, local_name, namespace_url, ns,
};
pub use mutator::{AppendTextErr, DocumentMutator};
pub use node::{Attribute, Attributes, ElementData, Node, NodeData, NodeKind, TextNodeData};
pub use traversal::{AncestorTraverser, TreeTraverser};
