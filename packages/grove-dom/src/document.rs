use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use grove_traits::SharedIdCache;
use slab::Slab;
use smallvec::SmallVec;

use crate::config::DocumentConfig;
use crate::dom_id::InMemoryIdCache;
use crate::mutator::DocumentMutator;
use crate::node::{Node, NodeData, TextNodeData};
use crate::traversal::TreeTraverser;

pub struct BaseDocument {
    /// A unique ID of the document
    id: usize,

    /// A slab-backed tree of nodes
    ///
    /// We pin the tree to guarantee to the nodes it creates that the tree is stable
    /// in memory. There is no way to create the tree - publicly or privately - that
    /// would invalidate that invariant.
    pub(crate) nodes: Box<Slab<Node>>,

    // Service providers
    /// Id cache provider. Maps element ids to node ids for fast lookup.
    pub id_cache: SharedIdCache,
}

impl BaseDocument {
    /// Create a new (empty) [`BaseDocument`] with the specified configuration
    pub fn new(config: DocumentConfig) -> Self {
        static ID_GENERATOR: AtomicUsize = AtomicUsize::new(1);

        let id = ID_GENERATOR.fetch_add(1, Ordering::SeqCst);

        let nodes = Box::new(Slab::new());
        let id_cache = config
            .id_cache
            .unwrap_or_else(|| Arc::new(InMemoryIdCache::default()));

        let mut doc = Self {
            id,
            nodes,
            id_cache,
        };

        // Initialise document with root Document node
        doc.create_node(NodeData::Document);

        doc
    }

    /// Set the Document's id cache provider
    pub fn set_id_cache_provider(&mut self, id_cache: SharedIdCache) {
        self.id_cache = id_cache;
    }

    pub fn tree(&self) -> &Slab<Node> {
        &self.nodes
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn get_node(&self, node_id: usize) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_node_mut(&mut self, node_id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn mutate<'doc>(&'doc mut self) -> DocumentMutator<'doc> {
        DocumentMutator::new(self)
    }

    /// Find the node registered under the specified id attribute (if one exists)
    pub fn get_element_by_id(&self, id: &str) -> Option<usize> {
        self.id_cache.node_from_id(id)
    }

    pub fn create_node(&mut self, node_data: NodeData) -> usize {
        let slab_ptr = self.nodes.as_mut() as *mut Slab<Node>;

        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node::new(slab_ptr, id, node_data));

        id
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        let content = text.to_string();
        let data = NodeData::Text(TextNodeData::new(content));
        self.create_node(data)
    }

    /// Clone the node and its subtree, registering any cloned id attributes.
    pub fn deep_clone_node(&mut self, node_id: usize) -> usize {
        fn clone_subtree(doc: &mut BaseDocument, node_id: usize) -> usize {
            // Load existing node
            let node = &doc.nodes[node_id];
            let data = node.data.clone();
            let children = node.children.clone();

            // Create new node
            let new_node_id = doc.create_node(data);

            // Recursively clone children
            let new_children: Vec<usize> = children
                .into_iter()
                .map(|child_id| clone_subtree(doc, child_id))
                .collect();
            for &child_id in &new_children {
                doc.nodes[child_id].parent = Some(new_node_id);
            }
            doc.nodes[new_node_id].children = new_children;

            new_node_id
        }

        let clone_id = clone_subtree(self, node_id);

        // Register any id attributes found in the clone. Last prime wins.
        let subtree: SmallVec<[usize; 32]> =
            TreeTraverser::new_with_root(self, clone_id).collect();
        for id in subtree {
            if let Some(id_attr) = self.nodes[id].element_data().and_then(|el| el.id.as_deref()) {
                self.id_cache.prime_id(id_attr, id);
            }
        }

        clone_id
    }

    pub fn insert_before(&mut self, node_id: usize, inserted_node_ids: &[usize]) {
        let node = &self.nodes[node_id];
        let node_child_idx = node.child_index().unwrap_or(0);
        let parent_id = node.parent.unwrap();

        let mut children = std::mem::take(&mut self.nodes[parent_id].children);
        children.splice(
            node_child_idx..node_child_idx,
            inserted_node_ids.iter().copied(),
        );
        self.nodes[parent_id].children = children;

        for &inserted_id in inserted_node_ids {
            self.nodes[inserted_id].parent = Some(parent_id);
        }
    }

    /// Append nodes to the end of the child list of the given node's parent
    pub fn append(&mut self, node_id: usize, appended_node_ids: &[usize]) {
        let parent_id = self.nodes[node_id].parent.unwrap();

        self.nodes[parent_id]
            .children
            .extend_from_slice(appended_node_ids);

        for &appended_id in appended_node_ids {
            self.nodes[appended_id].parent = Some(parent_id);
        }
    }

    /// Remove the node and its children from the tree, purging any registry
    /// entries owned by the removed subtree.
    pub fn remove_node(&mut self, node_id: usize) -> Option<Node> {
        // Purge before the subtree is dropped so the cache never outlives a node.
        let subtree: SmallVec<[usize; 32]> =
            TreeTraverser::new_with_root(self, node_id).collect();
        for id in subtree {
            if let Some(element) = self.nodes.get(id).and_then(|node| node.element_data()) {
                if let Some(dom_id) = &element.id {
                    self.id_cache.purge_id(dom_id);
                }
            }
        }

        fn remove_node_ignoring_parent(doc: &mut BaseDocument, node_id: usize) -> Option<Node> {
            let node = doc.nodes.try_remove(node_id);
            if let Some(node) = &node {
                for &child in &node.children {
                    remove_node_ignoring_parent(doc, child);
                }
            }
            node
        }

        let node = remove_node_ignoring_parent(self, node_id);

        // Detach the removed node from its parent's child list
        if let Some(Node {
            parent: Some(parent_id),
            ..
        }) = node
        {
            self.nodes[parent_id]
                .children
                .retain(|id| *id != node_id);
        }

        node
    }
}
