use markup5ever::QualName;

use crate::node::{Attribute, ElementData, NodeData};
use crate::{BaseDocument, dom_id};

pub enum AppendTextErr {
    /// The node is not a text node
    NotTextNode,
}

pub struct DocumentMutator<'doc> {
    /// Document is public as an escape hatch, but users of this API should ideally avoid using it
    /// and prefer exposing additional functionality in DocumentMutator.
    pub doc: &'doc mut BaseDocument,
}

impl DocumentMutator<'_> {
    pub fn new<'doc>(doc: &'doc mut BaseDocument) -> DocumentMutator<'doc> {
        DocumentMutator { doc }
    }

    pub fn node_has_parent(&self, node_id: usize) -> bool {
        self.doc.nodes[node_id].parent.is_some()
    }

    pub fn previous_sibling_id(&self, node_id: usize) -> Option<usize> {
        self.doc.nodes[node_id].backward(1).map(|node| node.id)
    }

    pub fn next_sibling_id(&self, node_id: usize) -> Option<usize> {
        self.doc.nodes[node_id].forward(1).map(|node| node.id)
    }

    pub fn last_child_id(&self, node_id: usize) -> Option<usize> {
        self.doc.nodes[node_id].children.last().copied()
    }

    pub fn element_name(&self, node_id: usize) -> Option<&QualName> {
        self.doc.nodes[node_id].element_data().map(|el| &el.name)
    }

    pub fn node_at_path(&self, start_node_id: usize, path: &[u8]) -> usize {
        let mut current = &self.doc.nodes[start_node_id];
        for i in path {
            let new_id = current.children[*i as usize];
            current = &self.doc.nodes[new_id];
        }
        current.id
    }

    pub fn create_comment_node(&mut self) -> usize {
        self.doc.create_node(NodeData::Comment)
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        self.doc.create_text_node(text)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> usize {
        let data = ElementData::new(name, attrs);
        let id = self.doc.create_node(NodeData::Element(data));

        // If the node has an id attribute, store it in the id cache.
        let node = self.doc.get_node(id).unwrap();
        if let Some(id_attr) = node.element_data().and_then(|el| el.id.as_deref()) {
            self.doc.id_cache.prime_id(id_attr, id);
        }

        id
    }

    /// Remove all of the children from old_parent_id and append them to new_parent_id
    pub fn reparent_children(&mut self, old_parent_id: usize, new_parent_id: usize) {
        let child_ids = std::mem::take(&mut self.doc.nodes[old_parent_id].children);
        self.append_children(new_parent_id, &child_ids);
    }

    pub fn append_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        for child_id in child_ids.iter().copied() {
            self.doc.nodes[parent_id].children.push(child_id);
            let old_parent = self.doc.nodes[child_id].parent.replace(parent_id);
            if let Some(old_parent_id) = old_parent {
                self.doc.nodes[old_parent_id]
                    .children
                    .retain(|id| *id != child_id);
            }
        }
    }

    pub fn replace_node_with(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        self.doc.insert_before(anchor_node_id, new_node_ids);
        self.doc.remove_node(anchor_node_id);
    }

    pub fn remove_node(&mut self, node_id: usize) {
        self.doc.remove_node(node_id);
    }

    pub fn remove_node_if_unparented(&mut self, node_id: usize) {
        if let Some(node) = self.doc.get_node(node_id) {
            if node.parent.is_none() {
                self.doc.remove_node(node_id);
            }
        }
    }

    pub fn insert_nodes_after(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        let next_sibling_id = self
            .doc
            .get_node(anchor_node_id)
            .unwrap()
            .forward(1)
            .map(|node| node.id);

        match next_sibling_id {
            Some(anchor_node_id) => {
                self.doc.insert_before(anchor_node_id, new_node_ids);
            }
            None => self.doc.append(anchor_node_id, new_node_ids),
        }
    }

    pub fn insert_nodes_before(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        self.doc.insert_before(anchor_node_id, new_node_ids);
    }

    pub fn deep_clone_node(&mut self, node_id: usize) -> usize {
        self.doc.deep_clone_node(node_id)
    }

    pub fn append_text_to_node(&mut self, node_id: usize, text: &str) -> Result<(), AppendTextErr> {
        match self.doc.nodes[node_id].text_data_mut() {
            Some(data) => {
                data.content += text;
                Ok(())
            }
            None => Err(AppendTextErr::NotTextNode),
        }
    }

    pub fn set_node_text(&mut self, node_id: usize, value: &str) {
        let node = self.doc.get_node_mut(node_id).unwrap();

        let text = match node.data {
            NodeData::Text(ref mut text) => text,
            _ => return,
        };

        let changed = text.content != value;
        if changed {
            text.content.clear();
            text.content.push_str(value);
        }
    }

    pub fn add_attrs_if_missing(&mut self, node_id: usize, attrs: Vec<Attribute>) {
        let existing_names: Vec<QualName> = {
            let node = &self.doc.nodes[node_id];
            let element_data = node.element_data().expect("Not an element");
            element_data.attrs.iter().map(|e| e.name.clone()).collect()
        };

        for attr in attrs
            .into_iter()
            .filter(|attr| !existing_names.contains(&attr.name))
        {
            self.set_attribute(node_id, attr.name, &attr.value);
        }
    }

    pub fn set_attribute(&mut self, node_id: usize, name: QualName, value: &str) {
        // Id writes go through the registry so the purge/write/prime ordering holds.
        if dom_id::is_id_attr(&name) {
            self.doc.set_element_id(node_id, value);
            return;
        }

        let node = &mut self.doc.nodes[node_id];
        let NodeData::Element(ref mut element) = node.data else {
            #[cfg(feature = "tracing")]
            tracing::warn!("set_attribute on non-element node {node_id}");
            return;
        };

        element.attrs.set(name, value);
    }

    pub fn clear_attribute(&mut self, node_id: usize, name: QualName) {
        let node = &mut self.doc.nodes[node_id];
        let NodeData::Element(ref mut element) = node.data else {
            return;
        };

        let removed = element.attrs.remove(&name);

        if dom_id::is_id_attr(&name) {
            element.flush_id();
            if let Some(attr) = removed {
                self.doc.id_cache.purge_id(&attr.value);
            }
        }
    }
}
