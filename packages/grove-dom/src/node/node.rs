use std::fmt::Write;

use markup5ever::{LocalName, local_name};
use slab::Slab;

use super::{Attribute, ElementData};

pub struct Node {
    // The actual tree we belong to. This is unsafe!!
    tree: *mut Slab<Node>,

    /// Our Id
    pub id: usize,
    /// Our parent's ID
    pub parent: Option<usize>,
    /// What are our children?
    pub children: Vec<usize>,

    /// Node type (Element, Text, etc) specific data
    pub data: NodeData,
}

// SAFETY: the tree pointer is only dereferenced while the owning document is alive,
// and the slab is boxed so its address is stable (see BaseDocument::nodes).
unsafe impl Send for Node {}
unsafe impl Sync for Node {}

impl Node {
    pub(crate) fn new(tree: *mut Slab<Node>, id: usize, data: NodeData) -> Self {
        Self {
            tree,
            id,
            parent: None,
            children: vec![],
            data,
        }
    }

    pub fn tree(&self) -> &Slab<Node> {
        unsafe { &*self.tree }
    }

    #[track_caller]
    pub fn with(&self, id: usize) -> &Node {
        self.tree().get(id).unwrap()
    }

    pub fn child_index(&self) -> Option<usize> {
        self.tree()[self.parent?]
            .children
            .iter()
            .position(|id| *id == self.id)
    }

    // Get the nth next node in the parent's child list
    pub fn forward(&self, n: usize) -> Option<&Node> {
        let child_idx = self.child_index().unwrap_or(0);
        self.tree()[self.parent?]
            .children
            .get(child_idx + n)
            .map(|id| self.with(*id))
    }

    pub fn backward(&self, n: usize) -> Option<&Node> {
        let child_idx = self.child_index().unwrap_or(0);
        if child_idx < n {
            return None;
        }

        self.tree()[self.parent?]
            .children
            .get(child_idx - n)
            .map(|id| self.with(*id))
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    pub fn is_text_node(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        self.data.downcast_element()
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        self.data.downcast_element_mut()
    }

    pub fn text_data(&self) -> Option<&TextNodeData> {
        match self.data {
            NodeData::Text(ref data) => Some(data),
            _ => None,
        }
    }

    pub fn text_data_mut(&mut self) -> Option<&mut TextNodeData> {
        match self.data {
            NodeData::Text(ref mut data) => Some(data),
            _ => None,
        }
    }

    pub fn attrs(&self) -> Option<&[Attribute]> {
        self.data.attrs()
    }

    pub fn attr(&self, name: impl PartialEq<LocalName>) -> Option<&str> {
        self.data.attr(name)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text_content(&mut out);
        out
    }

    fn write_text_content(&self, out: &mut String) {
        match &self.data {
            NodeData::Text(data) => out.push_str(&data.content),
            NodeData::Element(_) | NodeData::Document => {
                for child_id in &self.children {
                    self.with(*child_id).write_text_content(out);
                }
            }
            NodeData::Comment => {}
        }
    }

    pub fn node_debug_str(&self) -> String {
        let mut s = String::new();
        match &self.data {
            NodeData::Document => write!(s, "DOCUMENT"),
            NodeData::Comment => write!(s, "COMMENT"),
            NodeData::Text(data) => {
                let bytes = data.content.as_bytes();
                write!(
                    s,
                    "TEXT {}",
                    &std::str::from_utf8(bytes.split_at(10.min(bytes.len())).0)
                        .unwrap_or("INVALID UTF8")
                )
            }
            NodeData::Element(data) => {
                let class = self.attr(local_name!("class")).unwrap_or("");
                if !class.is_empty() {
                    write!(s, "<{} class=\"{}\"> ({})", data.name.local, class, self.id)
                } else {
                    write!(s, "<{}> ({})", data.name.local, self.id)
                }
            }
        }
        .unwrap();
        s
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("node_info", &self.node_debug_str())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
}

/// The different kinds of nodes in the DOM.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The `Document` itself - the root node of the document.
    Document,

    /// An element with attributes.
    Element(ElementData),

    /// A text node.
    Text(TextNodeData),

    /// A comment.
    Comment,
}

impl NodeData {
    pub fn downcast_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn downcast_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            Self::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn attrs(&self) -> Option<&[Attribute]> {
        Some(self.downcast_element()?.attrs())
    }

    pub fn attr(&self, name: impl PartialEq<LocalName>) -> Option<&str> {
        self.downcast_element()?.attr(name)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Document => NodeKind::Document,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment => NodeKind::Comment,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextNodeData {
    /// The textual content of the text node
    pub content: String,
}

impl TextNodeData {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}
