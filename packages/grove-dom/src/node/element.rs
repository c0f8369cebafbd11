use std::str::FromStr;

use markup5ever::{LocalName, QualName};

use super::{Attribute, Attributes};
use crate::dom_id;

#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's tag name, namespace and prefix
    pub name: QualName,

    /// The element's id attribute (if it has one)
    pub id: Option<String>,

    /// The element's attributes
    pub attrs: Attributes,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        let mut data = ElementData {
            name,
            id: None,
            attrs: Attributes::new(attrs),
        };
        data.flush_id();
        data
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attr(&self, name: impl PartialEq<LocalName>) -> Option<&str> {
        let attr = self.attrs.iter().find(|attr| name == attr.name.local)?;
        Some(&attr.value)
    }

    pub fn attr_parsed<T: FromStr>(&self, name: impl PartialEq<LocalName>) -> Option<T> {
        let attr = self.attrs.iter().find(|attr| name == attr.name.local)?;
        attr.value.parse::<T>().ok()
    }

    /// Detects the presence of the attribute, treating *any* value as truthy.
    pub fn has_attr(&self, name: impl PartialEq<LocalName>) -> bool {
        self.attrs.iter().any(|attr| name == attr.name.local)
    }

    /// Re-derive the cached id from the attribute list after a write.
    pub(crate) fn flush_id(&mut self) {
        self.id = self
            .attrs
            .get(&dom_id::id_qual_name())
            .map(ToString::to_string);
    }
}
