use std::ops::{Deref, DerefMut};

use markup5ever::QualName;

/// A tag attribute, e.g. `class="test"` in `<div class="test" ...>`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct Attribute {
    /// The name of the attribute (e.g. the `class` in `<div class="test">`)
    pub name: QualName,
    /// The value of the attribute (e.g. the `"test"` in `<div class="test">`)
    pub value: String,
}

/// An element's attribute list.
///
/// Holds at most one attribute per name: `set` overwrites in place.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    inner: Vec<Attribute>,
}

impl Attributes {
    pub fn new(attrs: Vec<Attribute>) -> Self {
        // Parsers and callers may hand us duplicate names. The first
        // occurrence wins, matching read order.
        let mut inner: Vec<Attribute> = Vec::with_capacity(attrs.len());
        for attr in attrs {
            if !inner.iter().any(|a| a.name == attr.name) {
                inner.push(attr);
            }
        }
        Self { inner }
    }

    pub fn get(&self, name: &QualName) -> Option<&str> {
        let attr = self.inner.iter().find(|attr| attr.name == *name)?;
        Some(&attr.value)
    }

    pub fn set(&mut self, name: QualName, value: &str) {
        let existing_attr = self.inner.iter_mut().find(|a| a.name == name);
        if let Some(existing_attr) = existing_attr {
            existing_attr.value.clear();
            existing_attr.value.push_str(value);
        } else {
            self.push(Attribute {
                name,
                value: value.to_string(),
            });
        }
    }

    pub fn remove(&mut self, name: &QualName) -> Option<Attribute> {
        let idx = self.inner.iter().position(|attr| attr.name == *name);
        idx.map(|idx| self.inner.remove(idx))
    }
}

impl Deref for Attributes {
    type Target = Vec<Attribute>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl DerefMut for Attributes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
