//! Document access.
//!
//! The resolution engine never walks markup itself; it goes through the
//! [`Document`] trait, which a host implements over its own tree (a browser
//! DOM, a templating engine, or [`MemoryDocument`]).

mod memory;

use std::fmt::Debug;

pub use memory::{
    MemoryDocument,
    NodeId,
};

use crate::binding::TargetProperty;

/// A `<link>` declaration found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Value of the `type` attribute.
    pub link_type: String,
    pub href: String,
}

/// Access to a document tree.
pub trait Document {
    /// Handle to an element or text node.
    type Node: Copy + Eq + Debug;

    /// The document element.
    fn root(&self) -> Self::Node;

    /// Descendants of `root` (excluding `root`) carrying `attribute`, in document order.
    fn find_marked(&self, root: Self::Node, attribute: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Writes `value` into `property` of an element, replacing what was there.
    fn set_property(&mut self, node: Self::Node, property: TargetProperty, value: &str);

    /// Whether the element has at least one element child (not just text).
    fn has_element_children(&self, node: Self::Node) -> bool;

    /// Direct text-node children with their current contents.
    fn text_children(&self, node: Self::Node) -> Vec<(Self::Node, String)>;

    /// Overwrites the value of a text node in place.
    fn set_text(&mut self, node: Self::Node, value: &str);

    /// Every `<link>` element in the document.
    fn links(&self) -> Vec<Link>;
}
