//! Arena-backed in-memory document.

use std::fmt::Write as _;

use super::{
    Document,
    Link,
};
use crate::binding::TargetProperty;

/// Handle into a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &["area", "br", "hr", "img", "input", "link", "meta"];

/// What a node is.
#[derive(Debug, Clone)]
enum NodeKind {
    Element { tag: String, attributes: Vec<(String, String)> },
    Text(String),
    /// Raw markup written through `innerHTML`; kept as-is, never parsed.
    Markup(String),
}

/// One arena slot.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// A small document tree.
///
/// Enough of a DOM to drive localization outside a browser: elements with
/// attributes, text nodes, and raw markup from `innerHTML` writes.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    /// All nodes ever created. Detached nodes stay allocated.
    nodes: Vec<NodeData>,
}

impl MemoryDocument {
    /// Creates a document whose root element is `<html>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element { tag: "html".to_string(), attributes: Vec::new() },
                children: Vec::new(),
            }],
        }
    }

    /// Appends a new element under `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append(
            parent,
            NodeKind::Element { tag: tag.to_string(), attributes: Vec::new() },
        )
    }

    /// Appends a new element with attributes under `parent`.
    pub fn element_with(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.element(parent, tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value);
        }
        node
    }

    /// Appends a text node under `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    /// Concatenated text of `node` and its descendants.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    /// Serializes `node` and its subtree.
    #[must_use]
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.data(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Slot for `node`, if it exists.
    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    /// Mutable slot for `node`.
    fn data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0)
    }

    /// Child handles, empty for unknown nodes.
    fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node).map(|data| data.children.as_slice()).unwrap_or_default()
    }

    /// Allocates a node and attaches it as the last child of `parent`.
    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData { kind, children: Vec::new() });
        if let Some(parent) = self.data_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Replaces all children of `node` with a single new node.
    fn replace_children(&mut self, node: NodeId, kind: NodeKind) {
        if let Some(data) = self.data_mut(node) {
            data.children.clear();
        }
        self.append(node, kind);
    }

    /// Appends the text below `node` to `out`.
    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.data(node) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) | NodeKind::Markup(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &data.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Appends the serialized subtree of `node` to `out`.
    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.data(node) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Markup(markup) => out.push_str(markup),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape(value, true));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &data.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }

    /// Depth-first walk below `node` collecting marked elements.
    fn collect_marked(&self, node: NodeId, attribute: &str, found: &mut Vec<NodeId>) {
        for child in self.children(node) {
            if self.attribute(*child, attribute).is_some() {
                found.push(*child);
            }
            self.collect_marked(*child, attribute, found);
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn find_marked(&self, root: NodeId, attribute: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_marked(root, attribute, &mut found);
        found
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        match &self.data(node)?.kind {
            NodeKind::Element { attributes, .. } => {
                attributes.iter().find(|(n, _)| n == name).map(|(_, value)| value.clone())
            }
            _ => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(NodeData { kind: NodeKind::Element { attributes, .. }, .. }) = self.data_mut(node)
        else {
            return;
        };
        if let Some(slot) = attributes.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            attributes.push((name.to_string(), value.to_string()));
        }
    }

    fn set_property(&mut self, node: NodeId, property: TargetProperty, value: &str) {
        match property {
            TargetProperty::TextContent => {
                self.replace_children(node, NodeKind::Text(value.to_string()));
            }
            TargetProperty::InnerHtml => {
                self.replace_children(node, NodeKind::Markup(value.to_string()));
            }
            TargetProperty::Title | TargetProperty::Alt => {
                self.set_attribute(node, property.name(), value);
            }
        }
    }

    fn has_element_children(&self, node: NodeId) -> bool {
        self.children(node).iter().any(|child| self.tag(*child).is_some())
    }

    fn text_children(&self, node: NodeId) -> Vec<(NodeId, String)> {
        self.children(node)
            .iter()
            .filter_map(|child| match &self.data(*child)?.kind {
                NodeKind::Text(text) => Some((*child, text.clone())),
                _ => None,
            })
            .collect()
    }

    fn set_text(&mut self, node: NodeId, value: &str) {
        if let Some(NodeData { kind: NodeKind::Text(text), .. }) = self.data_mut(node) {
            *text = value.to_string();
        }
    }

    fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if self.tag(node) == Some("link") {
                links.push(Link {
                    link_type: self.attribute(node, "type").unwrap_or_default(),
                    href: self.attribute(node, "href").unwrap_or_default(),
                });
            }
            stack.extend(self.children(node).iter().rev());
        }
        links
    }
}

/// Escapes text for HTML output; `quotes` also escapes `"` for attribute values.
fn escape(text: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn find_marked_is_in_document_order_and_excludes_root() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        doc.set_attribute(root, "data-l10n-id", "page");
        let header = doc.element_with(root, "h1", &[("data-l10n-id", "title")]);
        let section = doc.element(root, "section");
        let nested = doc.element_with(section, "p", &[("data-l10n-id", "body")]);
        let _plain = doc.element(section, "p");

        assert_eq!(doc.find_marked(root, "data-l10n-id"), vec![header, nested]);
    }

    #[rstest]
    fn set_property_text_content_replaces_children() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let p = doc.element(root, "p");
        doc.text(p, "old ");
        doc.element(p, "b");

        doc.set_property(p, TargetProperty::TextContent, "new <text>");

        assert_that!(doc.to_html(p), eq("<p>new &lt;text&gt;</p>"));
        assert_that!(doc.has_element_children(p), eq(false));
    }

    #[rstest]
    fn set_property_inner_html_keeps_markup_raw() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let p = doc.element(root, "p");

        doc.set_property(p, TargetProperty::InnerHtml, "<em>hi</em>");

        assert_that!(doc.to_html(p), eq("<p><em>hi</em></p>"));
    }

    #[rstest]
    #[case::title(TargetProperty::Title, "title")]
    #[case::alt(TargetProperty::Alt, "alt")]
    fn set_property_attributes(#[case] property: TargetProperty, #[case] attribute: &str) {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let img = doc.element(root, "img");

        doc.set_property(img, property, "A \"cat\"");

        assert_that!(doc.attribute(img, attribute), some(eq("A \"cat\"")));
        assert_eq!(doc.to_html(img), format!("<img {attribute}=\"A &quot;cat&quot;\">"));
    }

    #[rstest]
    fn text_children_only_lists_text_nodes() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let p = doc.element(root, "p");
        let first = doc.text(p, "Hello ");
        doc.element(p, "b");
        let second = doc.text(p, "!");

        assert_eq!(
            doc.text_children(p),
            vec![(first, "Hello ".to_string()), (second, "!".to_string())]
        );
        assert_that!(doc.has_element_children(p), eq(true));
    }

    #[rstest]
    fn links_are_found_anywhere() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let head = doc.element(root, "head");
        doc.element_with(head, "link", &[("type", "application/l10n+json"), ("href", "a.json")]);
        doc.element_with(root, "link", &[("rel", "stylesheet"), ("href", "s.css")]);

        assert_eq!(
            doc.links(),
            vec![
                Link { link_type: "application/l10n+json".to_string(), href: "a.json".to_string() },
                Link { link_type: String::new(), href: "s.css".to_string() },
            ]
        );
    }
}
