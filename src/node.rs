//! XML data model

use std::fmt;

use indexmap::IndexMap;

use crate::formatter::{write_node, FormatConfig};

/// How a node is rendered by the serializer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Always self-closing (`<name/>`), children are never written
    Short,
    /// Always written with explicit open and close tags
    Long,
    /// Self-closing when the node has no children, open/close otherwise
    #[default]
    Auto,
}

/// XML element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Child>,
    pub kind: TagKind,
}

/// One entry of a node's children, in document order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Child {
    Element(Node),
    Text(String),
}

/// Key used by [`Node::get`] and [`Node::set`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    /// Attribute name, falling back to the first child element of that name
    Name(&'a str),
    /// Position in the children list
    Position(usize),
}

/// Result of a [`Node::get`] lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Attribute(&'a str),
    Child(&'a Child),
    Element(&'a Node),
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: TagKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.append(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Sets an attribute, returning the previous value. An existing
    /// attribute keeps its position.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Removes an attribute while keeping the order of the others.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Attribute names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn append(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Child::Text(text.into()));
    }

    /// Direct child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Child::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Self> {
        self.children.iter_mut().filter_map(Child::as_element_mut)
    }

    /// First direct child element with the given name
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.child_elements().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.child_elements_mut().find(|child| child.name == name)
    }

    /// Concatenation of every text run below this node, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Child::Element(node) => node.collect_text(out),
                Child::Text(text) => out.push_str(text),
            }
        }
    }

    /// The text of a node whose only child is a single text run
    pub fn single_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [Child::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Whether the serializer writes this node as `<name .../>`
    pub fn renders_short(&self) -> bool {
        match self.kind {
            TagKind::Short => true,
            TagKind::Long => false,
            TagKind::Auto => self.children.is_empty(),
        }
    }

    /// Looks up an attribute, a positional child or a named child element.
    ///
    /// A name matches an attribute first and the first child element with
    /// that name second, so attributes shadow children of the same name.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Option<Lookup<'_>> {
        match key.into() {
            Key::Name(name) => self
                .attribute(name)
                .map(Lookup::Attribute)
                .or_else(|| self.child(name).map(Lookup::Element)),
            Key::Position(index) => self.children.get(index).map(Lookup::Child),
        }
    }

    /// Replaces the child at an in-bounds position; every other key sets
    /// the attribute of that name to the text content of `value`.
    pub fn set<'k>(&mut self, key: impl Into<Key<'k>>, value: impl Into<Child>) {
        let value = value.into();
        let key = key.into();

        if let Key::Position(index) = key {
            if let Some(slot) = self.children.get_mut(index) {
                *slot = value;
                return;
            }
        }

        self.attributes.insert(key.to_string(), value.text_content());
    }
}

impl Child {
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Self::Element(node) => Some(node),
            Self::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Node> {
        match self {
            Self::Element(node) => Some(node),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Element(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Self::Element(node) => node.text_content(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Element(node)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Self::Position(index)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", name),
            Self::Position(index) => write!(f, "{}", index),
        }
    }
}

/// Renders the node and its subtree as XML, without the prolog line
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0, &FormatConfig::fragment())
    }
}
