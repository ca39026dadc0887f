//! Structural rewrites between leaf elements and attributes.
//!
//! [`reduce`] folds `<parent><id>5</id></parent>` into `<parent id="5"/>`,
//! [`expand`] does the opposite. Both are bounded by a [`Depth`]: 0 leaves
//! the tree untouched, 1 rewrites only the node's own children or
//! attributes, and so on.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::node::{Child, Node, TagKind};
use crate::traversal::Depth;

/// Collapses single-text child elements into attributes of their parent.
///
/// A child is collapsed when its only content is one text run, its name is
/// unique among its sibling elements, the parent has no attribute of that
/// name, it carries no attributes itself, and its text is a single line
/// (unless `allow_multiline`). Deeper levels are rewritten first.
///
/// Returns the number of elements collapsed.
pub fn reduce(node: &mut Node, depth: impl Into<Depth>, allow_multiline: bool) -> usize {
    let count = reduce_level(node, depth.into(), allow_multiline);
    debug!(root = %node.name, count, "reduced leaf elements into attributes");
    count
}

/// Promotes attributes into single-text child elements appended after the
/// existing children.
///
/// Without `force`, an attribute is kept when a child element of the same
/// name already exists. A self-closing node that gains children becomes
/// [`TagKind::Auto`] so the new children are written.
///
/// Returns the number of attributes promoted.
pub fn expand(node: &mut Node, depth: impl Into<Depth>, force: bool) -> usize {
    let count = expand_level(node, depth.into(), force);
    debug!(root = %node.name, count, "expanded attributes into elements");
    count
}

fn reduce_level(node: &mut Node, depth: Depth, allow_multiline: bool) -> usize {
    if !depth.allows(1) {
        return 0;
    }

    let mut count: usize = node
        .child_elements_mut()
        .map(|child| reduce_level(child, depth.next_level(), allow_multiline))
        .sum();

    let collapsed = collapsible(node, allow_multiline);
    if collapsed.is_empty() {
        return count;
    }

    // Collapsible names are unique among siblings, so the name identifies
    // the child.
    node.children.retain(|child| match child {
        Child::Element(element) => !collapsed.contains_key(&element.name),
        Child::Text(_) => true,
    });
    count += collapsed.len();
    node.attributes.extend(collapsed);

    count
}

fn collapsible(node: &Node, allow_multiline: bool) -> IndexMap<String, String> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for child in node.child_elements() {
        *occurrences.entry(child.name.as_str()).or_default() += 1;
    }

    node.child_elements()
        .filter(|child| {
            occurrences.get(child.name.as_str()) == Some(&1)
                && child.attributes.is_empty()
                && !node.has_attribute(&child.name)
        })
        .filter_map(|child| {
            child
                .single_text()
                .filter(|text| allow_multiline || !text.contains('\n'))
                .map(|text| (child.name.clone(), text.to_string()))
        })
        .collect()
}

fn expand_level(node: &mut Node, depth: Depth, force: bool) -> usize {
    if !depth.allows(1) {
        return 0;
    }

    let promoted: Vec<String> = node
        .keys()
        .filter(|name| force || node.child(name).is_none())
        .map(str::to_string)
        .collect();

    for name in &promoted {
        if let Some(value) = node.remove_attribute(name) {
            node.append(Node::new(name.as_str()).with_child(value));
        }
    }
    if !promoted.is_empty() && node.kind == TagKind::Short {
        node.kind = TagKind::Auto;
    }

    promoted.len()
        + node
            .child_elements_mut()
            .map(|child| expand_level(child, depth.next_level(), force))
            .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use crate::Result;

    #[test]
    fn test_reduce_leaf_children() -> Result<()> {
        let mut root = parse_document("<root><id>5</id><name>Bolt</name></root>")?;
        assert_eq!(reduce(&mut root, -1, false), 2);
        assert_eq!(root.to_string(), "<root id=\"5\" name=\"Bolt\"/>\n");
        Ok(())
    }

    #[test]
    fn test_expand_restores_children() -> Result<()> {
        let mut root = parse_document("<root id=\"5\" name=\"Bolt\"/>")?;
        assert_eq!(expand(&mut root, -1, true), 2);
        assert_eq!(root.kind, TagKind::Auto);
        assert_eq!(
            root.to_string(),
            "<root>\n  <id>5</id>\n  <name>Bolt</name>\n</root>\n"
        );
        Ok(())
    }

    #[test]
    fn test_reduce_skips_ineligible_children() -> Result<()> {
        let mut root = parse_document(
            "<r id=\"1\"><id>2</id><dup>a</dup><dup>b</dup><own k=\"v\">x</own><empty/><nested><x>1</x><y>2</y></nested></r>",
        )?;
        // only nested's own children collapse; nested then carries attributes
        assert_eq!(reduce(&mut root, -1, false), 2);
        assert_eq!(root.attribute("id"), Some("1"));
        assert_eq!(root.child_elements().count(), 6);
        let nested = root.child("nested");
        assert_eq!(nested.and_then(|n| n.attribute("x")), Some("1"));
        assert_eq!(nested.and_then(|n| n.attribute("y")), Some("2"));
        Ok(())
    }

    #[test]
    fn test_reduce_multiline() {
        let mut root = Node::new("r").with_child(Node::new("note").with_child("one\ntwo"));
        assert_eq!(reduce(&mut root.clone(), -1, false), 0);
        assert_eq!(reduce(&mut root, -1, true), 1);
        assert_eq!(root.attribute("note"), Some("one\ntwo"));
    }

    #[test]
    fn test_depth_limits() -> Result<()> {
        let source = "<a><b><c>1</c></b><d>2</d></a>";

        let mut root = parse_document(source)?;
        assert_eq!(reduce(&mut root, 0, false), 0);

        assert_eq!(reduce(&mut root, 1, false), 1);
        assert_eq!(root.attribute("d"), Some("2"));
        assert!(root.child("b").is_some_and(|b| b.child("c").is_some()));

        let mut root = parse_document(source)?;
        assert_eq!(reduce(&mut root, 2, false), 2);
        assert!(root.child("b").is_some_and(|b| b.has_attribute("c")));
        Ok(())
    }

    #[test]
    fn test_expand_without_force_keeps_shadowed() {
        let mut node = Node::new("a")
            .with_attribute("x", "1")
            .with_attribute("y", "2")
            .with_child(Node::new("x").with_child("child"));
        assert_eq!(expand(&mut node, 1, false), 1);
        assert_eq!(node.attribute("x"), Some("1"));
        assert!(!node.has_attribute("y"));
        assert_eq!(node.child("y").map(Node::text_content), Some("2".to_string()));
    }

    #[test]
    fn test_reduce_is_idempotent() -> Result<()> {
        let mut root = parse_document(
            "<r><a>1</a><b><c>2</c><c>3</c></b><d><e>4</e>text</d></r>",
        )?;
        reduce(&mut root, -1, false);
        let once = root.clone();
        assert_eq!(reduce(&mut root, -1, false), 0);
        assert_eq!(root, once);
        Ok(())
    }
}
