use crate::node::{Child, Node};

/// Structural equality that ignores [`crate::TagKind`].
///
/// Attributes must match in content and order, children in order. The kind
/// is skipped because an `Auto` node without children is written as
/// `<name/>` and reads back as `Short`.
pub fn nodes_equal(left: &Node, right: &Node) -> bool {
    left.name == right.name
        && left.attributes.len() == right.attributes.len()
        && left.attributes.iter().eq(right.attributes.iter())
        && left.children.len() == right.children.len()
        && left
            .children
            .iter()
            .zip(right.children.iter())
            .all(|pair| match pair {
                (Child::Element(l), Child::Element(r)) => nodes_equal(l, r),
                (Child::Text(l), Child::Text(r)) => l == r,
                _ => false,
            })
}

/// Asserts that two trees are structurally equal
///
/// # Panics
///
/// Panics if the trees differ
pub fn assert_nodes_equal(left: &Node, right: &Node, message: &str) {
    assert!(
        nodes_equal(left, right),
        "{}\nLeft: {:?}\nRight: {:?}",
        message,
        left,
        right
    );
}
