//! Depth-bounded traversal and queries over a node tree.
//!
//! Every walk starts at a node, which sits at level 0, and descends at most
//! [`Depth`] levels below it. Two orders are supported: document order
//! (pre-order, each element followed by its own subtree) and level order
//! (all entries of level 1 left to right, then level 2, and so on).
//!
//! Nodes have no parent links, so a query that needs to edit what it found
//! returns a path of child indices that can be resolved mutably.

use crate::node::{Child, Node};

/// How far below the starting node a walk descends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Depth {
    #[default]
    Unbounded,
    Limited(usize),
}

/// Order in which a walk reports its entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Pre-order, document order
    #[default]
    Tree,
    /// Grouped by level, shallowest first
    Level,
}

/// An entry reached by a walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visited<'a> {
    Element(&'a Node),
    Text(&'a str),
}

/// An entry together with its level relative to the starting node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit<'a> {
    pub level: usize,
    pub item: Visited<'a>,
}

/// Attribute predicate used by [`test_attr`] and the filtered queries.
///
/// Each test names an attribute that must be present and optionally the
/// exact value it must hold. An empty filter matches every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrFilter<'a> {
    tests: Vec<(&'a str, Option<&'a str>)>,
}

impl Depth {
    /// Negative values mean unbounded
    pub fn from_signed(levels: i64) -> Self {
        usize::try_from(levels).map_or(Self::Unbounded, Self::Limited)
    }

    /// Whether entries `level` levels below the start are visited
    pub fn allows(self, level: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(max) => level <= max,
        }
    }

    /// The bound as seen from one level further down
    pub fn next_level(self) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::Limited(max) => Self::Limited(max.saturating_sub(1)),
        }
    }
}

impl From<usize> for Depth {
    fn from(levels: usize) -> Self {
        Self::Limited(levels)
    }
}

impl From<i32> for Depth {
    fn from(levels: i32) -> Self {
        Self::from_signed(i64::from(levels))
    }
}

impl<'a> AttrFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `name` to be present with any value
    pub fn has(name: &'a str) -> Self {
        Self::new().and_has(name)
    }

    /// Requires `name` to be present with exactly `value`
    pub fn equals(name: &'a str, value: &'a str) -> Self {
        Self::new().and_equals(name, value)
    }

    pub fn and_has(self, name: &'a str) -> Self {
        self.and(name, None)
    }

    pub fn and_equals(self, name: &'a str, value: &'a str) -> Self {
        self.and(name, Some(value))
    }

    pub fn and(mut self, name: &'a str, value: Option<&'a str>) -> Self {
        self.tests.push((name, value));
        self
    }

    /// Pairs names with expected values; names without a value accept any
    pub fn from_lists(names: &[&'a str], values: &[Option<&'a str>]) -> Self {
        let tests = names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, values.get(i).copied().flatten()))
            .collect();
        Self { tests }
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.tests
            .iter()
            .all(|(name, expected)| match (node.attribute(name), expected) {
                (Some(_), None) => true,
                (Some(stored), Some(expected)) => stored == *expected,
                (None, _) => false,
            })
    }
}

impl<'a> From<&'a str> for AttrFilter<'a> {
    fn from(name: &'a str) -> Self {
        Self::has(name)
    }
}

impl<'a> From<(&'a str, &'a str)> for AttrFilter<'a> {
    fn from((name, value): (&'a str, &'a str)) -> Self {
        Self::equals(name, value)
    }
}

impl<'a> From<(&'a str, Option<&'a str>)> for AttrFilter<'a> {
    fn from((name, value): (&'a str, Option<&'a str>)) -> Self {
        Self::new().and(name, value)
    }
}

impl<'a, const N: usize> From<[(&'a str, Option<&'a str>); N]> for AttrFilter<'a> {
    fn from(tests: [(&'a str, Option<&'a str>); N]) -> Self {
        Self {
            tests: tests.to_vec(),
        }
    }
}

impl<'a> From<Vec<(&'a str, Option<&'a str>)>> for AttrFilter<'a> {
    fn from(tests: Vec<(&'a str, Option<&'a str>)>) -> Self {
        Self { tests }
    }
}

/// True iff every attribute named by `filter` is present on `node` and
/// holds the expected value where one is given.
pub fn test_attr<'a>(node: &Node, filter: impl Into<AttrFilter<'a>>) -> bool {
    filter.into().matches(node)
}

impl Node {
    /// Every element and text run within `depth`, starting with this node
    pub fn walk(&self, depth: impl Into<Depth>, order: Order) -> Vec<Visit<'_>> {
        let depth = depth.into();
        match order {
            Order::Tree => {
                let mut out = vec![Visit {
                    level: 0,
                    item: Visited::Element(self),
                }];
                walk_tree(self, 0, depth, &mut out);
                out
            }
            Order::Level => self
                .levels(depth)
                .into_iter()
                .enumerate()
                .flat_map(|(level, bucket)| {
                    bucket.into_iter().map(move |item| Visit { level, item })
                })
                .collect(),
        }
    }

    /// Entries within `depth` grouped by level; bucket 0 holds this node
    pub fn levels(&self, depth: impl Into<Depth>) -> Vec<Vec<Visited<'_>>> {
        let depth = depth.into();
        let mut levels = vec![vec![Visited::Element(self)]];
        let mut frontier: Vec<&Self> = vec![self];
        let mut level = 0;

        while !frontier.is_empty() && depth.allows(level + 1) {
            level += 1;
            let mut bucket = Vec::new();
            let mut next = Vec::new();

            for node in frontier {
                for child in &node.children {
                    match child {
                        Child::Element(element) => {
                            bucket.push(Visited::Element(element));
                            next.push(element);
                        }
                        Child::Text(text) => bucket.push(Visited::Text(text)),
                    }
                }
            }

            if bucket.is_empty() {
                break;
            }
            levels.push(bucket);
            frontier = next;
        }

        levels
    }

    /// Elements only, in the chosen order, starting with this node
    pub fn elements(&self, depth: impl Into<Depth>, order: Order) -> Vec<&Self> {
        self.walk(depth, order)
            .into_iter()
            .filter_map(|visit| match visit.item {
                Visited::Element(node) => Some(node),
                Visited::Text(_) => None,
            })
            .collect()
    }

    pub fn find(&self, name: &str, depth: impl Into<Depth>, order: Order) -> Option<&Self> {
        self.elements(depth, order)
            .into_iter()
            .find(|node| node.name == name)
    }

    pub fn find_all(&self, name: &str, depth: impl Into<Depth>, order: Order) -> Vec<&Self> {
        self.elements(depth, order)
            .into_iter()
            .filter(|node| node.name == name)
            .collect()
    }

    /// First element in the chosen order whose attributes pass `filter`
    pub fn get_filtered<'f>(
        &self,
        filter: impl Into<AttrFilter<'f>>,
        depth: impl Into<Depth>,
        order: Order,
    ) -> Option<&Self> {
        let filter = filter.into();
        self.elements(depth, order)
            .into_iter()
            .find(|node| filter.matches(node))
    }

    /// Every element in the chosen order whose attributes pass `filter`
    pub fn get_filtered_all<'f>(
        &self,
        filter: impl Into<AttrFilter<'f>>,
        depth: impl Into<Depth>,
        order: Order,
    ) -> Vec<&Self> {
        let filter = filter.into();
        self.elements(depth, order)
            .into_iter()
            .filter(|node| filter.matches(node))
            .collect()
    }

    /// Greatest nesting distance to any descendant element
    pub fn max_depth(&self) -> usize {
        self.child_elements()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Child-index path to the first element named `name`; the empty path
    /// is this node.
    pub fn find_path(
        &self,
        name: &str,
        depth: impl Into<Depth>,
        order: Order,
    ) -> Option<Vec<usize>> {
        self.path_where(depth.into(), order, |node| node.name == name)
    }

    pub fn find_mut(
        &mut self,
        name: &str,
        depth: impl Into<Depth>,
        order: Order,
    ) -> Option<&mut Self> {
        let path = self.find_path(name, depth, order)?;
        self.at_path_mut(&path)
    }

    /// Resolves a path produced by [`Node::find_path`]
    pub fn at_path(&self, path: &[usize]) -> Option<&Self> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?.as_element()?;
        }
        Some(node)
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?.as_element_mut()?;
        }
        Some(node)
    }

    fn path_where(
        &self,
        depth: Depth,
        order: Order,
        pred: impl Fn(&Self) -> bool,
    ) -> Option<Vec<usize>> {
        if pred(self) {
            return Some(Vec::new());
        }

        match order {
            Order::Tree => {
                let mut path = Vec::new();
                path_tree(self, 0, depth, &pred, &mut path).then_some(path)
            }
            Order::Level => {
                let mut frontier: Vec<(Vec<usize>, &Self)> = vec![(Vec::new(), self)];
                let mut level = 0;

                while !frontier.is_empty() && depth.allows(level + 1) {
                    level += 1;
                    let mut next = Vec::new();
                    for (path, node) in frontier {
                        for (index, child) in node.children.iter().enumerate() {
                            if let Child::Element(element) = child {
                                let mut child_path = path.clone();
                                child_path.push(index);
                                if pred(element) {
                                    return Some(child_path);
                                }
                                next.push((child_path, element));
                            }
                        }
                    }
                    frontier = next;
                }
                None
            }
        }
    }
}

fn walk_tree<'a>(node: &'a Node, level: usize, depth: Depth, out: &mut Vec<Visit<'a>>) {
    if !depth.allows(level + 1) {
        return;
    }

    for child in &node.children {
        match child {
            Child::Element(element) => {
                out.push(Visit {
                    level: level + 1,
                    item: Visited::Element(element),
                });
                walk_tree(element, level + 1, depth, out);
            }
            Child::Text(text) => out.push(Visit {
                level: level + 1,
                item: Visited::Text(text),
            }),
        }
    }
}

fn path_tree(
    node: &Node,
    level: usize,
    depth: Depth,
    pred: &impl Fn(&Node) -> bool,
    path: &mut Vec<usize>,
) -> bool {
    if !depth.allows(level + 1) {
        return false;
    }

    for (index, child) in node.children.iter().enumerate() {
        if let Child::Element(element) = child {
            path.push(index);
            if pred(element) || path_tree(element, level + 1, depth, pred, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn names(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|node| node.name.clone()).collect()
    }

    fn tree() -> Node {
        // a
        // ├── b
        // │   └── d
        // └── c
        //     └── e
        Node::new("a")
            .with_child(Node::new("b").with_child(Node::new("d")))
            .with_child("t")
            .with_child(Node::new("c").with_child(Node::new("e")))
    }

    #[test]
    fn test_tree_and_level_order() {
        let root = tree();
        assert_eq!(
            names(&root.elements(-1, Order::Tree)),
            vec!["a", "b", "d", "c", "e"]
        );
        assert_eq!(
            names(&root.elements(-1, Order::Level)),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_walk_includes_text() {
        let root = tree();
        let texts: Vec<_> = root
            .walk(1, Order::Tree)
            .into_iter()
            .filter(|visit| matches!(visit.item, Visited::Text("t")))
            .map(|visit| visit.level)
            .collect();
        assert_eq!(texts, vec![1]);
    }

    #[test]
    fn test_levels_buckets() {
        let root = tree();
        let levels = root.levels(Depth::Unbounded);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels.first().map(Vec::len), Some(1));
        assert_eq!(levels.get(1).map(Vec::len), Some(3));
        assert_eq!(levels.get(2).map(Vec::len), Some(2));
        assert_eq!(root.levels(0).len(), 1);
    }

    #[test]
    fn test_depth_bounds() {
        let root = tree();
        assert!(root.find_all("b", 0, Order::Tree).is_empty());
        assert_eq!(names(&root.find_all("a", 0, Order::Tree)), vec!["a"]);
        assert_eq!(names(&root.find_all("b", 1, Order::Tree)), vec!["b"]);
        assert!(root.find("e", 1, Order::Level).is_none());
        assert!(root.find("e", -1, Order::Level).is_some());
        assert_eq!(Depth::from(-5), Depth::Unbounded);
        assert_eq!(Depth::from(3usize), Depth::Limited(3));
    }

    #[test]
    fn test_find_respects_order() -> crate::Result<()> {
        let root = parse_document(
            "<r><x><item id=\"deep\"/></x><item id=\"shallow\"/></r>",
        )?;
        let tree_first = root.find("item", -1, Order::Tree);
        let level_first = root.find("item", -1, Order::Level);
        assert_eq!(tree_first.and_then(|n| n.attribute("id")), Some("deep"));
        assert_eq!(level_first.and_then(|n| n.attribute("id")), Some("shallow"));
        Ok(())
    }

    #[test]
    fn test_attr_filters() {
        let node = Node::new("part")
            .with_attribute("id", "7")
            .with_attribute("type", "bolt");
        assert!(test_attr(&node, [("id", Some("7")), ("type", None)]));
        assert!(!test_attr(&node, [("id", Some("8")), ("type", None)]));
        assert!(!test_attr(&node, "missing"));
        assert!(test_attr(&node, ("type", "bolt")));
        assert!(test_attr(&node, AttrFilter::new()));
        assert!(AttrFilter::from_lists(&["id", "type"], &[Some("7")]).matches(&node));
    }

    #[test]
    fn test_get_filtered() -> crate::Result<()> {
        let root = parse_document(
            "<parts><p id=\"1\" kind=\"nut\"/><p id=\"2\" kind=\"bolt\"/><p id=\"3\" kind=\"bolt\"/></parts>",
        )?;
        let first_bolt = root.get_filtered(("kind", "bolt"), 1, Order::Tree);
        assert_eq!(first_bolt.and_then(|n| n.attribute("id")), Some("2"));
        assert_eq!(root.get_filtered_all("kind", 1, Order::Tree).len(), 3);
        assert!(root.get_filtered("kind", 0, Order::Tree).is_none());
        Ok(())
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(Node::new("leaf").with_child("text").max_depth(), 0);
        assert_eq!(tree().max_depth(), 2);
    }

    #[test]
    fn test_paths_and_mutation() {
        let mut root = tree();
        assert_eq!(root.find_path("e", -1, Order::Tree), Some(vec![2, 0]));
        assert_eq!(root.find_path("e", -1, Order::Level), Some(vec![2, 0]));
        assert_eq!(root.find_path("a", -1, Order::Tree), Some(vec![]));
        assert_eq!(root.find_path("e", 1, Order::Tree), None);
        assert!(root.at_path(&[1]).is_none());

        if let Some(node) = root.find_mut("d", -1, Order::Level) {
            node.set_attribute("seen", "yes");
        }
        let d = root.find("d", -1, Order::Tree);
        assert_eq!(d.and_then(|n| n.attribute("seen")), Some("yes"));
    }
}
