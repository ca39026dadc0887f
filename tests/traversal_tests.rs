#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use xmledit::test_utils::*;

fn names(nodes: &[&Node]) -> Vec<String> {
    nodes.iter().map(|node| node.name.clone()).collect()
}

#[test]
fn test_tree_order_is_document_order() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;
    assert_eq!(
        names(&root.elements(-1, Order::Tree)),
        vec![
            "catalogue", "supplier", "part", "name", "size", "note", "part", "name", "size",
            "part", "name", "stock", "remarks", "b",
        ]
    );
    Ok(())
}

#[test]
fn test_level_order_groups_by_depth() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;
    assert_eq!(
        names(&root.elements(-1, Order::Level)),
        vec![
            "catalogue", "supplier", "part", "part", "part", "remarks", "name", "size", "note",
            "name", "size", "name", "stock", "b",
        ]
    );

    let levels = root.levels(Depth::Unbounded);
    let sizes: Vec<usize> = levels.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 5, 11, 7]);
    Ok(())
}

#[test]
fn test_walk_reports_text_with_levels() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;
    let texts: Vec<(usize, &str)> = root
        .walk(2, Order::Tree)
        .into_iter()
        .filter_map(|visit| match visit.item {
            Visited::Text(text) => Some((visit.level, text)),
            Visited::Element(_) => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            (2, "Acme Fasteners"),
            (2, "Prices exclude tax."),
            (2, "before noon."),
        ]
    );
    assert_eq!(root.walk(1, Order::Level).len(), 6);
    Ok(())
}

#[test]
fn test_depth_bounds() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;

    assert_eq!(names(&root.elements(0, Order::Tree)), vec!["catalogue"]);
    assert_eq!(root.find_all("part", 1, Order::Tree).len(), 3);
    assert!(root.find_all("name", 1, Order::Tree).is_empty());
    assert_eq!(root.find_all("name", 2, Order::Level).len(), 3);
    assert_eq!(root.find_all("name", -1, Order::Tree).len(), 3);
    assert_eq!(root.elements(Depth::Unbounded, Order::Tree).len(), 14);
    Ok(())
}

#[test]
fn test_find_on_subtree() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;
    let nut = root.get_filtered(("type", "nut"), 1, Order::Tree).unwrap();
    let name = nut.find("name", 1, Order::Tree).unwrap();
    assert_eq!(name.text_content(), "Hex nut");
    assert!(nut.find("note", -1, Order::Tree).is_none());
    Ok(())
}

#[test]
fn test_attribute_filters() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;

    let bolt = root
        .get_filtered([("id", Some("7")), ("type", None)], -1, Order::Tree)
        .unwrap();
    assert!(test_attr(bolt, [("id", Some("7")), ("type", None)]));
    assert!(!test_attr(bolt, [("id", Some("8")), ("type", None)]));

    let metric = root.get_filtered_all(("unit", "mm"), -1, Order::Level);
    assert_eq!(names(&metric), vec!["size", "size"]);

    let typed = root.get_filtered_all("type", -1, Order::Tree);
    let ids: Vec<_> = typed.iter().filter_map(|n| n.attribute("id")).collect();
    assert_eq!(ids, vec!["7", "8", "9"]);

    assert!(root
        .get_filtered(("type", "rivet"), -1, Order::Tree)
        .is_none());
    Ok(())
}

#[test]
fn test_max_depth() -> Result<()> {
    let root = parse_document(SAMPLE_DOCUMENT)?;
    assert_eq!(root.max_depth(), 2);
    assert_eq!(root.child("supplier").unwrap().max_depth(), 0);
    Ok(())
}

#[test]
fn test_edit_through_path() -> Result<()> {
    let mut root = parse_document(SAMPLE_DOCUMENT)?;

    let path = root.find_path("stock", -1, Order::Tree).unwrap();
    assert_eq!(path, vec![3, 1]);

    let stock = root.at_path_mut(&path).unwrap();
    stock.set_attribute("count", "120");

    let washer = root.get_filtered(("type", "washer"), 1, Order::Tree).unwrap();
    assert_eq!(
        washer.child("stock").and_then(|n| n.attribute("count")),
        Some("120")
    );
    Ok(())
}

#[test]
fn test_find_mut_in_level_order() -> Result<()> {
    let mut root = parse_document("<r><a><x/></a><x/></r>")?;
    root.find_mut("x", -1, Order::Level)
        .unwrap()
        .set_attribute("first", "yes");
    assert_eq!(
        root.children[1]
            .as_element()
            .and_then(|n| n.attribute("first")),
        Some("yes")
    );
    Ok(())
}

#[test]
fn test_lookup_priority() -> Result<()> {
    let root = parse_document(r#"<part name="attr"><name>child</name>loose</part>"#)?;
    assert_eq!(root.get("name"), Some(Lookup::Attribute("attr")));
    assert_eq!(
        root.get(1usize),
        Some(Lookup::Child(&Child::Text("loose".to_string())))
    );
    match root.get(0usize) {
        Some(Lookup::Child(Child::Element(node))) => assert_eq!(node.text_content(), "child"),
        other => panic!("Expected element child, got {:?}", other),
    }
    Ok(())
}
