//! xmledit: a small XML document model with a hand-written parser
//!
//! This crate provides functionality to:
//! - Parse XML documents into an editable tree of [`Node`]s
//! - Write trees back as indented XML
//! - Query trees with depth-bounded tree-order or level-order walks
//! - Fold leaf elements into attributes and back again
//!
//! # Examples
//! ```
//! use xmledit::{parse_document, reduce, Order, Result};
//!
//! fn example() -> Result<()> {
//!     let mut root = parse_document("<root><id>5</id><name>Bolt</name></root>")?;
//!     reduce(&mut root, -1, false);
//!     assert_eq!(root.attribute("name"), Some("Bolt"));
//!     assert!(root.find("name", -1, Order::Tree).is_some());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use tracing::{debug, info, instrument};

pub mod error;
pub mod formatter;
pub mod node;
pub mod parser;
pub mod rewrite;
pub mod scanner;
pub mod test_utils;
pub mod traversal;
pub mod utils;

// Re-exports
pub use error::{IOError, ParseError, ParseErrorKind, Result, SyntaxError};
pub use formatter::{FormatConfig, Formatter, XmlFormatter};
pub use node::{Child, Key, Lookup, Node, TagKind};
pub use parser::{config::ParserConfig, parse_document, parse_element, XmlParser};
pub use rewrite::{expand, reduce};
pub use traversal::{test_attr, AttrFilter, Depth, Order, Visit, Visited};

#[instrument]
pub fn parse_file(path: &str) -> Result<Node> {
    debug!("Starting to parse file: {}", path);

    let root = utils::load_document(path)?;

    info!(root = %root.name, "File parsed");
    Ok(root)
}
