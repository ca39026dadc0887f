use std::fmt;
use std::io;

use super::{FormatConfig, Formatter};
use crate::error::{IOError, ParseError, ParseErrorKind, Result};
use crate::node::{Child, Node, TagKind};

/// First line of every written document
pub const PROLOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    fn format(&self, node: &Node, config: &FormatConfig) -> Result<String> {
        config.validate()?;

        let mut out = String::new();
        write_document(&mut out, node, config).map_err(|e| {
            ParseError::new(ParseErrorKind::IO(IOError::WriteError(
                "formatting failed".to_string(),
            )))
            .with_source(e)
        })?;
        Ok(out)
    }
}

impl XmlFormatter {
    /// Formats `node` and writes the result to an I/O sink
    pub fn write_to<W: io::Write>(
        &self,
        node: &Node,
        config: &FormatConfig,
        sink: &mut W,
    ) -> Result<()> {
        let text = self.format(node, config)?;
        sink.write_all(text.as_bytes()).map_err(|e| {
            ParseError::new(ParseErrorKind::IO(IOError::WriteError(e.to_string())))
                .with_source(e)
        })
    }
}

/// Writes the optional prolog and doctype lines, then the tree
pub fn write_document<W: fmt::Write>(
    out: &mut W,
    node: &Node,
    config: &FormatConfig,
) -> fmt::Result {
    if config.prolog {
        writeln!(out, "{}", PROLOG)?;
    }
    if let Some(doctype) = &config.doctype {
        writeln!(out, "<!DOCTYPE {}>", doctype)?;
    }
    write_node(out, node, 0, config)
}

/// Writes `node` indented by `depth` levels, one line per tag or text run.
///
/// A `Short` node is always self-closed and its children are not written.
pub fn write_node<W: fmt::Write>(
    out: &mut W,
    node: &Node,
    depth: usize,
    config: &FormatConfig,
) -> fmt::Result {
    let indent = " ".repeat(depth * config.indent_spaces);
    let inner = " ".repeat((depth + 1) * config.indent_spaces);

    out.write_str(&indent)?;
    write_header(out, node, config)?;

    let attribute_lines = if config.attributes_as_elements {
        node.attributes.len()
    } else {
        0
    };
    let children: &[Child] = match node.kind {
        TagKind::Short => &[],
        TagKind::Long | TagKind::Auto => &node.children,
    };

    let short = match node.kind {
        TagKind::Short => attribute_lines == 0,
        TagKind::Long => false,
        TagKind::Auto => children.is_empty() && attribute_lines == 0,
    };
    if short {
        return writeln!(out, "/>");
    }

    if config.compact_text && node.kind != TagKind::Long && attribute_lines == 0 {
        if let Some(text) = node.single_text() {
            return writeln!(out, ">{}</{}>", text, node.name);
        }
    }

    writeln!(out, ">")?;

    if config.attributes_as_elements {
        for (name, value) in &node.attributes {
            writeln!(out, "{}<{}>{}</{}>", inner, name, value, name)?;
        }
    }

    for child in children {
        match child {
            Child::Element(element) => write_node(out, element, depth + 1, config)?,
            Child::Text(text) => {
                for line in text.split('\n') {
                    writeln!(out, "{}{}", inner, line)?;
                }
            }
        }
    }

    writeln!(out, "{}</{}>", indent, node.name)
}

/// Writes `<name` and, unless they are written as elements, the attributes
fn write_header<W: fmt::Write>(out: &mut W, node: &Node, config: &FormatConfig) -> fmt::Result {
    write!(out, "<{}", node.name)?;
    if !config.attributes_as_elements {
        for (name, value) in &node.attributes {
            let quote = value_quote(value);
            write!(out, " {}={}{}{}", name, quote, value, quote)?;
        }
    }
    Ok(())
}

/// `"` unless the value itself holds one. A value holding both quote
/// characters cannot be delimited and is written with `"`.
fn value_quote(value: &str) -> char {
    if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    }
}
