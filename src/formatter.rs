mod xml;

pub use self::xml::{write_document, write_node, XmlFormatter, PROLOG};
use crate::{
    error::{FormatError, ParseError, ParseErrorKind, Result},
    node::Node,
};

/// Widest indentation step accepted by [`FormatConfig`]
pub const MAX_INDENT_SPACES: usize = 8;

/// Configuration options for formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per nesting level
    pub indent_spaces: usize,
    /// Write an element whose only child is one text run on a single line
    pub compact_text: bool,
    /// Emit the `<?xml ...?>` line before the root element
    pub prolog: bool,
    /// Emit `<!DOCTYPE ...>` after the prolog
    pub doctype: Option<String>,
    /// Write attributes as leading `<name>value</name>` child lines
    pub attributes_as_elements: bool,
}

/// Default configuration for writing whole documents
impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 2,
            compact_text: true,
            prolog: true,
            doctype: None,
            attributes_as_elements: false,
        }
    }
}

impl FormatConfig {
    /// Configuration for rendering a single subtree, without the prolog
    pub fn fragment() -> Self {
        Self {
            prolog: false,
            ..Self::default()
        }
    }

    pub fn with_doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = Some(doctype.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent_spaces > MAX_INDENT_SPACES {
            return Err(ParseError::new(ParseErrorKind::Format(
                FormatError::InvalidIndentation(format!(
                    "Indentation of {} spaces exceeds maximum allowed ({})",
                    self.indent_spaces, MAX_INDENT_SPACES
                )),
            )));
        }
        Ok(())
    }
}

/// Trait for rendering a node tree as text
pub trait Formatter {
    fn format(&self, node: &Node, config: &FormatConfig) -> Result<String>;
}
