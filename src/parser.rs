//! XML parser implementation.
//!
//! A recursive descent parser over a complete document string. Each call to
//! [`XmlParser::parse_element`] decodes one tag header, then (unless the tag
//! is self-closing) collects text runs and nested elements until it meets
//! the element's own closing tag, and hands the unconsumed text back to the
//! caller.

pub mod config;

use tracing::{debug, instrument, trace};

use self::config::{ParserConfig, ParsingContext};
use crate::error::{ParseError, Result, SyntaxError};
use crate::node::{Child, Node, TagKind};
use crate::scanner::{find_unquoted, split_quoted_pairs};

/// Characters trimmed from both ends of a raw attribute name
const NAME_TRIM: [char; 5] = [' ', '\t', '\r', '\n', '='];

/// Parser for XML documents
#[derive(Debug)]
pub struct XmlParser<'a> {
    input: &'a str,
    config: ParserConfig,
    context: ParsingContext,
}

impl<'a> XmlParser<'a> {
    /// Creates a parser with the default limits
    pub fn new(input: &'a str) -> Result<Self> {
        Self::with_config(input, ParserConfig::default())
    }

    /// Creates a parser with custom limits, rejecting oversized input
    pub fn with_config(input: &'a str, config: ParserConfig) -> Result<Self> {
        config.validate_size(input)?;
        Ok(Self {
            input,
            config,
            context: ParsingContext::new(),
        })
    }

    /// Parses the whole input into its root element.
    ///
    /// Leading prolog (`<?...?>`) and doctype (`<!...>`) constructs are
    /// skipped; anything after the root element is discarded.
    #[instrument(skip_all, fields(len = self.input.len()))]
    pub fn parse(&mut self) -> Result<Node> {
        self.context = ParsingContext::new();
        let body = skip_prolog(self.input);
        if !body.starts_with('<') {
            return Err(ParseError::syntax(SyntaxError::UnreadableDocument));
        }

        let (root, trailing) = self.parse_element(body)?;
        if !trailing.trim().is_empty() {
            debug!(
                bytes = trailing.len(),
                "discarding text after the root element"
            );
        }

        debug!(root = %root.name, "document parsed");
        Ok(root)
    }

    /// Parses one element starting at the `<` of its header.
    ///
    /// Returns the element and the text following its closing tag (or its
    /// header, for a self-closing tag).
    pub fn parse_element(&mut self, text: &'a str) -> Result<(Node, &'a str)> {
        let end = header_end(text).ok_or_else(|| {
            ParseError::syntax(SyntaxError::UnclosedHeader).with_context(snippet(text))
        })?;
        let (header, rest) = text.split_at(end);
        let rest = rest.strip_prefix('>').unwrap_or(rest);

        let mut node = decode_header(header)?;
        trace!(tag = %node.name, kind = ?node.kind, "decoded header");

        if node.kind == TagKind::Short {
            return Ok((node, rest));
        }

        self.context
            .enter_nested(&self.config)
            .map_err(|e| e.with_context(format!("<{}>", node.name)))?;
        let rest = self.parse_body(&mut node, rest)?;
        self.context.exit_nested();

        Ok((node, rest))
    }

    fn parse_body(&mut self, node: &mut Node, text: &'a str) -> Result<&'a str> {
        let closer = format!("</{}>", node.name);
        let mut rest = text.trim_start();

        loop {
            if let Some(after) = rest.strip_prefix(closer.as_str()) {
                return Ok(after);
            }

            if rest.is_empty() || rest.starts_with("</") {
                return Err(unclosed(node));
            }

            if rest.starts_with('<') {
                let (child, after) = self.parse_element(rest)?;
                node.children.push(Child::Element(child));
                rest = after.trim_start();
                continue;
            }

            let Some(end) = rest.find('<') else {
                return Err(unclosed(node));
            };
            let (run, after) = rest.split_at(end);
            node.children.push(Child::Text(run.trim_end().to_string()));
            rest = after;
        }
    }
}

/// Parses a complete document string into its root element
pub fn parse_document(text: &str) -> Result<Node> {
    XmlParser::new(text)?.parse()
}

/// Parses one element and returns it with the unconsumed trailing text
pub fn parse_element(text: &str) -> Result<(Node, &str)> {
    XmlParser::new(text)?.parse_element(text)
}

/// Offset of the first `>` that is not part of a quoted attribute value
fn header_end(text: &str) -> Option<usize> {
    find_unquoted(text, '>')
}

/// Decodes `<name a="1" b='2'` or `<name .../` (without the final `>`)
fn decode_header(header: &str) -> Result<Node> {
    let header = header.strip_prefix('<').unwrap_or(header);
    let (header, kind) = match header.trim_end().strip_suffix('/') {
        Some(stripped) => (stripped, TagKind::Short),
        None => (header, TagKind::Auto),
    };

    let (name, blob) = match header.split_once(char::is_whitespace) {
        Some((name, blob)) => (name, Some(blob)),
        None => (header, None),
    };

    if name.is_empty() || name.starts_with('/') {
        return Err(ParseError::syntax(SyntaxError::InvalidTagName(
            name.to_string(),
        )));
    }

    let mut node = Node::new(name).with_kind(kind);
    if let Some(blob) = blob {
        let pairs =
            split_quoted_pairs(blob).map_err(|e| e.with_context(format!("<{}>", name)))?;
        for (raw_name, value) in pairs {
            node.attributes
                .insert(raw_name.trim_matches(NAME_TRIM).to_string(), value);
        }
    }

    Ok(node)
}

/// Skips leading whitespace, a byte order mark, and any `<?...?>` or
/// `<!...>` constructs in front of the root element.
fn skip_prolog(text: &str) -> &str {
    let mut rest = text.trim_start_matches('\u{feff}').trim_start();

    loop {
        if rest.starts_with("<?") {
            rest = rest.split_once("?>").map_or("", |(_, after)| after);
        } else if rest.starts_with("<!") {
            rest = rest.split_once('>').map_or("", |(_, after)| after);
        } else {
            return rest;
        }
        rest = rest.trim_start();
    }
}

fn unclosed(node: &Node) -> ParseError {
    ParseError::syntax(SyntaxError::UnclosedElement(node.name.clone()))
}

/// Leading characters of `text`, for error context
fn snippet(text: &str) -> String {
    text.chars().take(40).collect()
}
