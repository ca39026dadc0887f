use std::{fs, io};

use tracing::{debug, instrument};

use crate::{
    error::{IOError, ParseError, ParseErrorKind, Result, SyntaxError},
    formatter::{FormatConfig, Formatter, XmlFormatter},
    node::Node,
    parser::XmlParser,
};

pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            ParseError::new(ParseErrorKind::IO(IOError::FileNotFound(path.to_string())))
        }
        io::ErrorKind::PermissionDenied => ParseError::new(ParseErrorKind::IO(
            IOError::PermissionDenied(path.to_string()),
        )),
        _ => ParseError::new(ParseErrorKind::IO(IOError::ReadError(e.to_string())))
            .with_context(path),
    })
}

pub fn write_file(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => ParseError::new(ParseErrorKind::IO(
            IOError::PermissionDenied(path.to_string()),
        )),
        _ => ParseError::new(ParseErrorKind::IO(IOError::WriteError(e.to_string())))
            .with_context(path),
    })
}

/// Drops a byte order mark and every leading line that is blank or holds
/// only a `<?...?>` or `<!...>` construct.
///
/// Constructs sharing a line with the root element, or spanning several
/// lines, are left for the parser to skip.
pub fn strip_preamble(content: &str) -> &str {
    let mut rest = content.trim_start_matches('\u{feff}');

    loop {
        let (line, after) = rest.split_once('\n').unwrap_or((rest, ""));
        if is_preamble_line(line.trim()) {
            if after.is_empty() {
                return "";
            }
            rest = after;
        } else {
            return rest;
        }
    }
}

fn is_preamble_line(line: &str) -> bool {
    line.is_empty()
        || (line.starts_with("<?") && line.ends_with("?>") && line.matches('>').count() == 1)
        || (line.starts_with("<!") && line.ends_with('>') && line.matches('>').count() == 1)
}

/// Parses document text after removing the preamble lines
pub fn parse_xml(content: &str) -> Result<Node> {
    let body = strip_preamble(content);
    if body.trim().is_empty() {
        return Err(ParseError::syntax(SyntaxError::UnreadableDocument));
    }
    XmlParser::new(body)?.parse()
}

/// Reads and parses an XML file
#[instrument]
pub fn load_document(path: &str) -> Result<Node> {
    let content = read_file(path)?;
    debug!(bytes = content.len(), "file read");
    parse_xml(&content).map_err(|e| match e.context() {
        Some(_) => e,
        None => e.with_context(path),
    })
}

/// Renders a tree with the given options and writes it to `path`
#[instrument(skip(node, config), fields(root = %node.name))]
pub fn write_document(node: &Node, path: &str, config: &FormatConfig) -> Result<()> {
    let text = XmlFormatter.format(node, config)?;
    write_file(path, &text)?;
    debug!(bytes = text.len(), "document written");
    Ok(())
}

pub fn format_xml(node: &Node) -> Result<String> {
    XmlFormatter.format(node, &FormatConfig::default())
}
