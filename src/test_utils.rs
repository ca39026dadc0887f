mod comparison;
mod helpers;

pub use comparison::{assert_nodes_equal, nodes_equal};
pub use helpers::{tmp_file_path, SAMPLE_DOCUMENT};

// Re-export common test types/traits
pub use crate::{
    error::{
        FormatError, IOError, ParseError, ParseErrorKind, Result, SecurityError, SyntaxError,
    },
    formatter::{FormatConfig, Formatter, XmlFormatter, MAX_INDENT_SPACES, PROLOG},
    node::{Child, Key, Lookup, Node, TagKind},
    parse_file,
    parser::{
        config::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE},
        parse_document, parse_element, XmlParser,
    },
    rewrite::{expand, reduce},
    scanner::{find_unquoted, is_inside_quote, split_quoted_pairs},
    traversal::{test_attr, AttrFilter, Depth, Order, Visit, Visited},
    utils::{format_xml, load_document, parse_xml, read_file, write_document, write_file},
};
