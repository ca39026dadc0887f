//! Error handling types for the parser, serializer and document I/O
//!
//! Every failure is reported as a [`ParseError`] carrying a categorized
//! [`ParseErrorKind`] and, where known, the tag that was being processed.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

/// Main error type for all operations in this crate
#[derive(Debug)]
pub struct ParseError {
    /// The specific kind of error
    kind: ParseErrorKind,
    /// Additional context for the error, usually the tag being parsed
    context: Option<String>,
    /// Source error that caused this error
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    IO(IOError),
    Security(SecurityError),
    Syntax(SyntaxError),
    Format(FormatError),
}

/// Structural errors detected while turning text into a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// No root tag was found in the document
    #[error("No root element found in document")]
    UnreadableDocument,
    /// A tag header has no unquoted `>`
    #[error("Tag header is never closed")]
    UnclosedHeader,
    /// An attribute value has an opening quote without a closer
    #[error("Malformed attribute list: {0}")]
    MalformedAttribute(String),
    /// No matching closing tag was found for an opened element
    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),
    /// The header does not start with a usable tag name
    #[error("Invalid tag name '{0}'")]
    InvalidTagName(String),
}

/// Security-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// Exceeded maximum depth of nesting
    #[error("Maximum nesting depth exceeded")]
    MaxDepthExceeded,
    /// Exceeded maximum input size
    #[error("Maximum input size exceeded")]
    MaxSizeExceeded,
}

/// Serialization configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid indentation: {0}")]
    InvalidIndentation(String),
}

/// IO operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IOError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// Error reading from a file
    #[error("Read error: {0}")]
    ReadError(String),
    /// Error writing to a file
    #[error("Write error: {0}")]
    WriteError(String),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            context: None,
            source: None,
        }
    }

    pub fn syntax(error: SyntaxError) -> Self {
        Self::new(ParseErrorKind::Syntax(error))
    }

    pub fn security(error: SecurityError) -> Self {
        Self::new(ParseErrorKind::Security(error))
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(err) => write!(f, "{}", err),
            Self::Security(err) => write!(f, "{}", err),
            Self::Syntax(err) => write!(f, "{}", err),
            Self::Format(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.kind)?;

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.source {
            Some(source) => Some(source.as_ref()),
            None => None,
        }
    }
}

impl From<SyntaxError> for ParseError {
    fn from(error: SyntaxError) -> Self {
        Self::syntax(error)
    }
}

impl From<SecurityError> for ParseError {
    fn from(error: SecurityError) -> Self {
        Self::security(error)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
