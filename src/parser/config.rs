use std::fmt;

use crate::error::{ParseError, Result, SecurityError};

/// Maximum element nesting depth (256)
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Maximum input size (16MB) to prevent memory exhaustion attacks
pub const DEFAULT_MAX_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for parser limits and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of elements
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
}

/// Tracks nesting depth during parsing
#[derive(Debug, Default)]
pub struct ParsingContext {
    pub current_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ max_depth: {}, max_size: {} }}",
            self.max_depth, self.max_size
        )
    }
}

impl ParserConfig {
    pub fn validate_size(&self, input: &str) -> Result<()> {
        if input.len() > self.max_size {
            return Err(ParseError::security(SecurityError::MaxSizeExceeded));
        }
        Ok(())
    }
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(ParseError::security(SecurityError::MaxDepthExceeded));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        if self.current_depth > 0 {
            self.current_depth -= 1;
        }
    }
}
