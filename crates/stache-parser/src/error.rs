//! Parse errors and source positions.

use std::fmt;

use thiserror::Error;

/// A location in template source.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset into the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Computes the position of `offset` within `source`.
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while parsing template source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A section was opened but never closed.
    #[error("unclosed section '{name}' opened at {position}")]
    UnclosedSection { name: String, position: Position },

    /// A close tag appeared with no section open.
    #[error("unexpected close tag '{name}' at {position}")]
    UnexpectedClose { name: String, position: Position },

    /// A close tag named a different section than the innermost open one.
    #[error("close tag '{found}' at {position} does not match open section '{expected}'")]
    MismatchedClose {
        expected: String,
        found: String,
        position: Position,
    },

    /// An open delimiter with no matching close delimiter.
    #[error("unclosed tag at {position}")]
    UnclosedTag { position: Position },

    /// A tag with nothing between its delimiters.
    #[error("empty tag at {position}")]
    EmptyTag { position: Position },

    /// A set-delimiter tag that does not contain exactly two delimiters.
    #[error("invalid delimiter change at {position}")]
    InvalidDelimiters { position: Position },

    /// A tag using a sigil with no meaning here, such as template
    /// inheritance's `{{<parent}}` or `{{$block}}`.
    #[error("unsupported tag '{sigil}' at {position}")]
    UnsupportedTag { sigil: char, position: Position },
}

impl ParseError {
    /// Returns where in the source the error was detected.
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnclosedSection { position, .. }
            | ParseError::UnexpectedClose { position, .. }
            | ParseError::MismatchedClose { position, .. }
            | ParseError::UnclosedTag { position }
            | ParseError::EmptyTag { position }
            | ParseError::UnsupportedTag { position, .. }
            | ParseError::InvalidDelimiters { position } => *position,
        }
    }
}
