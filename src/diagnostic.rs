//! Lint diagnostics and their console rendering.
//!
//! Positioned diagnostics print as `file:line:column: message`,
//! file-level ones as `file: message`.

use std::fmt;

use crate::position::Position;

/// Name used in place of a file for tool-level messages.
pub const PROGRAM_NAME: &str = "atlint";

/// A single warning produced by a rule or by the tool itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub position: Option<Position>,
    pub message: String,
}

impl Diagnostic {
    /// Warning attached to a location in `file`.
    #[must_use]
    pub fn at(file: &str, position: Position, message: impl Into<String>) -> Self {
        Self {
            file: file.to_owned(),
            position: Some(position),
            message: message.into(),
        }
    }

    /// Warning about `file` as a whole.
    #[must_use]
    pub fn file(file: &str, message: impl Into<String>) -> Self {
        Self {
            file: file.to_owned(),
            position: None,
            message: message.into(),
        }
    }

    /// Tool-level warning, reported under the program name.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self::file(PROGRAM_NAME, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(
                f,
                "{}:{}:{}: {}",
                self.file,
                pos.line(),
                pos.column(),
                self.message
            ),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}
