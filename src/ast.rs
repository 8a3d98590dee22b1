use std::fmt;

use crate::position::Position;

/// One macro call found in a configure script: `NAME(arg, ...)` or a
/// bare `NAME`.
///
/// Calls are produced by the scanner and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroCall {
    name: String,
    position: Position,
    arguments: Vec<Argument>,
}

/// A single argument of a macro call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    position: Position,
    text: String,
}

impl MacroCall {
    pub(crate) const fn new(name: String, position: Position, arguments: Vec<Argument>) -> Self {
        Self {
            name,
            position,
            arguments,
        }
    }

    /// Macro name: uppercase ASCII letters and underscores.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the first character of the name.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Arguments in source order. Empty for `NAME` and `NAME()`.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Argument at zero-based `index`, if the call has that many.
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }
}

impl fmt::Display for MacroCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(&arg.text)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Argument {
    pub(crate) const fn new(position: Position, text: String) -> Self {
        Self { position, text }
    }

    /// Position of the first non-whitespace character, or of the
    /// terminating `,`/`)` when the argument is all whitespace.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Source text with leading whitespace removed. Trailing
    /// whitespace and quote brackets are kept.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with leading `[` and trailing `]` characters stripped.
    #[must_use]
    pub fn unquoted(&self) -> &str {
        unquote(&self.text)
    }
}

/// Strip every leading `[` and every trailing `]`.
#[must_use]
pub fn unquote(text: &str) -> &str {
    text.trim_start_matches('[').trim_end_matches(']')
}
