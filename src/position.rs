use std::fmt;

/// 1-indexed source location of a macro call or argument.
///
/// Positions are only ever produced by the scanner from zero-based
/// line and column indices, so both components are always at least 1.
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    line: usize,
    column: usize,
}

impl Position {
    /// Build a position from zero-based indices shifted by `origin`.
    pub(crate) const fn from_index(origin: Offset, line_index: usize, column_index: usize) -> Self {
        Self {
            line: origin.line + line_index + 1,
            column: origin.column + column_index + 1,
        }
    }

    /// Line number, starting at 1.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Column number, starting at 1.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Zero-based shift applied to every position recorded by a scan.
///
/// A top-level file scan uses `Offset::default()`, i.e. `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    pub line: usize,
    pub column: usize,
}

impl Offset {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
