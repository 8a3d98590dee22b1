//! Autotools project linter.
//!
//! Extracts macro calls from `configure.ac` scripts with a hand-written
//! scanner that understands M4 `[...]` quoting and nested parentheses,
//! then runs name-targeted rules over them.
//!
//! # Quick start
//!
//! ## Scan a configure script
//!
//! ```
//! use atlint::parse_configure;
//!
//! let input = "AC_INIT([hello], [1.0])\nAM_INIT_AUTOMAKE\nAC_OUTPUT\n";
//! let calls = parse_configure(input).unwrap();
//! assert_eq!(calls.len(), 3);
//! assert_eq!(calls[0].name(), "AC_INIT");
//! assert_eq!(calls[0].arguments()[1].text(), "[1.0]");
//! assert_eq!(calls[0].arguments()[1].position().column(), 18);
//! ```
//!
//! ## Lint it
//!
//! ```
//! use atlint::{Registry, lint_source};
//!
//! let registry = Registry::builtin().unwrap();
//! let diags = lint_source("configure.ac", "AC_CONFIG_MACRO_DIR(m4)\n", &registry).unwrap();
//! assert_eq!(
//!     diags[0].to_string(),
//!     "configure.ac:1:21: Argument 1 is unquoted. Consider quoting to prevent errors."
//! );
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod checks;
pub mod diagnostic;
pub mod filter;
pub mod position;
pub mod project;
pub mod rules;
pub mod scanner;

pub use ast::{Argument, MacroCall, unquote};
pub use diagnostic::{Diagnostic, PROGRAM_NAME};
pub use filter::{RECOGNIZED_PREFIXES, filter_recognized, is_recognized_name};
pub use position::{Offset, Position};
pub use project::{ConfigureFile, locate_configure_file};
pub use rules::{Check, Context, Registry, Rule};
pub use scanner::{ScanError, ScanErrorKind, ScanOptions, scan_calls, scan_calls_with};

/// Unified error type of the crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The configure script could not be scanned.
    #[error("{0}")]
    Scan(#[from] ScanError),
    /// A rule target pattern failed to compile.
    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// A rule was requested by a name nobody registered.
    #[error("unknown rule: {0}")]
    UnknownRule(String),
}

/// Scan `input` and keep the calls with a recognized autotools prefix.
///
/// # Errors
///
/// Returns [`Error::Scan`] when the script cannot be scanned.
pub fn parse_configure(input: &str) -> Result<Vec<MacroCall>, Error> {
    parse_configure_with(input, &ScanOptions::default())
}

/// [`parse_configure`] with explicit scan options.
///
/// # Errors
///
/// See [`parse_configure`].
pub fn parse_configure_with(input: &str, options: &ScanOptions) -> Result<Vec<MacroCall>, Error> {
    Ok(filter_recognized(scan_calls_with(input, options)?))
}

/// Scan, filter and run `registry` over a configure script in one step.
///
/// # Errors
///
/// See [`parse_configure`].
pub fn lint_source(
    file_name: &str,
    input: &str,
    registry: &Registry,
) -> Result<Vec<Diagnostic>, Error> {
    let calls = parse_configure(input)?;
    Ok(registry.run(&calls, &Context::new(file_name)))
}

