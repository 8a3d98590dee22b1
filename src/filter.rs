//! Namespace filtering of scanned macro calls.

use crate::ast::MacroCall;

/// Name prefixes of the autotools macros the linter cares about.
pub const RECOGNIZED_PREFIXES: [&str; 4] = ["AC_", "AS_", "AM_", "_"];

/// Whether `name` starts with one of [`RECOGNIZED_PREFIXES`].
#[must_use]
pub fn is_recognized_name(name: &str) -> bool {
    RECOGNIZED_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Keep only calls with a recognized name prefix, preserving order.
#[must_use]
pub fn filter_recognized(calls: Vec<MacroCall>) -> Vec<MacroCall> {
    calls
        .into_iter()
        .filter(|call| is_recognized_name(call.name()))
        .collect()
}
