#![allow(dead_code)]

use atlint::{Argument, MacroCall, Registry, lint_source, scan_calls};

pub fn scan(input: &str) -> Vec<MacroCall> {
    scan_calls(input).unwrap_or_else(|e| panic!("scan failed: {e}\n--- input ---\n{input}"))
}

/// Scan text expected to hold exactly one call.
pub fn single_call(input: &str) -> MacroCall {
    let mut calls = scan(input);
    assert_eq!(
        calls.len(),
        1,
        "expected one call, got {calls:?}\n--- input ---\n{input}"
    );
    calls.remove(0)
}

pub fn arg_texts(call: &MacroCall) -> Vec<&str> {
    call.arguments().iter().map(Argument::text).collect()
}

/// `(line, column)` of every argument of `call`.
pub fn arg_positions(call: &MacroCall) -> Vec<(usize, usize)> {
    call.arguments()
        .iter()
        .map(|a| (a.position().line(), a.position().column()))
        .collect()
}

/// Lint `input` with the built-in rules and render every diagnostic.
pub fn lint(input: &str) -> Vec<String> {
    let registry = Registry::builtin().expect("builtin rules compile");
    lint_source("configure.ac", input, &registry)
        .expect("lint failed")
        .iter()
        .map(ToString::to_string)
        .collect()
}
