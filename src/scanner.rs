use std::fmt;

use tracing::{debug, trace};

use crate::ast::{Argument, MacroCall};
use crate::position::{Offset, Position};

/// Classifies a scan error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A structural `)` with no open parenthesis to close.
    UnbalancedParentheses,
    /// Input ended before the call's parentheses balanced.
    UnterminatedArgumentList { name: String },
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedParentheses => {
                write!(f, "unbalanced parentheses")
            }
            Self::UnterminatedArgumentList { name } => {
                write!(f, "unterminated macro call argument list for {name}")
            }
        }
    }
}

/// Error produced while scanning a configure script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line(), position.column())]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub position: Position,
}

/// Knobs for a single scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Shift added to every recorded position.
    pub origin: Offset,
    /// Treat an unmatched `)` outside any macro call as plain text
    /// instead of an unbalanced parenthesis. Shell `case` patterns at the
    /// top level of a script need this.
    pub allow_stray_close: bool,
}

/// Scan a configure script for macro calls with default options.
///
/// # Errors
///
/// Returns `ScanError` when a call's argument list never closes or a
/// closing parenthesis has nothing to close.
pub fn scan_calls(input: &str) -> Result<Vec<MacroCall>, ScanError> {
    scan_calls_with(input, &ScanOptions::default())
}

/// Scan a configure script for macro calls.
///
/// Lines starting with `#` or `dnl` are skipped. Calls are returned in
/// source order; argument text is not scanned for nested calls.
///
/// # Errors
///
/// See [`scan_calls`].
pub fn scan_calls_with(input: &str, options: &ScanOptions) -> Result<Vec<MacroCall>, ScanError> {
    Scanner::new(input, options).scan()
}

const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch == '_'
}

fn is_comment_line(line: &[char]) -> bool {
    line.starts_with(&['#']) || line.starts_with(&['d', 'n', 'l'])
}

/// Name-scanning state between characters.
#[derive(Default)]
enum NameState {
    #[default]
    Idle,
    Name { start: Position, text: String },
}

/// Counters and buffers for one call's argument list.
struct ArgumentState {
    paren_depth: usize,
    quote_depth: isize,
    buffer: String,
    start: Option<Position>,
    arguments: Vec<Argument>,
}

impl ArgumentState {
    const fn new() -> Self {
        Self {
            paren_depth: 1,
            quote_depth: 0,
            buffer: String::new(),
            start: None,
            arguments: Vec::new(),
        }
    }

    fn push(&mut self, ch: char, at: Position) {
        if self.start.is_none() && !ch.is_whitespace() {
            self.start = Some(at);
        }
        self.buffer.push(ch);
    }

    /// Complete the pending argument. An all-whitespace argument is
    /// positioned at its terminator.
    fn flush(&mut self, terminator: Position) {
        let position = self.start.take().unwrap_or(terminator);
        let text = self.buffer.trim_start().to_owned();
        self.buffer.clear();
        self.arguments.push(Argument::new(position, text));
    }

    /// `NAME()` has no arguments; anything else flushes a final one.
    fn finish(mut self, close: Position) -> Vec<Argument> {
        if !(self.arguments.is_empty() && self.buffer.is_empty()) {
            self.flush(close);
        }
        self.arguments
    }
}

struct Scanner {
    lines: Vec<Vec<char>>,
    origin: Offset,
    allow_stray_close: bool,
    line: usize,
    col: usize,
}

impl Scanner {
    fn new(input: &str, options: &ScanOptions) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            lines: input
                .split_inclusive('\n')
                .map(|line| line.chars().collect())
                .collect(),
            origin: options.origin,
            allow_stray_close: options.allow_stray_close,
            line: 0,
            col: 0,
        }
    }

    fn scan(mut self) -> Result<Vec<MacroCall>, ScanError> {
        let mut calls = Vec::new();
        let mut state = NameState::Idle;
        let mut open_parens = 0usize;

        while let Some(ch) = self.peek() {
            if self.col == 0 && is_comment_line(&self.lines[self.line]) {
                self.skip_line();
                continue;
            }

            let here = self.position();

            if is_name_char(ch) {
                match &mut state {
                    NameState::Name { text, .. } => text.push(ch),
                    NameState::Idle => {
                        state = NameState::Name {
                            start: here,
                            text: String::from(ch),
                        };
                    }
                }
                self.advance();
                continue;
            }

            if let NameState::Name { start, text } = std::mem::take(&mut state) {
                if ch == '(' {
                    self.advance(); // skip (
                    let arguments = self.scan_arguments(&text, start)?;
                    calls.push(MacroCall::new(text, start, arguments));
                    continue;
                }
                if ch.is_ascii_lowercase() {
                    trace!(macro_name = %text, %start, "not a macro name, discarding");
                } else {
                    calls.push(MacroCall::new(text, start, Vec::new()));
                }
            }

            // Parens reaching here belong to shell text, not to a call.
            match ch {
                '(' => open_parens += 1,
                ')' if open_parens > 0 => open_parens -= 1,
                ')' if !self.allow_stray_close => {
                    return Err(ScanError {
                        kind: ScanErrorKind::UnbalancedParentheses,
                        position: here,
                    });
                }
                _ => {}
            }

            self.advance();
        }

        if let NameState::Name { start, text } = state {
            trace!(macro_name = %text, %start, "identifier at end of input, dropping");
        }

        debug!(calls = calls.len(), "scanned macro calls");
        Ok(calls)
    }

    /// Scan an argument list. The cursor sits just after the call's `(`
    /// and is left just after the matching `)`.
    fn scan_arguments(&mut self, name: &str, start: Position) -> Result<Vec<Argument>, ScanError> {
        let mut args = ArgumentState::new();

        while let Some(ch) = self.peek() {
            let here = self.position();

            match ch {
                '[' => {
                    args.quote_depth += 1;
                    args.push(ch, here);
                }
                ']' => {
                    args.quote_depth -= 1;
                    args.push(ch, here);
                }
                '(' => {
                    // parens inside quotes are literal
                    if args.quote_depth == 0 {
                        args.paren_depth += 1;
                    }
                    args.push(ch, here);
                }
                ')' if args.quote_depth > 0 => args.push(ch, here),
                ')' => {
                    if args.paren_depth == 0 {
                        return Err(ScanError {
                            kind: ScanErrorKind::UnbalancedParentheses,
                            position: here,
                        });
                    }
                    args.paren_depth -= 1;
                    if args.paren_depth == 0 {
                        self.advance(); // skip )
                        let arguments = args.finish(here);
                        trace!(
                            macro_name = name,
                            arguments = arguments.len(),
                            "scanned argument list"
                        );
                        return Ok(arguments);
                    }
                    args.push(ch, here);
                }
                ',' if args.quote_depth == 0 && args.paren_depth == 1 => args.flush(here),
                _ => args.push(ch, here),
            }

            self.advance();
        }

        Err(ScanError {
            kind: ScanErrorKind::UnterminatedArgumentList {
                name: name.to_owned(),
            },
            position: start,
        })
    }

    const fn position(&self) -> Position {
        Position::from_index(self.origin, self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.lines.get(self.line)?.get(self.col).copied()
    }

    fn advance(&mut self) {
        if let Some(line) = self.lines.get(self.line) {
            self.col += 1;
            if self.col >= line.len() {
                self.line += 1;
                self.col = 0;
            }
        }
    }

    const fn skip_line(&mut self) {
        self.line += 1;
        self.col = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(calls: &[MacroCall]) -> Vec<&str> {
        calls.iter().map(MacroCall::name).collect()
    }

    fn texts(call: &MacroCall) -> Vec<&str> {
        call.arguments().iter().map(Argument::text).collect()
    }

    #[test]
    fn simple_call() {
        let calls = scan_calls("AC_INIT([pkg], [1.0])\n").expect("should scan");
        assert_eq!(names(&calls), ["AC_INIT"]);
        assert_eq!(texts(&calls[0]), ["[pkg]", "[1.0]"]);
    }

    #[test]
    fn bare_call_on_its_own_line() {
        let calls = scan_calls("AC_PROG_CC\nAC_OUTPUT\n").expect("should scan");
        assert_eq!(names(&calls), ["AC_PROG_CC", "AC_OUTPUT"]);
        assert!(calls.iter().all(|c| c.arguments().is_empty()));
    }

    #[test]
    fn bare_call_followed_by_call_on_same_line() {
        let calls = scan_calls("AC_PROG_CC AC_FOO([x])\n").expect("should scan");
        assert_eq!(names(&calls), ["AC_PROG_CC", "AC_FOO"]);
    }

    #[test]
    fn lowercase_after_uppercase_is_not_a_call() {
        let calls = scan_calls("echo Hello world\n").expect("should scan");
        assert!(calls.is_empty());
    }

    #[test]
    fn uppercase_run_inside_word_is_a_call_start() {
        let calls = scan_calls("fooBAR(x)\n").expect("should scan");
        assert_eq!(names(&calls), ["BAR"]);
    }

    #[test]
    fn trailing_identifier_at_eof_is_dropped() {
        let calls = scan_calls("AC_INIT([x])\nAC_OUTPUT").expect("should scan");
        assert_eq!(names(&calls), ["AC_INIT"]);
    }

    #[test]
    fn paren_without_name_is_text() {
        let calls = scan_calls("test -d (sub\n").expect("should scan");
        assert!(calls.is_empty());
    }

    #[test]
    fn stray_close_rejected_by_default() {
        let err = scan_calls("  *linux*)\n").unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::UnbalancedParentheses);
        assert_eq!(err.position.column(), 10);
    }

    #[test]
    fn stray_close_allowed_when_configured() {
        let options = ScanOptions {
            allow_stray_close: true,
            ..ScanOptions::default()
        };
        let calls = scan_calls_with("case $host in\n  *linux*) AC_FOO([x]) ;;\nesac\n", &options)
            .expect("should scan");
        assert_eq!(names(&calls), ["AC_FOO"]);
    }

    #[test]
    fn origin_shifts_positions() {
        let options = ScanOptions {
            origin: Offset::new(4, 2),
            ..ScanOptions::default()
        };
        let calls = scan_calls_with("AC_FOO(x)", &options).expect("should scan");
        assert_eq!(calls[0].position().line(), 5);
        assert_eq!(calls[0].position().column(), 3);
        assert_eq!(calls[0].arguments()[0].position().column(), 10);
    }

    #[test]
    fn bom_is_skipped() {
        let calls = scan_calls("\u{FEFF}AC_FOO(x)\n").expect("should scan");
        assert_eq!(calls[0].position().column(), 1);
    }

    #[test]
    fn scanning_resumes_after_multiline_call() {
        let input = "AC_FOO([a],\n  [b]) AC_BAR\n";
        let calls = scan_calls(input).expect("should scan");
        assert_eq!(names(&calls), ["AC_FOO", "AC_BAR"]);
        assert_eq!(calls[1].position().line(), 2);
        assert_eq!(calls[1].position().column(), 8);
    }

    #[test]
    fn nested_call_text_is_opaque() {
        let calls = scan_calls("AC_FOO([AC_BAR([x])])\n").expect("should scan");
        assert_eq!(names(&calls), ["AC_FOO"]);
        assert_eq!(texts(&calls[0]), ["[AC_BAR([x])]"]);
    }

    #[test]
    fn negative_quote_depth_disables_separators() {
        let calls = scan_calls("AC_FOO(a],b)\n").expect("should scan");
        assert_eq!(texts(&calls[0]), ["a],b"]);
    }

    #[test]
    fn error_display_includes_location() {
        let err = scan_calls("\nAC_FOO([x],\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unterminated macro call argument list for AC_FOO at line 2, column 1"
        );
    }
}
