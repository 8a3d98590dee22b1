//! Built-in rules.

use crate::ast::{Argument, MacroCall};
use crate::diagnostic::Diagnostic;
use crate::rules::{Context, Rule};

/// Every built-in rule, in the order they run.
pub fn builtin_rules() -> Result<Vec<Rule>, regex::Error> {
    Ok(vec![
        Rule::new("trailing-whitespace", &[".*"], trailing_whitespace)?,
        Rule::new("unquoted-args", &[".*"], unquoted_args)?,
        Rule::new("bad-aux-dir", &["^AC_CONFIG_AUX_DIR$"], bad_aux_dir)?,
        Rule::new("bad-macro-dir", &["^AC_CONFIG_MACRO_DIR$"], bad_macro_dir)?,
    ])
}

/// Argument `index` of `call`, reporting it as missing when absent.
pub fn macro_argument<'a>(
    call: &'a MacroCall,
    index: usize,
    ctx: &Context,
    out: &mut Vec<Diagnostic>,
) -> Option<&'a Argument> {
    let arg = call.argument(index);
    if arg.is_none() {
        out.push(Diagnostic::at(
            ctx.configure_file(),
            call.position(),
            format!("Missing argument {}.", index + 1),
        ));
    }
    arg
}

/// Whether `text` is wrapped in M4 quotes, ignoring trailing whitespace.
fn is_quoted(text: &str) -> bool {
    let text = text.trim_end();
    text.len() >= 2 && text.starts_with('[') && text.ends_with(']')
}

/// M4 keeps trailing whitespace of an argument, which is rarely wanted.
pub fn trailing_whitespace(calls: &[&MacroCall], ctx: &Context, out: &mut Vec<Diagnostic>) {
    for call in calls {
        for (i, arg) in call.arguments().iter().enumerate() {
            if arg.text().trim_end() != arg.text() {
                out.push(Diagnostic::at(
                    ctx.configure_file(),
                    arg.position(),
                    format!(
                        "Argument {} has trailing whitespace. \
                         Trailing whitespace is preserved in M4.",
                        i + 1
                    ),
                ));
            }
        }
    }
}

/// Unquoted arguments get expanded, which is a common source of bugs.
pub fn unquoted_args(calls: &[&MacroCall], ctx: &Context, out: &mut Vec<Diagnostic>) {
    for call in calls {
        for (i, arg) in call.arguments().iter().enumerate() {
            if arg.text().trim_end().is_empty() || is_quoted(arg.text()) {
                continue;
            }
            out.push(Diagnostic::at(
                ctx.configure_file(),
                arg.position(),
                format!(
                    "Argument {} is unquoted. Consider quoting to prevent errors.",
                    i + 1
                ),
            ));
        }
    }
}

fn expect_first_argument(
    calls: &[&MacroCall],
    expected: &str,
    ctx: &Context,
    out: &mut Vec<Diagnostic>,
) {
    for call in calls {
        let Some(arg) = macro_argument(call, 0, ctx, out) else {
            continue;
        };
        if arg.text().is_empty() {
            continue;
        }
        if arg.unquoted() != expected {
            out.push(Diagnostic::at(
                ctx.configure_file(),
                call.position(),
                format!("Argument 1 should be [{expected}]."),
            ));
        }
    }
}

/// `AC_CONFIG_AUX_DIR` should point at `build-aux`.
pub fn bad_aux_dir(calls: &[&MacroCall], ctx: &Context, out: &mut Vec<Diagnostic>) {
    expect_first_argument(calls, "build-aux", ctx, out);
}

/// `AC_CONFIG_MACRO_DIR` should point at `m4`.
pub fn bad_macro_dir(calls: &[&MacroCall], ctx: &Context, out: &mut Vec<Diagnostic>) {
    expect_first_argument(calls, "m4", ctx, out);
}
