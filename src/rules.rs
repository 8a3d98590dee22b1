//! Rule registry: name-targeted checks over scanned macro calls.
//!
//! Each [`Rule`] selects the calls it inspects with a regular expression
//! matched against the start of the macro name, then reports
//! [`Diagnostic`]s. Rules only read calls; they never change them.
//!
//! ```
//! use atlint::{Context, Registry, parse_configure};
//!
//! let calls = parse_configure("AC_CONFIG_AUX_DIR([aux])\n").unwrap();
//! let registry = Registry::builtin().unwrap();
//! let diags = registry.run(&calls, &Context::new("configure.ac"));
//! assert_eq!(diags.len(), 1);
//! assert_eq!(
//!     diags[0].to_string(),
//!     "configure.ac:1:1: Argument 1 should be [build-aux]."
//! );
//! ```

use regex::Regex;
use tracing::debug;

use crate::ast::MacroCall;
use crate::checks;
use crate::diagnostic::Diagnostic;
use crate::Error;

/// Read-only data shared by every rule of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    configure_file: String,
}

impl Context {
    #[must_use]
    pub fn new(configure_file: impl Into<String>) -> Self {
        Self {
            configure_file: configure_file.into(),
        }
    }

    /// File name used when reporting diagnostics.
    #[must_use]
    pub fn configure_file(&self) -> &str {
        &self.configure_file
    }
}

/// Signature of a rule body.
pub type Check = fn(&[&MacroCall], &Context, &mut Vec<Diagnostic>);

/// A named check and the macro names it applies to.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    targets: Regex,
    check: Check,
}

impl Rule {
    /// Build a rule targeting macro names matched by any of `patterns`.
    ///
    /// Patterns are anchored at the start of the name only, so `AC_`
    /// targets every `AC_*` macro and `^AC_INIT$` exactly one.
    pub fn new(name: &'static str, patterns: &[&str], check: Check) -> Result<Self, regex::Error> {
        let targets = Regex::new(&format!("^(?:{})", patterns.join("|")))?;
        Ok(Self {
            name,
            targets,
            check,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this rule inspects calls named `macro_name`.
    #[must_use]
    pub fn applies_to(&self, macro_name: &str) -> bool {
        self.targets.is_match(macro_name)
    }

    /// Run the rule over the calls it targets.
    #[must_use]
    pub fn run(&self, calls: &[MacroCall], ctx: &Context) -> Vec<Diagnostic> {
        let targeted: Vec<&MacroCall> = calls
            .iter()
            .filter(|call| self.applies_to(call.name()))
            .collect();
        let mut out = Vec::new();
        (self.check)(&targeted, ctx, &mut out);
        debug!(
            rule = self.name,
            calls = targeted.len(),
            diagnostics = out.len(),
            "rule finished"
        );
        out
    }
}

/// Ordered collection of rules.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: Vec<Rule>,
}

impl Registry {
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry holding every built-in rule.
    pub fn builtin() -> Result<Self, regex::Error> {
        Ok(Self {
            rules: checks::builtin_rules()?,
        })
    }

    /// Append a rule; rules run in registration order.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Keep only the rules named in `names`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownRule` for the first name that matches no
    /// registered rule.
    pub fn only<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self, Error> {
        if let Some(unknown) = names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| !self.rules.iter().any(|rule| rule.name == *name))
        {
            return Err(Error::UnknownRule(unknown.to_owned()));
        }
        self.rules
            .retain(|rule| names.iter().any(|name| name.as_ref() == rule.name));
        Ok(self)
    }

    /// Run every rule and collect the diagnostics in rule order.
    #[must_use]
    pub fn run(&self, calls: &[MacroCall], ctx: &Context) -> Vec<Diagnostic> {
        self.rules
            .iter()
            .flat_map(|rule| rule.run(calls, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_calls;

    fn flag_each(calls: &[&MacroCall], ctx: &Context, out: &mut Vec<Diagnostic>) {
        for call in calls {
            out.push(Diagnostic::at(
                ctx.configure_file(),
                call.position(),
                call.name(),
            ));
        }
    }

    #[test]
    fn targets_are_prefix_matches() {
        let rule = Rule::new("ac", &["AC_"], flag_each).expect("valid pattern");
        assert!(rule.applies_to("AC_INIT"));
        assert!(!rule.applies_to("AM_AC_INIT"));
    }

    #[test]
    fn exact_targets() {
        let rule = Rule::new("init", &["^AC_INIT$"], flag_each).expect("valid pattern");
        assert!(rule.applies_to("AC_INIT"));
        assert!(!rule.applies_to("AC_INIT_X"));
    }

    #[test]
    fn alternation_of_patterns() {
        let rule = Rule::new("dirs", &["AC_CONFIG_AUX_DIR$", "AC_CONFIG_MACRO_DIR$"], flag_each)
            .expect("valid pattern");
        assert!(rule.applies_to("AC_CONFIG_AUX_DIR"));
        assert!(rule.applies_to("AC_CONFIG_MACRO_DIR"));
        assert!(!rule.applies_to("AC_CONFIG_SRCDIR"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(Rule::new("bad", &["AC_("], flag_each).is_err());
    }

    #[test]
    fn run_only_sees_targeted_calls() {
        let calls = scan_calls("AC_INIT([x])\nAM_INIT_AUTOMAKE\n").expect("should scan");
        let registry = Registry::new().rule(Rule::new("am", &["AM_"], flag_each).expect("valid"));
        let diags = registry.run(&calls, &Context::new("configure.ac"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "AM_INIT_AUTOMAKE");
    }

    #[test]
    fn only_rejects_unknown_names() {
        let registry = Registry::builtin().expect("builtin rules compile");
        let err = registry.only(&["no-such-rule"]).unwrap_err();
        assert!(matches!(err, Error::UnknownRule(name) if name == "no-such-rule"));
    }

    #[test]
    fn only_keeps_named_rules() {
        let registry = Registry::builtin()
            .expect("builtin rules compile")
            .only(&["bad-aux-dir"])
            .expect("known rule");
        let names: Vec<_> = registry.rules().iter().map(Rule::name).collect();
        assert_eq!(names, ["bad-aux-dir"]);
    }
}
