//! Ordered collection of checks.

use tracing::{debug, warn};

use crate::check::{Check, CheckBox};
use crate::context::RunContext;
use crate::report::{DiagnosticReport, Failure};

/// Runs checks in registration order.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<CheckBox>,
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl CheckRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    #[must_use]
    pub fn with<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds a boxed check.
    #[must_use]
    pub fn with_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds a boxed check in place.
    pub fn push(&mut self, check: CheckBox) {
        self.checks.push(check);
    }

    /// Keeps only the checks for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&dyn Check) -> bool,
    {
        self.checks.retain(|check| keep(&**check));
    }

    /// Returns the registered checks.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|check| &**check)
    }

    /// Returns the names of the registered checks, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|check| check.name())
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if no checks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Returns true if, whenever a parse-providing check is registered, it
    /// comes before every AST check.
    #[must_use]
    pub fn parser_precedes_ast_checks(&self) -> bool {
        let Some(parser) = self.checks.iter().position(|c| c.provides_parse()) else {
            return true;
        };
        self.checks[..parser].iter().all(|c| !c.requires_ast())
    }

    /// Runs every check against `ctx` and merges the results.
    ///
    /// A check that returns an error is recorded as a [`Failure`]; the
    /// remaining checks still run.
    pub fn run(&self, ctx: &RunContext<'_>) -> DiagnosticReport {
        let mut report = DiagnosticReport::new();
        for check in &self.checks {
            match check.check(ctx) {
                Ok(found) => {
                    debug!(check = check.name(), diagnostics = found.len(), "Check finished");
                    report.merge(found);
                }
                Err(err) => {
                    warn!(check = check.name(), "Check failed: {err}");
                    report.add_failure(Failure::new(check.name(), None, err.to_string()));
                }
            }
        }
        report
    }
}

impl IntoIterator for CheckRegistry {
    type Item = CheckBox;
    type IntoIter = std::vec::IntoIter<CheckBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.into_iter()
    }
}

impl<'a> IntoIterator for &'a CheckRegistry {
    type Item = &'a CheckBox;
    type IntoIter = std::slice::Iter<'a, CheckBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.iter()
    }
}
