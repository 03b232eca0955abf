//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules evaluated in sequence; candidates that tie
//! on every rule keep their input order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::DispatchingRule;
use crate::models::Job;

/// A composable rule engine for job selection.
///
/// Rules are applied in sequence: the next rule is consulted only when
/// the previous one ties.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::RuleEngine;
/// use cpu_schedule::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Priority)
///     .with_rule(rules::Sjf);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "SJF"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Stable in-place sort by precedence (dispatched first = index 0).
    pub fn sort<J: AsRef<Job>>(&self, items: &mut [J]) {
        items.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// Returns the index of the highest-precedence candidate.
    ///
    /// Among equally ranked candidates the first one (input order) wins.
    pub fn select_best<J: AsRef<Job>>(&self, jobs: &[J]) -> Option<usize> {
        (0..jobs.len()).reduce(|best, i| {
            if self.compare(jobs[i].as_ref(), jobs[best].as_ref()) == Ordering::Less {
                i
            } else {
                best
            }
        })
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(a).cmp(&rule.evaluate(b)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
