//! Ordered rule chains
//!
//! A [`RuleChain`] is the rule list every schema owns. Evaluation runs every
//! rule in insertion order and collects all failures; it never stops at the
//! first one.

use crate::errors::{ValidationError, ValidationErrors, ValidationResult};
use crate::rule::Rule;
use crate::types::Value;

/// Append-only list of rules plus the optional marker
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<Rule>,
    optional: bool,
}

impl RuleChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain seeded with a type-guard rule
    pub fn with_guard(guard: Rule) -> Self {
        Self {
            rules: vec![guard],
            optional: false,
        }
    }

    /// Append a rule
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Accept absent values without running any rule
    pub fn set_optional(&mut self) {
        self.optional = true;
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Override the message of the most recently added rule
    pub fn set_last_message(&mut self, message: String) {
        if let Some(rule) = self.rules.last_mut() {
            rule.set_message(message);
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether any rule carries `code`
    pub fn contains(&self, code: &str) -> bool {
        self.rules.iter().any(|rule| rule.code() == code)
    }

    /// Drop every rule carrying `code`
    pub fn remove(&mut self, code: &str) {
        self.rules.retain(|rule| rule.code() != code);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against `value`
    ///
    /// Optional chains accept `Null` immediately, bypassing even the type
    /// guard. Rules whose typed check does not apply to the value's variant
    /// are skipped.
    pub fn evaluate(&self, value: &Value) -> ValidationResult<()> {
        if self.optional && value.is_null() {
            tracing::trace!("Optional value absent, skipping rules");
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            let Some(outcome) = rule.apply(value) else {
                continue;
            };
            if let Some(message) = outcome.message(rule.message()) {
                tracing::trace!(code = rule.code(), "Rule failed");
                let error_type = rule.error_type();
                errors.add(ValidationError::rule(rule.code(), message, error_type));
            }
        }

        errors.into_result()
    }
}
