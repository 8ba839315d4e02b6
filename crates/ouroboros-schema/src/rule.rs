//! Rules: named predicates with a default failure message
//!
//! A [`Rule`] pairs a code (e.g. `"string.min"`) with a typed [`Check`]. Typed
//! checks only run when the value holds the matching [`Value`] variant, so a
//! string rule never sees a number: the kind's type-guard rule reports the
//! mismatch and the dependent rules are skipped.

use crate::errors::ErrorType;
use crate::types::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Rule Outcome
// ============================================================================

/// Result of running one rule against one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The value satisfies the rule
    Valid,
    /// The value violates the rule; `reason` replaces the rule's message
    Invalid { reason: Option<String> },
    /// The value violates the rule; reported as `"{message}: {detail}"`
    InvalidDetail { detail: String },
}

impl RuleOutcome {
    /// Failure that falls back to the rule's message
    pub fn invalid() -> Self {
        Self::Invalid { reason: None }
    }

    /// Failure with an explicit reason
    pub fn reason(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: Some(reason.into()),
        }
    }

    /// Failure with a detail appended to the rule's message
    pub fn detail(detail: impl Into<String>) -> Self {
        Self::InvalidDetail {
            detail: detail.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Resolve the user-facing message for a failure (None when valid)
    pub fn message(&self, default_message: &str) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { reason: Some(r) } => Some(r.clone()),
            Self::Invalid { reason: None } => Some(default_message.to_string()),
            Self::InvalidDetail { detail } => Some(format!("{}: {}", default_message, detail)),
        }
    }
}

impl From<bool> for RuleOutcome {
    fn from(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::invalid()
        }
    }
}

// ============================================================================
// Typed Checks
// ============================================================================

type ValueFn = Arc<dyn Fn(&Value) -> RuleOutcome + Send + Sync>;
type StrFn = Arc<dyn Fn(&str) -> RuleOutcome + Send + Sync>;
type NumberFn = Arc<dyn Fn(f64) -> RuleOutcome + Send + Sync>;
type BoolFn = Arc<dyn Fn(bool) -> RuleOutcome + Send + Sync>;
type ListFn = Arc<dyn Fn(&[Value]) -> RuleOutcome + Send + Sync>;
type ObjectFn = Arc<dyn Fn(&[(String, Value)]) -> RuleOutcome + Send + Sync>;

/// Predicate body of a rule, typed by the value variant it inspects
#[derive(Clone)]
pub enum Check {
    /// Runs on any value (type guards, custom rules)
    Value(ValueFn),
    /// Runs on strings only
    Str(StrFn),
    /// Runs on numbers only (Int or non-NaN Float)
    Number(NumberFn),
    /// Runs on booleans only
    Bool(BoolFn),
    /// Runs on lists only
    List(ListFn),
    /// Runs on objects only
    Object(ObjectFn),
}

impl Check {
    /// Run the check; `None` means the value is not of the checked variant
    pub fn run(&self, value: &Value) -> Option<RuleOutcome> {
        match self {
            Self::Value(f) => Some(f(value)),
            Self::Str(f) => value.as_str().map(|s| f(s)),
            Self::Number(f) => value.as_f64().map(|n| f(n)),
            Self::Bool(f) => value.as_bool().map(|b| f(b)),
            Self::List(f) => value.as_list().map(|items| f(items)),
            Self::Object(f) => value.as_object().map(|pairs| f(pairs)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Str(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::List(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check::<{}>", self.kind())
    }
}

// ============================================================================
// Rule
// ============================================================================

/// A named predicate plus its default failure message
///
/// Rules are immutable once pushed onto a chain; cloning shares the predicate.
#[derive(Debug, Clone)]
pub struct Rule {
    code: String,
    message: String,
    error_type: ErrorType,
    check: Check,
}

impl Rule {
    /// Create a rule from an explicit check
    pub fn new(code: impl Into<String>, message: impl Into<String>, check: Check) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            error_type: ErrorType::ValueError,
            check,
        }
    }

    /// Rule over any value
    pub fn value<F, R>(code: impl Into<String>, message: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::new(code, message, Check::Value(Arc::new(move |v| f(v).into())))
    }

    /// Rule over string values
    pub fn string<F, R>(code: impl Into<String>, message: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::new(code, message, Check::Str(Arc::new(move |s| f(s).into())))
    }

    /// Rule over numeric values
    pub fn number<F, R>(code: impl Into<String>, message: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::new(code, message, Check::Number(Arc::new(move |n| f(n).into())))
    }

    /// Rule over boolean values
    pub fn boolean<F, R>(code: impl Into<String>, message: impl Into<String>, f: F) -> Self
    where
        F: Fn(bool) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::new(code, message, Check::Bool(Arc::new(move |b| f(b).into())))
    }

    /// Rule over list values
    pub fn list<F, R>(code: impl Into<String>, message: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::new(
            code,
            message,
            Check::List(Arc::new(move |items| f(items).into())),
        )
    }

    /// Rule over object values
    pub fn object<F, R>(code: impl Into<String>, message: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[(String, Value)]) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::new(
            code,
            message,
            Check::Object(Arc::new(move |pairs| f(pairs).into())),
        )
    }

    /// Escape-hatch rule with code `"custom"`
    pub fn custom<F, R>(f: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        Self::value("custom", message, f)
    }

    /// Type guard: passes when `accepts` matches the value
    pub(crate) fn type_guard(
        code: &'static str,
        message: &'static str,
        accepts: fn(&Value) -> bool,
    ) -> Self {
        Self::value(code, message, move |v| accepts(v))
            .with_error_type(ErrorType::TypeError)
    }

    /// Set the error classification reported on failure
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = error_type;
        self
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = message;
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Default failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Run the rule. `None` means the rule does not apply to this value's type.
    pub fn apply(&self, value: &Value) -> Option<RuleOutcome> {
        self.check.run(value)
    }
}
