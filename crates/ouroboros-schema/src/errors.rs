//! Validation error types
//!
//! Evaluation failures are values ([`ValidationErrors`]), shaped as a tree that
//! mirrors the schema graph. Programmer mistakes made while *building* a schema
//! are reported separately through [`SchemaError`].

use std::fmt;
use thiserror::Error;

// ============================================================================
// Validation Result
// ============================================================================

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationErrors>;

// ============================================================================
// Validation Errors Collection
// ============================================================================

/// Ordered collection of validation errors
///
/// Rule failures appear in rule-registration order. Container schemas add one
/// [`ValidationError::Nested`] entry per failing key or index.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors {
    /// List of individual validation errors
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of top-level errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another ValidationErrors into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Convert to Result - Ok if no errors, Err if there are errors
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Get errors as a slice
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Codes of the top-level rule failures, in order
    pub fn codes(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::Rule { code, .. } => Some(code.as_str()),
                ValidationError::Nested { .. } => None,
            })
            .collect()
    }

    /// Nested errors reported for an object key
    pub fn at_key(&self, key: &str) -> Option<&ValidationErrors> {
        self.errors.iter().find_map(|e| match e {
            ValidationError::Nested {
                location: Location::Key(k),
                errors,
            } if k == key => Some(errors),
            _ => None,
        })
    }

    /// Nested errors reported for an array index
    pub fn at_index(&self, index: usize) -> Option<&ValidationErrors> {
        self.errors.iter().find_map(|e| match e {
            ValidationError::Nested {
                location: Location::Index(i),
                errors,
            } if *i == index => Some(errors),
            _ => None,
        })
    }

    /// Flatten the error tree into field-level issues with dotted paths
    /// (e.g. `address.city`, `tags[1]`)
    pub fn flatten(&self) -> Vec<ValidationIssue> {
        let mut ctx = ValidationContext::new();
        let mut issues = Vec::new();
        collect_issues(self, &mut ctx, &mut issues);
        issues
    }
}

fn collect_issues(
    errors: &ValidationErrors,
    ctx: &mut ValidationContext,
    issues: &mut Vec<ValidationIssue>,
) {
    for error in &errors.errors {
        match error {
            ValidationError::Rule {
                code,
                message,
                error_type,
            } => issues.push(ValidationIssue {
                path: ctx.current_path(),
                code: code.clone(),
                message: message.clone(),
                error_type: *error_type,
            }),
            ValidationError::Nested { location, errors } => {
                ctx.push(location.clone());
                collect_issues(errors, ctx, issues);
                ctx.pop();
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Single Validation Error
// ============================================================================

/// One entry of the error tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ValidationError {
    /// A rule in the chain rejected the value
    Rule {
        /// Rule code (e.g. "string.min")
        code: String,
        /// Human-readable error message
        message: String,
        /// Error type classification
        error_type: ErrorType,
    },
    /// A child of a container schema failed
    Nested {
        /// Object key or array index of the failing child
        #[cfg_attr(feature = "serde", serde(flatten))]
        location: Location,
        /// The child's own errors
        errors: ValidationErrors,
    },
}

impl ValidationError {
    /// Create a rule failure
    pub fn rule(
        code: impl Into<String>,
        message: impl Into<String>,
        error_type: ErrorType,
    ) -> Self {
        Self::Rule {
            code: code.into(),
            message: message.into(),
            error_type,
        }
    }

    /// Wrap a child's errors under an object key
    pub fn at_key(key: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::Nested {
            location: Location::Key(key.into()),
            errors,
        }
    }

    /// Wrap a child's errors under an array index
    pub fn at_index(index: usize, errors: ValidationErrors) -> Self {
        Self::Nested {
            location: Location::Index(index),
            errors,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule {
                code,
                message,
                error_type,
            } => write!(f, "{} [{}: {}]", message, code, error_type),
            Self::Nested { location, errors } => write!(f, "{}: {}", location, errors),
        }
    }
}

/// Position of a nested error inside its container
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Location {
    /// Object property
    #[cfg_attr(feature = "serde", serde(rename = "path"))]
    Key(String),
    /// Array element
    Index(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{}", key),
            Self::Index(index) => write!(f, "[{}]", index),
        }
    }
}

// ============================================================================
// Error Type Classification
// ============================================================================

/// Classification of validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorType {
    /// Type mismatch error (e.g., expected string, got integer)
    TypeError,

    /// Value constraint violation (e.g., string too long, number out of range)
    #[default]
    ValueError,

    /// Required key missing
    Missing,

    /// Extra key not allowed
    ExtraForbidden,

    /// Invalid format (e.g., invalid email, malformed URL)
    FormatError,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeError => write!(f, "type_error"),
            Self::ValueError => write!(f, "value_error"),
            Self::Missing => write!(f, "missing"),
            Self::ExtraForbidden => write!(f, "extra_forbidden"),
            Self::FormatError => write!(f, "format_error"),
        }
    }
}

// ============================================================================
// Flattened Issues
// ============================================================================

/// A single rule failure with its full path from the root value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationIssue {
    /// Path to the failing value ("" for the root)
    pub path: String,
    /// Rule code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error type classification
    pub error_type: ErrorType,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} [{}]", self.message, self.code)
        } else {
            write!(f, "{}: {} [{}]", self.path, self.message, self.code)
        }
    }
}

// ============================================================================
// Validation Context
// ============================================================================

/// Tracks the current location while walking a nested error tree
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    path: Vec<Location>,
}

impl ValidationContext {
    /// Create a new validation context
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a key or index onto the path
    pub fn push(&mut self, location: Location) {
        self.path.push(location);
    }

    /// Pop the last path segment
    pub fn pop(&mut self) {
        self.path.pop();
    }

    /// Depth of the current path
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Get the current path as a string (e.g., "users[2].address.city")
    pub fn current_path(&self) -> String {
        let mut out = String::new();
        for location in &self.path {
            match location {
                Location::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Location::Index(index) => {
                    out.push_str(&format!("[{}]", index));
                }
            }
        }
        out
    }
}

// ============================================================================
// Construction Faults
// ============================================================================

/// Error raised while building a schema (programmer error, not data error)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{name} must be a positive number (got {value})")]
    NonPositiveLimit { name: &'static str, value: f64 },

    #[error("Invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unsupported OTP type '{0}' (expected one of: mixed, numeric, alphabetic)")]
    UnsupportedOtpKind(String),

    #[error("OTP length must be a positive integer")]
    InvalidOtpLength,
}

/// Fail with [`SchemaError::NonPositiveLimit`] unless `value > 0`
pub(crate) fn ensure_positive(name: &'static str, value: usize) -> Result<(), SchemaError> {
    if value == 0 {
        tracing::debug!(limit = name, "Rejected non-positive schema limit");
        return Err(SchemaError::NonPositiveLimit { name, value: 0.0 });
    }
    Ok(())
}
