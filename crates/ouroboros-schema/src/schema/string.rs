//! String schema

use super::{log_failure, parse_primitive, SchemaBuilder};
use crate::chain::RuleChain;
use crate::errors::{ensure_positive, ErrorType, SchemaError, ValidationResult};
use crate::formats;
use crate::rule::{Rule, RuleOutcome};
use crate::types::Value;
use regex::Regex;

const PASSWORD_MESSAGE: &str = "Password must contain at least one uppercase letter, \
    one lowercase letter, one number, and one special character";

/// Schema for string values
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct StringSchema {
    chain: RuleChain,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            chain: RuleChain::with_guard(Rule::type_guard(
                "string",
                "Value must be a string",
                |v| v.as_str().is_some(),
            )),
        }
    }

    pub fn parse(&self, value: &Value) -> ValidationResult<Value> {
        let result = self.validate(value);
        log_failure("string", &result);
        result
    }

    pub(crate) fn validate(&self, value: &Value) -> ValidationResult<Value> {
        parse_primitive(&self.chain, value)
    }

    fn check<F>(self, code: &str, message: String, error_type: ErrorType, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::string(code, message, f).with_error_type(error_type))
    }

    // ========================================================================
    // Length
    // ========================================================================

    /// At least `length` characters
    pub fn min(self, length: usize) -> Self {
        self.check(
            "string.min",
            format!("String must be at least {} characters", length),
            ErrorType::ValueError,
            move |s| s.chars().count() >= length,
        )
    }

    /// At most `length` characters
    pub fn max(self, length: usize) -> Self {
        self.check(
            "string.max",
            format!("String must be at most {} characters", length),
            ErrorType::ValueError,
            move |s| s.chars().count() <= length,
        )
    }

    /// Exactly `length` characters
    pub fn length(self, length: usize) -> Self {
        self.check(
            "string.length",
            format!("String must be exactly {} characters", length),
            ErrorType::ValueError,
            move |s| s.chars().count() == length,
        )
    }

    /// At most `limit` characters; `limit` must be positive
    pub fn char_limit(self, limit: usize) -> Result<Self, SchemaError> {
        ensure_positive("Limit", limit)?;
        Ok(self.check(
            "string.char",
            "Input exceeds character limit".to_string(),
            ErrorType::ValueError,
            move |s| s.chars().count() <= limit,
        ))
    }

    pub fn non_empty(self) -> Self {
        self.check(
            "string.nonEmpty",
            "String must not be empty".to_string(),
            ErrorType::ValueError,
            |s| !s.is_empty(),
        )
    }

    // ========================================================================
    // Formats
    // ========================================================================

    pub fn email(self) -> Self {
        self.check(
            "string.email",
            "Invalid email format".to_string(),
            ErrorType::FormatError,
            formats::validate_email,
        )
    }

    /// Absolute URL with any scheme
    pub fn url(self) -> Self {
        self.check(
            "string.url",
            "Invalid URL format".to_string(),
            ErrorType::FormatError,
            formats::validate_url,
        )
    }

    pub fn phone(self) -> Self {
        self.check(
            "string.phone",
            "Invalid phone number format".to_string(),
            ErrorType::FormatError,
            formats::validate_phone,
        )
    }

    /// Must match `pattern`; an invalid pattern is a construction fault
    pub fn pattern(self, pattern: &str) -> Result<Self, SchemaError> {
        let re = Regex::new(pattern).map_err(|e| {
            tracing::debug!(pattern, "Rejected invalid regex pattern");
            SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(self.regex(re))
    }

    /// Must match an already compiled regex
    pub fn regex(self, re: Regex) -> Self {
        self.check(
            "string.pattern",
            "String does not match pattern".to_string(),
            ErrorType::FormatError,
            move |s| re.is_match(s),
        )
    }

    /// Password strength (see [`formats::password_issues`])
    pub fn password(self) -> Self {
        self.check(
            "string.password",
            PASSWORD_MESSAGE.to_string(),
            ErrorType::FormatError,
            formats::validate_password,
        )
    }

    /// Must equal `expected` exactly (e.g. password confirmation)
    pub fn equals(self, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        self.check(
            "string.match",
            "Values do not match".to_string(),
            ErrorType::ValueError,
            move |s| s == expected,
        )
    }

    // ========================================================================
    // Whitespace
    // ========================================================================

    pub fn no_whitespace(self) -> Self {
        self.check(
            "string.noWhitespace",
            "String must not contain whitespace".to_string(),
            ErrorType::ValueError,
            |s| !formats::has_whitespace(s),
        )
    }

    pub fn no_edge_whitespace(self) -> Self {
        self.check(
            "string.edgeSpace",
            "String must not have leading or trailing whitespace".to_string(),
            ErrorType::ValueError,
            |s| !formats::has_edge_whitespace(s),
        )
    }

    /// Not empty and not whitespace only
    pub fn not_blank(self) -> Self {
        self.check(
            "string.blank",
            "String must not be blank".to_string(),
            ErrorType::ValueError,
            |s| !formats::is_blank(s),
        )
    }

    // ========================================================================
    // Letter Case
    // ========================================================================

    pub fn first_upper(self) -> Self {
        self.rule(Rule::string(
            "string.firstUpper",
            "First letter must be uppercase",
            |s: &str| {
                if s.is_empty() {
                    RuleOutcome::reason("String cannot be empty")
                } else {
                    formats::is_first_upper(s).into()
                }
            },
        ))
    }

    pub fn lowercase(self) -> Self {
        self.check(
            "string.lowercase",
            "String must be lowercase".to_string(),
            ErrorType::ValueError,
            formats::is_lowercase,
        )
    }

    pub fn uppercase(self) -> Self {
        self.check(
            "string.uppercase",
            "String must be uppercase".to_string(),
            ErrorType::ValueError,
            formats::is_uppercase,
        )
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for StringSchema {
    fn chain(&self) -> &RuleChain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut RuleChain {
        &mut self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::string;

    fn codes(schema: &StringSchema, input: &str) -> Vec<String> {
        match schema.parse(&Value::from(input)) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.codes().into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_min_max_messages() {
        let schema = string().min(3).max(20);
        let errors = schema.parse(&Value::from("ab")).unwrap_err();
        let issues = errors.flatten();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "string.min");
        assert_eq!(issues[0].message, "String must be at least 3 characters");

        let valid = Value::from("validname");
        assert_eq!(schema.parse(&valid), Ok(valid.clone()));
    }

    #[test]
    fn test_length_counts_characters() {
        let schema = string().length(3);
        assert!(codes(&schema, "héé").is_empty());
        assert_eq!(codes(&schema, "hé"), vec!["string.length"]);
    }

    #[test]
    fn test_wrong_type_reports_only_guard() {
        let schema = string().min(3).email().no_whitespace();
        let errors = schema.parse(&Value::Int(42)).unwrap_err();
        assert_eq!(errors.codes(), vec!["string"]);
        assert_eq!(errors.flatten()[0].error_type, ErrorType::TypeError);
    }

    #[test]
    fn test_formats() {
        let schema = string().email();
        assert!(codes(&schema, "user@example.com").is_empty());
        assert_eq!(codes(&schema, "not-an-email"), vec!["string.email"]);

        let schema = string().url();
        assert!(codes(&schema, "https://example.com").is_empty());
        assert_eq!(codes(&schema, "example"), vec!["string.url"]);

        let schema = string().phone();
        assert!(codes(&schema, "+14155552671").is_empty());
        assert_eq!(codes(&schema, "phone"), vec!["string.phone"]);
    }

    #[test]
    fn test_pattern() {
        let schema = string().pattern(r"^\d{3}-\d{4}$").unwrap();
        assert!(codes(&schema, "123-4567").is_empty());
        assert_eq!(codes(&schema, "abc-defg"), vec!["string.pattern"]);

        let err = string().pattern("(unclosed").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_char_limit() {
        assert!(string().char_limit(0).is_err());
        let schema = string().char_limit(5).unwrap();
        assert!(codes(&schema, "hello").is_empty());
        assert_eq!(codes(&schema, "hello!"), vec!["string.char"]);
    }

    #[test]
    fn test_whitespace_rules() {
        let schema = string()
            .no_whitespace()
            .no_edge_whitespace()
            .not_blank()
            .non_empty();
        assert!(codes(&schema, "word").is_empty());
        assert_eq!(codes(&schema, "a b"), vec!["string.noWhitespace"]);
        assert_eq!(
            codes(&schema, " "),
            vec!["string.noWhitespace", "string.edgeSpace", "string.blank"]
        );
        assert_eq!(codes(&schema, ""), vec!["string.blank", "string.nonEmpty"]);
    }

    #[test]
    fn test_case_rules() {
        let schema = string().first_upper().uppercase();
        assert!(codes(&schema, "HELLO").is_empty());
        assert_eq!(
            codes(&schema, "hello"),
            vec!["string.firstUpper", "string.uppercase"]
        );

        let errors = string().first_upper().parse(&Value::from("")).unwrap_err();
        assert_eq!(errors.flatten()[0].message, "String cannot be empty");

        let lowercase = string().lowercase();
        assert!(codes(&lowercase, "hello").is_empty());
        assert_eq!(codes(&lowercase, "Hello"), vec!["string.lowercase"]);
    }

    #[test]
    fn test_password_and_equals() {
        let schema = string().min(8).password().equals("Password123!");
        assert!(codes(&schema, "Password123!").is_empty());
        assert_eq!(
            codes(&schema, "weak"),
            vec!["string.min", "string.password", "string.match"]
        );
    }
}
