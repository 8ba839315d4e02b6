//! Schemas: rule chains with kind-specific builders
//!
//! Every schema kind owns a [`RuleChain`] seeded with a type-guard rule.
//! Builder methods consume and return the schema, so rules can only be
//! appended while building; once built, [`Schema::parse`] takes `&self` and
//! never mutates, which makes a schema safe to share across threads.
//!
//! # Example
//!
//! ```rust
//! use ouroboros_schema::{number, object, string, SchemaBuilder, Shape, Value};
//!
//! let user = object(
//!     Shape::new()
//!         .field("username", string().min(3))
//!         .field("age", number().min(18).optional()),
//! );
//!
//! let input = Value::object([("username", Value::from("jo"))]);
//! let errors = user.parse(&input).unwrap_err();
//! assert!(errors.at_key("username").is_some());
//! assert!(errors.at_key("age").is_none());
//! ```

mod array;
mod boolean;
mod number;
mod object;
mod string;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use number::{NumberBound, NumberSchema};
pub use object::{ObjectSchema, Shape};
pub use string::StringSchema;

use crate::chain::RuleChain;
use crate::errors::ValidationResult;
use crate::rule::{Rule, RuleOutcome};
use crate::types::Value;

// ============================================================================
// Factories
// ============================================================================

/// Create a string schema
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Create a number schema (integers and floats)
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// Create a boolean schema
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Create an object schema with the given shape
pub fn object(shape: Shape) -> ObjectSchema {
    ObjectSchema::new(shape)
}

/// Create an array schema whose items must match `item`
pub fn array(item: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(Some(item.into()))
}

/// Create an array schema without an item schema
pub fn array_any() -> ArraySchema {
    ArraySchema::new(None)
}

// ============================================================================
// Builder Trait
// ============================================================================

/// Builder methods shared by every schema kind
pub trait SchemaBuilder: Sized {
    /// The schema's own rule chain
    fn chain(&self) -> &RuleChain;

    /// Mutable access used by the builder methods
    fn chain_mut(&mut self) -> &mut RuleChain;

    /// Append a prepared rule
    fn rule(mut self, rule: Rule) -> Self {
        self.chain_mut().push(rule);
        self
    }

    /// Append a rule over the raw value
    fn add_rule<F, R>(
        self,
        code: impl Into<String>,
        predicate: F,
        message: impl Into<String>,
    ) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        self.rule(Rule::value(code, message, predicate))
    }

    /// Append a `custom` rule; the predicate may return `bool` or [`RuleOutcome`]
    fn custom<F, R>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<RuleOutcome>,
    {
        self.rule(Rule::custom(predicate, message))
    }

    /// Replace the message of the most recently added rule
    fn message(mut self, message: impl Into<String>) -> Self {
        self.chain_mut().set_last_message(message.into());
        self
    }

    /// Accept an absent value (`Null` or a missing key) without running any rule
    fn optional(mut self) -> Self {
        self.chain_mut().set_optional();
        self
    }

    fn is_optional(&self) -> bool {
        self.chain().is_optional()
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Any schema kind
#[derive(Debug, Clone)]
pub enum Schema {
    String(StringSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
}

impl Schema {
    /// Validate `value`, returning the validated data or the error tree
    pub fn parse(&self, value: &Value) -> ValidationResult<Value> {
        let result = self.validate(value);
        log_failure(self.kind_name(), &result);
        result
    }

    /// Validate without logging; containers use this for their children
    pub(crate) fn validate(&self, value: &Value) -> ValidationResult<Value> {
        match self {
            Self::String(s) => s.validate(value),
            Self::Number(s) => s.validate(value),
            Self::Boolean(s) => s.validate(value),
            Self::Object(s) => s.validate(value),
            Self::Array(s) => s.validate(value),
        }
    }

    /// The schema's own rule chain
    pub fn chain(&self) -> &RuleChain {
        match self {
            Self::String(s) => s.chain(),
            Self::Number(s) => s.chain(),
            Self::Boolean(s) => s.chain(),
            Self::Object(s) => s.chain(),
            Self::Array(s) => s.chain(),
        }
    }

    pub fn is_optional(&self) -> bool {
        self.chain().is_optional()
    }

    /// Get human-readable kind name
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Self::String(schema)
    }
}

impl From<NumberSchema> for Schema {
    fn from(schema: NumberSchema) -> Self {
        Self::Number(schema)
    }
}

impl From<BooleanSchema> for Schema {
    fn from(schema: BooleanSchema) -> Self {
        Self::Boolean(schema)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Self::Object(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Self::Array(schema)
    }
}

/// Report a failed top-level parse
fn log_failure(kind: &'static str, result: &ValidationResult<Value>) {
    if let Err(errors) = result {
        tracing::debug!(
            schema = kind,
            errors = errors.len(),
            "Schema validation failed"
        );
    }
}

/// Run a primitive chain and echo the value back on success
fn parse_primitive(chain: &RuleChain, value: &Value) -> ValidationResult<Value> {
    chain.evaluate(value).map(|()| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_schema_is_send_sync() {
        assert_send_sync::<Schema>();
        assert_send_sync::<ObjectSchema>();
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Schema::from(string()).kind_name(), "string");
        assert_eq!(Schema::from(number()).kind_name(), "number");
        assert_eq!(Schema::from(boolean()).kind_name(), "boolean");
        assert_eq!(Schema::from(object(Shape::new())).kind_name(), "object");
        assert_eq!(Schema::from(array_any()).kind_name(), "array");
    }

    #[test]
    fn test_every_kind_starts_with_type_guard() {
        let codes: Vec<String> = [
            Schema::from(string()),
            Schema::from(number()),
            Schema::from(boolean()),
            Schema::from(object(Shape::new())),
            Schema::from(array_any()),
        ]
        .iter()
        .map(|s| s.chain().rules()[0].code().to_string())
        .collect();
        assert_eq!(
            codes,
            vec!["string", "number", "boolean", "object", "array"]
        );
    }

    #[test]
    fn test_custom_accepts_bool_and_outcome() {
        let by_bool = string().custom(
            |v: &Value| v.as_str() == Some("yes"),
            "must be yes",
        );
        let errors = by_bool.parse(&Value::from("no")).unwrap_err();
        assert_eq!(errors.codes(), vec!["custom"]);
        assert_eq!(errors.flatten()[0].message, "must be yes");

        let by_outcome = number().custom(
            |v: &Value| match v.as_f64() {
                Some(n) if n > 100.0 => RuleOutcome::reason(format!("{} is too large", n)),
                _ => RuleOutcome::Valid,
            },
            "Custom validation failed",
        );
        let errors = by_outcome.parse(&Value::Int(150)).unwrap_err();
        assert_eq!(errors.flatten()[0].message, "150 is too large");
        assert!(by_outcome.parse(&Value::Int(50)).is_ok());
    }

    #[test]
    fn test_add_rule_with_message_override() {
        fn is_slug(v: &Value) -> bool {
            v.as_str().map_or(false, |s| {
                s.chars().all(|c| c.is_ascii_lowercase() || c == '-')
            })
        }

        let schema = string()
            .add_rule("string.slug", is_slug, "Invalid slug")
            .message("Slug may only contain a-z and '-'");

        let errors = schema.parse(&Value::from("Not A Slug")).unwrap_err();
        let issue = &errors.flatten()[0];
        assert_eq!(issue.code, "string.slug");
        assert_eq!(issue.message, "Slug may only contain a-z and '-'");
    }
}
