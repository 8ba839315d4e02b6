//! Ouroboros Schema
//!
//! Declarative rule-chain validation for the Ouroboros framework.
//!
//! A schema is an ordered chain of named rules built with chained calls.
//! Parsing runs every rule, so one call reports every failure at once, and
//! object/array schemas nest their children's failures under the offending
//! key or index.
//!
//! # Modules
//!
//! - [`schema`]: string, number, boolean, object and array builders
//! - [`rule`] / [`chain`]: rules, rule outcomes and the evaluation loop
//! - [`errors`]: the error tree and construction faults
//! - [`formats`]: shared format predicates (email, phone, password, ...)
//! - [`compat`]: legacy free-function validators returning a [`RuleOutcome`]
//! - [`otp`]: one-time password generation
//!
//! # Features
//!
//! - **Default**: Core validation without serialization
//! - **serde**: `serde_json` conversions for [`Value`] and serializable error reports
//!
//! # Example
//!
//! ```rust
//! use ouroboros_schema::{array, number, object, string, Shape, Value};
//!
//! let schema = object(
//!     Shape::new()
//!         .field("email", string().email())
//!         .field("tags", array(string().min(2)).unique()),
//! );
//!
//! let input = Value::object([
//!     ("email", Value::from("user@example.com")),
//!     ("tags", Value::List(vec![Value::from("rust"), Value::from("x")])),
//! ]);
//!
//! let errors = schema.parse(&input).unwrap_err();
//! let issues = errors.flatten();
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].path, "tags[1]");
//! assert_eq!(issues[0].code, "string.min");
//!
//! // Construction mistakes are reported separately from data errors
//! assert!(number().range(10, 1).is_err());
//! ```

// Public modules
pub mod chain;
pub mod compat;
pub mod config;
pub mod errors;
pub mod formats;
pub mod otp;
pub mod rule;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use chain::RuleChain;
pub use config::ExtraFields;
pub use errors::{
    ErrorType, Location, SchemaError, ValidationContext, ValidationError, ValidationErrors,
    ValidationIssue, ValidationResult,
};
pub use otp::{OtpGenerator, OtpKind};
pub use rule::{Check, Rule, RuleOutcome};
pub use schema::{
    array, array_any, boolean, number, object, string, ArraySchema, BooleanSchema, NumberBound,
    NumberSchema, ObjectSchema, Schema, SchemaBuilder, Shape, StringSchema,
};
pub use types::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
