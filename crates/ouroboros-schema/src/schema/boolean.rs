//! Boolean schema

use super::{log_failure, parse_primitive, SchemaBuilder};
use crate::chain::RuleChain;
use crate::errors::ValidationResult;
use crate::rule::Rule;
use crate::types::Value;

/// Schema for boolean values
#[derive(Debug, Clone)]
pub struct BooleanSchema {
    chain: RuleChain,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            chain: RuleChain::with_guard(Rule::type_guard(
                "boolean",
                "Value must be a boolean",
                |v| v.as_bool().is_some(),
            )),
        }
    }

    pub fn parse(&self, value: &Value) -> ValidationResult<Value> {
        let result = self.validate(value);
        log_failure("boolean", &result);
        result
    }

    pub(crate) fn validate(&self, value: &Value) -> ValidationResult<Value> {
        parse_primitive(&self.chain, value)
    }

    /// Pin the value to `true`
    pub fn is_true(self) -> Self {
        self.rule(Rule::boolean("boolean.true", "Value must be true", |b| b))
    }

    /// Pin the value to `false`
    pub fn is_false(self) -> Self {
        self.rule(Rule::boolean(
            "boolean.false",
            "Value must be false",
            |b| !b,
        ))
    }
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for BooleanSchema {
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
    use crate::schema::boolean;

    #[test]
    fn test_bool() {
        let schema = boolean();
        assert!(schema.parse(&Value::Bool(true)).is_ok());
        assert!(schema.parse(&Value::Bool(false)).is_ok());
        let errors = schema.parse(&Value::Int(1)).unwrap_err();
        assert_eq!(errors.codes(), vec!["boolean"]);
    }

    #[test]
    fn test_pinned_values() {
        let accept_terms = boolean().is_true();
        let accepted = accept_terms.parse(&Value::Bool(true));
        assert_eq!(accepted, Ok(Value::Bool(true)));
        assert_eq!(
            accept_terms.parse(&Value::Bool(false)).unwrap_err().codes(),
            vec!["boolean.true"]
        );

        let opt_out = boolean().is_false();
        assert!(opt_out.parse(&Value::Bool(false)).is_ok());
        assert!(opt_out.parse(&Value::Bool(true)).is_err());
    }
}
