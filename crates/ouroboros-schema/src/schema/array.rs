//! Array schema

use super::{log_failure, Schema, SchemaBuilder};
use crate::chain::RuleChain;
use crate::errors::{ValidationError, ValidationErrors, ValidationResult};
use crate::rule::Rule;
use crate::types::Value;
use std::collections::HashSet;

/// Schema for lists, optionally validating every item against one schema
#[derive(Debug, Clone)]
pub struct ArraySchema {
    chain: RuleChain,
    items: Option<Box<Schema>>,
}

impl ArraySchema {
    pub fn new(items: Option<Schema>) -> Self {
        Self {
            chain: RuleChain::with_guard(Rule::type_guard(
                "array",
                "Value must be an array",
                |v| v.as_list().is_some(),
            )),
            items: items.map(Box::new),
        }
    }

    /// The item schema, if any
    pub fn items(&self) -> Option<&Schema> {
        self.items.as_deref()
    }

    fn check<F>(self, code: &str, message: String, f: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::list(code, message, f))
    }

    /// At least `length` items
    pub fn min(self, length: usize) -> Self {
        self.check(
            "array.min",
            format!("Array must contain at least {} items", length),
            move |items| items.len() >= length,
        )
    }

    /// At most `length` items
    pub fn max(self, length: usize) -> Self {
        self.check(
            "array.max",
            format!("Array must contain at most {} items", length),
            move |items| items.len() <= length,
        )
    }

    /// Exactly `length` items
    pub fn length(self, length: usize) -> Self {
        self.check(
            "array.length",
            format!("Array must contain exactly {} items", length),
            move |items| items.len() == length,
        )
    }

    /// No two items structurally equal (compared by canonical rendering)
    pub fn unique(self) -> Self {
        self.check(
            "array.unique",
            "Array must not contain duplicate items".to_string(),
            |items| {
                let mut seen = HashSet::with_capacity(items.len());
                items.iter().all(|item| seen.insert(item.canonical()))
            },
        )
    }

    pub fn parse(&self, value: &Value) -> ValidationResult<Value> {
        let result = self.validate(value);
        log_failure("array", &result);
        result
    }

    pub(crate) fn validate(&self, value: &Value) -> ValidationResult<Value> {
        self.chain.evaluate(value)?;

        let (Some(item_schema), Value::List(items)) = (self.items.as_deref(), value) else {
            return Ok(value.clone());
        };

        let mut errors = ValidationErrors::new();
        let mut data = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match item_schema.validate(item) {
                Ok(parsed) => data.push(parsed),
                Err(nested) => {
                    tracing::trace!(index, "Array item failed");
                    errors.add(ValidationError::at_index(index, nested));
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::List(data))
        } else {
            Err(errors)
        }
    }
}

impl SchemaBuilder for ArraySchema {
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
    use crate::schema::{array, array_any, number, string};

    fn strings(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| Value::from(*s)).collect())
    }

    #[test]
    fn test_unique() {
        let schema = array(string()).unique();
        let errors = schema.parse(&strings(&["a", "a"])).unwrap_err();
        assert_eq!(errors.codes(), vec!["array.unique"]);

        let distinct = strings(&["a", "b"]);
        assert_eq!(schema.parse(&distinct), Ok(distinct.clone()));
    }

    #[test]
    fn test_unique_is_structural() {
        let schema = array_any().unique();
        let nested = Value::List(vec![
            Value::object([("id", Value::Int(1))]),
            Value::object([("id", Value::Float(1.0))]),
        ]);
        assert!(schema.parse(&nested).is_err());
        assert!(schema
            .parse(&Value::List(vec![Value::Int(1), Value::from("1")]))
            .is_ok());
    }

    #[test]
    fn test_item_errors_keep_index_order() {
        let schema = array(number().positive());
        let input = Value::List(vec![
            Value::Int(1),
            Value::Int(-1),
            Value::Int(2),
            Value::from("x"),
        ]);

        let errors = schema.parse(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.at_index(1).unwrap().codes(), vec!["number.positive"]);
        assert_eq!(errors.at_index(3).unwrap().codes(), vec!["number"]);
        assert!(errors.at_index(0).is_none());

        let paths: Vec<String> = errors.flatten().into_iter().map(|i| i.path).collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
    }

    #[test]
    fn test_length_rules_run_before_items() {
        let schema = array(string().min(2)).min(2).max(3);
        let errors = schema.parse(&strings(&["a"])).unwrap_err();
        // Own chain failed: no item recursion
        assert_eq!(errors.codes(), vec!["array.min"]);
        assert!(errors.at_index(0).is_none());

        let errors = schema.parse(&strings(&["a", "b", "c", "d"])).unwrap_err();
        assert_eq!(errors.codes(), vec!["array.max"]);

        let pair = array_any().length(2);
        let errors = pair.parse(&strings(&["a"])).unwrap_err();
        assert_eq!(errors.codes(), vec!["array.length"]);
    }

    #[test]
    fn test_no_item_schema_returns_input() {
        let input = Value::List(vec![Value::Int(1), Value::from("mixed")]);
        assert_eq!(array_any().parse(&input), Ok(input.clone()));
        let errors = array_any().parse(&Value::from("x")).unwrap_err();
        assert_eq!(errors.codes(), vec!["array"]);
    }

    #[test]
    fn test_optional_array() {
        let schema = array(string()).min(1).optional();
        assert_eq!(schema.parse(&Value::Null), Ok(Value::Null));
        assert!(schema.parse(&Value::List(vec![])).is_err());
    }
}
