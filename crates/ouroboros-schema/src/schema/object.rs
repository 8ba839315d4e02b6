//! Object schema

use super::{log_failure, Schema, SchemaBuilder};
use crate::chain::RuleChain;
use crate::config::ExtraFields;
use crate::errors::{ErrorType, ValidationError, ValidationErrors, ValidationResult};
use crate::rule::{Rule, RuleOutcome};
use crate::types::Value;
use std::collections::HashSet;
use std::sync::Arc;

const STRICT_CODE: &str = "object.strict";

// ============================================================================
// Shape
// ============================================================================

/// Ordered mapping from field name to child schema
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<(String, Schema)>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; declaring the same name twice replaces the earlier schema
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        let schema = schema.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, s)| s)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        let mut shape = Shape::new();
        for (name, schema) in iter {
            shape = shape.field(name, schema);
        }
        shape
    }
}

// ============================================================================
// Object Schema
// ============================================================================

/// Schema for objects with a fixed shape
///
/// Parsing runs the object's own chain first (type guard, `required`,
/// `strict`, custom rules). Only when that passes does it recurse into the
/// shape, skipping optional fields whose value is absent. The validated output
/// holds the shape's keys (plus unknown keys under [`ExtraFields::Allow`]).
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    chain: RuleChain,
    shape: Shape,
    extra: ExtraFields,
}

impl ObjectSchema {
    pub fn new(shape: Shape) -> Self {
        Self {
            chain: RuleChain::with_guard(Rule::type_guard(
                "object",
                "Value must be an object",
                |v| v.as_object().is_some(),
            )),
            shape,
            extra: ExtraFields::default(),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn extra_fields(&self) -> ExtraFields {
        self.extra
    }

    /// Every key in `keys` must be present (a `Null` value still counts)
    pub fn required<I, K>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.rule(
            Rule::object("object.required", "Required key is missing", move |pairs| {
                keys.iter()
                    .find(|key| !pairs.iter().any(|(k, _)| k == *key))
                    .map_or(RuleOutcome::Valid, RuleOutcome::detail)
            })
            .with_error_type(ErrorType::Missing),
        )
    }

    /// Reject keys that are not part of the shape
    pub fn strict(self) -> Self {
        self.extra(ExtraFields::Forbid)
    }

    /// Choose how unknown keys are handled; the latest call wins
    ///
    /// `Forbid` keeps exactly one `object.strict` rule in the chain, any other
    /// policy drops it.
    pub fn extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        match extra {
            ExtraFields::Forbid if !self.chain.contains(STRICT_CODE) => {
                let rule = self.strict_rule();
                self.rule(rule)
            }
            ExtraFields::Forbid => self,
            ExtraFields::Ignore | ExtraFields::Allow => {
                self.chain.remove(STRICT_CODE);
                self
            }
        }
    }

    fn strict_rule(&self) -> Rule {
        let known: Arc<HashSet<String>> = Arc::new(self.shape.keys().map(String::from).collect());
        Rule::object(STRICT_CODE, "Unknown properties are not allowed", move |pairs| {
            let extra: Vec<&str> = pairs
                .iter()
                .map(|(k, _)| k.as_str())
                .filter(|k| !known.contains(*k))
                .collect();
            if extra.is_empty() {
                RuleOutcome::Valid
            } else {
                RuleOutcome::detail(extra.join(", "))
            }
        })
        .with_error_type(ErrorType::ExtraForbidden)
    }

    /// Keep unknown keys in the validated output
    pub fn passthrough(self) -> Self {
        self.extra(ExtraFields::Allow)
    }

    pub fn parse(&self, value: &Value) -> ValidationResult<Value> {
        let result = self.validate(value);
        log_failure("object", &result);
        result
    }

    pub(crate) fn validate(&self, value: &Value) -> ValidationResult<Value> {
        self.chain.evaluate(value)?;

        // A passing chain means an object, or an absent value on an optional schema
        let Value::Object(pairs) = value else {
            return Ok(value.clone());
        };
        if self.shape.is_empty() {
            return Ok(value.clone());
        }

        let mut errors = ValidationErrors::new();
        let mut data = Vec::with_capacity(self.shape.len());

        for (key, schema) in self.shape.iter() {
            let field = value.get(key).unwrap_or(&Value::Null);
            if field.is_null() && schema.is_optional() {
                continue;
            }
            match schema.validate(field) {
                Ok(parsed) => data.push((key.to_string(), parsed)),
                Err(nested) => {
                    tracing::trace!(key, "Object field failed");
                    errors.add(ValidationError::at_key(key, nested));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        if self.extra.keeps_extra() {
            data.extend(
                pairs
                    .iter()
                    .filter(|(k, _)| !self.shape.contains(k))
                    .cloned(),
            );
        }
        Ok(Value::Object(data))
    }
}

impl SchemaBuilder for ObjectSchema {
    fn chain(&self) -> &RuleChain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut RuleChain {
        &mut self.chain
    }
}
