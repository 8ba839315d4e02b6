//! Number schema

use super::{log_failure, parse_primitive, SchemaBuilder};
use crate::chain::RuleChain;
use crate::errors::{SchemaError, ValidationResult};
use crate::rule::Rule;
use crate::types::Value;

/// Numeric bound accepted by [`NumberSchema`] builders
///
/// Integers wider than 53 bits round to the nearest `f64`, matching how
/// `Value::Int` is compared.
pub trait NumberBound: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_number_bound {
    (lossless: $($t:ty),*) => {
        $(
            impl NumberBound for $t {
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
    (rounded: $($t:ty),*) => {
        $(
            impl NumberBound for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_number_bound!(lossless: i8, i16, i32, u8, u16, u32, f32, f64);
impl_number_bound!(rounded: i64, u64, isize, usize);

/// Schema for numeric values
///
/// Accepts `Value::Int` and `Value::Float`; NaN fails the type guard.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    chain: RuleChain,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            chain: RuleChain::with_guard(Rule::type_guard(
                "number",
                "Value must be a number",
                |v| v.as_f64().is_some(),
            )),
        }
    }

    pub fn parse(&self, value: &Value) -> ValidationResult<Value> {
        let result = self.validate(value);
        log_failure("number", &result);
        result
    }

    pub(crate) fn validate(&self, value: &Value) -> ValidationResult<Value> {
        parse_primitive(&self.chain, value)
    }

    fn check<F>(self, code: &str, message: String, f: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::number(code, message, f))
    }

    /// Value >= `min`
    pub fn min(self, min: impl NumberBound) -> Self {
        let min = min.to_f64();
        self.check(
            "number.min",
            format!("Number must be at least {}", min),
            move |n| n >= min,
        )
    }

    /// Value <= `max`
    pub fn max(self, max: impl NumberBound) -> Self {
        let max = max.to_f64();
        self.check(
            "number.max",
            format!("Number must be at most {}", max),
            move |n| n <= max,
        )
    }

    /// `min <= value <= max`; fails to build unless `min < max`
    pub fn range(self, min: impl NumberBound, max: impl NumberBound) -> Result<Self, SchemaError> {
        let (min, max) = (min.to_f64(), max.to_f64());
        if min.is_nan() || max.is_nan() || min >= max {
            tracing::debug!(min, max, "Rejected invalid number range");
            return Err(SchemaError::InvalidRange { min, max });
        }
        Ok(self.check(
            "number.range",
            format!("Number must be between {} and {}", min, max),
            move |n| n >= min && n <= max,
        ))
    }

    /// Value > 0
    pub fn positive(self) -> Self {
        self.check(
            "number.positive",
            "Number must be positive".to_string(),
            |n| n > 0.0,
        )
    }

    /// Value < 0
    pub fn negative(self) -> Self {
        self.check(
            "number.negative",
            "Number must be negative".to_string(),
            |n| n < 0.0,
        )
    }

    /// Finite with no fractional part
    pub fn integer(self) -> Self {
        self.check("number.integer", "Number must be an integer".to_string(), |n| {
            n.is_finite() && n.fract() == 0.0
        })
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for NumberSchema {
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
    use crate::schema::number;

    #[test]
    fn test_type_guard() {
        let schema = number();
        assert!(schema.parse(&Value::Int(42)).is_ok());
        assert!(schema.parse(&Value::Float(4.2)).is_ok());

        for bad in [
            Value::from("42"),
            Value::Float(f64::NAN),
            Value::Null,
            Value::Bool(true),
        ] {
            let errors = schema.parse(&bad).unwrap_err();
            assert_eq!(errors.codes(), vec!["number"]);
        }
    }

    #[test]
    fn test_range() {
        let schema = number().range(10, 100).unwrap();
        assert_eq!(schema.parse(&Value::Int(50)), Ok(Value::Int(50)));
        assert!(schema.parse(&Value::Int(10)).is_ok());
        assert!(schema.parse(&Value::Int(100)).is_ok());

        let errors = schema.parse(&Value::Int(5)).unwrap_err();
        assert_eq!(errors.codes(), vec!["number.range"]);
        assert_eq!(
            errors.flatten()[0].message,
            "Number must be between 10 and 100"
        );
    }

    #[test]
    fn test_range_construction_fault() {
        assert_eq!(
            number().range(50, 10).unwrap_err(),
            SchemaError::InvalidRange {
                min: 50.0,
                max: 10.0
            }
        );
        assert!(number().range(10, 10).is_err());
        assert!(number().range(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_bounds_and_sign() {
        let schema = number().min(18).max(65).integer();
        assert!(schema.parse(&Value::Int(30)).is_ok());
        let errors = schema.parse(&Value::Int(12)).unwrap_err();
        assert_eq!(errors.codes(), vec!["number.min"]);
        assert_eq!(
            schema.parse(&Value::Float(70.5)).unwrap_err().codes(),
            vec!["number.max", "number.integer"]
        );
        assert!(schema.parse(&Value::Float(30.0)).is_ok());

        assert!(number().positive().parse(&Value::Int(0)).is_err());
        assert!(number().positive().parse(&Value::Float(0.1)).is_ok());
        assert!(number().negative().parse(&Value::Int(-3)).is_ok());
        assert!(number().negative().parse(&Value::Int(0)).is_err());
    }

    #[test]
    fn test_bounds_accept_any_primitive_number() {
        let floor: i64 = 18;
        let ceiling: u64 = 65;
        let schema = number().min(floor).max(ceiling);
        assert!(schema.parse(&Value::Int(40)).is_ok());
        let errors = schema.parse(&Value::Int(70)).unwrap_err();
        assert_eq!(errors.codes(), vec!["number.max"]);

        let limit: usize = 3;
        assert!(number().range(0u8, limit).is_ok());
        assert!(number().min(0.5f32).parse(&Value::Float(0.25)).is_err());
    }

    #[test]
    fn test_min_message_formats_whole_numbers() {
        let errors = number().min(18).parse(&Value::Int(3)).unwrap_err();
        assert_eq!(errors.flatten()[0].message, "Number must be at least 18");

        let errors = number().max(0.5).parse(&Value::Int(3)).unwrap_err();
        assert_eq!(errors.flatten()[0].message, "Number must be at most 0.5");
    }
}
