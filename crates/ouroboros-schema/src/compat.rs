//! Legacy free-function validators
//!
//! One-off checks that return a [`RuleOutcome`] instead of building a schema.
//! Each function evaluates a single-rule [`RuleChain`] over the same predicates
//! the schema builders use, keeping the legacy rule codes and messages.
//!
//! Because the predicates are shared, results are not byte-compatible with
//! the old free functions:
//!
//! - [`pass`] applies [`formats::password_issues`]: at least
//!   [`formats::PASSWORD_MIN_LENGTH`] characters, symbols limited to
//!   [`formats::PASSWORD_SYMBOLS`] (`#` reports "Unsupported character.").
//! - [`is_lower`] / [`is_upper`] compare against the case-mapped string, so
//!   `""`, digits and punctuation pass.
//! - [`phone`] uses the international pattern (optional `+` prefix, 4-15 digits).
//!
//! ```rust
//! use ouroboros_schema::compat;
//!
//! assert!(compat::email("user@example.com").is_valid());
//! assert_eq!(
//!     compat::range(5.0, 10.0, 100.0).message(""),
//!     Some("Number is out of range.".to_string())
//! );
//! ```

use crate::chain::RuleChain;
use crate::errors::{ensure_positive, SchemaError, ValidationResult};
use crate::formats;
use crate::otp::{OtpGenerator, OtpKind};
use crate::rule::{Rule, RuleOutcome};
use crate::types::Value;
use once_cell::sync::Lazy;

// ============================================================================
// Single-rule Chains
// ============================================================================

fn single(rule: Rule) -> RuleChain {
    let mut chain = RuleChain::new();
    chain.push(rule);
    chain
}

fn string_chain<F>(code: &str, message: &str, f: F) -> RuleChain
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    single(Rule::string(code, message, f))
}

/// Collapse a chain result into the legacy `{ valid, reason }` shape
fn outcome(result: ValidationResult<()>) -> RuleOutcome {
    match result {
        Ok(()) => RuleOutcome::Valid,
        Err(errors) => {
            let messages: Vec<String> = errors.flatten().into_iter().map(|i| i.message).collect();
            RuleOutcome::reason(messages.join(" "))
        }
    }
}

fn check_str(chain: &RuleChain, input: &str) -> RuleOutcome {
    outcome(chain.evaluate(&Value::from(input)))
}

static EMAIL: Lazy<RuleChain> = Lazy::new(|| {
    string_chain("email", "Invalid email format.", formats::validate_email)
});

static PHONE: Lazy<RuleChain> = Lazy::new(|| {
    string_chain(
        "phone",
        "Invalid phone number format.",
        formats::validate_phone,
    )
});

static FIRST_UPPER: Lazy<RuleChain> = Lazy::new(|| {
    string_chain(
        "firstUpper",
        "First letter is not uppercase.",
        formats::is_first_upper,
    )
});

static IS_LOWER: Lazy<RuleChain> = Lazy::new(|| {
    string_chain(
        "isLower",
        "String is not fully lowercase.",
        formats::is_lowercase,
    )
});

static IS_UPPER: Lazy<RuleChain> = Lazy::new(|| {
    string_chain(
        "isUpper",
        "String is not fully uppercase.",
        formats::is_uppercase,
    )
});

static EDGE_SPACE: Lazy<RuleChain> = Lazy::new(|| {
    string_chain("edgeSpace", "No edge spaces allowed.", |s| {
        !formats::has_edge_whitespace(s)
    })
});

static NO_SPACES: Lazy<RuleChain> = Lazy::new(|| {
    string_chain("noSpaces", "No spaces allowed.", |s| {
        !formats::has_whitespace(s)
    })
});

static BLANK: Lazy<RuleChain> = Lazy::new(|| {
    string_chain("blank", "Cannot be blank.", |s| !formats::is_blank(s))
});

static PASS: Lazy<RuleChain> = Lazy::new(|| {
    single(Rule::string("pass", "Weak password.", |s: &str| {
        let issues = formats::password_issues(s);
        if issues.is_empty() {
            RuleOutcome::Valid
        } else {
            RuleOutcome::reason(issues.join(" "))
        }
    }))
});

static NUM: Lazy<RuleChain> = Lazy::new(|| {
    single(Rule::value("num", "Number must be positive.", |v: &Value| {
        v.as_f64().map_or(false, |n| n > 0.0)
    }))
});

// ============================================================================
// Basic
// ============================================================================

pub fn email(input: &str) -> RuleOutcome {
    check_str(&EMAIL, input)
}

pub fn phone(input: &str) -> RuleOutcome {
    check_str(&PHONE, input)
}

/// At most `limit` characters; a zero limit is reported as invalid
pub fn char_limit(input: &str, limit: usize) -> RuleOutcome {
    if ensure_positive("Limit", limit).is_err() {
        return RuleOutcome::reason("Limit must be a positive number.");
    }
    let chain = string_chain("char", "Input exceeds character limit.", move |s| {
        s.chars().count() <= limit
    });
    check_str(&chain, input)
}

// ============================================================================
// Numbers
// ============================================================================

/// Positive number
pub fn num(number: f64) -> RuleOutcome {
    outcome(NUM.evaluate(&Value::Float(number)))
}

/// `min <= number <= max`; an invalid range is reported as invalid
pub fn range(number: f64, min: f64, max: f64) -> RuleOutcome {
    if min.is_nan() || max.is_nan() || min >= max {
        return RuleOutcome::reason("Invalid range. Ensure min is less than max.");
    }
    let chain = single(Rule::value("range", "Number is out of range.", move |v: &Value| {
        v.as_f64().map_or(false, |n| n >= min && n <= max)
    }));
    outcome(chain.evaluate(&Value::Float(number)))
}

// ============================================================================
// Passwords
// ============================================================================

/// Password strength; the reason lists every missing requirement
pub fn pass(password: &str) -> RuleOutcome {
    check_str(&PASS, password)
}

/// At least `min_length` characters; a zero minimum is reported as invalid
pub fn min_len(input: &str, min_length: usize) -> RuleOutcome {
    if ensure_positive("Minimum length", min_length).is_err() {
        return RuleOutcome::reason("Minimum length must be a positive number.");
    }
    let chain = string_chain("minLen", "Input does not meet minimum length.", move |s| {
        s.chars().count() >= min_length
    });
    check_str(&chain, input)
}

/// Password confirmation
pub fn matches(input: &str, confirmation: &str) -> RuleOutcome {
    let expected = confirmation.to_string();
    let chain = string_chain("match", "Password does not match!", move |s| s == expected);
    check_str(&chain, input)
}

// ============================================================================
// Text Case
// ============================================================================

pub fn first_upper(input: &str) -> RuleOutcome {
    check_str(&FIRST_UPPER, input)
}

pub fn is_lower(input: &str) -> RuleOutcome {
    check_str(&IS_LOWER, input)
}

pub fn is_upper(input: &str) -> RuleOutcome {
    check_str(&IS_UPPER, input)
}

// ============================================================================
// Whitespace
// ============================================================================

pub fn edge_space(input: &str) -> RuleOutcome {
    check_str(&EDGE_SPACE, input)
}

pub fn no_spaces(input: &str) -> RuleOutcome {
    check_str(&NO_SPACES, input)
}

pub fn blank(input: &str) -> RuleOutcome {
    check_str(&BLANK, input)
}

// ============================================================================
// OTP
// ============================================================================

fn otp(kind: OtpKind, length: usize) -> Result<String, SchemaError> {
    Ok(OtpGenerator::new()
        .with_kind(kind)
        .with_length(length)?
        .generate())
}

/// Letters and digits
pub fn mix_otp(length: usize) -> Result<String, SchemaError> {
    otp(OtpKind::Mixed, length)
}

/// Digits only
pub fn num_otp(length: usize) -> Result<String, SchemaError> {
    otp(OtpKind::Numeric, length)
}

/// Letters only
pub fn alpha_otp(length: usize) -> Result<String, SchemaError> {
    otp(OtpKind::Alphabetic, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(outcome: RuleOutcome) -> String {
        outcome.message("").unwrap_or_default()
    }

    #[test]
    fn test_basic() {
        assert!(email("user@example.com").is_valid());
        assert_eq!(reason(email("invalid-email")), "Invalid email format.");

        assert!(phone("+14155552671").is_valid());
        assert_eq!(reason(phone("12")), "Invalid phone number format.");

        assert!(char_limit("hello", 5).is_valid());
        assert_eq!(
            reason(char_limit("hello!", 5)),
            "Input exceeds character limit."
        );
        assert_eq!(
            reason(char_limit("hello", 0)),
            "Limit must be a positive number."
        );
    }

    #[test]
    fn test_numbers() {
        assert!(num(3.0).is_valid());
        assert_eq!(reason(num(0.0)), "Number must be positive.");
        assert!(!num(f64::NAN).is_valid());

        assert!(range(50.0, 10.0, 100.0).is_valid());
        assert_eq!(reason(range(5.0, 10.0, 100.0)), "Number is out of range.");
        assert_eq!(
            reason(range(5.0, 50.0, 10.0)),
            "Invalid range. Ensure min is less than max."
        );
    }

    #[test]
    fn test_passwords() {
        assert!(pass("Password123!").is_valid());
        assert_eq!(reason(pass("password123!")), "Uppercase letter missing.");
        assert!(min_len("abcdef", 6).is_valid());
        assert_eq!(
            reason(min_len("abc", 6)),
            "Input does not meet minimum length."
        );
        assert_eq!(
            reason(min_len("abc", 0)),
            "Minimum length must be a positive number."
        );

        assert!(matches("secret", "secret").is_valid());
        assert_eq!(
            reason(matches("secret", "Secret")),
            "Password does not match!"
        );
    }

    #[test]
    fn test_shared_predicate_semantics() {
        assert_eq!(reason(pass("Ab1!x")), "Password too short.");
        let reported = reason(pass("Passw0rd#"));
        assert_eq!(reported, "Symbol missing. Unsupported character.");
        assert!(is_lower("").is_valid());
        assert!(is_upper("123").is_valid());
    }

    #[test]
    fn test_case_and_whitespace() {
        assert!(first_upper("Hello").is_valid());
        assert_eq!(
            reason(first_upper("hello")),
            "First letter is not uppercase."
        );
        assert!(is_lower("hello").is_valid());
        assert!(!is_lower("Hello").is_valid());
        assert!(is_upper("HELLO").is_valid());
        assert!(!is_upper("Hello").is_valid());

        assert_eq!(reason(edge_space(" padded")), "No edge spaces allowed.");
        assert_eq!(reason(no_spaces("two words")), "No spaces allowed.");
        assert_eq!(reason(blank("   ")), "Cannot be blank.");
        assert!(blank("x").is_valid());
    }

    #[test]
    fn test_otp_helpers() {
        assert_eq!(mix_otp(10).unwrap().len(), 10);
        assert!(num_otp(6).unwrap().chars().all(|c| c.is_ascii_digit()));
        let alpha = alpha_otp(4).unwrap();
        assert!(alpha.chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(num_otp(0), Err(SchemaError::InvalidOtpLength));
    }
}
