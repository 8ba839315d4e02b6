//! Format predicates for common string checks
//!
//! Plain `&str -> bool` functions shared by the schema rule builders and the
//! legacy `compat` functions, backed by pre-compiled regexes where a regex
//! fits.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// Email regex pattern (something@something.something, no whitespace)
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Phone regex pattern (optional +country prefix, 4-15 digits)
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?[0-9]{1,4})?([0-9]{4,15})$").unwrap()
});

/// Any whitespace character
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

/// Symbols accepted (and required) by the password strength check
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length for the strength check
pub const PASSWORD_MIN_LENGTH: usize = 8;

// ============================================================================
// Format Validators
// ============================================================================

/// Validate email format
///
/// # Example
/// ```
/// use ouroboros_schema::formats::validate_email;
///
/// assert!(validate_email("user@example.com"));
/// assert!(!validate_email("not-an-email"));
/// ```
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate an absolute URL (any scheme)
///
/// # Example
/// ```
/// use ouroboros_schema::formats::validate_url;
///
/// assert!(validate_url("https://example.com/path"));
/// assert!(validate_url("mailto:user@example.com"));
/// assert!(!validate_url("example.com"));
/// ```
pub fn validate_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Validate phone number format
pub fn validate_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// True when the string contains any whitespace
pub fn has_whitespace(value: &str) -> bool {
    WHITESPACE_REGEX.is_match(value)
}

/// True when the string starts or ends with whitespace
pub fn has_edge_whitespace(value: &str) -> bool {
    value.trim() != value
}

/// True when the string is empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// First character is an uppercase letter
pub fn is_first_upper(value: &str) -> bool {
    value.chars().next().map_or(false, char::is_uppercase)
}

/// String equals its lowercase form
pub fn is_lowercase(value: &str) -> bool {
    value.to_lowercase() == value
}

/// String equals its uppercase form
pub fn is_uppercase(value: &str) -> bool {
    value.to_uppercase() == value
}

/// Password strength problems, empty when the password is strong
///
/// A strong password has at least [`PASSWORD_MIN_LENGTH`] characters, one
/// uppercase and one lowercase ASCII letter, one digit, one symbol from
/// [`PASSWORD_SYMBOLS`], and nothing else. `regex` has no lookahead, so this
/// is a single scan instead of one pattern.
///
/// # Example
/// ```
/// use ouroboros_schema::formats::password_issues;
///
/// assert!(password_issues("Password123!").is_empty());
/// assert_eq!(password_issues("password123!"), vec!["Uppercase letter missing."]);
/// ```
pub fn password_issues(value: &str) -> Vec<&'static str> {
    let mut upper = false;
    let mut lower = false;
    let mut digit = false;
    let mut symbol = false;
    let mut unsupported = false;

    for c in value.chars() {
        match c {
            'A'..='Z' => upper = true,
            'a'..='z' => lower = true,
            '0'..='9' => digit = true,
            c if PASSWORD_SYMBOLS.contains(c) => symbol = true,
            _ => unsupported = true,
        }
    }

    let mut issues = Vec::new();
    if !upper {
        issues.push("Uppercase letter missing.");
    }
    if !lower {
        issues.push("Lowercase letter missing.");
    }
    if !digit {
        issues.push("Number missing.");
    }
    if !symbol {
        issues.push("Symbol missing.");
    }
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        issues.push("Password too short.");
    }
    if unsupported {
        issues.push("Unsupported character.");
    }
    issues
}

/// True when [`password_issues`] finds nothing
pub fn validate_password(value: &str) -> bool {
    password_issues(value).is_empty()
}
