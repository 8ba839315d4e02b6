//! Basic Validation Example
//!
//! This example demonstrates building and running schemas with ouroboros-schema.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-schema --example basic_validation
//! ```

use ouroboros_schema::{
    array, boolean, number, object, string, SchemaBuilder, Shape, ValidationResult, Value,
};

// ============================================================================
// Primitive Schemas
// ============================================================================

fn validate_primitives() {
    println!("1. Primitive Schemas");
    println!("--------------------");

    let name = string().min(3).max(20);
    let result = name.parse(&Value::from("validname"));
    println!("  'validname': {}", result_str(&result));
    println!("  'ab': {}", result_str(&name.parse(&Value::from("ab"))));

    let age = number().integer().min(18);
    println!("  42: {}", result_str(&age.parse(&Value::Int(42))));
    println!("  17.5: {}", result_str(&age.parse(&Value::Float(17.5))));

    let accepted = boolean().is_true();
    let result = accepted.parse(&Value::Bool(true));
    println!("  true: {}", result_str(&result));

    // Type mismatch: only the type guard reports, dependent rules are skipped
    let result = age.parse(&Value::from("x"));
    println!("  'x' as number: {}", result_str(&result));
    println!();
}

// ============================================================================
// Formats
// ============================================================================

fn validate_formats() {
    println!("2. Formats");
    println!("----------");

    let email = string().email();
    for input in ["user@example.com", "not-an-email"] {
        let result = email.parse(&Value::from(input));
        println!("  email '{}': {}", input, result_str(&result));
    }

    let password = string().password().message("Choose a stronger password");
    for input in ["Password123!", "password"] {
        let result = password.parse(&Value::from(input));
        println!("  password '{}': {}", input, result_str(&result));
    }

    match string().pattern(r"^\d{3}-\d{4}$") {
        Ok(phone) => println!(
            "  pattern '555-1234': {}",
            result_str(&phone.parse(&Value::from("555-1234")))
        ),
        Err(e) => println!("  pattern rejected: {}", e),
    }
    println!();
}

// ============================================================================
// Containers
// ============================================================================

fn validate_containers() {
    println!("3. Objects and Arrays");
    println!("---------------------");

    let user = object(
        Shape::new()
            .field("username", string().min(3))
            .field("age", number().min(18).optional())
            .field("tags", array(string().non_empty()).unique().optional()),
    )
    .strict();

    let valid = Value::object([
        ("username", Value::from("joanna")),
        ("tags", Value::List(vec![Value::from("admin")])),
    ]);
    println!("  valid user: {}", result_str(&user.parse(&valid)));

    let invalid = Value::object([
        ("username", Value::from("jo")),
        ("tags", Value::List(vec![Value::from("a"), Value::from("a")])),
    ]);
    println!("  invalid user: {}", result_str(&user.parse(&invalid)));

    let extra = Value::object([
        ("username", Value::from("joanna")),
        ("role", Value::from("x")),
    ]);
    println!("  unknown key: {}", result_str(&user.parse(&extra)));
    println!();
}

fn result_str(result: &ValidationResult<Value>) -> String {
    match result {
        Ok(_) => "OK".to_string(),
        Err(errors) => {
            let issues: Vec<String> = errors.flatten().iter().map(ToString::to_string).collect();
            format!("FAILED ({})", issues.join("; "))
        }
    }
}

fn main() {
    println!("Basic Validation Example");
    println!("========================\n");

    validate_primitives();
    validate_formats();
    validate_containers();
}
