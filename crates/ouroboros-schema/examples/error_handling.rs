//! Error Handling Example
//!
//! This example demonstrates working with the error tree, construction faults
//! and the legacy free-function validators.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-schema --example error_handling
//! ```

use ouroboros_schema::{
    array, compat, number, object, string, OtpGenerator, OtpKind, Shape,
    ValidationError, ValidationErrors, Value,
};

fn main() {
    println!("Error Handling Example");
    println!("======================\n");

    demonstrate_error_tree();
    demonstrate_construction_faults();
    demonstrate_legacy_api();

    println!("Summary:");
    println!("  - ValidationErrors nests child failures by key or index");
    println!("  - flatten() turns the tree into path-addressed issues");
    println!("  - SchemaError reports schema construction mistakes");
}

fn print_tree(errors: &ValidationErrors, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    for error in errors.as_slice() {
        match error {
            ValidationError::Rule {
                code,
                message,
                error_type,
            } => {
                println!("{}{} ({}, {})", indent, message, code, error_type);
            }
            ValidationError::Nested { location, errors } => {
                println!("{}{}:", indent, location);
                print_tree(errors, depth + 1);
            }
        }
    }
}

fn demonstrate_error_tree() {
    println!("1. Error Tree");
    println!("-------------");

    let customer = object(Shape::new().field("email", string().email()));
    let order = object(
        Shape::new()
            .field("customer", customer)
            .field("items", array(number().positive().integer()).min(1)),
    );

    let input = Value::object([
        ("customer", Value::object([("email", Value::from("nope"))])),
        (
            "items",
            Value::List(vec![
                Value::Int(2),
                Value::Float(-0.5),
                Value::from("three"),
            ]),
        ),
    ]);

    if let Err(errors) = order.parse(&input) {
        print_tree(&errors, 0);
        println!();
        println!("  Flattened:");
        for issue in errors.flatten() {
            println!("    {}", issue);
        }
    }
    println!();
}

fn demonstrate_construction_faults() {
    println!("2. Construction Faults");
    println!("----------------------");

    if let Err(e) = number().range(50, 10) {
        println!("  range(50, 10): {}", e);
    }
    if let Err(e) = string().char_limit(0) {
        println!("  char_limit(0): {}", e);
    }
    if let Err(e) = string().pattern("(unclosed") {
        println!("  pattern: {}", e);
    }
    if let Err(e) = "hex".parse::<OtpKind>() {
        println!("  otp kind: {}", e);
    }
    println!();
}

fn demonstrate_legacy_api() {
    println!("3. Legacy API");
    println!("-------------");

    let outcomes = [
        ("email", compat::email("not-an-email")),
        ("range", compat::range(5.0, 10.0, 100.0)),
        ("pass", compat::pass("password")),
        ("blank", compat::blank("   ")),
    ];
    for (name, outcome) in outcomes {
        match outcome.message("") {
            None => println!("  {}: valid", name),
            Some(reason) => println!("  {}: {}", name, reason),
        }
    }

    let generator = OtpGenerator::new()
        .with_kind(OtpKind::Numeric)
        .with_length(8);
    match generator {
        Ok(generator) => println!("  numeric otp: {}", generator.generate()),
        Err(e) => println!("  otp: {}", e),
    }
    println!();
}
