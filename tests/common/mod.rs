//! Shared test helpers for integration tests.

use treat::schema::load_values_with_source;
use treat::value::Value;

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Loads every YAML document in a fixture file as an input value.
///
/// # Panics
///
/// Panics if the file cannot be read or parsed.
pub fn load_fixture_values(name: &str) -> Vec<Value> {
    let source = format!("tests/fixtures/{name}");
    load_values_with_source(&source, &load_fixture(name))
        .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
}
