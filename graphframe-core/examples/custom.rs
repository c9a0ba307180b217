use graphframe_core::{validate_identifier, CypherKeyword};

/// Demonstrates identifier validation and backtick-escaping (§4.1): a
/// caller-chosen field name is either emitted as-is, or backtick-quoted
/// when it collides with a reserved word of the backend's query language.
fn main() {
    for field in ["name", "return", "since", "order"] {
        let emitted = validate_identifier(field, true).expect("valid identifier");
        println!(
            "{field:>8} -> {emitted:<10} (reserved: {})",
            CypherKeyword::is_reserved(field)
        );
    }
}
