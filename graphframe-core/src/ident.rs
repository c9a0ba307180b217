use crate::{keyword::CypherKeyword, CoreError};

/// A valid identifier starts with an ASCII letter or underscore.
fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// A valid identifier continues with ASCII alphanumerics or underscores.
fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Matches `^[A-Za-z_][A-Za-z0-9_]*$` against `id`.
fn matches_identifier_pattern(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Validates and escapes a label, relationship type, or property name.
///
/// When `strict` is `true`, an identifier that does not match the plain
/// identifier pattern fails with [`CoreError::InvalidIdentifier`]. Whether or
/// not strict mode rejects it, an identifier that matches the pattern but
/// collides with a reserved keyword of the backend — or one that does not
/// match the pattern at all, in non-strict mode — is returned backtick
/// quoted; otherwise it is returned unchanged.
pub fn validate_identifier(id: &str, strict: bool) -> Result<String, CoreError> {
    let is_plain = matches_identifier_pattern(id);
    if strict && !is_plain {
        return Err(CoreError::InvalidIdentifier {
            identifier: id.to_string(),
        });
    }
    if !is_plain || CypherKeyword::is_reserved(id) {
        Ok(format!("`{}`", id.replace('`', "``")))
    } else {
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_passes_through() {
        assert_eq!(validate_identifier("name", true).unwrap(), "name");
        assert_eq!(validate_identifier("person_1", true).unwrap(), "person_1");
    }

    #[test]
    fn reserved_word_is_backtick_quoted() {
        assert_eq!(validate_identifier("return", true).unwrap(), "`return`");
    }

    #[test]
    fn strict_mode_rejects_invalid_characters() {
        let err = validate_identifier("bad-name", true).unwrap_err();
        assert!(matches!(err, CoreError::InvalidIdentifier { .. }));
    }

    #[test]
    fn non_strict_mode_backtick_quotes_invalid_characters() {
        assert_eq!(
            validate_identifier("bad-name", false).unwrap(),
            "`bad-name`"
        );
    }

    #[test]
    fn rejects_empty_and_leading_digit() {
        assert!(validate_identifier("", true).is_err());
        assert!(validate_identifier("1name", true).is_err());
    }
}
