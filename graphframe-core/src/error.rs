/// Errors raised while validating identifiers, parsing predicate keys, or
/// otherwise compiling a description — always at compile time, never at
/// execution time (see `graphframe::GraphError` for execution failures).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A label, relationship type, or property name does not match the
    /// identifier regex and strict validation was requested.
    #[error("invalid identifier `{identifier}`")]
    InvalidIdentifier {
        /// The offending identifier, verbatim.
        identifier: String,
    },

    /// A predicate field key carried an operator suffix that is not part of
    /// the enumerated operator set.
    #[error("unknown filter operator `{suffix}` in field `{field}`")]
    UnknownOperator {
        /// The field the suffix was attached to.
        field: String,
        /// The unrecognized suffix.
        suffix: String,
    },

    /// An operator was given a value of the wrong kind, e.g. `in` given a
    /// scalar, or a nullary operator given a non-truthy argument.
    #[error("type mismatch for `{operator}` on field `{field}`: {reason}")]
    TypeMismatch {
        /// The field the predicate targets.
        field: String,
        /// The operator whose value kind was violated.
        operator: String,
        /// A short, human-readable explanation.
        reason: String,
    },

    /// An upsert was given an empty row list or an empty key-field list, or
    /// a keyed relationship-uniqueness policy was used without rel key
    /// fields.
    #[error("empty input: {reason}")]
    EmptyInput {
        /// A short, human-readable explanation.
        reason: String,
    },

    /// A predicate's namespace segment could not be resolved to a single
    /// pattern element, e.g. two aliases in a customized triple collided.
    #[error("ambiguous namespace `{namespace}` in field `{field}`")]
    AmbiguousNamespace {
        /// The field the predicate targets.
        field: String,
        /// The namespace token that was ambiguous.
        namespace: String,
    },
}

impl CoreError {
    /// The field name this error carries, if any — used by callers that want
    /// to report the failing predicate without matching on every variant.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownOperator { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::AmbiguousNamespace { field, .. } => Some(field),
            Self::InvalidIdentifier { .. } | Self::EmptyInput { .. } => None,
        }
    }
}
