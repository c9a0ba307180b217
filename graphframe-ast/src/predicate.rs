use graphframe_core::{CoreError, Value};

/// A single operator from §4.2's enumerated set, with its backend rendering
/// form. Modeled on `usql-ast::expression::operator::BinaryOperator`: a
/// small `Copy` enum whose `Display` impl is the backend keyword/symbol, not
/// the Rust variant name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// `x.f = $p` — the default when a field key carries no suffix.
    Eq,
    /// `x.f <> $p`
    Ne,
    /// `x.f > $p`
    Gt,
    /// `x.f >= $p`
    Gte,
    /// `x.f < $p`
    Lt,
    /// `x.f <= $p`
    Lte,
    /// `x.f IN $p` — an empty list compiles to the constant `FALSE`.
    In,
    /// `NOT x.f IN $p` — an empty list compiles to the constant `TRUE`.
    NotIn,
    /// `x.f CONTAINS $p`
    Contains,
    /// `x.f STARTS WITH $p`
    StartsWith,
    /// `x.f ENDS WITH $p`
    EndsWith,
    /// `x.f =~ $p`
    Regex,
    /// `x.f IS NOT NULL` — the `exists`/`not_null` suffixes both parse to
    /// this variant.
    Exists,
    /// `x.f IS NULL`
    IsNull,
}

impl Operator {
    /// Parses a field-key operator suffix (the part after the last `__`)
    /// into its `Operator`, or `None` if the suffix is not recognized.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "in" => Self::In,
            "not_in" => Self::NotIn,
            "contains" => Self::Contains,
            "startswith" => Self::StartsWith,
            "endswith" => Self::EndsWith,
            "regex" => Self::Regex,
            "exists" | "not_null" => Self::Exists,
            "is_null" => Self::IsNull,
            _ => return None,
        })
    }

    /// `true` for the two nullary operators, which bind no parameter.
    pub fn is_nullary(self) -> bool {
        matches!(self, Self::Exists | Self::IsNull)
    }

    /// `true` for the list operators, which require a `Value::List`.
    pub fn is_list_operator(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Regex => "regex",
            Self::Exists => "exists",
            Self::IsNull => "is_null",
        })
    }
}

/// A raw `field__operator: value` entry as collected by a `where` builder
/// call, before namespace resolution and operator parsing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldFilter {
    /// The raw key, e.g. `"age__gte"` or `"rel__since__gte"`.
    pub key: String,
    /// The bound value, absent for nullary operators.
    pub value: Option<Value>,
}

impl FieldFilter {
    /// Creates a filter entry from a key and a value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a filter entry for a nullary operator, with no bound value.
    pub fn nullary(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// A fully resolved predicate: which pattern alias it targets, the bare
/// field name, the operator, and the (already namespace-stripped) value.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    /// The alias of the pattern element this predicate targets, e.g. `"n"`
    /// for a plain node read or `"to"` for a traversal's destination.
    pub alias: String,
    /// The bare property name, with any namespace/operator segments
    /// stripped.
    pub field: String,
    /// The operator this predicate renders with.
    pub operator: Operator,
    /// The bound value, absent for nullary operators.
    pub value: Option<Value>,
}

/// The namespace-resolution context active while parsing a frame's
/// predicate and projection field keys.
///
/// Non-traversal frames (node reads, relationship reads) carry no
/// namespaces at all — every key resolves to the frame's single alias.
/// Traversal and back-to-origin frames carry the three built-in namespace
/// tokens `from`/`rel`/`to`, plus the caller-supplied alias names
/// themselves when the caller customized the alias triple (§4.3).
#[derive(Clone, Debug)]
pub struct NamespaceContext {
    default_alias: String,
    builtins: Vec<(&'static str, String)>,
    custom: Vec<(String, String)>,
}

impl NamespaceContext {
    /// A context for a non-traversal frame: every key resolves to
    /// `default_alias`, no namespace segment is ever peeled off.
    pub fn flat(default_alias: impl Into<String>) -> Self {
        Self {
            default_alias: default_alias.into(),
            builtins: Vec::new(),
            custom: Vec::new(),
        }
    }

    /// A context for a traversal (or back-to-origin) frame.
    pub fn traversal(
        from_alias: impl Into<String>,
        rel_alias: impl Into<String>,
        to_alias: impl Into<String>,
        customized: bool,
    ) -> Self {
        let from_alias = from_alias.into();
        let rel_alias = rel_alias.into();
        let to_alias = to_alias.into();
        let custom = if customized {
            vec![
                (from_alias.clone(), from_alias.clone()),
                (rel_alias.clone(), rel_alias.clone()),
                (to_alias.clone(), to_alias.clone()),
            ]
        } else {
            Vec::new()
        };
        Self {
            default_alias: from_alias.clone(),
            builtins: vec![("from", from_alias), ("rel", rel_alias), ("to", to_alias)],
            custom,
        }
    }

    /// Resolves a leading namespace token, per §4.3's resolution order:
    /// customized caller aliases first, then built-ins — the caller's
    /// customization takes precedence precisely because `self.custom` is
    /// only ever populated when the triple was customized; an
    /// uncustomized context leaves `custom` empty and every token falls
    /// through to `builtins` unchanged. Returns `Ok(None)` when `token`
    /// matches no active namespace (the token is part of the field name
    /// instead), and `Err(())` when `token` matches more than one distinct
    /// customized alias (a collision within the alias triple).
    fn resolve(&self, token: &str) -> Result<Option<String>, ()> {
        let custom_matches: Vec<&String> = self
            .custom
            .iter()
            .filter(|(t, _)| t == token)
            .map(|(_, alias)| alias)
            .collect();
        match custom_matches.len() {
            0 => {}
            1 => return Ok(Some(custom_matches[0].clone())),
            _ => return Err(()),
        }
        if let Some((_, alias)) = self.builtins.iter().find(|(t, _)| *t == token) {
            return Ok(Some(alias.clone()));
        }
        Ok(None)
    }

    /// Splits `key` on `__`, peels a leading namespace token when it
    /// resolves, and returns the resolved alias plus the remaining segments.
    /// Shared by `Predicate::parse` and `resolve_field`.
    fn peel(&self, key: &str) -> Result<(String, Vec<String>), CoreError> {
        let parts: Vec<&str> = key.split("__").collect();
        if parts.len() > 1 {
            match self.resolve(parts[0]) {
                Ok(Some(alias)) => Ok((alias, parts[1..].iter().map(|s| s.to_string()).collect())),
                Ok(None) => Ok((
                    self.default_alias.clone(),
                    parts.iter().map(|s| s.to_string()).collect(),
                )),
                Err(()) => Err(CoreError::AmbiguousNamespace {
                    field: key.to_string(),
                    namespace: parts[0].to_string(),
                }),
            }
        } else {
            Ok((
                self.default_alias.clone(),
                parts.iter().map(|s| s.to_string()).collect(),
            ))
        }
    }

    /// Resolves a plain field key (no operator suffix) with the same
    /// namespace rules `Predicate::parse` uses. Used by `select`/`order_by`
    /// fields, per §9's "namespaced select" resolution: they follow the
    /// same namespace-prefix rule as predicate fields, minus the operator
    /// suffix that only predicates carry.
    pub fn resolve_field(&self, key: &str) -> Result<(String, String), CoreError> {
        let (alias, rest) = self.peel(key)?;
        Ok((alias, rest.join("__")))
    }
}

impl Predicate {
    /// Parses a raw `field__operator` key and its value into a resolved
    /// `Predicate`, per §4.2 (field/operator parsing) and §4.3 (namespace
    /// resolution).
    pub fn parse(key: &str, value: Option<Value>, ctx: &NamespaceContext) -> Result<Self, CoreError> {
        let (alias, rest) = ctx.peel(key)?;
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let (field, operator) = if rest.len() >= 2 {
            let suffix = rest[rest.len() - 1];
            let operator = Operator::from_suffix(suffix).ok_or_else(|| CoreError::UnknownOperator {
                field: key.to_string(),
                suffix: suffix.to_string(),
            })?;
            (rest[..rest.len() - 1].join("__"), operator)
        } else {
            (rest.join("__"), Operator::Eq)
        };

        if operator.is_nullary() {
            if let Some(v) = &value {
                if !v.is_truthy() {
                    return Err(CoreError::TypeMismatch {
                        field,
                        operator: operator.to_string(),
                        reason: "nullary operator argument must be truthy or omitted".to_string(),
                    });
                }
            }
            return Ok(Self {
                alias,
                field,
                operator,
                value: None,
            });
        }

        match &value {
            Some(v) if operator.is_list_operator() && !v.is_list() => {
                return Err(CoreError::TypeMismatch {
                    field,
                    operator: operator.to_string(),
                    reason: "expected a list value".to_string(),
                })
            }
            None => {
                return Err(CoreError::TypeMismatch {
                    field,
                    operator: operator.to_string(),
                    reason: "missing value".to_string(),
                })
            }
            _ => {}
        }

        Ok(Self {
            alias,
            field,
            operator,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field_defaults_to_eq_on_the_default_alias() {
        let ctx = NamespaceContext::flat("n");
        let p = Predicate::parse("country", Some(Value::from("US")), &ctx).unwrap();
        assert_eq!(p.alias, "n");
        assert_eq!(p.field, "country");
        assert_eq!(p.operator, Operator::Eq);
    }

    #[test]
    fn suffix_selects_operator() {
        let ctx = NamespaceContext::flat("n");
        let p = Predicate::parse("age__gte", Some(Value::from(21i64)), &ctx).unwrap();
        assert_eq!(p.field, "age");
        assert_eq!(p.operator, Operator::Gte);
    }

    #[test]
    fn builtin_namespace_is_peeled_before_operator() {
        let ctx = NamespaceContext::traversal("from", "rel", "to", false);
        let p = Predicate::parse("rel__since__gte", Some(Value::from(2020i64)), &ctx).unwrap();
        assert_eq!(p.alias, "rel");
        assert_eq!(p.field, "since");
        assert_eq!(p.operator, Operator::Gte);
    }

    #[test]
    fn builtin_namespace_with_no_operator_suffix() {
        let ctx = NamespaceContext::traversal("from", "rel", "to", false);
        let p = Predicate::parse("to__city", Some(Value::from("SF")), &ctx).unwrap();
        assert_eq!(p.alias, "to");
        assert_eq!(p.field, "city");
        assert_eq!(p.operator, Operator::Eq);
    }

    #[test]
    fn unknown_suffix_is_rejected() {
        let ctx = NamespaceContext::flat("n");
        let err = Predicate::parse("name__frobnicate", Some(Value::from("x")), &ctx).unwrap_err();
        assert!(matches!(err, CoreError::UnknownOperator { .. }));
    }

    #[test]
    fn nullary_operator_rejects_non_truthy_argument() {
        let ctx = NamespaceContext::flat("n");
        let err = Predicate::parse("email__is_null", Some(Value::Bool(false)), &ctx).unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { .. }));
    }

    #[test]
    fn in_operator_requires_a_list() {
        let ctx = NamespaceContext::flat("n");
        let err = Predicate::parse("status__in", Some(Value::from("x")), &ctx).unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { .. }));
    }

    #[test]
    fn customized_alias_triple_resolves_custom_tokens() {
        let ctx = NamespaceContext::traversal("p", "w", "c", true);
        let p = Predicate::parse("c__name", Some(Value::from("Acme")), &ctx).unwrap();
        assert_eq!(p.alias, "c");
        assert_eq!(p.field, "name");
    }

    #[test]
    fn customized_alias_shadowing_a_builtin_token_wins_over_the_builtin() {
        // The caller names the to-alias literally "rel": "rel" now matches
        // both the built-in relationship namespace and the caller's
        // customized to-alias. Since the triple was customized, the custom
        // mapping must win.
        let ctx = NamespaceContext::traversal("a", "r", "rel", true);
        let p = Predicate::parse("rel__name", Some(Value::from("Acme")), &ctx).unwrap();
        assert_eq!(p.alias, "rel");
        assert_eq!(p.field, "name");
    }

    #[test]
    fn duplicate_custom_aliases_are_ambiguous() {
        let ctx = NamespaceContext::traversal("x", "x", "to", true);
        let err = Predicate::parse("x__name", Some(Value::from("Acme")), &ctx).unwrap_err();
        assert!(matches!(err, CoreError::AmbiguousNamespace { .. }));
    }

    #[test]
    fn resolve_field_applies_the_same_namespace_rule_as_predicates() {
        let ctx = NamespaceContext::traversal("from", "rel", "to", false);
        let (alias, field) = ctx.resolve_field("to__name").unwrap();
        assert_eq!(alias, "to");
        assert_eq!(field, "name");

        let (alias, field) = ctx.resolve_field("email").unwrap();
        assert_eq!(alias, "from");
        assert_eq!(field, "email");
    }
}
