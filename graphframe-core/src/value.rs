use std::collections::BTreeMap;
use std::fmt;

/// A bound parameter value, a row field, or a nested list/map element.
///
/// Modeled on `usql-ast::types::Value`, but holds live data bound into the
/// parameter map rather than unparsed source-text literals — this crate
/// never parses the backend's query language, so there is no
/// `Value::Number(String)`-style "text we haven't interpreted yet" variant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// `NULL`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// An ordered list of values, e.g. bound for `IN`/`list_append`.
    List(Vec<Value>),
    /// A property map, e.g. a `map_merge` argument or a row's fields.
    Map(Row),
}

/// A row of named fields bound together, e.g. one entry of a `NodeUpsert`'s
/// `rows` or the argument to `map_merge`.
pub type Row = BTreeMap<String, Value>;

impl Value {
    /// `true` for values the nullary operators (`exists`, `is_null`, …)
    /// consider a truthy argument: `Bool(true)`, or an omitted argument.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Null)
    }

    /// `true` if this value is a [`Value::List`], the kind the `in`/`not_in`
    /// operators require.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Row> for Value {
    fn from(v: Row) -> Self {
        Value::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_nullary_operator_rules() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(Value::Int(0).is_truthy());
    }

    #[test]
    fn display_quotes_strings_and_renders_lists() {
        assert_eq!(Value::from("SF").to_string(), "\"SF\"");
        assert_eq!(
            Value::from(vec![Value::from(1i64), Value::from(2i64)]).to_string(),
            "[1, 2]"
        );
    }
}
