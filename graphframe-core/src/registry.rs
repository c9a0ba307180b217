use crate::value::Row;
use crate::Value;

/// Allocates fresh placeholder names and accumulates the bound-value map for
/// a single compilation.
///
/// A registry is created fresh per compilation and discarded afterward —
/// there is no process-wide mutable state in this crate (§5 of the
/// specification this crate implements). The monotonic counter guarantees
/// placeholder names are unique within the statement they were allocated
/// for, even across deeply nested predicate trees.
#[derive(Debug, Default)]
pub struct ParamRegistry {
    counter: usize,
    parameters: Row,
}

impl ParamRegistry {
    /// Creates an empty registry with its counter reset to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under a fresh placeholder name `param_<k>` and returns
    /// that name, without the leading `$`. Nullary operators (`IS NULL`, `IS
    /// NOT NULL`) never call this.
    pub fn bind(&mut self, value: Value) -> String {
        let name = format!("param_{}", self.counter);
        self.counter += 1;
        self.parameters.insert(name.clone(), value);
        name
    }

    /// Binds a whole row batch under the literal name `batch`, as used by
    /// `NodeUpsert`/`RelUpsert`.
    pub fn bind_batch(&mut self, rows: Vec<Row>) {
        let batch = Value::List(rows.into_iter().map(Value::Map).collect());
        self.parameters.insert("batch".to_string(), batch);
    }

    /// Consumes the registry, returning the accumulated parameter map.
    pub fn into_parameters(self) -> Row {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_names_are_sequential_and_unique() {
        let mut registry = ParamRegistry::new();
        let p0 = registry.bind(Value::from(21i64));
        let p1 = registry.bind(Value::from("US"));
        assert_eq!(p0, "param_0");
        assert_eq!(p1, "param_1");
        let params = registry.into_parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params["param_0"], Value::from(21i64));
        assert_eq!(params["param_1"], Value::from("US"));
    }

    #[test]
    fn bind_batch_uses_the_literal_name() {
        let mut registry = ParamRegistry::new();
        registry.bind_batch(vec![]);
        let params = registry.into_parameters();
        assert!(params.contains_key("batch"));
    }
}
