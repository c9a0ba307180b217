use graphframe_ast::{Operator, Predicate};
use graphframe_core::{validate_identifier, ParamRegistry, Value};

/// Renders a list of resolved predicates into a conjunctive WHERE fragment
/// (§4.2), threading a [`ParamRegistry`] for value binding.
pub struct FilterCompiler;

impl FilterCompiler {
    /// Compiles `predicates` into a single WHERE fragment, or `None` when
    /// `predicates` is empty (the empty-predicate-list boundary in §8).
    /// Predicates are joined ` AND `, in the order given — the core's
    /// observable ordering contract (§5).
    pub fn compile(predicates: &[Predicate], registry: &mut ParamRegistry) -> Option<String> {
        if predicates.is_empty() {
            return None;
        }
        Some(
            predicates
                .iter()
                .map(|p| Self::render(p, registry))
                .collect::<Vec<_>>()
                .join(" AND "),
        )
    }

    fn render(predicate: &Predicate, registry: &mut ParamRegistry) -> String {
        // `strict=false` never fails; the alias/field strings here are
        // already namespace-resolved identifiers, not free-form text.
        let alias = validate_identifier(&predicate.alias, false)
            .expect("alias validation cannot fail in non-strict mode");
        let field = validate_identifier(&predicate.field, false)
            .expect("field validation cannot fail in non-strict mode");
        let target = format!("{alias}.{field}");

        match predicate.operator {
            Operator::Eq => format!("{target} = ${}", Self::bind(predicate, registry)),
            Operator::Ne => format!("{target} <> ${}", Self::bind(predicate, registry)),
            Operator::Gt => format!("{target} > ${}", Self::bind(predicate, registry)),
            Operator::Gte => format!("{target} >= ${}", Self::bind(predicate, registry)),
            Operator::Lt => format!("{target} < ${}", Self::bind(predicate, registry)),
            Operator::Lte => format!("{target} <= ${}", Self::bind(predicate, registry)),
            Operator::In => Self::render_list(&target, predicate, registry, false),
            Operator::NotIn => Self::render_list(&target, predicate, registry, true),
            Operator::Contains => format!("{target} CONTAINS ${}", Self::bind(predicate, registry)),
            Operator::StartsWith => {
                format!("{target} STARTS WITH ${}", Self::bind(predicate, registry))
            }
            Operator::EndsWith => {
                format!("{target} ENDS WITH ${}", Self::bind(predicate, registry))
            }
            Operator::Regex => format!("{target} =~ ${}", Self::bind(predicate, registry)),
            Operator::Exists => format!("{target} IS NOT NULL"),
            Operator::IsNull => format!("{target} IS NULL"),
        }
    }

    /// Binds a scalar/list predicate's value and returns the placeholder
    /// name. `Predicate::parse` guarantees a value is present for every
    /// non-nullary operator.
    fn bind(predicate: &Predicate, registry: &mut ParamRegistry) -> String {
        let value = predicate
            .value
            .clone()
            .expect("non-nullary predicates always carry a value");
        registry.bind(value)
    }

    /// `in`/`not_in` with an empty list compile to the constant `FALSE`/
    /// `TRUE` rather than binding an empty parameter (§8's boundary
    /// behavior: "not omitted").
    fn render_list(target: &str, predicate: &Predicate, registry: &mut ParamRegistry, negated: bool) -> String {
        match &predicate.value {
            Some(Value::List(items)) if items.is_empty() => {
                if negated { "TRUE".to_string() } else { "FALSE".to_string() }
            }
            _ => {
                let placeholder = Self::bind(predicate, registry);
                if negated {
                    format!("NOT {target} IN ${placeholder}")
                } else {
                    format!("{target} IN ${placeholder}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphframe_ast::NamespaceContext;

    fn predicate(key: &str, value: Option<Value>) -> Predicate {
        Predicate::parse(key, value, &NamespaceContext::flat("n")).unwrap()
    }

    #[test]
    fn empty_predicate_list_yields_no_where_clause() {
        let mut registry = ParamRegistry::new();
        assert_eq!(FilterCompiler::compile(&[], &mut registry), None);
    }

    #[test]
    fn binary_operator_binds_its_value() {
        let mut registry = ParamRegistry::new();
        let p = predicate("age__gte", Some(Value::from(21i64)));
        let clause = FilterCompiler::compile(&[p], &mut registry).unwrap();
        assert_eq!(clause, "n.age >= $param_0");
        assert_eq!(registry.into_parameters()["param_0"], Value::from(21i64));
    }

    #[test]
    fn empty_in_list_compiles_to_false() {
        let mut registry = ParamRegistry::new();
        let p = predicate("status__in", Some(Value::List(vec![])));
        let clause = FilterCompiler::compile(&[p], &mut registry).unwrap();
        assert_eq!(clause, "FALSE");
        assert!(registry.into_parameters().is_empty());
    }

    #[test]
    fn empty_not_in_list_compiles_to_true() {
        let mut registry = ParamRegistry::new();
        let p = predicate("status__not_in", Some(Value::List(vec![])));
        let clause = FilterCompiler::compile(&[p], &mut registry).unwrap();
        assert_eq!(clause, "TRUE");
    }

    #[test]
    fn nullary_operator_binds_no_parameter() {
        let mut registry = ParamRegistry::new();
        let p = predicate("email__is_null", None);
        let clause = FilterCompiler::compile(&[p], &mut registry).unwrap();
        assert_eq!(clause, "n.email IS NULL");
        assert!(registry.into_parameters().is_empty());
    }

    #[test]
    fn multiple_predicates_join_with_and_in_order() {
        let mut registry = ParamRegistry::new();
        let clause = FilterCompiler::compile(
            &[
                predicate("age__gte", Some(Value::from(21i64))),
                predicate("country", Some(Value::from("US"))),
            ],
            &mut registry,
        )
        .unwrap();
        assert_eq!(clause, "n.age >= $param_0 AND n.country = $param_1");
    }
}
