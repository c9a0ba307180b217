use graphframe_ast::{
    Direction, FrameDescription, FrameKind, NamespaceContext, OrderField, Predicate, TraversalAliases,
    TraversalDirection,
};
use graphframe_core::{validate_identifier, CoreError, ParamRegistry};

use crate::filter::FilterCompiler;
use crate::statement::CompiledStatement;

/// Compiles [`FrameDescription`]s into complete read statements: node
/// reads, relationship reads, traversals, and back-to-origin reads (§4.3).
pub struct FrameCompiler;

impl FrameCompiler {
    /// Compiles `desc` into a `(text, parameters)` pair. A fresh
    /// [`ParamRegistry`] is created for this compilation and discarded
    /// afterward (§3's lifecycle: "created fresh per compilation").
    pub fn compile(desc: &FrameDescription) -> Result<CompiledStatement, CoreError> {
        let mut registry = ParamRegistry::new();
        let text = match &desc.kind {
            FrameKind::NodeRead { label } => Self::compile_node_read(desc, label, &mut registry)?,
            FrameKind::RelRead { rel_type } => Self::compile_rel_read(desc, rel_type, &mut registry)?,
            FrameKind::Traversal {
                from_label,
                rel_type,
                to_label,
                direction,
                aliases,
            } => Self::compile_traversal(
                desc,
                from_label.as_deref(),
                rel_type,
                to_label,
                *direction,
                aliases,
                false,
                &mut registry,
            )?,
            FrameKind::BackToOrigin {
                from_label,
                rel_type,
                to_label,
                direction,
                aliases,
            } => Self::compile_traversal(
                desc,
                from_label.as_deref(),
                rel_type,
                to_label,
                *direction,
                aliases,
                true,
                &mut registry,
            )?,
        };
        Ok(CompiledStatement {
            text,
            parameters: registry.into_parameters(),
        })
    }

    fn compile_node_read(
        desc: &FrameDescription,
        label: &str,
        registry: &mut ParamRegistry,
    ) -> Result<String, CoreError> {
        let label = validate_identifier(label, true)?;
        let ctx = NamespaceContext::flat("n");
        let where_clause = Self::compile_where(desc, &ctx, registry)?;

        let mut text = format!("MATCH (n:{label})");
        Self::push_where(&mut text, where_clause);
        text.push_str(" RETURN ");
        text.push_str(&Self::render_projection(desc, "n", &ctx)?);
        Self::push_order_by(&mut text, desc, &ctx)?;
        Self::push_skip_limit(&mut text, desc);
        Ok(text)
    }

    fn compile_rel_read(
        desc: &FrameDescription,
        rel_type: &str,
        registry: &mut ParamRegistry,
    ) -> Result<String, CoreError> {
        let rel_type = validate_identifier(rel_type, true)?;
        let ctx = NamespaceContext::flat("r");
        let where_clause = Self::compile_where(desc, &ctx, registry)?;

        let mut text = format!("MATCH ()-[r:{rel_type}]-()");
        Self::push_where(&mut text, where_clause);
        text.push_str(" RETURN ");
        text.push_str(&Self::render_projection(desc, "r", &ctx)?);
        Self::push_order_by(&mut text, desc, &ctx)?;
        Self::push_skip_limit(&mut text, desc);
        Ok(text)
    }

    #[allow(clippy::too_many_arguments)]
    fn compile_traversal(
        desc: &FrameDescription,
        from_label: Option<&str>,
        rel_type: &str,
        to_label: &str,
        direction: TraversalDirection,
        aliases: &TraversalAliases,
        back_to_origin: bool,
        registry: &mut ParamRegistry,
    ) -> Result<String, CoreError> {
        let from_alias = validate_identifier(&aliases.from, true)?;
        let rel_alias = validate_identifier(&aliases.rel, true)?;
        let to_alias = validate_identifier(&aliases.to, true)?;
        let rel_type = validate_identifier(rel_type, true)?;
        let to_label = validate_identifier(to_label, true)?;
        let from_pattern = match from_label {
            Some(label) => format!("{from_alias}:{}", validate_identifier(label, true)?),
            None => from_alias.clone(),
        };

        let pattern = match direction {
            TraversalDirection::Out => {
                format!("({from_pattern})-[{rel_alias}:{rel_type}]->({to_alias}:{to_label})")
            }
            TraversalDirection::In => {
                format!("({from_pattern})<-[{rel_alias}:{rel_type}]-({to_alias}:{to_label})")
            }
            TraversalDirection::Both => {
                format!("({from_pattern})-[{rel_alias}:{rel_type}]-({to_alias}:{to_label})")
            }
        };

        let ctx = NamespaceContext::traversal(
            aliases.from.clone(),
            aliases.rel.clone(),
            aliases.to.clone(),
            aliases.customized,
        );
        let where_clause = Self::compile_where(desc, &ctx, registry)?;

        let mut text = if back_to_origin {
            format!("MATCH p = {pattern}")
        } else {
            format!("MATCH {pattern}")
        };
        Self::push_where(&mut text, where_clause);

        if back_to_origin {
            text.push_str(&format!(" WITH {from_alias}"));
            text.push_str(" RETURN ");
            text.push_str(&Self::render_projection(desc, &from_alias, &ctx)?);
        } else {
            text.push_str(" RETURN ");
            let default = format!("{from_alias}, {rel_alias}, {to_alias}");
            text.push_str(&Self::render_projection_with_default(desc, &default, &ctx)?);
        }
        Self::push_order_by(&mut text, desc, &ctx)?;
        Self::push_skip_limit(&mut text, desc);
        Ok(text)
    }

    fn compile_where(
        desc: &FrameDescription,
        ctx: &NamespaceContext,
        registry: &mut ParamRegistry,
    ) -> Result<Option<String>, CoreError> {
        let predicates: Vec<Predicate> = desc
            .filters
            .iter()
            .map(|f| Predicate::parse(&f.key, f.value.clone(), ctx))
            .collect::<Result<_, _>>()?;
        Ok(FilterCompiler::compile(&predicates, registry))
    }

    fn push_where(text: &mut String, where_clause: Option<String>) {
        if let Some(clause) = where_clause {
            text.push_str(" WHERE ");
            text.push_str(&clause);
        }
    }

    fn render_projection(
        desc: &FrameDescription,
        default_alias: &str,
        ctx: &NamespaceContext,
    ) -> Result<String, CoreError> {
        Self::render_projection_with_default(desc, default_alias, ctx)
    }

    fn render_projection_with_default(
        desc: &FrameDescription,
        default: &str,
        ctx: &NamespaceContext,
    ) -> Result<String, CoreError> {
        if desc.projection.is_empty() {
            return Ok(default.to_string());
        }
        desc.projection
            .iter()
            .map(|key| {
                let (alias, field) = ctx.resolve_field(key)?;
                let alias = validate_identifier(&alias, true)?;
                let field = validate_identifier(&field, true)?;
                Ok(format!("{alias}.{field}"))
            })
            .collect::<Result<Vec<_>, CoreError>>()
            .map(|fields| fields.join(", "))
    }

    fn push_order_by(
        text: &mut String,
        desc: &FrameDescription,
        ctx: &NamespaceContext,
    ) -> Result<(), CoreError> {
        if desc.order_by.is_empty() {
            return Ok(());
        }
        let entries = desc
            .order_by
            .iter()
            .map(|OrderField { key, direction }| {
                let (alias, field) = ctx.resolve_field(key)?;
                let alias = validate_identifier(&alias, true)?;
                let field = validate_identifier(&field, true)?;
                let dir = match direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                Ok(format!("{alias}.{field} {dir}"))
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        text.push_str(" ORDER BY ");
        text.push_str(&entries.join(", "));
        Ok(())
    }

    fn push_skip_limit(text: &mut String, desc: &FrameDescription) {
        if let Some(offset) = desc.offset {
            text.push_str(&format!(" SKIP {offset}"));
        }
        if let Some(limit) = desc.limit {
            text.push_str(&format!(" LIMIT {limit}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphframe_ast::FieldFilter;
    use graphframe_core::Value;

    #[test]
    fn node_read_with_filters_and_projection() {
        let desc = FrameDescription::node_read("Person")
            .with_filter(FieldFilter::new("age__gte", Value::from(21i64)))
            .with_filter(FieldFilter::new("country", Value::from("US")))
            .with_projection(["name".to_string(), "email".to_string()])
            .with_limit(10);
        let compiled = FrameCompiler::compile(&desc).unwrap();
        assert_eq!(
            compiled.text,
            "MATCH (n:Person) WHERE n.age >= $param_0 AND n.country = $param_1 RETURN n.name, n.email LIMIT 10"
        );
        assert_eq!(compiled.parameters["param_0"], Value::from(21i64));
        assert_eq!(compiled.parameters["param_1"], Value::from("US"));
    }

    #[test]
    fn rel_read_default_projection() {
        let desc = FrameDescription::rel_read("WORKS_AT")
            .with_filter(FieldFilter::new("since__gte", Value::from(2020i64)))
            .with_limit(50);
        let compiled = FrameCompiler::compile(&desc).unwrap();
        assert_eq!(
            compiled.text,
            "MATCH ()-[r:WORKS_AT]-() WHERE r.since >= $param_0 RETURN r LIMIT 50"
        );
    }

    #[test]
    fn traversal_out_with_namespaced_filters() {
        let desc = FrameDescription::node_read("Person")
            .traverse(
                "WORKS_AT",
                "Company",
                TraversalDirection::Out,
                TraversalAliases::default(),
            )
            .with_filter(FieldFilter::new("rel__since__gte", Value::from(2020i64)))
            .with_filter(FieldFilter::new("to__city", Value::from("SF")));
        let compiled = FrameCompiler::compile(&desc).unwrap();
        assert_eq!(
            compiled.text,
            "MATCH (from:Person)-[rel:WORKS_AT]->(to:Company) WHERE rel.since >= $param_0 AND to.city = $param_1 RETURN from, rel, to"
        );
    }

    #[test]
    fn back_to_origin_projects_origin_alias_behind_with() {
        let desc = FrameDescription::node_read("Person")
            .traverse(
                "WORKS_AT",
                "Company",
                TraversalDirection::Out,
                TraversalAliases::default(),
            )
            .back()
            .with_filter(FieldFilter::new("name", Value::from("Alice")));
        let compiled = FrameCompiler::compile(&desc).unwrap();
        assert_eq!(
            compiled.text,
            "MATCH p = (from:Person)-[rel:WORKS_AT]->(to:Company) WHERE from.name = $param_0 WITH from RETURN from"
        );
    }

    #[test]
    fn limit_zero_is_emitted_literally() {
        let desc = FrameDescription::node_read("Person").with_limit(0);
        let compiled = FrameCompiler::compile(&desc).unwrap();
        assert!(compiled.text.ends_with("LIMIT 0"));
    }

    #[test]
    fn order_by_renders_direction() {
        let desc = FrameDescription::node_read("Person").with_order_by([OrderField {
            key: "name".to_string(),
            direction: Direction::Desc,
        }]);
        let compiled = FrameCompiler::compile(&desc).unwrap();
        assert_eq!(compiled.text, "MATCH (n:Person) RETURN n ORDER BY n.name DESC");
    }

    #[test]
    fn invalid_label_fails_to_compile() {
        let desc = FrameDescription::node_read("bad-label");
        let err = FrameCompiler::compile(&desc).unwrap_err();
        assert!(matches!(err, CoreError::InvalidIdentifier { .. }));
    }
}
