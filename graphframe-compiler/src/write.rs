use std::collections::BTreeSet;

use graphframe_ast::{
    EndpointKey, FieldFilter, MutationKind, NamespaceContext, NullPolicy, Predicate, SchemaOpKind, Target,
    WriteDescription,
};
use graphframe_core::{validate_identifier, CoreError, ParamRegistry, RelUniquenessPolicy, Row};

use crate::filter::FilterCompiler;
use crate::statement::CompiledStatement;

/// Compiles [`WriteDescription`]s into one or more [`CompiledStatement`]s,
/// batching row-oriented upserts (§4.4).
pub struct WritePlanner;

impl WritePlanner {
    /// Compiles `desc`. `policy` is the `Graph`-configured
    /// [`RelUniquenessPolicy`], consulted only by `RelUpsert` when the
    /// description carries no `rel_key_fields`.
    pub fn compile(
        desc: &WriteDescription,
        policy: RelUniquenessPolicy,
    ) -> Result<Vec<CompiledStatement>, CoreError> {
        match desc {
            WriteDescription::NodeUpsert {
                label,
                rows,
                key_fields,
                patch_mode,
                null_policy,
                batch_size,
            } => Self::compile_node_upsert(label, rows, key_fields, *patch_mode, *null_policy, *batch_size),
            WriteDescription::RelUpsert {
                rel_type,
                rows,
                src,
                dst,
                rel_key_fields,
                patch_mode,
                null_policy,
                batch_size,
            } => Self::compile_rel_upsert(
                rel_type,
                rows,
                src,
                dst,
                rel_key_fields,
                *patch_mode,
                *null_policy,
                *batch_size,
                policy,
            ),
            WriteDescription::Patch {
                target,
                filters,
                updates,
            } => Ok(vec![Self::compile_patch(target, filters, updates)?]),
            WriteDescription::Delete {
                target,
                filters,
                detach,
            } => Ok(vec![Self::compile_delete(target, filters, *detach)?]),
            WriteDescription::AdvancedMutation {
                target,
                filters,
                kind,
                field,
                argument,
            } => Ok(vec![Self::compile_advanced_mutation(
                target,
                filters,
                *kind,
                field,
                argument.clone(),
            )?]),
            WriteDescription::SchemaOp {
                kind,
                label,
                properties,
            } => Ok(vec![Self::compile_schema_op(*kind, label, properties)?]),
        }
    }

    fn compile_node_upsert(
        label: &str,
        rows: &[Row],
        key_fields: &[String],
        patch_mode: bool,
        null_policy: NullPolicy,
        batch_size: usize,
    ) -> Result<Vec<CompiledStatement>, CoreError> {
        if rows.is_empty() {
            return Err(CoreError::EmptyInput {
                reason: "NodeUpsert requires at least one row".to_string(),
            });
        }
        if key_fields.is_empty() {
            return Err(CoreError::EmptyInput {
                reason: "NodeUpsert requires at least one key field".to_string(),
            });
        }

        let label_text = validate_identifier(label, true)?;
        let key_set: BTreeSet<&str> = key_fields.iter().map(String::as_str).collect();
        let field_set = Self::non_key_field_set(rows, &key_set);

        let key_pattern = Self::render_map_pattern(key_fields)?;

        let mut statements = Vec::new();
        for chunk in rows.chunks(batch_size.max(1)) {
            let mut registry = ParamRegistry::new();
            registry.bind_batch(chunk.to_vec());

            let mut text = format!("UNWIND $batch AS item MERGE (n:{label_text} {{{key_pattern}}})");
            if !field_set.is_empty() {
                let create_set = Self::render_set("n", &field_set, patch_mode, null_policy, false)?;
                let match_set = Self::render_set("n", &field_set, patch_mode, null_policy, true)?;
                text.push_str(&format!(" ON CREATE SET {create_set} ON MATCH SET {match_set}"));
            }
            statements.push(CompiledStatement {
                text,
                parameters: registry.into_parameters(),
            });
        }
        Ok(statements)
    }

    #[allow(clippy::too_many_arguments)]
    fn compile_rel_upsert(
        rel_type: &str,
        rows: &[Row],
        src: &EndpointKey,
        dst: &EndpointKey,
        rel_key_fields: &[String],
        patch_mode: bool,
        null_policy: NullPolicy,
        batch_size: usize,
        policy: RelUniquenessPolicy,
    ) -> Result<Vec<CompiledStatement>, CoreError> {
        if rows.is_empty() {
            return Err(CoreError::EmptyInput {
                reason: "RelUpsert requires at least one row".to_string(),
            });
        }
        if rel_key_fields.is_empty() && matches!(policy, RelUniquenessPolicy::Keyed) {
            return Err(CoreError::EmptyInput {
                reason: "RelUpsert under a Keyed uniqueness policy requires rel_key_fields".to_string(),
            });
        }

        let rel_type_text = validate_identifier(rel_type, true)?;
        let src_label = validate_identifier(&src.label, true)?;
        let src_key = validate_identifier(&src.key_field, true)?;
        let dst_label = validate_identifier(&dst.label, true)?;
        let dst_key = validate_identifier(&dst.key_field, true)?;

        let mut excluded: BTreeSet<&str> = BTreeSet::new();
        excluded.insert(src.key_field.as_str());
        excluded.insert(dst.key_field.as_str());
        for f in rel_key_fields {
            excluded.insert(f.as_str());
        }
        let field_set = Self::non_key_field_set(rows, &excluded);

        let rel_key_pattern = if rel_key_fields.is_empty() {
            String::new()
        } else {
            format!(" {{{}}}", Self::render_map_pattern(rel_key_fields)?)
        };

        let mut statements = Vec::new();
        for chunk in rows.chunks(batch_size.max(1)) {
            let mut registry = ParamRegistry::new();
            registry.bind_batch(chunk.to_vec());

            let mut text = format!(
                "UNWIND $batch AS item MERGE (a:{src_label} {{{src_key}: item.{src_key}}}) MERGE (b:{dst_label} {{{dst_key}: item.{dst_key}}}) MERGE (a)-[r:{rel_type_text}{rel_key_pattern}]->(b)"
            );
            if !field_set.is_empty() {
                let create_set = Self::render_set("r", &field_set, patch_mode, null_policy, false)?;
                let match_set = Self::render_set("r", &field_set, patch_mode, null_policy, true)?;
                text.push_str(&format!(" ON CREATE SET {create_set} ON MATCH SET {match_set}"));
            }
            statements.push(CompiledStatement {
                text,
                parameters: registry.into_parameters(),
            });
        }
        Ok(statements)
    }

    fn compile_patch(
        target: &Target,
        filters: &[FieldFilter],
        updates: &Row,
    ) -> Result<CompiledStatement, CoreError> {
        if updates.is_empty() {
            return Err(CoreError::EmptyInput {
                reason: "Patch requires at least one update field".to_string(),
            });
        }
        let (alias, pattern) = Self::target_pattern(target)?;
        let ctx = NamespaceContext::flat(alias.clone());
        let mut registry = ParamRegistry::new();
        let where_clause = Self::compile_where(filters, &ctx, &mut registry)?;

        let set_entries = updates
            .iter()
            .map(|(field, value)| {
                let emitted = validate_identifier(field, true)?;
                let placeholder = registry.bind(value.clone());
                Ok(format!("{alias}.{emitted} = ${placeholder}"))
            })
            .collect::<Result<Vec<_>, CoreError>>()?
            .join(", ");

        let mut text = format!("MATCH {pattern}");
        Self::push_where(&mut text, where_clause);
        text.push_str(&format!(" SET {set_entries}"));
        Ok(CompiledStatement {
            text,
            parameters: registry.into_parameters(),
        })
    }

    fn compile_delete(
        target: &Target,
        filters: &[FieldFilter],
        detach: bool,
    ) -> Result<CompiledStatement, CoreError> {
        let (alias, pattern) = Self::target_pattern(target)?;
        let ctx = NamespaceContext::flat(alias.clone());
        let mut registry = ParamRegistry::new();
        let where_clause = Self::compile_where(filters, &ctx, &mut registry)?;

        let mut text = format!("MATCH {pattern}");
        Self::push_where(&mut text, where_clause);
        let detach_kw = if detach && matches!(target, Target::Node(_)) {
            "DETACH "
        } else {
            ""
        };
        text.push_str(&format!(" {detach_kw}DELETE {alias}"));
        Ok(CompiledStatement {
            text,
            parameters: registry.into_parameters(),
        })
    }

    fn compile_advanced_mutation(
        target: &Target,
        filters: &[FieldFilter],
        kind: MutationKind,
        field: &str,
        argument: Option<graphframe_core::Value>,
    ) -> Result<CompiledStatement, CoreError> {
        let (alias, pattern) = Self::target_pattern(target)?;
        let ctx = NamespaceContext::flat(alias.clone());
        let mut registry = ParamRegistry::new();
        let where_clause = Self::compile_where(filters, &ctx, &mut registry)?;
        let field_text = validate_identifier(field, true)?;

        let require_argument = |kind: MutationKind, argument: Option<graphframe_core::Value>| {
            argument.ok_or_else(|| CoreError::EmptyInput {
                reason: format!("{kind:?} requires an argument"),
            })
        };

        let mutation = match kind {
            MutationKind::Inc => {
                let p = registry.bind(require_argument(kind, argument)?);
                format!("SET {alias}.{field_text} = coalesce({alias}.{field_text}, 0) + ${p}")
            }
            MutationKind::Unset => format!("REMOVE {alias}.{field_text}"),
            MutationKind::ListAppend => {
                let p = registry.bind(require_argument(kind, argument)?);
                format!("SET {alias}.{field_text} = coalesce({alias}.{field_text}, []) + ${p}")
            }
            MutationKind::ListRemove => {
                let p = registry.bind(require_argument(kind, argument)?);
                format!("SET {alias}.{field_text} = [x IN coalesce({alias}.{field_text}, []) WHERE x <> ${p}]")
            }
            MutationKind::MapMerge => {
                let p = registry.bind(require_argument(kind, argument)?);
                format!("SET {alias}.{field_text} += ${p}")
            }
        };

        let mut text = format!("MATCH {pattern}");
        Self::push_where(&mut text, where_clause);
        text.push(' ');
        text.push_str(&mutation);
        Ok(CompiledStatement {
            text,
            parameters: registry.into_parameters(),
        })
    }

    fn compile_schema_op(
        kind: SchemaOpKind,
        label: &str,
        properties: &[String],
    ) -> Result<CompiledStatement, CoreError> {
        if properties.is_empty() {
            return Err(CoreError::EmptyInput {
                reason: "schema operation requires at least one property".to_string(),
            });
        }
        let label_text = validate_identifier(label, true)?;
        let props = properties
            .iter()
            .map(|p| validate_identifier(p, true))
            .collect::<Result<Vec<_>, CoreError>>()?;

        let text = match kind {
            SchemaOpKind::EnsureIndex => format!(
                "CREATE INDEX IF NOT EXISTS FOR (n:{label_text}) ON ({})",
                Self::qualified_list(&props)
            ),
            SchemaOpKind::EnsureUnique => format!(
                "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{label_text}) REQUIRE n.{} IS UNIQUE",
                props[0]
            ),
            SchemaOpKind::EnsureNodeKey => format!(
                "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{label_text}) REQUIRE ({}) IS NODE KEY",
                Self::qualified_list(&props)
            ),
            SchemaOpKind::DropIndex => format!(
                "DROP INDEX IF EXISTS FOR (n:{label_text}) ON ({})",
                Self::qualified_list(&props)
            ),
            SchemaOpKind::DropUnique => format!(
                "DROP CONSTRAINT IF EXISTS FOR (n:{label_text}) REQUIRE n.{} IS UNIQUE",
                props[0]
            ),
        };
        Ok(CompiledStatement {
            text,
            parameters: Row::new(),
        })
    }

    fn qualified_list(props: &[String]) -> String {
        props.iter().map(|p| format!("n.{p}")).collect::<Vec<_>>().join(", ")
    }

    fn target_pattern(target: &Target) -> Result<(String, String), CoreError> {
        match target {
            Target::Node(label) => {
                let label = validate_identifier(label, true)?;
                Ok(("n".to_string(), format!("(n:{label})")))
            }
            Target::Rel(rel_type) => {
                let rel_type = validate_identifier(rel_type, true)?;
                Ok(("r".to_string(), format!("()-[r:{rel_type}]-()")))
            }
        }
    }

    fn compile_where(
        filters: &[FieldFilter],
        ctx: &NamespaceContext,
        registry: &mut ParamRegistry,
    ) -> Result<Option<String>, CoreError> {
        let predicates: Vec<Predicate> = filters
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

    /// The non-key fields present across `rows`, sorted for a deterministic
    /// emission order (P4).
    fn non_key_field_set<'a>(rows: &'a [Row], excluded: &BTreeSet<&str>) -> BTreeSet<&'a str> {
        let mut field_set = BTreeSet::new();
        for row in rows {
            for key in row.keys() {
                if !excluded.contains(key.as_str()) {
                    field_set.insert(key.as_str());
                }
            }
        }
        field_set
    }

    fn render_map_pattern(fields: &[String]) -> Result<String, CoreError> {
        fields
            .iter()
            .map(|f| {
                let emitted = validate_identifier(f, true)?;
                Ok(format!("{emitted}: item.{emitted}"))
            })
            .collect::<Result<Vec<_>, CoreError>>()
            .map(|entries| entries.join(", "))
    }

    /// Renders one `ON CREATE SET`/`ON MATCH SET` clause body. Per the
    /// NodeUpsert/RelUpsert null-policy rule: outside patch mode, and in
    /// patch mode under `SetNulls`, both clauses set `item.f` directly,
    /// relying on the backend's null-for-missing-map-key semantics. Only
    /// patch mode under `Keep`, on `ON MATCH SET`, falls back to
    /// `coalesce(item.f, alias.f)` — there is no prior value to fall back
    /// to on `ON CREATE SET`.
    fn render_set(
        alias: &str,
        field_set: &BTreeSet<&str>,
        patch_mode: bool,
        null_policy: NullPolicy,
        on_match: bool,
    ) -> Result<String, CoreError> {
        field_set
            .iter()
            .map(|f| {
                let emitted = validate_identifier(f, true)?;
                if patch_mode && on_match && matches!(null_policy, NullPolicy::Keep) {
                    Ok(format!("{alias}.{emitted} = coalesce(item.{emitted}, {alias}.{emitted})"))
                } else {
                    Ok(format!("{alias}.{emitted} = item.{emitted}"))
                }
            })
            .collect::<Result<Vec<_>, CoreError>>()
            .map(|entries| entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphframe_core::Value;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn node_upsert_emits_merge_and_both_set_clauses() {
        let desc = WriteDescription::node_upsert(
            "Person",
            vec![row(&[("email", Value::from("j@x")), ("name", Value::from("J"))])],
            vec!["email".to_string()],
        );
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].text,
            "UNWIND $batch AS item MERGE (n:Person {email: item.email}) ON CREATE SET n.name = item.name ON MATCH SET n.name = item.name"
        );
    }

    #[test]
    fn node_upsert_batches_rows() {
        let rows: Vec<Row> = (0..5)
            .map(|i| row(&[("id", Value::from(i as i64)), ("name", Value::from("x"))]))
            .collect();
        let desc = WriteDescription::node_upsert("Thing", rows.clone(), vec!["id".to_string()])
            .with_batch_size(2);
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert_eq!(statements.len(), 3);
        let recombined: Vec<Value> = statements
            .iter()
            .flat_map(|s| match &s.parameters["batch"] {
                Value::List(items) => items.clone(),
                _ => panic!("expected a list"),
            })
            .collect();
        assert_eq!(recombined, rows.into_iter().map(Value::Map).collect::<Vec<_>>());
    }

    #[test]
    fn patch_mode_keep_only_coalesces_on_match() {
        let desc = WriteDescription::node_upsert(
            "Person",
            vec![row(&[("email", Value::from("j@x")), ("name", Value::from("J"))])],
            vec!["email".to_string()],
        )
        .with_patch_mode(true)
        .with_null_policy(NullPolicy::Keep);
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert!(statements[0].text.contains("ON CREATE SET n.name = item.name"));
        assert!(statements[0]
            .text
            .contains("ON MATCH SET n.name = coalesce(item.name, n.name)"));
    }

    #[test]
    fn empty_rows_fail_with_empty_input() {
        let desc = WriteDescription::node_upsert("Person", vec![], vec!["email".to_string()]);
        let err = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput { .. }));
    }

    #[test]
    fn rel_upsert_merges_endpoints_then_relationship() {
        let desc = WriteDescription::rel_upsert(
            "WORKS_AT",
            vec![row(&[
                ("email", Value::from("j@x")),
                ("domain", Value::from("c.com")),
                ("role", Value::from("Eng")),
                ("since", Value::from(2020i64)),
            ])],
            EndpointKey::new("Person", "email"),
            EndpointKey::new("Company", "domain"),
            vec!["role".to_string()],
        );
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert_eq!(
            statements[0].text,
            "UNWIND $batch AS item MERGE (a:Person {email: item.email}) MERGE (b:Company {domain: item.domain}) MERGE (a)-[r:WORKS_AT {role: item.role}]->(b) ON CREATE SET r.since = item.since ON MATCH SET r.since = item.since"
        );
    }

    #[test]
    fn rel_upsert_without_rel_key_under_keyed_policy_fails() {
        let desc = WriteDescription::rel_upsert(
            "WORKS_AT",
            vec![row(&[("email", Value::from("j@x")), ("domain", Value::from("c.com"))])],
            EndpointKey::new("Person", "email"),
            EndpointKey::new("Company", "domain"),
            vec![],
        );
        let err = WritePlanner::compile(&desc, RelUniquenessPolicy::Keyed).unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput { .. }));
    }

    #[test]
    fn advanced_mutation_inc_uses_coalesce() {
        let desc = WriteDescription::AdvancedMutation {
            target: Target::Node("Product".to_string()),
            filters: vec![FieldFilter::new("category", Value::from("Electronics"))],
            kind: MutationKind::Inc,
            field: "views".to_string(),
            argument: Some(Value::from(1i64)),
        };
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert_eq!(
            statements[0].text,
            "MATCH (n:Product) WHERE n.category = $param_0 SET n.views = coalesce(n.views, 0) + $param_1"
        );
    }

    #[test]
    fn delete_node_detaches_only_for_nodes() {
        let desc = WriteDescription::Delete {
            target: Target::Node("Person".to_string()),
            filters: vec![],
            detach: true,
        };
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert_eq!(statements[0].text, "MATCH (n:Person) DETACH DELETE n");
    }

    #[test]
    fn schema_op_ensure_unique() {
        let desc = WriteDescription::SchemaOp {
            kind: SchemaOpKind::EnsureUnique,
            label: "Person".to_string(),
            properties: vec!["email".to_string()],
        };
        let statements = WritePlanner::compile(&desc, RelUniquenessPolicy::Single).unwrap();
        assert_eq!(
            statements[0].text,
            "CREATE CONSTRAINT IF NOT EXISTS FOR (n:Person) REQUIRE n.email IS UNIQUE"
        );
    }
}
