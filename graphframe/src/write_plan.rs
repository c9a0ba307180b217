use graphframe_ast::WriteDescription;
use graphframe_compiler::{CompiledStatement, WritePlanner};
use graphframe_core::Row;
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::graph::Graph;

/// A write plan's lifecycle state (§4.4's "Write-plan lifecycle").
///
/// The specification names a fifth state, `Closed`, reached after
/// `Committed`/`Failed`; this crate does not model it as a distinct
/// variant. `Closed` is never produced by an operation of its own — it is
/// the state a plan value is in once dropped, which ordinary Rust value
/// ownership already gives for free. See `DESIGN.md`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PlanState {
    /// The description has been built but not yet compiled.
    Described,
    /// `compile` has produced statements for the current description.
    Compiled,
    /// `preview` has been called; statements are unchanged from `compile`.
    Previewed,
    /// `commit` has run to completion.
    Committed,
    /// `commit` was attempted and an execution failure was returned.
    Failed,
}

/// A write description plus its lifecycle (§4.4, §6): `Graph`'s write entry
/// points (`upsert`, `patch`, `delete`, …) and `SchemaOps`'s schema methods
/// all return one of these.
pub struct WritePlan {
    graph: Graph,
    description: WriteDescription,
    state: PlanState,
    statements: Option<Vec<CompiledStatement>>,
}

impl WritePlan {
    pub(crate) fn new(graph: Graph, description: WriteDescription) -> Self {
        Self {
            graph,
            description,
            state: PlanState::Described,
            statements: None,
        }
    }

    /// The plan's current lifecycle state.
    pub fn state(&self) -> PlanState {
        self.state
    }

    /// Compiles the description into one or more statements, caching the
    /// result. Idempotent and repeatable prior to `commit` (§4.4).
    pub fn compile(&mut self) -> Result<&[CompiledStatement], GraphError> {
        if self.statements.is_none() {
            let statements =
                WritePlanner::compile(&self.description, self.graph.config().rel_uniqueness_policy())?;
            self.statements = Some(statements);
            if self.state == PlanState::Described {
                self.state = PlanState::Compiled;
            }
        }
        Ok(self.statements.as_deref().expect("just populated"))
    }

    /// Returns the same `(text, parameters)` pairs `compile` would produce
    /// (§9's third Open Question: "same as compile for now").
    pub fn preview(&mut self) -> Result<&[CompiledStatement], GraphError> {
        self.compile()?;
        self.state = PlanState::Previewed;
        Ok(self.statements.as_deref().expect("compile populated this"))
    }

    /// Executes the compiled statements in order, irrevocably. Permitted at
    /// most once (P5): calling `commit` on an already-`Committed` or
    /// `Failed` plan fails with [`GraphError::PlanFinalized`] without
    /// touching the execution collaborator.
    pub fn commit(&mut self) -> Result<Vec<Row>, GraphError> {
        if matches!(self.state, PlanState::Committed | PlanState::Failed) {
            return Err(GraphError::PlanFinalized { state: self.state });
        }
        let statements = self.compile()?.to_vec();
        let mut rows = Vec::new();
        for statement in &statements {
            let parameter_names: Vec<&str> = statement.parameters.keys().map(String::as_str).collect();
            debug!(?parameter_names, "submitting write statement");
            match self.graph.executor().execute(&statement.text, &statement.parameters) {
                Ok(result) => rows.extend(result),
                Err(err) => {
                    warn!(error = %err, "write statement failed");
                    self.state = PlanState::Failed;
                    return Err(GraphError::Execution(err));
                }
            }
        }
        self.state = PlanState::Committed;
        Ok(rows)
    }

    /// Runs each compiled statement prefixed with `EXPLAIN` (§4.4).
    pub fn explain(&mut self) -> Result<Vec<Row>, GraphError> {
        self.run_read_only(CompiledStatement::explained)
    }

    /// Runs each compiled statement prefixed with `PROFILE` (§4.4).
    pub fn profile(&mut self) -> Result<Vec<Row>, GraphError> {
        self.run_read_only(CompiledStatement::profiled)
    }

    fn run_read_only(
        &mut self,
        transform: impl Fn(&CompiledStatement) -> CompiledStatement,
    ) -> Result<Vec<Row>, GraphError> {
        let statements = self.compile()?.to_vec();
        let mut rows = Vec::new();
        for statement in &statements {
            let statement = transform(statement);
            let parameter_names: Vec<&str> = statement.parameters.keys().map(String::as_str).collect();
            debug!(?parameter_names, "submitting read-only variant statement");
            rows.extend(
                self.graph
                    .executor()
                    .execute(&statement.text, &statement.parameters)
                    .map_err(|err| {
                        warn!(error = %err, "read-only variant statement failed");
                        GraphError::Execution(err)
                    })?,
            );
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::executor::Executor;
    use graphframe_ast::WriteDescription;
    use graphframe_core::Value;
    use std::sync::Arc;

    struct Recorder;

    impl Executor for Recorder {
        fn execute(&self, _text: &str, _parameters: &Row) -> Result<Vec<Row>, crate::error::ExecutionError> {
            Ok(vec![])
        }
    }

    fn plan() -> WritePlan {
        let graph = Graph::new(Arc::new(Recorder), GraphConfig::new("bolt://localhost"));
        let mut row = Row::new();
        row.insert("email".to_string(), Value::from("j@x"));
        WritePlan::new(
            graph,
            WriteDescription::node_upsert("Person", vec![row], vec!["email".to_string()]),
        )
    }

    #[test]
    fn commit_twice_fails_the_second_time() {
        let mut plan = plan();
        assert!(plan.commit().is_ok());
        let err = plan.commit().unwrap_err();
        assert!(matches!(err, GraphError::PlanFinalized { state: PlanState::Committed }));
    }

    #[test]
    fn preview_matches_compile() {
        let mut plan = plan();
        let compiled = plan.compile().unwrap().to_vec();
        let previewed = plan.preview().unwrap().to_vec();
        assert_eq!(compiled, previewed);
    }
}
