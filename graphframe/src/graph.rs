use std::sync::Arc;

use graphframe_ast::FrameDescription;
use graphframe_core::Row;
use tracing::{debug, warn};

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::executor::Executor;
use crate::frame::{NodeFrame, ReadFrame, RelFrame};
use crate::schema::SchemaOps;

/// The facade's entry point: a cheaply-`Clone`-able handle bundling an
/// [`Executor`] and a [`GraphConfig`] (§6).
///
/// Frame and write-plan builders hold an owned clone of `Graph` rather than
/// a borrowed reference, so they are free of lifetime parameters — the
/// `Arc<dyn Executor>` makes cloning a `Graph` cheap.
#[derive(Clone)]
pub struct Graph {
    executor: Arc<dyn Executor>,
    config: GraphConfig,
}

impl Graph {
    /// Creates a `Graph` over `executor`, configured by `config`.
    pub fn new(executor: Arc<dyn Executor>, config: GraphConfig) -> Self {
        Self { executor, config }
    }

    /// A node-read builder over `label`.
    pub fn nodes(&self, label: impl Into<String>) -> NodeFrame {
        NodeFrame::from_parts(self.clone(), FrameDescription::node_read(label))
    }

    /// A relationship-read builder over `rel_type`.
    pub fn rels(&self, rel_type: impl Into<String>) -> RelFrame {
        RelFrame::from_parts(self.clone(), FrameDescription::rel_read(rel_type))
    }

    /// A schema-operation builder.
    pub fn schema(&self) -> SchemaOps {
        SchemaOps::new(self.clone())
    }

    /// The raw escape hatch (§6, §B): runs `text` with `params` verbatim,
    /// with no validation — symmetric to how the teacher crate's facade
    /// re-exports its component crates without adding logic of its own.
    pub fn cypher(&self, text: impl Into<String>, params: Row) -> Result<Vec<Row>, GraphError> {
        let text = text.into();
        let parameter_names: Vec<&str> = params.keys().map(String::as_str).collect();
        debug!(?parameter_names, "submitting raw cypher statement");
        self.executor.execute(&text, &params).map_err(|err| {
            warn!(error = %err, "raw cypher statement failed");
            GraphError::Execution(err)
        })
    }

    pub(crate) fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    pub(crate) fn config(&self) -> &GraphConfig {
        &self.config
    }
}
