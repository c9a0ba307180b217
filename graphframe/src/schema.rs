use graphframe_ast::{SchemaOpKind, WriteDescription};

use crate::graph::Graph;
use crate::write_plan::WritePlan;

/// Schema-management builders: `Graph::schema()` (§4.4's schema-op table).
pub struct SchemaOps {
    graph: Graph,
}

impl SchemaOps {
    pub(crate) fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn plan(&self, kind: SchemaOpKind, label: impl Into<String>, properties: Vec<String>) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::SchemaOp {
                kind,
                label: label.into(),
                properties,
            },
        )
    }

    /// `CREATE INDEX … IF NOT EXISTS FOR (n:Label) ON (n.p1, n.p2, …)`.
    pub fn ensure_index(&self, label: impl Into<String>, properties: Vec<String>) -> WritePlan {
        self.plan(SchemaOpKind::EnsureIndex, label, properties)
    }

    /// `CREATE CONSTRAINT … IF NOT EXISTS FOR (n:Label) REQUIRE n.property IS UNIQUE`.
    pub fn ensure_unique(&self, label: impl Into<String>, property: impl Into<String>) -> WritePlan {
        self.plan(SchemaOpKind::EnsureUnique, label, vec![property.into()])
    }

    /// `CREATE CONSTRAINT … IF NOT EXISTS FOR (n:Label) REQUIRE (n.p1, n.p2, …) IS NODE KEY`.
    pub fn ensure_node_key(&self, label: impl Into<String>, properties: Vec<String>) -> WritePlan {
        self.plan(SchemaOpKind::EnsureNodeKey, label, properties)
    }

    /// The symmetric `DROP INDEX … IF EXISTS`.
    pub fn drop_index(&self, label: impl Into<String>, properties: Vec<String>) -> WritePlan {
        self.plan(SchemaOpKind::DropIndex, label, properties)
    }

    /// The symmetric `DROP CONSTRAINT … IF EXISTS`.
    pub fn drop_unique(&self, label: impl Into<String>, property: impl Into<String>) -> WritePlan {
        self.plan(SchemaOpKind::DropUnique, label, vec![property.into()])
    }
}
