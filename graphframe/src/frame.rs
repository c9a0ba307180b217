use graphframe_ast::{
    EndpointKey, FieldFilter, FrameDescription, FrameKind, MutationKind, NullPolicy, OrderField, Target,
    TraversalAliases, TraversalDirection, WriteDescription, DEFAULT_BATCH_SIZE,
};
use graphframe_compiler::{CompiledStatement, FrameCompiler};
use graphframe_core::{CoreError, Row, Value};

use crate::graph::Graph;
use crate::write_plan::WritePlan;

/// Per-call upsert options (§4.4): whether only fields present in a given
/// row are set (`patch_mode`), how a patch-mode upsert handles a field
/// missing from a given row (`null_policy`), and the maximum number of rows
/// per emitted statement (`batch_size`).
#[derive(Clone, Debug)]
pub struct UpsertOptions {
    /// Whether only fields present in a given row are set.
    pub patch_mode: bool,
    /// How missing fields are handled in patch mode.
    pub null_policy: NullPolicy,
    /// Maximum rows per emitted statement.
    pub batch_size: usize,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self {
            patch_mode: false,
            null_policy: NullPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// The read-shaping capability set §9 names as shared across node,
/// relationship, and path frames (`where`, `select`, `order_by`, `limit`,
/// `offset`, `compile`) — implemented once as default trait methods over a
/// shared [`FrameDescription`], per §9's stated preference for a tagged
/// variant consumed by a single compiler over three parallel frame types.
pub trait ReadFrame: Sized {
    /// The frame's current description.
    fn description(&self) -> &FrameDescription;
    /// The frame's `Graph` handle.
    fn graph(&self) -> &Graph;
    /// Rebuilds `Self` from a graph handle and a description.
    fn from_parts(graph: Graph, description: FrameDescription) -> Self;

    /// Appends `filters` to the accumulated filter list.
    fn r#where(self, filters: impl IntoIterator<Item = FieldFilter>) -> Self {
        let graph = self.graph().clone();
        let mut description = self.description().clone();
        for filter in filters {
            description = description.with_filter(filter);
        }
        Self::from_parts(graph, description)
    }

    /// Sets the projected fields, replacing any previous projection.
    fn select(self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let graph = self.graph().clone();
        let description = self
            .description()
            .clone()
            .with_projection(fields.into_iter().map(Into::into));
        Self::from_parts(graph, description)
    }

    /// Sets the ordering, replacing any previous ordering.
    fn order_by(self, specs: impl IntoIterator<Item = OrderField>) -> Self {
        let graph = self.graph().clone();
        let description = self.description().clone().with_order_by(specs);
        Self::from_parts(graph, description)
    }

    /// Sets `LIMIT`.
    fn limit(self, n: u64) -> Self {
        let graph = self.graph().clone();
        let description = self.description().clone().with_limit(n);
        Self::from_parts(graph, description)
    }

    /// Sets `SKIP`.
    fn offset(self, n: u64) -> Self {
        let graph = self.graph().clone();
        let description = self.description().clone().with_offset(n);
        Self::from_parts(graph, description)
    }

    /// Compiles the frame into a `(text, parameters)` pair.
    fn compile(&self) -> Result<CompiledStatement, CoreError> {
        FrameCompiler::compile(self.description())
    }
}

/// A node-read builder: `Graph::nodes(label)`.
#[derive(Clone)]
pub struct NodeFrame {
    graph: Graph,
    description: FrameDescription,
}

impl ReadFrame for NodeFrame {
    fn description(&self) -> &FrameDescription {
        &self.description
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn from_parts(graph: Graph, description: FrameDescription) -> Self {
        Self { graph, description }
    }
}

impl NodeFrame {
    /// Pivots into a traversal over `rel_type` to `to_label`, carrying this
    /// frame's accumulated filters forward (§4.3).
    pub fn traverse(
        self,
        rel_type: impl Into<String>,
        to_label: impl Into<String>,
        direction: TraversalDirection,
        aliases: Option<TraversalAliases>,
    ) -> PathFrame {
        let description =
            self.description
                .traverse(rel_type, to_label, direction, aliases.unwrap_or_default());
        PathFrame {
            graph: self.graph,
            description,
        }
    }

    fn label(&self) -> String {
        match &self.description.kind {
            FrameKind::NodeRead { label } => label.clone(),
            FrameKind::BackToOrigin {
                from_label: Some(label),
                ..
            } => label.clone(),
            other => unreachable!(
                "NodeFrame write entry point used on a frame with no origin label: {other:?}"
            ),
        }
    }

    /// Idempotent create-or-update of `rows`, keyed on `key_fields`, with
    /// default options (`patch_mode=false`, `null_policy=SetNulls`,
    /// `batch_size=DEFAULT_BATCH_SIZE`).
    pub fn upsert(&self, rows: Vec<Row>, key_fields: Vec<String>) -> WritePlan {
        self.upsert_with_options(rows, key_fields, UpsertOptions::default())
    }

    /// `upsert`, with `options` controlling patch mode, null policy, and
    /// batch size (§4.4).
    pub fn upsert_with_options(
        &self,
        rows: Vec<Row>,
        key_fields: Vec<String>,
        options: UpsertOptions,
    ) -> WritePlan {
        let description = WriteDescription::node_upsert(self.label(), rows, key_fields)
            .with_patch_mode(options.patch_mode)
            .with_null_policy(options.null_policy)
            .with_batch_size(options.batch_size);
        WritePlan::new(self.graph.clone(), description)
    }

    /// A `SET` against nodes matching this frame's filters.
    pub fn patch(&self, updates: Row) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::Patch {
                target: Target::Node(self.label()),
                filters: self.description.filters.clone(),
                updates,
            },
        )
    }

    /// A delete against nodes matching this frame's filters.
    pub fn delete(&self, detach: bool) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::Delete {
                target: Target::Node(self.label()),
                filters: self.description.filters.clone(),
                detach,
            },
        )
    }

    /// `SET n.field = coalesce(n.field, 0) + $p`.
    pub fn inc(&self, field: impl Into<String>, value: impl Into<Value>) -> WritePlan {
        self.advanced_mutation(MutationKind::Inc, field, Some(value.into()))
    }

    /// `REMOVE n.field`.
    pub fn unset(&self, field: impl Into<String>) -> WritePlan {
        self.advanced_mutation(MutationKind::Unset, field, None)
    }

    /// `SET n.field = coalesce(n.field, []) + $p`.
    pub fn list_append(&self, field: impl Into<String>, value: impl Into<Value>) -> WritePlan {
        self.advanced_mutation(MutationKind::ListAppend, field, Some(value.into()))
    }

    /// `SET n.field = [x IN coalesce(n.field, []) WHERE x <> $p]`.
    pub fn list_remove(&self, field: impl Into<String>, value: impl Into<Value>) -> WritePlan {
        self.advanced_mutation(MutationKind::ListRemove, field, Some(value.into()))
    }

    /// `SET n.field += $p`.
    pub fn map_merge(&self, field: impl Into<String>, value: Row) -> WritePlan {
        self.advanced_mutation(MutationKind::MapMerge, field, Some(Value::Map(value)))
    }

    fn advanced_mutation(
        &self,
        kind: MutationKind,
        field: impl Into<String>,
        argument: Option<Value>,
    ) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::AdvancedMutation {
                target: Target::Node(self.label()),
                filters: self.description.filters.clone(),
                kind,
                field: field.into(),
                argument,
            },
        )
    }
}

/// A relationship-read builder: `Graph::rels(rel_type)`.
#[derive(Clone)]
pub struct RelFrame {
    graph: Graph,
    description: FrameDescription,
}

impl ReadFrame for RelFrame {
    fn description(&self) -> &FrameDescription {
        &self.description
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn from_parts(graph: Graph, description: FrameDescription) -> Self {
        Self { graph, description }
    }
}

impl RelFrame {
    fn rel_type(&self) -> String {
        match &self.description.kind {
            FrameKind::RelRead { rel_type } => rel_type.clone(),
            other => unreachable!("RelFrame built over a non-RelRead frame kind: {other:?}"),
        }
    }

    /// Idempotent create-or-update of a relationship between two upserted
    /// endpoints (§8 scenario 6), with default options (`patch_mode=false`,
    /// `null_policy=SetNulls`, `batch_size=DEFAULT_BATCH_SIZE`).
    ///
    /// `rel_key_fields` identifies the relationship itself when more than
    /// one relationship of this type may exist between the same endpoints;
    /// if empty, uniqueness falls back to the `Graph`-configured
    /// `RelUniquenessPolicy`.
    pub fn upsert(
        &self,
        rows: Vec<Row>,
        rel_key_fields: Vec<String>,
        src: EndpointKey,
        dst: EndpointKey,
    ) -> WritePlan {
        self.upsert_with_options(rows, rel_key_fields, src, dst, UpsertOptions::default())
    }

    /// `upsert`, with `options` controlling patch mode, null policy, and
    /// batch size (§4.4).
    pub fn upsert_with_options(
        &self,
        rows: Vec<Row>,
        rel_key_fields: Vec<String>,
        src: EndpointKey,
        dst: EndpointKey,
        options: UpsertOptions,
    ) -> WritePlan {
        let description = WriteDescription::rel_upsert(self.rel_type(), rows, src, dst, rel_key_fields)
            .with_patch_mode(options.patch_mode)
            .with_null_policy(options.null_policy)
            .with_batch_size(options.batch_size);
        WritePlan::new(self.graph.clone(), description)
    }

    /// A delete against relationships matching this frame's filters. Never
    /// detaches (relationships have no endpoints to detach).
    pub fn delete(&self) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::Delete {
                target: Target::Rel(self.rel_type()),
                filters: self.description.filters.clone(),
                detach: false,
            },
        )
    }

    /// A `SET` against relationships matching this frame's filters.
    pub fn patch(&self, updates: Row) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::Patch {
                target: Target::Rel(self.rel_type()),
                filters: self.description.filters.clone(),
                updates,
            },
        )
    }

    fn advanced_mutation(
        &self,
        kind: MutationKind,
        field: impl Into<String>,
        argument: Option<Value>,
    ) -> WritePlan {
        WritePlan::new(
            self.graph.clone(),
            WriteDescription::AdvancedMutation {
                target: Target::Rel(self.rel_type()),
                filters: self.description.filters.clone(),
                kind,
                field: field.into(),
                argument,
            },
        )
    }

    /// `SET r.field = coalesce(r.field, 0) + $p`.
    pub fn inc(&self, field: impl Into<String>, value: impl Into<Value>) -> WritePlan {
        self.advanced_mutation(MutationKind::Inc, field, Some(value.into()))
    }

    /// `REMOVE r.field`.
    pub fn unset(&self, field: impl Into<String>) -> WritePlan {
        self.advanced_mutation(MutationKind::Unset, field, None)
    }

    /// `SET r.field = coalesce(r.field, []) + $p`.
    pub fn list_append(&self, field: impl Into<String>, value: impl Into<Value>) -> WritePlan {
        self.advanced_mutation(MutationKind::ListAppend, field, Some(value.into()))
    }

    /// `SET r.field = [x IN coalesce(r.field, []) WHERE x <> $p]`.
    pub fn list_remove(&self, field: impl Into<String>, value: impl Into<Value>) -> WritePlan {
        self.advanced_mutation(MutationKind::ListRemove, field, Some(value.into()))
    }

    /// `SET r.field += $p`.
    pub fn map_merge(&self, field: impl Into<String>, value: Row) -> WritePlan {
        self.advanced_mutation(MutationKind::MapMerge, field, Some(Value::Map(value)))
    }
}

/// A traversal-read builder: `NodeFrame::traverse(..)`.
#[derive(Clone)]
pub struct PathFrame {
    graph: Graph,
    description: FrameDescription,
}

impl ReadFrame for PathFrame {
    fn description(&self) -> &FrameDescription {
        &self.description
    }

    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn from_parts(graph: Graph, description: FrameDescription) -> Self {
        Self { graph, description }
    }
}

impl PathFrame {
    /// Pivots into a back-to-origin read, preserving accumulated filters
    /// and resetting projection/ordering/limit/offset (§4.3).
    pub fn back(self) -> NodeFrame {
        NodeFrame {
            graph: self.graph,
            description: self.description.back(),
        }
    }
}
