use crate::FieldFilter;
use graphframe_core::{Row, Value};

/// Rows are batched in groups of at most this many entries by default
/// (§4.4's NodeUpsert/RelUpsert).
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// A write description, per §3's tagged variants. Like `FrameDescription`,
/// this is pure data — `graphframe_compiler::WritePlanner` does the
/// rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteDescription {
    /// Idempotent create-or-update of nodes, keyed on `key_fields`.
    NodeUpsert {
        /// The node label.
        label: String,
        /// The rows to upsert; must be non-empty.
        rows: Vec<Row>,
        /// The fields identifying an existing node; must be non-empty.
        key_fields: Vec<String>,
        /// Whether only fields present in a given row are set.
        patch_mode: bool,
        /// How missing fields are handled in patch mode.
        null_policy: NullPolicy,
        /// Maximum rows per emitted statement.
        batch_size: usize,
    },
    /// Idempotent create-or-update of a relationship between two upserted
    /// endpoints.
    RelUpsert {
        /// The relationship type.
        rel_type: String,
        /// The rows to upsert; must be non-empty.
        rows: Vec<Row>,
        /// The source endpoint's label and key field.
        src: EndpointKey,
        /// The destination endpoint's label and key field.
        dst: EndpointKey,
        /// Relationship key fields; if empty, uniqueness follows the
        /// `Graph`-configured `RelUniquenessPolicy`.
        rel_key_fields: Vec<String>,
        /// Whether only fields present in a given row are set.
        patch_mode: bool,
        /// How missing fields are handled in patch mode.
        null_policy: NullPolicy,
        /// Maximum rows per emitted statement.
        batch_size: usize,
    },
    /// A parameterized `SET` against nodes or relationships matching
    /// `filters`.
    Patch {
        /// The label or relationship type targeted.
        target: Target,
        /// Filters identifying which entities to patch.
        filters: Vec<FieldFilter>,
        /// The fields to set, with their new values.
        updates: Row,
    },
    /// A `DELETE` (optionally `DETACH DELETE` for nodes) against entities
    /// matching `filters`.
    Delete {
        /// The label or relationship type targeted.
        target: Target,
        /// Filters identifying which entities to delete.
        filters: Vec<FieldFilter>,
        /// Whether to detach-delete (nodes only; ignored for
        /// relationships, which are never detached).
        detach: bool,
    },
    /// A null-safe, single-field mutation against entities matching
    /// `filters` (§4.4's advanced mutations table).
    AdvancedMutation {
        /// The label or relationship type targeted.
        target: Target,
        /// Filters identifying which entities to mutate.
        filters: Vec<FieldFilter>,
        /// Which mutation to apply.
        kind: MutationKind,
        /// The field the mutation targets.
        field: String,
        /// The mutation's argument; absent only for `Unset`.
        argument: Option<Value>,
    },
    /// A schema-management operation.
    SchemaOp {
        /// Which operation to emit.
        kind: SchemaOpKind,
        /// The node label the operation targets.
        label: String,
        /// The property or properties the operation targets.
        properties: Vec<String>,
    },
}

/// A relationship endpoint's label and the field identifying it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EndpointKey {
    /// The endpoint node's label.
    pub label: String,
    /// The row field identifying the endpoint node.
    pub key_field: String,
}

impl EndpointKey {
    /// Creates an endpoint key from a label and key field.
    pub fn new(label: impl Into<String>, key_field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key_field: key_field.into(),
        }
    }
}

/// The entity kind a `Patch`/`Delete`/`AdvancedMutation` targets.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    /// A node label.
    Node(String),
    /// A relationship type.
    Rel(String),
}

/// How a patch-mode upsert handles a field missing from a given row.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum NullPolicy {
    /// Missing fields become explicit `null` for that row (the default).
    #[default]
    SetNulls,
    /// Missing fields are left untouched via `coalesce(item.f, n.f)`.
    Keep,
}

/// Which advanced, null-safe mutation to apply to a single field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MutationKind {
    /// `SET n.field = coalesce(n.field, 0) + $p`
    Inc,
    /// `REMOVE n.field`
    Unset,
    /// `SET n.field = coalesce(n.field, []) + $p`
    ListAppend,
    /// `SET n.field = [x IN coalesce(n.field, []) WHERE x <> $p]`
    ListRemove,
    /// `SET n.field += $p`
    MapMerge,
}

/// A schema-management operation kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SchemaOpKind {
    /// `CREATE INDEX … IF NOT EXISTS FOR (n:Label) ON (n.prop)`
    EnsureIndex,
    /// `CREATE CONSTRAINT … IF NOT EXISTS FOR (n:Label) REQUIRE n.prop IS UNIQUE`
    EnsureUnique,
    /// `CREATE CONSTRAINT … IF NOT EXISTS FOR (n:Label) REQUIRE (n.p1, n.p2) IS NODE KEY`
    EnsureNodeKey,
    /// The symmetric `DROP INDEX … IF EXISTS`.
    DropIndex,
    /// The symmetric `DROP CONSTRAINT … IF EXISTS`.
    DropUnique,
}

impl WriteDescription {
    /// A `NodeUpsert` with default `patch_mode=false`, `null_policy=set_nulls`,
    /// `batch_size=1000`.
    pub fn node_upsert(
        label: impl Into<String>,
        rows: Vec<Row>,
        key_fields: Vec<String>,
    ) -> Self {
        Self::NodeUpsert {
            label: label.into(),
            rows,
            key_fields,
            patch_mode: false,
            null_policy: NullPolicy::SetNulls,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// A `RelUpsert` with default `patch_mode=false`, `null_policy=set_nulls`,
    /// `batch_size=1000`.
    pub fn rel_upsert(
        rel_type: impl Into<String>,
        rows: Vec<Row>,
        src: EndpointKey,
        dst: EndpointKey,
        rel_key_fields: Vec<String>,
    ) -> Self {
        Self::RelUpsert {
            rel_type: rel_type.into(),
            rows,
            src,
            dst,
            rel_key_fields,
            patch_mode: false,
            null_policy: NullPolicy::SetNulls,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Returns a copy with `patch_mode` set, for `NodeUpsert`/`RelUpsert`;
    /// a no-op on other variants.
    pub fn with_patch_mode(mut self, patch_mode: bool) -> Self {
        match &mut self {
            Self::NodeUpsert { patch_mode: p, .. } | Self::RelUpsert { patch_mode: p, .. } => {
                *p = patch_mode;
            }
            _ => {}
        }
        self
    }

    /// Returns a copy with `null_policy` set, for `NodeUpsert`/`RelUpsert`;
    /// a no-op on other variants.
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        match &mut self {
            Self::NodeUpsert { null_policy, .. } | Self::RelUpsert { null_policy, .. } => {
                *null_policy = policy;
            }
            _ => {}
        }
        self
    }

    /// Returns a copy with `batch_size` set, for `NodeUpsert`/`RelUpsert`;
    /// a no-op on other variants.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        match &mut self {
            Self::NodeUpsert { batch_size, .. } | Self::RelUpsert { batch_size, .. } => {
                *batch_size = size;
            }
            _ => {}
        }
        self
    }
}
