use crate::FieldFilter;

/// A read description: node read, relationship read, traversal, or
/// back-to-origin, plus the filters/projection/ordering/limit/offset shared
/// by all four (§3, §4.3, §9 "Polymorphism across frames").
///
/// The tagged-variant shape Design Notes §9 prefers: one compiler
/// (`graphframe_compiler::FrameCompiler`) matches on `kind` instead of three
/// parallel frame types each with their own compile method.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDescription {
    /// Which kind of read this is, and the data unique to that kind.
    pub kind: FrameKind,
    /// Raw, unparsed filter entries collected by `where` builder calls.
    pub filters: Vec<FieldFilter>,
    /// Projected field keys, in call order; empty means "project the
    /// frame's default (bare alias or alias triple)".
    pub projection: Vec<String>,
    /// Ordering entries, in call order.
    pub order_by: Vec<OrderField>,
    /// `LIMIT`, if set.
    pub limit: Option<u64>,
    /// `SKIP`, if set.
    pub offset: Option<u64>,
}

/// The data unique to each of the four read shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameKind {
    /// `MATCH (n:Label) …`
    NodeRead {
        /// The node label.
        label: String,
    },
    /// `MATCH ()-[r:RelType]-() …`
    RelRead {
        /// The relationship type.
        rel_type: String,
    },
    /// `MATCH (from:From)-[rel:Rel]->(to:To) …` (or `<-`/undirected,
    /// per `direction`).
    Traversal {
        /// The origin label; `None` leaves the origin anonymous.
        from_label: Option<String>,
        /// The relationship type traversed.
        rel_type: String,
        /// The destination label.
        to_label: String,
        /// The traversal direction.
        direction: TraversalDirection,
        /// The pattern's alias triple.
        aliases: TraversalAliases,
    },
    /// The same pattern as `Traversal`, but projecting back onto the
    /// origin alias behind a `WITH`.
    BackToOrigin {
        /// The origin label; `None` leaves the origin anonymous.
        from_label: Option<String>,
        /// The relationship type traversed.
        rel_type: String,
        /// The destination label.
        to_label: String,
        /// The traversal direction.
        direction: TraversalDirection,
        /// The pattern's alias triple.
        aliases: TraversalAliases,
    },
}

/// The alias triple a traversal pattern binds, defaulting to the literal
/// names `from`/`rel`/`to` unless the caller customizes them.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TraversalAliases {
    /// The origin alias.
    pub from: String,
    /// The relationship alias.
    pub rel: String,
    /// The destination alias.
    pub to: String,
    /// `true` when the caller supplied a custom triple, which activates
    /// those names as namespace tokens in predicate/projection resolution
    /// (§4.3's resolution order, step 2).
    pub customized: bool,
}

impl Default for TraversalAliases {
    fn default() -> Self {
        Self {
            from: "from".to_string(),
            rel: "rel".to_string(),
            to: "to".to_string(),
            customized: false,
        }
    }
}

/// A traversal's direction, selecting the MATCH pattern's arrow shape.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TraversalDirection {
    /// `(from)-[rel]->(to)`
    Out,
    /// `(from)<-[rel]-(to)`
    In,
    /// `(from)-[rel]-(to)`
    Both,
}

/// An `ORDER BY` sort direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

/// One `ORDER BY` entry: a (possibly namespaced) field key and direction.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderField {
    /// The field key, parsed with the same namespace rules as predicates
    /// (§9's second Open Question resolution).
    pub key: String,
    /// Ascending or descending.
    pub direction: Direction,
}

impl FrameDescription {
    /// A node-read description over `label`, with no filters or shaping.
    pub fn node_read(label: impl Into<String>) -> Self {
        Self::new(FrameKind::NodeRead { label: label.into() })
    }

    /// A relationship-read description over `rel_type`.
    pub fn rel_read(rel_type: impl Into<String>) -> Self {
        Self::new(FrameKind::RelRead {
            rel_type: rel_type.into(),
        })
    }

    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
            projection: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Pivots a node-read description into a traversal, carrying its
    /// accumulated filters forward (§1: "preserving filter context across
    /// hops and aliases") and resetting projection/ordering/limit/offset,
    /// which target the new pattern's aliases, not the origin's.
    pub fn traverse(
        self,
        rel_type: impl Into<String>,
        to_label: impl Into<String>,
        direction: TraversalDirection,
        aliases: TraversalAliases,
    ) -> Self {
        let from_label = match &self.kind {
            FrameKind::NodeRead { label } => Some(label.clone()),
            _ => None,
        };
        Self {
            kind: FrameKind::Traversal {
                from_label,
                rel_type: rel_type.into(),
                to_label: to_label.into(),
                direction,
                aliases,
            },
            filters: self.filters,
            projection: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Pivots a traversal description into a back-to-origin read. Filters
    /// accumulated so far are kept (they are combined with any further
    /// filters before the `WITH`, per §4.3); projection/ordering/limit/offset
    /// reset, since they now target the origin alias.
    ///
    /// Only meaningful when `self.kind` is `Traversal` — the facade's
    /// `PathFrame` type is the only caller, and it only ever holds a
    /// `Traversal`-kind description.
    pub fn back(self) -> Self {
        match self.kind {
            FrameKind::Traversal {
                from_label,
                rel_type,
                to_label,
                direction,
                aliases,
            } => Self {
                kind: FrameKind::BackToOrigin {
                    from_label,
                    rel_type,
                    to_label,
                    direction,
                    aliases,
                },
                filters: self.filters,
                projection: Vec::new(),
                order_by: Vec::new(),
                limit: None,
                offset: None,
            },
            other => unreachable!("FrameDescription::back called on non-traversal kind {other:?}"),
        }
    }

    /// Returns a copy with `filter` appended.
    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns a copy with `projection` set.
    pub fn with_projection(mut self, fields: impl IntoIterator<Item = String>) -> Self {
        self.projection = fields.into_iter().collect();
        self
    }

    /// Returns a copy with `order_by` set.
    pub fn with_order_by(mut self, specs: impl IntoIterator<Item = OrderField>) -> Self {
        self.order_by = specs.into_iter().collect();
        self
    }

    /// Returns a copy with `limit` set.
    pub fn with_limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Returns a copy with `offset` set.
    pub fn with_offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traverse_carries_origin_label_and_filters_forward() {
        let desc = FrameDescription::node_read("Person")
            .with_filter(FieldFilter::new("age__gte", graphframe_core::Value::from(21i64)))
            .traverse("WORKS_AT", "Company", TraversalDirection::Out, TraversalAliases::default());
        match &desc.kind {
            FrameKind::Traversal { from_label, to_label, .. } => {
                assert_eq!(from_label.as_deref(), Some("Person"));
                assert_eq!(to_label, "Company");
            }
            other => panic!("expected Traversal, got {other:?}"),
        }
        assert_eq!(desc.filters.len(), 1);
    }

    #[test]
    fn back_preserves_pattern_but_resets_shaping() {
        let desc = FrameDescription::node_read("Person")
            .traverse("WORKS_AT", "Company", TraversalDirection::Out, TraversalAliases::default())
            .with_limit(5)
            .back();
        assert!(matches!(desc.kind, FrameKind::BackToOrigin { .. }));
        assert_eq!(desc.limit, None);
    }
}
