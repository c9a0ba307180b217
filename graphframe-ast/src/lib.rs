//! # graphframe-ast
//!
//! Pure description types for `graphframe`: [`FrameDescription`] (node,
//! relationship, traversal, and back-to-origin reads), [`WriteDescription`]
//! (upserts, patches, deletes, advanced mutations, schema operations), and
//! the [`FieldFilter`]/[`Predicate`] pair that connects a builder's raw
//! `field__operator` keys to the typed predicate a compiler renders.
//!
//! Mirrors `usql-ast`'s statement/expression split: small, `Clone + Debug +
//! PartialEq` data types with no compilation logic of their own. Unlike
//! `usql-ast`, these types do not implement `Display` — rendering a
//! description to text requires threading a parameter registry
//! (`graphframe_core::ParamRegistry`), which a pure `Display` impl has no
//! way to accept. That rendering lives in `graphframe-compiler` instead.
#![deny(missing_docs)]
#![deny(unused_imports)]

mod frame;
mod predicate;
mod write;

pub use frame::{Direction, FrameDescription, FrameKind, OrderField, TraversalAliases, TraversalDirection};
pub use predicate::{FieldFilter, NamespaceContext, Operator, Predicate};
pub use write::{
    EndpointKey, MutationKind, NullPolicy, SchemaOpKind, Target, WriteDescription,
    DEFAULT_BATCH_SIZE,
};
