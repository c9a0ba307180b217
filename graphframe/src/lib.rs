//! # graphframe
//!
//! A fluent query-construction and write-planning layer over a Cypher-like
//! property-graph backend.
//!
//! A [`Graph`] wraps a backend [`Executor`] and builds [`NodeFrame`]s,
//! [`RelFrame`]s, and [`PathFrame`]s (reads) or [`WritePlan`]s (writes)
//! without ever touching the network itself — compilation into statement
//! text and bound parameters is pure, and is handed off to `graphframe-core`/
//! `graphframe-ast`/`graphframe-compiler` (re-exported below) the same way
//! the teacher crate this one is built from hands lexing and parsing off to
//! its own component crates.

#![deny(missing_docs)]
#![deny(unused_imports)]

mod config;
mod error;
mod executor;
mod frame;
mod graph;
mod schema;
mod write_plan;

pub use config::{GraphConfig, GraphConfigBuilder};
pub use error::{ExecutionError, GraphError};
pub use executor::Executor;
pub use frame::{NodeFrame, PathFrame, ReadFrame, RelFrame, UpsertOptions};
pub use graph::Graph;
pub use schema::SchemaOps;
pub use write_plan::{PlanState, WritePlan};

pub use graphframe_ast as ast;
pub use graphframe_compiler as compiler;
pub use graphframe_core as core;
