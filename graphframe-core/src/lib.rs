//! # graphframe-core
//!
//! The identifier and parameter registry (IPR) for `graphframe`: identifier
//! validation and backtick-escaping, the Cypher-ish reserved keyword table,
//! the bound `Value` type, and the parameter registry that every compiler in
//! `graphframe-compiler` threads through a single compilation.
#![deny(missing_docs)]
#![deny(unused_imports)]

mod error;
mod ident;
mod keyword;
mod policy;
mod registry;
mod value;

pub use error::CoreError;
pub use ident::validate_identifier;
pub use keyword::CypherKeyword;
pub use policy::RelUniquenessPolicy;
pub use registry::ParamRegistry;
pub use value::{Row, Value};
