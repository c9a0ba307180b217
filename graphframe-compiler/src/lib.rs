//! # graphframe-compiler
//!
//! The IPR-threading compilers that turn `graphframe-ast` descriptions into
//! backend statements: [`FilterCompiler`] (predicates → WHERE fragment),
//! [`FrameCompiler`] (reads → complete statements), and [`WritePlanner`]
//! (writes → statements, batched where required).
//!
//! Takes the place of `usql-parser` in the dependency graph — it depends on
//! `graphframe-ast` and `graphframe-core` the same way `usql-parser` depends
//! on `usql-ast` and `usql-core` — but runs the opposite direction:
//! description → text, rather than text → AST.
#![deny(missing_docs)]
#![deny(unused_imports)]

mod filter;
mod frame;
mod statement;
mod write;

pub use filter::FilterCompiler;
pub use frame::FrameCompiler;
pub use statement::CompiledStatement;
pub use write::WritePlanner;
