//! TypeScript AST and emission.
//!
//! Emitters build structured nodes; emission is purely mechanical string
//! building via the `Emit` trait:
//! - `types`: expression/statement/function/import nodes
//! - `emit`: the `Emit` trait and its impls (including the type-level nodes
//!   from `routegen_common`)
//! - `utils`: identifier and quoting helpers

pub mod emit;
pub mod types;
pub mod utils;

pub use emit::Emit;
pub use types::{BinOp, ObjectEntry, TsExpr, TsFunction, TsImport, TsParam, TsStmt};
