//! Multi-target TypeScript client-binding generator.
//!
//! Takes a [`RouteTable`](routegen_common::RouteTable) and produces, per
//! enabled adapter, an output unit of callable bindings over a typed RPC
//! transport client, plus one shared declarations unit:
//!
//! ```ignore
//! let table = RouteTable::from_json(&json)?;
//! let generation = routegen_core::generate(&table, &GeneratorConfig::default())?;
//! let types_ts = generation.declarations.render();
//! ```
//!
//! Module map:
//! - `ident`: `(method, path)` to identifier
//! - `key`: cache keys and their evaluation model
//! - `signature`: what each call accepts
//! - `adapter`: per-adapter conventions as data
//! - `emitter`: artifacts per route and adapter
//! - `orchestrator`: the run itself
//! - `ir`: TypeScript AST and emission

pub mod adapter;
pub mod emitter;
pub mod error;
pub mod ident;
pub mod ir;
pub mod key;
pub mod orchestrator;
pub mod signature;

pub use adapter::{
    AdapterDescriptor, AdapterStyle, MergeOrder, OptionsPlacement, ReactiveConvention, descriptor,
};
pub use emitter::{
    Artifact, ArtifactKind, EmitOptions, ImportKind, ImportNeed, RouteContext, emit_route,
};
pub use error::GenerateError;
pub use ident::{Identifier, Segment, SegmentError};
pub use key::{CacheKeyExpr, KeyError, KeyStrategy, derive_key, normalize_key, normalize_path};
pub use orchestrator::{AdapterOutput, Generation, OutputUnit, UnitTarget, generate};
pub use signature::{ArgumentShape, ArgumentSlot, BindingSignature, BodyEncoding};
