//! Shared types for routegen
//!
//! This crate holds everything an external route-table producer needs to
//! hand work to `routegen-core`: the route model, the TypeScript type
//! references it carries, and the generator configuration.

pub mod config;
pub mod route;
pub mod types;

// Re-export commonly used types
pub use config::{AdapterKind, ClientConfig, ConfigError, GeneratorConfig};
pub use route::{
    HttpMethod, ParamSpec, ParamType, RequestBody, ResponseFormat, ResponseSpec, Route, RouteId,
    RouteTable,
};
pub use types::{TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind, TypeRef};
