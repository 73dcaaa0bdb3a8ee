//! Errors raised while generating bindings.

use routegen_common::{AdapterKind, RouteId};
use thiserror::Error;

/// Everything that can stop a generation run (or one adapter of it).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Two routes derive the same call identifier.
    #[error("Identifier collision: '{identifier}' is derived by both {first} and {second}")]
    IdentifierCollision {
        /// The colliding identifier
        identifier: String,
        /// Route that claimed the identifier first
        first: RouteId,
        /// Route that derived it again
        second: RouteId,
    },

    /// Two artifacts of one output unit export the same symbol.
    #[error("Export collision in {unit}: '{name}' is exported by both {first} and {second}")]
    ExportCollision {
        /// Unit the artifacts belong to
        unit: String,
        /// The duplicated symbol
        name: String,
        /// Artifact that exported the symbol first
        first: String,
        /// Artifact that exported it again
        second: String,
    },

    /// Same `(method, path)` listed twice.
    #[error("Duplicate route: {route} appears more than once in the route table")]
    DuplicateRoute {
        /// The repeated route
        route: RouteId,
    },

    /// Request body tagged with an encoding the generator cannot bind.
    #[error("Unrecognized body encoding '{encoding}' on {route}")]
    UnrecognizedEncoding {
        /// Offending route
        route: RouteId,
        /// Encoding tag as found in the table
        encoding: String,
    },

    /// A path segment normalizes to nothing or embeds a placeholder in literal text.
    #[error("Malformed path segment '{segment}' in {route}")]
    MalformedSegment {
        /// Offending route
        route: RouteId,
        /// Raw segment text
        segment: String,
    },

    /// A route cannot be expressed under one adapter's conventions.
    #[error("Adapter '{adapter}' cannot bind {route}: {rule}")]
    ConventionViolation {
        /// Adapter that rejected the route
        adapter: AdapterKind,
        /// Offending route
        route: RouteId,
        /// Which convention was violated
        rule: String,
    },
}

impl GenerateError {
    /// Whether the error only invalidates one adapter's output.
    pub fn is_adapter_scoped(&self) -> bool {
        matches!(self, GenerateError::ConventionViolation { .. })
    }

    /// The route the error is attributed to, if any.
    pub fn route(&self) -> Option<&RouteId> {
        match self {
            GenerateError::IdentifierCollision { second, .. } => Some(second),
            GenerateError::ExportCollision { .. } => None,
            GenerateError::DuplicateRoute { route }
            | GenerateError::UnrecognizedEncoding { route, .. }
            | GenerateError::MalformedSegment { route, .. }
            | GenerateError::ConventionViolation { route, .. } => Some(route),
        }
    }
}
