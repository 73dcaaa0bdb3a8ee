//! Shared declarations: named types of the table and per-route
//! `{Pascal}Args` / `{Pascal}Response` aliases.
//!
//! Emitted once per run and imported by every adapter unit, so adapters never
//! restate argument or response shapes.

use routegen_common::{
    ResponseSpec, TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind, TypeRef,
};

use super::{Artifact, ArtifactKind, RouteContext};
use crate::ir::Emit;

/// Declaration of a named table type.
pub fn emit_named_type(def: &TsTypeDef) -> Artifact {
    Artifact {
        name: def.name.clone(),
        kind: ArtifactKind::TypeDeclaration,
        source: def.emit(),
        exports: vec![def.name.clone()],
        imports: vec![],
    }
}

/// `{ status: 200; format: "json"; data: User }`
fn outcome(status: u16, response: &ResponseSpec) -> TsType {
    let data = response
        .ty
        .as_ref()
        .map_or(TsType::Primitive(TsPrimitive::Null), TypeRef::to_ts_type);
    TsType::Object(vec![
        TsProp::required("status", TsType::Literal(TsLiteral::Int(i64::from(status)))),
        TsProp::required(
            "format",
            TsType::Literal(TsLiteral::String(response.format.as_str().to_string())),
        ),
        TsProp::required("data", data),
    ])
}

/// Outcome union of a route, keyed by status code.
pub fn response_union(ctx: &RouteContext<'_>) -> TsType {
    let mut outcomes: Vec<TsType> = ctx
        .route
        .responses
        .iter()
        .map(|(status, response)| outcome(*status, response))
        .collect();
    match outcomes.len() {
        0 => TsType::unknown(),
        1 => outcomes.remove(0),
        _ => TsType::Union(outcomes),
    }
}

/// `Args` (when the route takes an argument) and `Response` aliases of a route.
pub fn emit_route_declarations(ctx: &RouteContext<'_>) -> Artifact {
    let mut exports = Vec::with_capacity(2);
    let mut source = String::new();

    if let Some(shape) = ctx.signature.argument() {
        let args = TsTypeDef {
            name: ctx.identifier.args_type(),
            kind: TypeDefKind::TypeAlias {
                ty: shape.to_ts_type(),
            },
        };
        source.push_str(&args.emit());
        exports.push(args.name);
    }

    let response = TsTypeDef {
        name: ctx.identifier.response_type(),
        kind: TypeDefKind::TypeAlias {
            ty: response_union(ctx),
        },
    };
    source.push_str(&response.emit());
    exports.push(response.name);

    Artifact {
        name: ctx.identifier.pascal(),
        kind: ArtifactKind::TypeDeclaration,
        source,
        exports,
        imports: vec![],
    }
}
