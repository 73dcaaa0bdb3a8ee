//! Plain async call per route.

use routegen_common::TsType;

use super::transport::{self, CLIENT_RESPONSE};
use super::{Artifact, ArtifactKind, EmitOptions, ImportNeed, RouteContext};
use crate::ir::{Emit, TsFunction, TsStmt};

/// `export const getX = async (args: GetXArgs): Promise<ClientResponse<GetXResponse>> => ...`
///
/// The response is returned unresolved; callers pick the outcome.
pub fn emit_call(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> Artifact {
    let name = ctx.identifier.call_name();
    let request = transport::request(ctx, opts, transport::args_expr(ctx), None);

    let func = TsFunction {
        name: name.clone(),
        doc: transport::doc_lines(ctx, opts),
        params: transport::args_param(ctx).into_iter().collect(),
        return_type: Some(TsType::Ref(format!(
            "Promise<{CLIENT_RESPONSE}<{}>>",
            ctx.identifier.response_type()
        ))),
        body: vec![TsStmt::Return(Some(request))],
        is_async: true,
        is_export: true,
        is_arrow: true,
    };

    let mut imports = transport::base_imports(ctx, opts);
    imports.push(ImportNeed::ty(&opts.client.module, CLIENT_RESPONSE));

    Artifact {
        exports: vec![name.clone()],
        name,
        kind: ArtifactKind::Call,
        source: func.emit(),
        imports,
    }
}
