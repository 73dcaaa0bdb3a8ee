//! Pieces every emitter shares: the transport accessor chain, argument
//! parameters, client imports and JSDoc lines.

use routegen_common::{Route, TsType};

use super::{EmitOptions, ImportNeed, RouteContext};
use crate::ir::{BinOp, TsExpr, TsParam, TsStmt};

/// Resolves a transport response into the route's outcome union.
pub const PARSE_RESPONSE: &str = "parseResponse";
/// Per-request transport options (headers, fetch init).
pub const REQUEST_OPTIONS: &str = "ClientRequestOptions";
/// Unresolved transport response.
pub const CLIENT_RESPONSE: &str = "ClientResponse";

/// Name of the argument parameter in generated functions.
pub const ARGS: &str = "args";
/// Name of the caller options parameter of hooks.
pub const OPTIONS: &str = "options";
/// Binding of the client options after destructuring.
pub const CLIENT_OPTIONS: &str = "clientOptions";

/// `client.users[":userId"].avatar` for `/users/:userId/avatar`.
///
/// Takes the normalized path. The root path maps to the client's `index`
/// accessor.
pub fn accessor(client_name: &str, normalized_path: &str) -> TsExpr {
    let mut expr = TsExpr::ident(client_name);
    let mut any = false;
    for segment in normalized_path.split('/').filter(|s| !s.is_empty()) {
        expr = expr.member(segment);
        any = true;
    }
    if !any {
        expr = expr.member("index");
    }
    expr
}

/// Accessor of a route under the configured client.
pub fn route_accessor(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> TsExpr {
    accessor(&opts.client.name, &ctx.key.path)
}

/// `client.<chain>.$get(args, clientOptions)`
///
/// Without an argument, a present options expression is preceded by
/// `undefined` so it stays in second position.
pub fn request(
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
    arg: Option<TsExpr>,
    options: Option<TsExpr>,
) -> TsExpr {
    let method = format!("${}", ctx.route.method.verb());
    let args = match (arg, options) {
        (Some(arg), Some(options)) => vec![arg, options],
        (Some(arg), None) => vec![arg],
        (None, Some(options)) => vec![TsExpr::ident("undefined"), options],
        (None, None) => vec![],
    };
    route_accessor(ctx, opts).member(method).call(args)
}

/// `parseResponse(<request>)`
pub fn parsed(request: TsExpr) -> TsExpr {
    TsExpr::ident(PARSE_RESPONSE).call(vec![request])
}

/// `args: GetUsersArgs` (or `args?:`), absent for zero-argument routes.
pub fn args_param(ctx: &RouteContext<'_>) -> Option<TsParam> {
    ctx.signature.argument().map(|shape| {
        TsParam::typed(
            ARGS,
            TsType::Ref(ctx.identifier.args_type()),
            shape.is_optional(),
        )
    })
}

/// `args` when the route takes an argument.
pub fn args_expr(ctx: &RouteContext<'_>) -> Option<TsExpr> {
    ctx.signature.argument().map(|_| TsExpr::ident(ARGS))
}

/// Type of the mutation variables: `PostUsersArgs` or `void`.
pub fn variables_type(ctx: &RouteContext<'_>) -> String {
    if ctx.signature.accepts_argument() {
        ctx.identifier.args_type()
    } else {
        "void".to_string()
    }
}

/// Imports for the transport client instance and the route's declarations.
pub fn base_imports(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> Vec<ImportNeed> {
    let mut imports = vec![
        ImportNeed::value(&opts.client.module, &opts.client.name),
        ImportNeed::ty(opts.types_module, &ctx.identifier.response_type()),
    ];
    if ctx.signature.accepts_argument() {
        imports.push(ImportNeed::ty(opts.types_module, &ctx.identifier.args_type()));
    }
    imports
}

/// `options?: <ty>`
pub fn options_param(ty: String) -> TsParam {
    TsParam::typed(OPTIONS, TsType::Ref(ty), true)
}

/// `const <pattern> = options ?? {};`
pub fn destructure_options(pattern: &str) -> TsStmt {
    TsStmt::Const {
        pattern: pattern.to_string(),
        init: TsExpr::BinOp {
            left: Box::new(TsExpr::ident(OPTIONS)),
            op: BinOp::Nullish,
            right: Box::new(TsExpr::Object(vec![])),
        },
    }
}

/// Imports of hooks that resolve responses and forward client options.
pub fn hook_imports(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> Vec<ImportNeed> {
    let mut imports = base_imports(ctx, opts);
    imports.push(ImportNeed::value(&opts.client.module, PARSE_RESPONSE));
    imports.push(ImportNeed::ty(&opts.client.module, REQUEST_OPTIONS));
    imports
}

/// Import of a framework primitive, default or named.
pub fn primitive_import(module: &str, name: &str, default_export: bool) -> ImportNeed {
    if default_export {
        ImportNeed::default_export(module, name)
    } else {
        ImportNeed::value(module, name)
    }
}

/// JSDoc lines for a call or hook; empty when docs are disabled.
pub fn doc_lines(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> Vec<String> {
    if opts.docs {
        doc_block(ctx.route, &ctx.key.path)
    } else {
        Vec::new()
    }
}

/// `METHOD /path`, summary, description and tags.
fn doc_block(route: &Route, path: &str) -> Vec<String> {
    let mut lines = vec![format!("{} {path}", route.method)];
    for text in [&route.summary, &route.description].into_iter().flatten() {
        lines.push(String::new());
        lines.extend(text.lines().map(|l| l.trim_end().replace("*/", "*\\/")));
    }
    if route.security || route.deprecated {
        lines.push(String::new());
    }
    if route.security {
        lines.push("@security bearer".into());
    }
    if route.deprecated {
        lines.push("@deprecated".into());
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::Emit;
    use routegen_common::{ClientConfig, HttpMethod};

    #[test]
    fn test_accessor_chain() {
        assert_eq!(
            accessor("client", "/users/:userId/avatar").emit(),
            "client.users[\":userId\"].avatar"
        );
        assert_eq!(accessor("client", "/audit-logs").emit(), "client[\"audit-logs\"]");
        assert_eq!(accessor("client", "/Accounts.json").emit(), "client[\"Accounts.json\"]");
        assert_eq!(accessor("api", "/").emit(), "api.index");
    }

    #[test]
    fn test_doc_block() {
        let mut route =
            Route::new(HttpMethod::Get, "/users/{userId}").summary("Fetch a user").secured();
        route.deprecated = true;
        assert_eq!(
            doc_block(&route, "/users/:userId"),
            ["GET /users/:userId", "", "Fetch a user", "", "@security bearer", "@deprecated"]
        );
    }

    #[test]
    fn test_doc_block_escapes_comment_terminator() {
        let mut route = Route::new(HttpMethod::Get, "/files");
        route.description = Some("Matches */tmp globs\nand more".into());
        assert_eq!(
            doc_block(&route, "/files"),
            ["GET /files", "", "Matches *\\/tmp globs", "and more"]
        );
    }

    #[test]
    fn test_docs_disabled() {
        let route = Route::new(HttpMethod::Get, "/health").summary("Liveness");
        let identifier = crate::ident::derive(route.method, &route.path).unwrap();
        let signature = crate::signature::resolve(&route).unwrap();
        let key = crate::key::derive_key(&route.path, false).unwrap();
        let ctx = RouteContext {
            route: &route,
            identifier: &identifier,
            signature: &signature,
            key: &key,
        };
        let client = ClientConfig::default();
        let opts = EmitOptions {
            client: &client,
            types_module: "./types",
            docs: false,
        };
        assert!(doc_lines(&ctx, &opts).is_empty());
        assert_eq!(doc_lines(&ctx, &EmitOptions { docs: true, ..opts }).len(), 3);
    }
}
