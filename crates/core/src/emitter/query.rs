//! Key generators and query hooks for read routes.

use routegen_common::TsLiteral;

use super::transport::{self, ARGS, CLIENT_OPTIONS, OPTIONS};
use super::{Artifact, ArtifactKind, EmitOptions, ImportNeed, RouteContext};
use crate::adapter::{MergeOrder, OptionsPlacement, ReactiveConvention};
use crate::ir::{Emit, ObjectEntry, TsExpr, TsFunction, TsParam, TsStmt};
use crate::key::KeyStrategy;

/// Type of the hook's `options` parameter.
fn options_type(convention: &ReactiveConvention, response: &str) -> String {
    let primitive_options = format!("{}<{response}, Error>", convention.query_options_type);
    let client = transport::REQUEST_OPTIONS;
    match convention.placement {
        OptionsPlacement::Merged(MergeOrder::CallerFirst) => format!(
            "{{ query?: Omit<{primitive_options}, \"queryKey\" | \"queryFn\">; client?: {client} }}"
        ),
        OptionsPlacement::Merged(MergeOrder::CallerLast) => {
            format!("{{ query?: Partial<{primitive_options}>; client?: {client} }}")
        }
        OptionsPlacement::Positional => {
            format!("{{ swr?: {primitive_options}; client?: {client}; enabled?: boolean }}")
        }
    }
}

/// `getGetUsersQueryKey(args)` / `getGetUsersQueryKey()`
fn key_call(convention: &ReactiveConvention, ctx: &RouteContext<'_>) -> TsExpr {
    TsExpr::ident(ctx.identifier.key_fn_name(convention.key_suffix))
        .call(transport::args_expr(ctx).into_iter().collect())
}

/// `() => parseResponse(client.<chain>.$get(args, clientOptions))`
fn fetcher(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> TsExpr {
    let request = transport::request(
        ctx,
        opts,
        transport::args_expr(ctx),
        Some(TsExpr::ident(CLIENT_OPTIONS)),
    );
    TsExpr::Arrow {
        params: vec![],
        body: Box::new(transport::parsed(request)),
    }
}

/// Parameters shared by the options merger and the hook.
fn hook_params(convention: &ReactiveConvention, ctx: &RouteContext<'_>) -> Vec<TsParam> {
    let mut params: Vec<TsParam> = transport::args_param(ctx).into_iter().collect();
    params.push(transport::options_param(options_type(
        convention,
        &ctx.identifier.response_type(),
    )));
    params
}

/// Key generator of a read route.
///
/// The argument is always optional, whatever the route requires: called
/// without one, both strategies yield the bare-path key used as an
/// invalidation prefix.
pub fn emit_key_generator(
    convention: &ReactiveConvention,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> Artifact {
    let name = ctx.identifier.key_fn_name(convention.key_suffix);
    let mut imports = Vec::new();

    let params: Vec<TsParam> = transport::args_param(ctx)
        .map(|param| TsParam {
            optional: true,
            ..param
        })
        .into_iter()
        .collect();
    if ctx.signature.accepts_argument() {
        imports.push(ImportNeed::ty(opts.types_module, &ctx.identifier.args_type()));
    }
    if convention.key_strategy == KeyStrategy::UrlDerived {
        imports.push(ImportNeed::value(&opts.client.module, &opts.client.name));
    }

    let body = ctx.key.statements(
        convention.key_strategy,
        transport::route_accessor(ctx, opts),
        ctx.signature.accepts_argument().then_some(ARGS),
    );

    Artifact {
        exports: vec![name.clone()],
        source: TsFunction::exported(name.clone(), params, body).emit(),
        name,
        kind: ArtifactKind::KeyGenerator,
        imports,
    }
}

/// Options merger plus hook for merged-options adapters.
fn merged_query_hook(
    convention: &ReactiveConvention,
    order: MergeOrder,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> (String, Vec<String>) {
    let options_name = ctx.identifier.query_options_name();
    let hook_name = ctx.identifier.hook_name(convention.hook_prefix);

    let caller = ObjectEntry::Spread(TsExpr::ident("queryOptions"));
    let generated = [
        ObjectEntry::Prop("queryKey".into(), key_call(convention, ctx)),
        ObjectEntry::Prop("queryFn".into(), fetcher(ctx, opts)),
    ];
    let entries: Vec<ObjectEntry> = match order {
        MergeOrder::CallerFirst => std::iter::once(caller).chain(generated).collect(),
        MergeOrder::CallerLast => generated.into_iter().chain(std::iter::once(caller)).collect(),
    };

    let merger = TsFunction::exported(
        options_name.clone(),
        hook_params(convention, ctx),
        vec![
            transport::destructure_options("{ query: queryOptions, client: clientOptions }"),
            TsStmt::Return(Some(TsExpr::Object(entries))),
        ],
    );

    let mut merger_args: Vec<TsExpr> = transport::args_expr(ctx).into_iter().collect();
    merger_args.push(TsExpr::ident(OPTIONS));
    let merged = TsExpr::ident(&options_name).call(merger_args);
    let primitive_arg = if convention.thunk_options {
        TsExpr::Arrow {
            params: vec![],
            body: Box::new(merged),
        }
    } else {
        merged
    };

    let hook = TsFunction::exported(
        hook_name.clone(),
        hook_params(convention, ctx),
        vec![TsStmt::Return(Some(
            TsExpr::ident(convention.query_primitive).call(vec![primitive_arg]),
        ))],
    )
    .with_doc(transport::doc_lines(ctx, opts));

    (
        format!("{}\n{}", merger.emit(), hook.emit()),
        vec![options_name, hook_name],
    )
}

/// Hook for positional-options adapters; `enabled: false` nulls the key.
fn positional_query_hook(
    convention: &ReactiveConvention,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> (String, Vec<String>) {
    let hook_name = ctx.identifier.hook_name(convention.hook_prefix);

    let hook = TsFunction::exported(
        hook_name.clone(),
        hook_params(convention, ctx),
        vec![
            transport::destructure_options(
                "{ swr: swrOptions, client: clientOptions, enabled = true }",
            ),
            TsStmt::Const {
                pattern: "swrKey".into(),
                init: TsExpr::Ternary {
                    cond: Box::new(TsExpr::ident("enabled")),
                    then_expr: Box::new(key_call(convention, ctx)),
                    else_expr: Box::new(TsExpr::Literal(TsLiteral::Null)),
                },
            },
            TsStmt::Return(Some(TsExpr::ident(convention.query_primitive).call(vec![
                TsExpr::ident("swrKey"),
                fetcher(ctx, opts),
                TsExpr::ident("swrOptions"),
            ]))),
        ],
    )
    .with_doc(transport::doc_lines(ctx, opts));

    (hook.emit(), vec![hook_name])
}

/// Query hook of a read route (with its options merger where the adapter
/// merges options).
pub fn emit_query_hook(
    convention: &ReactiveConvention,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> Artifact {
    let (source, exports) = match convention.placement {
        OptionsPlacement::Merged(order) => merged_query_hook(convention, order, ctx, opts),
        OptionsPlacement::Positional => positional_query_hook(convention, ctx, opts),
    };

    let mut imports = transport::hook_imports(ctx, opts);
    imports.push(transport::primitive_import(
        convention.query_module,
        convention.query_primitive,
        convention.default_export,
    ));
    imports.push(ImportNeed::ty(convention.query_module, convention.query_options_type));

    Artifact {
        name: ctx.identifier.hook_name(convention.hook_prefix),
        kind: ArtifactKind::QueryHook,
        source,
        exports,
        imports,
    }
}
