//! Mutation hooks for non-read routes.
//!
//! Mutations carry no cache key. SWR names them with a `METHOD /path`
//! label instead, which never doubles as a query key.

use routegen_common::TsType;

use super::transport::{self, CLIENT_OPTIONS, OPTIONS};
use super::{Artifact, ArtifactKind, EmitOptions, ImportNeed, RouteContext};
use crate::adapter::{MergeOrder, OptionsPlacement, ReactiveConvention};
use crate::ir::{Emit, ObjectEntry, TsExpr, TsFunction, TsParam, TsStmt};

fn options_type(convention: &ReactiveConvention, ctx: &RouteContext<'_>) -> String {
    let response = ctx.identifier.response_type();
    let client = transport::REQUEST_OPTIONS;
    match convention.placement {
        OptionsPlacement::Merged(order) => {
            let primitive_options = format!(
                "{}<{response}, Error, {}>",
                convention.mutation_options_type,
                transport::variables_type(ctx)
            );
            match order {
                MergeOrder::CallerFirst => format!(
                    "{{ mutation?: Omit<{primitive_options}, \"mutationFn\">; client?: {client} }}"
                ),
                MergeOrder::CallerLast => {
                    format!("{{ mutation?: Partial<{primitive_options}>; client?: {client} }}")
                }
            }
        }
        OptionsPlacement::Positional => format!(
            "{{ swr?: {}<{response}, Error, string, {}>; client?: {client} }}",
            convention.mutation_options_type,
            swr_argument_type(ctx)
        ),
    }
}

/// SWR's extra-argument type; `never` when the route takes nothing.
fn swr_argument_type(ctx: &RouteContext<'_>) -> String {
    if ctx.signature.accepts_argument() {
        ctx.identifier.args_type()
    } else {
        "never".to_string()
    }
}

/// `(args: PostUsersArgs) => parseResponse(client.users.$post(args, clientOptions))`
fn mutation_fn(ctx: &RouteContext<'_>, opts: &EmitOptions<'_>) -> TsExpr {
    let request = transport::request(
        ctx,
        opts,
        transport::args_expr(ctx),
        Some(TsExpr::ident(CLIENT_OPTIONS)),
    );
    TsExpr::Arrow {
        params: transport::args_param(ctx).into_iter().collect(),
        body: Box::new(transport::parsed(request)),
    }
}

fn merged_mutation_hook(
    convention: &ReactiveConvention,
    order: MergeOrder,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> (String, Vec<String>) {
    let options_name = ctx.identifier.mutation_options_name();
    let hook_name = ctx.identifier.hook_name(convention.hook_prefix);
    let params = vec![transport::options_param(options_type(convention, ctx))];

    let caller = ObjectEntry::Spread(TsExpr::ident("mutationOptions"));
    let generated = ObjectEntry::Prop("mutationFn".into(), mutation_fn(ctx, opts));
    let entries = match order {
        MergeOrder::CallerFirst => vec![caller, generated],
        MergeOrder::CallerLast => vec![generated, caller],
    };

    let merger = TsFunction::exported(
        options_name.clone(),
        params.clone(),
        vec![
            transport::destructure_options("{ mutation: mutationOptions, client: clientOptions }"),
            TsStmt::Return(Some(TsExpr::Object(entries))),
        ],
    );

    let merged = TsExpr::ident(&options_name).call(vec![TsExpr::ident(OPTIONS)]);
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
        params,
        vec![TsStmt::Return(Some(
            TsExpr::ident(convention.mutation_primitive).call(vec![primitive_arg]),
        ))],
    )
    .with_doc(transport::doc_lines(ctx, opts));

    (
        format!("{}\n{}", merger.emit(), hook.emit()),
        vec![options_name, hook_name],
    )
}

fn positional_mutation_hook(
    convention: &ReactiveConvention,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> (String, Vec<String>) {
    let hook_name = ctx.identifier.hook_name(convention.hook_prefix);
    let label = format!("{} {}", ctx.route.method, ctx.key.path);

    // (_: string, { arg }: { arg: PostUsersArgs }) => ...
    let mut fetcher_params = vec![TsParam::typed("_", TsType::string(), false)];
    let arg = if ctx.signature.accepts_argument() {
        fetcher_params.push(TsParam::typed(
            "{ arg }",
            TsType::Ref(format!("{{ arg: {} }}", ctx.identifier.args_type())),
            false,
        ));
        Some(TsExpr::ident("arg"))
    } else {
        None
    };
    let request = transport::request(ctx, opts, arg, Some(TsExpr::ident(CLIENT_OPTIONS)));
    let fetcher = TsExpr::Arrow {
        params: fetcher_params,
        body: Box::new(transport::parsed(request)),
    };

    let hook = TsFunction::exported(
        hook_name.clone(),
        vec![transport::options_param(options_type(convention, ctx))],
        vec![
            transport::destructure_options("{ swr: swrOptions, client: clientOptions }"),
            TsStmt::Return(Some(TsExpr::ident(convention.mutation_primitive).call(vec![
                TsExpr::string(label),
                fetcher,
                TsExpr::ident("swrOptions"),
            ]))),
        ],
    )
    .with_doc(transport::doc_lines(ctx, opts));

    (hook.emit(), vec![hook_name])
}

/// Mutation hook of a non-read route.
pub fn emit_mutation_hook(
    convention: &ReactiveConvention,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> Artifact {
    let (source, exports) = match convention.placement {
        OptionsPlacement::Merged(order) => merged_mutation_hook(convention, order, ctx, opts),
        OptionsPlacement::Positional => positional_mutation_hook(convention, ctx, opts),
    };

    let mut imports = transport::hook_imports(ctx, opts);
    imports.push(transport::primitive_import(
        convention.mutation_module,
        convention.mutation_primitive,
        convention.default_export,
    ));
    imports.push(ImportNeed::ty(
        convention.mutation_module,
        convention.mutation_options_type,
    ));

    Artifact {
        name: ctx.identifier.hook_name(convention.hook_prefix),
        kind: ArtifactKind::MutationHook,
        source,
        exports,
        imports,
    }
}
