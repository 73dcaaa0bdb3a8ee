//! Per-adapter emitters.
//!
//! Every adapter goes through [`emit_route`]; what it produces is decided by
//! its [`AdapterDescriptor`]:
//! - plain call: one async function per route (`call`)
//! - reactive: a key generator plus a query hook for read routes (`query`),
//!   a mutation hook for everything else (`mutation`)
//!
//! The shared declarations unit is produced by `declare`, once per run.

pub mod call;
pub mod declare;
pub mod mutation;
pub mod query;
pub mod transport;

use routegen_common::{ClientConfig, GeneratorConfig, Route};

use crate::adapter::{AdapterDescriptor, AdapterStyle, ReactiveConvention};
use crate::error::GenerateError;
use crate::ident::Identifier;
use crate::key::{CacheKeyExpr, KeyStrategy};
use crate::signature::BindingSignature;

/// What an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    /// Named type or per-route `Args` / `Response` declarations
    TypeDeclaration,
    /// Plain async call
    Call,
    /// Cache-key generator
    KeyGenerator,
    /// Query hook, possibly with its options merger
    QueryHook,
    /// Mutation hook, possibly with its options merger
    MutationHook,
}

/// How a symbol is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportKind {
    /// `import { name } from "module"`
    Value,
    /// `import type { name } from "module"`
    Type,
    /// `import name from "module"`
    Default,
}

/// A symbol an artifact needs from another module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportNeed {
    /// Module specifier
    pub module: String,
    /// Imported binding
    pub name: String,
    /// Import flavor
    pub kind: ImportKind,
}

impl ImportNeed {
    /// A named value import.
    pub fn value(module: &str, name: &str) -> Self {
        Self::new(module, name, ImportKind::Value)
    }

    /// A named type-only import.
    pub fn ty(module: &str, name: &str) -> Self {
        Self::new(module, name, ImportKind::Type)
    }

    /// A default import.
    pub fn default_export(module: &str, name: &str) -> Self {
        Self::new(module, name, ImportKind::Default)
    }

    fn new(module: &str, name: &str, kind: ImportKind) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

/// One generated, self-contained piece of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Primary exported name
    pub name: String,
    /// What it is
    pub kind: ArtifactKind,
    /// TypeScript source
    pub source: String,
    /// Every symbol it exports
    pub exports: Vec<String>,
    /// Symbols it needs from other modules
    pub imports: Vec<ImportNeed>,
}

/// Settings the emitters read from the generator config.
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions<'a> {
    /// Transport client location
    pub client: &'a ClientConfig,
    /// Module of the shared declarations
    pub types_module: &'a str,
    /// Emit JSDoc blocks
    pub docs: bool,
}

impl<'a> From<&'a GeneratorConfig> for EmitOptions<'a> {
    fn from(config: &'a GeneratorConfig) -> Self {
        Self {
            client: &config.client,
            types_module: &config.types_module,
            docs: config.docs,
        }
    }
}

/// Everything derived for one route, shared by all adapters.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    /// The route
    pub route: &'a Route,
    /// Its identifier
    pub identifier: &'a Identifier,
    /// Its binding signature
    pub signature: &'a BindingSignature,
    /// Its cache key (used by read routes only)
    pub key: &'a CacheKeyExpr,
}

/// Reject routes an adapter's conventions cannot express.
fn check_convention(
    descriptor: &AdapterDescriptor,
    convention: &ReactiveConvention,
    ctx: &RouteContext<'_>,
) -> Result<(), GenerateError> {
    if convention.key_strategy == KeyStrategy::UrlDerived && ctx.route.request_body.is_some() {
        return Err(GenerateError::ConventionViolation {
            adapter: descriptor.kind,
            route: ctx.route.id(),
            rule: "read route carries a request body, which a URL-derived cache key cannot include"
                .into(),
        });
    }
    Ok(())
}

/// Emit the artifacts of one route for one adapter, in output order.
pub fn emit_route(
    descriptor: &AdapterDescriptor,
    ctx: &RouteContext<'_>,
    opts: &EmitOptions<'_>,
) -> Result<Vec<Artifact>, GenerateError> {
    match &descriptor.style {
        AdapterStyle::PlainCall => Ok(vec![call::emit_call(ctx, opts)]),
        AdapterStyle::Reactive(convention) if ctx.route.method.is_read() => {
            check_convention(descriptor, convention, ctx)?;
            Ok(vec![
                query::emit_key_generator(convention, ctx, opts),
                query::emit_query_hook(convention, ctx, opts),
            ])
        }
        AdapterStyle::Reactive(convention) => {
            Ok(vec![mutation::emit_mutation_hook(convention, ctx, opts)])
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::adapter::descriptor;
    use crate::ident::derive;
    use crate::key::derive_key;
    use crate::signature::resolve;
    use routegen_common::{AdapterKind, HttpMethod, ParamSpec, RequestBody, TypeRef};

    fn emit(kind: AdapterKind, route: &Route) -> Result<Vec<Artifact>, GenerateError> {
        let identifier = derive(route.method, &route.path).unwrap();
        let signature = resolve(route).unwrap();
        let key = derive_key(&route.path, signature.accepts_argument()).unwrap();
        let ctx = RouteContext {
            route,
            identifier: &identifier,
            signature: &signature,
            key: &key,
        };
        let config = GeneratorConfig::default();
        emit_route(&descriptor(kind), &ctx, &EmitOptions::from(&config))
    }

    fn kinds(artifacts: &[Artifact]) -> Vec<ArtifactKind> {
        artifacts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_read_route_gets_key_and_hook() {
        let route = Route::new(HttpMethod::Get, "/saml/sso");
        for kind in [
            AdapterKind::TanstackQuery,
            AdapterKind::SvelteQuery,
            AdapterKind::VueQuery,
            AdapterKind::Swr,
        ] {
            let artifacts = emit(kind, &route).unwrap();
            assert_eq!(
                kinds(&artifacts),
                [ArtifactKind::KeyGenerator, ArtifactKind::QueryHook],
                "{kind}"
            );
        }
    }

    #[test]
    fn test_mutation_route_gets_single_hook() {
        let route = Route::new(HttpMethod::Post, "/saml/sso");
        for kind in [
            AdapterKind::TanstackQuery,
            AdapterKind::SvelteQuery,
            AdapterKind::VueQuery,
            AdapterKind::Swr,
        ] {
            let artifacts = emit(kind, &route).unwrap();
            assert_eq!(kinds(&artifacts), [ArtifactKind::MutationHook], "{kind}");
        }
    }

    #[test]
    fn test_rpc_emits_one_call() {
        let route =
            Route::new(HttpMethod::Get, "/users/:userId").path_param(ParamSpec::required("userId"));
        let artifacts = emit(AdapterKind::Rpc, &route).unwrap();
        assert_eq!(kinds(&artifacts), [ArtifactKind::Call]);
        assert_eq!(artifacts[0].name, "getUsersUserId");
    }

    #[test]
    fn test_read_body_violates_url_derived_convention() {
        let route = Route::new(HttpMethod::Get, "/search")
            .body(RequestBody::json(TypeRef::named("SearchRequest")));
        for kind in [AdapterKind::VueQuery, AdapterKind::Swr] {
            let err = emit(kind, &route).unwrap_err();
            assert!(err.is_adapter_scoped());
            assert!(
                matches!(err, GenerateError::ConventionViolation { adapter, .. } if adapter == kind)
            );
        }
        // Literal keys carry the body in the argument
        assert!(emit(AdapterKind::TanstackQuery, &route).is_ok());
        assert!(emit(AdapterKind::Rpc, &route).is_ok());
    }
}
