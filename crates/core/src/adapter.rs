//! Adapter descriptors.
//!
//! The four reactive adapters differ only in data: which module and
//! primitives they import, how caller options combine with the generated
//! ones, and which key strategy they use. The emitters read these records
//! instead of branching on the adapter.

use routegen_common::AdapterKind;

use crate::key::KeyStrategy;

/// How caller-supplied options combine with generated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOrder {
    /// `{ ...callerOptions, queryKey, queryFn }`: generated fields win
    CallerFirst,
    /// `{ queryKey, queryFn, ...callerOptions }`: caller overrides win
    CallerLast,
}

/// Where caller options go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsPlacement {
    /// Merged into one options object built by an exported options merger
    Merged(MergeOrder),
    /// Passed as a separate configuration argument of the primitive
    Positional,
}

/// Conventions of one reactive data-fetching library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactiveConvention {
    /// Module of the query primitive and its option types
    pub query_module: &'static str,
    /// Module of the mutation primitive and its option types
    pub mutation_module: &'static str,
    /// `useQuery`, `createQuery`, `useSWR`
    pub query_primitive: &'static str,
    /// `useMutation`, `createMutation`, `useSWRMutation`
    pub mutation_primitive: &'static str,
    /// Primitives are default exports (`import useSWR from "swr"`)
    pub default_export: bool,
    /// Option type of the query primitive
    pub query_options_type: &'static str,
    /// Option type of the mutation primitive
    pub mutation_options_type: &'static str,
    /// `use` or `create`
    pub hook_prefix: &'static str,
    /// Options are handed over as a thunk (`createQuery(() => options)`)
    pub thunk_options: bool,
    /// Options placement
    pub placement: OptionsPlacement,
    /// Key strategy
    pub key_strategy: KeyStrategy,
    /// Suffix of the key generator name (`get{Pascal}{suffix}`)
    pub key_suffix: &'static str,
}

/// What an adapter emits per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterStyle {
    /// One plain async call per route
    PlainCall,
    /// Key generators and hooks
    Reactive(ReactiveConvention),
}

/// An adapter and its conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterDescriptor {
    /// Which adapter
    pub kind: AdapterKind,
    /// What it emits
    pub style: AdapterStyle,
}

/// Descriptor of an adapter.
pub fn descriptor(kind: AdapterKind) -> AdapterDescriptor {
    let style = match kind {
        AdapterKind::Rpc => AdapterStyle::PlainCall,
        AdapterKind::TanstackQuery => AdapterStyle::Reactive(ReactiveConvention {
            query_module: "@tanstack/react-query",
            mutation_module: "@tanstack/react-query",
            query_primitive: "useQuery",
            mutation_primitive: "useMutation",
            default_export: false,
            query_options_type: "UseQueryOptions",
            mutation_options_type: "UseMutationOptions",
            hook_prefix: "use",
            thunk_options: false,
            placement: OptionsPlacement::Merged(MergeOrder::CallerFirst),
            key_strategy: KeyStrategy::LiteralArray,
            key_suffix: "QueryKey",
        }),
        AdapterKind::SvelteQuery => AdapterStyle::Reactive(ReactiveConvention {
            query_module: "@tanstack/svelte-query",
            mutation_module: "@tanstack/svelte-query",
            query_primitive: "createQuery",
            mutation_primitive: "createMutation",
            default_export: false,
            query_options_type: "CreateQueryOptions",
            mutation_options_type: "CreateMutationOptions",
            hook_prefix: "create",
            thunk_options: true,
            placement: OptionsPlacement::Merged(MergeOrder::CallerFirst),
            key_strategy: KeyStrategy::LiteralArray,
            key_suffix: "QueryKey",
        }),
        AdapterKind::VueQuery => AdapterStyle::Reactive(ReactiveConvention {
            query_module: "@tanstack/vue-query",
            mutation_module: "@tanstack/vue-query",
            query_primitive: "useQuery",
            mutation_primitive: "useMutation",
            default_export: false,
            query_options_type: "UseQueryOptions",
            mutation_options_type: "UseMutationOptions",
            hook_prefix: "use",
            thunk_options: false,
            placement: OptionsPlacement::Merged(MergeOrder::CallerLast),
            key_strategy: KeyStrategy::UrlDerived,
            key_suffix: "QueryKey",
        }),
        AdapterKind::Swr => AdapterStyle::Reactive(ReactiveConvention {
            query_module: "swr",
            mutation_module: "swr/mutation",
            query_primitive: "useSWR",
            mutation_primitive: "useSWRMutation",
            default_export: true,
            query_options_type: "SWRConfiguration",
            mutation_options_type: "SWRMutationConfiguration",
            hook_prefix: "use",
            thunk_options: false,
            placement: OptionsPlacement::Positional,
            key_strategy: KeyStrategy::UrlDerived,
            key_suffix: "Key",
        }),
    };
    AdapterDescriptor { kind, style }
}
