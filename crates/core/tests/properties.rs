//! Property tests over generated route tables.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use routegen_common::{AdapterKind, GeneratorConfig, HttpMethod, Route, RouteTable};
use routegen_core::ident::{derive, suffix_parts};
use routegen_core::{KeyStrategy, derive_key, generate, normalize_key};
use serde_json::json;

fn method() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![
        Just(HttpMethod::Get),
        Just(HttpMethod::Post),
        Just(HttpMethod::Put),
        Just(HttpMethod::Patch),
        Just(HttpMethod::Delete),
    ]
}

fn literal_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..4)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

/// Distinct parameterless routes.
fn route_table() -> impl Strategy<Value = RouteTable> {
    prop::collection::btree_set((method(), literal_path()), 1..8).prop_map(|pairs| {
        RouteTable::from_routes(
            pairs
                .into_iter()
                .map(|(method, path)| Route::new(method, path))
                .collect(),
        )
    })
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    chars
        .next()
        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_generation_is_deterministic(table in route_table()) {
        let config = GeneratorConfig::default();
        let first = generate(&table, &config).unwrap();
        let second = generate(&table, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_routes_get_distinct_identifiers(table in route_table()) {
        let names: BTreeSet<String> = table
            .routes
            .iter()
            .map(|route| derive(route.method, &route.path).unwrap().call_name())
            .collect();
        prop_assert_eq!(names.len(), table.routes.len());
        prop_assert!(generate(&table, &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn test_parameterless_routes_take_no_argument(table in route_table()) {
        let generation = generate(&table, &GeneratorConfig::default()).unwrap();
        for output in &generation.adapters {
            let unit = output.result.as_ref().unwrap();
            for artifact in &unit.artifacts {
                prop_assert!(!artifact.source.contains("args:"), "{}", artifact.source);
                prop_assert!(!artifact.source.contains("args?:"), "{}", artifact.source);
            }
        }
        let rpc = generation.unit(AdapterKind::Rpc).unwrap();
        for artifact in &rpc.artifacts {
            prop_assert!(artifact.source.contains("= async (): Promise<"), "{}", artifact.source);
        }
    }

    #[test]
    fn test_key_strategies_identify_the_same_entry(
        user_id in "[a-zA-Z0-9 _-]{1,12}",
        page in 0u32..1000,
        tags in prop::collection::vec("[a-z]{1,4}", 0..3),
    ) {
        let key = derive_key("/users/{userId}/posts", true).unwrap();
        let arg = json!({
            "param": { "userId": user_id },
            "query": { "page": page, "tag": tags },
        });
        let literal = key.evaluate(KeyStrategy::LiteralArray, Some(&arg)).unwrap();
        let derived = key.evaluate(KeyStrategy::UrlDerived, Some(&arg)).unwrap();
        prop_assert_eq!(normalize_key(&literal).unwrap(), normalize_key(&derived).unwrap());
    }

    #[test]
    fn test_dotted_segment_yields_one_piece_per_part(
        parts in prop::collection::vec("[a-z]{1,6}", 1..4),
    ) {
        let expected: Vec<String> = parts.iter().map(|p| capitalize(p)).collect();
        prop_assert_eq!(suffix_parts(&parts.join(".")).unwrap(), expected);
    }
}
