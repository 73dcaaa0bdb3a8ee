//! Cache-key derivation for read routes.
//!
//! A key always starts with the normalized path template (`:name`
//! placeholders). Adapters express it one of two ways:
//! - literal array: `["/users/:userId", ...(args ? [args] : [])] as const`
//! - URL-derived: the resolved `pathname + search` of the request URL
//!
//! [`CacheKeyExpr::evaluate`] and [`normalize_key`] model what both
//! expressions evaluate to at call time, so that the two strategies can be
//! checked to identify the same cache entry.

use serde_json::Value;
use thiserror::Error;
use url::{Url, form_urlencoded};

use crate::ident::{Segment, SegmentError, segmentize};
use crate::ir::{BinOp, TsExpr, TsStmt};

/// How an adapter spells its cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// `[template, args?]`
    LiteralArray,
    /// `[pathname + search]` of `$url(args)`
    UrlDerived,
}

/// Errors of the key evaluation model
#[derive(Debug, Error)]
pub enum KeyError {
    /// The synthetic base URL could not be built.
    #[error("Failed to build request URL: {0}")]
    Url(#[from] url::ParseError),

    /// A placeholder had no value in `args.param`.
    #[error("Missing value for path parameter '{0}'")]
    MissingParam(String),

    /// The key does not start with a path string.
    #[error("Key must start with a path string")]
    NotAKey,
}

/// Replace `{name}` placeholders with `:name`, keeping literal segments as written.
pub fn normalize_path(path: &str) -> Result<String, SegmentError> {
    let segments = segmentize(path)?;
    if segments.is_empty() {
        return Ok("/".to_string());
    }
    let mut out = String::with_capacity(path.len());
    for segment in segments {
        out.push('/');
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Param(name) => {
                out.push(':');
                out.push_str(name);
            }
        }
    }
    Ok(out)
}

/// Key expression for one read route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyExpr {
    /// Normalized path template, the first key element
    pub path: String,
    /// Whether the route takes an argument that extends the key
    pub accepts_argument: bool,
}

/// Derive the cache key of a route.
pub fn derive_key(path: &str, accepts_argument: bool) -> Result<CacheKeyExpr, SegmentError> {
    Ok(CacheKeyExpr {
        path: normalize_path(path)?,
        accepts_argument,
    })
}

impl CacheKeyExpr {
    /// Body of a key generator.
    ///
    /// `url_accessor` is the transport accessor of the route (needed by the
    /// URL-derived strategy only); `arg` is the name of the argument in scope,
    /// absent for routes without one.
    pub fn statements(
        &self,
        strategy: KeyStrategy,
        url_accessor: TsExpr,
        arg: Option<&str>,
    ) -> Vec<TsStmt> {
        match strategy {
            KeyStrategy::LiteralArray => {
                let mut items = vec![TsExpr::string(&self.path)];
                if let (true, Some(arg)) = (self.accepts_argument, arg) {
                    // [path, ...(args ? [args] : [])]
                    items.push(
                        TsExpr::Paren(Box::new(TsExpr::Ternary {
                            cond: Box::new(TsExpr::ident(arg)),
                            then_expr: Box::new(TsExpr::Array(vec![TsExpr::ident(arg)])),
                            else_expr: Box::new(TsExpr::Array(vec![])),
                        }))
                        .spread(),
                    );
                }
                vec![TsStmt::Return(Some(TsExpr::Array(items).as_const()))]
            }
            KeyStrategy::UrlDerived => {
                let url_args = match arg {
                    Some(arg) if self.accepts_argument => vec![TsExpr::ident(arg)],
                    _ => vec![],
                };
                let resolved = TsExpr::BinOp {
                    left: Box::new(TsExpr::ident("url").member("pathname")),
                    op: BinOp::Plus,
                    right: Box::new(TsExpr::ident("url").member("search")),
                };
                vec![
                    TsStmt::Const {
                        pattern: "url".into(),
                        init: url_accessor.member("$url").call(url_args),
                    },
                    TsStmt::Return(Some(TsExpr::Array(vec![resolved]).as_const())),
                ]
            }
        }
    }

    /// Runtime value of the key under `strategy` for a given argument.
    pub fn evaluate(
        &self,
        strategy: KeyStrategy,
        arg: Option<&Value>,
    ) -> Result<Vec<Value>, KeyError> {
        let arg = arg.filter(|_| self.accepts_argument);
        match strategy {
            KeyStrategy::LiteralArray => {
                let mut key = vec![Value::String(self.path.clone())];
                if let Some(arg) = arg {
                    key.push(arg.clone());
                }
                Ok(key)
            }
            KeyStrategy::UrlDerived => Ok(vec![Value::String(resolve_url(&self.path, arg)?)]),
        }
    }
}

/// Reduce an evaluated key of either strategy to `pathname + search`.
pub fn normalize_key(key: &[Value]) -> Result<String, KeyError> {
    match key {
        [Value::String(resolved)] => {
            // Already `pathname + search`, or a bare template
            let url = base_url()?.join(resolved)?;
            Ok(path_and_query(&url))
        }
        [Value::String(path), arg] => resolve_url(path, Some(arg)),
        _ => Err(KeyError::NotAKey),
    }
}

fn base_url() -> Result<Url, url::ParseError> {
    Url::parse("http://localhost")
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Resolve a template against `args.param` / `args.query` the way the
/// transport client's `$url` does.
fn resolve_url(template: &str, arg: Option<&Value>) -> Result<String, KeyError> {
    let params = arg.and_then(|a| a.get("param"));
    let mut path = String::new();
    for raw in template.split('/').filter(|s| !s.is_empty()) {
        path.push('/');
        match raw.strip_prefix(':') {
            Some(name) if !name.is_empty() => {
                match params.and_then(|p| p.get(name)).and_then(scalar) {
                    Some(value) => path.push_str(&encode_component(&value)),
                    // Without an argument the template stays a prefix of every resolved key
                    None if arg.is_none() => path.push_str(raw),
                    None => return Err(KeyError::MissingParam(name.to_string())),
                }
            }
            _ => path.push_str(raw),
        }
    }
    if path.is_empty() {
        path.push('/');
    }

    let mut url = base_url()?;
    url.set_path(&path);

    let mut pairs = Vec::new();
    if let Some(Value::Object(query)) = arg.and_then(|a| a.get("query")) {
        for (name, value) in query {
            match value {
                Value::Array(items) => {
                    pairs.extend(items.iter().filter_map(scalar).map(|v| (name.clone(), v)));
                }
                other => pairs.extend(scalar(other).map(|v| (name.clone(), v))),
            }
        }
    }
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(path_and_query(&url))
}
