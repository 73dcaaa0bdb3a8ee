//! Identifier derivation from `(method, path)`.
//!
//! `GET /users/:userId/avatar` becomes `getUsersUserIdAvatar`. Every
//! exported name an emitter produces for a route (call, hook, key
//! generator, declarations) is rendered from the same [`Identifier`], so two
//! routes collide on all of them or on none.

use routegen_common::{HttpMethod, RouteId};
use thiserror::Error;

use crate::error::GenerateError;
use crate::ir::utils::{capitalize_first, is_ident_char};

/// Piece derived for the root path `/`.
const ROOT_PIECE: &str = "Index";

/// One `/`-separated piece of a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text (`users`, `audit-logs`, `Accounts.json`)
    Literal(&'a str),
    /// Placeholder name without its sentinel (`userId` for `:userId` or `{userId}`)
    Param(&'a str),
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_prefix(':') {
            Segment::Param(name)
        } else if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Segment::Param(name)
        } else {
            Segment::Literal(raw)
        }
    }
}

/// A segment that normalizes to nothing or mixes a placeholder into literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed path segment '{segment}'")]
pub struct SegmentError {
    /// Raw segment text
    pub segment: String,
}

impl SegmentError {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
        }
    }

    /// Attribute the error to a route.
    pub fn at(self, route: RouteId) -> GenerateError {
        GenerateError::MalformedSegment {
            route,
            segment: self.segment,
        }
    }
}

/// Split a path template into segments, discarding empty ones.
///
/// Placeholders without a name (`:` or `{}`) and braces inside literal text
/// (`{id}.json`) are rejected here so every consumer of the segment list sees
/// the same failure. A placeholder must be the whole segment.
pub fn segmentize(path: &str) -> Result<Vec<Segment<'_>>, SegmentError> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|raw| match Segment::parse(raw) {
            Segment::Param("") => Err(SegmentError::new(raw)),
            Segment::Literal(text) if text.contains(['{', '}']) => Err(SegmentError::new(raw)),
            segment => Ok(segment),
        })
        .collect()
}

/// Title-case the runs of identifier characters in `s` and concatenate them.
///
/// `audit-logs` -> `AuditLogs`, `user id` -> `UserId`.
fn title_case(s: &str) -> String {
    s.split(|c: char| !is_ident_char(c))
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect()
}

/// Pieces contributed by a dotted literal segment, one per dot part.
///
/// `Accounts.json` -> `["Accounts", "Json"]`. An empty part (`a..b`,
/// `.well-known`) is an error rather than being skipped.
pub fn suffix_parts(segment: &str) -> Result<Vec<String>, SegmentError> {
    segment
        .split('.')
        .map(|part| {
            let piece = title_case(part);
            if piece.is_empty() {
                Err(SegmentError::new(segment))
            } else {
                Ok(piece)
            }
        })
        .collect()
}

/// Identifier pieces for a whole path, in path order.
pub fn name_pieces(path: &str) -> Result<Vec<String>, SegmentError> {
    let segments = segmentize(path)?;
    if segments.is_empty() {
        return Ok(vec![ROOT_PIECE.to_string()]);
    }

    let mut pieces = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) if text.contains('.') => {
                pieces.extend(suffix_parts(text)?);
            }
            Segment::Literal(text) | Segment::Param(text) => {
                let piece = title_case(text);
                if piece.is_empty() {
                    return Err(SegmentError::new(text));
                }
                pieces.push(piece);
            }
        }
    }
    Ok(pieces)
}

/// Names derived for one route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    verb: &'static str,
    pieces: Vec<String>,
}

impl Identifier {
    /// Path pieces without the verb.
    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }

    /// `getUsersUserIdAvatar`
    pub fn call_name(&self) -> String {
        format!("{}{}", self.verb, self.pieces.concat())
    }

    /// `GetUsersUserIdAvatar`
    pub fn pascal(&self) -> String {
        format!("{}{}", capitalize_first(self.verb), self.pieces.concat())
    }

    /// `useGetUsersUserIdAvatar` / `createGetUsersUserIdAvatar`
    pub fn hook_name(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.pascal())
    }

    /// `getGetUsersUserIdAvatarKey` / `getGetUsersUserIdAvatarQueryKey`
    pub fn key_fn_name(&self, suffix: &str) -> String {
        format!("get{}{suffix}", self.pascal())
    }

    /// `getGetUsersQueryOptions`
    pub fn query_options_name(&self) -> String {
        format!("get{}QueryOptions", self.pascal())
    }

    /// `getPostUsersMutationOptions`
    pub fn mutation_options_name(&self) -> String {
        format!("get{}MutationOptions", self.pascal())
    }

    /// `GetUsersArgs`
    pub fn args_type(&self) -> String {
        format!("{}Args", self.pascal())
    }

    /// `GetUsersResponse`
    pub fn response_type(&self) -> String {
        format!("{}Response", self.pascal())
    }
}

/// Derive the identifier of a route.
pub fn derive(method: HttpMethod, path: &str) -> Result<Identifier, GenerateError> {
    let pieces = name_pieces(path).map_err(|err| {
        err.at(RouteId {
            method,
            path: path.to_string(),
        })
    })?;
    Ok(Identifier {
        verb: method.verb(),
        pieces,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn call_name(method: HttpMethod, path: &str) -> String {
        derive(method, path).unwrap().call_name()
    }

    #[test]
    fn test_read_route_with_placeholder() {
        assert_eq!(
            call_name(HttpMethod::Get, "/users/:userId/avatar"),
            "getUsersUserIdAvatar"
        );
        assert_eq!(
            call_name(HttpMethod::Get, "/users/{userId}/avatar"),
            "getUsersUserIdAvatar"
        );
    }

    #[test]
    fn test_verb_comes_from_method_only() {
        assert_eq!(call_name(HttpMethod::Get, "/saml/sso"), "getSamlSso");
        assert_eq!(call_name(HttpMethod::Post, "/saml/sso"), "postSamlSso");
        assert_eq!(call_name(HttpMethod::Delete, "/users/:id"), "deleteUsersId");
    }

    #[test]
    fn test_hyphenated_literal() {
        assert_eq!(call_name(HttpMethod::Get, "/audit-logs"), "getAuditLogs");
    }

    #[test]
    fn test_dotted_suffix() {
        let ident = derive(HttpMethod::Get, "/Accounts.json").unwrap();
        assert_eq!(ident.pieces(), ["Accounts", "Json"]);
        assert_eq!(ident.call_name(), "getAccountsJson");
    }

    #[test]
    fn test_placeholder_with_illegal_characters() {
        assert_eq!(
            call_name(HttpMethod::Get, "/files/{file-id}"),
            "getFilesFileId"
        );
    }

    #[test]
    fn test_root_path() {
        assert_eq!(call_name(HttpMethod::Get, "/"), "getIndex");
        assert_eq!(call_name(HttpMethod::Get, ""), "getIndex");
    }

    #[test]
    fn test_derived_names() {
        let ident = derive(HttpMethod::Get, "/saml/sso").unwrap();
        assert_eq!(ident.pascal(), "GetSamlSso");
        assert_eq!(ident.hook_name("use"), "useGetSamlSso");
        assert_eq!(ident.hook_name("create"), "createGetSamlSso");
        assert_eq!(ident.key_fn_name("Key"), "getGetSamlSsoKey");
        assert_eq!(ident.key_fn_name("QueryKey"), "getGetSamlSsoQueryKey");
        assert_eq!(ident.query_options_name(), "getGetSamlSsoQueryOptions");
        assert_eq!(ident.args_type(), "GetSamlSsoArgs");
        assert_eq!(ident.response_type(), "GetSamlSsoResponse");
    }

    #[test]
    fn test_malformed_segments_are_fatal() {
        for path in ["/---", "/a..b", "/.well-known", "/users/:", "/users/{}", "/users/{id}.json"] {
            let err = derive(HttpMethod::Get, path).unwrap_err();
            assert!(
                matches!(err, GenerateError::MalformedSegment { .. }),
                "{path} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn test_suffix_round_trip() {
        let parts = suffix_parts("Accounts.json").unwrap();
        assert_eq!(suffix_parts(&parts.join(".")).unwrap(), parts);
    }

    #[test]
    fn test_segmentize() {
        let segments = segmentize("/users/:userId/{postId}/Accounts.json").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("users"),
                Segment::Param("userId"),
                Segment::Param("postId"),
                Segment::Literal("Accounts.json"),
            ]
        );
    }

    #[test]
    fn test_placeholder_must_fill_its_segment() {
        let err = segmentize("/users/{id}.json").unwrap_err();
        assert_eq!(err.segment, "{id}.json");
        assert!(segmentize("/users/{id}/profile{").is_err());
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let first = derive(HttpMethod::Patch, "/orgs/:orgId/members.csv").unwrap();
        let second = derive(HttpMethod::Patch, "/orgs/:orgId/members.csv").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.call_name(), "patchOrgsOrgIdMembersCsv");
    }
}
