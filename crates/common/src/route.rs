//! Route model handed to the generator by an external parser.
//!
//! A [`RouteTable`] is constructed once per generation run and never mutated
//! afterwards. The generator makes no assumption about where it came from
//! (an OpenAPI document, a hand-written table, a running server).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{TsTypeDef, TypeRef};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name ("GET").
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Lower-case verb used as identifier prefix and accessor suffix ("get").
    pub const fn verb(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Read routes are cache-keyed; everything else is a mutation.
    pub const fn is_read(self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive type of a path or query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamType {
    /// string
    String,
    /// number
    Number,
    /// integer (emitted as `number`)
    Integer,
    /// boolean
    Boolean,
}

/// A single path or query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Name as it appears in the path template or query string
    pub name: String,
    /// Whether callers must supply it
    #[serde(default)]
    pub required: bool,
    /// Primitive type
    #[serde(default = "default_param_type")]
    pub ty: ParamType,
}

const fn default_param_type() -> ParamType {
    ParamType::String
}

impl ParamSpec {
    /// A required string parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            ty: ParamType::String,
        }
    }

    /// An optional string parameter.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            ty: ParamType::String,
        }
    }

    /// Override the primitive type.
    pub fn with_type(mut self, ty: ParamType) -> Self {
        self.ty = ty;
        self
    }
}

/// Request body
///
/// `encoding` is the tag the parser found (`json`, `form`, `multipart`, or
/// the matching media type). It stays a string here so an unrecognized value
/// can be reported instead of being lost at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Encoding tag
    pub encoding: String,
    /// Whether the body must be sent
    #[serde(default = "default_true")]
    pub required: bool,
    /// Body shape
    pub ty: TypeRef,
}

const fn default_true() -> bool {
    true
}

impl RequestBody {
    /// A required JSON body.
    pub fn json(ty: TypeRef) -> Self {
        Self {
            encoding: "json".into(),
            required: true,
            ty,
        }
    }

    /// A required body with an explicit encoding tag.
    pub fn encoded(encoding: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            encoding: encoding.into(),
            required: true,
            ty,
        }
    }
}

/// How a response payload is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseFormat {
    /// JSON body
    Json,
    /// Plain text body
    Text,
    /// Binary body
    Binary,
    /// Redirect (no meaningful body)
    Redirect,
    /// No content
    Empty,
}

impl ResponseFormat {
    /// Tag written into the response union.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Text => "text",
            ResponseFormat::Binary => "binary",
            ResponseFormat::Redirect => "redirect",
            ResponseFormat::Empty => "empty",
        }
    }
}

/// One outcome of a route at a given status code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Delivery format
    pub format: ResponseFormat,
    /// Payload shape, absent for redirects and empty responses
    #[serde(default)]
    pub ty: Option<TypeRef>,
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,
}

impl ResponseSpec {
    /// A JSON response of the given shape.
    pub fn json(ty: TypeRef) -> Self {
        Self {
            format: ResponseFormat::Json,
            ty: Some(ty),
            description: None,
        }
    }

    /// A response without payload.
    pub fn bare(format: ResponseFormat) -> Self {
        Self {
            format,
            ty: None,
            description: None,
        }
    }
}

/// One HTTP endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// HTTP method
    pub method: HttpMethod,
    /// Path template (`/users/:userId` or `/users/{userId}`)
    pub path: String,
    /// Path parameters in template order
    #[serde(default)]
    pub path_params: Vec<ParamSpec>,
    /// Query parameters
    #[serde(default)]
    pub query_params: Vec<ParamSpec>,
    /// Request body, if any
    #[serde(default)]
    pub request_body: Option<RequestBody>,
    /// Outcomes keyed by status code
    #[serde(default)]
    pub responses: BTreeMap<u16, ResponseSpec>,
    /// Whether bearer credentials are required (documentation only)
    #[serde(default)]
    pub security: bool,
    /// Short summary for generated docs
    #[serde(default)]
    pub summary: Option<String>,
    /// Longer description for generated docs
    #[serde(default)]
    pub description: Option<String>,
    /// Marks generated bindings `@deprecated`
    #[serde(default)]
    pub deprecated: bool,
}

impl Route {
    /// A route with no parameters, body or responses.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            request_body: None,
            responses: BTreeMap::new(),
            security: false,
            summary: None,
            description: None,
            deprecated: false,
        }
    }

    /// Add a path parameter.
    pub fn path_param(mut self, param: ParamSpec) -> Self {
        self.path_params.push(param);
        self
    }

    /// Add a query parameter.
    pub fn query_param(mut self, param: ParamSpec) -> Self {
        self.query_params.push(param);
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Add a response outcome.
    pub fn response(mut self, status: u16, response: ResponseSpec) -> Self {
        self.responses.insert(status, response);
        self
    }

    /// Mark the route as requiring bearer credentials.
    pub fn secured(mut self) -> Self {
        self.security = true;
        self
    }

    /// Attach a summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// `(method, path)` identity used in diagnostics.
    pub fn id(&self) -> RouteId {
        RouteId {
            method: self.method,
            path: self.path.clone(),
        }
    }
}

/// Identity of a route, displayed as `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId {
    /// HTTP method
    pub method: HttpMethod,
    /// Path template as written in the table
    pub path: String,
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// The full input of one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Routes in emission order
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Named (possibly recursive) types referenced by routes
    #[serde(default)]
    pub types: Vec<TsTypeDef>,
}

impl RouteTable {
    /// Parse the JSON hand-off format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a table from routes only.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            routes,
            types: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_display() {
        let route = Route::new(HttpMethod::Delete, "/users/:userId");
        assert_eq!(route.id().to_string(), "DELETE /users/:userId");
    }

    #[test]
    fn test_method_verbs() {
        assert_eq!(HttpMethod::Get.verb(), "get");
        assert_eq!(HttpMethod::Patch.verb(), "patch");
        assert!(HttpMethod::Get.is_read());
        assert!(!HttpMethod::Post.is_read());
    }

    #[test]
    fn test_route_table_from_json() {
        let json = r#"{
            "routes": [
                {
                    "method": "GET",
                    "path": "/audit-logs",
                    "queryParams": [
                        { "name": "from" },
                        { "name": "page", "ty": "integer" }
                    ],
                    "responses": {
                        "200": { "format": "json", "ty": { "named": "AuditLogPage" } },
                        "401": { "format": "json", "ty": { "named": "ErrorBody" }, "description": "Unauthorized" }
                    },
                    "security": true
                },
                {
                    "method": "POST",
                    "path": "/uploads",
                    "requestBody": { "encoding": "multipart", "ty": { "named": "UploadForm" } }
                }
            ]
        }"#;
        let table = RouteTable::from_json(json).unwrap();
        assert_eq!(table.routes.len(), 2);

        let audit = &table.routes[0];
        assert_eq!(audit.method, HttpMethod::Get);
        assert_eq!(audit.query_params.len(), 2);
        assert!(!audit.query_params[0].required);
        assert_eq!(audit.query_params[1].ty, ParamType::Integer);
        assert_eq!(audit.responses.keys().copied().collect::<Vec<_>>(), vec![200, 401]);
        assert!(audit.security);

        let upload = table.routes[1].request_body.as_ref().unwrap();
        assert_eq!(upload.encoding, "multipart");
        assert!(upload.required);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let json = r#"{ "routes": [{ "method": "TRACE", "path": "/" }] }"#;
        assert!(RouteTable::from_json(json).is_err());
    }
}
