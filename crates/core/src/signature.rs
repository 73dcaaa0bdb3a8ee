//! Binding signature resolution.
//!
//! Decides what a generated call accepts: nothing at all, or a single
//! argument object whose keys are the non-empty slots among `param`,
//! `query` and the body (`json` or `form`).

use routegen_common::{ParamSpec, ParamType, Route, TsProp, TsType};

use crate::error::GenerateError;
use crate::ident::{Segment, segmentize};

/// Request body encodings the transport client can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`
    Multipart,
}

impl BodyEncoding {
    /// Parse an encoding tag or media type.
    pub fn parse(tag: &str) -> Option<Self> {
        // Media type parameters (`; charset=utf-8`) do not change the binding
        let essence = tag.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "json" | "application/json" => Some(BodyEncoding::Json),
            "form" | "application/x-www-form-urlencoded" => Some(BodyEncoding::Form),
            "multipart" | "multipart/form-data" => Some(BodyEncoding::Multipart),
            _ => None,
        }
    }

    /// Argument key the body binds under.
    pub const fn slot_key(self) -> &'static str {
        match self {
            BodyEncoding::Json => "json",
            BodyEncoding::Form | BodyEncoding::Multipart => "form",
        }
    }
}

/// One key of the argument object.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSlot {
    /// `param`, `query`, `json` or `form`
    pub key: &'static str,
    /// Slot type
    pub ty: TsType,
    /// Whether the caller must supply the slot
    pub required: bool,
}

/// The single argument object of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentShape {
    /// Path parameters
    pub param: Option<ArgumentSlot>,
    /// Query parameters
    pub query: Option<ArgumentSlot>,
    /// Request body
    pub body: Option<ArgumentSlot>,
    /// Encoding of the body, when there is one
    pub encoding: Option<BodyEncoding>,
}

impl ArgumentShape {
    /// Present slots in `param`, `query`, body order.
    pub fn slots(&self) -> impl Iterator<Item = &ArgumentSlot> {
        [&self.param, &self.query, &self.body]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// The argument may be omitted when every slot is optional.
    pub fn is_optional(&self) -> bool {
        self.slots().all(|slot| !slot.required)
    }

    /// Object type of the argument.
    pub fn to_ts_type(&self) -> TsType {
        TsType::Object(
            self.slots()
                .map(|slot| TsProp {
                    name: slot.key.to_string(),
                    ty: slot.ty.clone(),
                    optional: !slot.required,
                })
                .collect(),
        )
    }
}

/// What a generated call accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingSignature {
    /// Zero call arguments
    None,
    /// One argument object
    Argument(ArgumentShape),
}

impl BindingSignature {
    /// Whether the call takes an argument.
    pub fn accepts_argument(&self) -> bool {
        matches!(self, BindingSignature::Argument(_))
    }

    /// The argument shape, if any.
    pub fn argument(&self) -> Option<&ArgumentShape> {
        match self {
            BindingSignature::None => None,
            BindingSignature::Argument(shape) => Some(shape),
        }
    }

    /// Whether the argument can be left out at call sites.
    pub fn is_optional(&self) -> bool {
        self.argument().is_none_or(ArgumentShape::is_optional)
    }
}

fn param_type(ty: ParamType) -> TsType {
    match ty {
        ParamType::String => TsType::string(),
        ParamType::Number | ParamType::Integer => TsType::number(),
        ParamType::Boolean => TsType::boolean(),
    }
}

fn params_slot(key: &'static str, params: &[ParamSpec]) -> Option<ArgumentSlot> {
    if params.is_empty() {
        return None;
    }
    let props = params
        .iter()
        .map(|p| TsProp {
            name: p.name.clone(),
            ty: param_type(p.ty),
            optional: !p.required,
        })
        .collect();
    Some(ArgumentSlot {
        key,
        ty: TsType::Object(props),
        required: params.iter().any(|p| p.required),
    })
}

/// Path parameters in template order.
///
/// Every placeholder binds a required parameter, typed by its declaration
/// when one exists and as a string otherwise. Declared parameters that the
/// template does not mention follow, as declared.
fn path_params(route: &Route) -> Result<Vec<ParamSpec>, GenerateError> {
    let segments = segmentize(&route.path).map_err(|err| err.at(route.id()))?;
    let mut params: Vec<ParamSpec> = segments
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .map(|name| {
            let ty = route
                .path_params
                .iter()
                .find(|p| p.name == name)
                .map_or(ParamType::String, |p| p.ty);
            ParamSpec::required(name).with_type(ty)
        })
        .collect();

    for declared in &route.path_params {
        if !params.iter().any(|p| p.name == declared.name) {
            params.push(declared.clone());
        }
    }
    Ok(params)
}

/// Resolve the binding signature of a route.
pub fn resolve(route: &Route) -> Result<BindingSignature, GenerateError> {
    let param = params_slot("param", &path_params(route)?);
    let query = params_slot("query", &route.query_params);

    let (body, encoding) = match &route.request_body {
        None => (None, None),
        Some(body) => {
            let encoding = BodyEncoding::parse(&body.encoding).ok_or_else(|| {
                GenerateError::UnrecognizedEncoding {
                    route: route.id(),
                    encoding: body.encoding.clone(),
                }
            })?;
            let slot = ArgumentSlot {
                key: encoding.slot_key(),
                ty: body.ty.to_ts_type(),
                required: body.required,
            };
            (Some(slot), Some(encoding))
        }
    };

    if param.is_none() && query.is_none() && body.is_none() {
        return Ok(BindingSignature::None);
    }
    Ok(BindingSignature::Argument(ArgumentShape {
        param,
        query,
        body,
        encoding,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::Emit;
    use routegen_common::{HttpMethod, RequestBody, TypeRef};

    #[test]
    fn test_no_inputs_means_no_argument() {
        let route = Route::new(HttpMethod::Post, "/users");
        assert_eq!(resolve(&route).unwrap(), BindingSignature::None);
        assert!(resolve(&route).unwrap().is_optional());
    }

    #[test]
    fn test_placeholders_bind_required_params() {
        let route = Route::new(HttpMethod::Get, "/users/{userId}/posts/:postId")
            .path_param(ParamSpec::required("postId").with_type(ParamType::Integer));
        let sig = resolve(&route).unwrap();
        let shape = sig.argument().unwrap();
        assert_eq!(
            shape.to_ts_type().emit(),
            "{ param: { userId: string; postId: number } }"
        );
        assert!(!sig.is_optional());
    }

    #[test]
    fn test_all_optional_query_makes_argument_optional() {
        let route = Route::new(HttpMethod::Get, "/audit-logs")
            .query_param(ParamSpec::optional("from"))
            .query_param(ParamSpec::optional("page").with_type(ParamType::Integer));
        let sig = resolve(&route).unwrap();
        assert_eq!(
            sig.argument().unwrap().to_ts_type().emit(),
            "{ query?: { from?: string; page?: number } }"
        );
        assert!(sig.is_optional());
    }

    #[test]
    fn test_required_query_field_makes_slot_required() {
        let route = Route::new(HttpMethod::Get, "/search")
            .query_param(ParamSpec::required("q"))
            .query_param(ParamSpec::optional("limit").with_type(ParamType::Number));
        let sig = resolve(&route).unwrap();
        assert_eq!(
            sig.argument().unwrap().to_ts_type().emit(),
            "{ query: { q: string; limit?: number } }"
        );
        assert!(!sig.is_optional());
    }

    #[test]
    fn test_body_slot_keys() {
        let json = Route::new(HttpMethod::Post, "/users")
            .body(RequestBody::json(TypeRef::named("NewUser")));
        let shape = resolve(&json).unwrap();
        assert_eq!(shape.argument().unwrap().to_ts_type().emit(), "{ json: NewUser }");

        for tag in [
            "form",
            "multipart",
            "multipart/form-data",
            "application/x-www-form-urlencoded",
        ] {
            let route = Route::new(HttpMethod::Post, "/uploads")
                .body(RequestBody::encoded(tag, TypeRef::named("UploadForm")));
            let shape = resolve(&route).unwrap();
            assert_eq!(shape.argument().unwrap().body.as_ref().unwrap().key, "form", "{tag}");
        }
    }

    #[test]
    fn test_media_type_parameters_ignored() {
        assert_eq!(
            BodyEncoding::parse("application/json; charset=utf-8"),
            Some(BodyEncoding::Json)
        );
        assert_eq!(BodyEncoding::parse("JSON"), Some(BodyEncoding::Json));
    }

    #[test]
    fn test_optional_body() {
        let mut body = RequestBody::json(TypeRef::named("Patch"));
        body.required = false;
        let route = Route::new(HttpMethod::Patch, "/settings").body(body);
        let sig = resolve(&route).unwrap();
        assert_eq!(sig.argument().unwrap().to_ts_type().emit(), "{ json?: Patch }");
        assert!(sig.is_optional());
    }

    #[test]
    fn test_unrecognized_encoding_is_fatal() {
        let route = Route::new(HttpMethod::Post, "/events")
            .body(RequestBody::encoded("application/xml", TypeRef::named("Event")));
        let err = resolve(&route).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnrecognizedEncoding {
                route: route.id(),
                encoding: "application/xml".into(),
            }
        );
    }

    #[test]
    fn test_slot_order_is_param_query_body() {
        let route = Route::new(HttpMethod::Put, "/users/:id")
            .query_param(ParamSpec::optional("notify").with_type(ParamType::Boolean))
            .body(RequestBody::json(TypeRef::named("User")));
        let sig = resolve(&route).unwrap();
        let keys: Vec<_> = sig.argument().unwrap().slots().map(|s| s.key).collect();
        assert_eq!(keys, ["param", "query", "json"]);
    }
}
