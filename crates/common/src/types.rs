//! TypeScript type references carried by the route model.
//!
//! Request bodies, responses and the route table's named declarations are all
//! described with these types. They are deliberately TypeScript-shaped: the
//! generator emits TypeScript, and a parser that hands over a route table
//! already knows how its schemas map to TS.
//!
//! - TypeRef: named reference or inline type
//! - TsType: primitives, arrays, unions, objects, records, literals
//! - TsTypeDef: a named declaration (interface, alias or const enum)

use serde::{Deserialize, Serialize};

/// Reference to a type - either inline or named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    /// Reference to a named type: "Item", "User"
    Named(String),
    /// Inline type definition
    Inline(Box<TsType>),
}

impl TypeRef {
    /// Shorthand for a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Shorthand for an inline type.
    pub fn inline(ty: TsType) -> Self {
        TypeRef::Inline(Box::new(ty))
    }

    /// Convert this TypeRef to a TsType (resolving named references to TsType::Ref)
    pub fn to_ts_type(&self) -> TsType {
        match self {
            TypeRef::Named(name) => TsType::Ref(name.clone()),
            TypeRef::Inline(t) => (**t).clone(),
        }
    }
}

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void, unknown
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Record type: Record<K, V>
    Record {
        /// Key type
        key: Box<TsType>,
        /// Value type
        value: Box<TsType>,
    },
    /// Literal type: "foo", 42, true
    Literal(TsLiteral),
    /// Named type reference (shorthand for TypeRef::Named in type position)
    Ref(String),
}

impl TsType {
    /// `string`
    pub const fn string() -> Self {
        TsType::Primitive(TsPrimitive::String)
    }

    /// `number`
    pub const fn number() -> Self {
        TsType::Primitive(TsPrimitive::Number)
    }

    /// `boolean`
    pub const fn boolean() -> Self {
        TsType::Primitive(TsPrimitive::Boolean)
    }

    /// `unknown`
    pub const fn unknown() -> Self {
        TsType::Primitive(TsPrimitive::Unknown)
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `void`
    Void,
    /// `unknown`
    Unknown,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsProp {
    /// Property name as it appears on the wire
    pub name: String,
    /// Property type
    pub ty: TsType,
    /// Whether the property may be omitted
    #[serde(default)]
    pub optional: bool,
}

impl TsProp {
    /// A required property.
    pub fn required(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// An optional property.
    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TsLiteral {
    /// `"foo"`
    String(String),
    /// `3.5`
    Number(f64),
    /// `42`
    Int(i64),
    /// `true`
    Bool(bool),
    /// `null`
    Null,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        /// Interface members
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type
        ty: TsType,
    },
    /// const Foo = { ... } as const; type Foo = ...
    ConstEnum {
        /// (key, value) pairs in declaration order
        values: Vec<(String, TsLiteral)>,
    },
}

/// A named type declaration shared by every route that references it.
///
/// Self-referential shapes (a comment with nested replies) are expressed here
/// and referenced by name, never inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsTypeDef {
    /// Declared name
    pub name: String,
    /// Declaration body
    #[serde(flatten)]
    pub kind: TypeDefKind,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_to_ts_type() {
        assert_eq!(TypeRef::named("User").to_ts_type(), TsType::Ref("User".into()));
        assert_eq!(TypeRef::inline(TsType::string()).to_ts_type(), TsType::string());
    }

    #[test]
    fn test_recursive_type_def_from_json() {
        let json = r#"{
            "name": "Comment",
            "kind": "interface",
            "properties": [
                { "name": "body", "ty": { "kind": "primitive", "value": "string" } },
                { "name": "replies", "ty": { "kind": "array", "value": { "kind": "ref", "value": "Comment" } }, "optional": true }
            ]
        }"#;
        let def: TsTypeDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.name, "Comment");
        let TypeDefKind::Interface { properties } = def.kind else {
            panic!("expected interface");
        };
        assert_eq!(properties.len(), 2);
        assert!(properties[1].optional);
        assert_eq!(
            properties[1].ty,
            TsType::Array(Box::new(TsType::Ref("Comment".into())))
        );
    }

    #[test]
    fn test_type_ref_json_shape() {
        let named: TypeRef = serde_json::from_str(r#"{ "named": "User" }"#).unwrap();
        assert_eq!(named, TypeRef::named("User"));

        let inline: TypeRef =
            serde_json::from_str(r#"{ "inline": { "kind": "literal", "value": { "kind": "int", "value": 3 } } }"#)
                .unwrap();
        assert_eq!(inline.to_ts_type(), TsType::Literal(TsLiteral::Int(3)));
    }
}
