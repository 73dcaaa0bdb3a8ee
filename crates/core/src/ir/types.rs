//! TypeScript AST for generated bindings.
//!
//! Type-level nodes (TsType, TsProp, TsLiteral) live in `routegen_common`
//! because the route model carries them. This module adds what only the
//! emitters need:
//! - TsExpr: identifiers, calls, arrows, objects with spreads, etc.
//! - TsStmt: `const` declarations and returns
//! - TsFunction / TsImport: top-level items

use routegen_common::{TsLiteral, TsType};

/// TypeScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: "bar", 42
    Literal(TsLiteral),
    /// Function call: foo(a, b)
    Call {
        /// Callee expression
        callee: Box<TsExpr>,
        /// Arguments in order
        args: Vec<TsExpr>,
    },
    /// Arrow function with an expression body: (x) => x.foo
    Arrow {
        /// Parameters
        params: Vec<TsParam>,
        /// Body expression
        body: Box<TsExpr>,
    },
    /// Object literal: { ...a, b: 1 }
    Object(Vec<ObjectEntry>),
    /// Member access: foo.bar, or foo["bar-baz"] when bar-baz is not an identifier
    Member {
        /// Object expression
        object: Box<TsExpr>,
        /// Property name
        prop: String,
    },
    /// Spread: ...options
    Spread(Box<TsExpr>),
    /// Binary operation: a ?? b
    BinOp {
        /// Left operand
        left: Box<TsExpr>,
        /// Operator
        op: BinOp,
        /// Right operand
        right: Box<TsExpr>,
    },
    /// Ternary/conditional: cond ? a : b
    Ternary {
        /// Condition
        cond: Box<TsExpr>,
        /// Value when truthy
        then_expr: Box<TsExpr>,
        /// Value when falsy
        else_expr: Box<TsExpr>,
    },
    /// Array literal: [a, b, c]
    Array(Vec<TsExpr>),
    /// Type cast: expr as Type
    Cast {
        /// Expression being cast
        expr: Box<TsExpr>,
        /// Target type (`const` for const assertions)
        ty: TsType,
    },
    /// Parenthesized expression: (a ? b : c)
    Paren(Box<TsExpr>),
}

impl TsExpr {
    /// `name`
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    /// `"value"`
    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    /// `self.prop`
    pub fn member(self, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(self),
            prop: prop.into(),
        }
    }

    /// `self(args...)`
    pub fn call(self, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(self),
            args,
        }
    }

    /// `...self`
    pub fn spread(self) -> Self {
        TsExpr::Spread(Box::new(self))
    }

    /// `self as const`
    pub fn as_const(self) -> Self {
        TsExpr::Cast {
            expr: Box::new(self),
            ty: TsType::Ref("const".into()),
        }
    }
}

/// One entry of an object literal
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEntry {
    /// key: value
    Prop(String, TsExpr),
    /// ...expr
    Spread(TsExpr),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `??`
    Nullish,
    /// `+`
    Plus,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Parameter name (or destructuring pattern)
    pub name: String,
    /// Type annotation
    pub ty: TsType,
    /// Whether the parameter is optional
    pub optional: bool,
}

impl TsParam {
    /// `name: ty`
    pub fn typed(name: impl Into<String>, ty: TsType, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            optional,
        }
    }
}

/// Statement in a function body
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// `const <pattern> = <init>;`
    Const {
        /// Binding name or destructuring pattern
        pattern: String,
        /// Initializer
        init: TsExpr,
    },
    /// Return statement
    Return(Option<TsExpr>),
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsFunction {
    /// Function name
    pub name: String,
    /// JSDoc lines, emitted as a `/** ... */` block when non-empty
    pub doc: Vec<String>,
    /// Parameters
    pub params: Vec<TsParam>,
    /// Return type annotation
    pub return_type: Option<TsType>,
    /// Body statements
    pub body: Vec<TsStmt>,
    /// `async` modifier
    pub is_async: bool,
    /// `export` modifier
    pub is_export: bool,
    /// `const name = (...) => {}` instead of `function name(...) {}`
    pub is_arrow: bool,
}

impl TsFunction {
    /// An exported `function` declaration.
    pub fn exported(name: impl Into<String>, params: Vec<TsParam>, body: Vec<TsStmt>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            params,
            return_type: None,
            body,
            is_async: false,
            is_export: true,
            is_arrow: false,
        }
    }

    /// Attach JSDoc lines.
    pub fn with_doc(mut self, doc: Vec<String>) -> Self {
        self.doc = doc;
        self
    }
}

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Default import binding (`import useSWR from "swr"`)
    pub default: Option<String>,
    /// Named items to import
    pub items: Vec<String>,
    /// Module path
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}
