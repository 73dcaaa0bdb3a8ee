//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit` for clean, composable code generation.
//! Output is deterministic: no map iteration, no formatting decisions that
//! depend on anything but the node itself.

use routegen_common::{TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind, TypeRef};

use super::types::{BinOp, ObjectEntry, TsExpr, TsFunction, TsImport, TsParam, TsStmt};
use super::utils::{escape_js_string, needs_bracket_notation, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Null => "null".to_string(),
            TsPrimitive::Void => "void".to_string(),
            TsPrimitive::Unknown => "unknown".to_string(),
        }
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap complex types in parentheses
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => join(types, " | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join(props, "; "))
                }
            }
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

impl Emit for TypeRef {
    fn emit(&self) -> String {
        match self {
            TypeRef::Named(n) => n.clone(),
            TypeRef::Inline(t) => t.emit(),
        }
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    output.push_str(&format!("  {};\n", prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {} = {};\n", self.name, ty.emit())
            }
            TypeDefKind::ConstEnum { values } => {
                let mut output = format!("export const {} = {{\n", self.name);
                for (key, value) in values {
                    output.push_str(&format!("  {}: {},\n", quote_if_needed(key), value.emit()));
                }
                output.push_str("} as const;\n\n");
                output.push_str(&format!(
                    "export type {} = (typeof {})[keyof typeof {}];\n",
                    self.name, self.name, self.name
                ));
                output
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::Nullish => "??".to_string(),
            BinOp::Plus => "+".to_string(),
        }
    }
}

impl Emit for ObjectEntry {
    fn emit(&self) -> String {
        match self {
            ObjectEntry::Prop(key, value) => format!("{}: {}", quote_if_needed(key), value.emit()),
            ObjectEntry::Spread(expr) => format!("...{}", expr.emit()),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call { callee, args } => {
                format!("{}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::Arrow { params, body } => {
                let params_str = join(params, ", ");
                // An object body would parse as a block without the parens
                if matches!(**body, TsExpr::Object(_)) {
                    format!("({}) => ({})", params_str, body.emit())
                } else {
                    format!("({}) => {}", params_str, body.emit())
                }
            }
            TsExpr::Object(entries) => {
                if entries.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join(entries, ", "))
                }
            }
            TsExpr::Member { object, prop } => {
                if needs_bracket_notation(prop) {
                    format!("{}[\"{}\"]", object.emit(), escape_js_string(prop))
                } else {
                    format!("{}.{}", object.emit(), prop)
                }
            }
            TsExpr::Spread(expr) => {
                format!("...{}", expr.emit())
            }
            TsExpr::BinOp { left, op, right } => {
                format!("{} {} {}", left.emit(), op.emit(), right.emit())
            }
            TsExpr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                format!("{} ? {} : {}", cond.emit(), then_expr.emit(), else_expr.emit())
            }
            TsExpr::Array(items) => {
                format!("[{}]", join(items, ", "))
            }
            TsExpr::Cast { expr, ty } => {
                format!("{} as {}", expr.emit(), ty.emit())
            }
            TsExpr::Paren(expr) => {
                format!("({})", expr.emit())
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", self.name, opt, self.ty.emit())
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::Const { pattern, init } => {
                format!("{}const {} = {};\n", prefix, pattern, init.emit())
            }
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{}return {};\n", prefix, e.emit()),
                None => format!("{prefix}return;\n"),
            },
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

fn emit_doc(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut output = String::from("/**\n");
    for line in lines {
        if line.is_empty() {
            output.push_str(" *\n");
        } else {
            output.push_str(&format!(" * {line}\n"));
        }
    }
    output.push_str(" */\n");
    output
}

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let mut output = emit_doc(&self.doc);

        // Export keyword
        if self.is_export {
            output.push_str("export ");
        }

        let params_str = join(&self.params, ", ");

        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();

        let async_str = if self.is_async { "async " } else { "" };

        if self.is_arrow {
            // Arrow function: export const name = async (...): Type => { ... }
            output.push_str(&format!(
                "const {} = {}({}){}",
                self.name, async_str, params_str, return_type_str
            ));
            if self.body.is_empty() {
                output.push_str(" => {};\n");
            } else {
                output.push_str(" => {\n");
                for stmt in &self.body {
                    output.push_str(&stmt.emit_indented(1));
                }
                output.push_str("};\n");
            }
        } else {
            // Regular function: export function name(...): Type { ... }
            output.push_str(&format!(
                "{}function {}({}){}",
                async_str, self.name, params_str, return_type_str
            ));
            if self.body.is_empty() {
                output.push_str(" {}\n");
            } else {
                output.push_str(" {\n");
                for stmt in &self.body {
                    output.push_str(&stmt.emit_indented(1));
                }
                output.push_str("}\n");
            }
        }

        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        let named = if self.items.is_empty() {
            None
        } else {
            Some(format!("{{ {} }}", self.items.join(", ")))
        };
        let clause = match (&self.default, named) {
            (Some(default), Some(named)) => format!("{default}, {named}"),
            (Some(default), None) => default.clone(),
            (None, Some(named)) => named,
            (None, None) => return format!("import \"{}\";\n", self.from),
        };
        format!("import {}{} from \"{}\";\n", type_keyword, clause, self.from)
    }
}

// =============================================================================
// Tests
// =============================================================================
