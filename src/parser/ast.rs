//! AST types for the module language.
//!
//! The shape follows ESTree naming where the language overlaps with it:
//! a program is a list of statements, statements are import/export
//! declarations, and expressions cover literals, identifier references,
//! calls and arrow functions.

use std::rc::Rc;

/// Source span of a node, as byte offsets into the parsed text.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub start_index: usize,
    pub end_index: usize,
}

/// A parsed module: the ordered statement list.
#[derive(Debug, PartialEq)]
pub struct ProgramData {
    pub meta: Meta,
    pub body: Vec<StatementType>,
}

#[derive(Debug, PartialEq)]
pub struct IdentifierData {
    pub name: String,
    pub meta: Meta,
}

/// One entry of a named-import list: `{ imported as local }`.
/// When no `as` rename is present both sides carry the same name.
#[derive(Debug, PartialEq)]
pub struct ImportSpecifierData {
    pub imported: IdentifierData,
    pub local: IdentifierData,
    pub meta: Meta,
}

#[derive(Debug, PartialEq)]
pub enum StatementType {
    /// `import d, { a as b } from "specifier"` in any of its clause forms,
    /// including the bare side-effect form `import "specifier"`.
    ImportDeclaration {
        meta: Meta,
        specifier: String,
        default_binding: Option<IdentifierData>,
        named: Vec<ImportSpecifierData>,
    },
    ExportDefaultDeclaration {
        meta: Meta,
        expression: ExpressionType,
    },
    ExportConstDeclaration {
        meta: Meta,
        name: IdentifierData,
        expression: ExpressionType,
    },
}

#[derive(Debug, PartialEq)]
pub enum ExpressionType {
    Literal(LiteralData),
    Identifier(IdentifierData),
    CallExpression {
        meta: Meta,
        callee: Box<ExpressionType>,
        arguments: Vec<ExpressionType>,
    },
    /// Arrow definitions are reference counted so closures can retain them
    /// after the enclosing program is dropped.
    ArrowFunction(Rc<ArrowData>),
}

#[derive(Debug, PartialEq)]
pub struct ArrowData {
    pub params: Vec<IdentifierData>,
    pub body: ExpressionType,
    pub meta: Meta,
}

#[derive(Debug, PartialEq)]
pub struct LiteralData {
    pub value: LiteralType,
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    NumberLiteral(NumberLiteralType),
    StringLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    UndefinedLiteral,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberLiteralType {
    IntegerLiteral(i64),
    FloatLiteral(f64),
}
