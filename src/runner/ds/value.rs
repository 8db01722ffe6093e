use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::parser::ast::ArrowData;
use crate::runner::ds::error::LoaderError;
use crate::runner::ds::mock::MockHandle;
use crate::runner::ds::scope::Scope;

pub type ValueResult = Result<MjsValue, LoaderError>;

/// Signature shared by every native (Rust-implemented) function that is
/// exposed to module code.
pub type NativeFn = fn(Vec<MjsValue>) -> ValueResult;

pub enum MjsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(MjsNumber),
    String(String),
    List(Vec<MjsValue>),
    Function(FunctionValue),
}
impl Clone for MjsValue {
    fn clone(&self) -> Self {
        match self {
            MjsValue::Undefined => MjsValue::Undefined,
            MjsValue::Null => MjsValue::Null,
            MjsValue::Boolean(d) => MjsValue::Boolean(*d),
            MjsValue::Number(d) => MjsValue::Number(d.clone()),
            MjsValue::String(d) => MjsValue::String(d.to_string()),
            MjsValue::List(d) => MjsValue::List(d.clone()),
            MjsValue::Function(d) => MjsValue::Function(d.clone()),
        }
    }
}
impl Display for MjsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MjsValue::Undefined => write!(f, "undefined"),
            MjsValue::Null => write!(f, "null"),
            MjsValue::Boolean(b) => write!(f, "{}", b),
            MjsValue::Number(n) => write!(f, "{}", n),
            MjsValue::String(s) => write!(f, "\"{}\"", s),
            MjsValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            MjsValue::Function(func) => write!(f, "{}", func),
        }
    }
}

impl fmt::Debug for MjsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MjsValue::Undefined => write!(f, "MjsValue::Undefined"),
            MjsValue::Null => write!(f, "MjsValue::Null"),
            MjsValue::Boolean(b) => write!(f, "MjsValue::Boolean({})", b),
            MjsValue::Number(n) => write!(f, "MjsValue::Number({:?})", n),
            MjsValue::String(s) => write!(f, "MjsValue::String({:?})", s),
            MjsValue::List(items) => write!(f, "MjsValue::List({:?})", items),
            MjsValue::Function(func) => write!(f, "MjsValue::Function({})", func),
        }
    }
}

impl PartialEq for MjsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MjsValue::Undefined, MjsValue::Undefined) => true,
            (MjsValue::Null, MjsValue::Null) => true,
            (MjsValue::Boolean(a), MjsValue::Boolean(b)) => a == b,
            (MjsValue::Number(a), MjsValue::Number(b)) => a == b,
            (MjsValue::String(a), MjsValue::String(b)) => a == b,
            (MjsValue::List(a), MjsValue::List(b)) => a == b,
            (MjsValue::Function(a), MjsValue::Function(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum MjsNumber {
    Integer(i64),
    Float(f64),
}
impl Display for MjsNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MjsNumber::Integer(i) => write!(f, "{}", i),
            MjsNumber::Float(nf) => write!(f, "{}", nf),
        }
    }
}
impl Clone for MjsNumber {
    fn clone(&self) -> Self {
        match self {
            MjsNumber::Integer(i) => MjsNumber::Integer(*i),
            MjsNumber::Float(nf) => MjsNumber::Float(*nf),
        }
    }
}

/// A callable value. Functions compare by identity, never structurally.
#[derive(Clone)]
pub enum FunctionValue {
    /// Arrow function together with the scope it closed over.
    Arrow { def: Rc<ArrowData>, scope: Scope },
    Native(NativeFn),
    Mock(MockHandle),
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                FunctionValue::Arrow { def: a, scope: sa },
                FunctionValue::Arrow { def: b, scope: sb },
            ) => Rc::ptr_eq(a, b) && Rc::ptr_eq(sa, sb),
            (FunctionValue::Native(a), FunctionValue::Native(b)) => a == b,
            (FunctionValue::Mock(a), FunctionValue::Mock(b)) => MockHandle::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for FunctionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Arrow { .. } => write!(f, "[function]"),
            FunctionValue::Native(_) => write!(f, "[native function]"),
            FunctionValue::Mock(_) => write!(f, "[mock function]"),
        }
    }
}

// Scopes can be cyclic through captured closures, so Debug stays shallow.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Arrow { .. } => write!(f, "FunctionValue::Arrow(...)"),
            FunctionValue::Native(_) => write!(f, "FunctionValue::Native(...)"),
            FunctionValue::Mock(_) => write!(f, "FunctionValue::Mock(...)"),
        }
    }
}
