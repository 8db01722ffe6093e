//! Expression evaluation.
//!
//! Expressions are evaluated against a scope chain. The language is
//! side-effect free apart from mock bookkeeping, so evaluation is a plain
//! recursive walk.

use std::rc::Rc;

use crate::parser::ast::{ArrowData, ExpressionType, LiteralData, LiteralType, NumberLiteralType};
use crate::runner::ds::error::LoaderError;
use crate::runner::ds::mock::MockHandle;
use crate::runner::ds::scope::{Scope, ScopeData};
use crate::runner::ds::value::{FunctionValue, MjsNumber, MjsValue, ValueResult};

/// Evaluate an expression and return its value.
pub fn evaluate_expression(expr: &ExpressionType, scope: &Scope) -> ValueResult {
    match expr {
        ExpressionType::Literal(lit) => evaluate_literal(lit),

        ExpressionType::Identifier(id) => match scope.borrow().lookup(&id.name) {
            Some(value) => Ok(value),
            None => Err(LoaderError::Reference(format!("{} is not defined", id.name))),
        },

        ExpressionType::CallExpression {
            callee, arguments, ..
        } => {
            let callee_value = evaluate_expression(callee, scope)?;
            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(evaluate_expression(argument, scope)?);
            }
            call_value(&callee_value, args)
        }

        ExpressionType::ArrowFunction(def) => Ok(MjsValue::Function(FunctionValue::Arrow {
            def: Rc::clone(def),
            scope: Rc::clone(scope),
        })),
    }
}

fn evaluate_literal(lit: &LiteralData) -> ValueResult {
    Ok(match &lit.value {
        LiteralType::NullLiteral => MjsValue::Null,
        LiteralType::UndefinedLiteral => MjsValue::Undefined,
        LiteralType::BooleanLiteral(b) => MjsValue::Boolean(*b),
        LiteralType::StringLiteral(s) => MjsValue::String(s.clone()),
        LiteralType::NumberLiteral(n) => match n {
            NumberLiteralType::IntegerLiteral(i) => MjsValue::Number(MjsNumber::Integer(*i)),
            NumberLiteralType::FloatLiteral(f) => MjsValue::Number(MjsNumber::Float(*f)),
        },
    })
}

/// Invoke a callable value. Calling anything else is a type error.
pub fn call_value(callee: &MjsValue, args: Vec<MjsValue>) -> ValueResult {
    match callee {
        MjsValue::Function(FunctionValue::Arrow { def, scope }) => call_arrow(def, scope, args),
        MjsValue::Function(FunctionValue::Native(native)) => native(args),
        MjsValue::Function(FunctionValue::Mock(mock)) => call_mock(mock, args),
        other => Err(LoaderError::Type(format!("{} is not a function", other))),
    }
}

fn call_arrow(def: &Rc<ArrowData>, captured: &Scope, args: Vec<MjsValue>) -> ValueResult {
    let scope = ScopeData::new_child(captured);
    {
        // Positional binding: missing arguments become undefined, extras
        // are dropped.
        let mut data = scope.borrow_mut();
        let mut args_iter = args.into_iter();
        for param in &def.params {
            data.declare(
                param.name.clone(),
                args_iter.next().unwrap_or(MjsValue::Undefined),
            );
        }
    }
    evaluate_expression(&def.body, &scope)
}

/// One mock invocation: count it, record the argument tuple, then pick the
/// return value. A forced return installed by `reset` wins over the
/// delegate; a function delegate is forwarded the call; any other delegate
/// value is returned as a constant; with no delegate the mock echoes its
/// input (no args -> undefined, one arg -> that arg, several -> a list).
fn call_mock(mock: &MockHandle, args: Vec<MjsValue>) -> ValueResult {
    mock.record_call(&args);
    if let Some(forced) = mock.forced_return() {
        return Ok(forced);
    }
    match mock.delegate() {
        Some(delegate @ MjsValue::Function(_)) => call_value(&delegate, args),
        Some(constant) => Ok(constant),
        None => Ok(echo(args)),
    }
}

fn echo(mut args: Vec<MjsValue>) -> MjsValue {
    match args.len() {
        0 => MjsValue::Undefined,
        1 => args.remove(0),
        _ => MjsValue::List(args),
    }
}
