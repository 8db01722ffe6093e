//! `mock` builtin module: the stand-in factory.
//!
//! Synthesized fakes import this factory through the prelude the loader
//! prepends to every replacement source. It is also importable directly by
//! any module that wants a stand-in of its own.

use std::collections::HashMap;

use crate::runner::ds::mock::MockHandle;
use crate::runner::ds::value::{FunctionValue, MjsValue, ValueResult};

pub fn exports() -> HashMap<String, MjsValue> {
    let factory = MjsValue::Function(FunctionValue::Native(make_mock));
    let mut exports = HashMap::new();
    exports.insert("mock".to_string(), factory.clone());
    exports.insert("default".to_string(), factory);
    exports
}

/// `mock()` constructs an echoing stand-in, `mock(delegate)` one backed by
/// the delegate. An explicit `undefined` argument counts as no delegate.
fn make_mock(args: Vec<MjsValue>) -> ValueResult {
    let delegate = match args.into_iter().next() {
        None | Some(MjsValue::Undefined) => None,
        Some(value) => Some(value),
    };
    Ok(MjsValue::Function(FunctionValue::Mock(MockHandle::new(
        delegate,
    ))))
}
