//! Call-recording mock stand-in.
//!
//! A mock is a callable value that counts invocations, records argument
//! tuples and decides its return value from, in priority order: a forced
//! return installed by `reset`, a delegate given at construction, or the
//! echo fallback.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::value::MjsValue;

/// Recorded state of one mock stand-in.
#[derive(Debug)]
pub struct MockState {
    pub calls: u64,
    pub values: Vec<Vec<MjsValue>>,
    pub returns: Option<MjsValue>,
    pub delegate: Option<MjsValue>,
}

/// Shared handle to a mock stand-in. Cloning yields the same underlying
/// state, so every import site observes the same counters.
#[derive(Clone, Debug)]
pub struct MockHandle(Rc<RefCell<MockState>>);

impl MockHandle {
    /// A fresh stand-in starts zeroed, with no forced return.
    pub fn new(delegate: Option<MjsValue>) -> Self {
        MockHandle(Rc::new(RefCell::new(MockState {
            calls: 0,
            values: vec![],
            returns: None,
            delegate,
        })))
    }

    /// Counts one invocation and records its argument tuple.
    pub fn record_call(&self, args: &[MjsValue]) {
        let mut state = self.0.borrow_mut();
        state.calls += 1;
        state.values.push(args.to_vec());
    }

    /// The forced return, if `reset` installed one. Takes priority over
    /// the delegate.
    pub fn forced_return(&self) -> Option<MjsValue> {
        self.0.borrow().returns.clone()
    }

    pub fn delegate(&self) -> Option<MjsValue> {
        self.0.borrow().delegate.clone()
    }

    pub fn calls(&self) -> u64 {
        self.0.borrow().calls
    }

    /// Argument tuples of every recorded call, oldest first.
    pub fn values(&self) -> Vec<Vec<MjsValue>> {
        self.0.borrow().values.clone()
    }

    /// Zeroes the counters and installs (or, with `None`, clears) the
    /// forced return value.
    pub fn reset(&self, returns: Option<MjsValue>) {
        let mut state = self.0.borrow_mut();
        state.calls = 0;
        state.values.clear();
        state.returns = returns;
    }

    pub fn ptr_eq(a: &MockHandle, b: &MockHandle) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}
