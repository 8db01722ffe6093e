use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::value::MjsValue;

pub type Scope = Rc<RefCell<ScopeData>>;

/// One lexical scope. Module bodies get a root scope, arrow calls get a
/// child scope chained to the scope the arrow captured.
pub struct ScopeData {
    bindings: HashMap<String, MjsValue>,
    parent: Option<Scope>,
}

impl ScopeData {
    pub fn new_root() -> Scope {
        Rc::new(RefCell::new(ScopeData {
            bindings: HashMap::new(),
            parent: None,
        }))
    }

    pub fn new_child(parent: &Scope) -> Scope {
        Rc::new(RefCell::new(ScopeData {
            bindings: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    pub fn declare(&mut self, name: impl Into<String>, value: MjsValue) {
        self.bindings.insert(name.into(), value);
    }

    /// Walks the scope chain outward. `None` is an unresolved reference.
    pub fn lookup(&self, name: &str) -> Option<MjsValue> {
        match self.bindings.get(name) {
            Some(v) => Some(v.clone()),
            None => match &self.parent {
                Some(parent) => parent.borrow().lookup(name),
                None => None,
            },
        }
    }
}
