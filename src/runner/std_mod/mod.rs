//! Builtin modules compiled into the engine.
//!
//! Builtins are instantiated from native export factories instead of source
//! text. The two core builtins are `fs` (filesystem access) and `mock` (the
//! stand-in factory every synthesized fake imports).

use std::collections::{HashMap, HashSet};

use crate::runner::ds::value::MjsValue;
use crate::runner::eval::module::ModuleInstance;

pub mod fs;
pub mod mock_factory;

/// Canonical identities of builtin modules carry this scheme prefix, so
/// `fs` resolves to `builtin:fs`.
pub const BUILTIN_PREFIX: &str = "builtin:";

lazy_static! {
    static ref BUILTIN_MODULE_NAMES: HashSet<&'static str> = {
        let mut names = HashSet::new();
        names.insert("fs");
        names.insert("mock");
        names
    };
}

/// Whether a bare specifier names one of the core builtin modules.
pub fn is_builtin_module(name: &str) -> bool {
    BUILTIN_MODULE_NAMES.contains(name)
}

/// Produces the export map of one builtin module.
pub type ModuleFactory = fn() -> HashMap<String, MjsValue>;

/// Registry of builtin modules.
///
/// Instantiation is per request: every `instantiate` call runs the factory
/// again, so a faked-then-restored builtin starts from clean state.
pub struct BuiltinModules {
    factories: HashMap<String, ModuleFactory>,
}

impl BuiltinModules {
    pub fn new() -> Self {
        BuiltinModules {
            factories: HashMap::new(),
        }
    }

    /// Registry preloaded with the core builtins.
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        registry.register("fs", fs::exports);
        registry.register("mock", mock_factory::exports);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: ModuleFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn instantiate(&self, name: &str) -> Option<ModuleInstance> {
        self.factories.get(name).map(|factory| {
            ModuleInstance::new_builtin(format!("{}{}", BUILTIN_PREFIX, name), factory())
        })
    }
}

impl Default for BuiltinModules {
    fn default() -> Self {
        Self::with_core()
    }
}
