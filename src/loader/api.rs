//! The import pipeline.
//!
//! `Loader` drives resolve -> cache -> format -> source -> instantiate for
//! one host, with the fake hooks intercepting every phase. The module
//! cache is keyed by the exact resolved identity string, which is
//! precisely what versioned fake identities are designed to defeat: a
//! fresh registration resolves to an identity the cache has never seen.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::loader::hooks::FakeHooks;
use crate::loader::host::{ModuleHost, ResolveContext};
use crate::loader::registry::FakeRegistry;
use crate::parser::parse_module;
use crate::runner::ds::error::LoaderError;
use crate::runner::eval::module::{instantiate_module, ModuleFormat, ModuleInstance};
use crate::runner::std_mod::{BuiltinModules, BUILTIN_PREFIX};

pub struct Loader<H: ModuleHost> {
    host: H,
    hooks: FakeHooks,
    builtins: BuiltinModules,
    cache: HashMap<String, Rc<ModuleInstance>>,
    loading: HashSet<String>,
}

impl<H: ModuleHost> Loader<H> {
    pub fn new(host: H) -> Self {
        Self::with_registry(host, FakeRegistry::new())
    }

    /// Builds a loader around an injected registry, so embedders can seed
    /// substitutions before the first import and inspect them after.
    pub fn with_registry(host: H, registry: FakeRegistry) -> Self {
        Loader {
            host,
            hooks: FakeHooks::new(registry),
            builtins: BuiltinModules::with_core(),
            cache: HashMap::new(),
            loading: HashSet::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn fakes(&self) -> &FakeRegistry {
        self.hooks.registry()
    }

    pub fn fakes_mut(&mut self) -> &mut FakeRegistry {
        self.hooks.registry_mut()
    }

    pub fn builtins_mut(&mut self) -> &mut BuiltinModules {
        &mut self.builtins
    }

    /// Top-level import.
    pub fn import(&mut self, specifier: &str) -> Result<Rc<ModuleInstance>, LoaderError> {
        self.import_from(specifier, &ResolveContext::root())
    }

    /// Import from a parent module's context. Imports made while a module
    /// instantiates re-enter here recursively; registrations made by an
    /// inner import are immediately visible to the next one.
    pub fn import_from(
        &mut self,
        specifier: &str,
        context: &ResolveContext,
    ) -> Result<Rc<ModuleInstance>, LoaderError> {
        let identity = self.hooks.resolve(specifier, context, &self.host)?;
        if let Some(instance) = self.cache.get(&identity) {
            return Ok(Rc::clone(instance));
        }
        if !self.loading.insert(identity.clone()) {
            return Err(LoaderError::Circular(identity));
        }
        let result = self.load_module(&identity);
        self.loading.remove(&identity);
        let instance = result?;
        self.cache.insert(identity, Rc::clone(&instance));
        Ok(instance)
    }

    fn load_module(&mut self, identity: &str) -> Result<Rc<ModuleInstance>, LoaderError> {
        match self.hooks.format(identity, &self.host)? {
            ModuleFormat::Builtin => {
                let name = identity.strip_prefix(BUILTIN_PREFIX).unwrap_or(identity);
                match self.builtins.instantiate(name) {
                    Some(instance) => Ok(Rc::new(instance)),
                    None => Err(LoaderError::Resolution {
                        specifier: identity.to_string(),
                        cause: format!("unknown builtin module '{}'", name),
                    }),
                }
            }
            ModuleFormat::Module => {
                let source = self.hooks.source(identity, &self.host)?;
                let program =
                    parse_module(&source).map_err(|e| LoaderError::Syntax(e.to_string()))?;
                let instance = instantiate_module(&program, identity, &mut |spec: &str,
                                                                            parent: &str| {
                    self.import_from(spec, &ResolveContext::child_of(parent))
                })?;
                Ok(Rc::new(instance))
            }
        }
    }
}
