//! The three intercepting hooks.
//!
//! Each phase takes the host's default capability and falls back to it for
//! anything unsubstituted, so an unmarked, unregistered specifier behaves
//! exactly as if the hooks were not installed.
//!
//! Hooks hold no cross-call state beyond the registry content, so imports
//! re-entering the pipeline while an outer import is mid-flight see every
//! registration made so far.

use crate::loader::host::{ModuleHost, ResolveContext, FILE_SCHEME};
use crate::loader::registry::FakeRegistry;
use crate::loader::specifier::{FakeSpecifier, RELOAD_DIRECTIVE};
use crate::loader::synth::synthesize;
use crate::runner::ds::error::LoaderError;
use crate::runner::eval::module::ModuleFormat;

pub struct FakeHooks {
    registry: FakeRegistry,
}

impl FakeHooks {
    /// The registry is injected, not global: embedders construct, seed and
    /// inspect it from outside.
    pub fn new(registry: FakeRegistry) -> Self {
        FakeHooks { registry }
    }

    pub fn registry(&self) -> &FakeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FakeRegistry {
        &mut self.registry
    }

    /// Resolve phase.
    ///
    /// The marker is split off and the target is resolved through the
    /// host. An unresolvable target becomes a virtual file-style identity
    /// when it is marked or already registered; unmarked unknown targets
    /// get one retry against the host root before the original failure is
    /// surfaced. Marked specifiers then apply their directive (`unload`,
    /// `reload`) or register freshly synthesized source; unmarked ones get
    /// the sticky substitution, if any.
    pub fn resolve<H: ModuleHost>(
        &mut self,
        specifier: &str,
        context: &ResolveContext,
        host: &H,
    ) -> Result<String, LoaderError> {
        let fake = FakeSpecifier::parse(specifier);

        let canonical = match host.resolve(&fake.target, context) {
            Ok(identity) => identity,
            Err(cause) => {
                let virtual_identity = format!("{}{}", FILE_SCHEME, fake.target_path());
                if !fake.marked && !self.registry.contains(&virtual_identity) {
                    match host.resolve(&format!("./{}", fake.target), &ResolveContext::root()) {
                        Ok(identity) => identity,
                        Err(_) => {
                            return Err(LoaderError::Resolution {
                                specifier: specifier.to_string(),
                                cause: cause.to_string(),
                            });
                        }
                    }
                } else {
                    virtual_identity
                }
            }
        };

        if !fake.marked {
            // Sticky substitution: a registered canonical identity keeps
            // resolving to its current signed identity.
            return Ok(match self.registry.get(&canonical) {
                Some(entry) => entry.signed_identity.clone(),
                None => canonical,
            });
        }

        if fake.is_unload() {
            self.registry.unload(&canonical);
            return Ok(canonical);
        }

        if fake.is_reload() {
            // Re-register the module's own source under a fresh identity,
            // forcing one re-instantiation.
            let source = host.source(&canonical).map_err(|e| LoaderError::Synthesis {
                fake: RELOAD_DIRECTIVE.to_string(),
                cause: e.to_string(),
            })?;
            return Ok(self.registry.register(canonical, source));
        }

        let source = synthesize(&fake.argument, context, host)?;
        Ok(self.registry.register(canonical, source))
    }

    /// Format phase: a registered module is always source-text, whatever
    /// the host would say (a faked builtin loads as a module).
    pub fn format<H: ModuleHost>(
        &self,
        identity: &str,
        host: &H,
    ) -> Result<ModuleFormat, LoaderError> {
        let canonical = FakeRegistry::strip_signature(identity);
        if self.registry.contains(canonical) {
            return Ok(ModuleFormat::Module);
        }
        host.format(identity).map_err(|e| LoaderError::Resolution {
            specifier: identity.to_string(),
            cause: e.to_string(),
        })
    }

    /// Source phase: registered identities are served their stored
    /// replacement source; everything else delegates.
    pub fn source<H: ModuleHost>(&self, identity: &str, host: &H) -> Result<String, LoaderError> {
        let canonical = FakeRegistry::strip_signature(identity);
        if let Some(entry) = self.registry.get(canonical) {
            return Ok(entry.source.clone());
        }
        host.source(identity).map_err(|e| LoaderError::Resolution {
            specifier: identity.to_string(),
            cause: e.to_string(),
        })
    }
}
