//! Module instantiation.
//!
//! A module instance is produced by walking the statement list in source
//! order: imports are satisfied through a linker callback supplied by the
//! caller (the loader re-enters its own import pipeline there), exports are
//! evaluated against the module scope.

use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use crate::parser::ast::{ProgramData, StatementType};
use crate::runner::ds::error::LoaderError;
use crate::runner::ds::scope::ScopeData;
use crate::runner::ds::value::MjsValue;
use crate::runner::eval::expression::evaluate_expression;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModuleFormat {
    /// Source-text module in the loader's module language.
    Module,
    /// Natively implemented builtin module.
    Builtin,
}

/// A fully instantiated module: its exports, keyed by export name, with
/// the default export under the conventional name `"default"`.
#[derive(Debug)]
pub struct ModuleInstance {
    /// Fresh per instantiation. Two loads of the same identity yield
    /// distinct instance ids.
    pub id: String,
    pub identity: String,
    pub format: ModuleFormat,
    pub exports: HashMap<String, MjsValue>,
}

impl ModuleInstance {
    pub fn new_builtin(
        identity: impl Into<String>,
        exports: HashMap<String, MjsValue>,
    ) -> Self {
        ModuleInstance {
            id: Uuid::new_v4().to_hyphenated().to_string(),
            identity: identity.into(),
            format: ModuleFormat::Builtin,
            exports,
        }
    }

    pub fn default_export(&self) -> Option<MjsValue> {
        self.export("default")
    }

    pub fn export(&self, name: &str) -> Option<MjsValue> {
        self.exports.get(name).cloned()
    }
}

/// Instantiate a parsed module under the given identity.
///
/// The linker receives `(specifier, parent_identity)` for every import
/// statement and must return the imported instance. Imports are resolved
/// in source order, so a registration made while linking one import is
/// visible to the next.
pub fn instantiate_module<L>(
    program: &ProgramData,
    identity: &str,
    linker: &mut L,
) -> Result<ModuleInstance, LoaderError>
where
    L: FnMut(&str, &str) -> Result<Rc<ModuleInstance>, LoaderError>,
{
    let scope = ScopeData::new_root();
    let mut exports = HashMap::new();

    for statement in &program.body {
        match statement {
            StatementType::ImportDeclaration {
                specifier,
                default_binding,
                named,
                ..
            } => {
                let imported = linker(specifier, identity)?;
                if let Some(binding) = default_binding {
                    let value = require_export(&imported, "default", specifier)?;
                    scope.borrow_mut().declare(binding.name.clone(), value);
                }
                for import in named {
                    let value = require_export(&imported, &import.imported.name, specifier)?;
                    scope.borrow_mut().declare(import.local.name.clone(), value);
                }
            }

            StatementType::ExportDefaultDeclaration { expression, .. } => {
                let value = evaluate_expression(expression, &scope)?;
                exports.insert("default".to_string(), value);
            }

            StatementType::ExportConstDeclaration {
                name, expression, ..
            } => {
                let value = evaluate_expression(expression, &scope)?;
                // Later statements in the same module can refer to the
                // exported binding.
                scope.borrow_mut().declare(name.name.clone(), value.clone());
                exports.insert(name.name.clone(), value);
            }
        }
    }

    Ok(ModuleInstance {
        id: Uuid::new_v4().to_hyphenated().to_string(),
        identity: identity.to_string(),
        format: ModuleFormat::Module,
        exports,
    })
}

fn require_export(
    instance: &ModuleInstance,
    name: &str,
    specifier: &str,
) -> Result<MjsValue, LoaderError> {
    instance.export(name).ok_or_else(|| {
        LoaderError::Reference(format!("{} is not exported by {}", name, specifier))
    })
}
