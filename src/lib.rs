//! # fakeload - Mock-anything module loader
//!
//! A module loading layer that can swap any import for synthetic source at
//! load time, featuring:
//! - `?__fake` specifier markers that substitute real, virtual and builtin
//!   modules without touching their importers
//! - a versioned fake registry that defeats the identity-keyed module cache
//! - call-recording mock functions with delegates and forced returns
//! - PEG-parsed ES-module subset for replacement source
//! - pluggable module hosts (real filesystem or in-memory)
//!
//! ## Quick Start
//!
//! ### Swapping a module for an inline fake
//!
//! ```
//! use fakeload::loader::{Loader, MemoryHost};
//! use fakeload::runner::ds::value::{MjsNumber, MjsValue};
//!
//! let host = MemoryHost::new().with_file("greeting.mjs", "export default 123");
//! let mut loader = Loader::new(host);
//!
//! // The real module.
//! let real = loader.import("./greeting.mjs").unwrap();
//! assert_eq!(
//!     real.default_export(),
//!     Some(MjsValue::Number(MjsNumber::Integer(123)))
//! );
//!
//! // Swap it for a fake; unmarked imports now see the substitute.
//! loader.import("./greeting.mjs?__fake=456").unwrap();
//! let faked = loader.import("./greeting.mjs").unwrap();
//! assert_eq!(
//!     faked.default_export(),
//!     Some(MjsValue::Number(MjsNumber::Integer(456)))
//! );
//! ```
//!
//! ### Mock functions
//!
//! ```
//! use fakeload::loader::{Loader, MemoryHost};
//! use fakeload::runner::ds::value::{MjsNumber, MjsValue};
//! use fakeload::runner::eval::call_value;
//!
//! let mut loader = Loader::new(MemoryHost::new());
//!
//! // A bare marker fakes the module (here a virtual one, no file behind
//! // it) with a call-recording echo mock.
//! let module = loader.import("/api/send.mjs?__fake").unwrap();
//! let send = module.default_export().unwrap();
//!
//! let echoed = call_value(&send, vec![MjsValue::Number(MjsNumber::Integer(7))]).unwrap();
//! assert_eq!(echoed, MjsValue::Number(MjsNumber::Integer(7)));
//! ```
//!
//! ### Restoring the real module
//!
//! ```
//! use fakeload::loader::{Loader, MemoryHost};
//! use fakeload::runner::ds::value::{MjsNumber, MjsValue};
//!
//! let host = MemoryHost::new().with_file("db.mjs", "export default 1");
//! let mut loader = Loader::new(host);
//!
//! loader.import("./db.mjs?__fake=2").unwrap();
//! assert!(loader.fakes().contains("file:///db.mjs"));
//!
//! // `unload` drops the substitution; the import itself already yields
//! // the real module again.
//! let real = loader.import("./db.mjs?__fake=unload").unwrap();
//! assert!(loader.fakes().is_empty());
//! assert_eq!(
//!     real.default_export(),
//!     Some(MjsValue::Number(MjsNumber::Integer(1)))
//! );
//! ```
//!
//! ## Substitution Model
//!
//! The substitution layer sits between import specifiers and the host's
//! default loading pipeline as three intercepting hooks.
//!
//! 1. **Resolve**: the `?__fake` marker is split off and the remaining
//!    target is resolved through the host as usual. A marked specifier
//!    synthesizes replacement source from its argument (a value, an
//!    expression, `export ...` syntax, or a path to a replacement file)
//!    and registers it against the target's canonical identity.
//!
//! 2. **Versioned identities**: each registration hands back the canonical
//!    identity stamped with a fresh `?__fake{n}` suffix. The module cache
//!    is keyed by identity, so a re-registered fake always loads freshly
//!    instead of being served stale from cache; `n` is strictly increasing
//!    for the lifetime of the registry.
//!
//! 3. **Sticky substitution**: unmarked imports of a registered module
//!    resolve to the current signed identity, so existing importers pick
//!    up the fake without being edited. `?__fake=unload` removes the
//!    registration and `?__fake=reload` re-registers the module's own
//!    source, forcing fresh mock state.
//!
//! Format and source hooks complete the swap: registered identities always
//! load as source-text modules (even faked builtins) and are served their
//! stored replacement source.
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG parser and AST for the module language
//! - **[`loader`]** - specifier parsing, fake registry, hooks, hosts and
//!   the import pipeline
//! - **[`runner`]** - evaluation of loaded modules
//!   - **[`runner::ds`]** - values, scopes, mock state, errors
//!   - **[`runner::eval`]** - expression evaluation and module
//!     instantiation
//!   - **[`runner::std_mod`]** - builtin modules (`builtin:fs`,
//!     `builtin:mock`)

#[macro_use]
extern crate lazy_static;

pub mod loader;
pub mod parser;
pub mod runner;
