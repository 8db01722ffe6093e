//! Dynamic module substitution layer.
//!
//! Any import can be swapped for synthetic source at load time by marking
//! its specifier with `?__fake`. The layer sits between the caller and the
//! host's default resolution as three intercepting hooks (resolve, format,
//! source); substitutions are kept in a registry keyed by canonical module
//! identity and handed out under versioned identities so the host's module
//! cache never serves a stale fake.

pub mod api;
pub mod config;
pub mod hooks;
pub mod host;
pub mod registry;
pub mod specifier;
pub mod synth;


pub use api::Loader;
pub use config::{FakeConfig, FakeDirective};
pub use hooks::FakeHooks;
pub use host::{DefaultHost, HostError, MemoryHost, ModuleHost, ResolveContext};
pub use registry::{FakeEntry, FakeRegistry};
pub use specifier::FakeSpecifier;
pub use synth::{synthesize, DEFAULT_FAKE, MOCK_PRELUDE};
