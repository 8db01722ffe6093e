//! Replacement-source synthesis.
//!
//! The fake argument becomes module source by the first matching rule:
//! empty argument -> the default echo mock; an argument naming a readable
//! file -> that file's text; an argument that already is export syntax ->
//! taken verbatim; anything else -> wrapped as a default export. The rule
//! order matters: a file named `export...` would be shadowed by the
//! keyword rule if probed later.

use crate::loader::host::{ModuleHost, ResolveContext, FILE_SCHEME};
use crate::runner::ds::error::LoaderError;

/// Import prepended to every synthesized source so `mock` is in scope.
pub const MOCK_PRELUDE: &str = "import { mock } from \"builtin:mock\";\n";

/// Replacement source of a bare marker.
pub const DEFAULT_FAKE: &str = "export default mock()";

/// Builds the replacement source for a fake's argument.
pub fn synthesize<H: ModuleHost>(
    argument: &str,
    context: &ResolveContext,
    host: &H,
) -> Result<String, LoaderError> {
    if argument.is_empty() {
        return Ok(format!("{}{}", MOCK_PRELUDE, DEFAULT_FAKE));
    }
    if let Some(text) = read_external(argument, context, host)? {
        return Ok(format!("{}{}", MOCK_PRELUDE, text));
    }
    if argument.starts_with("export") {
        return Ok(format!("{}{}", MOCK_PRELUDE, argument));
    }
    Ok(format!("{}export default {}", MOCK_PRELUDE, argument))
}

/// The argument names an external replacement file if the host resolves it
/// to a file identity, or sees it as a plain file path. Absence is not an
/// error and falls through to the expression rules; a failed read of an
/// existing file is reported against the fake.
fn read_external<H: ModuleHost>(
    argument: &str,
    context: &ResolveContext,
    host: &H,
) -> Result<Option<String>, LoaderError> {
    if let Ok(identity) = host.resolve(argument, context) {
        if identity.starts_with(FILE_SCHEME) {
            return match host.source(&identity) {
                Ok(text) => Ok(Some(text)),
                Err(e) => Err(LoaderError::Synthesis {
                    fake: argument.to_string(),
                    cause: e.to_string(),
                }),
            };
        }
    }
    if host.file_exists(argument) {
        return match host.read_file(argument) {
            Ok(text) => Ok(Some(text)),
            Err(e) => Err(LoaderError::Synthesis {
                fake: argument.to_string(),
                cause: e.to_string(),
            }),
        };
    }
    Ok(None)
}
