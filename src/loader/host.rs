//! Host capabilities the substitution layer wraps.
//!
//! The host owns default resolution, format detection and source loading;
//! the hooks intercept each phase and fall back to the host for anything
//! they do not substitute. `DefaultHost` works against the real
//! filesystem, `MemoryHost` against an in-memory file map.

use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::loader::registry::FakeRegistry;
use crate::runner::eval::module::ModuleFormat;
use crate::runner::std_mod::{is_builtin_module, BUILTIN_PREFIX};

/// Scheme prefix of file-backed (and virtual file-style) identities.
pub const FILE_SCHEME: &str = "file://";

const PROBE_EXTENSIONS: [&str; 2] = [".mjs", ".js"];

/// Where an import is being resolved from: `parent` is the identity of the
/// importing module, `None` for top-level imports.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    pub parent: Option<String>,
}

impl ResolveContext {
    pub fn root() -> Self {
        ResolveContext { parent: None }
    }

    pub fn child_of(identity: impl Into<String>) -> Self {
        ResolveContext {
            parent: Some(identity.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    NotFound(String),
    Unsupported(String),
    Io(String),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NotFound(m) => write!(f, "{}", m),
            HostError::Unsupported(m) => write!(f, "{}", m),
            HostError::Io(m) => write!(f, "{}", m),
        }
    }
}

impl Error for HostError {}

/// Default module-loading capabilities of a host environment.
///
/// Identities returned by `resolve` are canonical: `file://{path}` for
/// files, `builtin:{name}` for builtin modules. `format` and `source`
/// accept identities and ignore any query suffix, the way a URL pathname
/// ignores its query.
pub trait ModuleHost {
    /// Resolve a specifier to a canonical module identity.
    fn resolve(&self, specifier: &str, context: &ResolveContext) -> Result<String, HostError>;

    /// Module format of a resolved identity.
    fn format(&self, identity: &str) -> Result<ModuleFormat, HostError>;

    /// Source text of a resolved identity.
    fn source(&self, identity: &str) -> Result<String, HostError>;

    /// Whether `path` (relative paths are against the host root) is a
    /// readable file.
    fn file_exists(&self, path: &str) -> bool;

    /// Read a file by path, outside module resolution.
    fn read_file(&self, path: &str) -> Result<String, HostError>;
}

/// Drops `.` segments and applies `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn identity_path(identity: &str) -> &str {
    match identity.find('?') {
        Some(pos) => &identity[..pos],
        None => identity,
    }
}

/// Filesystem-backed host rooted at a directory.
pub struct DefaultHost {
    root: PathBuf,
}

impl DefaultHost {
    /// Host rooted at the process working directory.
    pub fn new() -> Self {
        DefaultHost {
            root: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        DefaultHost { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn base_dir(&self, context: &ResolveContext) -> PathBuf {
        if let Some(parent) = &context.parent {
            let canonical = FakeRegistry::strip_signature(parent);
            if let Some(path) = canonical.strip_prefix(FILE_SCHEME) {
                if let Some(dir) = Path::new(path).parent() {
                    if !dir.as_os_str().is_empty() {
                        return dir.to_path_buf();
                    }
                }
            }
        }
        self.root.clone()
    }

    /// The exact path, then the path with each probe extension appended.
    fn probe(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }
        for ext in &PROBE_EXTENSIONS {
            let mut appended = candidate.as_os_str().to_os_string();
            appended.push(ext);
            let with_ext = PathBuf::from(appended);
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }
        None
    }

    fn abs_path(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            normalize_lexically(p)
        } else {
            normalize_lexically(&self.root.join(p))
        }
    }
}

impl Default for DefaultHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleHost for DefaultHost {
    fn resolve(&self, specifier: &str, context: &ResolveContext) -> Result<String, HostError> {
        if specifier.starts_with(BUILTIN_PREFIX) || specifier.starts_with(FILE_SCHEME) {
            return Ok(specifier.to_string());
        }
        if is_builtin_module(specifier) {
            return Ok(format!("{}{}", BUILTIN_PREFIX, specifier));
        }

        let candidate = if specifier.starts_with('/') {
            PathBuf::from(specifier)
        } else if specifier.starts_with("./") || specifier.starts_with("../") {
            self.base_dir(context).join(specifier)
        } else {
            return Err(HostError::NotFound(format!(
                "cannot find module '{}'",
                specifier
            )));
        };

        match self.probe(&normalize_lexically(&candidate)) {
            Some(path) => Ok(format!("{}{}", FILE_SCHEME, path.display())),
            None => Err(HostError::NotFound(format!(
                "cannot find module '{}'",
                specifier
            ))),
        }
    }

    fn format(&self, identity: &str) -> Result<ModuleFormat, HostError> {
        let path = identity_path(identity);
        if path.starts_with(BUILTIN_PREFIX) {
            return Ok(ModuleFormat::Builtin);
        }
        if path.ends_with(".mjs") || path.ends_with(".js") {
            return Ok(ModuleFormat::Module);
        }
        Err(HostError::Unsupported(format!(
            "no module format for '{}'",
            identity
        )))
    }

    fn source(&self, identity: &str) -> Result<String, HostError> {
        let path = identity_path(identity);
        match path.strip_prefix(FILE_SCHEME) {
            Some(file) => {
                fs::read_to_string(file).map_err(|e| HostError::Io(format!("{}: {}", file, e)))
            }
            None => Err(HostError::Unsupported(format!(
                "no source text for '{}'",
                identity
            ))),
        }
    }

    fn file_exists(&self, path: &str) -> bool {
        self.abs_path(path).is_file()
    }

    fn read_file(&self, path: &str) -> Result<String, HostError> {
        let abs = self.abs_path(path);
        fs::read_to_string(&abs).map_err(|e| HostError::Io(format!("{}: {}", abs.display(), e)))
    }
}

/// In-memory host for hook-level tests and embedders. File paths are
/// rooted at `/`.
pub struct MemoryHost {
    files: HashMap<String, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost {
            files: HashMap::new(),
        }
    }

    /// Builder form of `add_file`.
    pub fn with_file(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.add_file(path, source);
        self
    }

    pub fn add_file(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.files.insert(Self::rooted_key(&path.into()), source.into());
    }

    fn rooted_key(path: &str) -> String {
        let rooted = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        normalize_lexically(Path::new(&rooted))
            .display()
            .to_string()
    }

    fn base_dir(&self, context: &ResolveContext) -> PathBuf {
        if let Some(parent) = &context.parent {
            let canonical = FakeRegistry::strip_signature(parent);
            if let Some(path) = canonical.strip_prefix(FILE_SCHEME) {
                if let Some(dir) = Path::new(path).parent() {
                    if !dir.as_os_str().is_empty() {
                        return dir.to_path_buf();
                    }
                }
            }
        }
        PathBuf::from("/")
    }

    fn probe(&self, candidate: &Path) -> Option<String> {
        let exact = candidate.display().to_string();
        if self.files.contains_key(&exact) {
            return Some(exact);
        }
        for ext in &PROBE_EXTENSIONS {
            let with_ext = format!("{}{}", exact, ext);
            if self.files.contains_key(&with_ext) {
                return Some(with_ext);
            }
        }
        None
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleHost for MemoryHost {
    fn resolve(&self, specifier: &str, context: &ResolveContext) -> Result<String, HostError> {
        if specifier.starts_with(BUILTIN_PREFIX) || specifier.starts_with(FILE_SCHEME) {
            return Ok(specifier.to_string());
        }
        if is_builtin_module(specifier) {
            return Ok(format!("{}{}", BUILTIN_PREFIX, specifier));
        }

        let candidate = if specifier.starts_with('/') {
            PathBuf::from(specifier)
        } else if specifier.starts_with("./") || specifier.starts_with("../") {
            self.base_dir(context).join(specifier)
        } else {
            return Err(HostError::NotFound(format!(
                "cannot find module '{}'",
                specifier
            )));
        };

        match self.probe(&normalize_lexically(&candidate)) {
            Some(path) => Ok(format!("{}{}", FILE_SCHEME, path)),
            None => Err(HostError::NotFound(format!(
                "cannot find module '{}'",
                specifier
            ))),
        }
    }

    fn format(&self, identity: &str) -> Result<ModuleFormat, HostError> {
        let path = identity_path(identity);
        if path.starts_with(BUILTIN_PREFIX) {
            return Ok(ModuleFormat::Builtin);
        }
        if path.ends_with(".mjs") || path.ends_with(".js") {
            return Ok(ModuleFormat::Module);
        }
        Err(HostError::Unsupported(format!(
            "no module format for '{}'",
            identity
        )))
    }

    fn source(&self, identity: &str) -> Result<String, HostError> {
        let path = identity_path(identity);
        match path.strip_prefix(FILE_SCHEME) {
            Some(file) => match self.files.get(file) {
                Some(source) => Ok(source.clone()),
                None => Err(HostError::Io(format!("{}: no such file", file))),
            },
            None => Err(HostError::Unsupported(format!(
                "no source text for '{}'",
                identity
            ))),
        }
    }

    fn file_exists(&self, path: &str) -> bool {
        self.files.contains_key(&Self::rooted_key(path))
    }

    fn read_file(&self, path: &str) -> Result<String, HostError> {
        match self.files.get(&Self::rooted_key(path)) {
            Some(source) => Ok(source.clone()),
            None => Err(HostError::Io(format!("{}: no such file", path))),
        }
    }
}
