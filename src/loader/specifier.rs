//! Fake-marker specifier parsing.
//!
//! A specifier selects a substitution by carrying the `__fake` marker in
//! its query: either `?__fake` at the first `?`, or `&__fake` anywhere in
//! the query-free prefix. Everything after the first `=` following the
//! marker is the argument, taken verbatim to the end of the string.

const QUERY_MARKER: &str = "?__fake";
const AMP_MARKER: &str = "&__fake";

/// Directive argument that removes the target's registration.
pub const UNLOAD_DIRECTIVE: &str = "unload";
/// Directive argument that re-registers the target with its own source.
pub const RELOAD_DIRECTIVE: &str = "reload";

/// A parsed import specifier.
///
/// `target` is what the host should resolve; `argument` is the fake's
/// replacement-source argument and is empty for a bare marker. Unmarked
/// specifiers keep the full original text as `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeSpecifier {
    pub target: String,
    pub marked: bool,
    pub argument: String,
}

impl FakeSpecifier {
    /// Splits a specifier into target, marker and argument.
    ///
    /// The target is the longest prefix that can precede a marker, so with
    /// several `&__fake` occurrences the last one wins, and a `?__fake` at
    /// the first `?` beats any `&__fake` before it. Text between the marker
    /// and a missing `=` is dropped, matching first-match semantics.
    pub fn parse(specifier: &str) -> FakeSpecifier {
        let prefix_end = specifier.find('?').unwrap_or(specifier.len());
        let prefix = &specifier[..prefix_end];

        // Marker at the first '?'.
        if !prefix.is_empty() && specifier[prefix_end..].starts_with(QUERY_MARKER) {
            let rest = &specifier[prefix_end + QUERY_MARKER.len()..];
            return FakeSpecifier::marked(prefix, rest);
        }

        // Last '&__fake' inside the query-free prefix. The argument still
        // runs to the end of the full specifier.
        if let Some(pos) = prefix.rfind(AMP_MARKER) {
            if pos > 0 {
                let rest = &specifier[pos + AMP_MARKER.len()..];
                return FakeSpecifier::marked(&specifier[..pos], rest);
            }
        }

        FakeSpecifier {
            target: specifier.to_string(),
            marked: false,
            argument: String::new(),
        }
    }

    fn marked(target: &str, rest: &str) -> FakeSpecifier {
        let argument = match rest.strip_prefix('=') {
            Some(arg) => arg.to_string(),
            None => String::new(),
        };
        FakeSpecifier {
            target: target.to_string(),
            marked: true,
            argument,
        }
    }

    /// The target's path part: everything before the first `?`. Only
    /// differs from `target` for unmarked specifiers, which keep their
    /// query text.
    pub fn target_path(&self) -> &str {
        match self.target.find('?') {
            Some(pos) => &self.target[..pos],
            None => self.target.as_str(),
        }
    }

    pub fn is_unload(&self) -> bool {
        self.marked && self.argument == UNLOAD_DIRECTIVE
    }

    pub fn is_reload(&self) -> bool {
        self.marked && self.argument == RELOAD_DIRECTIVE
    }
}
