//! Language identifiers.

use smol_str::SmolStr;

/// Symbolic identifier for a source language.
///
/// Compared by value, never by identity, so hosts can pass freshly
/// constructed identifiers and still hit the registry. The identifier is
/// the only symbolic value that crosses the host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(SmolStr);

impl Language {
    /// JSON, served by the bundled grammar.
    pub const JSON: Language = Language(SmolStr::new_static("json"));

    /// Python. A known identifier with no bundled capability; resolving it
    /// fails with `UnknownLanguage` unless the host registers one.
    pub const PYTHON: Language = Language(SmolStr::new_static("python"));

    /// A host-defined language identifier.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for Language {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
