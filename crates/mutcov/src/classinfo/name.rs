//! Class names
//!
//! Names arrive in both internal (`com/example/Foo`) and dotted
//! (`com.example.Foo`) form. Both normalise to the dotted form, so the two
//! spellings of one class compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified name of a code unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Create a class name from either spelling
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().replace('/', "."))
    }

    /// Dotted form, e.g. `com.example.Foo`
    #[must_use]
    pub fn as_java_name(&self) -> &str {
        &self.0
    }

    /// Slash-separated form, e.g. `com/example/Foo`
    #[must_use]
    pub fn as_internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Enclosing package, empty for the default package
    #[must_use]
    pub fn package(&self) -> ClassName {
        match self.0.rsplit_once('.') {
            Some((package, _)) => Self(package.to_string()),
            None => Self(String::new()),
        }
    }

    /// Simple name with the package stripped
    #[must_use]
    pub fn name_without_package(&self) -> ClassName {
        match self.0.rsplit_once('.') {
            Some((_, simple)) => Self(simple.to_string()),
            None => self.clone(),
        }
    }

    /// Treat `self` as a package and append a simple name to it
    #[must_use]
    pub fn append(&self, simple: &str) -> ClassName {
        if self.0.is_empty() {
            Self::new(simple)
        } else {
            Self::new(format!("{}.{}", self.0, simple))
        }
    }

    /// Whether the name is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
