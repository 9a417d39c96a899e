//! Resolved class details

use super::ClassName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the repository knows about one code unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    name: ClassName,
    superclass: Option<ClassName>,
    is_interface: bool,
    is_abstract: bool,
    code_lines: BTreeSet<i32>,
}

impl ClassInfo {
    /// Create info for a concrete class with no known superclass or lines
    #[must_use]
    pub fn new(name: impl Into<ClassName>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            is_interface: false,
            is_abstract: false,
            code_lines: BTreeSet::new(),
        }
    }

    /// Set the superclass
    #[must_use]
    pub fn with_superclass(mut self, superclass: impl Into<ClassName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Mark as interface
    #[must_use]
    pub fn interface(mut self, is_interface: bool) -> Self {
        self.is_interface = is_interface;
        self
    }

    /// Mark as abstract
    #[must_use]
    pub fn abstract_class(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Record the source lines that carry code
    #[must_use]
    pub fn with_code_lines(mut self, lines: impl IntoIterator<Item = i32>) -> Self {
        self.code_lines.extend(lines);
        self
    }

    /// Get the class name
    #[must_use]
    pub fn name(&self) -> &ClassName {
        &self.name
    }

    /// Get the superclass, if known
    #[must_use]
    pub fn superclass(&self) -> Option<&ClassName> {
        self.superclass.as_ref()
    }

    /// Whether this is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// Whether this is abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Whether `line` carries code
    #[must_use]
    pub fn is_code_line(&self, line: i32) -> bool {
        self.code_lines.contains(&line)
    }

    /// Number of lines that carry code
    #[must_use]
    pub fn code_line_count(&self) -> usize {
        self.code_lines.len()
    }
}
