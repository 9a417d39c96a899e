//! Class lookup and test identification collaborators

use super::{ClassInfo, ClassName};
use rustc_hash::FxHashMap;

/// Name → class lookup
pub trait ClassRepository {
    /// Whether a class of this name exists
    fn has_class(&self, name: &ClassName) -> bool;

    /// Resolve a class, `None` when it does not exist
    fn fetch_class(&self, name: &ClassName) -> Option<ClassInfo>;
}

impl<R: ClassRepository + ?Sized> ClassRepository for &R {
    fn has_class(&self, name: &ClassName) -> bool {
        (**self).has_class(name)
    }

    fn fetch_class(&self, name: &ClassName) -> Option<ClassInfo> {
        (**self).fetch_class(name)
    }
}

/// Decides whether a resolved class is test code
pub trait TestClassIdentifier {
    /// Whether `class` is a test
    fn is_test_class(&self, class: &ClassInfo) -> bool;
}

impl<F> TestClassIdentifier for F
where
    F: Fn(&ClassInfo) -> bool,
{
    fn is_test_class(&self, class: &ClassInfo) -> bool {
        self(class)
    }
}

/// Treats a class as a test when its simple name starts or ends with `Test`
///
/// Interfaces and abstract classes are never tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingConventionIdentifier;

impl TestClassIdentifier for NamingConventionIdentifier {
    fn is_test_class(&self, class: &ClassInfo) -> bool {
        if class.is_interface() || class.is_abstract() {
            return false;
        }
        let simple = class.name().name_without_package();
        let simple = simple.as_java_name();
        simple.len() > super::TEST_AFFIX.len()
            && (simple.starts_with(super::TEST_AFFIX) || simple.ends_with(super::TEST_AFFIX))
    }
}

/// Repository backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    classes: FxHashMap<ClassName, ClassInfo>,
}

impl InMemoryRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a class
    pub fn insert(&mut self, class: ClassInfo) -> Option<ClassInfo> {
        self.classes.insert(class.name().clone(), class)
    }

    /// Add a class, builder style
    #[must_use]
    pub fn with_class(mut self, class: ClassInfo) -> Self {
        self.insert(class);
        self
    }

    /// Number of classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the repository is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassRepository for InMemoryRepository {
    fn has_class(&self, name: &ClassName) -> bool {
        self.classes.contains_key(name)
    }

    fn fetch_class(&self, name: &ClassName) -> Option<ClassInfo> {
        self.classes.get(name).cloned()
    }
}

impl FromIterator<ClassInfo> for InMemoryRepository {
    fn from_iter<I: IntoIterator<Item = ClassInfo>>(iter: I) -> Self {
        Self {
            classes: iter
                .into_iter()
                .map(|class| (class.name().clone(), class))
                .collect(),
        }
    }
}
