//! Code / test partitioning

use super::{ClassInfo, ClassName, ClassRepository, TestClassIdentifier, TestToClassMapper};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Class names found on the code path and on the test path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassPaths {
    /// Names on the code path
    pub code: Vec<ClassName>,
    /// Names on the test path
    pub test: Vec<ClassName>,
}

impl ClassPaths {
    /// Create from the two name groups
    #[must_use]
    pub fn new(
        code: impl IntoIterator<Item = impl Into<ClassName>>,
        test: impl IntoIterator<Item = impl Into<ClassName>>,
    ) -> Self {
        Self {
            code: code.into_iter().map(Into::into).collect(),
            test: test.into_iter().map(Into::into).collect(),
        }
    }

    /// Names on the code path
    #[must_use]
    pub fn code(&self) -> &[ClassName] {
        &self.code
    }

    /// Names on the test path
    #[must_use]
    pub fn test(&self) -> &[ClassName] {
        &self.test
    }
}

/// Splits discovered classes into code under test and test code
#[derive(Debug)]
pub struct CodeSource<R, T> {
    paths: ClassPaths,
    repository: R,
    identifier: T,
}

impl<R, T> CodeSource<R, T>
where
    R: ClassRepository,
    T: TestClassIdentifier,
{
    /// Create a code source
    #[must_use]
    pub fn new(paths: ClassPaths, repository: R, identifier: T) -> Self {
        Self {
            paths,
            repository,
            identifier,
        }
    }

    /// Resolved classes on the code path that are not tests
    #[must_use]
    pub fn get_code(&self) -> Vec<ClassInfo> {
        self.resolve(self.paths.code())
            .filter(|class| !self.identifier.is_test_class(class))
            .collect()
    }

    /// Resolved classes on the test path that are tests
    #[must_use]
    pub fn get_tests(&self) -> Vec<ClassInfo> {
        self.resolve(self.paths.test())
            .filter(|class| self.identifier.is_test_class(class))
            .collect()
    }

    /// Names of the classes returned by [`get_code`](Self::get_code)
    #[must_use]
    pub fn get_code_under_test_names(&self) -> BTreeSet<ClassName> {
        self.get_code()
            .into_iter()
            .map(|class| class.name().clone())
            .collect()
    }

    /// Class targeted by a test, inferred from the test's name
    #[must_use]
    pub fn find_testee(&self, test_name: &str) -> Option<ClassName> {
        TestToClassMapper::new(&self.repository).find_testee(test_name)
    }

    /// Resolve names, silently dropping the ones that do not exist
    #[must_use]
    pub fn get_class_info(&self, names: &[ClassName]) -> Vec<ClassInfo> {
        self.resolve(names).collect()
    }

    /// Resolve one name
    #[must_use]
    pub fn fetch_class(&self, name: &ClassName) -> Option<ClassInfo> {
        self.repository.fetch_class(name)
    }

    /// Get the class paths
    #[must_use]
    pub fn paths(&self) -> &ClassPaths {
        &self.paths
    }

    fn resolve<'a>(&'a self, names: &'a [ClassName]) -> impl Iterator<Item = ClassInfo> + 'a {
        names.iter().filter_map(move |name| {
            let class = self.repository.fetch_class(name);
            if class.is_none() {
                tracing::trace!(class = %name, "class not found; skipping");
            }
            class
        })
    }
}
