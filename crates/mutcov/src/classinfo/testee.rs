//! Test → testee mapping by naming convention

use super::{ClassName, ClassRepository, TEST_AFFIX};

/// Infers the class a test targets from the test's name
///
/// `com.example.FooTest` and `com.example.TestFoo` both point at
/// `com.example.Foo`. The suffix rule wins when both could apply, and only
/// the chosen candidate is looked up.
#[derive(Debug)]
pub struct TestToClassMapper<R> {
    repository: R,
}

impl<R: ClassRepository> TestToClassMapper<R> {
    /// Create a mapper over a repository
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Candidate testee name, before checking that it exists
    #[must_use]
    pub fn candidate(test_name: &ClassName) -> Option<ClassName> {
        let candidate = if let Some(stripped) = test_name.as_java_name().strip_suffix(TEST_AFFIX) {
            ClassName::new(stripped)
        } else {
            let simple = test_name.name_without_package();
            let stripped = simple.as_java_name().strip_prefix(TEST_AFFIX)?;
            test_name.package().append(stripped)
        };

        if candidate.name_without_package().is_empty() {
            return None;
        }
        Some(candidate)
    }

    /// Existing class targeted by `test_name`, if any
    #[must_use]
    pub fn find_testee(&self, test_name: &str) -> Option<ClassName> {
        let candidate = Self::candidate(&ClassName::new(test_name))?;
        if self.repository.has_class(&candidate) {
            tracing::trace!(test = test_name, testee = %candidate, "mapped test to testee");
            Some(candidate)
        } else {
            tracing::trace!(test = test_name, candidate = %candidate, "no testee found");
            None
        }
    }
}
