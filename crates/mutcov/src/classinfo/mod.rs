//! Code / test classification
//!
//! Decides which discovered classes are eligible mutation targets and which
//! are tests, and maps a test to the class it exercises by name.
//!
//! ```text
//! ClassPaths.code ──► ClassRepository ──► !is_test_class ──► get_code
//! ClassPaths.test ──► ClassRepository ──►  is_test_class ──► get_tests
//! "com.example.FooTest" ──► TestToClassMapper ──► Some("com.example.Foo")
//! ```

mod code_source;
mod info;
mod name;
mod repository;
mod testee;

pub use code_source::{ClassPaths, CodeSource};
pub use info::ClassInfo;
pub use name::ClassName;
pub use repository::{
    ClassRepository, InMemoryRepository, NamingConventionIdentifier, TestClassIdentifier,
};
pub use testee::TestToClassMapper;

/// Affix that marks a test class name
pub const TEST_AFFIX: &str = "Test";
