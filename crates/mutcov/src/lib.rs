//! Mutcov: Runtime Coverage Core for Mutation Testing
//!
//! Instrumented code units report which of their probes fired while a test
//! runs. Mutcov assigns stable ids to code units, records hits from any
//! number of threads, and hands the accumulated hit set to the analysis
//! layer, which uses it to tell whether a surviving mutant was ever executed.
//! A classification layer separates code under test from test code and maps
//! tests to the class they exercise.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    MUTCOV Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐        │
//! │   │ Instrumented │   │ Coverage     │   │ Analysis     │        │
//! │   │ code units   │──►│ Store        │──►│ layer        │        │
//! │   │ (probes)     │   │ (hit set)    │   │ (get_hits)   │        │
//! │   └──────────────┘   └──────────────┘   └──────────────┘        │
//! │   ┌──────────────┐   ┌──────────────┐                           │
//! │   │ Class paths  │──►│ CodeSource   │──► code / tests / testee  │
//! │   └──────────────┘   └──────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate performs no I/O and installs no tracing subscriber.

#![warn(missing_docs)]

/// Coverage store: ids, probe tables, concurrent hit recording
pub mod coverage;

/// Code / test classification and testee mapping
pub mod classinfo;

mod result;

pub use classinfo::{
    ClassInfo, ClassName, ClassPaths, ClassRepository, CodeSource, InMemoryRepository,
    NamingConventionIdentifier, TestClassIdentifier, TestToClassMapper,
};
pub use coverage::{
    decode_code_unit_id, decode_value, encode, CodeUnitId, CompositeKey, CoverageStore, HitSet,
    Hits, InvokeReceiver, NullReceiver, RecordingReceiver, StoreConfig, StoreConfigBuilder,
    UnknownProbePolicy,
};
pub use result::{MutcovError, MutcovResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::classinfo::*;
    pub use super::coverage::*;
    pub use super::result::*;
}
