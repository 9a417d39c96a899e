//! Runtime line coverage for mutation testing
//!
//! Instrumented code units register once, then report probe firings while
//! tests run. The analysis layer reads the accumulated hits after a run and
//! resets them before the next mutant.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  MUTCOV COVERAGE STORE                                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  register_class ──► CodeUnitRegistry ──► InvokeReceiver           │
//! │  register_class_probes ──► probe tables (swapped snapshot)        │
//! │  visit_line(unit, probe) ──► line lookup ──► HitSet (sharded)     │
//! │  get_hits ──► Hits (owned snapshot)                               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`CoverageStore`] is an ordinary value; [`global`] wraps one of them in
//! the process-wide slot that generated probe code calls into.

pub mod global;
mod hits;
mod ids;
mod receiver;
mod registry;
mod store;

pub use hits::{HitSet, Hits};
pub use ids::{decode_code_unit_id, decode_value, encode, CodeUnitId, CompositeKey};
pub use receiver::{InvokeReceiver, NullReceiver, RecordingReceiver};
pub use registry::{CodeUnitRegistry, ProbeTable};
pub use store::{CoverageStore, StoreConfig, StoreConfigBuilder, UnknownProbePolicy};
