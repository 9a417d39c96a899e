//! Process-wide coverage context
//!
//! Instrumented code calls into coverage through fixed entry points compiled
//! in ahead of time, so there is no handle it could be given. This module
//! holds the one active [`CoverageStore`] in an atomically swappable slot:
//!
//! ```text
//!  init ──► [ active store ] ──► reset_all_static_state ──► (empty)
//!                 │  ▲
//!        visit_line  reset (hits only)
//! ```
//!
//! Lifecycle policy: every operation except [`visit_line`] and [`reset`]
//! fails with [`MutcovError::NotInitialized`] before [`init`]. Probe firings
//! with no active store are dropped, and resetting an empty slot does
//! nothing. A second [`init`] is rejected with
//! [`MutcovError::AlreadyInitialized`] and leaves the active store untouched.

use super::{CodeUnitId, CoverageStore, Hits, InvokeReceiver, StoreConfig};
use crate::result::{MutcovError, MutcovResult};
use arc_swap::ArcSwapOption;
use std::sync::Arc;

static STORE: ArcSwapOption<CoverageStore> = ArcSwapOption::const_empty();

/// Activate coverage recording with the default configuration
pub fn init(receiver: Arc<dyn InvokeReceiver>) -> MutcovResult<()> {
    init_with_config(receiver, StoreConfig::default())
}

/// Activate coverage recording
pub fn init_with_config(
    receiver: Arc<dyn InvokeReceiver>,
    config: StoreConfig,
) -> MutcovResult<()> {
    let store = Arc::new(CoverageStore::with_config(receiver, config));
    let previous = STORE.compare_and_swap(&None::<Arc<CoverageStore>>, Some(store));
    if previous.is_some() {
        tracing::warn!("coverage store already initialized; keeping the active store");
        return Err(MutcovError::AlreadyInitialized);
    }
    tracing::info!("coverage store initialized");
    Ok(())
}

/// Whether a store is active
#[must_use]
pub fn is_initialized() -> bool {
    STORE.load().is_some()
}

/// The active store, for code that prefers holding a handle
pub fn current() -> MutcovResult<Arc<CoverageStore>> {
    STORE.load_full().ok_or(MutcovError::NotInitialized)
}

/// Register a code unit with the active store
pub fn register_class(name: &str) -> MutcovResult<CodeUnitId> {
    current()?.register_class(name)
}

/// Register the probe table of a code unit with the active store
pub fn register_class_probes(id: CodeUnitId, lines: &[i32]) -> MutcovResult<()> {
    current()?.register_class_probes(id, lines)
}

/// Record a probe firing; dropped when no store is active
#[inline]
pub fn visit_line(key: i64) {
    let guard = STORE.load();
    if let Some(store) = &*guard {
        store.visit_line(key);
    }
}

/// Snapshot of the hits recorded by the active store
pub fn get_hits() -> MutcovResult<Hits> {
    Ok(current()?.get_hits())
}

/// Clear recorded hits, keeping registrations
pub fn reset() {
    if let Some(store) = STORE.load_full() {
        store.reset();
    }
}

/// Drop the active store, registry, hits and receiver included
pub fn reset_all_static_state() {
    if STORE.swap(None).is_some() {
        tracing::info!("coverage store torn down");
    }
}
