//! Coverage Store
//!
//! Owns the code unit registry, the probe tables and the hit set for one
//! session, and forwards registrations to an [`InvokeReceiver`].

use super::{
    decode_code_unit_id, decode_value, CodeUnitId, CodeUnitRegistry, CompositeKey, HitSet, Hits,
    InvokeReceiver, ProbeTable,
};
use crate::result::{MutcovError, MutcovResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What `visit_line` does with a key that has no registered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownProbePolicy {
    /// Drop the firing silently
    #[default]
    Ignore,
    /// Drop the firing and emit a warning event
    Warn,
}

/// Coverage store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// The hit set is split into `2^shard_bits` shards
    pub shard_bits: u32,
    /// Handling of unregistered or out-of-range probe keys
    pub unknown_probe_policy: UnknownProbePolicy,
    /// Capacity hint for the registry
    pub expected_code_units: usize,
}

impl StoreConfig {
    /// Smallest accepted shard exponent
    pub const MIN_SHARD_BITS: u32 = 1;
    /// Largest accepted shard exponent
    pub const MAX_SHARD_BITS: u32 = 12;

    /// Create a builder for store config
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shard_bits: 6,
            unknown_probe_policy: UnknownProbePolicy::Ignore,
            expected_code_units: 256,
        }
    }
}

/// Builder for store configuration
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    shard_bits: Option<u32>,
    unknown_probe_policy: UnknownProbePolicy,
    expected_code_units: Option<usize>,
}

impl StoreConfigBuilder {
    /// Set the shard exponent (clamped on build)
    #[must_use]
    pub fn shard_bits(mut self, bits: u32) -> Self {
        self.shard_bits = Some(bits);
        self
    }

    /// Set the unknown probe policy
    #[must_use]
    pub fn unknown_probe_policy(mut self, policy: UnknownProbePolicy) -> Self {
        self.unknown_probe_policy = policy;
        self
    }

    /// Set the registry capacity hint
    #[must_use]
    pub fn expected_code_units(mut self, count: usize) -> Self {
        self.expected_code_units = Some(count);
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> StoreConfig {
        let defaults = StoreConfig::default();
        StoreConfig {
            shard_bits: self
                .shard_bits
                .unwrap_or(defaults.shard_bits)
                .clamp(StoreConfig::MIN_SHARD_BITS, StoreConfig::MAX_SHARD_BITS),
            unknown_probe_policy: self.unknown_probe_policy,
            expected_code_units: self
                .expected_code_units
                .unwrap_or(defaults.expected_code_units),
        }
    }
}

/// Registry, probe tables and hit set for one coverage session
///
/// All methods take `&self`; the store is meant to be shared behind an `Arc`
/// by every thread running instrumented code.
pub struct CoverageStore {
    config: StoreConfig,
    receiver: Arc<dyn InvokeReceiver>,
    registry: CodeUnitRegistry,
    hits: HitSet,
}

impl std::fmt::Debug for CoverageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageStore")
            .field("config", &self.config)
            .field("code_units", &self.registry.len())
            .field("hits", &self.hits.len())
            .finish()
    }
}

impl CoverageStore {
    /// Create a store with the default configuration
    #[must_use]
    pub fn new(receiver: Arc<dyn InvokeReceiver>) -> Self {
        Self::with_config(receiver, StoreConfig::default())
    }

    /// Create a store with an explicit configuration
    #[must_use]
    pub fn with_config(receiver: Arc<dyn InvokeReceiver>, config: StoreConfig) -> Self {
        Self {
            registry: CodeUnitRegistry::with_capacity(config.expected_code_units),
            hits: HitSet::new(config.shard_bits),
            receiver,
            config,
        }
    }

    /// Assign the next code unit id to `name` and tell the receiver
    pub fn register_class(&self, name: &str) -> MutcovResult<CodeUnitId> {
        let id = self.registry.register(name)?;
        tracing::debug!(code_unit = id.as_i32(), name, "registered code unit");
        self.receiver.register_class(id, name);
        Ok(id)
    }

    /// Store the probe → line table for `id`
    pub fn register_class_probes(&self, id: CodeUnitId, lines: &[i32]) -> MutcovResult<()> {
        self.registry.set_probes(id, lines)?;
        tracing::debug!(
            code_unit = id.as_i32(),
            probes = lines.len(),
            "registered probe table"
        );
        Ok(())
    }

    /// Record the firing of a probe
    ///
    /// `key` packs `(code unit, probe index)`; the hit set receives
    /// `(code unit, line number)`. Keys with no registered line are dropped.
    #[inline]
    pub fn visit_line(&self, key: i64) {
        let id = CodeUnitId::new(decode_code_unit_id(key));
        let probe = decode_value(key);
        match self.registry.line_for(id, probe) {
            Some(line) => {
                self.hits.insert(CompositeKey::new(id, line).as_i64());
            }
            None => {
                if self.config.unknown_probe_policy == UnknownProbePolicy::Warn {
                    tracing::warn!(
                        code_unit = id.as_i32(),
                        probe,
                        "dropping firing of unregistered probe"
                    );
                }
            }
        }
    }

    /// Snapshot of the hits recorded since the last reset
    #[must_use]
    pub fn get_hits(&self) -> Hits {
        self.hits.snapshot()
    }

    /// Forget all hits; registrations survive
    pub fn reset(&self) {
        self.hits.clear();
        tracing::debug!("coverage hits cleared");
    }

    /// Line registered for `probe` of `id`
    pub fn line_for_probe(&self, id: CodeUnitId, probe: i32) -> MutcovResult<i32> {
        let table = self
            .registry
            .probes_of(id)
            .ok_or(MutcovError::UnknownCodeUnit { id })?;
        usize::try_from(probe)
            .ok()
            .and_then(|idx| table.get(idx).copied())
            .ok_or(MutcovError::ProbeOutOfRange {
                id,
                probe,
                len: table.len(),
            })
    }

    /// Probe table registered for `id`
    #[must_use]
    pub fn probes_of(&self, id: CodeUnitId) -> Option<ProbeTable> {
        self.registry.probes_of(id)
    }

    /// Number of probes registered for `id` (zero when none are)
    #[must_use]
    pub fn probe_count(&self, id: CodeUnitId) -> usize {
        self.registry.probes_of(id).map_or(0, |t| t.len())
    }

    /// Name registered for `id`
    #[must_use]
    pub fn code_unit_name(&self, id: CodeUnitId) -> Option<Arc<str>> {
        self.registry.name_of(id)
    }

    /// Number of registered code units
    #[must_use]
    pub fn code_unit_count(&self) -> usize {
        self.registry.len()
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the hit set shard count
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.hits.shard_count()
    }
}
