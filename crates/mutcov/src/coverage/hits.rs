//! Sharded hit set
//!
//! Probe firings arrive from many threads at once while an analysis thread
//! may be enumerating what has been seen so far. Keys are spread over
//! `2^shard_bits` independently locked shards so writers rarely meet, and
//! readers only ever walk an owned snapshot, so no iterator can be
//! invalidated by a concurrent insert.

use super::{decode_code_unit_id, decode_value, CodeUnitId, CompositeKey};
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

/// Multiplier used to spread keys of one code unit over all shards
const SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Concurrent set of `(code unit, line)` keys
#[derive(Debug)]
pub struct HitSet {
    shards: Box<[RwLock<FxHashSet<i64>>]>,
    shift: u32,
}

impl HitSet {
    /// Create a set with `2^shard_bits` shards
    ///
    /// `shard_bits` is clamped to `1..=12`.
    #[must_use]
    pub fn new(shard_bits: u32) -> Self {
        let bits = shard_bits.clamp(1, 12);
        let shards: Vec<_> = (0..1usize << bits)
            .map(|_| RwLock::new(FxHashSet::default()))
            .collect();
        Self {
            shards: shards.into_boxed_slice(),
            shift: 64 - bits,
        }
    }

    #[inline]
    fn shard_index(&self, key: i64) -> usize {
        ((key as u64).wrapping_mul(SPREAD) >> self.shift) as usize
    }

    /// Insert a key, returning `true` if it was not present yet
    #[inline]
    pub fn insert(&self, key: i64) -> bool {
        let shard = &self.shards[self.shard_index(key)];
        // Lines are hit over and over; most calls end at the shared lock.
        if shard.read().contains(&key) {
            return false;
        }
        shard.write().insert(key)
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.shards[self.shard_index(key)].read().contains(&key)
    }

    /// Number of distinct keys (a moving target while writers are active)
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().len()).sum()
    }

    /// Whether no key has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.read().is_empty())
    }

    /// Remove every key
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
    }

    /// Number of shards
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Copy the current contents out, one shard lock at a time
    ///
    /// Weakly consistent: keys inserted while the copy is in progress may or
    /// may not be included, but every insert that completed before the call
    /// is. The copy is sorted after the locks are released.
    #[must_use]
    pub fn snapshot(&self) -> Hits {
        let mut keys = Vec::with_capacity(self.len());
        for shard in self.shards.iter() {
            keys.extend(shard.read().iter().copied());
        }
        keys.sort_unstable();
        Hits { keys }
    }
}

impl Default for HitSet {
    fn default() -> Self {
        Self::new(6)
    }
}

/// Owned snapshot of recorded hits
///
/// Each element is a raw `(code unit, line number)` composite key. Keys are
/// kept in ascending order, which groups them by code unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hits {
    keys: Vec<i64>,
}

impl Hits {
    /// Iterate over the raw keys
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, i64>> {
        self.keys.iter().copied()
    }

    /// Iterate over typed keys
    pub fn keys(&self) -> impl Iterator<Item = CompositeKey> + '_ {
        self.keys.iter().copied().map(CompositeKey::from_raw)
    }

    /// Whether the raw key was hit
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Whether `line` of `code_unit` was hit
    #[must_use]
    pub fn is_line_hit(&self, code_unit: CodeUnitId, line: i32) -> bool {
        self.contains(CompositeKey::new(code_unit, line).as_i64())
    }

    /// Keys of one code unit, a contiguous run of the sorted keys
    fn run_of(&self, code_unit: CodeUnitId) -> &[i64] {
        let id = code_unit.as_i32();
        let start = self.keys.partition_point(|&k| decode_code_unit_id(k) < id);
        let len = self.keys[start..].partition_point(|&k| decode_code_unit_id(k) == id);
        &self.keys[start..start + len]
    }

    /// Sorted line numbers hit in one code unit
    #[must_use]
    pub fn lines_for(&self, code_unit: CodeUnitId) -> Vec<i32> {
        // The low word orders as unsigned, so negative lines sort last.
        let mut lines: Vec<i32> = self
            .run_of(code_unit)
            .iter()
            .map(|&k| decode_value(k))
            .collect();
        lines.sort_unstable();
        lines
    }

    /// Number of hits in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the snapshot is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Borrow the raw keys
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.keys
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = i64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Hits {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl From<Hits> for Vec<i64> {
    fn from(hits: Hits) -> Self {
        hits.keys
    }
}
