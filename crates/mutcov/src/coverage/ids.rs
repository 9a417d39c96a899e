//! Code unit identifiers and composite key packing
//!
//! A composite key carries two independent 32-bit patterns in one `i64`:
//!
//! ```text
//! 63              32 31               0
//! ┌────────────────┬──────────────────┐
//! │  code unit id  │  probe / line    │
//! │ (sign-carrying)│ (raw 32-bit bits)│
//! └────────────────┴──────────────────┘
//! ```
//!
//! Neither half is assumed to be non-negative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registered code unit
///
/// Assigned densely from zero in registration order. Cannot be confused with a
/// raw probe index or line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeUnitId(i32);

impl CodeUnitId {
    /// Create a code unit id from its raw value
    #[inline]
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the inner value
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Index into dense registry tables, `None` for negative ids
    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for CodeUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CodeUnitId> for i32 {
    #[inline]
    fn from(id: CodeUnitId) -> Self {
        id.0
    }
}

/// Pack a code unit id and a second 32-bit value into one key
///
/// The id lands in bits 32..64, `value`'s bit pattern in bits 0..32.
#[inline]
#[must_use]
pub const fn encode(code_unit_id: i32, value: i32) -> i64 {
    ((code_unit_id as i64) << 32) | (value as u32 as i64)
}

/// Recover the code unit id from a key (arithmetic shift keeps the sign)
#[inline]
#[must_use]
pub const fn decode_code_unit_id(key: i64) -> i32 {
    (key >> 32) as i32
}

/// Recover the low 32-bit value from a key
#[inline]
#[must_use]
pub const fn decode_value(key: i64) -> i32 {
    key as i32
}

/// Typed view over a packed `(code unit, value)` key
///
/// Probe call sites emit `(unit, probe index)` keys; the hit set stores
/// `(unit, line number)` keys. Both share this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(i64);

impl CompositeKey {
    /// Pack a code unit and a value
    #[inline]
    #[must_use]
    pub const fn new(code_unit: CodeUnitId, value: i32) -> Self {
        Self(encode(code_unit.0, value))
    }

    /// Wrap an already-packed key
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the code unit half
    #[inline]
    #[must_use]
    pub const fn code_unit(self) -> CodeUnitId {
        CodeUnitId(decode_code_unit_id(self.0))
    }

    /// Get the value half
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        decode_value(self.0)
    }

    /// Get the raw packed value
    #[inline]
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<CompositeKey> for i64 {
    #[inline]
    fn from(key: CompositeKey) -> Self {
        key.0
    }
}

impl From<i64> for CompositeKey {
    #[inline]
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
