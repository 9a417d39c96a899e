//! Code unit registry and probe tables
//!
//! Names are appended under a write lock, which is what makes ids dense:
//! the id of a unit is its position in the name table. Probe tables are read
//! on every probe firing, so they live in fixed-size pages of write-once
//! slots. The page directory sits in an atomically swapped snapshot that
//! readers load without taking any lock. Only `register` grows it, one page
//! at a time and under the name lock, so registering a table never copies
//! the tables already stored.

use super::CodeUnitId;
use crate::result::{MutcovError, MutcovResult};
use arc_swap::ArcSwap;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

/// Probe index → source line number for one code unit
pub type ProbeTable = Arc<[i32]>;

/// log2 of the number of slots per page
const PAGE_BITS: u32 = 10;
const PAGE_LEN: usize = 1 << PAGE_BITS;
const SLOT_MASK: usize = PAGE_LEN - 1;

type Page = Box<[OnceLock<ProbeTable>]>;

fn new_page() -> Arc<Page> {
    Arc::new((0..PAGE_LEN).map(|_| OnceLock::new()).collect())
}

/// Registry of code units and their probe tables
#[derive(Debug)]
pub struct CodeUnitRegistry {
    names: RwLock<Vec<Arc<str>>>,
    pages: ArcSwap<Vec<Arc<Page>>>,
}

impl CodeUnitRegistry {
    /// Create an empty registry sized for `expected` code units
    #[must_use]
    pub fn with_capacity(expected: usize) -> Self {
        let pages = (0..expected.div_ceil(PAGE_LEN)).map(|_| new_page()).collect();
        Self {
            names: RwLock::new(Vec::with_capacity(expected)),
            pages: ArcSwap::from_pointee(pages),
        }
    }

    /// Assign the next id to `name`
    pub fn register(&self, name: &str) -> MutcovResult<CodeUnitId> {
        let mut names = self.names.write();
        let idx = names.len();
        let id = i32::try_from(idx).map_err(|_| MutcovError::RegistryExhausted { count: idx })?;

        // Growth only happens here, under the name lock, so a plain store
        // cannot lose a concurrent page.
        let pages = self.pages.load();
        if idx >> PAGE_BITS >= pages.len() {
            let mut next = Vec::with_capacity(pages.len() + 1);
            next.extend(pages.iter().cloned());
            next.push(new_page());
            self.pages.store(Arc::new(next));
        }

        names.push(Arc::from(name));
        Ok(CodeUnitId::new(id))
    }

    /// Store the probe table of a registered unit
    ///
    /// A table can be stored once per unit.
    pub fn set_probes(&self, id: CodeUnitId, lines: &[i32]) -> MutcovResult<()> {
        let idx = self
            .index_of(id)
            .ok_or(MutcovError::UnknownCodeUnit { id })?;
        let pages = self.pages.load();
        let slot = pages
            .get(idx >> PAGE_BITS)
            .map(|page| &page[idx & SLOT_MASK])
            .ok_or(MutcovError::UnknownCodeUnit { id })?;
        slot.set(Arc::from(lines))
            .map_err(|_| MutcovError::ProbesAlreadyRegistered { id })
    }

    #[inline]
    fn slot(&self, id: CodeUnitId) -> Option<ProbeTable> {
        let idx = id.index()?;
        let pages = self.pages.load();
        pages.get(idx >> PAGE_BITS)?[idx & SLOT_MASK].get().cloned()
    }

    /// Line number registered for `probe` of `id`, if any
    #[inline]
    #[must_use]
    pub fn line_for(&self, id: CodeUnitId, probe: i32) -> Option<i32> {
        let idx = id.index()?;
        let probe = usize::try_from(probe).ok()?;
        let pages = self.pages.load();
        pages.get(idx >> PAGE_BITS)?[idx & SLOT_MASK]
            .get()?
            .get(probe)
            .copied()
    }

    /// Probe table of `id`, if registered
    #[must_use]
    pub fn probes_of(&self, id: CodeUnitId) -> Option<ProbeTable> {
        self.slot(id)
    }

    /// Name registered for `id`
    #[must_use]
    pub fn name_of(&self, id: CodeUnitId) -> Option<Arc<str>> {
        self.names.read().get(id.index()?).cloned()
    }

    /// Number of registered code units
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.load().len()
    }

    fn index_of(&self, id: CodeUnitId) -> Option<usize> {
        id.index().filter(|&idx| idx < self.names.read().len())
    }
}

impl Default for CodeUnitRegistry {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_registration_order() {
        let registry = CodeUnitRegistry::default();
        let ids: Vec<i32> = ["a", "b", "c"]
            .iter()
            .map(|n| registry.register(n).unwrap().as_i32())
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.name_of(CodeUnitId::new(1)).as_deref(), Some("b"));
    }

    #[test]
    fn test_probes_for_unknown_unit_rejected() {
        let registry = CodeUnitRegistry::default();
        let err = registry.set_probes(CodeUnitId::new(0), &[1]).unwrap_err();
        assert_eq!(err, MutcovError::unknown_code_unit(CodeUnitId::new(0)));
        let err = registry.set_probes(CodeUnitId::new(-1), &[1]).unwrap_err();
        assert_eq!(err, MutcovError::unknown_code_unit(CodeUnitId::new(-1)));
    }

    #[test]
    fn test_probes_are_immutable_once_registered() {
        let registry = CodeUnitRegistry::default();
        let id = registry.register("foo").unwrap();
        registry.set_probes(id, &[5, 6]).unwrap();
        assert_eq!(
            registry.set_probes(id, &[7]),
            Err(MutcovError::ProbesAlreadyRegistered { id })
        );
        assert_eq!(registry.line_for(id, 1), Some(6));
    }

    #[test]
    fn test_line_lookup_out_of_range() {
        let registry = CodeUnitRegistry::default();
        let id = registry.register("foo").unwrap();
        assert_eq!(registry.line_for(id, 0), None);
        registry.set_probes(id, &[10]).unwrap();
        assert_eq!(registry.line_for(id, 0), Some(10));
        assert_eq!(registry.line_for(id, 1), None);
        assert_eq!(registry.line_for(id, -1), None);
        assert_eq!(registry.line_for(CodeUnitId::new(7), 0), None);
    }

    #[test]
    fn test_probes_registered_out_of_order() {
        let registry = CodeUnitRegistry::default();
        let first = registry.register("first").unwrap();
        let second = registry.register("second").unwrap();
        registry.set_probes(second, &[2]).unwrap();
        assert!(registry.probes_of(first).is_none());
        registry.set_probes(first, &[1]).unwrap();
        assert_eq!(registry.probes_of(first).as_deref(), Some(&[1][..]));
        assert_eq!(registry.probes_of(second).as_deref(), Some(&[2][..]));
    }

    #[test]
    fn test_pages_grow_one_at_a_time() {
        let registry = CodeUnitRegistry::default();
        assert_eq!(registry.page_count(), 0);
        registry.register("first").unwrap();
        assert_eq!(registry.page_count(), 1);
        for i in 1..PAGE_LEN {
            registry.register(&format!("C{}", i)).unwrap();
        }
        assert_eq!(registry.page_count(), 1);
        registry.register("overflow").unwrap();
        assert_eq!(registry.page_count(), 2);

        let sized = CodeUnitRegistry::with_capacity(PAGE_LEN + 1);
        assert_eq!(sized.page_count(), 2);
        for i in 0..=PAGE_LEN {
            sized.register(&format!("C{}", i)).unwrap();
        }
        assert_eq!(sized.page_count(), 2);
    }

    #[test]
    fn test_growth_keeps_stored_tables_in_place() {
        let registry = CodeUnitRegistry::default();
        let first = registry.register("first").unwrap();
        registry.set_probes(first, &[11, 12]).unwrap();
        let stored = registry.probes_of(first).unwrap();

        for i in 0..3 * PAGE_LEN {
            registry.register(&format!("C{}", i)).unwrap();
        }
        assert_eq!(registry.page_count(), 4);
        assert!(Arc::ptr_eq(&stored, &registry.probes_of(first).unwrap()));
    }

    #[test]
    fn test_many_units_across_pages() {
        let registry = CodeUnitRegistry::default();
        let count = 5 * PAGE_LEN + 7;
        for i in 0..count {
            let id = registry.register(&format!("C{}", i)).unwrap();
            registry.set_probes(id, &[1, 2, id.as_i32()]).unwrap();
        }
        assert_eq!(registry.len(), count);
        for i in [0, PAGE_LEN - 1, PAGE_LEN, 3 * PAGE_LEN + 5, count - 1] {
            let id = CodeUnitId::new(i as i32);
            assert_eq!(registry.line_for(id, 2), Some(i as i32));
            assert_eq!(
                registry.set_probes(id, &[0]),
                Err(MutcovError::ProbesAlreadyRegistered { id })
            );
        }
        assert_eq!(registry.line_for(CodeUnitId::new(count as i32), 0), None);
    }
}
