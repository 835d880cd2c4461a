// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis arena.
//!
//! Axes are shared: a margin references the axes stacked on it, and every
//! element references the pair it maps through. The arena owns all
//! [`AxisState`] records, addressed by stable [`AxisId`] handles, with an
//! explicit acquire/release count and deferred deletion: deleting an axis
//! that is still referenced only flags it, and the record is freed when the
//! last reference goes away.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::axis::{AxisClass, AxisState};

/// A stable handle to an axis record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub u32);

/// Errors from arena operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// An axis with this name already exists.
    DuplicateName,
    /// The handle does not name a live axis.
    UnknownAxis,
}

impl core::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateName => write!(f, "an axis with this name already exists"),
            Self::UnknownAxis => write!(f, "no such axis"),
        }
    }
}

#[derive(Debug)]
struct AxisRecord {
    state: AxisState,
    ref_count: u32,
    pending_delete: bool,
}

/// Name-keyed storage for all axes of one graph.
#[derive(Debug, Default)]
pub struct AxisArena {
    slots: Vec<Option<AxisRecord>>,
    names: HashMap<String, AxisId>,
    free: Vec<u32>,
}

impl AxisArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new axis, returning its handle.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a graph never holds anywhere near 2^32 axes"
    )]
    pub fn create(&mut self, name: &str, class: AxisClass) -> Result<AxisId, ArenaError> {
        if self.names.contains_key(name) {
            return Err(ArenaError::DuplicateName);
        }
        let record = AxisRecord {
            state: AxisState::new(name, class),
            ref_count: 0,
            pending_delete: false,
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(record);
                AxisId(slot)
            }
            None => {
                let slot = self.slots.len();
                self.slots.push(Some(record));
                AxisId(slot as u32)
            }
        };
        self.names.insert(String::from(name), id);
        Ok(id)
    }

    /// Looks up an axis handle by name.
    pub fn lookup(&self, name: &str) -> Option<AxisId> {
        self.names.get(name).copied()
    }

    fn record(&self, id: AxisId) -> Option<&AxisRecord> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    fn record_mut(&mut self, id: AxisId) -> Option<&mut AxisRecord> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    /// Borrows an axis state.
    pub fn get(&self, id: AxisId) -> Option<&AxisState> {
        self.record(id).map(|r| &r.state)
    }

    /// Mutably borrows an axis state.
    pub fn get_mut(&mut self, id: AxisId) -> Option<&mut AxisState> {
        self.record_mut(id).map(|r| &mut r.state)
    }

    /// Takes a reference on an axis, returning the new count.
    pub fn acquire(&mut self, id: AxisId) -> Result<u32, ArenaError> {
        let record = self.record_mut(id).ok_or(ArenaError::UnknownAxis)?;
        record.ref_count += 1;
        Ok(record.ref_count)
    }

    /// Drops a reference, returning the new count.
    ///
    /// If the count reaches zero and a delete is pending, the record is freed
    /// and its name becomes available again.
    pub fn release(&mut self, id: AxisId) -> Result<u32, ArenaError> {
        let record = self.record_mut(id).ok_or(ArenaError::UnknownAxis)?;
        record.ref_count = record.ref_count.saturating_sub(1);
        let count = record.ref_count;
        if count == 0 && record.pending_delete {
            self.destroy(id);
        }
        Ok(count)
    }

    /// Requests deletion of an axis.
    ///
    /// Returns `true` if the record was freed immediately, `false` if the
    /// axis is still referenced and deletion was deferred to the last
    /// [`AxisArena::release`].
    pub fn delete(&mut self, id: AxisId) -> Result<bool, ArenaError> {
        let record = self.record_mut(id).ok_or(ArenaError::UnknownAxis)?;
        if record.ref_count > 0 {
            record.pending_delete = true;
            return Ok(false);
        }
        self.destroy(id);
        Ok(true)
    }

    /// The current reference count of an axis.
    pub fn ref_count(&self, id: AxisId) -> Option<u32> {
        self.record(id).map(|r| r.ref_count)
    }

    fn destroy(&mut self, id: AxisId) {
        if let Some(record) = self.slots[id.0 as usize].take() {
            self.names.remove(record.state.name());
            self.free.push(id.0);
        }
    }

    /// Iterates over all live axes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot indices fit u32 by construction"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (AxisId, &AxisState)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (AxisId(i as u32), &r.state)))
    }

    /// Iterates mutably over all live axes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot indices fit u32 by construction"
    )]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AxisId, &mut AxisState)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|r| (AxisId(i as u32), &mut r.state)))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn names_are_unique_until_freed() {
        let mut arena = AxisArena::new();
        let x = arena.create("x", AxisClass::X).unwrap();
        assert_eq!(arena.create("x", AxisClass::X), Err(ArenaError::DuplicateName));
        assert!(arena.delete(x).unwrap());
        // Freed name is available again, and the slot is reused.
        let x2 = arena.create("x", AxisClass::X).unwrap();
        assert_eq!(x2, x);
    }

    #[test]
    fn delete_is_deferred_while_referenced() {
        let mut arena = AxisArena::new();
        let y = arena.create("y", AxisClass::Y).unwrap();
        assert_eq!(arena.acquire(y).unwrap(), 1);
        assert_eq!(arena.acquire(y).unwrap(), 2);

        // Still referenced: deletion only flags the record.
        assert!(!arena.delete(y).unwrap());
        assert!(arena.get(y).is_some());

        assert_eq!(arena.release(y).unwrap(), 1);
        assert!(arena.get(y).is_some());
        // Last release actually frees it.
        assert_eq!(arena.release(y).unwrap(), 0);
        assert!(arena.get(y).is_none());
        assert_eq!(arena.lookup("y"), None);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut arena = AxisArena::new();
        let x = arena.create("x", AxisClass::X).unwrap();
        arena.delete(x).unwrap();
        assert_eq!(arena.acquire(x), Err(ArenaError::UnknownAxis));
        assert_eq!(arena.release(x), Err(ArenaError::UnknownAxis));
    }
}
