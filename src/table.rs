//! Table: open addressing with linear probing over a borrowed slot array.

use crate::dump::{Dump, EscapedKey};
use crate::hash::slot_index;
use crate::slot::Slot;
use core::fmt;

/// Position of a written slot in the bound array. Always `< capacity`.
///
/// Handles are plain indices: once the entry is removed the handle stops
/// resolving, and if the slot is reused it resolves to the new occupant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub(crate) fn new(index: usize) -> Self {
        Handle(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn key<'k, V>(&self, table: &Table<'_, 'k, V>) -> Option<&'k [u8]> {
        table.slots.get(self.0).and_then(Slot::key)
    }

    pub fn value<'t, V>(&self, table: &'t Table<'_, '_, V>) -> Option<&'t V> {
        table.slots.get(self.0).and_then(Slot::value)
    }

    pub fn value_mut<'t, V>(&self, table: &'t mut Table<'_, '_, V>) -> Option<&'t mut V> {
        table.slots.get_mut(self.0).and_then(Slot::value_mut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Every slot is occupied by some other key.
    TableFull,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::TableFull => write!(f, "hash table is full"),
        }
    }
}

impl core::error::Error for InsertError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// The backing array has no slots.
    ZeroCapacity,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::ZeroCapacity => write!(f, "backing array has zero capacity"),
        }
    }
}

impl core::error::Error for BindError {}

/// Fixed-capacity hash table over caller storage.
///
/// `'a` is the borrow of the backing array, `'k` the lifetime of stored keys.
/// The table never allocates; its capacity is the array length.
pub struct Table<'a, 'k, V> {
    slots: &'a mut [Slot<'k, V>],
    len: usize,
}

/// Iterator over occupied entries, in slot order.
pub struct Iter<'t, 'k, V> {
    it: core::iter::Enumerate<core::slice::Iter<'t, Slot<'k, V>>>,
}

impl<'t, 'k, V> Iterator for Iter<'t, 'k, V> {
    type Item = (Handle, &'k [u8], &'t V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.find_map(|(i, slot)| match slot {
            Slot::Occupied { key, value } => Some((Handle::new(i), *key, value)),
            _ => None,
        })
    }
}

/// Iterator over occupied entries with mutable values, in slot order.
pub struct IterMut<'t, 'k, V> {
    it: core::iter::Enumerate<core::slice::IterMut<'t, Slot<'k, V>>>,
}

impl<'t, 'k, V> Iterator for IterMut<'t, 'k, V> {
    type Item = (Handle, &'k [u8], &'t mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.find_map(|(i, slot)| match slot {
            Slot::Occupied { key, value } => Some((Handle::new(i), *key, value)),
            _ => None,
        })
    }
}

impl<'a, 'k, V> Table<'a, 'k, V> {
    /// Bind a table to `slots`, resetting every slot to empty.
    pub fn bind(slots: &'a mut [Slot<'k, V>]) -> Result<Self, BindError> {
        if slots.is_empty() {
            return Err(BindError::ZeroCapacity);
        }
        let mut table = Self { slots, len: 0 };
        table.clear();
        Ok(table)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of tombstones currently in the array. O(capacity).
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_tombstone()).count()
    }

    /// Read-only view of the bound array.
    pub fn slots(&self) -> &[Slot<'k, V>] {
        self.slots
    }

    pub fn slot(&self, handle: Handle) -> Option<&Slot<'k, V>> {
        self.slots.get(handle.index())
    }

    /// Reset every slot to empty, dropping stored values.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.len = 0;
    }

    /// Where `key` lives, or where it would be written.
    ///
    /// Probes linearly from the key's home slot with wraparound. Stops at the
    /// first empty slot or the matching key. Tombstones never stop the scan;
    /// the first one is returned only after a full pass found neither.
    /// `None` means every slot holds some other key.
    fn locate(&self, key: &[u8]) -> Option<usize> {
        let capacity = self.capacity();
        let start = slot_index(key, capacity);
        let mut first_tombstone = None;
        for i in (start..capacity).chain(0..start) {
            match &self.slots[i] {
                Slot::Empty => return Some(i),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(i);
                }
                Slot::Occupied { key: held, .. } if *held == key => return Some(i),
                Slot::Occupied { key: held, .. } => {
                    log::trace!(
                        "collision: key '{}' wants slot {i} held by '{}'",
                        key.escape_ascii(),
                        held.escape_ascii()
                    );
                }
            }
        }
        first_tombstone
    }

    /// Insert or overwrite `key`, returning the slot written.
    ///
    /// Fails with [`InsertError::TableFull`] without touching any slot when
    /// the key is absent and every slot is occupied.
    pub fn insert<K>(&mut self, key: &'k K, value: V) -> Result<Handle, InsertError>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        let Some(i) = self.locate(key) else {
            log::debug!(
                "insert of '{}' rejected: all {} slots occupied",
                key.escape_ascii(),
                self.capacity()
            );
            return Err(InsertError::TableFull);
        };
        let slot = &mut self.slots[i];
        if !slot.is_occupied() {
            self.len += 1;
        }
        *slot = Slot::Occupied { key, value };
        Ok(Handle::new(i))
    }

    pub fn lookup<K>(&self, key: &K) -> Option<&V>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let i = self.locate(key.as_ref())?;
        self.slots[i].value()
    }

    pub fn lookup_mut<K>(&mut self, key: &K) -> Option<&mut V>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let i = self.locate(key.as_ref())?;
        self.slots[i].value_mut()
    }

    pub fn contains_key<K>(&self, key: &K) -> bool
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Handle of the slot holding `key`, if present.
    pub fn find<K>(&self, key: &K) -> Option<Handle>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let i = self.locate(key.as_ref())?;
        self.slots[i].is_occupied().then(|| Handle::new(i))
    }

    /// Remove `key`, leaving a tombstone, and return its value.
    pub fn remove<K>(&mut self, key: &K) -> Option<V>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key`, leaving a tombstone, and return the stored key and value.
    pub fn remove_entry<K>(&mut self, key: &K) -> Option<(&'k [u8], V)>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let i = self.locate(key.as_ref())?;
        let slot = &mut self.slots[i];
        match core::mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied { key, value } => {
                self.len -= 1;
                Some((key, value))
            }
            vacant => {
                // Empty or tombstone: nothing to remove, restore as found.
                *slot = vacant;
                None
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, 'k, V> {
        Iter {
            it: self.slots.iter().enumerate(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, 'k, V> {
        IterMut {
            it: self.slots.iter_mut().enumerate(),
        }
    }

    /// Slot-by-slot rendering for diagnostics; see [`Dump`].
    pub fn dump(&self) -> Dump<'_, 'k, V> {
        Dump::new(self.slots, self.len)
    }
}

impl<V: fmt::Debug> fmt::Debug for Table<'_, '_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(_, k, v)| (EscapedKey(k), v)))
            .finish()
    }
}
