//! Slot: one bucket of caller-provided table storage.

/// State of a single bucket.
///
/// `Empty` ends a probe sequence. `Tombstone` marks a removed entry: probes
/// continue past it, and it can be reused by a later insert. `Occupied`
/// borrows its key from the caller for `'k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot<'k, V> {
    Empty,
    Tombstone,
    Occupied { key: &'k [u8], value: V },
}

impl<'k, V> Slot<'k, V> {
    /// An empty slot, usable in array repeat expressions:
    /// `[Slot::<u32>::EMPTY; 64]`.
    pub const EMPTY: Self = Slot::Empty;

    /// Build an all-empty backing array of `N` slots without allocating.
    pub fn array<const N: usize>() -> [Self; N] {
        core::array::from_fn(|_| Slot::Empty)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    pub fn key(&self) -> Option<&'k [u8]> {
        match self {
            Slot::Occupied { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl<V> Default for Slot<'_, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;
    use test_log::test;

    #[test]
    fn array_starts_empty() {
        let slots: [Slot<'_, String>; 16] = Slot::array();
        assert!(slots.iter().all(Slot::is_empty));
    }

    #[test]
    fn repeat_expression_with_const() {
        let slots = [Slot::<u32>::EMPTY; 8];
        assert!(slots.iter().all(|s| *s == Slot::Empty));
        assert_eq!(Slot::<u32>::default(), Slot::Empty);
    }

    /// Invariant: only Occupied slots expose a key or value.
    #[test]
    fn accessors_follow_state() {
        let mut occupied = Slot::Occupied {
            key: b"k",
            value: 7,
        };
        assert!(occupied.is_occupied());
        assert_eq!(occupied.key(), Some(&b"k"[..]));
        *occupied.value_mut().unwrap() += 1;
        assert_eq!(occupied.value(), Some(&8));

        let tomb: Slot<'_, i32> = Slot::Tombstone;
        assert!(tomb.is_tombstone());
        assert!(!tomb.is_empty());
        assert_eq!(tomb.key(), None);
        assert_eq!(tomb.value(), None);
    }
}
