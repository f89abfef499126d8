//! fixed-hashtable: a fixed-capacity, open-addressing hash table over
//! caller-provided storage, for targets without an allocator.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: map byte-string keys to values using only a slot array the
//!   caller owns. The table never grows, allocates, or frees.
//! - Layers:
//!   - `hash`: sdbm digest and reduction to a home slot.
//!   - `Slot<'k, V>`: explicit three-state bucket (`Empty`, `Tombstone`,
//!     `Occupied`).
//!   - `Table<'a, 'k, V>`: binds a `&mut [Slot]` and runs every operation
//!     through a single probing routine, `locate`.
//!   - `Dump`: read-only `Display` rendering of the slot array.
//!
//! Constraints
//! - `no_std`, no allocation. Capacity is the length of the bound array
//!   and is never zero; `Table::bind` rejects an empty array.
//! - Single-threaded: mutation takes `&mut self`, so the borrow checker
//!   is the only synchronization.
//! - Every operation visits at most `capacity` slots.
//!
//! Probing
//! - Linear, stride 1, wrapping at the end of the array.
//! - An empty slot ends the scan: the key is absent and this is where it
//!   would go.
//! - A tombstone never ends the scan, because the key may sit further
//!   along the same sequence. The first tombstone seen is the fallback
//!   destination once a full pass finds no empty slot and no match.
//! - Insert is an upsert. It fails with `InsertError::TableFull` only when
//!   every slot holds some other key, and then mutates nothing.
//!
//! Hashing
//! - sdbm, unseeded. For tables under 65536 slots the upper 16 bits of the
//!   digest are xor-folded into the lower 16 before reduction; larger
//!   tables reduce the raw digest.
//!
//! Notes and non-goals
//! - No resizing, no rehashing, no compaction of tombstones. `clear` is
//!   the only way to reclaim them.
//! - Iteration is in slot order, which is unrelated to insertion order.
//! - Keys are borrowed for `'k`; the table never copies key bytes.
//!
//! ```
//! use fixed_hashtable::{InsertError, Slot, Table};
//!
//! let mut storage = Slot::array::<4>();
//! let mut table = Table::bind(&mut storage).unwrap();
//! table.insert("foo", 1).unwrap();
//! table.insert("bar", 2).unwrap();
//! assert_eq!(table.lookup("foo"), Some(&1));
//! assert_eq!(table.remove("bar"), Some(2));
//! assert_eq!(table.lookup("bar"), None);
//!
//! for k in ["a", "b", "c"] {
//!     table.insert(k, 0).unwrap();
//! }
//! assert_eq!(table.insert("d", 0), Err(InsertError::TableFull));
//! ```
#![cfg_attr(not(test), no_std)]

pub mod dump;
pub mod hash;
pub mod slot;
pub mod table;
mod table_proptest;

// Public surface
pub use dump::Dump;
pub use hash::{hash, slot_index};
pub use slot::Slot;
pub use table::{BindError, Handle, InsertError, Iter, IterMut, Table};
