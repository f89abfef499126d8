//! Diagnostic rendering of a table's slot array.

use crate::slot::Slot;
use core::fmt;

/// Slot-by-slot view of a table, one line per slot in index order.
///
/// ```text
/// table: 2/4 occupied
/// 00000000: *
/// 00000001: 'foo' -> "bar"
/// 00000002: <deleted>
/// 00000003: 'hej' -> "blah"
/// ```
///
/// Obtained from [`Table::dump`](crate::Table::dump). Rendering reads the
/// slots and nothing else; write it to any `core::fmt::Write` sink.
pub struct Dump<'t, 'k, V> {
    slots: &'t [Slot<'k, V>],
    len: usize,
}

impl<'t, 'k, V> Dump<'t, 'k, V> {
    pub(crate) fn new(slots: &'t [Slot<'k, V>], len: usize) -> Self {
        Self { slots, len }
    }
}

impl<V: fmt::Debug> fmt::Display for Dump<'_, '_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table: {}/{} occupied", self.len, self.slots.len())?;
        for (i, slot) in self.slots.iter().enumerate() {
            write!(f, "{i:08x}: ")?;
            match slot {
                Slot::Empty => writeln!(f, "*")?,
                Slot::Tombstone => writeln!(f, "<deleted>")?,
                Slot::Occupied { key, value } => {
                    writeln!(f, "'{}' -> {value:?}", key.escape_ascii())?
                }
            }
        }
        Ok(())
    }
}

/// Debug-formats a byte key as an escaped, quoted string.
pub(crate) struct EscapedKey<'k>(pub(crate) &'k [u8]);

impl fmt::Debug for EscapedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Slot, Table};
    use core::fmt::Write;
    use test_log::test;

    /// Invariant: every slot state renders distinctly, in index order.
    #[test]
    fn renders_each_state() {
        let mut slots = Slot::array::<4>();
        let mut t = Table::bind(&mut slots).unwrap();
        // With a single key the home slot is known; fill around it.
        let home = t.insert("hej", "blah").unwrap().index();
        assert_eq!(home, crate::hash::slot_index(b"hej", 4));
        t.insert("gone", "x").unwrap();
        t.remove("gone").unwrap();

        let out = t.dump().to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "table: 1/4 occupied");
        assert_eq!(lines[1 + home], format!("{home:08x}: 'hej' -> \"blah\""));
        assert_eq!(lines.iter().filter(|l| l.ends_with("<deleted>")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.ends_with(": *")).count(), 2);
    }

    /// Invariant: non-printable key bytes are escaped.
    #[test]
    fn escapes_key_bytes() {
        let mut slots = Slot::array::<1>();
        let mut t = Table::bind(&mut slots).unwrap();
        t.insert(b"a\n\xff".as_slice(), 1).unwrap();
        let mut sink = String::new();
        write!(sink, "{}", t.dump()).unwrap();
        assert_eq!(sink, "table: 1/1 occupied\n00000000: 'a\\n\\xff' -> 1\n");
    }

    #[test]
    fn dump_of_fresh_table_is_all_empty() {
        let mut slots = Slot::array::<3>();
        let t: Table<'_, '_, u8> = Table::bind(&mut slots).unwrap();
        assert_eq!(
            t.dump().to_string(),
            "table: 0/3 occupied\n00000000: *\n00000001: *\n00000002: *\n"
        );
    }
}
