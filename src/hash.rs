//! Key hashing: sdbm digest and its reduction to a slot index.

/// Tables smaller than this get the upper half of the digest folded into the
/// lower half before reduction. Larger tables use the raw digest.
pub const FOLD_THRESHOLD: usize = 1 << 16;

/// sdbm string hash over `bytes`. Unseeded and deterministic.
#[inline]
pub fn hash(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |h, &c| {
        u32::from(c)
            .wrapping_add(h << 6)
            .wrapping_add(h << 16)
            .wrapping_sub(h)
    })
}

/// Starting probe position of `key` in a table of `capacity` slots.
///
/// Returns 0 when `capacity` is 0; a bound [`Table`](crate::Table) never
/// has zero capacity.
pub fn slot_index(key: &[u8], capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    let mut h = hash(key);
    if capacity < FOLD_THRESHOLD {
        h ^= h >> 16;
    }
    // u64 keeps the reduction exact on targets where usize is narrower than u32.
    let index = (u64::from(h) % capacity as u64) as usize;
    log::trace!("key '{}' hashed to slot {index}", key.escape_ascii());
    index
}
