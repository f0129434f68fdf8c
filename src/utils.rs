//! Index arithmetic over a store of `slots` physical positions.

/// Advances `index` by `addend` positions, wrapping at `slots`.
///
/// A zero-length store has a single valid cursor position, `0`.
#[inline]
pub fn wrap_add(index: usize, addend: usize, slots: usize) -> usize {
    if slots == 0 {
        debug_assert!(index == 0 && addend == 0);
        return 0;
    }
    debug_assert!(index < slots);
    debug_assert!(addend <= slots);
    (index + addend) % slots
}

/// Steps `index` back by `subtrahend` positions, wrapping at `slots`.
#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, slots: usize) -> usize {
    debug_assert!(index < slots);
    debug_assert!(subtrahend <= slots);
    (index + slots - subtrahend) % slots
}

/// Number of live positions between `head` (inclusive) and `tail` (exclusive).
#[inline]
pub fn count(head: usize, tail: usize, slots: usize) -> usize {
    if head <= tail {
        tail - head
    } else {
        debug_assert!(head < slots);
        slots - head + tail
    }
}
