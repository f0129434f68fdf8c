//! Iterators over a `RingBuffer`.

use core::iter::FusedIterator;
use core::slice;

use crate::utils::wrap_add;
use crate::RingBuffer;

/// `RingBuffer` iterator, oldest element first.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    pub(crate) front: slice::Iter<'a, T>,
    pub(crate) back: slice::Iter<'a, T>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.front.next().or_else(|| self.back.next())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.back.next_back().or_else(|| self.front.next_back())
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// `RingBuffer` mutable iterator, oldest element first.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    pub(crate) front: slice::IterMut<'a, T>,
    pub(crate) back: slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match self.front.next() {
            Some(elt) => Some(elt),
            None => self.back.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        match self.back.next_back() {
            Some(elt) => Some(elt),
            None => self.front.next_back(),
        }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// By-value `RingBuffer` iterator, oldest element first.
pub struct IntoIter<T> {
    pub(crate) inner: RingBuffer<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// Draining `RingBuffer` iterator, created by `RingBuffer::drain`.
///
/// While the iterator is alive the buffer is truncated to the elements
/// before the drained range. Dropping it drops any elements it did not
/// yield and moves the elements after the range up to close the gap.
pub struct Drain<'a, T: 'a> {
    pub(crate) ring: &'a mut RingBuffer<T>,
    /// Logical offset where the drained range starts.
    pub(crate) start: usize,
    /// Logical offset one past the drained range.
    pub(crate) end: usize,
    /// Logical length of the buffer before draining.
    pub(crate) len: usize,
    /// Remaining, not yet yielded, logical offsets.
    pub(crate) cursor: usize,
    pub(crate) back: usize,
}

impl<'a, T> Drain<'a, T> {
    #[inline]
    fn physical(&self, offset: usize) -> usize {
        wrap_add(self.ring.head, offset, self.ring.store.len())
    }
}

impl<'a, T> Iterator for Drain<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.cursor == self.back {
            return None;
        }
        let slot = self.physical(self.cursor);
        self.cursor += 1;
        unsafe { Some(self.ring.store.read(slot)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.cursor;
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Drain<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.cursor == self.back {
            return None;
        }
        self.back -= 1;
        let slot = self.physical(self.back);
        unsafe { Some(self.ring.store.read(slot)) }
    }
}

impl<'a, T> ExactSizeIterator for Drain<'a, T> {}

impl<'a, T> FusedIterator for Drain<'a, T> {}

impl<'a, T> Drop for Drain<'a, T> {
    fn drop(&mut self) {
        self.by_ref().for_each(drop);

        // the elements after the range slide down, oldest first, so a
        // destination slot is always free by the time it is written
        let after = self.len - self.end;
        for i in 0..after {
            let src = self.physical(self.end + i);
            let dst = self.physical(self.start + i);
            unsafe { self.ring.store.shift(src, dst) };
        }
        self.ring.tail = self.physical(self.start + after);
    }
}
