//! A FIFO ring buffer that grows when it fills.
//!
//! Elements are appended at the tail and consumed from the head. Slots
//! vacated by consumed elements are reused by later appends, and when an
//! append finds the buffer full the backing store is reallocated at double
//! its length, with the live elements moved to its front in order.
//!
//! `append` is amortized `O(1)`; consuming, indexing and length queries are
//! `O(1)`.
//!
//! This crate follows [**goandylok/arraydeque**], trading the fixed-size
//! inline array for a heap store that can grow.
//!
//! [**goandylok/arraydeque**]: https://github.com/goandylok/arraydeque
//!
//! # Feature Flags
//! The **ringbuffer** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; without it the crate is `no_std` and only needs `alloc`
//!
//! # Capacity
//!
//! Note that the `capacity()` is always `backing_store.len() - 1`: one slot
//! is kept free so that a full buffer can be told apart from an empty one.
//! [Read more]
//!
//! [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
//!
//! # Examples
//! ```
//! use ringbuffer::RingBuffer;
//!
//! let mut ring = RingBuffer::with_capacity(2);
//! assert_eq!(ring.capacity(), 2);
//!
//! ring.append(1);
//! ring.append(2);
//! ring.append(3);
//! assert_eq!(ring.capacity(), 5);
//! assert_eq!(ring.len(), 3);
//!
//! assert_eq!(ring.next(), Some(1));
//! assert_eq!(ring.next(), Some(2));
//! assert_eq!(ring.next(), Some(3));
//! assert_eq!(ring.next(), None);
//! ```
//!
//! # Copy
//! ```
//! use ringbuffer::RingBuffer;
//!
//! let ring: RingBuffer<_> = (1..=4).collect();
//! let mut out = [0; 3];
//!
//! assert_eq!(ring.copy(&mut out), 3);
//! assert_eq!(out, [1, 2, 3]);
//! assert_eq!(ring.len(), 4);
//! ```
//!
//! # Drain
//! ```
//! use ringbuffer::RingBuffer;
//!
//! let mut ring: RingBuffer<_> = (0..6).collect();
//!
//! let drained: Vec<_> = ring.drain(1..3).collect();
//! assert_eq!(drained, vec![1, 2]);
//! assert_eq!(format!("{:?}", ring), "[0, 3, 4, 5]");
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;
extern crate odds;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use core::ops::{Index, IndexMut, Range};

pub use odds::IndexRange as RangeArgument;

mod iter;
mod store;
mod utils;

pub use iter::{Drain, IntoIter, Iter, IterMut};

use store::Store;
use utils::{count, wrap_add, wrap_sub};

/// A FIFO ring buffer over a contiguous store that doubles when full.
///
/// `append` writes at the tail, `next` consumes from the head. A buffer made
/// with `new` (or `Default`) owns no storage until the first append.
///
/// # Capacity
///
/// Note that the `capacity()` is always `backing_store.len() - 1`.
/// [Read more]
///
/// [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
pub struct RingBuffer<T> {
    store: Store<T>,
    head: usize,
    tail: usize,
}

impl<T> RingBuffer<T> {
    #[inline]
    fn wrap_add(&self, index: usize, addend: usize) -> usize {
        wrap_add(index, addend, self.store.len())
    }

    #[inline]
    fn is_contiguous(&self) -> bool {
        self.head <= self.tail
    }

    /// Physical ranges holding the live elements, oldest first.
    #[inline]
    fn spans(&self) -> (Range<usize>, Range<usize>) {
        if self.is_contiguous() {
            (self.head..self.tail, 0..0)
        } else {
            (self.head..self.store.len(), 0..self.tail)
        }
    }

    /// Removes the newest element.
    fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail = wrap_sub(self.tail, 1, self.store.len());
        unsafe { Some(self.store.read(self.tail)) }
    }

    fn with_slots(slots: usize) -> Self {
        RingBuffer {
            store: Store::with_len(slots),
            head: 0,
            tail: 0,
        }
    }

    /// Moves the live elements to the front of a store twice as long.
    fn grow(&mut self) {
        let slots = self.store.len().checked_mul(2).expect("capacity overflow");
        let mut grown = Store::with_len(slots);
        let len = self.len();
        let (front, back) = self.spans();
        let split = front.end - front.start;
        unsafe {
            self.store.move_to(front, &mut grown, 0);
            self.store.move_to(back, &mut grown, split);
        }
        self.store = grown;
        self.head = 0;
        self.tail = len;
    }
}

impl<T> RingBuffer<T> {
    /// Creates an empty `RingBuffer` without allocating.
    ///
    /// The first `append` allocates room for one element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let ring: RingBuffer<u32> = RingBuffer::new();
    /// assert_eq!(ring.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        RingBuffer {
            store: Store::empty(),
            head: 0,
            tail: 0,
        }
    }

    /// Creates an empty `RingBuffer` that holds `capacity` elements before
    /// it has to grow.
    ///
    /// # Panics
    ///
    /// Panics if `capacity + 1` overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let ring: RingBuffer<u32> = RingBuffer::with_capacity(8);
    /// assert_eq!(ring.capacity(), 8);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_slots(capacity.checked_add(1).expect("capacity overflow"))
    }

    /// Appends an element at the tail.
    ///
    /// If the buffer is full its store is reallocated at double the length
    /// first, so an append never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new();
    /// ring.append(1);
    /// assert_eq!(ring.capacity(), 1);
    /// ring.append(2);
    /// assert_eq!(ring.capacity(), 3);
    /// assert_eq!(ring.len(), 2);
    /// ```
    pub fn append(&mut self, element: T) {
        if self.store.len() == 0 {
            self.store = Store::with_len(2);
        }
        let mut next_tail = self.wrap_add(self.tail, 1);
        if next_tail == self.head {
            self.grow();
            next_tail = self.tail + 1;
        }
        self.store.write(self.tail, element);
        self.tail = next_tail;
    }

    /// Removes the oldest element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(2);
    /// assert_eq!(ring.next(), None);
    /// ring.append(1);
    /// ring.append(2);
    /// assert_eq!(ring.next(), Some(1));
    /// assert_eq!(ring.next(), Some(2));
    /// assert_eq!(ring.next(), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.head;
        self.head = self.wrap_add(head, 1);
        unsafe { Some(self.store.read(head)) }
    }

    /// Removes the oldest element and returns it, or `T::default()` if the
    /// buffer is empty.
    ///
    /// A stored default value can't be told apart from an empty buffer here;
    /// check `is_empty` first, or use `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(8);
    /// assert_eq!(ring.next_or_default(), 0);
    /// ring.append(7);
    /// assert_eq!(ring.next_or_default(), 7);
    /// ```
    pub fn next_or_default(&mut self) -> T
        where T: Default
    {
        self.next().unwrap_or_default()
    }

    /// Clones the elements, oldest first, into `dst` and returns how many
    /// were copied.
    ///
    /// Copies `min(self.len(), dst.len())` elements; the rest of `dst` is
    /// left untouched. The buffer is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(4);
    /// ring.append(1);
    /// ring.append(2);
    ///
    /// let mut out = [0; 4];
    /// assert_eq!(ring.copy(&mut out), 2);
    /// assert_eq!(out, [1, 2, 0, 0]);
    /// assert_eq!(ring.len(), 2);
    /// ```
    pub fn copy(&self, dst: &mut [T]) -> usize
        where T: Clone
    {
        let (a, b) = self.as_slices();
        let n = a.len().min(dst.len());
        dst[..n].clone_from_slice(&a[..n]);
        let m = b.len().min(dst.len() - n);
        dst[n..n + m].clone_from_slice(&b[..m]);
        n + m
    }

    /// Returns true if the buffer contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new();
    /// assert!(ring.is_empty());
    /// ring.append(1);
    /// assert!(!ring.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns the number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        count(self.head, self.tail, self.store.len())
    }

    /// Returns the number of elements the buffer can hold before its next
    /// append grows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let ring: RingBuffer<u8> = RingBuffer::with_capacity(3);
    /// assert_eq!(ring.capacity(), 3);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.len().saturating_sub(1)
    }

    /// Removes all elements, keeping the allocated store.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring: RingBuffer<_> = (0..5).collect();
    /// let capacity = ring.capacity();
    /// ring.clear();
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.drain(..);
        self.head = 0;
        self.tail = 0;
    }

    /// Returns a reference to the element at `index`, where index 0 is the
    /// oldest element, or `None` if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let ring: RingBuffer<_> = vec![3, 4, 5].into_iter().collect();
    /// assert_eq!(ring.get(1), Some(&4));
    /// assert_eq!(ring.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            let idx = self.wrap_add(self.head, index);
            unsafe { Some(self.store.get(idx)) }
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// `index` is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            let idx = self.wrap_add(self.head, index);
            unsafe { Some(self.store.get_mut(idx)) }
        } else {
            None
        }
    }

    /// Provides a reference to the oldest element, or `None` if the buffer
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new();
    /// assert_eq!(ring.front(), None);
    /// ring.append(1);
    /// ring.append(2);
    /// assert_eq!(ring.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the oldest element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(3);
    /// ring.append(0);
    /// ring.append(1);
    /// ring.next();
    /// ring.append(2);
    /// ring.append(3);
    ///
    /// assert_eq!(ring.as_slices(), (&[1, 2, 3][..], &[][..]));
    ///
    /// ring.next();
    /// ring.append(4);
    /// assert_eq!(ring.as_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.spans();
        unsafe { (self.store.slice(front), self.store.slice(back)) }
    }

    /// Returns a pair of mutable slices which contain, in order, the
    /// contents of the buffer.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (front, back) = self.spans();
        unsafe { self.store.split_mut(front, back) }
    }

    /// Returns an iterator over the elements, oldest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let ring: RingBuffer<_> = vec![5, 3, 4].into_iter().collect();
    /// let b: &[_] = &[&5, &3, &4];
    /// let c: Vec<&i32> = ring.iter().collect();
    /// assert_eq!(&c[..], b);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.as_slices();
        Iter {
            front: front.iter(),
            back: back.iter(),
        }
    }

    /// Returns an iterator of mutable references, oldest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring: RingBuffer<_> = vec![5, 3, 4].into_iter().collect();
    /// for num in ring.iter_mut() {
    ///     *num -= 2;
    /// }
    /// assert_eq!(ring.iter().collect::<Vec<_>>(), [&3, &1, &2]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.as_mut_slices();
        IterMut {
            front: front.iter_mut(),
            back: back.iter_mut(),
        }
    }

    /// Create a draining iterator that removes the specified range, counted
    /// from the oldest element, and yields the removed items.
    ///
    /// Note 1: The element range is removed even if the iterator is not
    /// consumed until the end.
    ///
    /// Note 2: It is unspecified how many elements are removed from the
    /// buffer if the `Drain` value is not dropped, but the borrow it holds
    /// expires (eg. due to mem::forget).
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut ring: RingBuffer<_> = vec![1, 2, 3].into_iter().collect();
    /// let drain1: Vec<_> = ring.drain(2..).collect();
    /// assert_eq!(drain1, vec![3]);
    ///
    /// // A full range clears all contents
    /// let drain2: Vec<_> = ring.drain(..).collect();
    /// assert_eq!(drain2, vec![1, 2]);
    /// assert!(ring.is_empty());
    /// ```
    pub fn drain<R>(&mut self, range: R) -> Drain<'_, T>
        where R: RangeArgument<usize>
    {
        let len = self.len();
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "drain lower bound was too large");
        assert!(end <= len, "drain upper bound was too large");

        self.tail = self.wrap_add(self.head, start);

        Drain {
            ring: self,
            start,
            end,
            len,
            cursor: start,
            back: end,
        }
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for RingBuffer<T> {
    #[inline]
    fn default() -> Self {
        RingBuffer::new()
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut ring = if self.store.len() == 0 {
            RingBuffer::new()
        } else {
            RingBuffer::with_slots(self.store.len())
        };
        ring.extend(self.iter().cloned());
        ring
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T: Hash> Hash for RingBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        // per element, so the split point of the two spans can't leak in
        self.iter().for_each(|elt| elt.hash(state));
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(elt) => elt,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(elt) => elt,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = RingBuffer::new();
        ring.extend(iter);
        ring
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Extend the `RingBuffer` with an iterator, growing as needed.
impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.append(elt);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::vec::Vec;

    #[derive(Clone)]
    struct Bump<'a>(&'a Cell<i32>);

    impl<'a> Drop for Bump<'a> {
        fn drop(&mut self) {
            let n = self.0.get();
            self.0.set(n + 1);
        }
    }

    fn hash<T: Hash>(t: &T) -> u64 {
        let mut s = DefaultHasher::new();
        t.hash(&mut s);
        s.finish()
    }

    #[test]
    fn simple() {
        let mut tester = RingBuffer::with_capacity(8);
        assert_eq!(tester.capacity(), 8);
        assert_eq!(tester.len(), 0);

        assert_eq!(tester.next_or_default(), 0);

        tester.append(1);
        tester.append(2);

        assert_eq!(tester.next(), Some(1));
        assert_eq!(tester.next(), Some(2));
        assert!(tester.is_empty());
        assert_eq!(tester.capacity(), 8);
        assert_eq!(tester.len(), 0);
    }

    #[test]
    fn next_on_empty_leaves_state() {
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(2);
        assert_eq!(tester.next(), None);
        assert_eq!(tester.next_or_default(), 0);
        assert!(tester.is_empty());
        assert_eq!(tester.capacity(), 2);

        let mut unallocated: RingBuffer<String> = RingBuffer::new();
        assert_eq!(unallocated.next(), None);
        assert_eq!(unallocated.next_or_default(), "");
        assert_eq!(unallocated.capacity(), 0);
    }

    #[test]
    fn default_grows_on_demand() {
        let mut tester = RingBuffer::default();
        assert_eq!(tester.capacity(), 0);

        tester.append(1);
        assert_eq!(tester.capacity(), 1);
        tester.append(2);
        tester.append(3);
        assert_eq!(tester.capacity(), 3);
        assert_eq!(tester.len(), 3);

        assert_eq!(tester.next(), Some(1));
        assert_eq!(tester.next(), Some(2));
        assert_eq!(tester.next(), Some(3));
        assert!(tester.is_empty());
        assert_eq!(tester.capacity(), 3);
        assert_eq!(tester.len(), 0);
    }

    #[test]
    fn growth_doubles_the_store() {
        let mut tester = RingBuffer::with_capacity(4);
        for i in 0..4 {
            tester.append(i);
        }
        assert_eq!(tester.capacity(), 4);

        // store of 5 slots becomes 10
        tester.append(4);
        assert_eq!(tester.capacity(), 9);

        for i in 5..10 {
            tester.append(i);
        }
        assert_eq!(tester.capacity(), 19);
        assert_eq!(tester.len(), 10);
    }

    #[test]
    fn zero_capacity_grows_on_first_append() {
        let mut tester = RingBuffer::with_capacity(0);
        assert_eq!(tester.capacity(), 0);
        tester.append('a');
        assert_eq!(tester.capacity(), 1);
        assert_eq!(tester.next(), Some('a'));
    }

    #[test]
    fn loop_around() {
        let mut tester = RingBuffer::new();
        for i in 1..=4 {
            tester.append(i);
            assert_eq!(tester.len(), 1);
            assert_eq!(tester.next(), Some(i));
            assert!(tester.is_empty());
        }
        assert_eq!(tester.capacity(), 1);
        assert_eq!(tester.len(), 0);
    }

    #[test]
    fn growth_preserves_order_across_wrap() {
        let mut tester = RingBuffer::with_capacity(4);
        let mut expected = 0;
        let mut next = 0;

        // wrap the cursors before the store fills
        for _ in 0..3 {
            tester.append(next);
            next += 1;
        }
        for _ in 0..2 {
            assert_eq!(tester.next(), Some(expected));
            expected += 1;
        }
        for _ in 0..3 {
            tester.append(next);
            next += 1;
        }
        assert_eq!(tester.as_slices().1.len(), 1);
        assert_eq!(tester.capacity(), 4);

        // this one is written after the grow
        tester.append(next);
        next += 1;
        assert_eq!(tester.capacity(), 9);
        assert!(tester.as_slices().1.is_empty());

        while let Some(value) = tester.next() {
            assert_eq!(value, expected);
            expected += 1;
        }
        assert_eq!(expected, next);
    }

    #[test]
    fn fifo_order_for_many_appends() {
        let mut tester = RingBuffer::new();
        for i in 0..1000 {
            tester.append(i);
        }
        assert_eq!(tester.len(), 1000);
        for i in 0..1000 {
            assert_eq!(tester.next(), Some(i));
        }
        assert!(tester.is_empty());
    }

    #[test]
    fn interleaved_append_and_next() {
        let mut tester = RingBuffer::with_capacity(3);
        let mut expected = 0usize;
        let mut next = 0usize;
        for round in 0..50 {
            for _ in 0..(round % 5) {
                tester.append(next);
                next += 1;
            }
            for _ in 0..(round % 3) {
                if let Some(value) = tester.next() {
                    assert_eq!(value, expected);
                    expected += 1;
                }
            }
            assert_eq!(tester.len(), next - expected);
        }
        while let Some(value) = tester.next() {
            assert_eq!(value, expected);
            expected += 1;
        }
        assert_eq!(expected, next);
    }

    #[test]
    fn copy() {
        let mut tester = RingBuffer::with_capacity(4);
        let mut slice = [0; 4];

        assert_eq!(tester.copy(&mut slice), 0);

        tester.append(1);
        assert_eq!(tester.copy(&mut slice), 1);
        assert_eq!(slice[0], 1);

        // loop the ring around
        tester.next();
        tester.append(2);
        tester.next();
        tester.append(3);
        tester.next();
        tester.append(4);
        tester.append(5);

        assert_eq!(tester.copy(&mut slice), 2);
        assert_eq!(&slice[..2], &[4, 5]);

        tester.clear();
        assert_eq!(tester.copy(&mut slice), 0);
    }

    #[test]
    fn copy_spans_the_wrap() {
        let mut tester = RingBuffer::with_capacity(4);
        tester.extend(vec![0, 0, 0, 1]);
        tester.next();
        tester.next();
        tester.next();
        tester.extend(vec![2, 3, 4]);
        assert!(!tester.as_slices().1.is_empty());

        let mut slice = [9; 6];
        assert_eq!(tester.copy(&mut slice), 4);
        assert_eq!(slice, [1, 2, 3, 4, 9, 9]);
    }

    #[test]
    fn copy_truncates_and_is_repeatable() {
        let tester: RingBuffer<_> = (1..=5).collect();
        let mut slice = [0; 3];
        for _ in 0..3 {
            assert_eq!(tester.copy(&mut slice), 3);
            assert_eq!(slice, [1, 2, 3]);
            assert_eq!(tester.len(), 5);
        }
        assert_eq!(tester.copy(&mut []), 0);
    }

    #[test]
    fn clear_then_reuse() {
        let mut tester = RingBuffer::with_capacity(3);
        tester.extend(vec![1, 2, 3]);
        tester.next();
        tester.append(4);
        tester.clear();
        assert!(tester.is_empty());
        assert_eq!(tester.len(), 0);
        assert_eq!(tester.capacity(), 3);

        tester.append(5);
        assert_eq!(tester.next(), Some(5));
        assert_eq!(tester.next(), None);
    }

    #[test]
    fn for_next() {
        let mut tester = RingBuffer::with_capacity(3);
        tester.extend(vec![1, 2, 3]);
        let mut slice = Vec::new();
        while !tester.is_empty() {
            slice.push(tester.next_or_default());
        }
        assert_eq!(slice, vec![1, 2, 3]);

        tester.extend(vec![4, 5, 6]);
        slice.clear();
        while !tester.is_empty() {
            slice.push(tester.next_or_default());
        }
        assert_eq!(slice, vec![4, 5, 6]);
        assert_eq!(tester.capacity(), 3);
    }

    #[test]
    fn index() {
        let mut tester = RingBuffer::with_capacity(3);
        tester.extend(vec![1, 2, 3]);
        tester.next();
        tester.append(4);
        assert_eq!(tester[0], 2);
        assert_eq!(tester[2], 4);
        tester[1] = 30;
        assert_eq!(tester.get(1), Some(&30));
        assert_eq!(tester.get(3), None);
        *tester.front_mut().unwrap() = 20;
        assert_eq!(tester.front(), Some(&20));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_out_of_bounds() {
        let mut tester = RingBuffer::with_capacity(3);
        tester.append(1);
        let _ = tester[1];
    }

    #[test]
    fn iter() {
        let mut tester = RingBuffer::with_capacity(3);
        tester.extend(vec![0, 1, 2]);
        tester.next();
        tester.next();
        tester.extend(vec![3, 4]);

        let forward: Vec<_> = tester.iter().cloned().collect();
        assert_eq!(forward, vec![2, 3, 4]);
        let backward: Vec<_> = tester.iter().rev().cloned().collect();
        assert_eq!(backward, vec![4, 3, 2]);
        assert_eq!(tester.iter().len(), 3);

        for elt in &mut tester {
            *elt *= 10;
        }
        let owned: Vec<_> = tester.into_iter().collect();
        assert_eq!(owned, vec![20, 30, 40]);
    }

    #[test]
    fn as_mut_slices_write_through_both_halves() {
        let mut tester = RingBuffer::with_capacity(3);
        tester.extend(vec![0, 1, 2]);
        tester.next();
        tester.next();
        tester.extend(vec![3, 4]);

        {
            let (a, b) = tester.as_mut_slices();
            assert_eq!((a.len(), b.len()), (2, 1));
            a[0] += 100;
            b[0] += 100;
            a[1] += 100;
        }
        assert_eq!(tester.iter().cloned().collect::<Vec<_>>(), vec![102, 103, 104]);

        for elt in tester.iter_mut().rev() {
            *elt -= 100;
        }
        assert_eq!(tester.as_slices(), (&[2, 3][..], &[4][..]));
    }

    #[test]
    fn into_iter_from_both_ends() {
        let mut tester = RingBuffer::with_capacity(4);
        tester.extend(vec![0, 0, 0, 1]);
        tester.next();
        tester.next();
        tester.next();
        tester.extend(vec![2, 3, 4]);
        assert!(!tester.as_slices().1.is_empty());

        let mut iter = tester.into_iter();
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.rev().collect::<Vec<_>>(), vec![3, 2]);
    }

    #[test]
    fn drain_ranges() {
        fn wrapped() -> RingBuffer<i32> {
            let mut tester = RingBuffer::with_capacity(6);
            tester.extend(vec![0, 0, 0, 0]);
            for _ in 0..4 {
                tester.next();
            }
            tester.extend(vec![0, 1, 2, 3, 4, 5]);
            assert!(!tester.as_slices().1.is_empty());
            tester
        }

        let mut tester = wrapped();
        assert_eq!(tester.drain(1..4).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(tester.iter().cloned().collect::<Vec<_>>(), vec![0, 4, 5]);

        let mut tester = wrapped();
        assert_eq!(tester.drain(..2).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(tester.iter().cloned().collect::<Vec<_>>(), vec![2, 3, 4, 5]);

        let mut tester = wrapped();
        assert_eq!(tester.drain(4..).rev().collect::<Vec<_>>(), vec![5, 4]);
        assert_eq!(tester.iter().cloned().collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        // the buffer keeps working after a drain
        tester.extend(vec![6, 7, 8, 9]);
        assert_eq!(tester.len(), 8);
        assert_eq!(tester.iter().cloned().collect::<Vec<_>>(),
                   vec![0, 1, 2, 3, 6, 7, 8, 9]);
    }

    #[test]
    fn drain_dropped_early_still_removes() {
        let mut tester: RingBuffer<_> = (0..6).collect();
        {
            let mut drain = tester.drain(1..5);
            assert_eq!(drain.next(), Some(1));
            assert_eq!(drain.len(), 3);
        }
        assert_eq!(tester.iter().cloned().collect::<Vec<_>>(), vec![0, 5]);
    }

    #[test]
    #[should_panic(expected = "drain upper bound was too large")]
    fn drain_past_end() {
        let mut tester: RingBuffer<_> = (0..3).collect();
        tester.drain(1..4);
    }

    #[test]
    fn drops_each_element_once() {
        let flag = &Cell::new(0);

        {
            let mut tester = RingBuffer::new();
            for _ in 0..5 {
                tester.append(Bump(flag));
            }
            // grown twice, nothing dropped yet
            assert_eq!(flag.get(), 0);

            drop(tester.next());
            assert_eq!(flag.get(), 1);

            tester.drain(1..3);
            assert_eq!(flag.get(), 3);
            assert_eq!(tester.len(), 2);

            tester.clear();
            assert_eq!(flag.get(), 5);

            tester.append(Bump(flag));
            tester.append(Bump(flag));
        }
        assert_eq!(flag.get(), 7);

        flag.set(0);
        {
            let mut tester = RingBuffer::with_capacity(2);
            tester.append(Bump(flag));
            tester.append(Bump(flag));
            let copied = tester.clone();
            assert_eq!(copied.len(), 2);
        }
        assert_eq!(flag.get(), 4);
    }

    #[test]
    fn clone_keeps_capacity() {
        let mut tester = RingBuffer::with_capacity(5);
        tester.extend(vec![1, 2, 3]);
        tester.next();
        let copied = tester.clone();
        assert_eq!(copied.capacity(), 5);
        assert_eq!(copied, tester);

        let empty: RingBuffer<u8> = RingBuffer::new();
        assert_eq!(empty.clone().capacity(), 0);
    }

    #[test]
    fn eq_and_hash_ignore_layout() {
        let mut wrapped = RingBuffer::with_capacity(3);
        wrapped.extend(vec![0, 0, 1]);
        wrapped.next();
        wrapped.next();
        wrapped.extend(vec![2, 3]);

        let straight: RingBuffer<_> = (1..4).collect();
        assert_eq!(wrapped, straight);
        assert_eq!(hash(&wrapped), hash(&straight));

        wrapped.append(4);
        assert!(wrapped != straight);
    }

    #[test]
    fn extend_by_ref() {
        let mut tester: RingBuffer<i32> = RingBuffer::new();
        tester.extend(&[1, 2, 3]);
        assert_eq!(format!("{:?}", tester), "[1, 2, 3]");
    }
}
