//! Fixed-length backing storage.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem::MaybeUninit;
use core::ops::Range;
use core::ptr;
use core::slice;

/// A boxed run of slots, each of which may or may not hold a value.
///
/// The store never drops its contents: which slots are initialized is
/// tracked by the owner, and the owner is responsible for reading or
/// dropping every value it wrote.
pub struct Store<T> {
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> Store<T> {
    /// Creates a store with no slots. Does not allocate.
    #[inline]
    pub fn empty() -> Self {
        Store { slots: Vec::new().into_boxed_slice() }
    }

    /// Creates a store of exactly `len` uninitialized slots.
    pub fn with_len(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, MaybeUninit::uninit);
        Store { slots: slots.into_boxed_slice() }
    }

    /// Number of physical slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn ptr(&self) -> *const T {
        self.slots.as_ptr() as *const T
    }

    #[inline]
    fn ptr_mut(&mut self) -> *mut T {
        self.slots.as_mut_ptr() as *mut T
    }

    /// Writes `element` into slot `offset` without dropping what was there.
    #[inline]
    pub fn write(&mut self, offset: usize, element: T) {
        self.slots[offset] = MaybeUninit::new(element);
    }

    /// Moves the value out of slot `offset`.
    ///
    /// The slot must be initialized, and is logically uninitialized afterwards.
    #[inline]
    pub unsafe fn read(&self, offset: usize) -> T {
        self.slots[offset].assume_init_read()
    }

    /// The slot must be initialized.
    #[inline]
    pub unsafe fn get(&self, offset: usize) -> &T {
        self.slots[offset].assume_init_ref()
    }

    /// The slot must be initialized.
    #[inline]
    pub unsafe fn get_mut(&mut self, offset: usize) -> &mut T {
        self.slots[offset].assume_init_mut()
    }

    /// Every slot in `range` must be initialized.
    #[inline]
    pub unsafe fn slice(&self, range: Range<usize>) -> &[T] {
        debug_assert!(range.start <= range.end && range.end <= self.len());
        slice::from_raw_parts(self.ptr().add(range.start), range.end - range.start)
    }

    /// Borrows two disjoint spans mutably, `back` lying before `front`.
    ///
    /// Every slot in both ranges must be initialized.
    pub unsafe fn split_mut(&mut self, front: Range<usize>, back: Range<usize>)
        -> (&mut [T], &mut [T])
    {
        debug_assert!(back.start <= back.end && back.end <= front.start,
                      "spl front={:?} back={:?}",
                      front,
                      back);
        debug_assert!(front.start <= front.end && front.end <= self.len());
        let (left, right) = self.slots.split_at_mut(front.start);
        let right = &mut right[..front.end - front.start];
        let left = &mut left[back];
        (&mut *(right as *mut [MaybeUninit<T>] as *mut [T]),
         &mut *(left as *mut [MaybeUninit<T>] as *mut [T]))
    }

    /// Moves the values in `range` to `other`, starting at slot `dst`.
    ///
    /// The source slots are logically uninitialized afterwards.
    pub unsafe fn move_to(&mut self, range: Range<usize>, other: &mut Store<T>, dst: usize) {
        let len = range.end - range.start;
        debug_assert!(range.end <= self.len(),
                      "mov src={:?} len={} cap={}",
                      range,
                      len,
                      self.len());
        debug_assert!(dst + len <= other.len(),
                      "mov dst={} len={} cap={}",
                      dst,
                      len,
                      other.len());
        ptr::copy_nonoverlapping(self.ptr().add(range.start), other.ptr_mut().add(dst), len);
    }

    /// Moves the value in slot `src` to slot `dst` within this store.
    #[inline]
    pub unsafe fn shift(&mut self, src: usize, dst: usize) {
        debug_assert!(src < self.len() && dst < self.len(),
                      "shf dst={} src={} cap={}",
                      dst,
                      src,
                      self.len());
        let ptr = self.ptr_mut();
        ptr::copy(ptr.add(src), ptr.add(dst), 1);
    }

    /// Drops the value in slot `offset` in place.
    #[inline]
    pub unsafe fn drop_in_place(&mut self, offset: usize) {
        self.slots[offset].assume_init_drop();
    }
}
