use std::any::type_name;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::{mem, ptr, slice};

use crate::{OutOfRangeError, RawBuffer};

/// A contiguous growable array built from raw fixed-size heap buffers.
///
/// The container owns one [`RawBuffer`] and a logical length. Slots `[0, len)` hold live
/// elements; slots `[len, capacity)` are allocated but uninitialized and never exposed. Every
/// mutating operation preserves `len <= capacity`.
///
/// Appending is amortized O(1): when the buffer is exhausted, a new buffer of twice the capacity
/// is allocated, the live elements are relocated into it and the old storage is released. The
/// buffer itself is never resized in place and logical shrinking (`pop`, `truncate`, `remove`,
/// `clear`) never releases capacity.
///
/// # Examples
///
/// ```rust
/// use flat_vec::FlatVec;
///
/// let mut numbers = FlatVec::from([1, 2, 3]);
/// assert_eq!(numbers.len(), 3);
/// assert_eq!(numbers.capacity(), 3);
///
/// numbers.push(4);
/// assert_eq!(numbers.capacity(), 6); // Doubled when the buffer was exhausted.
///
/// numbers.insert(1, 9);
/// assert_eq!(numbers.as_slice(), &[1, 9, 2, 3, 4]);
/// ```
///
/// # Thread safety
///
/// No instance is safe for concurrent access from multiple threads without external
/// synchronization - any mutating operation may relocate the buffer. This is enforced by the
/// borrow checker; the container is `Send`/`Sync` exactly when the element type is.
pub struct FlatVec<T> {
    /// The owned storage. Its capacity is the container's capacity.
    buffer: RawBuffer<T>,

    /// Number of live elements, always within the buffer's capacity.
    len: usize,
}

impl<T> FlatVec<T> {
    /// Capacity multiplier applied when the buffer is exhausted and must be replaced.
    const GROWTH_FACTOR: usize = 2;

    /// Creates an empty container. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let numbers = FlatVec::<u32>::new();
    ///
    /// assert!(numbers.is_empty());
    /// assert_eq!(numbers.capacity(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: RawBuffer::empty(),
            len: 0,
        }
    }

    /// Creates an empty container with room for exactly `capacity` elements, without creating
    /// any of them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::<u32>::with_capacity(4);
    ///
    /// assert!(numbers.is_empty());
    /// assert_eq!(numbers.capacity(), 4);
    ///
    /// // The first four appends do not need to grow the buffer.
    /// numbers.push(1);
    /// assert_eq!(numbers.capacity(), 4);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized and `capacity` is nonzero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: RawBuffer::new(capacity),
            len: 0,
        }
    }

    /// Creates a container holding `count` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let words = FlatVec::from_elem(3, "hi".to_string());
    ///
    /// assert_eq!(words.as_slice(), &["hi", "hi", "hi"]);
    /// assert_eq!(words.capacity(), 3);
    /// ```
    #[must_use]
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(count);

        for _ in 0..count {
            vec.push(value.clone());
        }

        vec
    }

    /// Creates a container holding `count` default values.
    #[must_use]
    pub fn from_defaults(count: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(count);
        vec.resize(count);
        vec
    }

    /// The number of live elements.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of elements the container can hold without growing its buffer.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether the container holds no elements. It may still be holding unused capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A shared view of the live elements `[0, len)`.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots [0, len) always hold initialized elements and the base pointer is
        // properly aligned and non-null even when nothing is allocated (len is 0 then).
        unsafe { slice::from_raw_parts(self.buffer.base_ptr().as_ptr(), self.len) }
    }

    /// An exclusive view of the live elements `[0, len)`.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Same as as_slice(); exclusivity comes from holding &mut self.
        unsafe { slice::from_raw_parts_mut(self.buffer.base_ptr().as_ptr(), self.len) }
    }

    /// Checked access to the element at `index`.
    ///
    /// This is the only recoverable failure in the API - every other misuse panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let numbers = FlatVec::from([1, 2, 3]);
    ///
    /// assert_eq!(numbers.at(2), Ok(&3));
    /// assert!(numbers.at(5).is_err());
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, OutOfRangeError> {
        self.as_slice().get(index).ok_or(OutOfRangeError {
            index,
            len: self.len,
        })
    }

    /// Checked exclusive access to the element at `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRangeError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRangeError { index, len })
    }

    /// Drops all live elements. Capacity and storage are untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::from([1, 2, 3]);
    /// numbers.clear();
    ///
    /// assert!(numbers.is_empty());
    /// assert_eq!(numbers.capacity(), 3);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shortens the container to `new_len` elements, dropping the tail. Does nothing if
    /// `new_len` is not below the current length. Capacity is untouched.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        // Guarded by the early return above.
        let tail_len = self.len.wrapping_sub(new_len);

        let tail_start = self.buffer.slot_ptr(new_len);

        // Reduce the length before dropping so a panicking element Drop cannot lead to the tail
        // being dropped a second time later. The not-yet-dropped remainder merely leaks then.
        self.len = new_len;

        let tail = ptr::slice_from_raw_parts_mut(tail_start.as_ptr(), tail_len);

        // SAFETY: The tail slots held live elements and are no longer reachable now that the
        // length has been reduced, so each is dropped exactly once here.
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Resizes the container to `new_len` elements.
    ///
    /// Growing fills the new tail `[len, new_len)` with default values, replacing the buffer
    /// with one of `max(2 × capacity, new_len)` slots if the current one is too small.
    /// Shrinking drops the tail and never touches capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::from([1, 2]);
    ///
    /// numbers.resize(4);
    /// assert_eq!(numbers.as_slice(), &[1, 2, 0, 0]);
    ///
    /// numbers.resize(1);
    /// assert_eq!(numbers.as_slice(), &[1]);
    /// assert_eq!(numbers.capacity(), 4); // Shrinking only reduces the length.
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len < self.len {
            self.truncate(new_len);
            return;
        }

        self.grow_for(new_len);

        while self.len < new_len {
            let slot = self.buffer.slot_ptr(self.len);

            // SAFETY: len < new_len <= capacity after grow_for(), so the slot is allocated and
            // not yet initialized.
            unsafe {
                slot.write(T::default());
            }

            // Advance one slot at a time so a panicking Default impl leaves the length covering
            // exactly the elements that were actually created.
            self.len = self.len.wrapping_add(1);
        }
    }

    /// Grows the buffer to hold exactly `new_capacity` elements. No-op if the container already
    /// has that much capacity. The length does not change.
    ///
    /// Note that this takes the requested total capacity, not an additional element count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::from([1, 2, 3]);
    ///
    /// numbers.reserve(10);
    /// assert_eq!(numbers.capacity(), 10);
    /// assert_eq!(numbers.len(), 3);
    ///
    /// numbers.reserve(5); // Already satisfied.
    /// assert_eq!(numbers.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }

        self.grow_exact(new_capacity);
    }

    /// Appends an element. Amortized O(1): when the buffer is exhausted its replacement has
    /// `max(2 × capacity, 1)` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::new();
    ///
    /// numbers.push(1);
    /// assert_eq!(numbers.capacity(), 1);
    ///
    /// numbers.push(2);
    /// assert_eq!(numbers.capacity(), 2);
    ///
    /// numbers.push(3);
    /// assert_eq!(numbers.capacity(), 4);
    /// ```
    pub fn push(&mut self, value: T) {
        let new_len = self
            .len
            .checked_add(1)
            .expect("length overflow: the container cannot hold more than usize::MAX elements");

        self.grow_for(new_len);

        let slot = self.buffer.slot_ptr(self.len);

        // SAFETY: len < capacity after grow_for(), so the slot is allocated and uninitialized.
        unsafe {
            slot.write(value);
        }

        self.len = new_len;
    }

    /// Removes and returns the last element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::from([1, 2, 3]);
    ///
    /// assert_eq!(numbers.pop(), 3);
    /// assert_eq!(numbers.as_slice(), &[1, 2]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the container is empty. Check [`is_empty()`][Self::is_empty] first when the
    /// container may legitimately be empty.
    pub fn pop(&mut self) -> T {
        assert!(
            !self.is_empty(),
            "pop() from an empty FlatVec of {}",
            type_name::<T>()
        );

        // Non-empty asserted above.
        let last = self.len.wrapping_sub(1);
        self.len = last;

        // SAFETY: The slot held the last live element. The length was reduced first, so nothing
        // will read or drop the slot again; ownership moves to the caller.
        unsafe { self.buffer.slot_ptr(last).read() }
    }

    /// Inserts `value` at `index`, shifting everything at and after it one slot to the right.
    /// `index` may equal the length, in which case this appends.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// Without spare capacity the buffer is replaced by one of `max(2 × capacity, 1)` slots and
    /// the prefix and suffix are relocated around the new element in the same pass.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::from([1, 2, 3]);
    /// numbers.reserve(4);
    ///
    /// numbers.insert(1, 9);
    /// assert_eq!(numbers.as_slice(), &[1, 9, 2, 3]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        assert!(
            index <= self.len,
            "insert({index}) beyond the end of a FlatVec of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let new_len = self
            .len
            .checked_add(1)
            .expect("length overflow: the container cannot hold more than usize::MAX elements");

        // index <= len asserted above.
        let suffix_len = self.len.wrapping_sub(index);

        // At most new_len, which is within whichever buffer holds the result.
        let after_index = index.wrapping_add(1);

        if new_len > self.capacity() {
            let mut new_buffer = RawBuffer::new(self.grown_capacity(new_len));

            // SAFETY: The prefix [0, index) holds initialized elements, the destination has room
            // for them and the two allocations are distinct.
            unsafe {
                ptr::copy_nonoverlapping(
                    self.buffer.base_ptr().as_ptr(),
                    new_buffer.base_ptr().as_ptr(),
                    index,
                );
            }

            // SAFETY: index < new_len <= new capacity, so the slot is within the allocation.
            let value_slot = unsafe { new_buffer.base_ptr().add(index) };

            // SAFETY: The slot is allocated and uninitialized.
            unsafe {
                value_slot.write(value);
            }

            // SAFETY: index <= len <= old capacity, at most one past the end of the old buffer.
            let suffix_src = unsafe { self.buffer.base_ptr().add(index) };

            // SAFETY: after_index <= new_len <= new capacity, at most one past the end.
            let suffix_dst = unsafe { new_buffer.base_ptr().add(after_index) };

            // SAFETY: The suffix [index, len) holds initialized elements and the allocations are
            // distinct. The old buffer then frees storage only; its elements all moved here.
            unsafe {
                ptr::copy_nonoverlapping(suffix_src.as_ptr(), suffix_dst.as_ptr(), suffix_len);
            }

            self.buffer.swap(&mut new_buffer);
        } else {
            // SAFETY: index <= len <= capacity, at most one past the end.
            let shift_src = unsafe { self.buffer.base_ptr().add(index) };

            // SAFETY: after_index <= new_len <= capacity, at most one past the end.
            let shift_dst = unsafe { self.buffer.base_ptr().add(after_index) };

            // SAFETY: Shifting right within one allocation; the ranges overlap, which ptr::copy
            // permits by copying from the high end down.
            unsafe {
                ptr::copy(shift_src.as_ptr(), shift_dst.as_ptr(), suffix_len);
            }

            // SAFETY: Slot `index` now holds a duplicate of the element moved one right (or was
            // never initialized, when appending); overwriting it without dropping is required.
            unsafe {
                shift_src.write(value);
            }
        }

        self.len = new_len;

        let mut slot = self.buffer.slot_ptr(index);

        // SAFETY: The slot was just initialized and lies within the new length. The borrow is
        // tied to &mut self, so no other access can observe the buffer meanwhile.
        unsafe { slot.as_mut() }
    }

    /// Removes and returns the element at `index`, shifting everything after it one slot to the
    /// left. The successor of the removed element (if any) ends up at `index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut numbers = FlatVec::from([1, 9, 2, 3]);
    ///
    /// assert_eq!(numbers.remove(1), 9);
    /// assert_eq!(numbers.as_slice(), &[1, 2, 3]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index` does not reference a live element.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove({index}) out of bounds in a FlatVec of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let slot = self.buffer.slot_ptr(index);

        // SAFETY: The slot holds a live element. Ownership moves to `value`; the shift below
        // reclaims the slot so the element cannot be dropped twice.
        let value = unsafe { slot.read() };

        // index < len asserted above, so after_index <= len.
        let after_index = index.wrapping_add(1);
        let suffix_len = self.len.wrapping_sub(after_index);

        // SAFETY: after_index <= len <= capacity, at most one past the end.
        let suffix_src = unsafe { self.buffer.base_ptr().add(after_index) };

        // SAFETY: Shifting left within one allocation; the ranges overlap, which ptr::copy
        // permits by copying from the low end up.
        unsafe {
            ptr::copy(suffix_src.as_ptr(), slot.as_ptr(), suffix_len);
        }

        // Non-empty asserted above.
        self.len = self.len.wrapping_sub(1);

        value
    }

    /// Exchanges the storage and length of two containers in O(1). No element-level work is
    /// performed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let mut a = FlatVec::from([1, 2, 3]);
    /// let mut b = FlatVec::from([9]);
    ///
    /// a.swap_with(&mut b);
    ///
    /// assert_eq!(a.as_slice(), &[9]);
    /// assert_eq!(b.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Grows the buffer so that at least `required_capacity` slots exist, using the doubling
    /// policy. No-op if the capacity is already sufficient.
    fn grow_for(&mut self, required_capacity: usize) {
        if required_capacity <= self.capacity() {
            return;
        }

        self.grow_exact(self.grown_capacity(required_capacity));
    }

    /// The capacity a growth-triggering operation replaces the buffer with: double the current
    /// capacity, or the required capacity if doubling is not enough.
    fn grown_capacity(&self, required_capacity: usize) -> usize {
        let doubled = self
            .capacity()
            .checked_mul(Self::GROWTH_FACTOR)
            .expect("capacity growth would overflow usize, which virtual memory cannot fit");

        doubled.max(required_capacity)
    }

    /// Replaces the buffer with one of exactly `new_capacity` slots, relocating all live
    /// elements into it.
    fn grow_exact(&mut self, new_capacity: usize) {
        debug_assert!(
            new_capacity > self.capacity(),
            "grow_exact() must strictly enlarge the buffer"
        );

        let mut new_buffer = RawBuffer::new(new_capacity);

        // SAFETY: The source holds `len` initialized elements, the destination has room for them
        // (new_capacity > capacity >= len) and the two allocations are distinct. The elements
        // are moved, not cloned; the outgoing buffer frees storage only.
        unsafe {
            ptr::copy_nonoverlapping(
                self.buffer.base_ptr().as_ptr(),
                new_buffer.base_ptr().as_ptr(),
                self.len,
            );
        }

        self.buffer.swap(&mut new_buffer);
    }
}

impl<T> Drop for FlatVec<T> {
    fn drop(&mut self) {
        // Dropping the buffer afterwards releases the storage without touching slot contents.
        self.clear();
    }
}

impl<T> Default for FlatVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FlatVec<T> {
    /// Builds a container from a literal fixed list of values. Length and capacity both equal
    /// `N`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_vec::FlatVec;
    ///
    /// let numbers = FlatVec::from([1, 2, 3]);
    ///
    /// assert_eq!(numbers.len(), 3);
    /// assert_eq!(numbers.capacity(), 3);
    /// ```
    fn from(values: [T; N]) -> Self {
        let mut vec = Self::with_capacity(N);

        for value in values {
            vec.push(value);
        }

        vec
    }
}

impl<T> FromIterator<T> for FlatVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut vec = Self::with_capacity(iter.size_hint().0);
        vec.extend(iter);
        vec
    }
}

impl<T> Extend<T> for FlatVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Clone> Clone for FlatVec<T> {
    /// Deep-copies the live elements. The copy's capacity equals the source's *length*, not its
    /// capacity - a clone never carries unused slots the source happened to have.
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.len);

        for value in self.as_slice() {
            clone.push(value.clone());
        }

        clone
    }

    /// Copy-and-swap assignment: the clone is built in full before it replaces `self`, so a
    /// panicking element clone leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

impl<T> Deref for FlatVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for FlatVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for FlatVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` does not reference a live element. Use [`at()`][FlatVec::at] for
    /// checked access.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for FlatVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<'v, T> IntoIterator for &'v FlatVec<T> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'v, T> IntoIterator for &'v mut FlatVec<T> {
    type Item = &'v mut T;
    type IntoIter = slice::IterMut<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq> PartialEq for FlatVec<T> {
    fn eq(&self, other: &Self) -> bool {
        // Identity shortcut: a container always equals itself, without an element scan.
        ptr::eq(self, other) || self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for FlatVec<T> {}

impl<T: PartialOrd> PartialOrd for FlatVec<T> {
    /// Lexicographic ordering over the live elements.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for FlatVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for FlatVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for FlatVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "test code doesn't need the same safety rigor as production code"
)]
mod tests {
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::fmt::Debug;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(FlatVec<u32>: Send, Sync, Debug);
    assert_not_impl_any!(FlatVec<Rc<u32>>: Send, Sync);

    /// Increments a shared counter when dropped, for pinning exactly-once destruction.
    struct DropCounter<'c> {
        drops: &'c Cell<usize>,
    }

    impl Drop for DropCounter<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn counters(drops: &Cell<usize>, count: usize) -> FlatVec<DropCounter<'_>> {
        (0..count).map(|_| DropCounter { drops }).collect()
    }

    #[test]
    fn new_is_empty_without_storage() {
        let numbers = FlatVec::<u32>::new();

        assert_eq!(numbers.len(), 0);
        assert_eq!(numbers.capacity(), 0);
        assert!(numbers.is_empty());
    }

    #[test]
    fn with_capacity_allocates_without_elements() {
        let numbers = FlatVec::<u32>::with_capacity(4);

        assert!(numbers.is_empty());
        assert_eq!(numbers.capacity(), 4);
    }

    #[test]
    fn literal_list_sets_length_and_capacity() {
        let numbers = FlatVec::from([1, 2, 3]);

        assert_eq!(numbers.len(), 3);
        assert_eq!(numbers.capacity(), 3);
        assert_eq!(numbers.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn from_elem_clones_into_every_slot() {
        let words = FlatVec::from_elem(3, "x".to_string());

        assert_eq!(words.len(), 3);
        assert_eq!(words.capacity(), 3);
        assert!(words.iter().all(|word| word == "x"));
    }

    #[test]
    fn from_defaults_fills_with_default_values() {
        let numbers = FlatVec::<u32>::from_defaults(4);

        assert_eq!(numbers.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(numbers.capacity(), 4);
    }

    #[test]
    fn push_doubles_capacity_when_full() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        numbers.push(4);

        assert_eq!(numbers.len(), 4);
        assert_eq!(numbers.capacity(), 6);
        assert_eq!(numbers.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn push_growth_from_zero_capacity_is_one() {
        let mut numbers = FlatVec::new();

        numbers.push(1);
        assert_eq!(numbers.capacity(), 1);

        numbers.push(2);
        assert_eq!(numbers.capacity(), 2);

        numbers.push(3);
        assert_eq!(numbers.capacity(), 4);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut numbers = FlatVec::new();

        for value in 0..100 {
            numbers.push(value);
            assert!(numbers.len() <= numbers.capacity());

            if value % 7 == 0 {
                _ = numbers.pop();
                assert!(numbers.len() <= numbers.capacity());
            }

            if value % 13 == 0 {
                numbers.insert(numbers.len() / 2, value);
                assert!(numbers.len() <= numbers.capacity());
            }
        }

        numbers.resize(3);
        assert!(numbers.len() <= numbers.capacity());
    }

    #[test]
    fn push_then_pop_restores_sequence() {
        let mut numbers = FlatVec::from([1, 2, 3]);
        let before = numbers.clone();

        numbers.push(4);
        assert_eq!(numbers.pop(), 4);

        assert_eq!(numbers, before);
    }

    #[test]
    #[should_panic]
    fn pop_from_empty_panics() {
        let mut numbers = FlatVec::<u32>::new();

        _ = numbers.pop();
    }

    #[test]
    fn insert_shifts_suffix_right() {
        let mut numbers = FlatVec::from([1, 2, 3]);
        numbers.push(4); // Capacity 6 now, so the insert below shifts in place.

        let inserted = numbers.insert(1, 9);
        assert_eq!(*inserted, 9);

        assert_eq!(numbers.as_slice(), &[1, 9, 2, 3, 4]);
        assert_eq!(numbers.len(), 5);
    }

    #[test]
    fn insert_into_full_buffer_grows_and_shifts() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        _ = numbers.insert(1, 9);

        assert_eq!(numbers.as_slice(), &[1, 9, 2, 3]);
        assert_eq!(numbers.capacity(), 6);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut numbers = FlatVec::from([1, 2]);
        numbers.reserve(4);

        _ = numbers.insert(2, 3);

        assert_eq!(numbers.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn insert_into_empty_container() {
        let mut numbers = FlatVec::new();

        _ = numbers.insert(0, 1);

        assert_eq!(numbers.as_slice(), &[1]);
        assert_eq!(numbers.capacity(), 1);
    }

    #[test]
    #[should_panic]
    fn insert_beyond_end_panics() {
        let mut numbers = FlatVec::from([1, 2]);

        _ = numbers.insert(3, 9);
    }

    #[test]
    fn insert_then_remove_restores_sequence() {
        let mut numbers = FlatVec::from([1, 2, 3, 4]);
        let before = numbers.clone();

        _ = numbers.insert(2, 9);
        assert_eq!(numbers.remove(2), 9);

        assert_eq!(numbers, before);
        assert_eq!(numbers.len(), 4);
    }

    #[test]
    fn remove_shifts_suffix_left() {
        let mut numbers = FlatVec::from([1, 2, 3, 4]);

        assert_eq!(numbers.remove(1), 2);

        assert_eq!(numbers.as_slice(), &[1, 3, 4]);
        assert_eq!(numbers.capacity(), 4);
    }

    #[test]
    fn remove_last_element_needs_no_shift() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        assert_eq!(numbers.remove(2), 3);

        assert_eq!(numbers.as_slice(), &[1, 2]);
    }

    #[test]
    #[should_panic]
    fn remove_out_of_bounds_panics() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        _ = numbers.remove(3);
    }

    #[test]
    #[should_panic]
    fn remove_from_empty_panics() {
        let mut numbers = FlatVec::<u32>::new();

        _ = numbers.remove(0);
    }

    #[test]
    fn checked_access_reports_out_of_range() {
        let numbers = FlatVec::from([1, 2, 3]);

        assert_eq!(numbers.at(2), Ok(&3));

        let error = numbers.at(5).unwrap_err();
        assert_eq!(error.index, 5);
        assert_eq!(error.len, 3);
    }

    #[test]
    fn checked_mutable_access() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        *numbers.at_mut(0).unwrap() = 9;

        assert_eq!(numbers.as_slice(), &[9, 2, 3]);
        assert!(numbers.at_mut(3).is_err());
    }

    #[test]
    fn indexing_reads_and_writes() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        numbers[1] = 9;

        assert_eq!(numbers[0], 1);
        assert_eq!(numbers[1], 9);
    }

    #[test]
    #[should_panic]
    fn indexing_out_of_range_panics() {
        let numbers = FlatVec::from([1, 2, 3]);

        _ = numbers[3];
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        numbers.clear();

        assert!(numbers.is_empty());
        assert_eq!(numbers.capacity(), 3);
    }

    #[test]
    fn resize_grows_with_default_values() {
        let mut numbers = FlatVec::from([1, 2]);

        numbers.resize(5);

        assert_eq!(numbers.as_slice(), &[1, 2, 0, 0, 0]);
        // max(2 × 2, 5) = 5.
        assert_eq!(numbers.capacity(), 5);
    }

    #[test]
    fn resize_growth_prefers_doubling() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        numbers.resize(4);

        assert_eq!(numbers.as_slice(), &[1, 2, 3, 0]);
        // max(2 × 3, 4) = 6.
        assert_eq!(numbers.capacity(), 6);
    }

    #[test]
    fn resize_within_capacity_keeps_buffer() {
        let mut numbers = FlatVec::with_capacity(10);
        numbers.push(1);

        numbers.resize(5);

        assert_eq!(numbers.as_slice(), &[1, 0, 0, 0, 0]);
        assert_eq!(numbers.capacity(), 10);
    }

    #[test]
    fn resize_shrink_truncates_without_touching_capacity() {
        let mut numbers = FlatVec::from([1, 2, 3, 4]);

        numbers.resize(2);

        assert_eq!(numbers.as_slice(), &[1, 2]);
        assert_eq!(numbers.capacity(), 4);
    }

    #[test]
    fn reserve_allocates_exactly_and_keeps_length() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        numbers.reserve(10);

        assert_eq!(numbers.capacity(), 10);
        assert_eq!(numbers.as_slice(), &[1, 2, 3]);

        numbers.reserve(4);
        assert_eq!(numbers.capacity(), 10);
    }

    #[test]
    fn clone_compares_equal_and_truncates_capacity_to_length() {
        let mut numbers = FlatVec::with_capacity(10);
        numbers.extend([1, 2, 3]);

        let copy = numbers.clone();

        assert_eq!(copy, numbers);
        assert_eq!(copy.capacity(), 3);
        assert_eq!(numbers.capacity(), 10);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source = FlatVec::from([7, 8]);
        let mut target = FlatVec::from([1, 2, 3]);

        target.clone_from(&source);

        assert_eq!(target, source);
    }

    #[test]
    fn taking_leaves_source_empty() {
        let mut numbers = FlatVec::from([1, 2, 3]);

        let taken = mem::take(&mut numbers);

        assert_eq!(taken.as_slice(), &[1, 2, 3]);
        assert_eq!(numbers.len(), 0);
        assert_eq!(numbers.capacity(), 0);
    }

    #[test]
    fn swap_with_exchanges_storage_and_length() {
        let mut a = FlatVec::from([1, 2, 3]);
        a.reserve(8);
        let mut b = FlatVec::from([9]);

        a.swap_with(&mut b);

        assert_eq!(a.as_slice(), &[9]);
        assert_eq!(a.capacity(), 1);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert_eq!(b.capacity(), 8);
    }

    #[test]
    fn equality_is_elementwise() {
        let a = FlatVec::from([1, 2, 3]);
        let b = FlatVec::from([1, 2, 3]);
        let c = FlatVec::from([1, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        // Capacity does not participate in equality.
        let mut d = FlatVec::from([1, 2, 3]);
        d.reserve(10);
        assert_eq!(a, d);
    }

    #[test]
    fn self_comparison_uses_identity_shortcut() {
        // NaN makes elementwise comparison fail, so only the identity shortcut can make a
        // container equal itself here.
        let numbers = FlatVec::from([f64::NAN]);

        assert!(numbers.eq(&numbers));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(FlatVec::from([1, 2]) < FlatVec::from([1, 3]));
        assert!(FlatVec::from([1]) < FlatVec::from([1, 0]));
        assert!(FlatVec::from([2]) > FlatVec::from([1, 9, 9]));
        assert!(FlatVec::from([1, 2]) <= FlatVec::from([1, 2]));
    }

    #[test]
    fn equal_contents_hash_equal() {
        fn hash_of(vec: &FlatVec<u32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            vec.hash(&mut hasher);
            hasher.finish()
        }

        let mut a = FlatVec::from([1, 2, 3]);
        a.reserve(10);
        let b = FlatVec::from([1, 2, 3]);

        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn iteration_spans_exactly_the_live_elements() {
        let mut numbers = FlatVec::with_capacity(10);
        numbers.extend([1, 2, 3]);

        let seen: Vec<i32> = (&numbers).into_iter().copied().collect();
        assert_eq!(seen, [1, 2, 3]);

        for value in &mut numbers {
            *value *= 10;
        }

        assert_eq!(numbers.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn slice_view_supports_slice_api() {
        let numbers = FlatVec::from([3, 1, 2]);

        // Deref to [T] provides the whole slice API over the live elements.
        assert_eq!(numbers.first(), Some(&3));
        assert!(numbers.contains(&2));
    }

    #[test]
    fn collect_and_extend() {
        let mut numbers: FlatVec<i32> = (0..5).collect();
        assert_eq!(numbers.as_slice(), &[0, 1, 2, 3, 4]);

        numbers.extend([5, 6]);
        assert_eq!(numbers.len(), 7);
    }

    #[test]
    fn debug_renders_as_list() {
        let numbers = FlatVec::from([1, 2, 3]);

        assert_eq!(format!("{numbers:?}"), "[1, 2, 3]");
    }

    #[test]
    fn drop_destroys_every_live_element_once() {
        let drops = Cell::new(0);

        let vec = counters(&drops, 5);
        drop(vec);

        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn truncate_drops_only_the_tail() {
        let drops = Cell::new(0);
        let mut vec = counters(&drops, 5);

        vec.truncate(2);
        assert_eq!(drops.get(), 3);
        assert_eq!(vec.len(), 2);
        assert_eq!(vec.capacity(), 5);

        drop(vec);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn pop_and_remove_transfer_ownership_without_dropping() {
        let drops = Cell::new(0);
        let mut vec = counters(&drops, 3);

        let popped = vec.pop();
        assert_eq!(drops.get(), 0);
        drop(popped);
        assert_eq!(drops.get(), 1);

        let removed = vec.remove(0);
        assert_eq!(drops.get(), 1);
        drop(removed);
        assert_eq!(drops.get(), 2);

        drop(vec);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn growth_relocation_does_not_drop_elements() {
        let drops = Cell::new(0);
        let mut vec = counters(&drops, 4);

        // Force several relocations; the elements must move, never be dropped.
        vec.reserve(16);
        vec.push(DropCounter { drops: &drops });
        assert_eq!(drops.get(), 0);

        drop(vec);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn clear_drops_every_live_element() {
        let drops = Cell::new(0);
        let mut vec = counters(&drops, 4);

        vec.clear();

        assert_eq!(drops.get(), 4);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn non_copy_elements_move_through_all_paths() {
        let mut words = FlatVec::from(["a".to_string(), "b".to_string(), "c".to_string()]);

        _ = words.insert(1, "x".to_string());
        assert_eq!(words.remove(1), "x");
        assert_eq!(words.pop(), "c");

        let copy = words.clone();
        assert_eq!(copy, words);

        words.clear();
        assert!(words.is_empty());
    }

    #[test]
    #[should_panic]
    fn zero_sized_elements_cannot_be_stored() {
        let mut units = FlatVec::<()>::new();

        units.push(());
    }
}
