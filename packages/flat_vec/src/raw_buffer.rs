use std::alloc::{Layout, alloc, dealloc};
use std::any::type_name;
use std::mem;
use std::ptr::NonNull;

/// A fixed-size heap-allocated block of `T` slots. This is the backing storage of a `FlatVec`.
///
/// The buffer knows nothing about element lifetimes: slots are uninitialized memory unless the
/// owner has written them, and dropping the buffer releases the storage without running any
/// element destructors. Tracking which slots hold live values is entirely the owner's job.
///
/// A buffer is never resized in place. When the owner needs more room, it creates a new buffer,
/// relocates the live elements itself and swaps ownership via [`swap()`][Self::swap].
#[derive(Debug)]
pub(crate) struct RawBuffer<T> {
    /// Base address of the allocation. Dangling (but properly aligned) when `capacity` is zero,
    /// in which case no slot may be accessed and there is nothing to deallocate.
    ptr: NonNull<T>,

    /// Number of `T` slots allocated. Fixed for the lifetime of the buffer.
    capacity: usize,
}

impl<T> RawBuffer<T> {
    /// Creates a buffer with no storage. Does not allocate.
    #[must_use]
    pub(crate) fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates storage for exactly `capacity` slots, none of them initialized.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized and `capacity` is nonzero, or if the allocation fails.
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::empty();
        }

        assert!(
            size_of::<T>() > 0,
            "RawBuffer cannot allocate storage for zero-sized {}",
            type_name::<T>()
        );

        let layout =
            Layout::array::<T>(capacity).expect("simple flat array layout must be calculable");

        // SAFETY: The layout is valid for the target type and non-zero-sized (both capacity and
        // the size of T are guarded above).
        let ptr = NonNull::new(unsafe { alloc(layout).cast::<T>() }).expect(
            "we do not intend to handle allocation failure as a real possibility - OOM is panic",
        );

        Self { ptr, capacity }
    }

    /// The number of slots allocated.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// The base address of the storage. Dangling when the capacity is zero, which is still a
    /// valid (aligned, non-null) pointer for zero-length slice views and zero-count copies.
    #[must_use]
    pub(crate) fn base_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// A pointer to slot `index`. The slot may or may not hold a live element; the owner is
    /// responsible for knowing which.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the allocated capacity.
    #[must_use]
    pub(crate) fn slot_ptr(&self, index: usize) -> NonNull<T> {
        assert!(
            index < self.capacity,
            "slot {index} out of bounds in a buffer of {} slots of {}",
            self.capacity,
            type_name::<T>()
        );

        // SAFETY: Guarded by the bounds check above, so the offset stays within the allocation.
        unsafe { self.ptr.add(index) }
    }

    /// Exchanges the storage of two buffers in O(1), without touching any slot contents.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 {
            // Nothing was allocated; the pointer is dangling.
            return;
        }

        let layout = Layout::array::<T>(self.capacity)
            .expect("layout was calculable at allocation time, so it still is");

        // SAFETY: We allocated with this exact layout in new() and deallocate exactly once,
        // as the buffer has a single owner and is not Copy/Clone.
        unsafe {
            dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}

// SAFETY: RawBuffer contains a raw pointer but it refers purely to the buffer's own allocation,
// which has exactly one owner. Moving the buffer to another thread moves the slots with it, so
// the buffer is exactly as thread-mobile as its element type.
unsafe impl<T: Send> Send for RawBuffer<T> {}

// SAFETY: Shared references to the buffer only permit deriving slot pointers, never reading
// slots, so sharing it across threads is as safe as sharing the element type.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

#[cfg(test)]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "test code doesn't need the same safety rigor as production code"
)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_no_capacity() {
        let buffer = RawBuffer::<u32>::empty();

        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn zero_capacity_does_not_allocate() {
        let buffer = RawBuffer::<u32>::new(0);

        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn slots_are_writable_and_readable() {
        let buffer = RawBuffer::<u32>::new(3);

        assert_eq!(buffer.capacity(), 3);

        for index in 0..3 {
            unsafe {
                buffer.slot_ptr(index).write(u32::try_from(index).unwrap());
            }
        }

        for index in 0..3 {
            unsafe {
                assert_eq!(
                    buffer.slot_ptr(index).read(),
                    u32::try_from(index).unwrap()
                );
            }
        }
    }

    #[test]
    fn swap_exchanges_storage() {
        let mut a = RawBuffer::<u32>::new(2);
        let mut b = RawBuffer::<u32>::new(5);

        let a_base = a.base_ptr();
        let b_base = b.base_ptr();

        a.swap(&mut b);

        assert_eq!(a.capacity(), 5);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.base_ptr(), b_base);
        assert_eq!(b.base_ptr(), a_base);
    }

    #[test]
    #[should_panic]
    fn slot_beyond_capacity_panics() {
        let buffer = RawBuffer::<u32>::new(2);

        _ = buffer.slot_ptr(2);
    }

    #[test]
    #[should_panic]
    fn slot_in_empty_buffer_panics() {
        let buffer = RawBuffer::<u32>::empty();

        _ = buffer.slot_ptr(0);
    }

    #[test]
    #[should_panic]
    fn zero_sized_item_type_panics() {
        drop(RawBuffer::<()>::new(3));
    }

    #[test]
    fn drop_does_not_touch_slot_contents() {
        // Slots holding live values are deliberately abandoned here; the buffer must free the
        // storage without running String destructors on the (moved-out) slots below.
        let buffer = RawBuffer::<String>::new(2);

        unsafe {
            buffer.slot_ptr(0).write("a".to_string());
            buffer.slot_ptr(1).write("b".to_string());
        }

        let a = unsafe { buffer.slot_ptr(0).read() };
        let b = unsafe { buffer.slot_ptr(1).read() };

        assert_eq!(a, "a");
        assert_eq!(b, "b");

        drop(buffer);
    }
}
