//! A contiguous growable array built from raw fixed-size heap buffers.
//!
//! This crate provides [`FlatVec`], a resizable-array container with amortized-O(1) append,
//! random access, insertion/removal at arbitrary positions and explicit capacity control. It is
//! built directly on a raw single-owner heap buffer, making the capacity/growth and
//! element-lifetime mechanics of such a container explicit and testable.
//!
//! # Key properties
//!
//! - **Doubling growth**: exhausting the buffer replaces it with one of twice the capacity
//!   (capacity 0 grows to 1); live elements are relocated, never cloned
//! - **Explicit capacity control**: [`FlatVec::with_capacity()`] pre-allocates without creating
//!   elements, [`FlatVec::reserve()`] requests an exact total capacity
//! - **Capacity never shrinks**: `pop`/`remove`/`truncate`/`clear` only reduce the length
//! - **Eager element destruction**: logically removed elements are dropped immediately;
//!   slots beyond the length are uninitialized memory, never exposed
//! - **Two-tier error policy**: checked access ([`FlatVec::at()`]) returns
//!   [`OutOfRangeError`]; contract violations (indexing past the end, popping from an empty
//!   container) panic
//! - **Slice interoperability**: derefs to `[T]`, so the entire slice API, iteration and
//!   pattern-based access apply to the live elements
//!
//! # Examples
//!
//! ```rust
//! use flat_vec::FlatVec;
//!
//! let mut numbers = FlatVec::from([1, 2, 3]);
//! assert_eq!(numbers.capacity(), 3);
//!
//! // Exhausting the buffer doubles the capacity.
//! numbers.push(4);
//! assert_eq!(numbers.capacity(), 6);
//!
//! // Insertion shifts the suffix one slot to the right.
//! numbers.insert(1, 9);
//! assert_eq!(numbers.as_slice(), &[1, 9, 2, 3, 4]);
//!
//! // Checked access is the only recoverable failure.
//! assert!(numbers.at(99).is_err());
//! ```
//!
//! ```rust
//! use flat_vec::FlatVec;
//!
//! // Pre-allocate capacity without creating any elements.
//! let mut words = FlatVec::<String>::with_capacity(10);
//! assert_eq!(words.len(), 0);
//! assert_eq!(words.capacity(), 10);
//!
//! words.push("hello".to_string());
//! words.extend(["world".to_string()]);
//!
//! // Shrinking operations never release capacity.
//! words.clear();
//! assert_eq!(words.capacity(), 10);
//! ```

mod flat_vec;
mod out_of_range_error;
mod raw_buffer;

pub use flat_vec::FlatVec;
pub use out_of_range_error::OutOfRangeError;
pub(crate) use raw_buffer::*;
