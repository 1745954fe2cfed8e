use thiserror::Error;

/// The error returned by checked indexed access when the requested position is not a live
/// element.
///
/// This is the only recoverable failure in the crate. All other misuse of the API (out-of-range
/// unchecked indexing, popping from an empty container, ...) is a caller contract violation and
/// panics instead.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("index {index} is out of range for a container of length {len}")]
#[non_exhaustive]
pub struct OutOfRangeError {
    /// The position that was requested.
    pub index: usize,

    /// The number of live elements at the time of the request.
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(OutOfRangeError: Send, Sync, Debug);

    #[test]
    fn message_names_index_and_length() {
        let error = OutOfRangeError { index: 5, len: 3 };

        assert_eq!(
            error.to_string(),
            "index 5 is out of range for a container of length 3"
        );
    }
}
