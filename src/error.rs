/// Result type for fallible [`BufferCursorView`](crate::BufferCursorView) operations.
pub type Result<T> = core::result::Result<T, ViewError>;

/// Error type for `BufferCursorView`
#[derive(thiserror::Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ViewError {
    /// An access of `width` bytes at `offset` does not fit inside the view.
    ///
    /// `offset` is relative to the start of the view and `length` is the length of the view.
    /// Views created by `slice` are not validated up front, so this error is also reported when
    /// the view itself extends past the end of its backing storage.
    ///
    /// Operations that fail with this error do not write anything and do not move the cursor.
    #[error("access of {width} bytes at offset {offset} is out of bounds for a view of {length} bytes")]
    OutOfBounds {
        /// View-relative offset of the rejected access.
        offset: usize,
        /// Number of bytes the access needed.
        width: usize,
        /// Length of the view, in bytes.
        length: usize,
    },
}
