use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::{Endian, Result, ViewError};

/// A typed, cursor-augmented view over a fixed-size region of shared byte storage.
///
/// The view does not own its storage. It borrows a slice of `Cell<u8>`, so any number of views
/// (for example, views produced by [`slice`](Self::slice)) can read and write the same bytes.
/// Writes made through one view are immediately visible through every other view of the same
/// storage. Because the storage is made of `Cell`s, views are neither `Send` nor `Sync`; callers
/// that need to share data across threads must copy it out or add their own synchronization.
///
/// There are two ways to address the region:
///
/// * Offset-based methods (`get_*`, `set_*`) take a position relative to the start of the view.
///   They never read or modify the cursor.
/// * Cursor-based methods (`read_*`, `write_*`) operate at the cursor, then advance it by the
///   number of bytes consumed or produced.
///
/// Fixed-width accesses that do not fit in the view fail with [`ViewError::OutOfBounds`]. A
/// failed access writes nothing and leaves the cursor where it was. Cursor movement and
/// fixed-length string reads never fail; they clamp to the region instead.
#[derive(Clone)]
pub struct BufferCursorView<'a> {
    storage: &'a [Cell<u8>],
    byte_offset: usize,
    byte_length: usize,
    endian: Endian,
    cursor: usize,
}

impl<'a> BufferCursorView<'a> {
    /// Creates a little-endian view over all of `storage`.
    pub fn new(storage: &'a [Cell<u8>]) -> Self {
        Self {
            storage,
            byte_offset: 0,
            byte_length: storage.len(),
            endian: Endian::Little,
            cursor: 0,
        }
    }

    /// Creates a little-endian view over all of `bytes`.
    ///
    /// The mutable borrow is converted into shared `Cell` storage, so views derived from this
    /// one with [`slice`](Self::slice) may be used alongside it.
    pub fn from_bytes_mut(bytes: &'a mut [u8]) -> Self {
        Self::new(Cell::from_mut(bytes).as_slice_of_cells())
    }

    /// Creates a view over `byte_length` bytes of `storage`, starting at `byte_offset`.
    ///
    /// Fails with `OutOfBounds` if the region does not fit in `storage`.
    pub fn with_region(
        storage: &'a [Cell<u8>],
        byte_offset: usize,
        byte_length: usize,
        little_endian: bool,
    ) -> Result<Self> {
        let fits = byte_offset
            .checked_add(byte_length)
            .is_some_and(|end| end <= storage.len());
        if !fits {
            return Err(ViewError::OutOfBounds {
                offset: byte_offset,
                width: byte_length,
                length: storage.len(),
            });
        }

        Ok(Self {
            storage,
            byte_offset,
            byte_length,
            endian: Endian::from_little(little_endian),
            cursor: 0,
        })
    }

    /// Offset of the first byte of the view within its storage.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Length of the view, in bytes.
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Length of the view, in bytes. Same as `byte_length`.
    pub fn len(&self) -> usize {
        self.byte_length
    }

    /// Returns true if the view covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.byte_length == 0
    }

    // Endianness

    /// Sets the byte order used by multi-byte operations that do not pass an override.
    pub fn set_endianness(&mut self, little_endian: bool) {
        self.endian = Endian::from_little(little_endian);
    }

    /// Returns true if the default byte order is little-endian.
    pub fn is_little_endian(&self) -> bool {
        self.endian.is_little()
    }

    /// Returns the default byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Picks the per-call override if there is one, otherwise the current default.
    #[inline(always)]
    pub(crate) fn resolve(&self, endian: Option<Endian>) -> Endian {
        endian.unwrap_or(self.endian)
    }

    // Cursor

    /// Returns the cursor position. Always in `0..=byte_length()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of bytes between the cursor and the end of the view.
    pub fn remaining(&self) -> usize {
        self.byte_length - self.cursor
    }

    /// Moves the cursor to `position`, clamped to `0..=byte_length()`.
    pub fn set_cursor(&mut self, position: isize) {
        self.cursor = usize::try_from(position).map_or(0, |p| p.min(self.byte_length));
    }

    /// Moves the cursor by `delta` bytes. Saturates at either end of the view.
    pub fn move_cursor(&mut self, delta: isize) {
        let moved = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs())
        };
        self.cursor = moved.min(self.byte_length);
    }

    /// Moves the cursor back to the start of the view.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Advances the cursor after a successful access of `n` bytes at the cursor.
    #[inline(always)]
    pub(crate) fn advance(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n).min(self.byte_length);
    }

    // Region access

    /// Returns the `width` cells at view-relative `offset`, or `OutOfBounds` if they do not lie
    /// inside both the view and its storage.
    pub(crate) fn span(&self, offset: usize, width: usize) -> Result<&'a [Cell<u8>]> {
        let span = offset
            .checked_add(width)
            .filter(|&end| end <= self.byte_length)
            .and_then(|end| {
                let start = self.byte_offset.checked_add(offset)?;
                let end = self.byte_offset.checked_add(end)?;
                self.storage.get(start..end)
            });

        span.ok_or_else(|| self.out_of_bounds(offset, width))
    }

    /// The part of the region that is actually backed by storage. For views that were
    /// validated at construction, this is the whole region.
    pub(crate) fn accessible(&self) -> &'a [Cell<u8>] {
        let len = self.storage.len();
        let start = self.byte_offset.min(len);
        let end = self.byte_offset.saturating_add(self.byte_length).min(len);
        &self.storage[start..end]
    }

    fn out_of_bounds(&self, offset: usize, width: usize) -> ViewError {
        log::trace!(
            "rejected {width}-byte access at offset {offset} (view offset {}, length {})",
            self.byte_offset,
            self.byte_length
        );
        ViewError::OutOfBounds {
            offset,
            width,
            length: self.byte_length,
        }
    }

    // Buffer helpers

    /// Returns the whole backing storage, including bytes outside this view.
    pub fn buffer_ref(&self) -> &'a [Cell<u8>] {
        self.storage
    }

    /// Returns the cells of this view's region, `byte_offset()..byte_offset() + byte_length()`.
    ///
    /// For a view created by `slice` that extends past the end of the storage, the returned
    /// slice stops at the end of the storage.
    pub fn buffer_view(&self) -> &'a [Cell<u8>] {
        self.accessible()
    }

    /// Copies the bytes of the region into a new `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.accessible().iter().map(Cell::get).collect()
    }

    /// Copies `length` bytes from `source` (starting at `source_offset` in `source`) into this
    /// view (starting at `target_offset`). Offsets are relative to each view's start.
    ///
    /// Neither cursor is touched. Overlapping ranges within the same storage are handled as if
    /// the source bytes were first copied to a temporary buffer. If either range is out of
    /// bounds, nothing is copied.
    pub fn copy_from(
        &self,
        source: &BufferCursorView<'_>,
        source_offset: usize,
        target_offset: usize,
        length: usize,
    ) -> Result<()> {
        let src = source.span(source_offset, length)?;
        let dst = self.span(target_offset, length)?;

        let staged: Vec<u8> = src.iter().map(Cell::get).collect();
        store(dst, &staged);

        log::trace!(
            "copied {length} bytes from storage offset {} to storage offset {}",
            source.byte_offset + source_offset,
            self.byte_offset + target_offset
        );
        Ok(())
    }

    /// Copies `length` bytes from this view (starting at `source_offset`) into `target`
    /// (starting at `target_offset`). Same rules as [`copy_from`](Self::copy_from).
    pub fn copy_to(
        &self,
        target: &BufferCursorView<'_>,
        target_offset: usize,
        source_offset: usize,
        length: usize,
    ) -> Result<()> {
        target.copy_from(self, source_offset, target_offset, length)
    }

    /// Creates a view over `sub_length` bytes of the same storage, starting `sub_offset` bytes
    /// into this view.
    ///
    /// The new view inherits the current default endianness and starts with its cursor at 0.
    /// The range is not validated here; an out-of-range slice reports `OutOfBounds` from its
    /// fixed-width accessors.
    pub fn slice(&self, sub_offset: usize, sub_length: usize) -> BufferCursorView<'a> {
        log::trace!(
            "slicing {sub_length} bytes at offset {sub_offset} of view at {}",
            self.byte_offset
        );
        BufferCursorView {
            storage: self.storage,
            byte_offset: self.byte_offset.saturating_add(sub_offset),
            byte_length: sub_length,
            endian: self.endian,
            cursor: 0,
        }
    }
}

impl fmt::Debug for BufferCursorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferCursorView")
            .field("byte_offset", &self.byte_offset)
            .field("byte_length", &self.byte_length)
            .field("cursor", &self.cursor)
            .field("endian", &self.endian)
            .finish()
    }
}

#[inline(always)]
pub(crate) fn load(src: &[Cell<u8>], dst: &mut [u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = s.get();
    }
}

#[inline(always)]
pub(crate) fn store(dst: &[Cell<u8>], src: &[u8]) {
    for (d, s) in dst.iter().zip(src) {
        d.set(*s);
    }
}
