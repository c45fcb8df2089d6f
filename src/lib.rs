//! Random-access and cursor-based typed reads and writes over a byte region.
//!
//! A [`BufferCursorView`] borrows a fixed-size region of shared storage and exposes two ways of
//! addressing it:
//!
//! * absolute offsets (`get_*` / `set_*`), which never look at or move the cursor, and
//! * an internal cursor (`read_*` / `write_*`), which advances by the number of bytes consumed.
//!
//! Multi-byte values use the view's default [`Endian`] unless the call passes an override.
//!
//! ```
//! use buffer_cursor_view::{BufferCursorView, Endian};
//!
//! let mut storage = [0u8; 16];
//! let mut view = BufferCursorView::from_bytes_mut(&mut storage);
//! view.write_u16(0xaa55, None).unwrap();
//! view.write_u32(7, Some(Endian::Big)).unwrap();
//! view.write_stringz("hi").unwrap();
//! assert_eq!(view.cursor(), 9);
//! assert_eq!(view.get_u32(2, Some(Endian::Big)), Ok(7));
//! assert_eq!(view.get_stringz(6, None), "hi");
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod endian;
mod error;
#[cfg(feature = "std")]
mod io;
mod reader;
mod view;
mod writer;


pub use endian::{Endian, Scalar};
pub use error::{Result, ViewError};
pub use view::BufferCursorView;
