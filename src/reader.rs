use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use zerocopy::{FromBytes, IntoBytes};

use crate::view::load;
use crate::{BufferCursorView, Endian, Result, Scalar};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Decodes UTF-8, replacing invalid sequences with U+FFFD. A leading byte order mark is dropped.
fn decode_utf8(mut bytes: Vec<u8>) -> String {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

impl<'a> BufferCursorView<'a> {
    /// Reads a value of any [`Scalar`] type at `offset`.
    ///
    /// `endian` overrides the view's default byte order for this call only. It has no effect on
    /// single-byte types.
    #[inline(always)]
    pub fn get_value<T: Scalar>(&self, offset: usize, endian: Option<Endian>) -> Result<T> {
        let span = self.span(offset, T::WIDTH)?;
        let mut buf = [0u8; 8];
        let buf = &mut buf[..T::WIDTH];
        load(span, buf);
        Ok(T::decode(buf, self.resolve(endian)))
    }

    /// Reads a value of any [`Scalar`] type at the cursor, then advances the cursor by its width.
    ///
    /// If the value does not fit between the cursor and the end of the view, this fails with
    /// `OutOfBounds` and the cursor does not move.
    #[inline(always)]
    pub fn read_value<T: Scalar>(&mut self, endian: Option<Endian>) -> Result<T> {
        let value = self.get_value(self.cursor(), endian)?;
        self.advance(T::WIDTH);
        Ok(value)
    }

    /// Reads an `i8` at `offset`.
    pub fn get_i8(&self, offset: usize) -> Result<i8> {
        self.get_value(offset, None)
    }

    /// Reads a `u8` at `offset`.
    pub fn get_u8(&self, offset: usize) -> Result<u8> {
        self.get_value(offset, None)
    }

    /// Reads an `i16` at `offset`.
    pub fn get_i16(&self, offset: usize, endian: Option<Endian>) -> Result<i16> {
        self.get_value(offset, endian)
    }

    /// Reads a `u16` at `offset`.
    pub fn get_u16(&self, offset: usize, endian: Option<Endian>) -> Result<u16> {
        self.get_value(offset, endian)
    }

    /// Reads an `i32` at `offset`.
    pub fn get_i32(&self, offset: usize, endian: Option<Endian>) -> Result<i32> {
        self.get_value(offset, endian)
    }

    /// Reads a `u32` at `offset`.
    pub fn get_u32(&self, offset: usize, endian: Option<Endian>) -> Result<u32> {
        self.get_value(offset, endian)
    }

    /// Reads an `i64` at `offset`.
    pub fn get_i64(&self, offset: usize, endian: Option<Endian>) -> Result<i64> {
        self.get_value(offset, endian)
    }

    /// Reads a `u64` at `offset`.
    pub fn get_u64(&self, offset: usize, endian: Option<Endian>) -> Result<u64> {
        self.get_value(offset, endian)
    }

    /// Reads an `f32` at `offset`.
    pub fn get_f32(&self, offset: usize, endian: Option<Endian>) -> Result<f32> {
        self.get_value(offset, endian)
    }

    /// Reads an `f64` at `offset`.
    pub fn get_f64(&self, offset: usize, endian: Option<Endian>) -> Result<f64> {
        self.get_value(offset, endian)
    }

    /// Reads an `i8` at the cursor and advances it by 1.
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_value(None)
    }

    /// Reads a `u8` at the cursor and advances it by 1.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_value(None)
    }

    /// Reads an `i16` at the cursor and advances it by 2.
    pub fn read_i16(&mut self, endian: Option<Endian>) -> Result<i16> {
        self.read_value(endian)
    }

    /// Reads a `u16` at the cursor and advances it by 2.
    pub fn read_u16(&mut self, endian: Option<Endian>) -> Result<u16> {
        self.read_value(endian)
    }

    /// Reads an `i32` at the cursor and advances it by 4.
    pub fn read_i32(&mut self, endian: Option<Endian>) -> Result<i32> {
        self.read_value(endian)
    }

    /// Reads a `u32` at the cursor and advances it by 4.
    pub fn read_u32(&mut self, endian: Option<Endian>) -> Result<u32> {
        self.read_value(endian)
    }

    /// Reads an `i64` at the cursor and advances it by 8.
    pub fn read_i64(&mut self, endian: Option<Endian>) -> Result<i64> {
        self.read_value(endian)
    }

    /// Reads a `u64` at the cursor and advances it by 8.
    pub fn read_u64(&mut self, endian: Option<Endian>) -> Result<u64> {
        self.read_value(endian)
    }

    /// Reads an `f32` at the cursor and advances it by 4.
    pub fn read_f32(&mut self, endian: Option<Endian>) -> Result<f32> {
        self.read_value(endian)
    }

    /// Reads an `f64` at the cursor and advances it by 8.
    pub fn read_f64(&mut self, endian: Option<Endian>) -> Result<f64> {
        self.read_value(endian)
    }

    /// Copies `len` bytes starting at `offset`.
    pub fn get_bytes(&self, offset: usize, len: usize) -> Result<Vec<u8>> {
        Ok(self.span(offset, len)?.iter().map(Cell::get).collect())
    }

    /// Copies `len` bytes starting at the cursor, and advances the cursor by `len`.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let bytes = self.get_bytes(self.cursor(), len)?;
        self.advance(len);
        Ok(bytes)
    }

    /// Reads a plain-old-data value at `offset`, using its in-memory byte representation.
    ///
    /// This is meant for `#[repr(C)]` records whose fields are `u8` or
    /// `zerocopy::byteorder` types, so that the record spells out its own byte order. The
    /// view's default endianness is not applied.
    pub fn get_pod<T: FromBytes + IntoBytes>(&self, offset: usize) -> Result<T> {
        let span = self.span(offset, core::mem::size_of::<T>())?;
        let mut value = T::new_zeroed();
        load(span, value.as_mut_bytes());
        Ok(value)
    }

    /// Reads a plain-old-data value at the cursor and advances the cursor by its size.
    pub fn read_pod<T: FromBytes + IntoBytes>(&mut self) -> Result<T> {
        let value = self.get_pod(self.cursor())?;
        self.advance(core::mem::size_of::<T>());
        Ok(value)
    }

    // Null-terminated strings

    /// Scans for a NUL-terminated string at `offset`. Returns the string bytes (without the
    /// terminator) and the number of bytes consumed (including the terminator, if one was
    /// reached).
    fn scan_stringz(&self, offset: usize, max_length: Option<usize>) -> (Vec<u8>, usize) {
        let available = self.accessible().get(offset..).unwrap_or(&[]);

        let mut bytes = Vec::new();
        let mut consumed = 0;
        for cell in available {
            if max_length.is_some_and(|max| bytes.len() >= max) {
                break;
            }
            consumed += 1;
            match cell.get() {
                0 => break,
                b => bytes.push(b),
            }
        }

        (bytes, consumed)
    }

    /// Reads a NUL-terminated UTF-8 string at `offset`.
    ///
    /// Scanning stops at the first zero byte, at the end of the view, or after `max_length`
    /// bytes have been collected, whichever comes first. The zero byte is not part of the
    /// result. Invalid UTF-8 is replaced with U+FFFD. This never fails; an `offset` at or past
    /// the end of the view gives an empty string.
    pub fn get_stringz(&self, offset: usize, max_length: Option<usize>) -> String {
        decode_utf8(self.get_stringz_bytes(offset, max_length))
    }

    /// Like [`get_stringz`](Self::get_stringz), but returns the raw bytes.
    pub fn get_stringz_bytes(&self, offset: usize, max_length: Option<usize>) -> Vec<u8> {
        self.scan_stringz(offset, max_length).0
    }

    /// Like [`get_stringz`](Self::get_stringz), but returns the bytes as a `BString`, without
    /// validating them.
    #[cfg(feature = "bstr")]
    pub fn get_stringz_bstr(&self, offset: usize, max_length: Option<usize>) -> bstr::BString {
        bstr::BString::from(self.get_stringz_bytes(offset, max_length))
    }

    /// Reads a NUL-terminated UTF-8 string at the cursor.
    ///
    /// The cursor advances past every byte consumed, including the terminator if one was
    /// found. If scanning stopped because `max_length` was reached, the byte after the last
    /// collected one is not consumed.
    pub fn read_stringz(&mut self, max_length: Option<usize>) -> String {
        decode_utf8(self.read_stringz_bytes(max_length))
    }

    /// Like [`read_stringz`](Self::read_stringz), but returns the raw bytes.
    pub fn read_stringz_bytes(&mut self, max_length: Option<usize>) -> Vec<u8> {
        let (bytes, consumed) = self.scan_stringz(self.cursor(), max_length);
        self.advance(consumed);
        bytes
    }

    /// Like [`read_stringz`](Self::read_stringz), but returns the bytes as a `BString`.
    #[cfg(feature = "bstr")]
    pub fn read_stringz_bstr(&mut self, max_length: Option<usize>) -> bstr::BString {
        bstr::BString::from(self.read_stringz_bytes(max_length))
    }

    // Fixed-length strings

    /// The cells of `offset..offset + length`, shortened to whatever part of that range lies
    /// inside the view.
    fn clamp_fixed(&self, offset: usize, length: usize) -> &'a [Cell<u8>] {
        let region = self.accessible();
        let start = offset.min(region.len());
        let end = offset.saturating_add(length).min(region.len());
        &region[start..end]
    }

    /// Reads a fixed-length UTF-8 string of `length` bytes at `offset`.
    ///
    /// Zero bytes are not treated specially; they are decoded like any other byte. If the range
    /// extends past the end of the view, only the bytes that remain are read. This never fails.
    pub fn get_fixed_string(&self, offset: usize, length: usize) -> String {
        decode_utf8(self.get_fixed_bytes(offset, length))
    }

    /// Like [`get_fixed_string`](Self::get_fixed_string), but returns the raw bytes.
    pub fn get_fixed_bytes(&self, offset: usize, length: usize) -> Vec<u8> {
        self.clamp_fixed(offset, length)
            .iter()
            .map(Cell::get)
            .collect()
    }

    /// Like [`get_fixed_string`](Self::get_fixed_string), but returns the bytes as a `BString`.
    #[cfg(feature = "bstr")]
    pub fn get_fixed_bstr(&self, offset: usize, length: usize) -> bstr::BString {
        bstr::BString::from(self.get_fixed_bytes(offset, length))
    }

    /// Reads a fixed-length UTF-8 string of `length` bytes at the cursor.
    ///
    /// The length is clamped to `remaining()`, and the cursor advances by the clamped length,
    /// not by `length`.
    pub fn read_fixed_string(&mut self, length: usize) -> String {
        decode_utf8(self.read_fixed_bytes(length))
    }

    /// Like [`read_fixed_string`](Self::read_fixed_string), but returns the raw bytes.
    pub fn read_fixed_bytes(&mut self, length: usize) -> Vec<u8> {
        let bytes = self.get_fixed_bytes(self.cursor(), length);
        self.advance(bytes.len());
        bytes
    }

    /// Like [`read_fixed_string`](Self::read_fixed_string), but returns the bytes as a `BString`.
    #[cfg(feature = "bstr")]
    pub fn read_fixed_bstr(&mut self, length: usize) -> bstr::BString {
        bstr::BString::from(self.read_fixed_bytes(length))
    }
}
