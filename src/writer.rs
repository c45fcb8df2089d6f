use zerocopy::{Immutable, IntoBytes};

use crate::view::store;
use crate::{BufferCursorView, Endian, Result, Scalar};

impl BufferCursorView<'_> {
    /// Writes a value of any [`Scalar`] type at `offset`.
    ///
    /// Takes `&self`: the storage is shared, so writes are visible through every view of it.
    #[inline(always)]
    pub fn set_value<T: Scalar>(
        &self,
        offset: usize,
        value: T,
        endian: Option<Endian>,
    ) -> Result<()> {
        let span = self.span(offset, T::WIDTH)?;
        let mut buf = [0u8; 8];
        let buf = &mut buf[..T::WIDTH];
        value.encode(self.resolve(endian), buf);
        store(span, buf);
        Ok(())
    }

    /// Writes a value of any [`Scalar`] type at the cursor, then advances the cursor by its
    /// width.
    #[inline(always)]
    pub fn write_value<T: Scalar>(&mut self, value: T, endian: Option<Endian>) -> Result<()> {
        self.set_value(self.cursor(), value, endian)?;
        self.advance(T::WIDTH);
        Ok(())
    }

    /// Writes an `i8` at `offset`.
    pub fn set_i8(&self, offset: usize, value: i8) -> Result<()> {
        self.set_value(offset, value, None)
    }

    /// Writes a `u8` at `offset`.
    pub fn set_u8(&self, offset: usize, value: u8) -> Result<()> {
        self.set_value(offset, value, None)
    }

    /// Writes an `i16` at `offset`.
    pub fn set_i16(&self, offset: usize, value: i16, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes a `u16` at `offset`.
    pub fn set_u16(&self, offset: usize, value: u16, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes an `i32` at `offset`.
    pub fn set_i32(&self, offset: usize, value: i32, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes a `u32` at `offset`.
    pub fn set_u32(&self, offset: usize, value: u32, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes an `i64` at `offset`.
    pub fn set_i64(&self, offset: usize, value: i64, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes a `u64` at `offset`.
    pub fn set_u64(&self, offset: usize, value: u64, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes an `f32` at `offset`.
    pub fn set_f32(&self, offset: usize, value: f32, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes an `f64` at `offset`.
    pub fn set_f64(&self, offset: usize, value: f64, endian: Option<Endian>) -> Result<()> {
        self.set_value(offset, value, endian)
    }

    /// Writes an `i8` at the cursor and advances it by 1.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_value(value, None)
    }

    /// Writes a `u8` at the cursor and advances it by 1.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_value(value, None)
    }

    /// Writes an `i16` at the cursor and advances it by 2.
    pub fn write_i16(&mut self, value: i16, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes a `u16` at the cursor and advances it by 2.
    pub fn write_u16(&mut self, value: u16, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes an `i32` at the cursor and advances it by 4.
    pub fn write_i32(&mut self, value: i32, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes a `u32` at the cursor and advances it by 4.
    pub fn write_u32(&mut self, value: u32, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes an `i64` at the cursor and advances it by 8.
    pub fn write_i64(&mut self, value: i64, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes a `u64` at the cursor and advances it by 8.
    pub fn write_u64(&mut self, value: u64, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes an `f32` at the cursor and advances it by 4.
    pub fn write_f32(&mut self, value: f32, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes an `f64` at the cursor and advances it by 8.
    pub fn write_f64(&mut self, value: f64, endian: Option<Endian>) -> Result<()> {
        self.write_value(value, endian)
    }

    /// Writes `bytes` starting at `offset`.
    pub fn set_bytes(&self, offset: usize, bytes: &[u8]) -> Result<()> {
        store(self.span(offset, bytes.len())?, bytes);
        Ok(())
    }

    /// Writes `bytes` at the cursor, and advances the cursor by `bytes.len()`.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.set_bytes(self.cursor(), bytes)?;
        self.advance(bytes.len());
        Ok(())
    }

    /// Writes the in-memory byte representation of `value` at `offset`.
    pub fn set_pod<T: IntoBytes + Immutable>(&self, offset: usize, value: &T) -> Result<()> {
        self.set_bytes(offset, value.as_bytes())
    }

    /// Writes the in-memory byte representation of `value` at the cursor, and advances the
    /// cursor by its size.
    pub fn write_pod<T: IntoBytes + Immutable>(&mut self, value: &T) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    // Null-terminated strings

    /// Writes `value` as UTF-8 followed by a single zero byte, starting at `offset`.
    ///
    /// Needs `value.len() + 1` bytes. If they do not fit, nothing is written.
    pub fn set_stringz(&self, offset: usize, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let span = self.span(offset, bytes.len() + 1)?;
        let (body, terminator) = span.split_at(bytes.len());
        store(body, bytes);
        store(terminator, &[0]);
        Ok(())
    }

    /// Writes `value` as UTF-8 followed by a zero byte at the cursor, and advances the cursor
    /// past the terminator.
    pub fn write_stringz(&mut self, value: &str) -> Result<()> {
        self.set_stringz(self.cursor(), value)?;
        self.advance(value.len() + 1);
        Ok(())
    }

    // Fixed-length strings

    /// Writes `value` as UTF-8 into a field of exactly `length` bytes at `offset`.
    ///
    /// A shorter value is padded with zero bytes. A longer value is truncated to `length`
    /// bytes, which may cut a multi-byte character in half. A `length` of 0 writes nothing.
    /// If the field does not fit in the view, nothing is written.
    pub fn set_fixed_string(&self, offset: usize, value: &str, length: usize) -> Result<()> {
        if length == 0 {
            return Ok(());
        }

        let span = self.span(offset, length)?;
        let bytes = value.as_bytes();
        let n = bytes.len().min(length);
        let (body, padding) = span.split_at(n);
        store(body, &bytes[..n]);
        for cell in padding {
            cell.set(0);
        }
        Ok(())
    }

    /// Writes `value` into a fixed-length field of `length` bytes at the cursor, and advances
    /// the cursor by `length`.
    pub fn write_fixed_string(&mut self, value: &str, length: usize) -> Result<()> {
        self.set_fixed_string(self.cursor(), value, length)?;
        self.advance(length);
        Ok(())
    }
}
