//! `std::io` adapters. The cursor is the stream position.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::view::{load, store};
use crate::BufferCursorView;

fn saturate(n: i64) -> isize {
    isize::try_from(n).unwrap_or(if n < 0 { isize::MIN } else { isize::MAX })
}

/// Reads up to `remaining()` bytes. Returns `Ok(0)` at the end of the view.
impl Read for BufferCursorView<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.accessible().get(self.cursor()..).unwrap_or(&[]);
        let n = buf.len().min(available.len());
        load(&available[..n], &mut buf[..n]);
        self.advance(n);
        Ok(n)
    }
}

/// Writes up to `remaining()` bytes. Returns `Ok(0)` once the view is full, so `write_all`
/// reports `WriteZero` rather than growing anything.
impl Write for BufferCursorView<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let available = self.accessible().get(self.cursor()..).unwrap_or(&[]);
        let n = buf.len().min(available.len());
        store(&available[..n], &buf[..n]);
        self.advance(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Seeking clamps to `0..=byte_length()`, the same as `set_cursor`; it never fails.
impl Seek for BufferCursorView<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(p) => self.set_cursor(isize::try_from(p).unwrap_or(isize::MAX)),
            SeekFrom::End(delta) => {
                self.set_cursor(isize::MAX);
                self.move_cursor(saturate(delta));
            }
            SeekFrom::Current(delta) => self.move_cursor(saturate(delta)),
        }
        Ok(self.cursor() as u64)
    }
}
