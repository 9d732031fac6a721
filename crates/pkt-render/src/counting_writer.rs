#![forbid(unsafe_code)]

//! Byte-counting writer.
//!
//! The painter writes through a [`CountingWriter`] so callers and tests can
//! see how many bytes a repaint cost. A repaint of an unchanged model must
//! cost zero.
//!
//! ```
//! use pkt_render::counting_writer::CountingWriter;
//! use std::io::Write;
//!
//! let mut writer = CountingWriter::new(Vec::new());
//! writer.write_all(b"\x1b[3C").unwrap();
//! assert_eq!(writer.bytes_written(), 4);
//! writer.reset_counter();
//! assert_eq!(writer.bytes_written(), 0);
//! ```

use std::io::{self, Write};

#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    bytes_written: u64,
}

impl<W> CountingWriter<W> {
    #[inline]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Bytes written since creation or the last reset.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[inline]
    pub fn reset_counter(&mut self) {
        self.bytes_written = 0;
    }

    #[inline]
    pub fn inner(&self) -> &W {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.bytes_written += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
