//! Low-level byte sink: the token writer.
//!
//! Counts every byte written so the running position can serve as the
//! authoritative offset source for the cross-reference table.

use std::io::{self, Write};

/// A byte sink that tracks the number of bytes written so far.
pub struct TokenSink<W: Write> {
    writer: W,
    position: u64,
}

impl<W: Write> TokenSink<W> {
    /// Wraps a writer, starting the position counter at zero.
    pub fn new(writer: W) -> Self {
        Self { writer, position: 0 }
    }

    /// Returns the current byte position (the offset the next write will start at).
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Writes raw bytes and advances the position counter.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Writes a UTF-8 string.
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Writes the PDF header: the version comment followed by a binary marker line
    /// of four bytes, each with the high bit set.
    pub fn write_header(&mut self, version: &str) -> io::Result<()> {
        self.write_str(&format!("%PDF-{}\n", version))?;
        self.write_bytes(b"%\xE2\xE3\xCF\xD3\n")
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
