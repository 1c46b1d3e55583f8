//! Byte cursors for reading and writing fixed-layout frames.
//!
//! [`FrameReader`] walks an immutable byte slice. Every read copies
//! exactly the field's bytes (`offset..offset + width`) into a fixed-size
//! array before interpreting them, so results never depend on how the
//! buffer is aligned or on the host's endianness. A read that would run
//! past the end of the frame fails with [`ProtocolError::Truncated`]
//! instead of yielding a partial value.

use crate::ProtocolError;

/// A forward-only reader over one frame.
#[derive(Debug, Clone)]
pub struct FrameReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    /// Starts reading at offset 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Reads the next `N` bytes into an array and advances.
    pub fn read_array<const N: usize>(
        &mut self,
    ) -> Result<[u8; N], ProtocolError> {
        let bytes = self.read_bytes(N)?;
        let mut raw = [0_u8; N];
        raw.copy_from_slice(bytes);
        Ok(raw)
    }

    /// Borrows the next `len` bytes and advances.
    pub fn read_bytes(
        &mut self,
        len: usize,
    ) -> Result<&'a [u8], ProtocolError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(ProtocolError::Truncated {
                offset: self.pos,
                needed: len,
                len: self.buf.len(),
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ProtocolError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_i16_le(&mut self) -> Result<i16, ProtocolError> {
        self.read_array().map(i16::from_le_bytes)
    }
}

/// An append-only writer that builds one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    /// Pre-allocates room for a frame of `len` bytes.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(len),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i16_le(&mut self, value: i16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Returns the finished frame.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
