// Author: Lukas Bower
// Purpose: Sequential byte-cursor traits and buffer-backed implementations.

//! Byte-cursor seam between the header codec and the packet buffer.
//!
//! The codec only needs fixed-width little-endian reads and writes at an
//! advancing cursor; the enclosing simulator owns buffer allocation.
//! `Vec<u8>` serves as the growable writer, while [`SliceWriter`] and
//! [`SliceReader`] cover pre-sized packet regions with bounds checks.

use crate::types::CodecError;

/// Fixed-width write primitives advancing a cursor position.
pub trait WireWriter {
    /// Append one byte.
    fn write_u8(&mut self, value: u8) -> Result<(), CodecError>;
    /// Append a 16-bit value, little-endian.
    fn write_u16(&mut self, value: u16) -> Result<(), CodecError>;
    /// Append a 32-bit value, little-endian.
    fn write_u32(&mut self, value: u32) -> Result<(), CodecError>;
    /// Append a 64-bit value, little-endian.
    fn write_u64(&mut self, value: u64) -> Result<(), CodecError>;
}

/// Fixed-width read primitives advancing a cursor position.
pub trait WireReader {
    /// Consume one byte.
    fn read_u8(&mut self) -> Result<u8, CodecError>;
    /// Consume a 16-bit little-endian value.
    fn read_u16(&mut self) -> Result<u16, CodecError>;
    /// Consume a 32-bit little-endian value.
    fn read_u32(&mut self) -> Result<u32, CodecError>;
    /// Consume a 64-bit little-endian value.
    fn read_u64(&mut self) -> Result<u64, CodecError>;
}

impl WireWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.push(value);
        Ok(())
    }

    fn write_u16(&mut self, value: u16) -> Result<(), CodecError> {
        self.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn write_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn write_u64(&mut self, value: u64) -> Result<(), CodecError> {
        self.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }
}

/// Bounded writer over a pre-sized packet region.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    /// Wrap a mutable byte region; writing starts at its beginning.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.pos
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let have = self.buf.len() - self.pos;
        if bytes.len() > have {
            return Err(CodecError::Overflow {
                need: bytes.len(),
                have,
            });
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

impl WireWriter for SliceWriter<'_> {
    fn write_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.put(&[value])
    }

    fn write_u16(&mut self, value: u16) -> Result<(), CodecError> {
        self.put(&value.to_le_bytes())
    }

    fn write_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.put(&value.to_le_bytes())
    }

    fn write_u64(&mut self, value: u64) -> Result<(), CodecError> {
        self.put(&value.to_le_bytes())
    }
}

/// Reader over a received packet region.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Wrap a byte region; reading starts at its beginning.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, out: &mut [u8]) -> Result<(), CodecError> {
        let have = self.remaining();
        if out.len() > have {
            return Err(CodecError::Truncated {
                need: out.len(),
                have,
            });
        }
        out.copy_from_slice(&self.buf[self.pos..self.pos + out.len()]);
        self.pos += out.len();
        Ok(())
    }
}

impl WireReader for SliceReader<'_> {
    fn read_u8(&mut self) -> Result<u8, CodecError> {
        let mut buf = [0u8; 1];
        self.take(&mut buf)?;
        Ok(buf[0])
    }

    fn read_u16(&mut self) -> Result<u16, CodecError> {
        let mut buf = [0u8; 2];
        self.take(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut buf = [0u8; 4];
        self.take(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        let mut buf = [0u8; 8];
        self.take(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}
