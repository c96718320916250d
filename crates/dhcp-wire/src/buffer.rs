//! Bounded output buffer used by the encoders.
//!
//! [`WireBuffer`] grows on demand up to a fixed limit and tracks its write
//! position. Every write is all-or-nothing: a write that would cross the
//! limit fails with [`Error::CapacityExceeded`] and leaves the buffer as
//! it was.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};

/// Default limit, one Ethernet MTU.
pub const DEFAULT_LIMIT: usize = 1500;

/// A position-tracked byte buffer with a hard capacity limit.
#[derive(Debug, Clone)]
pub struct WireBuffer {
    buf: BytesMut,
    limit: usize,
}

impl WireBuffer {
    /// Create an empty buffer that accepts at most `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(limit.min(DEFAULT_LIMIT)),
            limit,
        }
    }

    /// Current write position (number of bytes written so far).
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of bytes that can still be written.
    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Fail unless at least `needed` more bytes fit.
    pub fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(Error::CapacityExceeded { needed, remaining });
        }
        Ok(())
    }

    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.ensure(1)?;
        self.buf.put_u8(value);
        Ok(())
    }

    /// Write a 16-bit value in network byte order.
    pub fn put_u16(&mut self, value: u16) -> Result<()> {
        self.ensure(2)?;
        self.buf.put_u16(value);
        Ok(())
    }

    /// Write a 32-bit value in network byte order.
    pub fn put_u32(&mut self, value: u32) -> Result<()> {
        self.ensure(4)?;
        self.buf.put_u32(value);
        Ok(())
    }

    pub fn put_slice(&mut self, src: &[u8]) -> Result<()> {
        self.ensure(src.len())?;
        self.buf.put_slice(src);
        Ok(())
    }

    /// Write `count` zero bytes.
    pub fn put_zeros(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.buf.put_bytes(0, count);
        Ok(())
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the buffer, returning the written bytes.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Reset the write position to zero, keeping the limit.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for WireBuffer {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl fmt::Display for WireBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WireBuffer(position={}, limit={})",
            self.position(),
            self.limit
        )
    }
}
