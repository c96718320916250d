//! Fixed-width field writers for the DHCPv4 header.

use crate::buffer::WireBuffer;
use crate::error::Result;
use std::net::Ipv4Addr;

/// Write a 4-byte address, or four zero bytes when absent.
pub(crate) fn write_address(buf: &mut WireBuffer, address: Option<Ipv4Addr>) -> Result<()> {
    match address {
        Some(addr) => buf.put_slice(&addr.octets()),
        None => buf.put_zeros(4),
    }
}

/// Write exactly `len` bytes: copy up to `len` bytes from `bytes`, then
/// zero-fill. Input beyond `len` is dropped.
pub(crate) fn write_bytes(buf: &mut WireBuffer, bytes: Option<&[u8]>, len: usize) -> Result<()> {
    buf.ensure(len)?;
    let copied = bytes.map_or(0, |b| b.len().min(len));
    if let Some(bytes) = bytes {
        buf.put_slice(&bytes[..copied])?;
    }
    buf.put_zeros(len - copied)
}

/// Write a string as Latin-1 into a field of exactly `len` bytes, with the
/// same pad/truncate rule as [`write_bytes`]. Characters outside Latin-1
/// become `?`.
pub(crate) fn write_string(buf: &mut WireBuffer, string: Option<&str>, len: usize) -> Result<()> {
    let bytes: Vec<u8> = string
        .unwrap_or_default()
        .chars()
        .take(len)
        .map(|c| u8::try_from(c).unwrap_or(b'?'))
        .collect();
    write_bytes(buf, Some(bytes.as_slice()), len)
}
