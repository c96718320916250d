//! DHCPv6 message encoder (RFC 3315 §6, §22.1).

use bytes::Bytes;
use tracing::debug;

use super::{Dhcp6Message, Dhcp6Options};
use crate::buffer::WireBuffer;
use crate::error::{Error, Result};

/// `msg-type` plus the 3-byte `transaction-id`.
pub const HEADER_LEN: usize = 4;

/// Stateless DHCPv6 encoder. Copies are free and may be shared across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dhcp6MessageEncoder;

impl Dhcp6MessageEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Exact number of bytes [`encode`](Self::encode) writes for `message`.
    pub fn encoded_len(message: &Dhcp6Message) -> usize {
        HEADER_LEN + Self::options_len(&message.options)
    }

    pub fn options_len(options: &Dhcp6Options) -> usize {
        options.iter().map(|o| 4 + o.data().len()).sum()
    }

    /// Fail with [`Error::OptionTooLarge`] if any payload overflows the
    /// 16-bit length field.
    fn check_lengths(options: &Dhcp6Options) -> Result<()> {
        for option in options {
            if u16::try_from(option.data().len()).is_err() {
                return Err(Error::OptionTooLarge {
                    tag: option.tag(),
                    len: option.data().len(),
                });
            }
        }
        Ok(())
    }

    /// Encode `message` at the buffer's current position.
    ///
    /// # Errors
    ///
    /// [`Error::OptionTooLarge`] if an option payload exceeds 65535 bytes,
    /// or [`Error::Encode`] wrapping [`Error::CapacityExceeded`] if the
    /// buffer is too small. Both are detected before the first byte is
    /// written, so the buffer is unchanged on failure.
    pub fn encode(&self, buf: &mut WireBuffer, message: &Dhcp6Message) -> Result<()> {
        Self::check_lengths(&message.options)?;

        let len = Self::encoded_len(message);
        let result = buf
            .ensure(len)
            .and_then(|()| self.write_message(buf, message));
        if let Err(e) = result {
            return Err(Error::encoding(message, &*buf, e));
        }

        debug!(
            "Encoded DHCPv6 message xid=0x{:06x} ({} bytes)",
            message.transaction_id & 0x00FF_FFFF,
            len
        );
        Ok(())
    }

    fn write_message(&self, buf: &mut WireBuffer, message: &Dhcp6Message) -> Result<()> {
        buf.put_u8(message.message_type.code())?;
        let xid = message.transaction_id;
        buf.put_u8((xid >> 16) as u8)?;
        buf.put_u8((xid >> 8) as u8)?;
        buf.put_u8(xid as u8)?;
        self.encode_options(&message.options, buf)
    }

    /// Write every option as `tag(2) len(2) data`. No terminator follows.
    pub fn encode_options(&self, options: &Dhcp6Options, buf: &mut WireBuffer) -> Result<()> {
        Self::check_lengths(options)?;
        buf.ensure(Self::options_len(options))?;

        for option in options {
            let len = u16::try_from(option.data().len()).map_err(|_| Error::OptionTooLarge {
                tag: option.tag(),
                len: option.data().len(),
            })?;
            buf.put_u16(option.tag())?;
            buf.put_u16(len)?;
            buf.put_slice(option.data())?;
        }
        Ok(())
    }
}

/// Encode `message` into a fresh buffer of at most `limit` bytes.
pub fn encode_v6(message: &Dhcp6Message, limit: usize) -> Result<Bytes> {
    let mut buf = WireBuffer::with_limit(limit);
    Dhcp6MessageEncoder::new().encode(&mut buf, message)?;
    Ok(buf.freeze())
}
