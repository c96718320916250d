//! DHCPv4 message encoder (RFC 2131, RFC 3396).

use bytes::Bytes;
use tracing::{debug, trace};

use super::fields::{write_address, write_bytes, write_string};
use super::option::tags;
use super::{DhcpMessage, DhcpOption, DhcpOptions};
use crate::buffer::WireBuffer;
use crate::error::{Error, Result};

/// Length of the fixed header, `op` through `file`.
pub const HEADER_LEN: usize = 236;
pub const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

const CHADDR_LEN: usize = 16;
const SNAME_LEN: usize = 64;
const FILE_LEN: usize = 128;
/// Largest payload one option entry can carry.
const MAX_CHUNK: usize = 0xFF;

/// Bytes one option occupies on the wire, counting continuation entries.
fn option_wire_len(data_len: usize) -> usize {
    let entries = data_len.div_ceil(MAX_CHUNK).max(1);
    entries * 2 + data_len
}

/// Stateless DHCPv4 encoder. Copies are free and may be shared across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DhcpMessageEncoder;

impl DhcpMessageEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Exact number of bytes [`encode`](Self::encode) writes for `message`,
    /// including the option 53 entry it injects.
    pub fn encoded_len(message: &DhcpMessage) -> usize {
        let injected = message.message_type.is_some();
        let options: usize = message
            .options
            .iter()
            .filter(|o| !(injected && o.tag() == tags::MESSAGE_TYPE))
            .map(|o| option_wire_len(o.data().len()))
            .sum();
        let message_type = if injected { option_wire_len(1) } else { 0 };
        HEADER_LEN + MAGIC_COOKIE.len() + options + message_type + 1
    }

    /// Exact number of bytes [`encode_options`](Self::encode_options) writes.
    pub fn options_len(options: &DhcpOptions) -> usize {
        let body: usize = options.iter().map(|o| option_wire_len(o.data().len())).sum();
        MAGIC_COOKIE.len() + body + 1
    }

    /// Encode `message` at the buffer's current position.
    ///
    /// If the message carries a message type it is first stored in
    /// `message.options` as option 53, replacing any earlier option 53, so
    /// the caller's option list is modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] wrapping [`Error::CapacityExceeded`] when
    /// the buffer cannot hold the whole message. Capacity is checked before
    /// the first byte is written, so the buffer is unchanged on failure.
    pub fn encode(&self, buf: &mut WireBuffer, message: &mut DhcpMessage) -> Result<()> {
        if let Some(mt) = message.message_type {
            message.options.set(DhcpOption::message_type(mt));
        }

        let len = Self::encoded_len(message);
        let result = buf
            .ensure(len)
            .and_then(|()| self.write_message(buf, message));
        if let Err(e) = result {
            return Err(Error::encoding(&*message, &*buf, e));
        }

        debug!(
            "Encoded DHCPv4 message xid=0x{:08x} ({} bytes)",
            message.transaction_id, len
        );
        Ok(())
    }

    fn write_message(&self, buf: &mut WireBuffer, message: &DhcpMessage) -> Result<()> {
        let hardware = message.hardware_address.as_ref();

        buf.put_u8(message.op)?;
        buf.put_u8(hardware.map_or(0, |hw| hw.hardware_type))?;
        buf.put_u8(hardware.map_or(0, |hw| hw.length))?;
        buf.put_u8(message.hop_count)?;
        buf.put_u32(message.transaction_id)?;
        // secs is 16 bits wide on the wire
        buf.put_u16(message.seconds as u16)?;
        buf.put_u16(message.flags)?;

        write_address(buf, message.current_client_address)?;
        write_address(buf, message.assigned_client_address)?;
        write_address(buf, message.next_server_address)?;
        write_address(buf, message.relay_agent_address)?;

        write_bytes(buf, hardware.map(|hw| hw.as_bytes()), CHADDR_LEN)?;
        write_string(buf, message.server_hostname.as_deref(), SNAME_LEN)?;
        write_string(buf, message.boot_file_name.as_deref(), FILE_LEN)?;

        self.encode_options(&message.options, buf)
    }

    /// Write the magic cookie, every option in order and the end option.
    ///
    /// Payloads longer than 255 bytes are split into consecutive entries
    /// with the same tag (RFC 3396). An empty payload produces a single
    /// zero-length entry.
    pub fn encode_options(&self, options: &DhcpOptions, buf: &mut WireBuffer) -> Result<()> {
        buf.ensure(Self::options_len(options))?;
        buf.put_slice(&MAGIC_COOKIE)?;

        for option in options {
            let tag = option.tag();
            let data = option.data();
            if data.is_empty() {
                buf.put_u8(tag)?;
                buf.put_u8(0)?;
                continue;
            }

            for chunk in data.chunks(MAX_CHUNK) {
                buf.put_u8(tag)?;
                buf.put_u8(chunk.len() as u8)?;
                buf.put_slice(chunk)?;
            }
            if data.len() > MAX_CHUNK {
                trace!(
                    "Split option {} ({} bytes) into {} entries",
                    tag,
                    data.len(),
                    data.len().div_ceil(MAX_CHUNK)
                );
            }
        }

        buf.put_u8(tags::END)
    }
}

/// Encode `message` into a fresh buffer of at most `limit` bytes.
pub fn encode_v4(message: &mut DhcpMessage, limit: usize) -> Result<Bytes> {
    let mut buf = WireBuffer::with_limit(limit);
    DhcpMessageEncoder::new().encode(&mut buf, message)?;
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_discover_message, pattern};
    use crate::v4::{MessageType, BOOTREPLY};
    use crate::HardwareAddress;
    use std::net::Ipv4Addr;

    const CHADDR: std::ops::Range<usize> = 28..44;
    const SNAME: std::ops::Range<usize> = 44..108;
    const FILE: std::ops::Range<usize> = 108..236;

    fn encode(message: &mut DhcpMessage) -> Vec<u8> {
        encode_v4(message, 4096).unwrap().to_vec()
    }

    #[test]
    fn test_fixed_header_layout() {
        let mut message = DhcpMessage::new(BOOTREPLY, None);
        message.hardware_address = Some(HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
        message.hop_count = 2;
        message.transaction_id = 0x12345678;
        message.seconds = 0x0102;
        message.flags = 0x8000;
        message.current_client_address = Some(Ipv4Addr::new(1, 1, 1, 1));
        message.assigned_client_address = Some(Ipv4Addr::new(2, 2, 2, 2));
        message.next_server_address = Some(Ipv4Addr::new(3, 3, 3, 3));
        message.relay_agent_address = None;

        let bytes = encode(&mut message);
        assert_eq!(bytes.len(), HEADER_LEN + 4 + 1);
        assert_eq!(&bytes[0..4], &[2, 1, 6, 2]);
        assert_eq!(&bytes[4..8], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(&bytes[8..10], &[0x01, 0x02]);
        assert_eq!(&bytes[10..12], &[0x80, 0x00]);
        assert_eq!(&bytes[12..16], &[1, 1, 1, 1]);
        assert_eq!(&bytes[16..20], &[2, 2, 2, 2]);
        assert_eq!(&bytes[20..24], &[3, 3, 3, 3]);
        assert_eq!(&bytes[24..28], &[0, 0, 0, 0]);
        assert_eq!(&bytes[CHADDR], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[236..240], &MAGIC_COOKIE);
        assert_eq!(bytes[240], 0xFF);
    }

    #[test]
    fn test_no_hardware_address() {
        let mut message = DhcpMessage::new(1, None);
        let bytes = encode(&mut message);
        assert_eq!(&bytes[1..3], &[0, 0]);
        assert!(bytes[CHADDR].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_hardware_address_truncated() {
        let mut message = DhcpMessage::new(1, None);
        let long: Vec<u8> = (1..=20).collect();
        message.hardware_address = Some(HardwareAddress::new(32, long.clone()));

        let bytes = encode(&mut message);
        assert_eq!(bytes[2], 20);
        assert_eq!(&bytes[CHADDR], &long[..16]);
        assert_eq!(&bytes[236..240], &MAGIC_COOKIE);
    }

    #[test]
    fn test_seconds_truncated_to_16_bits() {
        let mut message = DhcpMessage::new(1, None);
        message.seconds = 0x0001_FFFE;
        let bytes = encode(&mut message);
        assert_eq!(&bytes[8..10], &[0xFF, 0xFE]);
    }

    #[test]
    fn test_string_fields() {
        let mut message = DhcpMessage::new(1, None);
        message.server_hostname = Some("abc".to_string());
        message.boot_file_name = Some("x".repeat(200));

        let bytes = encode(&mut message);
        assert_eq!(&bytes[SNAME][..3], b"abc");
        assert!(bytes[SNAME][3..].iter().all(|&b| b == 0));
        assert_eq!(bytes[SNAME].len(), 64);
        assert!(bytes[FILE].iter().all(|&b| b == b'x'));
    }

    #[test]
    fn test_message_type_injected() {
        let mut message = create_discover_message([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let bytes = encode(&mut message);
        assert_eq!(&bytes[240..], &[53, 1, 1, 0xFF]);
        assert_eq!(message.options.get(53).unwrap().data(), &[1]);
    }

    #[test]
    fn test_message_type_replaces_stale_option() {
        let mut message = DhcpMessage::new(1, Some(MessageType::Request));
        message.options.add(DhcpOption::message_type(MessageType::Discover));
        message.options.add(DhcpOption::lease_time(60));

        let bytes = encode(&mut message);
        assert_eq!(&bytes[240..], &[53, 1, 3, 51, 4, 0, 0, 0, 60, 0xFF]);
    }

    #[test]
    fn test_repeat_encode_is_stable() {
        let mut message = create_discover_message([1, 2, 3, 4, 5, 6]);
        let first = encode(&mut message);
        let second = encode(&mut message);
        assert_eq!(first, second);
    }

    #[test]
    fn test_option_continuation() {
        let mut message = DhcpMessage::new(1, None);
        let payload = pattern(300);
        message.options.add(DhcpOption::new(43, payload.clone()));

        let bytes = encode(&mut message);
        let opts = &bytes[240..];
        assert_eq!(opts[0], 43);
        assert_eq!(opts[1], 255);
        assert_eq!(&opts[2..257], &payload[..255]);
        assert_eq!(opts[257], 43);
        assert_eq!(opts[258], 45);
        assert_eq!(&opts[259..304], &payload[255..]);
        assert_eq!(opts[304], 0xFF);
        assert_eq!(opts.len(), 305);
    }

    #[test]
    fn test_exact_chunk_boundary() {
        let mut message = DhcpMessage::new(1, None);
        message.options.add(DhcpOption::new(43, vec![7u8; 510]));

        let bytes = encode(&mut message);
        let opts = &bytes[240..];
        assert_eq!(opts.len(), 2 * 257 + 1);
        assert_eq!(&opts[0..2], &[43, 255]);
        assert_eq!(&opts[257..259], &[43, 255]);
    }

    #[test]
    fn test_zero_length_option() {
        let mut message = DhcpMessage::new(1, None);
        message.options.add(DhcpOption::new(80, Vec::new()));
        let bytes = encode(&mut message);
        assert_eq!(&bytes[240..], &[80, 0, 0xFF]);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let mut message = create_discover_message([1, 2, 3, 4, 5, 6]);
        message.options.add(DhcpOption::new(43, pattern(600)));
        message.options.add(DhcpOption::new(80, Vec::new()));
        message.options.add(DhcpOption::message_type(MessageType::Inform));

        let expected = DhcpMessageEncoder::encoded_len(&message);
        let bytes = encode(&mut message);
        assert_eq!(bytes.len(), expected);
    }

    #[test]
    fn test_capacity_exceeded_leaves_buffer_untouched() {
        let mut message = create_discover_message([1, 2, 3, 4, 5, 6]);
        let mut buf = WireBuffer::with_limit(100);

        let err = DhcpMessageEncoder::new()
            .encode(&mut buf, &mut message)
            .unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(matches!(
            err.root(),
            Error::CapacityExceeded {
                needed: 244,
                remaining: 100
            }
        ));
        assert!(err.to_string().contains("WireBuffer(position=0, limit=100)"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_exact_fit() {
        let mut message = DhcpMessage::new(1, None);
        let mut buf = WireBuffer::with_limit(241);
        DhcpMessageEncoder::new().encode(&mut buf, &mut message).unwrap();
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_encode_appends_at_position() {
        let mut message = DhcpMessage::new(1, None);
        let mut buf = WireBuffer::with_limit(300);
        buf.put_slice(&[0xDE, 0xAD]).unwrap();
        DhcpMessageEncoder::new().encode(&mut buf, &mut message).unwrap();
        assert_eq!(&buf.as_bytes()[..3], &[0xDE, 0xAD, 1]);
        assert_eq!(buf.position(), 2 + 241);
    }
}
