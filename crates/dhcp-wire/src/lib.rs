//! DHCP wire encoding
//!
//! Serializes DHCPv4 (RFC 2131/2132) and DHCPv6 (RFC 3315) messages into
//! the exact byte layout sent on the network. Encoding is a pure,
//! synchronous transform from a message value into a [`WireBuffer`]; there
//! is no decoding and no I/O.
//!
//! - [`v4::DhcpMessageEncoder`] writes the 236-byte fixed header, the magic
//!   cookie and a TLV option stream, splitting long options per RFC 3396.
//! - [`v6::Dhcp6MessageEncoder`] writes the 4-byte header and options with
//!   16-bit lengths, rejecting payloads that do not fit.
//! - [`OptionRegistry`] maps option tags to typed decode/encode functions.
//!
//! ```
//! use dhcp_wire::v4::{DhcpMessage, DhcpMessageEncoder, MessageType, BOOTREQUEST};
//! use dhcp_wire::{HardwareAddress, WireBuffer};
//!
//! let mut message = DhcpMessage::new(BOOTREQUEST, Some(MessageType::Discover));
//! message.hardware_address = Some(HardwareAddress::ethernet([0, 1, 2, 3, 4, 5]));
//!
//! let mut buf = WireBuffer::default();
//! DhcpMessageEncoder::new().encode(&mut buf, &mut message).unwrap();
//! assert_eq!(buf.position(), 244);
//! ```

pub mod buffer;
pub mod error;
pub mod hardware;
pub mod registry;
pub mod v4;
pub mod v6;

#[cfg(test)]
mod test_helpers;

pub use buffer::WireBuffer;
pub use error::{Error, Result};
pub use hardware::HardwareAddress;
pub use registry::{OptionCodec, OptionRegistry, OptionValue, ValueKind};
