//! DHCPv4 (RFC 2131/2132) message model and encoder.

pub mod encoder;
mod fields;
pub mod message;
pub mod message_type;
pub mod option;
pub mod options;

pub use encoder::{encode_v4, DhcpMessageEncoder, HEADER_LEN, MAGIC_COOKIE};
pub use message::{DhcpMessage, BOOTREPLY, BOOTREQUEST, FLAG_BROADCAST};
pub use message_type::MessageType;
pub use option::{tags, DhcpOption};
pub use options::DhcpOptions;
