//! DHCPv6 (RFC 3315) message model and encoder.

pub mod encoder;
pub mod message;
pub mod options;

pub use encoder::{encode_v6, Dhcp6MessageEncoder};
pub use message::{Dhcp6Message, Dhcp6MessageType};
pub use options::{Dhcp6Option, Dhcp6Options};
