use super::Dhcp6Options;
use std::fmt;

/// DHCPv6 message types (RFC 3315 §5.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Dhcp6MessageType {
    Solicit = 1,
    Advertise = 2,
    Request = 3,
    Confirm = 4,
    Renew = 5,
    Rebind = 6,
    Reply = 7,
    Release = 8,
    Decline = 9,
    Reconfigure = 10,
    InformationRequest = 11,
    RelayForward = 12,
    RelayReply = 13,
}

impl Dhcp6MessageType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Solicit),
            2 => Some(Self::Advertise),
            3 => Some(Self::Request),
            4 => Some(Self::Confirm),
            5 => Some(Self::Renew),
            6 => Some(Self::Rebind),
            7 => Some(Self::Reply),
            8 => Some(Self::Release),
            9 => Some(Self::Decline),
            10 => Some(Self::Reconfigure),
            11 => Some(Self::InformationRequest),
            12 => Some(Self::RelayForward),
            13 => Some(Self::RelayReply),
            _ => None,
        }
    }

    /// Parse a name such as `solicit` or `information-request`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "solicit" => Some(Self::Solicit),
            "advertise" => Some(Self::Advertise),
            "request" => Some(Self::Request),
            "confirm" => Some(Self::Confirm),
            "renew" => Some(Self::Renew),
            "rebind" => Some(Self::Rebind),
            "reply" => Some(Self::Reply),
            "release" => Some(Self::Release),
            "decline" => Some(Self::Decline),
            "reconfigure" => Some(Self::Reconfigure),
            "information-request" => Some(Self::InformationRequest),
            "relay-forward" => Some(Self::RelayForward),
            "relay-reply" => Some(Self::RelayReply),
            _ => None,
        }
    }
}

/// DHCPv6 client/server message (RFC 3315 §6)
///
/// Only the low 24 bits of `transaction_id` are transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dhcp6Message {
    pub message_type: Dhcp6MessageType,
    pub transaction_id: u32,
    pub options: Dhcp6Options,
}

impl Dhcp6Message {
    pub fn new(message_type: Dhcp6MessageType, transaction_id: u32) -> Self {
        Self {
            message_type,
            transaction_id,
            options: Dhcp6Options::new(),
        }
    }
}

impl fmt::Display for Dhcp6Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dhcp6Message(type={:?}, xid=0x{:06x}, options={})",
            self.message_type,
            self.transaction_id & 0x00FF_FFFF,
            self.options.len()
        )
    }
}
