use super::{DhcpOptions, MessageType};
use crate::HardwareAddress;
use std::fmt;
use std::net::Ipv4Addr;

/// Message op code for client-to-server messages
pub const BOOTREQUEST: u8 = 1;
/// Message op code for server-to-client messages
pub const BOOTREPLY: u8 = 2;

/// Broadcast bit of the `flags` field (RFC 2131 §2)
pub const FLAG_BROADCAST: u16 = 0x8000;

/// DHCPv4 message as defined in RFC 2131
///
/// Absent addresses encode as `0.0.0.0`, an absent hardware address as
/// `htype = 0, hlen = 0` and an all-zero `chaddr`, and absent strings as
/// empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpMessage {
    pub op: u8,
    pub hardware_address: Option<HardwareAddress>,
    pub hop_count: u8,
    pub transaction_id: u32,
    /// Seconds elapsed; only the low 16 bits are transmitted
    pub seconds: u32,
    pub flags: u16,
    /// `ciaddr`
    pub current_client_address: Option<Ipv4Addr>,
    /// `yiaddr`
    pub assigned_client_address: Option<Ipv4Addr>,
    /// `siaddr`
    pub next_server_address: Option<Ipv4Addr>,
    /// `giaddr`
    pub relay_agent_address: Option<Ipv4Addr>,
    /// `sname`, Latin-1, at most 64 bytes reach the wire
    pub server_hostname: Option<String>,
    /// `file`, Latin-1, at most 128 bytes reach the wire
    pub boot_file_name: Option<String>,
    /// Written as option 53 when the message is encoded
    pub message_type: Option<MessageType>,
    pub options: DhcpOptions,
}

impl DhcpMessage {
    /// Create an empty message
    pub fn new(op: u8, message_type: Option<MessageType>) -> Self {
        Self {
            op,
            message_type,
            ..Self::default()
        }
    }

    /// Whether the broadcast flag is set
    pub fn is_broadcast(&self) -> bool {
        self.flags & FLAG_BROADCAST != 0
    }

    pub fn set_broadcast(&mut self, broadcast: bool) {
        if broadcast {
            self.flags |= FLAG_BROADCAST;
        } else {
            self.flags &= !FLAG_BROADCAST;
        }
    }
}

impl fmt::Display for DhcpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DhcpMessage(op={}, xid=0x{:08x}", self.op, self.transaction_id)?;
        if let Some(mt) = self.message_type {
            write!(f, ", type={}", mt)?;
        }
        if let Some(hw) = &self.hardware_address {
            write!(f, ", chaddr={}", hw)?;
        }
        write!(f, ", options={})", self.options.len())
    }
}
