#[cfg(test)]
use crate::v4::{DhcpMessage, MessageType, BOOTREQUEST};
#[cfg(test)]
use crate::v6::{Dhcp6Message, Dhcp6MessageType, Dhcp6Option};
#[cfg(test)]
use crate::HardwareAddress;

/// The repeating byte pattern 0x01..=0xFF, `len` bytes long
#[cfg(test)]
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 255 + 1) as u8).collect()
}

/// Create a DHCPDISCOVER with no options besides the message type
#[cfg(test)]
pub fn create_discover_message(mac: [u8; 6]) -> DhcpMessage {
    let mut message = DhcpMessage::new(BOOTREQUEST, Some(MessageType::Discover));
    message.transaction_id = 12345;
    message.hardware_address = Some(HardwareAddress::ethernet(mac));
    message
}

/// Create a DHCPv6 SOLICIT carrying a client id
#[cfg(test)]
pub fn create_solicit_message(transaction_id: u32) -> Dhcp6Message {
    let mut message = Dhcp6Message::new(Dhcp6MessageType::Solicit, transaction_id);
    message
        .options
        .add(Dhcp6Option::new(1, vec![0, 3, 0, 1, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
    message
}
