use super::MessageType;
use std::net::Ipv4Addr;

/// Well-known DHCPv4 option tags (RFC 2132)
pub mod tags {
    pub const PAD: u8 = 0;
    pub const SUBNET_MASK: u8 = 1;
    pub const ROUTERS: u8 = 3;
    pub const DOMAIN_NAME_SERVERS: u8 = 6;
    pub const HOST_NAME: u8 = 12;
    pub const DOMAIN_NAME: u8 = 15;
    pub const REQUESTED_ADDRESS: u8 = 50;
    pub const LEASE_TIME: u8 = 51;
    pub const OPTION_OVERLOAD: u8 = 52;
    pub const MESSAGE_TYPE: u8 = 53;
    pub const SERVER_IDENTIFIER: u8 = 54;
    pub const PARAMETER_REQUEST_LIST: u8 = 55;
    pub const RENEWAL_TIME: u8 = 58;
    pub const REBINDING_TIME: u8 = 59;
    pub const CLIENT_IDENTIFIER: u8 = 61;
    pub const END: u8 = 255;
}

/// A DHCPv4 option: one tag byte and an opaque payload of any length.
///
/// Payloads longer than 255 bytes are legal here; the encoder splits them
/// into RFC 3396 continuation entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpOption {
    tag: u8,
    data: Vec<u8>,
}

impl DhcpOption {
    pub fn new(tag: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn subnet_mask(mask: Ipv4Addr) -> Self {
        Self::new(tags::SUBNET_MASK, mask.octets())
    }

    pub fn routers(addrs: &[Ipv4Addr]) -> Self {
        Self::new(tags::ROUTERS, addresses(addrs))
    }

    pub fn dns_servers(addrs: &[Ipv4Addr]) -> Self {
        Self::new(tags::DOMAIN_NAME_SERVERS, addresses(addrs))
    }

    pub fn hostname(name: &str) -> Self {
        Self::new(tags::HOST_NAME, name.as_bytes())
    }

    pub fn domain_name(name: &str) -> Self {
        Self::new(tags::DOMAIN_NAME, name.as_bytes())
    }

    pub fn requested_address(addr: Ipv4Addr) -> Self {
        Self::new(tags::REQUESTED_ADDRESS, addr.octets())
    }

    /// Lease time in seconds
    pub fn lease_time(secs: u32) -> Self {
        Self::new(tags::LEASE_TIME, secs.to_be_bytes())
    }

    pub fn message_type(mt: MessageType) -> Self {
        Self::new(tags::MESSAGE_TYPE, [mt.to_u8()])
    }

    pub fn server_identifier(addr: Ipv4Addr) -> Self {
        Self::new(tags::SERVER_IDENTIFIER, addr.octets())
    }

    pub fn parameter_request_list(codes: &[u8]) -> Self {
        Self::new(tags::PARAMETER_REQUEST_LIST, codes)
    }

    pub fn renewal_time(secs: u32) -> Self {
        Self::new(tags::RENEWAL_TIME, secs.to_be_bytes())
    }

    pub fn rebinding_time(secs: u32) -> Self {
        Self::new(tags::REBINDING_TIME, secs.to_be_bytes())
    }

    pub fn client_identifier(id: &[u8]) -> Self {
        Self::new(tags::CLIENT_IDENTIFIER, id)
    }
}

fn addresses(addrs: &[Ipv4Addr]) -> Vec<u8> {
    addrs.iter().flat_map(|addr| addr.octets()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_mask() {
        let opt = DhcpOption::subnet_mask(Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(opt.tag(), 1);
        assert_eq!(opt.data(), &[255, 255, 255, 0]);
    }

    #[test]
    fn test_message_type() {
        let opt = DhcpOption::message_type(MessageType::Discover);
        assert_eq!(opt.tag(), 53);
        assert_eq!(opt.data(), &[1]);
    }

    #[test]
    fn test_lease_time() {
        let opt = DhcpOption::lease_time(3600);
        assert_eq!(opt.data(), &[0, 0, 0x0E, 0x10]);
    }

    #[test]
    fn test_routers_are_not_capped() {
        // 100 routers is 400 bytes; continuation handles it on the wire
        let addrs = vec![Ipv4Addr::new(10, 0, 0, 1); 100];
        let opt = DhcpOption::routers(&addrs);
        assert_eq!(opt.data().len(), 400);
    }

    #[test]
    fn test_hostname() {
        let opt = DhcpOption::hostname("test-host");
        assert_eq!(opt.tag(), 12);
        assert_eq!(opt.data(), b"test-host");
    }
}
