/// DHCP message types (option 53) as defined in RFC 2132, RFC 3203 and
/// RFC 4388
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Discover = 1,
    Offer = 2,
    Request = 3,
    Decline = 4,
    Ack = 5,
    Nak = 6,
    Release = 7,
    Inform = 8,
    ForceRenew = 9,
    LeaseQuery = 10,
    LeaseUnassigned = 11,
    LeaseUnknown = 12,
    LeaseActive = 13,
}

impl MessageType {
    /// Convert to u8 representation
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Parse from u8 value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Discover),
            2 => Some(Self::Offer),
            3 => Some(Self::Request),
            4 => Some(Self::Decline),
            5 => Some(Self::Ack),
            6 => Some(Self::Nak),
            7 => Some(Self::Release),
            8 => Some(Self::Inform),
            9 => Some(Self::ForceRenew),
            10 => Some(Self::LeaseQuery),
            11 => Some(Self::LeaseUnassigned),
            12 => Some(Self::LeaseUnknown),
            13 => Some(Self::LeaseActive),
            _ => None,
        }
    }

    /// Parse an upper- or lower-case name such as `discover` or `DHCPACK`
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let name = name.strip_prefix("dhcp").unwrap_or(&name);
        match name {
            "discover" => Some(Self::Discover),
            "offer" => Some(Self::Offer),
            "request" => Some(Self::Request),
            "decline" => Some(Self::Decline),
            "ack" => Some(Self::Ack),
            "nak" => Some(Self::Nak),
            "release" => Some(Self::Release),
            "inform" => Some(Self::Inform),
            "forcerenew" => Some(Self::ForceRenew),
            "leasequery" => Some(Self::LeaseQuery),
            "leaseunassigned" => Some(Self::LeaseUnassigned),
            "leaseunknown" => Some(Self::LeaseUnknown),
            "leaseactive" => Some(Self::LeaseActive),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Discover => "DISCOVER",
            Self::Offer => "OFFER",
            Self::Request => "REQUEST",
            Self::Decline => "DECLINE",
            Self::Ack => "ACK",
            Self::Nak => "NAK",
            Self::Release => "RELEASE",
            Self::Inform => "INFORM",
            Self::ForceRenew => "FORCERENEW",
            Self::LeaseQuery => "LEASEQUERY",
            Self::LeaseUnassigned => "LEASEUNASSIGNED",
            Self::LeaseUnknown => "LEASEUNKNOWN",
            Self::LeaseActive => "LEASEACTIVE",
        };
        f.write_str(name)
    }
}
