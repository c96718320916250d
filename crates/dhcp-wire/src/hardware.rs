use std::fmt;

/// ARP hardware type for Ethernet (RFC 1700).
pub const HTYPE_ETHERNET: u8 = 1;

/// Client hardware address as carried in the `htype`, `hlen` and `chaddr`
/// header fields.
///
/// `length` is written verbatim to `hlen`. It normally equals the number of
/// address bytes, but the encoder never checks this: `chaddr` is always
/// filled from `address` and padded or truncated to 16 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HardwareAddress {
    pub hardware_type: u8,
    pub length: u8,
    pub address: Vec<u8>,
}

impl HardwareAddress {
    /// Create a hardware address of the given type from raw bytes
    pub fn new(hardware_type: u8, address: impl Into<Vec<u8>>) -> Self {
        let address = address.into();
        Self {
            hardware_type,
            length: address.len().min(u8::MAX as usize) as u8,
            address,
        }
    }

    /// Create an Ethernet (MAC-48) hardware address
    pub fn ethernet(mac: [u8; 6]) -> Self {
        Self::new(HTYPE_ETHERNET, mac)
    }

    /// Get the raw address bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.address
    }

    /// Parse colon-separated hex octets (XX:XX:XX:XX:XX:XX)
    ///
    /// Six octets produce an Ethernet address; any other length between 1
    /// and 16 octets gets `hardware_type`.
    pub fn from_string(s: &str, hardware_type: u8) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.is_empty() || parts.len() > 16 {
            return None;
        }

        let mut bytes = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() || part.len() > 2 {
                return None;
            }
            bytes.push(u8::from_str_radix(part, 16).ok()?);
        }

        let htype = if bytes.len() == 6 {
            HTYPE_ETHERNET
        } else {
            hardware_type
        };
        Some(Self::new(htype, bytes))
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.address.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethernet() {
        let hw = HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(hw.hardware_type, HTYPE_ETHERNET);
        assert_eq!(hw.length, 6);
        assert_eq!(hw.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_to_string() {
        let hw = HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(hw.to_string(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_from_string_lowercase() {
        let hw = HardwareAddress::from_string("aa:bb:cc:dd:ee:ff", 0).unwrap();
        assert_eq!(hw, HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
    }

    #[test]
    fn test_from_string_other_length_keeps_type() {
        // InfiniBand client ids are longer than a MAC
        let hw = HardwareAddress::from_string("01:02:03:04:05:06:07:08", 32).unwrap();
        assert_eq!(hw.hardware_type, 32);
        assert_eq!(hw.length, 8);
    }

    #[test]
    fn test_from_string_invalid() {
        assert!(HardwareAddress::from_string("AA:BB:CC:DD:EE:GG", 1).is_none());
        assert!(HardwareAddress::from_string("AABBCCDDEEFF", 1).is_none());
        assert!(HardwareAddress::from_string("AA::BB", 1).is_none());
        let too_long = vec!["00"; 17].join(":");
        assert!(HardwareAddress::from_string(&too_long, 1).is_none());
    }

    #[test]
    fn test_length_saturates() {
        let hw = HardwareAddress::new(1, vec![0u8; 300]);
        assert_eq!(hw.length, 255);
    }
}
