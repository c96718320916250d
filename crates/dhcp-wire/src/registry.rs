//! Option capability table.
//!
//! Maps an option tag to a name, a value kind and a decode/encode function
//! pair. Lookups go through plain function pointers chosen when the entry is
//! registered; there is no per-lookup instantiation.
//!
//! The containers only ever store raw payloads. The registry is how callers
//! read typed values back out of them, or build payloads from typed values.

use std::collections::HashMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{Error, Result};

pub type DecodeFn = fn(u16, &[u8]) -> Result<OptionValue>;
pub type EncodeFn = fn(u16, &OptionValue) -> Result<Vec<u8>>;

/// Shape of an option payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Empty,
    U8,
    U16,
    U32,
    U16List,
    Ipv4,
    Ipv4List,
    Ipv6,
    Ipv6List,
    Text,
    Bytes,
}

/// A decoded option payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Empty,
    U8(u8),
    U16(u16),
    U32(u32),
    U16List(Vec<u16>),
    Ipv4(Ipv4Addr),
    Ipv4List(Vec<Ipv4Addr>),
    Ipv6(Ipv6Addr),
    Ipv6List(Vec<Ipv6Addr>),
    Text(String),
    Bytes(Vec<u8>),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Empty => ValueKind::Empty,
            Self::U8(_) => ValueKind::U8,
            Self::U16(_) => ValueKind::U16,
            Self::U32(_) => ValueKind::U32,
            Self::U16List(_) => ValueKind::U16List,
            Self::Ipv4(_) => ValueKind::Ipv4,
            Self::Ipv4List(_) => ValueKind::Ipv4List,
            Self::Ipv6(_) => ValueKind::Ipv6,
            Self::Ipv6List(_) => ValueKind::Ipv6List,
            Self::Text(_) => ValueKind::Text,
            Self::Bytes(_) => ValueKind::Bytes,
        }
    }
}

fn invalid(tag: u16, reason: impl Into<String>) -> Error {
    Error::InvalidOptionData {
        tag,
        reason: reason.into(),
    }
}

fn exact(tag: u16, data: &[u8], len: usize) -> Result<()> {
    if data.len() != len {
        return Err(invalid(
            tag,
            format!("expected {} bytes, got {}", len, data.len()),
        ));
    }
    Ok(())
}

fn multiple_of(tag: u16, data: &[u8], width: usize) -> Result<()> {
    if data.is_empty() || data.len() % width != 0 {
        return Err(invalid(
            tag,
            format!("length {} is not a non-zero multiple of {}", data.len(), width),
        ));
    }
    Ok(())
}

fn mismatch(tag: u16, expected: ValueKind, value: &OptionValue) -> Error {
    invalid(
        tag,
        format!("expected {:?} value, got {:?}", expected, value.kind()),
    )
}

fn decode_empty(tag: u16, data: &[u8]) -> Result<OptionValue> {
    exact(tag, data, 0)?;
    Ok(OptionValue::Empty)
}

fn encode_empty(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Empty => Ok(Vec::new()),
        other => Err(mismatch(tag, ValueKind::Empty, other)),
    }
}

fn decode_u8(tag: u16, data: &[u8]) -> Result<OptionValue> {
    exact(tag, data, 1)?;
    Ok(OptionValue::U8(data[0]))
}

fn encode_u8(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::U8(v) => Ok(vec![*v]),
        other => Err(mismatch(tag, ValueKind::U8, other)),
    }
}

fn decode_u16(tag: u16, data: &[u8]) -> Result<OptionValue> {
    exact(tag, data, 2)?;
    Ok(OptionValue::U16(u16::from_be_bytes([data[0], data[1]])))
}

fn encode_u16(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::U16(v) => Ok(v.to_be_bytes().to_vec()),
        other => Err(mismatch(tag, ValueKind::U16, other)),
    }
}

fn decode_u32(tag: u16, data: &[u8]) -> Result<OptionValue> {
    exact(tag, data, 4)?;
    Ok(OptionValue::U32(u32::from_be_bytes([
        data[0], data[1], data[2], data[3],
    ])))
}

fn encode_u32(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::U32(v) => Ok(v.to_be_bytes().to_vec()),
        other => Err(mismatch(tag, ValueKind::U32, other)),
    }
}

fn decode_u16_list(tag: u16, data: &[u8]) -> Result<OptionValue> {
    multiple_of(tag, data, 2)?;
    Ok(OptionValue::U16List(
        data.chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect(),
    ))
}

fn encode_u16_list(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::U16List(values) => Ok(values.iter().flat_map(|v| v.to_be_bytes()).collect()),
        other => Err(mismatch(tag, ValueKind::U16List, other)),
    }
}

fn decode_ipv4(tag: u16, data: &[u8]) -> Result<OptionValue> {
    exact(tag, data, 4)?;
    Ok(OptionValue::Ipv4(Ipv4Addr::new(
        data[0], data[1], data[2], data[3],
    )))
}

fn encode_ipv4(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Ipv4(addr) => Ok(addr.octets().to_vec()),
        other => Err(mismatch(tag, ValueKind::Ipv4, other)),
    }
}

fn decode_ipv4_list(tag: u16, data: &[u8]) -> Result<OptionValue> {
    multiple_of(tag, data, 4)?;
    Ok(OptionValue::Ipv4List(
        data.chunks_exact(4)
            .map(|chunk| Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]))
            .collect(),
    ))
}

fn encode_ipv4_list(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Ipv4List(addrs) => Ok(addrs.iter().flat_map(|a| a.octets()).collect()),
        other => Err(mismatch(tag, ValueKind::Ipv4List, other)),
    }
}

fn decode_ipv6(tag: u16, data: &[u8]) -> Result<OptionValue> {
    exact(tag, data, 16)?;
    let mut octets = [0u8; 16];
    octets.copy_from_slice(data);
    Ok(OptionValue::Ipv6(Ipv6Addr::from(octets)))
}

fn encode_ipv6(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Ipv6(addr) => Ok(addr.octets().to_vec()),
        other => Err(mismatch(tag, ValueKind::Ipv6, other)),
    }
}

fn decode_ipv6_list(tag: u16, data: &[u8]) -> Result<OptionValue> {
    multiple_of(tag, data, 16)?;
    Ok(OptionValue::Ipv6List(
        data.chunks_exact(16)
            .map(|chunk| {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(chunk);
                Ipv6Addr::from(octets)
            })
            .collect(),
    ))
}

fn encode_ipv6_list(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Ipv6List(addrs) => Ok(addrs.iter().flat_map(|a| a.octets()).collect()),
        other => Err(mismatch(tag, ValueKind::Ipv6List, other)),
    }
}

fn decode_text(_tag: u16, data: &[u8]) -> Result<OptionValue> {
    Ok(OptionValue::Text(String::from_utf8_lossy(data).to_string()))
}

fn encode_text(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Text(text) => Ok(text.as_bytes().to_vec()),
        other => Err(mismatch(tag, ValueKind::Text, other)),
    }
}

fn decode_bytes(_tag: u16, data: &[u8]) -> Result<OptionValue> {
    Ok(OptionValue::Bytes(data.to_vec()))
}

fn encode_bytes(tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Bytes(bytes) => Ok(bytes.clone()),
        other => Err(mismatch(tag, ValueKind::Bytes, other)),
    }
}

/// Parse a hex string such as `"0a0b0c"`, `"0a:0b:0c"` or `"0a 0b 0c"`.
pub fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = s
        .bytes()
        .filter(|b| !matches!(b, b':' | b' ' | b'-'))
        .collect();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks_exact(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}

impl ValueKind {
    /// The decode/encode pair for this kind.
    pub fn codec(self) -> (DecodeFn, EncodeFn) {
        match self {
            Self::Empty => (decode_empty, encode_empty),
            Self::U8 => (decode_u8, encode_u8),
            Self::U16 => (decode_u16, encode_u16),
            Self::U32 => (decode_u32, encode_u32),
            Self::U16List => (decode_u16_list, encode_u16_list),
            Self::Ipv4 => (decode_ipv4, encode_ipv4),
            Self::Ipv4List => (decode_ipv4_list, encode_ipv4_list),
            Self::Ipv6 => (decode_ipv6, encode_ipv6),
            Self::Ipv6List => (decode_ipv6_list, encode_ipv6_list),
            Self::Text => (decode_text, encode_text),
            Self::Bytes => (decode_bytes, encode_bytes),
        }
    }

    /// Parse a textual value of this kind. Lists are comma-separated and
    /// byte strings are hex.
    pub fn parse_text(self, tag: u16, text: &str) -> Result<OptionValue> {
        let text = text.trim();
        let bad = |what: &str| invalid(tag, format!("cannot parse {:?} as {}", text, what));
        let list = || text.split(',').map(str::trim).filter(|s| !s.is_empty());

        match self {
            Self::Empty if text.is_empty() => Ok(OptionValue::Empty),
            Self::Empty => Err(bad("an empty value")),
            Self::U8 => text.parse().map(OptionValue::U8).map_err(|_| bad("u8")),
            Self::U16 => text.parse().map(OptionValue::U16).map_err(|_| bad("u16")),
            Self::U32 => text.parse().map(OptionValue::U32).map_err(|_| bad("u32")),
            Self::U16List => list()
                .map(|s| s.parse::<u16>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(OptionValue::U16List)
                .map_err(|_| bad("a u16 list")),
            Self::Ipv4 => text.parse().map(OptionValue::Ipv4).map_err(|_| bad("IPv4")),
            Self::Ipv4List => list()
                .map(|s| s.parse::<Ipv4Addr>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(OptionValue::Ipv4List)
                .map_err(|_| bad("an IPv4 list")),
            Self::Ipv6 => text.parse().map(OptionValue::Ipv6).map_err(|_| bad("IPv6")),
            Self::Ipv6List => list()
                .map(|s| s.parse::<Ipv6Addr>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(OptionValue::Ipv6List)
                .map_err(|_| bad("an IPv6 list")),
            Self::Text => Ok(OptionValue::Text(text.to_string())),
            Self::Bytes => parse_hex(text)
                .map(OptionValue::Bytes)
                .ok_or_else(|| bad("hex bytes")),
        }
    }
}

/// One registry entry.
#[derive(Clone, Copy)]
pub struct OptionCodec {
    pub tag: u16,
    pub name: &'static str,
    pub kind: ValueKind,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl OptionCodec {
    pub fn new(tag: u16, name: &'static str, kind: ValueKind) -> Self {
        let (decode, encode) = kind.codec();
        Self {
            tag,
            name,
            kind,
            decode,
            encode,
        }
    }

    pub fn decode(&self, data: &[u8]) -> Result<OptionValue> {
        (self.decode)(self.tag, data)
    }

    pub fn encode(&self, value: &OptionValue) -> Result<Vec<u8>> {
        (self.encode)(self.tag, value)
    }
}

impl fmt::Debug for OptionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionCodec")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Tag-keyed table of option codecs.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    by_tag: HashMap<u16, OptionCodec>,
    by_name: HashMap<&'static str, u16>,
}

const V4_OPTIONS: &[(u16, &str, ValueKind)] = &[
    (1, "subnet-mask", ValueKind::Ipv4),
    (2, "time-offset", ValueKind::U32),
    (3, "routers", ValueKind::Ipv4List),
    (6, "domain-name-servers", ValueKind::Ipv4List),
    (12, "host-name", ValueKind::Text),
    (15, "domain-name", ValueKind::Text),
    (26, "interface-mtu", ValueKind::U16),
    (28, "broadcast-address", ValueKind::Ipv4),
    (42, "ntp-servers", ValueKind::Ipv4List),
    (43, "vendor-specific", ValueKind::Bytes),
    (50, "requested-address", ValueKind::Ipv4),
    (51, "lease-time", ValueKind::U32),
    (52, "option-overload", ValueKind::U8),
    (53, "message-type", ValueKind::U8),
    (54, "server-identifier", ValueKind::Ipv4),
    (55, "parameter-request-list", ValueKind::Bytes),
    (56, "message", ValueKind::Text),
    (57, "max-message-size", ValueKind::U16),
    (58, "renewal-time", ValueKind::U32),
    (59, "rebinding-time", ValueKind::U32),
    (60, "vendor-class-identifier", ValueKind::Text),
    (61, "client-identifier", ValueKind::Bytes),
    (66, "tftp-server-name", ValueKind::Text),
    (67, "bootfile-name", ValueKind::Text),
    (82, "relay-agent-information", ValueKind::Bytes),
];

const V6_OPTIONS: &[(u16, &str, ValueKind)] = &[
    (1, "client-id", ValueKind::Bytes),
    (2, "server-id", ValueKind::Bytes),
    (3, "ia-na", ValueKind::Bytes),
    (4, "ia-ta", ValueKind::Bytes),
    (5, "ia-addr", ValueKind::Bytes),
    (6, "option-request", ValueKind::U16List),
    (7, "preference", ValueKind::U8),
    (8, "elapsed-time", ValueKind::U16),
    (9, "relay-message", ValueKind::Bytes),
    (11, "auth", ValueKind::Bytes),
    (12, "unicast", ValueKind::Ipv6),
    (13, "status-code", ValueKind::Bytes),
    (14, "rapid-commit", ValueKind::Empty),
    (15, "user-class", ValueKind::Bytes),
    (16, "vendor-class", ValueKind::Bytes),
    (17, "vendor-opts", ValueKind::Bytes),
    (18, "interface-id", ValueKind::Bytes),
    (19, "reconfigure-message", ValueKind::U8),
    (20, "reconfigure-accept", ValueKind::Empty),
    (23, "dns-servers", ValueKind::Ipv6List),
    (24, "domain-list", ValueKind::Bytes),
];

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_table(table: &[(u16, &'static str, ValueKind)]) -> Self {
        let mut registry = Self::new();
        for &(tag, name, kind) in table {
            registry.register(OptionCodec::new(tag, name, kind));
        }
        registry
    }

    /// Common DHCPv4 options (RFC 2132).
    pub fn v4() -> Self {
        Self::from_table(V4_OPTIONS)
    }

    /// Common DHCPv6 options (RFC 3315, RFC 3646).
    pub fn v6() -> Self {
        Self::from_table(V6_OPTIONS)
    }

    /// Add an entry, replacing any entry with the same tag or name.
    pub fn register(&mut self, codec: OptionCodec) {
        if let Some(old) = self.by_tag.insert(codec.tag, codec) {
            self.by_name.remove(old.name);
        }
        if let Some(old_tag) = self.by_name.insert(codec.name, codec.tag) {
            if old_tag != codec.tag {
                self.by_tag.remove(&old_tag);
            }
        }
    }

    pub fn by_tag(&self, tag: u16) -> Option<&OptionCodec> {
        self.by_tag.get(&tag)
    }

    pub fn by_name(&self, name: &str) -> Result<&OptionCodec> {
        self.by_name
            .get(name)
            .and_then(|tag| self.by_tag.get(tag))
            .ok_or_else(|| Error::UnknownOption(name.to_string()))
    }

    /// Decode a payload with the codec registered for `tag`. Tags without
    /// an entry decode as raw bytes.
    pub fn decode_value(&self, tag: u16, data: &[u8]) -> Result<OptionValue> {
        match self.by_tag(tag) {
            Some(codec) => codec.decode(data),
            None => decode_bytes(tag, data),
        }
    }

    /// Encode a value with the codec registered for `tag`. Tags without an
    /// entry only accept [`OptionValue::Bytes`].
    pub fn encode_value(&self, tag: u16, value: &OptionValue) -> Result<Vec<u8>> {
        match self.by_tag(tag) {
            Some(codec) => codec.encode(value),
            None => encode_bytes(tag, value),
        }
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Entries in ascending tag order.
    pub fn entries(&self) -> Vec<&OptionCodec> {
        let mut entries: Vec<&OptionCodec> = self.by_tag.values().collect();
        entries.sort_by_key(|codec| codec.tag);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_tag() {
        let registry = OptionRegistry::v4();
        let codec = registry.by_name("routers").unwrap();
        assert_eq!(codec.tag, 3);
        assert_eq!(registry.by_tag(3).unwrap().name, "routers");
        assert!(matches!(
            registry.by_name("no-such-option"),
            Err(Error::UnknownOption(_))
        ));
    }

    #[test]
    fn test_ipv4_list_codec() {
        let registry = OptionRegistry::v4();
        let value = OptionValue::Ipv4List(vec![
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(192, 168, 1, 2),
        ]);
        let data = registry.encode_value(3, &value).unwrap();
        assert_eq!(data, vec![192, 168, 1, 1, 192, 168, 1, 2]);
        assert_eq!(registry.decode_value(3, &data).unwrap(), value);
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let registry = OptionRegistry::v4();
        assert!(matches!(
            registry.decode_value(1, &[255, 255, 255]),
            Err(Error::InvalidOptionData { tag: 1, .. })
        ));
        assert!(registry.decode_value(3, &[]).is_err());
        assert!(registry.decode_value(51, &[0, 0, 0]).is_err());
    }

    #[test]
    fn test_encode_rejects_kind_mismatch() {
        let registry = OptionRegistry::v4();
        let err = registry
            .encode_value(51, &OptionValue::Text("1 day".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptionData { tag: 51, .. }));
    }

    #[test]
    fn test_unregistered_tag_is_raw_bytes() {
        let registry = OptionRegistry::v4();
        assert_eq!(
            registry.decode_value(250, &[1, 2, 3]).unwrap(),
            OptionValue::Bytes(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_v6_entries() {
        let registry = OptionRegistry::v6();
        let oro = registry.by_name("option-request").unwrap();
        let data = oro.encode(&OptionValue::U16List(vec![23, 24])).unwrap();
        assert_eq!(data, vec![0, 23, 0, 24]);
        assert_eq!(
            registry.decode_value(14, &[]).unwrap(),
            OptionValue::Empty
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = OptionRegistry::v4();
        let before = registry.len();
        registry.register(OptionCodec::new(3, "gateways", ValueKind::Ipv4List));
        assert_eq!(registry.len(), before);
        assert!(registry.by_name("routers").is_err());
        assert_eq!(registry.by_name("gateways").unwrap().tag, 3);
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            ValueKind::Ipv4List.parse_text(6, "8.8.8.8, 8.8.4.4").unwrap(),
            OptionValue::Ipv4List(vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)])
        );
        assert_eq!(
            ValueKind::U32.parse_text(51, "3600").unwrap(),
            OptionValue::U32(3600)
        );
        assert_eq!(
            ValueKind::Bytes.parse_text(61, "01:aa:bb").unwrap(),
            OptionValue::Bytes(vec![0x01, 0xAA, 0xBB])
        );
        assert!(ValueKind::U8.parse_text(53, "256").is_err());
        assert!(ValueKind::Empty.parse_text(14, "x").is_err());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0a0B"), Some(vec![0x0A, 0x0B]));
        assert_eq!(parse_hex(""), Some(vec![]));
        assert_eq!(parse_hex("abc"), None);
        assert_eq!(parse_hex("zz"), None);
    }
}
