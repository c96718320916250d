//! Message description files.
//!
//! A file holds exactly one of `v4:` or `v6:`. Options are listed either by
//! registry name with a textual value, or by numeric tag with a hex payload:
//!
//! ```yaml
//! v4:
//!   message_type: discover
//!   xid: 0x3903f326
//!   hardware_address: "00:05:3c:04:8d:59"
//!   options:
//!     - name: requested-address
//!       value: 192.168.1.100
//!     - tag: 224
//!       hex: "0102030405"
//! ```

use anyhow::{anyhow, bail, Context, Result};
use dhcp_wire::registry::parse_hex;
use dhcp_wire::v4::{DhcpMessage, DhcpOption, MessageType, BOOTREQUEST};
use dhcp_wire::v6::{Dhcp6Message, Dhcp6MessageType, Dhcp6Option};
use dhcp_wire::{HardwareAddress, OptionRegistry};
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageFile {
    pub v4: Option<V4Message>,
    pub v6: Option<V6Message>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct V4Message {
    #[serde(default = "default_op")]
    pub op: u8,
    pub message_type: Option<String>,
    pub hardware_address: Option<String>,
    #[serde(default = "default_hardware_type")]
    pub hardware_type: u8,
    #[serde(default)]
    pub hops: u8,
    #[serde(default)]
    pub xid: u32,
    #[serde(default)]
    pub secs: u32,
    #[serde(default)]
    pub flags: u16,
    #[serde(default)]
    pub broadcast: bool,
    pub ciaddr: Option<Ipv4Addr>,
    pub yiaddr: Option<Ipv4Addr>,
    pub siaddr: Option<Ipv4Addr>,
    pub giaddr: Option<Ipv4Addr>,
    pub sname: Option<String>,
    pub file: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct V6Message {
    pub message_type: String,
    #[serde(default)]
    pub xid: u32,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// One option, by name or by tag
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    pub name: Option<String>,
    pub tag: Option<u16>,
    pub value: Option<String>,
    pub hex: Option<String>,
}

fn default_op() -> u8 {
    BOOTREQUEST
}

fn default_hardware_type() -> u8 {
    dhcp_wire::hardware::HTYPE_ETHERNET
}

/// A parsed message, ready to encode
#[derive(Debug)]
pub enum Message {
    V4(DhcpMessage),
    V6(Dhcp6Message),
}

impl MessageFile {
    /// Load from YAML, or JSON when the path ends in `.json`
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file {}", path))?;
        let is_json = Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path))
        } else {
            serde_yaml::from_str(&contents).with_context(|| format!("Invalid YAML in {}", path))
        }
    }

    pub fn into_message(self) -> Result<Message> {
        match (self.v4, self.v6) {
            (Some(v4), None) => Ok(Message::V4(v4.build(&OptionRegistry::v4())?)),
            (None, Some(v6)) => Ok(Message::V6(v6.build(&OptionRegistry::v6())?)),
            (Some(_), Some(_)) => bail!("Message file must contain only one of v4 or v6"),
            (None, None) => bail!("Message file must contain a v4 or v6 message"),
        }
    }
}

impl OptionEntry {
    /// Resolve to a tag and payload through the registry
    fn resolve(&self, registry: &OptionRegistry) -> Result<(u16, Vec<u8>)> {
        match (&self.name, self.tag) {
            (Some(name), None) => {
                let codec = registry.by_name(name)?;
                let data = self.payload(registry, codec.tag)?;
                Ok((codec.tag, data))
            }
            (None, Some(tag)) => Ok((tag, self.payload(registry, tag)?)),
            _ => bail!("Option entries need exactly one of name or tag"),
        }
    }

    fn payload(&self, registry: &OptionRegistry, tag: u16) -> Result<Vec<u8>> {
        match (&self.value, &self.hex) {
            (Some(_), Some(_)) => bail!("Option {} has both value and hex", tag),
            (None, Some(hex)) => {
                parse_hex(hex).ok_or_else(|| anyhow!("Option {} has invalid hex {:?}", tag, hex))
            }
            (Some(text), None) => {
                let codec = registry
                    .by_tag(tag)
                    .ok_or_else(|| anyhow!("Option {} is not registered, use hex", tag))?;
                let value = codec.kind.parse_text(tag, text)?;
                Ok(codec.encode(&value)?)
            }
            (None, None) => match registry.by_tag(tag) {
                // flag options such as rapid-commit carry no payload
                Some(codec) => Ok(codec.encode(&codec.kind.parse_text(tag, "")?)?),
                None => Ok(Vec::new()),
            },
        }
    }
}

impl V4Message {
    pub fn build(self, registry: &OptionRegistry) -> Result<DhcpMessage> {
        let message_type = self
            .message_type
            .as_deref()
            .map(|name| {
                MessageType::from_name(name).ok_or_else(|| anyhow!("Unknown DHCP message type {}", name))
            })
            .transpose()?;

        let mut message = DhcpMessage::new(self.op, message_type);
        message.hardware_address = self
            .hardware_address
            .as_deref()
            .map(|s| {
                HardwareAddress::from_string(s, self.hardware_type)
                    .ok_or_else(|| anyhow!("Invalid hardware address {}", s))
            })
            .transpose()?;
        message.hop_count = self.hops;
        message.transaction_id = self.xid;
        message.seconds = self.secs;
        message.flags = self.flags;
        if self.broadcast {
            message.set_broadcast(true);
        }
        message.current_client_address = self.ciaddr;
        message.assigned_client_address = self.yiaddr;
        message.next_server_address = self.siaddr;
        message.relay_agent_address = self.giaddr;
        message.server_hostname = self.sname;
        message.boot_file_name = self.file;

        for entry in &self.options {
            let (tag, data) = entry.resolve(registry)?;
            let tag = u8::try_from(tag)
                .map_err(|_| anyhow!("DHCPv4 option tag {} does not fit in one byte", tag))?;
            if tag == 0 || tag == 255 {
                bail!("Pad and end options are written by the encoder");
            }
            message.options.add(DhcpOption::new(tag, data));
        }

        Ok(message)
    }
}

impl V6Message {
    pub fn build(self, registry: &OptionRegistry) -> Result<Dhcp6Message> {
        let message_type = Dhcp6MessageType::from_name(&self.message_type)
            .ok_or_else(|| anyhow!("Unknown DHCPv6 message type {}", self.message_type))?;
        if self.xid > 0x00FF_FFFF {
            bail!("DHCPv6 transaction id 0x{:x} does not fit in 24 bits", self.xid);
        }

        let mut message = Dhcp6Message::new(message_type, self.xid);
        for entry in &self.options {
            let (tag, data) = entry.resolve(registry)?;
            message.options.add(Dhcp6Option::new(tag, data));
        }
        Ok(message)
    }
}
