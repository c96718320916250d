use std::collections::btree_map::{BTreeMap, Values};

use crate::error::Result;
use crate::registry::{OptionRegistry, OptionValue};

/// A DHCPv6 option: a 16-bit tag and an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dhcp6Option {
    tag: u16,
    data: Vec<u8>,
}

impl Dhcp6Option {
    pub fn new(tag: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// DHCPv6 options keyed by tag.
///
/// Each tag holds at most one option: [`add`](Self::add) replaces an
/// existing entry with the same tag. Iteration is in ascending tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dhcp6Options {
    options: BTreeMap<u16, Dhcp6Option>,
}

impl Dhcp6Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option, returning the one it replaced.
    pub fn add(&mut self, option: Dhcp6Option) -> Option<Dhcp6Option> {
        self.options.insert(option.tag(), option)
    }

    pub fn add_all(&mut self, options: impl IntoIterator<Item = Dhcp6Option>) {
        for option in options {
            self.add(option);
        }
    }

    pub fn get(&self, tag: u16) -> Option<&Dhcp6Option> {
        self.options.get(&tag)
    }

    /// Decode the option with `tag` through the registry.
    pub fn get_value(&self, registry: &OptionRegistry, tag: u16) -> Option<Result<OptionValue>> {
        self.get(tag).map(|o| registry.decode_value(tag, o.data()))
    }

    pub fn remove(&mut self, tag: u16) -> Option<Dhcp6Option> {
        self.options.remove(&tag)
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> Values<'_, u16, Dhcp6Option> {
        self.options.values()
    }
}

impl<'a> IntoIterator for &'a Dhcp6Options {
    type Item = &'a Dhcp6Option;
    type IntoIter = Values<'a, u16, Dhcp6Option>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.values()
    }
}

impl FromIterator<Dhcp6Option> for Dhcp6Options {
    fn from_iter<I: IntoIterator<Item = Dhcp6Option>>(iter: I) -> Self {
        let mut options = Self::new();
        options.add_all(iter);
        options
    }
}
