use super::DhcpOption;
use crate::error::Result;
use crate::registry::{OptionRegistry, OptionValue};

/// Ordered, multi-valued DHCPv4 option list.
///
/// [`add`](Self::add) always appends, so the same tag may appear several
/// times and every entry reaches the wire in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpOptions {
    options: Vec<DhcpOption>,
}

impl DhcpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option.
    pub fn add(&mut self, option: DhcpOption) {
        self.options.push(option);
    }

    pub fn add_all(&mut self, options: impl IntoIterator<Item = DhcpOption>) {
        self.options.extend(options);
    }

    /// Replace the first option with the same tag in place, dropping any
    /// later duplicates. Appends if the tag is not present.
    pub fn set(&mut self, option: DhcpOption) {
        let tag = option.tag();
        match self.options.iter().position(|o| o.tag() == tag) {
            Some(first) => {
                self.options[first] = option;
                let mut index = 0;
                self.options.retain(|o| {
                    let keep = index <= first || o.tag() != tag;
                    index += 1;
                    keep
                });
            }
            None => self.options.push(option),
        }
    }

    /// First option with the given tag.
    pub fn get(&self, tag: u8) -> Option<&DhcpOption> {
        self.options.iter().find(|o| o.tag() == tag)
    }

    /// All options with the given tag, in insertion order.
    pub fn get_all(&self, tag: u8) -> impl Iterator<Item = &DhcpOption> {
        self.options.iter().filter(move |o| o.tag() == tag)
    }

    /// Decode the first option with `tag` through the registry.
    pub fn get_value(&self, registry: &OptionRegistry, tag: u8) -> Option<Result<OptionValue>> {
        self.get(tag)
            .map(|o| registry.decode_value(u16::from(tag), o.data()))
    }

    /// Remove every option with the given tag.
    pub fn remove(&mut self, tag: u8) {
        self.options.retain(|o| o.tag() != tag);
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

    pub fn iter(&self) -> std::slice::Iter<'_, DhcpOption> {
        self.options.iter()
    }
}

impl<'a> IntoIterator for &'a DhcpOptions {
    type Item = &'a DhcpOption;
    type IntoIter = std::slice::Iter<'a, DhcpOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl FromIterator<DhcpOption> for DhcpOptions {
    fn from_iter<I: IntoIterator<Item = DhcpOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v4::MessageType;
    use std::net::Ipv4Addr;

    #[test]
    fn test_add_keeps_duplicates_in_order() {
        let mut options = DhcpOptions::new();
        options.add(DhcpOption::new(77, b"first".to_vec()));
        options.add(DhcpOption::lease_time(60));
        options.add(DhcpOption::new(77, b"second".to_vec()));

        assert_eq!(options.len(), 3);
        let user_classes: Vec<&[u8]> = options.get_all(77).map(|o| o.data()).collect();
        assert_eq!(user_classes, vec![&b"first"[..], &b"second"[..]]);
        assert_eq!(options.get(77).unwrap().data(), b"first");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut options = DhcpOptions::new();
        options.add(DhcpOption::message_type(MessageType::Discover));
        options.add(DhcpOption::lease_time(60));
        options.add(DhcpOption::message_type(MessageType::Request));

        options.set(DhcpOption::message_type(MessageType::Ack));

        let tags: Vec<u8> = options.iter().map(|o| o.tag()).collect();
        assert_eq!(tags, vec![53, 51]);
        assert_eq!(options.get(53).unwrap().data(), &[5]);
    }

    #[test]
    fn test_set_appends_when_absent() {
        let mut options = DhcpOptions::new();
        options.add(DhcpOption::lease_time(60));
        options.set(DhcpOption::message_type(MessageType::Offer));
        let tags: Vec<u8> = options.iter().map(|o| o.tag()).collect();
        assert_eq!(tags, vec![51, 53]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut options: DhcpOptions = vec![
            DhcpOption::new(77, vec![1]),
            DhcpOption::new(77, vec![2]),
            DhcpOption::lease_time(60),
        ]
        .into_iter()
        .collect();

        options.remove(77);
        assert_eq!(options.len(), 1);
        options.clear();
        assert!(options.is_empty());
    }

    #[test]
    fn test_get_value_through_registry() {
        let registry = OptionRegistry::v4();
        let mut options = DhcpOptions::new();
        options.add(DhcpOption::routers(&[Ipv4Addr::new(10, 0, 0, 1)]));

        let value = options.get_value(&registry, 3).unwrap().unwrap();
        assert_eq!(value, OptionValue::Ipv4List(vec![Ipv4Addr::new(10, 0, 0, 1)]));
        assert!(options.get_value(&registry, 1).is_none());
    }
}
