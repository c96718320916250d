//! Error types for DHCP wire encoding.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. Lossy
//! narrowing of fixed-width header fields (seconds, `chaddr`, `sname`,
//! `file`, the top byte of a DHCPv6 transaction id) is part of the wire
//! contract and never produces an error.

/// Errors raised while encoding DHCP messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The destination buffer has fewer bytes left than the write needs.
    #[error("buffer capacity exceeded: {needed} bytes needed, {remaining} remaining")]
    CapacityExceeded { needed: usize, remaining: usize },

    /// A DHCPv6 option payload does not fit the 16-bit length field.
    ///
    /// DHCPv6 has no continuation mechanism, so the option cannot be split.
    #[error("option {tag} payload of {len} bytes exceeds the 65535 byte length field")]
    OptionTooLarge { tag: u16, len: usize },

    /// A lower-level failure while encoding a message into a buffer.
    #[error("failed to encode {message} into {buffer}")]
    Encode {
        message: String,
        buffer: String,
        #[source]
        source: Box<Error>,
    },

    /// A typed option value could not be converted to or from its payload.
    #[error("invalid data for option {tag}: {reason}")]
    InvalidOptionData { tag: u16, reason: String },

    /// No registry entry with the given name.
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

impl Error {
    /// Returns the innermost error, skipping [`Error::Encode`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Self::Encode { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn encoding(
        message: &impl std::fmt::Display,
        buffer: &impl std::fmt::Display,
        source: Error,
    ) -> Self {
        Self::Encode {
            message: message.to_string(),
            buffer: buffer.to_string(),
            source: Box::new(source),
        }
    }
}

/// A specialized Result type for DHCP wire operations.
pub type Result<T> = std::result::Result<T, Error>;
