//! Deterministic address derivation.
//!
//! Every record in the world state lives at an [`Address`]. Record addresses
//! are never chosen freely: they are derived from a root identity (an agent,
//! an avatar, a namespace) and a path of labels, so that every node computes
//! the same key for the same logical record.
//!
//! Derivation is `SHA-256(root || u64_le(len(label)) || label)` truncated to
//! [`ADDRESS_LEN`] bytes. The length prefix keeps `derive("ab").derive("c")`
//! and `derive("a").derive("bc")` apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of bytes in an address.
pub const ADDRESS_LEN: usize = 20;

/// 20-byte account or record key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address. Namespace roots are derived from it.
    pub const ZERO: Self = Self([0; ADDRESS_LEN]);

    /// Reserved signer for host-injected system actions (validator set updates).
    pub const SYSTEM: Self = Self([0xff; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derives a child address from this root and a single label.
    ///
    /// Pure and total: the same `(self, label)` always yields the same address.
    pub fn derive(&self, label: impl AsRef<[u8]>) -> Address {
        let label = label.as_ref();

        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label);
        let digest = hasher.finalize();

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Address(bytes)
    }

    /// Folds [`Address::derive`] over a path of labels.
    ///
    /// An empty path returns `self`.
    pub fn derive_path<I, L>(&self, path: I) -> Address
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        path.into_iter()
            .fold(*self, |address, label| address.derive(label))
    }

    /// Root address for a named record namespace.
    pub fn namespace(name: &str) -> Address {
        Address::ZERO.derive(name)
    }

    /// Lower-case hex without the `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First eight bytes as a little-endian word, used when mixing seeds.
    pub fn low_word(&self) -> u64 {
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.0[..8]);
        u64::from_le_bytes(word)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.to_hex())
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// Errors raised when parsing an address from its hex form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),

    #[error("address must be {ADDRESS_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|error| AddressParseError::InvalidHex(error.to_string()))?;
        let bytes: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Address {
        Address::new([7; ADDRESS_LEN])
    }

    #[test]
    fn derive_is_deterministic() {
        assert_eq!(agent().derive("avatar-state-0"), agent().derive("avatar-state-0"));
        assert_eq!(
            agent().derive_path(["arena", "participants-1-2"]),
            agent().derive_path(["arena", "participants-1-2"]),
        );
    }

    #[test]
    fn distinct_labels_yield_distinct_addresses() {
        assert_ne!(agent().derive("avatar-state-0"), agent().derive("avatar-state-1"));
        assert_ne!(agent().derive_path(["a", "b"]), agent().derive_path(["b", "a"]));
    }

    #[test]
    fn length_prefix_separates_label_boundaries() {
        assert_ne!(agent().derive_path(["ab", "c"]), agent().derive_path(["a", "bc"]));
    }

    #[test]
    fn empty_path_is_identity() {
        let empty: [&str; 0] = [];
        assert_eq!(agent().derive_path(empty), agent());
    }

    #[test]
    fn parses_display_form() {
        let address = agent().derive("inventory");
        let parsed: Address = address.to_string().parse().unwrap();
        assert_eq!(parsed, address);
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength(2))
        );
    }
}
