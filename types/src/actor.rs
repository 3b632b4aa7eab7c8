//! Opaque actor identities and constituency identifiers.
//!
//! Actor identities are authenticated by the execution substrate before they
//! reach the core. The core never issues them; it only stores and compares.

use blake2::digest::consts::U20;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ElectionError;

type Blake2b160 = Blake2b<U20>;

/// An externally authenticated actor identity (voter, candidate, officer,
/// commissioner, or a component such as the election coordinator).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Prefix used for identities derived from a public key.
    pub const KEY_PREFIX: &'static str = "act_";

    /// Wrap an externally supplied identity token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse an identity token, rejecting blank input.
    pub fn parse(raw: &str) -> Result<Self, ElectionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ElectionError::InvalidIdentity(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derive an identity from a 32-byte public key: `act_` followed by the
    /// hex-encoded Blake2b-160 digest of the key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let mut hasher = Blake2b160::new();
        hasher.update(public_key);
        let digest = hasher.finalize();
        Self(format!("{}{}", Self::KEY_PREFIX, hex::encode(digest)))
    }

    /// Derive an identity from a hex-encoded 32-byte public key.
    pub fn from_public_key_hex(hex_str: &str) -> Result<Self, ElectionError> {
        let bytes = hex::decode(hex_str.trim())
            .map_err(|e| ElectionError::InvalidIdentity(format!("{hex_str}: {e}")))?;
        let key: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            ElectionError::InvalidIdentity(format!(
                "public key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self::from_public_key(&key))
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An electoral district identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConstituencyId(u32);

impl ConstituencyId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ConstituencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constituency-{}", self.0)
    }
}

impl From<u32> for ConstituencyId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(ActorId::parse("  alice ").unwrap(), ActorId::new("alice"));
        assert!(matches!(
            ActorId::parse("   "),
            Err(ElectionError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn public_key_identity_is_deterministic() {
        let a = ActorId::from_public_key(&[7u8; 32]);
        let b = ActorId::from_public_key(&[7u8; 32]);
        let c = ActorId::from_public_key(&[8u8; 32]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_str().starts_with(ActorId::KEY_PREFIX));
        assert_eq!(a.as_str().len(), ActorId::KEY_PREFIX.len() + 40);
    }

    #[test]
    fn public_key_hex_matches_raw_derivation() {
        let hex_key = "07".repeat(32);
        assert_eq!(
            ActorId::from_public_key_hex(&hex_key).unwrap(),
            ActorId::from_public_key(&[7u8; 32])
        );
        assert!(matches!(
            ActorId::from_public_key_hex("0707"),
            Err(ElectionError::InvalidIdentity(_))
        ));
        assert!(matches!(
            ActorId::from_public_key_hex("not hex"),
            Err(ElectionError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn constituency_display() {
        assert_eq!(ConstituencyId::new(3).to_string(), "constituency-3");
    }
}
