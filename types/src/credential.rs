//! Secondary voter credentials presented by officers during verification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ElectionError;

/// Width of the national identity credential in bytes.
pub const NATIONAL_ID_LEN: usize = 12;

/// A fixed-width opaque national identity credential.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NationalIdHash([u8; NATIONAL_ID_LEN]);

impl NationalIdHash {
    pub const fn new(bytes: [u8; NATIONAL_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex string (with or without a `0x` prefix) of exactly
    /// `NATIONAL_ID_LEN` bytes.
    pub fn from_hex(s: &str) -> Result<Self, ElectionError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| ElectionError::InvalidCredential(format!("{s}: {e}")))?;
        let bytes: [u8; NATIONAL_ID_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            ElectionError::InvalidCredential(format!(
                "expected {NATIONAL_ID_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; NATIONAL_ID_LEN] {
        &self.0
    }
}

impl fmt::Debug for NationalIdHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NationalIdHash({}..)", hex::encode(&self.0[..2]))
    }
}

impl fmt::Display for NationalIdHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// The voter code printed on a voter's card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterCode(String);

impl VoterCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which presented credential failed to match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credential {
    NationalId,
    VoterCode,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NationalId => write!(f, "national id"),
            Self::VoterCode => write!(f, "voter code"),
        }
    }
}
