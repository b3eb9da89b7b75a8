//! Recovered symmetric key material.
//!
//! A [`SymmetricKey`] is what an unwrapped organization key becomes. Key
//! material is zeroized when the value is dropped and never shows up in
//! `Debug` output.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::error::{OrgKeyError, Result};

/// Length of an AES-256 key in bytes.
const AES_KEY_LENGTH: usize = 32;

/// Length of an AES-256 key followed by an HMAC-SHA256 key.
const AES_HMAC_KEY_LENGTH: usize = 64;

/// Hex characters kept from the BLAKE3 digest in [`SymmetricKey::fingerprint`].
const FINGERPRINT_HEX_LENGTH: usize = 16;

/// Layout of the bytes inside a [`SymmetricKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetricKeyKind {
    /// 32 bytes: a single AES-256 key.
    Aes256,
    /// 64 bytes: AES-256 encryption key, then HMAC-SHA256 key.
    Aes256HmacSha256,
}

impl SymmetricKeyKind {
    /// Determine the layout from a key length.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            AES_KEY_LENGTH => Some(Self::Aes256),
            AES_HMAC_KEY_LENGTH => Some(Self::Aes256HmacSha256),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256 => "aes-256",
            Self::Aes256HmacSha256 => "aes-256+hmac-sha256",
        }
    }
}

/// Opaque symmetric key material.
///
/// Once returned from a decrypt call the key is owned by the caller alone.
/// It is deliberately not `Clone`.
pub struct SymmetricKey {
    bytes: Zeroizing<Vec<u8>>,
    kind: SymmetricKeyKind,
}

impl SymmetricKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns `OrgKeyError::InvalidKeyLength` unless the input is 32 or 64 bytes long.
    pub fn from_bytes(bytes: impl Into<Zeroizing<Vec<u8>>>) -> Result<Self> {
        let bytes = bytes.into();
        let kind =
            SymmetricKeyKind::from_len(bytes.len()).ok_or(OrgKeyError::InvalidKeyLength(bytes.len()))?;
        Ok(Self { bytes, kind })
    }

    /// Decode a key from standard base64.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| OrgKeyError::Encoding(format!("Invalid base64 key: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn kind(&self) -> SymmetricKeyKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The encryption half of the key.
    pub fn enc_key(&self) -> &[u8] {
        &self.bytes[..AES_KEY_LENGTH]
    }

    /// The MAC half of the key, if the key carries one.
    pub fn mac_key(&self) -> Option<&[u8]> {
        match self.kind {
            SymmetricKeyKind::Aes256 => None,
            SymmetricKeyKind::Aes256HmacSha256 => Some(&self.bytes[AES_KEY_LENGTH..]),
        }
    }

    /// Standard base64 encoding of the key, for operator output only.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(STANDARD.encode(self.as_bytes()))
    }

    /// Short, non-secret identifier derived from the key with BLAKE3.
    pub fn fingerprint(&self) -> String {
        let digest = blake3::hash(self.as_bytes());
        digest.to_hex().as_str()[..FINGERPRINT_HEX_LENGTH].to_string()
    }

    /// Copy the key for a collaborator that hands out stored keys.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            kind: self.kind,
        }
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SymmetricKey {}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("kind", &self.kind)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
