//! Age-backed crypto collaborator.
//!
//! Cipher text travels as standard base64 of the age binary format.
//!
//! - User-encrypted keys are age files encrypted to the user's X25519
//!   recipient and are opened with the matching identity.
//! - Provider-encrypted keys are age passphrase (scrypt) files; the
//!   passphrase is the standard base64 encoding of the provider key bytes.
//!
//! The scrypt work factor makes passphrase decryption CPU-bound, so it runs
//! on Tokio's blocking pool. The provider must be used inside a Tokio runtime.

use std::collections::HashMap;
use std::io::Read;
use std::iter;
use std::path::Path;
use std::str::FromStr;

use age::secrecy::SecretString;
use age::x25519;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::error::{OrgKeyError, Result};
use crate::key::SymmetricKey;
use crate::provider::CryptoProvider;

/// Prefix of an encoded age X25519 secret key.
const AGE_SECRET_KEY_PREFIX: &str = "AGE-SECRET-KEY-";

/// [`CryptoProvider`] holding an optional user identity and a set of provider keys.
#[derive(Default)]
pub struct AgeCryptoProvider {
    identity: Option<x25519::Identity>,
    provider_keys: HashMap<String, SymmetricKey>,
}

impl AgeCryptoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `identity` as the active user's private key.
    pub fn with_identity(mut self, identity: x25519::Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Register the key of a provider the user is a member of.
    pub fn with_provider_key(mut self, provider_id: impl Into<String>, key: SymmetricKey) -> Self {
        self.provider_keys.insert(provider_id.into(), key);
        self
    }

    /// Read an age identity file and parse its secret key.
    ///
    /// The file contents are zeroized once parsed.
    ///
    /// # Errors
    ///
    /// - `OrgKeyError::Io` if the file cannot be read
    /// - `OrgKeyError::Crypto` if it holds no valid X25519 secret key
    pub fn load_identity_file(path: &Path) -> Result<x25519::Identity> {
        let contents = Zeroizing::new(std::fs::read_to_string(path)?);
        parse_identity(&contents)
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    /// Provider ids with a registered key, sorted.
    pub fn provider_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.provider_keys.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for AgeCryptoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgeCryptoProvider")
            .field("identity", &self.identity.as_ref().map(|_| "[REDACTED]"))
            .field("providers", &self.provider_ids())
            .finish()
    }
}

/// Parse the first secret key out of an age identity file.
///
/// Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns `OrgKeyError::Crypto` if no line holds a valid X25519 secret key.
pub fn parse_identity(contents: &str) -> Result<x25519::Identity> {
    let line = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find(|line| line.starts_with(AGE_SECRET_KEY_PREFIX))
        .ok_or_else(|| OrgKeyError::Crypto("No age secret key found in identity".to_string()))?;

    x25519::Identity::from_str(line)
        .map_err(|e| OrgKeyError::Crypto(format!("Invalid age identity: {}", e)))
}

fn decode_cipher_text(cipher_text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(cipher_text.trim())
        .map_err(|e| OrgKeyError::Encoding(format!("Cipher text is not valid base64: {}", e)))
}

fn decrypt_with(encrypted: &[u8], identity: &dyn age::Identity) -> Result<Zeroizing<Vec<u8>>> {
    let decryptor = age::Decryptor::new(encrypted)
        .map_err(|e| OrgKeyError::Crypto(format!("Failed to create decryptor: {}", e)))?;

    let mut reader = decryptor
        .decrypt(iter::once(identity))
        .map_err(|e| OrgKeyError::Crypto(format!("Decryption failed: {}", e)))?;

    let mut decrypted = Zeroizing::new(Vec::new());
    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| OrgKeyError::Crypto(format!("Failed to read decrypted data: {}", e)))?;

    Ok(decrypted)
}

#[async_trait]
impl CryptoProvider for AgeCryptoProvider {
    type PrivateKey = x25519::Identity;

    async fn private_key(&self) -> Result<Option<Self::PrivateKey>> {
        Ok(self.identity.clone())
    }

    async fn provider_key(&self, provider_id: &str) -> Result<SymmetricKey> {
        tracing::debug!(provider_id, "looking up provider key");
        self.provider_keys
            .get(provider_id)
            .map(SymmetricKey::duplicate)
            .ok_or_else(|| OrgKeyError::NotFound(format!("provider key for {}", provider_id)))
    }

    async fn asymmetric_decrypt(
        &self,
        cipher_text: &str,
        key: &Self::PrivateKey,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let encrypted = decode_cipher_text(cipher_text)?;
        decrypt_with(&encrypted, key)
    }

    async fn symmetric_decrypt(
        &self,
        cipher_text: &str,
        key: &SymmetricKey,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let encrypted = decode_cipher_text(cipher_text)?;
        let passphrase = key.to_base64();

        tokio::task::spawn_blocking(move || {
            let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
            decrypt_with(&encrypted, &identity)
        })
        .await
        .map_err(|e| OrgKeyError::Crypto(format!("Decryption task failed: {}", e)))?
    }
}
