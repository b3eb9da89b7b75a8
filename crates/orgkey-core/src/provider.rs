//! Crypto collaborator interface.
//!
//! The `CryptoProvider` trait is everything organization key resolution needs
//! from the outside world: the active user's private key, provider keys, and
//! the two decryption primitives. Implementations own all I/O and all
//! cryptography; errors they return are propagated to the caller unchanged.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::error::Result;
use crate::key::SymmetricKey;

/// Source of secondary key material and decryption primitives.
///
/// Implementations must be thread-safe (`Send + Sync`) so independent
/// organization keys can be decrypted concurrently against one provider.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// The active user's private (asymmetric) key.
    type PrivateKey: Send + Sync;

    /// Fetch the active user's private key.
    ///
    /// Returns `Ok(None)` when the session has no private key.
    async fn private_key(&self) -> Result<Option<Self::PrivateKey>>;

    /// Fetch the symmetric key of the provider identified by `provider_id`.
    ///
    /// # Errors
    ///
    /// Fails when the user has no relationship with the provider. The error
    /// kind is the implementation's choice (typically `OrgKeyError::NotFound`).
    async fn provider_key(&self, provider_id: &str) -> Result<SymmetricKey>;

    /// Decrypt `cipher_text` with the user's private key.
    async fn asymmetric_decrypt(
        &self,
        cipher_text: &str,
        key: &Self::PrivateKey,
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// Decrypt `cipher_text` with a symmetric key.
    async fn symmetric_decrypt(
        &self,
        cipher_text: &str,
        key: &SymmetricKey,
    ) -> Result<Zeroizing<Vec<u8>>>;
}
