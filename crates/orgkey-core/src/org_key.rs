//! Encrypted organization key variants.
//!
//! An organization key is persisted only as cipher text, produced under one
//! of two trust models:
//!
//! - **User**: encrypted to the current user's public key, unwrapped with the
//!   user's private key (tag `"organization"`).
//! - **Provider**: encrypted under a provider's symmetric key, which the user
//!   reaches through a provider membership (tag `"provider"`).
//!
//! [`EncryptedOrganizationKey`] is the closed set of both forms. Every site
//! that needs to tell them apart matches exhaustively, so a new variant does
//! not compile until each site handles it.

use async_trait::async_trait;

use crate::error::{OrgKeyError, Result};
use crate::key::SymmetricKey;
use crate::provider::CryptoProvider;
use crate::record::{TransportRecord, ORGANIZATION_TAG, PROVIDER_TAG};

/// Capability shared by every encrypted organization key form.
#[async_trait]
pub trait UnwrapOrganizationKey {
    /// Recover the organization key using `crypto` for key material and primitives.
    ///
    /// Collaborator failures are returned exactly as the collaborator produced them.
    async fn decrypt<P: CryptoProvider>(&self, crypto: &P) -> Result<SymmetricKey>;

    /// Serialize back to the transport/storage shape.
    fn to_record(&self) -> TransportRecord;
}

/// Which trust model an encrypted organization key uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationKeyKind {
    Organization,
    Provider,
}

impl OrganizationKeyKind {
    /// The transport tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => ORGANIZATION_TAG,
            Self::Provider => PROVIDER_TAG,
        }
    }
}

impl std::fmt::Display for OrganizationKeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization key encrypted to the current user's key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEncryptedKey {
    cipher_text: String,
}

impl UserEncryptedKey {
    /// # Errors
    ///
    /// Returns `OrgKeyError::InvalidRecord` if `cipher_text` is empty.
    pub fn new(cipher_text: impl Into<String>) -> Result<Self> {
        let cipher_text = cipher_text.into();
        if cipher_text.is_empty() {
            return Err(OrgKeyError::InvalidRecord(
                "organization key cipher text cannot be empty".to_string(),
            ));
        }
        Ok(Self { cipher_text })
    }

    pub fn cipher_text(&self) -> &str {
        &self.cipher_text
    }
}

#[async_trait]
impl UnwrapOrganizationKey for UserEncryptedKey {
    async fn decrypt<P: CryptoProvider>(&self, crypto: &P) -> Result<SymmetricKey> {
        let private_key = crypto
            .private_key()
            .await?
            .ok_or(OrgKeyError::MissingKeyMaterial)?;

        let bytes = crypto
            .asymmetric_decrypt(&self.cipher_text, &private_key)
            .await?;
        SymmetricKey::from_bytes(bytes)
    }

    fn to_record(&self) -> TransportRecord {
        TransportRecord::organization(self.cipher_text.clone())
    }
}

/// Organization key encrypted under a provider's symmetric key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEncryptedKey {
    cipher_text: String,
    provider_id: String,
}

impl ProviderEncryptedKey {
    /// # Errors
    ///
    /// Returns `OrgKeyError::InvalidRecord` if either field is empty.
    pub fn new(cipher_text: impl Into<String>, provider_id: impl Into<String>) -> Result<Self> {
        let cipher_text = cipher_text.into();
        let provider_id = provider_id.into();
        if cipher_text.is_empty() {
            return Err(OrgKeyError::InvalidRecord(
                "provider key cipher text cannot be empty".to_string(),
            ));
        }
        if provider_id.is_empty() {
            return Err(OrgKeyError::InvalidRecord(
                "provider id cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            cipher_text,
            provider_id,
        })
    }

    pub fn cipher_text(&self) -> &str {
        &self.cipher_text
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }
}

#[async_trait]
impl UnwrapOrganizationKey for ProviderEncryptedKey {
    async fn decrypt<P: CryptoProvider>(&self, crypto: &P) -> Result<SymmetricKey> {
        let provider_key = crypto.provider_key(&self.provider_id).await?;

        let bytes = crypto
            .symmetric_decrypt(&self.cipher_text, &provider_key)
            .await?;
        SymmetricKey::from_bytes(bytes)
    }

    fn to_record(&self) -> TransportRecord {
        TransportRecord::provider(self.cipher_text.clone(), self.provider_id.clone())
    }
}

/// An organization key, still encrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptedOrganizationKey {
    User(UserEncryptedKey),
    Provider(ProviderEncryptedKey),
}

impl EncryptedOrganizationKey {
    /// Build the variant named by the record's tag.
    ///
    /// Returns `None` when the tag is not recognized, or when a recognized
    /// record cannot satisfy its variant's invariants. Neither case is an
    /// error; callers check for `None` before use. See
    /// [`try_from_record`](Self::try_from_record) for the reason.
    pub fn from_record(record: &TransportRecord) -> Option<Self> {
        Self::try_from_record(record).ok()
    }

    /// Like [`from_record`](Self::from_record), but reports why a record was rejected.
    ///
    /// # Errors
    ///
    /// - `OrgKeyError::UnrecognizedVariant` for an unknown or missing tag
    /// - `OrgKeyError::InvalidRecord` when `providerId` is present on a
    ///   non-provider record, missing on a provider record, or a field is empty
    pub fn try_from_record(record: &TransportRecord) -> Result<Self> {
        match record.tag() {
            Some(ORGANIZATION_TAG) => {
                if record.provider_id.is_some() {
                    return Err(OrgKeyError::InvalidRecord(
                        "organization record must not carry a providerId".to_string(),
                    ));
                }
                UserEncryptedKey::new(record.key.clone()).map(Self::User)
            }
            Some(PROVIDER_TAG) => {
                let provider_id = record.provider_id.clone().ok_or_else(|| {
                    OrgKeyError::InvalidRecord("provider record is missing providerId".to_string())
                })?;
                ProviderEncryptedKey::new(record.key.clone(), provider_id).map(Self::Provider)
            }
            other => Err(OrgKeyError::UnrecognizedVariant(other.map(str::to_string))),
        }
    }

    pub fn kind(&self) -> OrganizationKeyKind {
        match self {
            Self::User(_) => OrganizationKeyKind::Organization,
            Self::Provider(_) => OrganizationKeyKind::Provider,
        }
    }

    pub fn cipher_text(&self) -> &str {
        match self {
            Self::User(key) => key.cipher_text(),
            Self::Provider(key) => key.cipher_text(),
        }
    }

    /// The provider whose key unwraps this one, for provider-encrypted keys.
    pub fn provider_id(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Provider(key) => Some(key.provider_id()),
        }
    }
}

#[async_trait]
impl UnwrapOrganizationKey for EncryptedOrganizationKey {
    async fn decrypt<P: CryptoProvider>(&self, crypto: &P) -> Result<SymmetricKey> {
        match self {
            Self::User(key) => key.decrypt(crypto).await,
            Self::Provider(key) => key.decrypt(crypto).await,
        }
    }

    fn to_record(&self) -> TransportRecord {
        match self {
            Self::User(key) => key.to_record(),
            Self::Provider(key) => key.to_record(),
        }
    }
}

impl From<UserEncryptedKey> for EncryptedOrganizationKey {
    fn from(key: UserEncryptedKey) -> Self {
        Self::User(key)
    }
}

impl From<ProviderEncryptedKey> for EncryptedOrganizationKey {
    fn from(key: ProviderEncryptedKey) -> Self {
        Self::Provider(key)
    }
}
