//! # Orgkey Core
//!
//! Resolves an organization's symmetric key from its encrypted, at-rest form.
//!
//! An organization key is never stored in cleartext. It is persisted as
//! cipher text produced under one of two trust models: encrypted to the
//! current user's key pair, or encrypted under a provider key the user can
//! reach through a provider membership. This crate represents both forms
//! uniformly, picks the unwrap path from the record's tag, and returns the
//! recovered key.
//!
//! ## Architecture
//!
//! - **record**: Transport/storage shape of an encrypted key
//! - **org_key**: Closed set of encrypted key variants and the record factory
//! - **provider**: The crypto collaborator trait
//! - **key**: Recovered symmetric key material
//! - **keyring**: Batch unwrapping of an organization key map
//! - **age_provider**: Collaborator backed by the `age` crate
//!
//! ## Example
//!
//! ```no_run
//! use orgkey_core::{AgeCryptoProvider, EncryptedOrganizationKey, TransportRecord, UnwrapOrganizationKey};
//!
//! # async fn run(crypto: AgeCryptoProvider) -> orgkey_core::Result<()> {
//! let record = TransportRecord::from_json(r#"{"type":"organization","key":"..."}"#)?;
//! if let Some(encrypted) = EncryptedOrganizationKey::from_record(&record) {
//!     let key = encrypted.decrypt(&crypto).await?;
//!     println!("recovered {} key {}", key.kind().as_str(), key.fingerprint());
//! }
//! # Ok(())
//! # }
//! ```

pub mod age_provider;
pub mod error;
pub mod key;
pub mod keyring;
pub mod org_key;
pub mod provider;
pub mod record;

pub use age_provider::{parse_identity, AgeCryptoProvider};
pub use error::{OrgKeyError, Result};
pub use key::{SymmetricKey, SymmetricKeyKind};
pub use keyring::{decrypt_organization_keys, OrganizationKeys, SkipReason, SkippedRecord};
pub use org_key::{
    EncryptedOrganizationKey, OrganizationKeyKind, ProviderEncryptedKey, UnwrapOrganizationKey,
    UserEncryptedKey,
};
pub use provider::CryptoProvider;
pub use record::{parse_record_map, TransportRecord, ORGANIZATION_TAG, PROVIDER_TAG};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
