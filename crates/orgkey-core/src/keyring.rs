//! Batch unwrapping of a stored organization key map.

use std::collections::BTreeMap;

use futures_util::future::try_join_all;

use crate::error::{OrgKeyError, Result};
use crate::key::SymmetricKey;
use crate::org_key::{EncryptedOrganizationKey, UnwrapOrganizationKey};
use crate::provider::CryptoProvider;
use crate::record::TransportRecord;

/// Why a record was left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The tag names no known variant, or is missing.
    Unrecognized,
    /// The tag is known but the record breaks that variant's invariants.
    Invalid(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrecognized => f.write_str("unrecognized"),
            Self::Invalid(reason) => write!(f, "invalid: {}", reason),
        }
    }
}

/// A record the factory could not turn into a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub organization_id: String,
    pub kind: Option<String>,
    pub provider_id: Option<String>,
    pub reason: SkipReason,
}

/// Recovered organization keys, keyed by organization id.
#[derive(Debug, Default)]
pub struct OrganizationKeys {
    pub keys: BTreeMap<String, SymmetricKey>,
    pub skipped: Vec<SkippedRecord>,
}

impl OrganizationKeys {
    pub fn get(&self, organization_id: &str) -> Option<&SymmetricKey> {
        self.keys.get(organization_id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Decrypt every recognized record in `records`.
///
/// Records the factory rejects are listed in [`OrganizationKeys::skipped`],
/// each with the reason it was rejected.
/// The remaining keys are decrypted concurrently; the first failure is
/// returned as-is and no partial result is produced.
pub async fn decrypt_organization_keys<P: CryptoProvider>(
    records: &BTreeMap<String, TransportRecord>,
    crypto: &P,
) -> Result<OrganizationKeys> {
    let mut pending = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (organization_id, record) in records {
        let reason = match EncryptedOrganizationKey::try_from_record(record) {
            Ok(key) => {
                pending.push((organization_id.clone(), key));
                continue;
            }
            Err(OrgKeyError::InvalidRecord(reason)) => SkipReason::Invalid(reason),
            Err(OrgKeyError::UnrecognizedVariant(_)) => SkipReason::Unrecognized,
            Err(err) => return Err(err),
        };

        tracing::warn!(
            organization_id = %organization_id,
            kind = record.tag().unwrap_or("<missing>"),
            reason = %reason,
            "skipping organization key record"
        );
        skipped.push(SkippedRecord {
            organization_id: organization_id.clone(),
            kind: record.kind.clone(),
            provider_id: record.provider_id.clone(),
            reason,
        });
    }

    let decrypted = try_join_all(pending.iter().map(|(organization_id, key)| async move {
        tracing::debug!(organization_id = %organization_id, kind = %key.kind(), "decrypting organization key");
        let symmetric = key.decrypt(crypto).await?;
        Ok::<_, OrgKeyError>((organization_id.clone(), symmetric))
    }))
    .await?;

    Ok(OrganizationKeys {
        keys: decrypted.into_iter().collect(),
        skipped,
    })
}
