//! Transport/storage shape of an encrypted organization key.
//!
//! ```json
//! { "type": "organization", "key": "<encoded ciphertext>" }
//! { "type": "provider",     "key": "<encoded ciphertext>", "providerId": "<id>" }
//! ```
//!
//! The `type` tag is kept as an optional plain string so that records written
//! by a newer schema still parse. A missing, `null` or non-string tag becomes
//! `None` instead of failing the whole record map; deciding whether a tag is
//! usable is left to
//! [`EncryptedOrganizationKey::from_record`](crate::EncryptedOrganizationKey::from_record).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Tag of a key encrypted to the current user's key pair.
pub const ORGANIZATION_TAG: &str = "organization";

/// Tag of a key encrypted to a provider key.
pub const PROVIDER_TAG: &str = "provider";

/// Serialized form of an encrypted organization key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRecord {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    pub key: String,
    #[serde(
        rename = "providerId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_id: Option<String>,
}

impl TransportRecord {
    /// Record for a key encrypted to the current user.
    pub fn organization(key: impl Into<String>) -> Self {
        Self {
            kind: Some(ORGANIZATION_TAG.to_string()),
            key: key.into(),
            provider_id: None,
        }
    }

    /// Record for a key encrypted to a provider.
    pub fn provider(key: impl Into<String>, provider_id: impl Into<String>) -> Self {
        Self {
            kind: Some(PROVIDER_TAG.to_string()),
            key: key.into(),
            provider_id: Some(provider_id.into()),
        }
    }

    /// The `type` tag, if the record carried a string one.
    pub fn tag(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// Any JSON value is accepted for the tag; only strings are kept.
fn lenient_tag<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(tag)) => Some(tag),
        _ => None,
    })
}

/// Parse the stored "organization id -> record" map.
pub fn parse_record_map(json: &str) -> Result<BTreeMap<String, TransportRecord>> {
    Ok(serde_json::from_str(json)?)
}
