//! Row types shared by the JSON and text renderers.

use zeroize::Zeroizing;

use orgkey_core::{
    EncryptedOrganizationKey, OrgKeyError, SkipReason, SkippedRecord, TransportRecord,
};

/// Whether a stored record maps to a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Ok,
    Unrecognized,
    Invalid(String),
}

impl RecordStatus {
    pub fn label(&self) -> String {
        match self {
            Self::Ok => "ok".to_string(),
            Self::Unrecognized => "unrecognized".to_string(),
            Self::Invalid(reason) => format!("invalid: {}", reason),
        }
    }
}

/// One line of `inspect` output.
#[derive(Debug, Clone)]
pub struct RecordRow {
    pub organization_id: String,
    /// The record's `type` tag, `None` when missing or not a string
    pub kind: Option<String>,
    pub provider_id: Option<String>,
    pub status: RecordStatus,
}

impl RecordRow {
    pub fn from_record(organization_id: &str, record: &TransportRecord) -> Self {
        let status = match EncryptedOrganizationKey::try_from_record(record) {
            Ok(_) => RecordStatus::Ok,
            Err(OrgKeyError::UnrecognizedVariant(_)) => RecordStatus::Unrecognized,
            Err(OrgKeyError::InvalidRecord(reason)) => RecordStatus::Invalid(reason),
            Err(other) => RecordStatus::Invalid(other.to_string()),
        };
        Self {
            organization_id: organization_id.to_string(),
            kind: record.kind.clone(),
            provider_id: record.provider_id.clone(),
            status,
        }
    }
}

/// One recovered key in `unwrap` output.
pub struct KeyRow {
    pub organization_id: String,
    pub source: String,
    pub provider_id: Option<String>,
    pub key_kind: &'static str,
    /// Fingerprint, or the base64 key when revealing
    pub value: Zeroizing<String>,
}

impl From<&SkipReason> for RecordStatus {
    fn from(reason: &SkipReason) -> Self {
        match reason {
            SkipReason::Unrecognized => Self::Unrecognized,
            SkipReason::Invalid(reason) => Self::Invalid(reason.clone()),
        }
    }
}

/// Render a skipped record as an inspect-style row.
pub fn skipped_row(skipped: &SkippedRecord) -> RecordRow {
    RecordRow {
        organization_id: skipped.organization_id.clone(),
        kind: skipped.kind.clone(),
        provider_id: skipped.provider_id.clone(),
        status: RecordStatus::from(&skipped.reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_each_record_shape() {
        let ok = RecordRow::from_record("a", &TransportRecord::provider("ct", "p1"));
        assert_eq!(ok.status, RecordStatus::Ok);
        assert_eq!(ok.provider_id.as_deref(), Some("p1"));

        let unknown = RecordRow::from_record(
            "b",
            &TransportRecord::from_json(r#"{"type":"unknown","key":"ct3"}"#).unwrap(),
        );
        assert_eq!(unknown.status, RecordStatus::Unrecognized);
        assert_eq!(unknown.status.label(), "unrecognized");

        let invalid = RecordRow::from_record(
            "c",
            &TransportRecord::from_json(r#"{"type":"provider","key":"ct"}"#).unwrap(),
        );
        assert!(matches!(invalid.status, RecordStatus::Invalid(_)));
        assert!(invalid.status.label().starts_with("invalid: "));

        let untagged =
            RecordRow::from_record("d", &TransportRecord::from_json(r#"{"key":"ct4"}"#).unwrap());
        assert_eq!(untagged.kind, None);
        assert_eq!(untagged.status, RecordStatus::Unrecognized);
    }

    #[test]
    fn test_skipped_row_matches_inspect_row() {
        let record = TransportRecord::from_json(
            r#"{"type":"organization","key":"ct1","providerId":"prov-9"}"#,
        )
        .unwrap();
        let skipped = SkippedRecord {
            organization_id: "org-o".to_string(),
            kind: record.kind.clone(),
            provider_id: record.provider_id.clone(),
            reason: SkipReason::Invalid(
                "organization record must not carry a providerId".to_string(),
            ),
        };

        let from_unwrap = skipped_row(&skipped);
        let from_inspect = RecordRow::from_record("org-o", &record);

        assert_eq!(from_unwrap.status, from_inspect.status);
        assert_eq!(from_unwrap.provider_id.as_deref(), Some("prov-9"));
        assert_eq!(from_unwrap.kind.as_deref(), Some("organization"));
        assert_eq!(
            from_unwrap.status.label(),
            "invalid: organization record must not carry a providerId"
        );
    }

    #[test]
    fn test_skipped_row_for_unknown_tag() {
        let skipped = SkippedRecord {
            organization_id: "org-u".to_string(),
            kind: Some("unknown".to_string()),
            provider_id: None,
            reason: SkipReason::Unrecognized,
        };
        assert_eq!(skipped_row(&skipped).status, RecordStatus::Unrecognized);
    }
}
