//! JSON output formatting.

use super::rows::{KeyRow, RecordRow};

/// Convert inspected records to a JSON array.
pub fn records_json(rows: &[RecordRow]) -> serde_json::Value {
    serde_json::Value::Array(rows.iter().map(record_json).collect())
}

fn record_json(row: &RecordRow) -> serde_json::Value {
    serde_json::json!({
        "organization_id": row.organization_id,
        "type": row.kind,
        "provider_id": row.provider_id,
        "status": row.status.label(),
    })
}

/// Convert recovered keys and skipped records to JSON.
///
/// The key value field is named after what it holds so scripts cannot
/// mistake a fingerprint for key material.
pub fn keys_json(keys: &[KeyRow], skipped: &[RecordRow], reveal: bool) -> serde_json::Value {
    let value_field = if reveal { "key" } else { "fingerprint" };
    let keys: Vec<serde_json::Value> = keys
        .iter()
        .map(|row| {
            let mut value = serde_json::json!({
                "organization_id": row.organization_id,
                "type": row.source,
                "provider_id": row.provider_id,
                "key_kind": row.key_kind,
            });
            value[value_field] = serde_json::Value::String(row.value.to_string());
            value
        })
        .collect();

    serde_json::json!({
        "keys": keys,
        "skipped": records_json(skipped),
    })
}
