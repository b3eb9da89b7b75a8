use std::collections::BTreeMap;

use zeroize::Zeroizing;

use orgkey_core::{decrypt_organization_keys, OrganizationKeys, TransportRecord};

use crate::app::{resolve_key_sources, AppContext};
use crate::cli::UnwrapArgs;
use crate::output::{keys_json, print_keys, skipped_row, KeyRow, RecordRow};
use crate::security::build_crypto_provider;

use super::read_record_file;

pub async fn handle_unwrap(ctx: &AppContext<'_>, args: &UnwrapArgs) -> anyhow::Result<()> {
    let records = select_records(read_record_file(&args.file)?, args.org.as_deref())?;
    let sources = resolve_key_sources(ctx.config()?, args)?;
    let crypto = build_crypto_provider(&sources)?;

    let unwrapped = decrypt_organization_keys(&records, &crypto)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to unwrap organization keys: {}", e))?;

    let keys = key_rows(&records, &unwrapped, sources.reveal);
    let skipped: Vec<RecordRow> = unwrapped.skipped.iter().map(skipped_row).collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&keys_json(&keys, &skipped, sources.reveal))?
        );
    } else if ctx.quiet() {
        print_keys(&keys, &[], sources.reveal);
    } else {
        print_keys(&keys, &skipped, sources.reveal);
    }
    Ok(())
}

/// Narrow the record map to one organization when `--org` is given.
fn select_records(
    mut records: BTreeMap<String, TransportRecord>,
    organization_id: Option<&str>,
) -> anyhow::Result<BTreeMap<String, TransportRecord>> {
    let Some(organization_id) = organization_id else {
        return Ok(records);
    };
    let record = records
        .remove(organization_id)
        .ok_or_else(|| anyhow::anyhow!("Organization not found in key file: {}", organization_id))?;
    Ok(BTreeMap::from([(organization_id.to_string(), record)]))
}

fn key_rows(
    records: &BTreeMap<String, TransportRecord>,
    unwrapped: &OrganizationKeys,
    reveal: bool,
) -> Vec<KeyRow> {
    unwrapped
        .keys
        .iter()
        .filter_map(|(organization_id, key)| {
            let record = records.get(organization_id)?;
            let value = if reveal {
                key.to_base64()
            } else {
                Zeroizing::new(key.fingerprint())
            };
            Some(KeyRow {
                organization_id: organization_id.clone(),
                source: record.tag().unwrap_or_default().to_string(),
                provider_id: record.provider_id.clone(),
                key_kind: key.kind().as_str(),
                value,
            })
        })
        .collect()
}
