//! Text and table output formatting.

use std::io::IsTerminal;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use super::rows::{KeyRow, RecordRow};

/// Print inspected records.
pub fn print_records(rows: &[RecordRow]) {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.organization_id.clone(),
                row.kind.clone().unwrap_or_else(|| "-".to_string()),
                row.provider_id.clone().unwrap_or_else(|| "-".to_string()),
                row.status.label(),
            ]
        })
        .collect();
    println!(
        "{}",
        render(&["ORGANIZATION", "TYPE", "PROVIDER", "STATUS"], &body)
    );
}

/// Print recovered keys, followed by any skipped records.
pub fn print_keys(keys: &[KeyRow], skipped: &[RecordRow], reveal: bool) {
    let value_header = if reveal { "KEY" } else { "FINGERPRINT" };
    let body: Vec<Vec<String>> = keys
        .iter()
        .map(|row| {
            vec![
                row.organization_id.clone(),
                row.source.clone(),
                row.provider_id.clone().unwrap_or_else(|| "-".to_string()),
                row.key_kind.to_string(),
                row.value.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        render(
            &["ORGANIZATION", "TYPE", "PROVIDER", "KIND", value_header],
            &body
        )
    );

    if !skipped.is_empty() {
        println!();
        println!("Skipped {} record(s):", skipped.len());
        print_records(skipped);
    }
}

/// Bordered table on a terminal, tab-separated rows otherwise.
fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    if !std::io::stdout().is_terminal() {
        return plain(rows);
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

fn plain(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rows_are_tab_separated() {
        let rows = vec![
            vec!["org-a".to_string(), "organization".to_string()],
            vec!["org-b".to_string(), "provider".to_string()],
        ];
        assert_eq!(plain(&rows), "org-a\torganization\norg-b\tprovider");
    }
}
