use crate::cli::InspectArgs;
use crate::output::{print_records, records_json, RecordRow};

use super::read_record_file;

pub fn handle_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let records = read_record_file(&args.file)?;
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|(organization_id, record)| RecordRow::from_record(organization_id, record))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records_json(&rows))?);
    } else {
        print_records(&rows);
    }
    Ok(())
}
