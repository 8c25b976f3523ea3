use anyhow::Context;
use lexifree_core::jsonl::{read_records, rewrite_records};
use serde_json::Value;

use crate::cli::ReversionArgs;
use crate::state::AppState;

pub fn run(state: &AppState, args: ReversionArgs) -> anyhow::Result<()> {
    if args.version.starts_with('v') {
        anyhow::bail!("version strings do not start with \"v\": use \"1.2\", not \"v1.2\"");
    }

    let path = state.entries_path();
    let mut records: Vec<Value> =
        read_records(&path).with_context(|| format!("reading {}", path.display()))?;
    let count = set_versions(&mut records, &args.version);
    rewrite_records(&path, &records).with_context(|| format!("rewriting {}", path.display()))?;

    tracing::info!("Set version {} on {} records in {}", args.version, count, path.display());
    Ok(())
}

/// Every other key of each record is kept as written.
fn set_versions(records: &mut [Value], version: &str) -> usize {
    let mut count = 0;
    for record in records.iter_mut() {
        if let Some(object) = record.as_object_mut() {
            object.insert("version".to_string(), Value::String(version.to_string()));
            count += 1;
        }
    }
    count
}
