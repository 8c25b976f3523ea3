use std::fs;
use std::path::Path;

use anyhow::Context;
use lexifree_core::jsonl::read_records;
use lexifree_types::WordEntry;

use crate::cli::CostArgs;
use crate::state::AppState;

/// Records already counted by the last `cost` run.
const LATEST_MARKER: &str = ".latest.txt";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub cost: f64,
    pub records: usize,
}

impl CostSummary {
    pub fn per_thousand(&self) -> Option<f64> {
        (self.records > 0).then(|| self.cost / self.records as f64 * 1_000.0)
    }
}

pub fn run(state: &AppState, args: CostArgs) -> anyhow::Result<()> {
    let marker = Path::new(LATEST_MARKER);
    let start = if args.latest && marker.exists() {
        let text = fs::read_to_string(marker)?;
        text.trim()
            .parse()
            .with_context(|| format!("{LATEST_MARKER} holds {text:?}, expected a record count"))?
    } else {
        0
    };

    let entries_path = state.entries_path();
    let records: Vec<WordEntry> = read_records(&entries_path)
        .with_context(|| format!("reading {}", entries_path.display()))?;
    let summary = summarize(&records, start);
    fs::write(marker, format!("{}\n", records.len()))?;

    println!("Cost: ${:.2}", summary.cost);
    match summary.per_thousand() {
        Some(avg) => println!("Average per thousand entries: ${avg:.2}"),
        None => println!("No new entries."),
    }
    Ok(())
}

pub fn summarize(records: &[WordEntry], skip: usize) -> CostSummary {
    records
        .iter()
        .skip(skip)
        .fold(CostSummary { cost: 0.0, records: 0 }, |acc, r| CostSummary {
            cost: acc.cost + r.cost,
            records: acc.records + 1,
        })
}
