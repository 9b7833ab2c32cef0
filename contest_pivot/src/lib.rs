mod config;
pub mod manual;
pub mod normalize;
pub mod partition;
pub mod pivot;
pub mod summary;
pub mod titles;
pub mod winners;

use log::{debug, info, warn};
use std::collections::HashSet;

pub use crate::config::*;
pub use crate::normalize::{normalize_row, normalize_rows};
pub use crate::partition::partition_contests;
pub use crate::pivot::{build_pivot, PivotMatrix, PivotRow};
pub use crate::summary::{contest_year, summarize_candidates};
pub use crate::winners::WinnerRegistry;

/// Everything produced for one contest: the index record and the table to
/// write in the record's `csv_file`.
#[derive(PartialEq, Debug, Clone)]
pub struct ContestOutput {
    pub record: ContestRecord,
    pub pivot: PivotMatrix,
}

/// Name of the CSV file of a contest: `{file_stem}_{display name}.csv`,
/// with spaces and path separators replaced by underscores.
pub fn csv_file_name(file_stem: &str, display_name: &str) -> String {
    let sanitized: String = display_name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("{}_{}.csv", file_stem, sanitized)
}

/// Builds the record and the pivot table of a contest.
pub fn tabulate_contest(
    group: &ContestGroup,
    file_stem: &str,
    winners: &WinnerRegistry,
) -> ContestOutput {
    let name = titles::mutate(&group.title);
    let year = contest_year(&group.rows);
    let pick = winners.pick(year, &group.title);
    let record = ContestRecord {
        csv_file: csv_file_name(file_stem, &name),
        name,
        year,
        tags: titles::classify(&group.title),
        pick,
        candidates: summarize_candidates(group),
    };
    let pivot = build_pivot(group);
    debug!(
        "tabulate_contest: {:?} -> {:?} year: {:?} pick: {} candidates: {} precincts: {}",
        group.title,
        record.name,
        year,
        pick,
        record.candidates.len(),
        pivot.rows.len()
    );
    ContestOutput { record, pivot }
}

/// Runs the whole chain on the rows of one input file.
///
/// Arguments:
/// * `rows` the raw rows of the file, in file order
/// * `file_stem` the base name of the input file, used to name the CSV files
/// * `winners` the number of seats per contest
/// * `rules` the contests to leave out
pub fn tabulate_file(
    rows: Vec<RawRow>,
    file_stem: &str,
    winners: &WinnerRegistry,
    rules: &PartitionRules,
) -> Vec<ContestOutput> {
    info!("Processing {} rows from {:?}", rows.len(), file_stem);
    let groups = partition_contests(normalize_rows(rows), rules);
    info!("Found {} contests in {:?}", groups.len(), file_stem);
    let outputs: Vec<ContestOutput> = groups
        .iter()
        .map(|g| tabulate_contest(g, file_stem, winners))
        .collect();
    for csv_file in shared_csv_files(&outputs) {
        warn!(
            "Several contests of {:?} are written to {:?}, only the last table is kept",
            file_stem, csv_file
        );
    }
    outputs
}

/// The CSV file names used by more than one contest.
///
/// Different raw titles can have the same display name, for example
/// `CITY OF RALEIGH MAYOR` and `RALEIGH MAYOR`.
pub fn shared_csv_files(outputs: &[ContestOutput]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut shared: Vec<&str> = Vec::new();
    for o in outputs.iter() {
        let f = o.record.csv_file.as_str();
        if !seen.insert(f) && !shared.contains(&f) {
            shared.push(f);
        }
    }
    shared
}

/// The index of a file, in contest order.
pub fn build_index(outputs: &[ContestOutput]) -> ContestIndex {
    ContestIndex {
        contests: outputs.iter().map(|o| o.record.clone()).collect(),
    }
}
