use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::ContestGroup;

/// Votes of a contest, by precinct (rows) and candidate (columns).
///
/// Columns are sorted by candidate name and rows by precinct code, so that the
/// same input always gives the same table.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct PivotMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct PivotRow {
    /// The precinct code.
    pub id: String,
    pub cells: Vec<f64>,
}

impl PivotMatrix {
    /// Sums the votes of a contest by precinct and candidate. Missing cells are 0.
    pub fn build(group: &ContestGroup) -> PivotMatrix {
        let mut sums: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
        let mut candidates: BTreeSet<&str> = BTreeSet::new();
        for row in group.rows.iter() {
            if let Some(v) = row.vote_ct {
                *sums
                    .entry(row.precinct_code.as_str())
                    .or_default()
                    .entry(row.candidate_name.as_str())
                    .or_insert(0.0) += v;
                candidates.insert(row.candidate_name.as_str());
            }
        }
        let columns: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        let rows: Vec<PivotRow> = sums
            .iter()
            .map(|(precinct, votes)| PivotRow {
                id: precinct.to_string(),
                cells: candidates
                    .iter()
                    .map(|c| votes.get(c).cloned().unwrap_or(0.0))
                    .collect(),
            })
            .collect();
        PivotMatrix { columns, rows }
    }

    pub fn column_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.columns.len()];
        for row in self.rows.iter() {
            for (t, v) in totals.iter_mut().zip(row.cells.iter()) {
                *t += v;
            }
        }
        totals
    }

    /// Drops the candidates without any vote, then the precincts without any
    /// vote for the remaining candidates.
    pub fn prune(self) -> PivotMatrix {
        let keep: Vec<bool> = self.column_totals().iter().map(|t| *t != 0.0).collect();
        let columns: Vec<String> = self
            .columns
            .into_iter()
            .zip(keep.iter())
            .filter_map(|(c, k)| if *k { Some(c) } else { None })
            .collect();
        let num_rows = self.rows.len();
        let rows: Vec<PivotRow> = self
            .rows
            .into_iter()
            .map(|r| PivotRow {
                id: r.id,
                cells: r
                    .cells
                    .into_iter()
                    .zip(keep.iter())
                    .filter_map(|(v, k)| if *k { Some(v) } else { None })
                    .collect(),
            })
            .filter(|r| r.cells.iter().sum::<f64>() != 0.0)
            .collect();
        debug!(
            "prune: kept {}/{} columns, {}/{} rows",
            columns.len(),
            keep.len(),
            rows.len(),
            num_rows
        );
        PivotMatrix { columns, rows }
    }

    /// The rows with their cells cast to integers.
    ///
    /// Fractional counts are truncated toward zero.
    pub fn counts(&self) -> Vec<(&str, Vec<i64>)> {
        self.rows
            .iter()
            .map(|r| {
                let cells = r
                    .cells
                    .iter()
                    .map(|v| {
                        if v.fract() != 0.0 {
                            warn!("precinct {}: truncating fractional vote count {}", r.id, v);
                        }
                        *v as i64
                    })
                    .collect();
                (r.id.as_str(), cells)
            })
            .collect()
    }
}

/// The pruned precinct by candidate table of a contest.
pub fn build_pivot(group: &ContestGroup) -> PivotMatrix {
    PivotMatrix::build(group).prune()
}
