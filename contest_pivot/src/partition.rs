use log::{debug, info};
use std::collections::HashMap;

use crate::config::{ContestGroup, PartitionRules, RawRow};

/// Splits the rows of a file by contest title.
///
/// Contests come out in the order of their first row in the file, and the
/// rows of each contest keep their file order. Excluded contests are dropped.
pub fn partition_contests(rows: Vec<RawRow>, rules: &PartitionRules) -> Vec<ContestGroup> {
    let mut groups: Vec<ContestGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut excluded: Vec<String> = Vec::new();

    for row in rows {
        if let Some(&idx) = positions.get(&row.contest_title) {
            groups[idx].rows.push(row);
            continue;
        }
        if rules.is_excluded(&row.contest_title) {
            if !excluded.contains(&row.contest_title) {
                excluded.push(row.contest_title.clone());
            }
            continue;
        }
        positions.insert(row.contest_title.clone(), groups.len());
        groups.push(ContestGroup {
            title: row.contest_title.clone(),
            rows: vec![row],
        });
    }

    for title in excluded.iter() {
        info!("partition_contests: excluding contest {:?}", title);
    }
    debug!(
        "partition_contests: {} contests, {} excluded",
        groups.len(),
        excluded.len()
    );
    groups
}
