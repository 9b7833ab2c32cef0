use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

use crate::config::{CandidateResult, ContestGroup, RawRow};
use crate::normalize::is_ballot_anomaly;

#[derive(Debug, Default)]
struct CandidateTally<'a> {
    votes: f64,
    parties: BTreeMap<&'a str, usize>,
}

impl CandidateTally<'_> {
    // Most frequent non-empty label. On ties, the smallest label wins.
    fn party(&self) -> String {
        let mut best: Option<(&str, usize)> = None;
        for (label, count) in self.parties.iter() {
            match best {
                Some((_, c)) if c >= *count => {}
                _ => best = Some((*label, *count)),
            }
        }
        best.map(|(l, _)| l.to_string()).unwrap_or_default()
    }
}

/// Per-candidate totals for a contest, sorted by candidate name.
///
/// Candidates without any vote are dropped. The percentages are computed
/// over the valid votes, that is all the votes except the over and under votes.
pub fn summarize_candidates(group: &ContestGroup) -> Vec<CandidateResult> {
    let mut tallies: BTreeMap<&str, CandidateTally> = BTreeMap::new();
    for row in group.rows.iter() {
        let t = tallies.entry(row.candidate_name.as_str()).or_default();
        if let Some(v) = row.vote_ct {
            t.votes += v;
        } else {
            debug!(
                "summarize_candidates: {:?}: no vote count for {:?} in precinct {:?}",
                group.title, row.candidate_name, row.precinct_code
            );
        }
        if !row.candidate_party_lbl.is_empty() {
            *t.parties.entry(row.candidate_party_lbl.as_str()).or_insert(0) += 1;
        }
    }
    tallies.retain(|_, t| t.votes != 0.0);

    let valid_total: f64 = tallies
        .iter()
        .filter(|(name, _)| !is_ballot_anomaly(name))
        .map(|(_, t)| t.votes)
        .sum();

    tallies
        .iter()
        .map(|(name, t)| {
            let votes = t.votes as i64;
            CandidateResult {
                name: name.to_string(),
                political_party: t.party(),
                votes,
                total_votes: valid_total as i64,
                percent: percent(votes, valid_total),
                total: "all".to_string(),
            }
        })
        .collect()
}

// Two decimals, rounding the binary value with ties to even.
fn percent(votes: i64, valid_total: f64) -> f64 {
    if valid_total > 0.0 {
        let share = votes as f64 / valid_total * 100.0;
        format!("{:.2}", share).parse::<f64>().unwrap_or(share)
    } else {
        0.0
    }
}

/// The year of the first election date of the contest that can be read as MM/DD/YYYY.
pub fn contest_year(rows: &[RawRow]) -> Option<i32> {
    rows.iter()
        .map(|r| r.election_dt.trim())
        .filter(|s| !s.is_empty())
        .find_map(|s| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok())
        .map(|d| d.year())
}
