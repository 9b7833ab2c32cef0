use log::debug;

use crate::config::RawRow;

pub const WRITE_IN: &str = "Write-In";
pub const OVER: &str = "over";
pub const UNDER: &str = "under";

/// Applies the per-row corrections, in order:
/// write-ins are relabeled, commas are stripped from the candidate name,
/// and the over/under vote labels are shortened.
pub fn normalize_row(mut row: RawRow) -> RawRow {
    if row.result_type_lbl == "WRI" {
        row.candidate_name = WRITE_IN.to_string();
    }
    if row.candidate_name.contains(',') {
        row.candidate_name = row.candidate_name.replace(',', "");
    }
    if let Some(label) = ballot_anomaly_label(&row.candidate_name) {
        row.candidate_name = label.to_string();
    }
    row
}

pub fn normalize_rows(rows: Vec<RawRow>) -> Vec<RawRow> {
    debug!("normalize_rows: {} rows", rows.len());
    rows.into_iter().map(normalize_row).collect()
}

/// True for the over/under pseudo-candidates, whatever their case.
pub fn is_ballot_anomaly(name: &str) -> bool {
    name.eq_ignore_ascii_case(OVER) || name.eq_ignore_ascii_case(UNDER)
}

fn ballot_anomaly_label(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "UNDER VOTE" | "UNDER VOTES" => Some(UNDER),
        "OVER VOTE" | "OVER VOTES" => Some(OVER),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(result_type: &str, name: &str) -> RawRow {
        RawRow {
            result_type_lbl: result_type.to_string(),
            candidate_name: name.to_string(),
            contest_title: "US SENATE".to_string(),
            vote_ct: Some(3.0),
            ..Default::default()
        }
    }

    #[test]
    fn write_ins_are_relabeled() {
        let r = normalize_row(row("WRI", "Smith, John"));
        assert_eq!(r.candidate_name, "Write-In");
    }

    #[test]
    fn commas_are_stripped() {
        let r = normalize_row(row("DEM", "Doe, Jane, Jr."));
        assert_eq!(r.candidate_name, "Doe Jane Jr.");
    }

    #[test]
    fn anomaly_labels_ignore_case() {
        assert_eq!(normalize_row(row("", "Over Votes")).candidate_name, "over");
        assert_eq!(normalize_row(row("", "OVER VOTE")).candidate_name, "over");
        assert_eq!(normalize_row(row("", "under vote")).candidate_name, "under");
        assert_eq!(normalize_row(row("", "UNDER VOTES")).candidate_name, "under");
        assert_eq!(
            normalize_row(row("", "UNDERWOOD VOTES")).candidate_name,
            "UNDERWOOD VOTES"
        );
    }

    #[test]
    fn other_fields_untouched() {
        let input = RawRow {
            county_id: "92".to_string(),
            election_dt: "11/05/2024".to_string(),
            precinct_code: "01-07".to_string(),
            candidate_party_lbl: "REP".to_string(),
            ..row("WRI", "X")
        };
        let out = normalize_row(input.clone());
        assert_eq!(out.county_id, input.county_id);
        assert_eq!(out.election_dt, input.election_dt);
        assert_eq!(out.precinct_code, input.precinct_code);
        assert_eq!(out.candidate_party_lbl, input.candidate_party_lbl);
        assert_eq!(out.vote_ct, input.vote_ct);
    }

    #[test]
    fn normalized_rows_hold_invariants() {
        let rows = vec![
            row("WRI", "A, B"),
            row("DEM", "C, D"),
            row("WRI", "OVER VOTES"),
            row("REP", ",,,"),
        ];
        for r in normalize_rows(rows) {
            assert!(!r.candidate_name.contains(','));
            if r.result_type_lbl == "WRI" {
                assert_eq!(r.candidate_name, WRITE_IN);
            }
        }
    }
}
