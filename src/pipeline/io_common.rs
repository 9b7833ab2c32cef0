use std::collections::HashMap;

use crate::pipeline::*;

/// The base name of an input file, without its extension.
pub fn file_stem(path: &Path) -> PivotResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .context(InvalidInputNameSnafu {
            path: path.display().to_string(),
        })
}

/// Where the required columns are found in a header.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnIndexes {
    indexes: HashMap<&'static str, usize>,
}

impl ColumnIndexes {
    pub fn from_header<'a>(
        header: impl Iterator<Item = &'a str>,
        path: &str,
    ) -> PivotResult<ColumnIndexes> {
        let positions: HashMap<String, usize> = header
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();
        let mut indexes: HashMap<&'static str, usize> = HashMap::new();
        for column in REQUIRED_COLUMNS.iter() {
            let idx = positions
                .get(*column)
                .cloned()
                .context(MissingColumnSnafu { column: *column, path })?;
            indexes.insert(*column, idx);
        }
        Ok(ColumnIndexes { indexes })
    }

    /// Builds a row out of the cells of a record. Missing cells are empty.
    pub fn make_row<F>(&self, cell: F) -> RawRow
    where
        F: Fn(usize) -> String,
    {
        let get = |name: &str| self.indexes.get(name).map(|i| cell(*i)).unwrap_or_default();
        RawRow {
            county_id: get("county_id"),
            election_dt: get("election_dt"),
            result_type_lbl: get("result_type_lbl"),
            contest_title: get("contest_title"),
            contest_party_lbl: get("contest_party_lbl"),
            precinct_code: get("precinct_code"),
            candidate_name: get("candidate_name"),
            candidate_party_lbl: get("candidate_party_lbl"),
            vote_ct: parse_vote_count(&get("vote_ct")),
        }
    }
}

/// Writes the table of a contest: a header `id,<candidates>` and one line per precinct.
pub fn write_pivot_csv(path: &Path, pivot: &PivotMatrix) -> PivotResult<()> {
    let p = path.display().to_string();
    let mut wtr = csv::Writer::from_path(path).context(WritingCsvSnafu { path: p.clone() })?;
    let mut header: Vec<&str> = vec!["id"];
    header.extend(pivot.columns.iter().map(|c| c.as_str()));
    wtr.write_record(&header)
        .context(WritingCsvSnafu { path: p.clone() })?;
    for (id, counts) in pivot.counts() {
        let mut record: Vec<String> = vec![id.to_string()];
        record.extend(counts.iter().map(|c| c.to_string()));
        wtr.write_record(&record)
            .context(WritingCsvSnafu { path: p.clone() })?;
    }
    wtr.flush().context(WritingOutputSnafu { path: p })?;
    Ok(())
}

/// Writes the index of a file, pretty-printed.
pub fn write_index_json(path: &Path, index: &ContestIndex) -> PivotResult<()> {
    let js = serde_json::to_string_pretty(index).context(ParsingJsonSnafu {})?;
    fs::write(path, js).context(WritingOutputSnafu {
        path: path.display().to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::scratch_dir;

    #[test]
    fn stems() {
        assert_eq!(file_stem(Path::new("raw/results_2024.txt")).unwrap(), "results_2024");
        assert_eq!(file_stem(Path::new("results")).unwrap(), "results");
        assert!(file_stem(Path::new("/")).is_err());
    }

    #[test]
    fn header_lookup() {
        let header = "vote_ct\tcandidate_party_lbl\tcandidate_name\tprecinct_code\tcontest_party_lbl\tcontest_title\tresult_type_lbl\telection_dt\tcounty_id";
        let cols = ColumnIndexes::from_header(header.split('\t'), "x").unwrap();
        let cells: Vec<&str> = vec!["12", "DEM", "Doe", "01-07", "", "US SENATE", "GEN", "11/05/2024", "92"];
        let row = cols.make_row(|i| cells.get(i).map(|s| s.to_string()).unwrap_or_default());
        assert_eq!(row.vote_ct, Some(12.0));
        assert_eq!(row.candidate_name, "Doe");
        assert_eq!(row.precinct_code, "01-07");
        assert_eq!(row.county_id, "92");
        assert_eq!(row.election_dt, "11/05/2024");
    }

    #[test]
    fn missing_column() {
        let header = "county_id\telection_dt\tcontest_title";
        let err = ColumnIndexes::from_header(header.split('\t'), "x.txt").unwrap_err();
        match err {
            PivotError::MissingColumn { column, path } => {
                assert_eq!(column, "result_type_lbl");
                assert_eq!(path, "x.txt");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    fn candidate(votes: i64, total_votes: i64, percent: f64) -> CandidateResult {
        CandidateResult {
            name: "over".to_string(),
            political_party: "".to_string(),
            votes,
            total_votes,
            percent,
            total: "all".to_string(),
        }
    }

    #[test]
    fn percent_without_valid_votes_is_an_integer() {
        let js = serde_json::to_value(candidate(4, 0, 0.0)).unwrap();
        assert_eq!(js["percent"], serde_json::json!(0));
        assert!(js["percent"].is_i64());

        let js = serde_json::to_value(candidate(1, 30000, 0.0)).unwrap();
        assert!(js["percent"].is_f64());
        let js = serde_json::to_value(candidate(1, 32, 3.12)).unwrap();
        assert_eq!(js["percent"], serde_json::json!(3.12));

        let keys: Vec<String> = js.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 6);
        let s = serde_json::to_string(&candidate(4, 0, 0.0)).unwrap();
        assert_eq!(
            s,
            r#"{"name":"over","political_party":"","votes":4,"total_votes":0,"percent":0,"total":"all"}"#
        );
    }

    #[test]
    fn empty_table() {
        let tmp = scratch_dir("empty_table");
        let dir = tmp.path().to_path_buf();
        let p = dir.join("t.csv");
        write_pivot_csv(&p, &PivotMatrix::default()).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "id\n");
    }
}
