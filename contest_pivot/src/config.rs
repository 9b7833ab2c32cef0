// ********* Input data structures ***********

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// One record of a raw results extract.
///
/// Readers fill this structure from the fixed column set of the extract. The
/// vote count is kept as an option: a value that cannot be read as a number
/// keeps the row in its contest but leaves it out of every sum.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawRow {
    pub county_id: String,
    /// MM/DD/YYYY
    pub election_dt: String,
    pub result_type_lbl: String,
    pub contest_title: String,
    pub contest_party_lbl: String,
    pub precinct_code: String,
    pub candidate_name: String,
    pub candidate_party_lbl: String,
    pub vote_ct: Option<f64>,
}

/// The columns that every extract must provide, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "county_id",
    "election_dt",
    "result_type_lbl",
    "contest_title",
    "contest_party_lbl",
    "precinct_code",
    "candidate_name",
    "candidate_party_lbl",
    "vote_ct",
];

/// Parses the text of a vote count cell.
///
/// Returns None for empty or non-numeric content.
pub fn parse_vote_count(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// All the rows of one contest, in the order of the input file.
#[derive(PartialEq, Debug, Clone)]
pub struct ContestGroup {
    pub title: String,
    pub rows: Vec<RawRow>,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Federal,
    State,
    Local,
    /// Bonds and referenda.
    Ref,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CandidateResult {
    pub name: String,
    pub political_party: String,
    pub votes: i64,
    pub total_votes: i64,
    pub percent: f64,
    pub total: String,
}

// Without valid votes, the percent is written as the integer 0.
impl Serialize for CandidateResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("CandidateResult", 6)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("political_party", &self.political_party)?;
        st.serialize_field("votes", &self.votes)?;
        st.serialize_field("total_votes", &self.total_votes)?;
        if self.total_votes == 0 {
            st.serialize_field("percent", &0i64)?;
        } else {
            st.serialize_field("percent", &self.percent)?;
        }
        st.serialize_field("total", &self.total)?;
        st.end()
    }
}

/// The summary of one contest, as written in the index.
/// The field order is the key order of the JSON output.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct ContestRecord {
    pub name: String,
    pub csv_file: String,
    pub year: Option<i32>,
    pub tags: Vec<Tag>,
    pub pick: u32,
    pub candidates: Vec<CandidateResult>,
}

/// All the contests of one input file.
#[derive(PartialEq, Debug, Clone, Serialize, Default)]
pub struct ContestIndex {
    pub contests: Vec<ContestRecord>,
}

// ********* Configuration **********

/// Rules that decide which contests take part in the output.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartitionRules {
    /// Contests whose title contains any of these (case-insensitive) are dropped.
    pub excluded_contests: Vec<String>,
}

impl PartitionRules {
    pub fn default_rules() -> PartitionRules {
        PartitionRules {
            excluded_contests: vec!["DURHAM".to_string(), "ANGIER".to_string()],
        }
    }

    pub fn is_excluded(&self, title: &str) -> bool {
        let upper = title.to_uppercase();
        self.excluded_contests
            .iter()
            .any(|pat| !pat.is_empty() && upper.contains(&pat.to_uppercase()))
    }
}

impl Default for PartitionRules {
    fn default() -> Self {
        PartitionRules::default_rules()
    }
}
