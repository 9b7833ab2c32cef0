use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashMap;

/// The number of seats to fill in each contest, by year.
///
/// The registry is read from a line-oriented file:
///
/// ```text
/// year 2024
/// WAKE COUNTY COMMISSIONER (VOTE FOR 2)
/// CITY OF RALEIGH COUNCIL AT-LARGE (VOTE FOR 2)
/// year 2022
/// WAKE COUNTY BOARD OF EDUCATION (VOTE FOR 3)
/// ```
///
/// ```
/// use contest_pivot::WinnerRegistry;
///
/// let reg = WinnerRegistry::parse("year 2024\nWAKE COUNTY COMMISSIONER (VOTE FOR 2)\n");
/// assert_eq!(reg.pick(Some(2024), "WAKE COUNTY COMMISSIONER"), 2);
/// assert_eq!(reg.pick(Some(2022), "WAKE COUNTY COMMISSIONER"), 1);
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct WinnerRegistry {
    picks: HashMap<(String, String), u32>,
}

pub const DEFAULT_PICK: u32 = 1;

lazy_static! {
    static ref YEAR_RX: Regex = Regex::new(r"^year\s+(\d{4})$").unwrap();
    static ref CONTEST_RX: Regex = Regex::new(r"^(.+?)\s*\(VOTE FOR (\d+)\)$").unwrap();
}

enum WinnerLine<'a> {
    Year(&'a str),
    Contest(&'a str, u32),
    Other,
}

fn classify_line(line: &str) -> WinnerLine<'_> {
    if let Some(caps) = YEAR_RX.captures(line) {
        if let Some(y) = caps.get(1) {
            return WinnerLine::Year(y.as_str());
        }
    }
    if let Some(caps) = CONTEST_RX.captures(line) {
        if let (Some(name), Some(n)) = (caps.get(1), caps.get(2)) {
            if let Ok(pick) = n.as_str().parse::<u32>() {
                return WinnerLine::Contest(name.as_str(), pick);
            }
        }
    }
    WinnerLine::Other
}

impl WinnerRegistry {
    /// Builds the registry from the content of a winners file.
    ///
    /// Unrecognized lines are skipped, as are contests listed before the
    /// first year line or with zero seats.
    pub fn parse(content: &str) -> WinnerRegistry {
        let (_, picks) = content.lines().map(str::trim).fold(
            (None::<String>, HashMap::new()),
            |(year, mut picks), line| match classify_line(line) {
                WinnerLine::Year(y) => (Some(y.to_string()), picks),
                WinnerLine::Contest(name, pick) if pick > 0 => {
                    if let Some(y) = year.clone() {
                        if let Some(prev) = picks.insert((y.clone(), name.to_string()), pick) {
                            debug!(
                                "WinnerRegistry: {} {:?} registered again ({} -> {})",
                                y, name, prev, pick
                            );
                        }
                    } else {
                        debug!("WinnerRegistry: no year set for {:?}, skipping", line);
                    }
                    (year, picks)
                }
                _ => (year, picks),
            },
        );
        debug!("WinnerRegistry: {} entries", picks.len());
        WinnerRegistry { picks }
    }

    /// The number of seats for a contest. Contests that are not registered,
    /// or without a known year, elect a single candidate.
    pub fn pick(&self, year: Option<i32>, contest_title: &str) -> u32 {
        year.and_then(|y| {
            self.picks
                .get(&(y.to_string(), contest_title.to_string()))
                .cloned()
        })
        .unwrap_or(DEFAULT_PICK)
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_and_miss() {
        let reg = WinnerRegistry::parse("year 2024\nWAKE COUNTY COMMISSIONER (VOTE FOR 2)\n");
        assert_eq!(reg.pick(Some(2024), "WAKE COUNTY COMMISSIONER"), 2);
        assert_eq!(reg.pick(Some(2024), "US SENATE"), 1);
        assert_eq!(reg.pick(None, "WAKE COUNTY COMMISSIONER"), 1);
    }

    #[test]
    fn year_context_carries_forward() {
        let content = "\
year 2022
WAKE COUNTY BOARD OF EDUCATION (VOTE FOR 3)
some note that is ignored
CARY TOWN COUNCIL AT-LARGE (VOTE FOR 2)
year 2024
WAKE COUNTY BOARD OF EDUCATION (VOTE FOR 1)
";
        let reg = WinnerRegistry::parse(content);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.pick(Some(2022), "WAKE COUNTY BOARD OF EDUCATION"), 3);
        assert_eq!(reg.pick(Some(2022), "CARY TOWN COUNCIL AT-LARGE"), 2);
        assert_eq!(reg.pick(Some(2024), "WAKE COUNTY BOARD OF EDUCATION"), 1);
        assert_eq!(reg.pick(Some(2024), "CARY TOWN COUNCIL AT-LARGE"), 1);
    }

    #[test]
    fn contests_before_any_year_are_ignored() {
        let reg = WinnerRegistry::parse("WAKE COUNTY COMMISSIONER (VOTE FOR 2)\nyear 2024\n");
        assert!(reg.is_empty());
    }

    #[test]
    fn zero_seats_are_ignored() {
        let reg = WinnerRegistry::parse("year 2024\nX (VOTE FOR 0)\n");
        assert!(reg.is_empty());
        assert_eq!(reg.pick(Some(2024), "X"), 1);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let reg = WinnerRegistry::parse("  year 2020  \r\n  NC HOUSE (VOTE FOR 2)   \r\n");
        assert_eq!(reg.pick(Some(2020), "NC HOUSE"), 2);
    }

    #[test]
    fn lookup_is_exact() {
        let reg = WinnerRegistry::parse("year 2024\nWake County Commissioner (VOTE FOR 2)\n");
        assert_eq!(reg.pick(Some(2024), "WAKE COUNTY COMMISSIONER"), 1);
    }
}
