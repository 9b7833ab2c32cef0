//! Rules applied to the raw contest titles: classification into tags and
//! rewriting into a shorter display name.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::config::Tag;

/// Tags of a contest, computed from the raw title.
///
/// The jurisdiction tag comes first. Bonds and referenda get an extra `ref`
/// tag in last position.
pub fn classify(title: &str) -> Vec<Tag> {
    let upper = title.to_uppercase();
    let primary = if upper.starts_with("US") {
        Tag::Federal
    } else if upper.starts_with("NC") {
        Tag::State
    } else if upper.starts_with("WAKE") {
        Tag::Local
    } else if upper.contains("CITY") || upper.contains("TOWN") {
        Tag::Local
    } else {
        Tag::State
    };
    let mut tags = vec![primary];
    if upper.contains("BOND") || upper.contains("REFERENDUM") {
        tags.push(Tag::Ref);
    }
    tags
}

type TitleRule = fn(&str) -> String;

/// The rewriting steps, applied in this order.
const MUTATION_RULES: [(&str, TitleRule); 7] = [
    ("strip_words", strip_words),
    ("title_case", title_case),
    ("substitute_phrases", substitute_phrases),
    ("strip_leading_zeros", strip_leading_zeros),
    ("lower_connectors", lower_connectors),
    ("restore_acronyms", restore_acronyms),
    ("remove_commas", remove_commas),
];

/// Display name of a contest.
///
/// ```
/// assert_eq!(
///     contest_pivot::titles::mutate("TOWN OF CARY COUNCIL DISTRICT 01"),
///     "Cary Council 1"
/// );
/// ```
pub fn mutate(title: &str) -> String {
    let res = MUTATION_RULES
        .iter()
        .fold(title.to_string(), |acc, (_, rule)| rule(&acc));
    debug!("mutate: {:?} -> {:?}", title, res);
    res
}

const REMOVED_WORDS: [&str; 7] = [
    "CITY OF ",
    "TOWN OF ",
    "IMPROVEMENTS ",
    "OF REPRESENTATIVES ",
    " REFERENDUM",
    " CONSERVATION DISTRICT SUPERVISOR",
    " CONSERVATION DIST SUPERVISOR",
];

// "DISTRICT " is only dropped when it does not belong to an office name.
const DISTRICT_OFFICES: [&str; 3] = ["DISTRICT ATTORNEY", "DISTRICT COURT", "DISTRICT SUPERVISOR"];

/// Upper-cases the title and removes the jurisdiction words.
pub fn strip_words(title: &str) -> String {
    let upper = title.to_uppercase();
    let keep_district = DISTRICT_OFFICES.iter().any(|o| upper.contains(o));
    let mut res = REMOVED_WORDS
        .iter()
        .fold(upper.clone(), |acc, w| acc.replace(w, ""));
    if !keep_district {
        res = res.replace("DISTRICT ", "");
    }
    res
}

/// Capitalizes every letter that does not follow another letter and
/// lower-cases the rest: `"2ND DISTRICT"` becomes `"2Nd District"`.
pub fn title_case(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                res.extend(c.to_lowercase());
            } else {
                res.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            res.push(c);
            prev_is_letter = false;
        }
    }
    res
}

const PHRASES: [(&str, &str); 7] = [
    ("Parks, Greenways, Recreation, And Open Space", "Parks and Rec"),
    ("Recreation ", "Rec "),
    ("Recreational ", "Rec "),
    (" Bonds", " Bond"),
    ("Wake Co. ", "Wake County "),
    ("Wake Co ", "Wake County "),
    ("Soil Water", "Soil and Water"),
];

pub fn substitute_phrases(s: &str) -> String {
    PHRASES
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

lazy_static! {
    static ref LEADING_ZEROS_RX: Regex = Regex::new(r"\b0+(\d)").unwrap();
}

/// `District 03` -> `District 3`. A lone `0` is left alone.
pub fn strip_leading_zeros(s: &str) -> String {
    LEADING_ZEROS_RX.replace_all(s, "$1").into_owned()
}

pub fn lower_connectors(s: &str) -> String {
    s.replace(" Of ", " of ").replace(" And ", " and ")
}

pub fn restore_acronyms(s: &str) -> String {
    s.replace("Us ", "US ").replace("Nc ", "NC ")
}

pub fn remove_commas(s: &str) -> String {
    s.replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_examples() {
        assert_eq!(classify("US SENATE"), vec![Tag::Federal]);
        assert_eq!(classify("NC GOVERNOR"), vec![Tag::State]);
        assert_eq!(classify("CITY OF RALEIGH COUNCIL"), vec![Tag::Local]);
        assert_eq!(classify("WAKE COUNTY SCHOOL BOND"), vec![Tag::Local, Tag::Ref]);
        assert_eq!(classify("TOWN OF CARY COUNCIL"), vec![Tag::Local]);
        assert_eq!(classify("NC SUPREME COURT ASSOCIATE JUSTICE"), vec![Tag::State]);
        assert_eq!(classify("DISTRICT ATTORNEY DISTRICT 10"), vec![Tag::State]);
        assert_eq!(
            classify("NC CONSTITUTIONAL AMENDMENT REFERENDUM"),
            vec![Tag::State, Tag::Ref]
        );
        assert_eq!(classify("us house of representatives"), vec![Tag::Federal]);
    }

    #[test]
    fn classify_is_pure() {
        let t = "CITY OF RALEIGH PARKS BOND REFERENDUM";
        assert_eq!(classify(t), classify(t));
        assert_eq!(classify(t), vec![Tag::Local, Tag::Ref]);
    }

    #[test]
    fn mutate_examples() {
        assert_eq!(mutate("TOWN OF CARY COUNCIL DISTRICT 01"), "Cary Council 1");
        assert_eq!(mutate("US SENATE"), "US Senate");
        assert_eq!(
            mutate("US HOUSE OF REPRESENTATIVES DISTRICT 02"),
            "US House 2"
        );
        assert_eq!(mutate("NC GOVERNOR"), "NC Governor");
        assert_eq!(
            mutate("WAKE COUNTY BOARD OF EDUCATION DISTRICT 06"),
            "Wake County Board of Education 6"
        );
        assert_eq!(
            mutate("DISTRICT ATTORNEY DISTRICT 10"),
            "District Attorney District 10"
        );
        assert_eq!(
            mutate("WAKE SOIL AND WATER CONSERVATION DISTRICT SUPERVISOR"),
            "Wake Soil and Water"
        );
        assert_eq!(
            mutate("CITY OF RALEIGH PARKS, GREENWAYS, RECREATION, AND OPEN SPACE BONDS REFERENDUM"),
            "Raleigh Parks and Rec Bond"
        );
        assert_eq!(
            mutate("WAKE CO. SCHOOL IMPROVEMENTS BONDS REFERENDUM"),
            "Wake County School Bond"
        );
    }

    #[test]
    fn mutate_is_idempotent_on_clean_titles() {
        for t in [
            "TOWN OF CARY COUNCIL DISTRICT 01",
            "US SENATE",
            "WAKE COUNTY BOARD OF EDUCATION DISTRICT 06",
            "NC COURT OF APPEALS JUDGE SEAT 12",
        ] {
            let once = mutate(t);
            assert_eq!(mutate(&once), once);
        }
    }

    #[test]
    fn strip_words_keeps_office_districts() {
        assert_eq!(strip_words("district court judge district 10f"), "DISTRICT COURT JUDGE DISTRICT 10F");
        assert_eq!(strip_words("NC SENATE DISTRICT 13"), "NC SENATE 13");
        assert_eq!(strip_words("CITY OF RALEIGH MAYOR"), "RALEIGH MAYOR");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("WAKE COUNTY 2ND DISTRICT"), "Wake County 2Nd District");
        assert_eq!(title_case("O'NEIL-SMITH"), "O'Neil-Smith");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(strip_leading_zeros("District 03"), "District 3");
        assert_eq!(strip_leading_zeros("Seat 007"), "Seat 7");
        assert_eq!(strip_leading_zeros("Seat 0"), "Seat 0");
        assert_eq!(strip_leading_zeros("Seat 00"), "Seat 0");
        assert_eq!(strip_leading_zeros("Year 2004"), "Year 2004");
    }

    #[test]
    fn connectors_only_mid_title() {
        assert_eq!(lower_connectors("Of Counsel And More"), "Of Counsel and More");
        assert_eq!(restore_acronyms("Nc House Us Senate"), "NC House US Senate");
    }
}
