//! Canonical forms for conference codes, continents and country names.
//!
//! All the functions are total: input that cannot be understood degrades to
//! an empty code, `None` or `"Unknown"`.

use std::collections::{HashMap, HashSet};

use log::debug;
use once_cell::sync::Lazy;

use crate::config::Continent;

pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const OTHER_COUNTRY: &str = "Other";

const CONFERENCE_ALIASES: &[(&str, &str)] = &[
    ("CLOUD", "SOCC"),
    ("ACM SOCC", "SOCC"),
    ("IEEE CLOUD", "IEEECLOUD"),
    ("IEEE-CLOUD", "IEEECLOUD"),
];

const NORTH_AMERICA_LABELS: &[&str] = &[
    "NA",
    "N.A.",
    "NORTH AMERICA",
    "NORTH_AMERICA",
    "NORTHAMERICA",
];
const EUROPE_LABELS: &[&str] = &["EU", "EUR", "EUROPE"];
const ASIA_LABELS: &[&str] = &["AS", "ASIA"];
const OTHER_LABELS: &[&str] = &[
    "OC",
    "OCEANIA",
    "AUSTRALIA",
    "SA",
    "SOUTH AMERICA",
    "SOUTH_AMERICA",
    "LATAM",
    "AF",
    "AFRICA",
    "ME",
    "MIDDLE EAST",
    "OTHER",
    "OTHERS",
];
const UNKNOWN_LABELS: &[&str] = &["UNKNOWN", "UNK"];

// Keys are lower case, with collapsed whitespace.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("us", "United States"),
    ("u.s.", "United States"),
    ("u.s.a.", "United States"),
    ("united states of america", "United States"),
    ("america", "United States"),
    ("uk", "United Kingdom"),
    ("u.k.", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("britain", "United Kingdom"),
    ("england", "United Kingdom"),
    ("scotland", "United Kingdom"),
    ("wales", "United Kingdom"),
    ("korea", "South Korea"),
    ("republic of korea", "South Korea"),
    ("korea, republic of", "South Korea"),
    ("korea (south)", "South Korea"),
    ("korea, south", "South Korea"),
    ("s. korea", "South Korea"),
    ("rok", "South Korea"),
    ("prc", "China"),
    ("p.r. china", "China"),
    ("pr china", "China"),
    ("people's republic of china", "China"),
    ("peoples republic of china", "China"),
    ("china (prc)", "China"),
    ("mainland china", "China"),
    ("hong kong sar", "Hong Kong"),
    ("hong kong, china", "Hong Kong"),
    ("hong kong sar, china", "Hong Kong"),
    ("macau sar", "Macau"),
    ("macao", "Macau"),
    ("republic of china", "Taiwan"),
    ("taiwan, roc", "Taiwan"),
    ("taiwan (roc)", "Taiwan"),
    ("russian federation", "Russia"),
    ("the netherlands", "Netherlands"),
    ("netherlands, the", "Netherlands"),
    ("holland", "Netherlands"),
    ("uae", "United Arab Emirates"),
    ("iran, islamic republic of", "Iran"),
    ("islamic republic of iran", "Iran"),
    ("viet nam", "Vietnam"),
    ("czechia", "Czech Republic"),
    ("türkiye", "Turkey"),
    ("turkiye", "Turkey"),
    ("bosnia and herzegovina", "Bosnia and Herzegovina"),
    ("trinidad and tobago", "Trinidad and Tobago"),
    ("unknown", UNKNOWN_COUNTRY),
    ("n/a", UNKNOWN_COUNTRY),
    ("na", UNKNOWN_COUNTRY),
    ("none", UNKNOWN_COUNTRY),
    ("other", OTHER_COUNTRY),
    ("others", OTHER_COUNTRY),
];

// Canonical names are also keys of the table, mapping to themselves.
static COUNTRY_LOOKUP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut m: HashMap<String, &'static str> = HashMap::new();
    for (_, canonical) in COUNTRY_ALIASES.iter() {
        m.insert(canonical.to_lowercase(), canonical);
    }
    for (alias, canonical) in COUNTRY_ALIASES.iter() {
        m.insert(alias.to_string(), canonical);
    }
    m
});

// A list element equal to one of these continues the previous element:
// "Korea, Republic of" and "Taiwan, ROC" are single countries.
const PROTECTED_CONTINUATIONS: &[&str] = &[
    "republic of",
    "republic of the",
    "democratic republic of the",
    "islamic republic of",
    "the",
    "sar",
    "south",
    "north",
    "roc",
];

pub fn normalize_conference_name(input: &str) -> String {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        return code;
    }
    CONFERENCE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(code)
}

pub fn normalize_continent(input: &str) -> Option<Continent> {
    let label = collapse_whitespace(input).to_uppercase();
    if label.is_empty() {
        return None;
    }
    let tables: [(&[&str], Continent); 5] = [
        (NORTH_AMERICA_LABELS, Continent::NorthAmerica),
        (EUROPE_LABELS, Continent::Europe),
        (ASIA_LABELS, Continent::Asia),
        (OTHER_LABELS, Continent::Other),
        (UNKNOWN_LABELS, Continent::Unknown),
    ];
    let res = tables
        .iter()
        .find(|(labels, _)| labels.contains(&label.as_str()))
        .map(|(_, c)| *c);
    if res.is_none() {
        debug!("normalize_continent: unrecognized continent {:?}", input);
    }
    res
}

pub fn normalize_country_name(input: &str) -> String {
    let name = collapse_whitespace(input);
    if name.is_empty() {
        return UNKNOWN_COUNTRY.to_string();
    }
    if let Some(canonical) = COUNTRY_LOOKUP.get(&name.to_lowercase()) {
        return canonical.to_string();
    }
    title_case(&name)
}

/// Splits a multi-valued country field into normalized, distinct country names.
///
/// Both `"France; Germany"` and list-shaped values such as `"['France', 'Germany']"`
/// are accepted. `"Unknown"` and `"Other"` are never returned.
pub fn parse_delimited_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let items: Vec<String> = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        let unquoted: Vec<&str> = trimmed[1..trimmed.len() - 1]
            .split(',')
            .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"'))
            .collect();
        split_on_commas(&unquoted.join(","))
    } else {
        trimmed.split(';').flat_map(split_on_commas).collect()
    };
    normalize_country_list(items)
}

/// Normalizes a list of country names that is already split.
pub fn normalize_country_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for item in items {
        let raw = item.as_ref().trim();
        if raw.is_empty() {
            continue;
        }
        let name = normalize_country_name(raw);
        if name == UNKNOWN_COUNTRY || name == OTHER_COUNTRY {
            continue;
        }
        if seen.insert(name.clone()) {
            res.push(name);
        }
    }
    res
}

fn split_on_commas(segment: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for piece in segment.split(',') {
        let lowered = piece.trim().to_lowercase();
        let continues = match parts.last() {
            Some(prev) => {
                PROTECTED_CONTINUATIONS.contains(&lowered.as_str())
                    || is_comma_alias(prev, piece)
            }
            None => false,
        };
        match parts.last_mut() {
            Some(prev) if continues => {
                prev.push_str(", ");
                prev.push_str(piece.trim());
            }
            _ => parts.push(piece.to_string()),
        }
    }
    parts
}

// "Hong Kong, China" is one country, not two.
fn is_comma_alias(prev: &str, piece: &str) -> bool {
    let joined = format!("{}, {}", collapse_whitespace(prev), collapse_whitespace(piece));
    COUNTRY_LOOKUP.contains_key(&joined.to_lowercase())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .enumerate()
        .map(|(idx, token)| title_case_token(token, idx > 0))
        .collect::<Vec<String>>()
        .join(" ")
}

fn title_case_token(token: &str, medial: bool) -> String {
    let lowered = token.to_lowercase();
    if medial && lowered == "of" {
        return lowered;
    }
    if token.chars().count() == 1 {
        let mut upper = token.chars().flat_map(char::to_uppercase);
        return match (upper.next(), upper.next()) {
            (Some(u), None) => u.to_string(),
            _ => token.to_string(),
        };
    }
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => {
            let mut upper = first.to_uppercase();
            // Keep characters without a single-character upper case form as they are.
            let head: String = match (upper.next(), upper.next()) {
                (Some(u), None) => u.to_string(),
                _ => first.to_string(),
            };
            head + chars.as_str()
        }
        None => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_codes() {
        assert_eq!(normalize_conference_name(" osdi "), "OSDI");
        assert_eq!(normalize_conference_name("Cloud"), "SOCC");
        assert_eq!(normalize_conference_name("ieee cloud"), "IEEECLOUD");
        assert_eq!(normalize_conference_name("   "), "");
        for c in ["osdi", "cloud", "IEEE Cloud", "NSDI", ""] {
            let once = normalize_conference_name(c);
            assert_eq!(normalize_conference_name(&once), once);
        }
    }

    #[test]
    fn continents() {
        assert_eq!(normalize_continent("NA"), Some(Continent::NorthAmerica));
        assert_eq!(normalize_continent(" north  america"), Some(Continent::NorthAmerica));
        assert_eq!(normalize_continent("eu"), Some(Continent::Europe));
        assert_eq!(normalize_continent("AS"), Some(Continent::Asia));
        assert_eq!(normalize_continent("Oceania"), Some(Continent::Other));
        assert_eq!(normalize_continent("Unknown"), Some(Continent::Unknown));
        assert_eq!(normalize_continent(""), None);
        assert_eq!(normalize_continent("Atlantis"), None);
    }

    #[test]
    fn country_aliases() {
        assert_eq!(normalize_country_name("USA"), "United States");
        assert_eq!(normalize_country_name("u.s.a."), "United States");
        assert_eq!(normalize_country_name("UK"), "United Kingdom");
        assert_eq!(normalize_country_name("Korea, Republic of"), "South Korea");
        assert_eq!(normalize_country_name("Republic of Korea"), "South Korea");
        assert_eq!(normalize_country_name("People's Republic of China"), "China");
        assert_eq!(normalize_country_name(""), "Unknown");
        assert_eq!(normalize_country_name("  "), "Unknown");
    }

    #[test]
    fn country_title_case() {
        assert_eq!(normalize_country_name("germany"), "Germany");
        assert_eq!(normalize_country_name("SAUDI   ARABIA"), "Saudi Arabia");
        assert_eq!(normalize_country_name("isle of man"), "Isle of Man");
        assert_eq!(normalize_country_name("of mice"), "Of Mice");
        assert_eq!(normalize_country_name("x land"), "X Land");
    }

    #[test]
    fn country_normalization_is_idempotent() {
        let samples = [
            "USA",
            "korea",
            "isle OF man",
            "of",
            "a b c",
            "Bosnia and Herzegovina",
            "bosnia AND herzegovina",
            "straße",
            "İstanbul",
            "",
            "Other",
            "côte d'ivoire",
            "guinea-BISSAU",
            "Hong Kong SAR",
            "ß",
            "ﬁ",
            "ß land",
        ];
        for s in samples {
            let once = normalize_country_name(s);
            assert_eq!(normalize_country_name(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn delimited_lists() {
        assert_eq!(
            parse_delimited_list("France; Germany"),
            vec!["France".to_string(), "Germany".to_string()]
        );
        assert_eq!(
            parse_delimited_list("USA, UK, United States"),
            vec!["United States".to_string(), "United Kingdom".to_string()]
        );
        assert_eq!(
            parse_delimited_list("Korea, Republic of; Japan"),
            vec!["South Korea".to_string(), "Japan".to_string()]
        );
        assert_eq!(
            parse_delimited_list("['France', \"Italy\"]"),
            vec!["France".to_string(), "Italy".to_string()]
        );
        assert_eq!(
            parse_delimited_list("USA, China, South Africa"),
            vec![
                "United States".to_string(),
                "China".to_string(),
                "South Africa".to_string()
            ]
        );
        assert_eq!(parse_delimited_list("Unknown; Other; "), Vec::<String>::new());
        assert_eq!(parse_delimited_list("Korea,Republic of"), vec!["South Korea".to_string()]);
        assert_eq!(parse_delimited_list(""), Vec::<String>::new());
    }

    #[test]
    fn aliases_with_commas_are_not_split() {
        assert_eq!(
            parse_delimited_list("Hong Kong, China"),
            vec!["Hong Kong".to_string()]
        );
        assert_eq!(
            parse_delimited_list("Hong Kong SAR, China; China"),
            vec!["Hong Kong".to_string(), "China".to_string()]
        );
        assert_eq!(
            parse_delimited_list("Singapore, Hong Kong,  China, Netherlands, The"),
            vec![
                "Singapore".to_string(),
                "Hong Kong".to_string(),
                "Netherlands".to_string()
            ]
        );
        assert_eq!(
            parse_delimited_list("['Hong Kong, China', 'Japan']"),
            vec!["Hong Kong".to_string(), "Japan".to_string()]
        );
        assert_eq!(
            parse_delimited_list("China, Hong Kong"),
            vec!["China".to_string(), "Hong Kong".to_string()]
        );
    }

    #[test]
    fn single_letters_keep_one_character() {
        assert_eq!(normalize_country_name("ß"), "ß");
        assert_eq!(normalize_country_name("ﬁ"), "ﬁ");
        assert_eq!(normalize_country_name("x"), "X");
    }

    #[test]
    fn already_split_lists() {
        let res = normalize_country_list(vec!["usa", " ", "germany", "USA"]);
        assert_eq!(res, vec!["United States".to_string(), "Germany".to_string()]);
    }
}
