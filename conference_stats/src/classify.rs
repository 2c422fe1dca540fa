//! Detection of Big Tech affiliations in free-text institution lists.

use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Affiliation, Bloc};
use crate::normalize::{normalize_country_name, OTHER_COUNTRY, UNKNOWN_COUNTRY};

const ASIA_COMPANIES: &[&str] = &[
    "huawei", "alibaba", "bytedance", "tencent", "baidu", "samsung", "xiaomi", "tiktok",
];

const NORTH_AMERICA_COMPANIES: &[&str] = &[
    "google",
    "alphabet",
    "microsoft",
    "azure",
    "amazon",
    "aws",
    "meta",
    "facebook",
    "apple",
    "ibm",
    "oracle",
    "cisco",
    "hp",
    "hpe",
    r"hewlett[\s-]*packard",
    "nvidia",
    "vmware",
    "netflix",
    "uber",
    "twitter",
    "yahoo",
    "snap",
    "salesforce",
    "amd",
    "qualcomm",
    "broadcom",
    "intel",
];

const EUROPE_COMPANIES: &[&str] = &[
    "arm",
    "ericsson",
    "nokia",
    "siemens",
    "orange",
    "atos",
    r"deutsche\s+telekom",
    "bosch",
    "airbus",
    "sap",
    "telef[oó]nica",
    "vodafone",
    "thales",
    "philips",
];

fn bloc_regex(names: &[&str]) -> Regex {
    let pattern = format!(r"(?i)\b(?:{})\b", names.join("|"));
    // The patterns are constants of this module.
    Regex::new(&pattern).expect("invalid company pattern")
}

static BLOC_PATTERNS: Lazy<Vec<(Bloc, Regex)>> = Lazy::new(|| {
    vec![
        (Bloc::NorthAmerica, bloc_regex(NORTH_AMERICA_COMPANIES)),
        (Bloc::Europe, bloc_regex(EUROPE_COMPANIES)),
        (Bloc::Asia, bloc_regex(ASIA_COMPANIES)),
    ]
});

// "Name (Country)", the country being optional.
static INSTITUTION_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\(([^()]*)\)\s*$").expect("invalid institution pattern"));

/// Classifies the institutions text of a record.
///
/// Empty text is `Unmapped`. Otherwise every bloc with at least one matching
/// company is reported, and a text without any match is `Academia`.
pub fn classify_affiliation(institutions: &str) -> Affiliation {
    if institutions.trim().is_empty() {
        return Affiliation::Unmapped;
    }
    let blocs: Vec<Bloc> = BLOC_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(institutions))
        .map(|(bloc, _)| *bloc)
        .collect();
    if blocs.is_empty() {
        Affiliation::Academia
    } else {
        debug!("classify_affiliation: {:?} -> {:?}", institutions, blocs);
        let mut sorted = blocs;
        sorted.sort();
        Affiliation::BigTech(sorted)
    }
}

/// An institution parsed from a delimited institutions field.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct Institution {
    pub name: String,
    pub country: Option<String>,
}

/// Splits an institutions field on `;` and extracts the trailing
/// parenthetical country of each entry. Duplicates are removed, order is kept.
///
/// Commas are part of the names ("University of California, Berkeley").
pub fn parse_institutions(text: &str) -> Vec<Institution> {
    let mut seen: HashSet<Institution> = HashSet::new();
    let mut res: Vec<Institution> = Vec::new();
    for entry in text.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let inst = match INSTITUTION_ENTRY.captures(entry) {
            Some(caps) => {
                let country = normalize_country_name(&caps[2]);
                Institution {
                    name: caps[1].trim().to_string(),
                    country: if country == UNKNOWN_COUNTRY || country == OTHER_COUNTRY {
                        None
                    } else {
                        Some(country)
                    },
                }
            }
            None => Institution {
                name: entry.to_string(),
                country: None,
            },
        };
        if inst.name.is_empty() {
            continue;
        }
        if seen.insert(inst.clone()) {
            res.push(inst);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_and_mit_is_north_american_big_tech() {
        assert_eq!(
            classify_affiliation("Google; MIT"),
            Affiliation::BigTech(vec![Bloc::NorthAmerica])
        );
    }

    #[test]
    fn several_blocs() {
        assert_eq!(
            classify_affiliation("Huawei (China); Nokia Bell Labs (Finland); ETH Zurich"),
            Affiliation::BigTech(vec![Bloc::Europe, Bloc::Asia])
        );
        assert_eq!(
            classify_affiliation("TELEFÓNICA Research; Alibaba Group; Microsoft Research"),
            Affiliation::BigTech(vec![Bloc::NorthAmerica, Bloc::Europe, Bloc::Asia])
        );
    }

    #[test]
    fn word_boundaries() {
        // Neither "Intel" nor "ARM" nor "Meta".
        assert_eq!(
            classify_affiliation("Institute for Intelligent Systems; Army Research Lab; Metadata Inc"),
            Affiliation::Academia
        );
        assert_eq!(
            classify_affiliation("Hewlett Packard Labs"),
            Affiliation::BigTech(vec![Bloc::NorthAmerica])
        );
        assert_eq!(
            classify_affiliation("Deutsche  Telekom"),
            Affiliation::BigTech(vec![Bloc::Europe])
        );
    }

    #[test]
    fn empty_is_unmapped() {
        assert_eq!(classify_affiliation(""), Affiliation::Unmapped);
        assert_eq!(classify_affiliation("   "), Affiliation::Unmapped);
        assert_eq!(classify_affiliation("ETH Zurich"), Affiliation::Academia);
        assert!(!Affiliation::Academia.is_big_tech());
    }

    #[test]
    fn institutions_with_countries() {
        let res = parse_institutions(
            "MIT (USA); ETH Zurich (Switzerland); University of California, Berkeley; MIT (USA); Lab (Unknown)",
        );
        assert_eq!(
            res,
            vec![
                Institution {
                    name: "MIT".to_string(),
                    country: Some("United States".to_string())
                },
                Institution {
                    name: "ETH Zurich".to_string(),
                    country: Some("Switzerland".to_string())
                },
                Institution {
                    name: "University of California, Berkeley".to_string(),
                    country: None
                },
                Institution {
                    name: "Lab".to_string(),
                    country: None
                },
            ]
        );
        assert!(parse_institutions(" ; ").is_empty());
    }

    #[test]
    fn commas_do_not_separate_institutions() {
        let res = parse_institutions("University of California, Berkeley (USA); Google");
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].name, "University of California, Berkeley");
        assert_eq!(res[0].country.as_deref(), Some("United States"));

        let res = parse_institutions("Google, MIT");
        assert_eq!(res.len(), 1);
        assert_eq!(
            classify_affiliation("Google, MIT"),
            Affiliation::BigTech(vec![Bloc::NorthAmerica])
        );
    }
}
