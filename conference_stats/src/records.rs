use std::collections::HashMap;

use log::debug;

use crate::config::{Continent, YearWindow};
use crate::normalize::{normalize_conference_name, normalize_continent, parse_delimited_list};

/// A row as produced by a tabular loader: column name to cell content.
pub type RawRow = HashMap<String, String>;

// Column spellings found across the datasets, in order of preference.
const CONFERENCE_COLUMNS: &[&str] = &["conference", "Conference"];
const YEAR_COLUMNS: &[&str] = &["year", "Year"];
const CONTINENT_COLUMNS: &[&str] = &[
    "predominant_continent",
    "Predominant Continent",
    "continent",
    "Continent",
];
const INSTITUTIONS_COLUMNS: &[&str] = &["institutions", "Institutions"];
const COUNTRIES_COLUMNS: &[&str] = &["countries", "Countries"];

/// A paper or committee row after normalization.
///
/// Rows without a conference or without a valid year never become records.
#[derive(PartialEq, Debug, Clone)]
pub struct Record {
    pub conference: String,
    pub year: i32,
    /// `None` if the continent column is missing or not recognized.
    pub continent: Option<Continent>,
    /// Raw institutions text, trimmed.
    pub institutions: String,
    /// Normalized, distinct countries.
    pub countries: Vec<String>,
}

impl Record {
    pub fn from_row(row: &RawRow) -> Option<Record> {
        let conference = normalize_conference_name(field(row, CONFERENCE_COLUMNS));
        if conference.is_empty() {
            debug!("from_row: skipping row without conference: {:?}", row);
            return None;
        }
        let year = match parse_year(field(row, YEAR_COLUMNS)) {
            Some(y) => y,
            None => {
                debug!("from_row: skipping row without valid year: {:?}", row);
                return None;
            }
        };
        Some(Record {
            conference,
            year,
            continent: normalize_continent(field(row, CONTINENT_COLUMNS)),
            institutions: field(row, INSTITUTIONS_COLUMNS).trim().to_string(),
            countries: parse_delimited_list(field(row, COUNTRIES_COLUMNS)),
        })
    }

    pub fn in_window(&self, window: &Option<YearWindow>) -> bool {
        window.map(|w| w.contains(self.year)).unwrap_or(true)
    }
}

/// Normalizes all the rows, dropping the invalid ones.
pub fn ingest(rows: &[RawRow]) -> Vec<Record> {
    let records: Vec<Record> = rows.iter().filter_map(Record::from_row).collect();
    debug!(
        "ingest: {} valid records out of {} rows",
        records.len(),
        rows.len()
    );
    records
}

// First non-empty value among the accepted column names.
fn field<'a>(row: &'a RawRow, columns: &[&str]) -> &'a str {
    columns
        .iter()
        .filter_map(|c| row.get(*c))
        .find(|v| !v.trim().is_empty())
        .map(|v| v.as_str())
        .unwrap_or("")
}

fn parse_year(s: &str) -> Option<i32> {
    match s.trim().parse::<f64>() {
        Ok(y) if y.is_finite() && y.abs() < i32::MAX as f64 => Some(y.trunc() as i32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn paper_row() {
        let r = Record::from_row(&row(&[
            ("Conference", "osdi"),
            ("Year", "2020"),
            ("Predominant Continent", "NA"),
            ("Institutions", " Google; MIT "),
        ]))
        .unwrap();
        assert_eq!(r.conference, "OSDI");
        assert_eq!(r.year, 2020);
        assert_eq!(r.continent, Some(Continent::NorthAmerica));
        assert_eq!(r.institutions, "Google; MIT");
        assert!(r.countries.is_empty());
    }

    #[test]
    fn committee_country_row() {
        let r = Record::from_row(&row(&[
            ("conference", "Cloud"),
            ("year", "2019.0"),
            ("continent", "Atlantis"),
            ("countries", "USA; uk"),
        ]))
        .unwrap();
        assert_eq!(r.conference, "SOCC");
        assert_eq!(r.year, 2019);
        assert_eq!(r.continent, None);
        assert_eq!(
            r.countries,
            vec!["United States".to_string(), "United Kingdom".to_string()]
        );
    }

    #[test]
    fn invalid_rows_are_dropped() {
        let rows = vec![
            row(&[("conference", "OSDI"), ("year", "")]),
            row(&[("conference", "OSDI"), ("year", "n/a")]),
            row(&[("conference", "OSDI"), ("year", "inf")]),
            row(&[("conference", " "), ("year", "2020")]),
            row(&[("year", "2020")]),
            row(&[("conference", "OSDI"), ("year", "2020")]),
        ];
        let records = ingest(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2020);
    }

    #[test]
    fn window_filter() {
        let r = Record::from_row(&row(&[("conference", "NSDI"), ("year", "2018")])).unwrap();
        assert!(r.in_window(&None));
        assert!(r.in_window(&Some(YearWindow {
            start: 2018,
            end: 2018
        })));
        assert!(!r.in_window(&Some(YearWindow {
            start: 2019,
            end: 2022
        })));
    }
}
