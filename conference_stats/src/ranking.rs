//! Rankings of countries and institutions with fractional weights.
//!
//! A record listing `k` identities gives `1/k` to each of them, so that every
//! mapped record weighs exactly 1 in total.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use log::{debug, info};

use crate::aggregate::{percentage, round2};
use crate::classify::{parse_institutions, Institution};
use crate::config::YearWindow;
use crate::normalize::normalize_country_name;
use crate::records::Record;

/// An identity that can be ranked. Ties are broken by the sort name.
pub trait Ranked: Clone + Eq + Hash + Ord {
    fn sort_name(&self) -> String;
}

impl Ranked for String {
    fn sort_name(&self) -> String {
        self.clone()
    }
}

impl Ranked for Institution {
    fn sort_name(&self) -> String {
        match &self.country {
            Some(c) => format!("{} ({})", self.name, c),
            None => self.name.clone(),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankEntry<I> {
    pub identity: I,
    pub weight: f64,
    /// Share of the total weight, rounded to 2 decimals.
    pub percent: f64,
    /// 1-based position after sorting.
    pub rank: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankingTable<I> {
    pub entries: Vec<RankEntry<I>>,
    /// Sum of all the weights: the number of mapped records.
    pub total_weight: f64,
    pub mapped_rows: usize,
    /// Records without any identity. They carry no weight.
    pub unmapped_rows: usize,
}

impl<I> RankingTable<I> {
    /// Share of the records without identity, over all the records.
    pub fn unmapped_row_percent(&self) -> f64 {
        percentage(
            self.unmapped_rows as f64,
            (self.mapped_rows + self.unmapped_rows) as f64,
        )
    }
}

/// Restricts the records considered by a ranking.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RankingFilter {
    pub window: Option<YearWindow>,
    pub conference: Option<String>,
}

impl RankingFilter {
    fn accepts(&self, r: &Record) -> bool {
        r.in_window(&self.window)
            && self
                .conference
                .as_ref()
                .map(|c| *c == r.conference)
                .unwrap_or(true)
    }
}

/// Tabulates the weights of the identities extracted from each record.
///
/// Duplicate identities within a record are counted once.
pub fn tabulate<I, F>(records: &[Record], filter: &RankingFilter, extract: F) -> RankingTable<I>
where
    I: Ranked,
    F: Fn(&Record) -> Vec<I>,
{
    let mut weights: BTreeMap<I, f64> = BTreeMap::new();
    let mut mapped_rows: usize = 0;
    let mut unmapped_rows: usize = 0;
    for r in records.iter().filter(|r| filter.accepts(r)) {
        let mut seen: HashSet<I> = HashSet::new();
        let identities: Vec<I> = extract(r)
            .into_iter()
            .filter(|i| seen.insert(i.clone()))
            .collect();
        if identities.is_empty() {
            unmapped_rows += 1;
            continue;
        }
        mapped_rows += 1;
        let w = 1.0 / identities.len() as f64;
        for i in identities {
            *weights.entry(i).or_insert(0.0) += w;
        }
    }
    let total_weight: f64 = weights.values().sum();
    debug!(
        "tabulate: {} identities, total weight {}, {} mapped rows, {} unmapped rows",
        weights.len(),
        total_weight,
        mapped_rows,
        unmapped_rows
    );

    let mut entries: Vec<RankEntry<I>> = weights
        .into_iter()
        .map(|(identity, weight)| RankEntry {
            identity,
            weight,
            percent: percentage(weight, total_weight),
            rank: 0,
        })
        .collect();
    sort_and_rank(&mut entries);
    RankingTable {
        entries,
        total_weight,
        mapped_rows,
        unmapped_rows,
    }
}

fn sort_and_rank<I: Ranked>(entries: &mut [RankEntry<I>]) {
    entries.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then_with(|| a.identity.sort_name().cmp(&b.identity.sort_name()))
    });
    for (idx, e) in entries.iter_mut().enumerate() {
        e.rank = idx + 1;
    }
}

pub fn country_ranking(records: &[Record], filter: &RankingFilter) -> RankingTable<String> {
    info!(
        "country_ranking: processing {} records, filter: {:?}",
        records.len(),
        filter
    );
    tabulate(records, filter, |r| r.countries.clone())
}

pub fn institution_ranking(records: &[Record], filter: &RankingFilter) -> RankingTable<Institution> {
    info!(
        "institution_ranking: processing {} records, filter: {:?}",
        records.len(),
        filter
    );
    tabulate(records, filter, |r| parse_institutions(&r.institutions))
}

impl RankingTable<Institution> {
    /// The institutions of one country, keeping the global weights and
    /// percentages. Ranks are renumbered within the country.
    pub fn for_country(&self, country: &str) -> Vec<RankEntry<Institution>> {
        let country = normalize_country_name(country);
        let mut res: Vec<RankEntry<Institution>> = self
            .entries
            .iter()
            .filter(|e| e.identity.country.as_deref() == Some(country.as_str()))
            .cloned()
            .collect();
        for (idx, e) in res.iter_mut().enumerate() {
            e.rank = idx + 1;
        }
        res
    }
}

impl<I: Clone> RankingTable<I> {
    pub fn top(&self, n: usize) -> Vec<RankEntry<I>> {
        self.entries.iter().take(n).cloned().collect()
    }

    /// Sum of the rounded percentages. Close to 100 unless empty.
    pub fn percent_sum(&self) -> f64 {
        round2(self.entries.iter().map(|e| e.percent).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DatasetBuilder;

    #[test]
    fn france_and_germany() {
        let records = DatasetBuilder::new()
            .country_paper("OSDI", "2020", "France; Germany")
            .country_paper("OSDI", "2020", "France")
            .records();
        let table = country_ranking(&records, &RankingFilter::default());
        assert_eq!(
            table.entries,
            vec![
                RankEntry {
                    identity: "France".to_string(),
                    weight: 1.5,
                    percent: 75.0,
                    rank: 1
                },
                RankEntry {
                    identity: "Germany".to_string(),
                    weight: 0.5,
                    percent: 25.0,
                    rank: 2
                },
            ]
        );
        assert_eq!(table.total_weight, 2.0);
    }

    #[test]
    fn weights_are_conserved() {
        let records = DatasetBuilder::new()
            .country_paper("NSDI", "2019", "USA; China; Germany")
            .country_paper("NSDI", "2019", "USA; usa; United States")
            .country_paper("NSDI", "2020", "Japan; Korea")
            .country_paper("NSDI", "2020", "")
            .country_paper("NSDI", "2020", "Unknown")
            .country_paper("NSDI", "2021", "India; Brazil; France; Spain; Italy; Chile; Peru")
            .records();
        let table = country_ranking(&records, &RankingFilter::default());
        assert_eq!(table.mapped_rows, 4);
        assert_eq!(table.unmapped_rows, 2);
        assert!((table.total_weight - 4.0).abs() < 1e-9);
        assert!((table.percent_sum() - 100.0).abs() <= 0.1);
        assert_eq!(table.unmapped_row_percent(), 33.33);
    }

    #[test]
    fn ties_are_broken_by_name() {
        let records = DatasetBuilder::new()
            .country_paper("ATC", "2020", "Spain")
            .country_paper("ATC", "2020", "Austria")
            .country_paper("ATC", "2020", "Canada")
            .records();
        let table = country_ranking(&records, &RankingFilter::default());
        let names: Vec<(&str, usize)> = table
            .entries
            .iter()
            .map(|e| (e.identity.as_str(), e.rank))
            .collect();
        assert_eq!(names, vec![("Austria", 1), ("Canada", 2), ("Spain", 3)]);
    }

    #[test]
    fn filters() {
        let records = DatasetBuilder::new()
            .country_paper("ATC", "2018", "Spain")
            .country_paper("ATC", "2020", "Austria")
            .country_paper("OSDI", "2020", "Canada")
            .records();
        let filter = RankingFilter {
            window: Some(YearWindow {
                start: 2019,
                end: 2021,
            }),
            conference: Some("ATC".to_string()),
        };
        let table = country_ranking(&records, &filter);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].identity, "Austria");
        assert_eq!(table.entries[0].percent, 100.0);
    }

    #[test]
    fn institutions_by_country() {
        let records = DatasetBuilder::new()
            .paper("SOSP", "2021", "NA", "MIT (USA); ETH Zurich (Switzerland)")
            .paper("SOSP", "2021", "NA", "MIT (USA)")
            .paper("SOSP", "2021", "NA", "CMU (United States); Google")
            .paper("SOSP", "2021", "NA", "")
            .records();
        let table = institution_ranking(&records, &RankingFilter::default());
        assert_eq!(table.unmapped_rows, 1);
        assert_eq!(table.entries[0].identity.name, "MIT");
        assert_eq!(table.entries[0].weight, 1.5);
        assert_eq!(table.entries[0].percent, 50.0);

        let us = table.for_country("usa");
        let names: Vec<(&str, usize, f64)> = us
            .iter()
            .map(|e| (e.identity.name.as_str(), e.rank, e.percent))
            .collect();
        assert_eq!(names, vec![("MIT", 1, 50.0), ("CMU", 2, 16.67)]);
        assert!(table.for_country("France").is_empty());
        assert_eq!(table.top(1).len(), 1);
    }
}
