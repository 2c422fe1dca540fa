//! Grouped counts and the percentages, gaps and indices derived from them.
//!
//! Every view is an instance of [`group_count`]: a key extractor decides the
//! group of a record (or drops it), a category extractor spreads a unit of
//! weight over categories. The group total always counts whole records, even
//! those that do not land in any category.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::{debug, info};

use crate::classify::classify_affiliation;
use crate::config::*;
use crate::normalize::{normalize_country_name, OTHER_COUNTRY, UNKNOWN_COUNTRY};
use crate::records::Record;

/// Rounds to 2 decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `count / total` in percent, rounded to 2 decimals. Zero when `total` is zero.
pub fn percentage(count: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        round2(count / total * 100.0)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub(crate) struct Tally<C: Ord> {
    pub(crate) counts: BTreeMap<C, f64>,
    /// Number of records in the group.
    pub(crate) total: f64,
}

impl<C: Ord> Tally<C> {
    fn new() -> Tally<C> {
        Tally {
            counts: BTreeMap::new(),
            total: 0.0,
        }
    }

    pub(crate) fn get(&self, c: &C) -> f64 {
        self.counts.get(c).cloned().unwrap_or(0.0)
    }

    /// Weight that landed in some category.
    pub(crate) fn categorized(&self) -> f64 {
        self.counts.values().sum()
    }
}

pub(crate) fn group_count<K, C, FK, FC>(
    records: &[Record],
    key: FK,
    categories: FC,
) -> BTreeMap<K, Tally<C>>
where
    K: Ord,
    C: Ord,
    FK: Fn(&Record) -> Option<K>,
    FC: Fn(&Record) -> Vec<(C, f64)>,
{
    let mut groups: BTreeMap<K, Tally<C>> = BTreeMap::new();
    for r in records.iter() {
        let k = match key(r) {
            Some(k) => k,
            None => continue,
        };
        let tally = groups.entry(k).or_insert_with(Tally::new);
        tally.total += 1.0;
        for (c, w) in categories(r) {
            *tally.counts.entry(c).or_insert(0.0) += w;
        }
    }
    groups
}

// Groups sort by year, then by conference.
fn year_key(r: &Record) -> Option<(i32, String)> {
    Some((r.year, r.conference.clone()))
}

/// Counts per (conference, year) and continent. Other and Unknown are merged.
pub fn continent_distribution(records: &[Record]) -> Vec<ContinentDistributionItem> {
    info!("continent_distribution: processing {} records", records.len());
    let groups = group_count(records, year_key, |r| {
        let bucket = r.continent.map(|c| match c {
            Continent::Unknown => Continent::Other,
            c => c,
        });
        vec![(bucket, 1.0)]
    });
    groups
        .into_iter()
        .map(|((year, conference), t)| ContinentDistributionItem {
            conference,
            year,
            north_america: t.get(&Some(Continent::NorthAmerica)) as u64,
            europe: t.get(&Some(Continent::Europe)) as u64,
            asia: t.get(&Some(Continent::Asia)) as u64,
            others: t.get(&Some(Continent::Other)) as u64,
            unmapped: t.get(&None) as u64,
            total: t.total as u64,
        })
        .collect()
}

impl ContinentDistributionItem {
    pub fn percentages(&self) -> ContinentShares {
        let total = self.total as f64;
        ContinentShares {
            north_america: percentage(self.north_america as f64, total),
            europe: percentage(self.europe as f64, total),
            asia: percentage(self.asia as f64, total),
            others: percentage(self.others as f64, total),
            unmapped: percentage(self.unmapped as f64, total),
        }
    }
}

/// Share of Asian records per (conference, year).
///
/// Unlike [`continent_distribution`], the denominator only counts the records
/// with a known continent.
pub fn asian_trend(records: &[Record]) -> Vec<AsianTrendItem> {
    info!("asian_trend: processing {} records", records.len());
    let groups = group_count(records, year_key, |r| match r.continent {
        Some(Continent::Unknown) | None => vec![],
        Some(c) => vec![(c, 1.0)],
    });
    groups
        .into_iter()
        .map(|((year, conference), t)| AsianTrendItem {
            conference,
            year,
            percentage: percentage(t.get(&Continent::Asia), t.categorized()),
        })
        .collect()
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Ord, PartialOrd)]
enum IndustryShare {
    BigTech,
    Academia,
    Unmapped,
    Region(Bloc),
}

fn industry_categories(r: &Record) -> Vec<(IndustryShare, f64)> {
    match classify_affiliation(&r.institutions) {
        Affiliation::BigTech(blocs) => {
            let w = 1.0 / blocs.len() as f64;
            let mut res = vec![(IndustryShare::BigTech, 1.0)];
            res.extend(blocs.into_iter().map(|b| (IndustryShare::Region(b), w)));
            res
        }
        Affiliation::Academia => vec![(IndustryShare::Academia, 1.0)],
        Affiliation::Unmapped => vec![(IndustryShare::Unmapped, 1.0)],
    }
}

fn clamped_percentage(count: f64, total: f64) -> f64 {
    percentage(count, total).clamp(0.0, 100.0)
}

/// Big Tech, academia and unmapped shares per (conference, year).
pub fn big_tech_vs_academia(records: &[Record]) -> Vec<BigTechItem> {
    info!("big_tech_vs_academia: processing {} records", records.len());
    group_count(records, year_key, industry_categories)
        .into_iter()
        .map(|((year, conference), t)| BigTechItem {
            conference,
            year,
            big_tech: clamped_percentage(t.get(&IndustryShare::BigTech), t.total),
            academia: clamped_percentage(t.get(&IndustryShare::Academia), t.total),
            unmapped: clamped_percentage(t.get(&IndustryShare::Unmapped), t.total),
        })
        .collect()
}

/// Same as [`big_tech_vs_academia`], with the Big Tech share split by region.
///
/// A record matching several blocs is spread evenly over them.
pub fn big_tech_by_region(records: &[Record]) -> Vec<BigTechRegionItem> {
    info!("big_tech_by_region: processing {} records", records.len());
    group_count(records, year_key, industry_categories)
        .into_iter()
        .map(|((year, conference), t)| {
            let big_tech = clamped_percentage(t.get(&IndustryShare::BigTech), t.total);
            let raw = |b: Bloc| {
                if t.total > 0.0 {
                    t.get(&IndustryShare::Region(b)) / t.total * 100.0
                } else {
                    0.0
                }
            };
            let shares = reconcile_regions(
                big_tech,
                RegionShares {
                    north_america: raw(Bloc::NorthAmerica),
                    asia: raw(Bloc::Asia),
                    europe: raw(Bloc::Europe),
                    others: 0.0,
                },
            );
            BigTechRegionItem {
                conference,
                year,
                big_tech,
                academia: clamped_percentage(t.get(&IndustryShare::Academia), t.total),
                unmapped: clamped_percentage(t.get(&IndustryShare::Unmapped), t.total),
                north_america: shares.north_america,
                asia: shares.asia,
                europe: shares.europe,
                others: shares.others,
            }
        })
        .collect()
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub(crate) struct RegionShares {
    pub(crate) north_america: f64,
    pub(crate) asia: f64,
    pub(crate) europe: f64,
    pub(crate) others: f64,
}

/// Rescales the regional shares so that they sum exactly to `big_tech`.
///
/// The rounding residual goes to the region with the largest nonzero raw
/// share. Ties go to the first of Others, Europe, Asia, North America.
pub(crate) fn reconcile_regions(big_tech: f64, raw: RegionShares) -> RegionShares {
    let sum = raw.north_america + raw.asia + raw.europe + raw.others;
    let scale = |x: f64| if sum > 0.0 { round2(x / sum * big_tech) } else { 0.0 };
    let mut res = RegionShares {
        north_america: scale(raw.north_america),
        asia: scale(raw.asia),
        europe: scale(raw.europe),
        others: scale(raw.others),
    };
    let residual = round2(big_tech - (res.north_america + res.asia + res.europe + res.others));
    if residual != 0.0 {
        let candidates = [
            (raw.others, &mut res.others),
            (raw.europe, &mut res.europe),
            (raw.asia, &mut res.asia),
            (raw.north_america, &mut res.north_america),
        ];
        let mut target: Option<(f64, &mut f64)> = None;
        for (value, share) in candidates {
            if value <= 0.0 {
                continue;
            }
            let better = target.as_ref().map(|(best, _)| value > *best).unwrap_or(true);
            if better {
                target = Some((value, share));
            }
        }
        match target {
            Some((value, share)) => {
                debug!(
                    "reconcile_regions: assigning residual {} to raw share {}",
                    residual, value
                );
                *share = round2(*share + residual);
            }
            None => debug!(
                "reconcile_regions: residual {} without any region",
                residual
            ),
        }
    }
    res
}

fn gap_key(opts: GapOptions) -> impl Fn(&Record) -> Option<(String, Option<i32>)> {
    move |r| {
        if !r.in_window(&opts.window) {
            return None;
        }
        let year = if opts.by_year { Some(r.year) } else { None };
        Some((r.conference.clone(), year))
    }
}

/// Continent representation of committees compared to papers.
///
/// Records without a recognized continent are counted as Unknown. A key with
/// no record on either side is not reported.
pub fn committee_vs_papers(
    papers: &[Record],
    committee: &[Record],
    opts: GapOptions,
) -> Vec<CommitteeVsPapersItem> {
    info!(
        "committee_vs_papers: processing {} papers, {} committee members, options: {:?}",
        papers.len(),
        committee.len(),
        opts
    );
    let by_continent = |r: &Record| vec![(r.continent.unwrap_or(Continent::Unknown), 1.0)];
    let paper_groups = group_count(papers, gap_key(opts), by_continent);
    let committee_groups = group_count(committee, gap_key(opts), by_continent);
    let keys: BTreeSet<&(String, Option<i32>)> =
        paper_groups.keys().chain(committee_groups.keys()).collect();

    let mut res: Vec<CommitteeVsPapersItem> = Vec::new();
    for key in keys {
        let p = paper_groups.get(key);
        let c = committee_groups.get(key);
        let p_total = p.map(|t| t.total).unwrap_or(0.0);
        let c_total = c.map(|t| t.total).unwrap_or(0.0);
        if p_total <= 0.0 && c_total <= 0.0 {
            continue;
        }
        for continent in Continent::ALL {
            let papers_percent = percentage(p.map(|t| t.get(&continent)).unwrap_or(0.0), p_total);
            let committee_percent =
                percentage(c.map(|t| t.get(&continent)).unwrap_or(0.0), c_total);
            res.push(CommitteeVsPapersItem {
                conference: key.0.clone(),
                year: key.1,
                continent,
                papers_percent,
                committee_percent,
                gap: round2(committee_percent - papers_percent),
            });
        }
    }
    res
}

/// Gini-Simpson index `1 - sum(p_i^2)` of a set of counts. Zero for no counts.
pub fn gini_simpson<I: IntoIterator<Item = f64>>(counts: I) -> f64 {
    let counts: Vec<f64> = counts.into_iter().collect();
    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let concentration: f64 = counts.iter().map(|c| (c / total).powi(2)).sum();
    (1.0 - concentration).clamp(0.0, 1.0)
}

/// Continental diversity of committees and papers, per conference.
///
/// Only the records with a known continent take part in the index.
pub fn diversity(papers: &[Record], committee: &[Record]) -> Vec<DiversityData> {
    info!(
        "diversity: processing {} papers, {} committee members",
        papers.len(),
        committee.len()
    );
    let key = |r: &Record| Some(r.conference.clone());
    let by_continent = |r: &Record| match r.continent {
        Some(Continent::Unknown) | None => vec![],
        Some(c) => vec![(c, 1.0)],
    };
    let paper_groups = group_count(papers, key, by_continent);
    let committee_groups = group_count(committee, key, by_continent);
    let conferences: BTreeSet<&String> =
        paper_groups.keys().chain(committee_groups.keys()).collect();
    conferences
        .into_iter()
        .map(|conference| DiversityData {
            conference: conference.clone(),
            committee: committee_groups
                .get(conference)
                .map(|t| gini_simpson(t.counts.values().cloned()))
                .unwrap_or(0.0),
            papers: paper_groups
                .get(conference)
                .map(|t| gini_simpson(t.counts.values().cloned()))
                .unwrap_or(0.0),
        })
        .collect()
}

// Each country of a record gets 1/n. A record without country goes to Unknown.
fn by_country(r: &Record) -> Vec<(String, f64)> {
    if r.countries.is_empty() {
        return vec![(UNKNOWN_COUNTRY.to_string(), 1.0)];
    }
    let w = 1.0 / r.countries.len() as f64;
    r.countries.iter().map(|c| (c.clone(), w)).collect()
}

// Applies the focus list: the result maps report labels to weights.
fn focus_weights(counts: &BTreeMap<String, f64>, focus: &FocusOptions) -> BTreeMap<String, f64> {
    let allowed: Option<HashSet<String>> = focus
        .focus_countries
        .as_ref()
        .map(|l| l.iter().map(|c| normalize_country_name(c)).collect());
    let mut res: BTreeMap<String, f64> = BTreeMap::new();
    for (country, w) in counts.iter() {
        let label: Option<&str> = if country == UNKNOWN_COUNTRY {
            if focus.include_unknown {
                Some(UNKNOWN_COUNTRY)
            } else {
                None
            }
        } else {
            match &allowed {
                Some(a) if !a.contains(country) => {
                    if focus.include_other {
                        Some(OTHER_COUNTRY)
                    } else {
                        None
                    }
                }
                _ => Some(country.as_str()),
            }
        };
        if let Some(l) = label {
            *res.entry(l.to_string()).or_insert(0.0) += *w;
        }
    }
    res
}

/// Fractional country counts per (conference, year).
///
/// `top` keeps the largest countries only; with `include_other` the rest is
/// folded into "Other".
pub fn country_distribution(
    records: &[Record],
    focus: &FocusOptions,
    top: Option<usize>,
) -> Vec<CountryDistributionItem> {
    info!(
        "country_distribution: processing {} records, focus: {:?}, top: {:?}",
        records.len(),
        focus,
        top
    );
    group_count(records, year_key, by_country)
        .into_iter()
        .map(|((year, conference), t)| {
            let weights = focus_weights(&t.counts, focus);
            let mut shares: Vec<(String, f64)> = weights.into_iter().collect();
            sort_by_weight(&mut shares);
            if let Some(n) = top {
                if shares.len() > n {
                    let rest: Vec<(String, f64)> = shares.split_off(n);
                    if focus.include_other {
                        let rest_weight: f64 = rest.iter().map(|(_, w)| *w).sum();
                        match shares.iter_mut().find(|(c, _)| c == OTHER_COUNTRY) {
                            Some(other) => other.1 += rest_weight,
                            None => shares.push((OTHER_COUNTRY.to_string(), rest_weight)),
                        }
                        sort_by_weight(&mut shares);
                    }
                }
            }
            CountryDistributionItem {
                conference,
                year,
                countries: shares
                    .into_iter()
                    .map(|(country, weight)| CountryShare {
                        country,
                        weight,
                        percent: percentage(weight, t.total),
                    })
                    .collect(),
                total: t.total as u64,
            }
        })
        .collect()
}

fn sort_by_weight(shares: &mut [(String, f64)]) {
    shares.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

/// Country representation of committees compared to papers.
///
/// Percentages are relative to the total country weight of each side, which
/// includes the records without country only when `include_unknown` is set.
pub fn country_gap(
    papers: &[Record],
    committee: &[Record],
    opts: GapOptions,
    focus: &FocusOptions,
) -> Vec<CountryGapItem> {
    info!(
        "country_gap: processing {} papers, {} committee members, options: {:?}, focus: {:?}",
        papers.len(),
        committee.len(),
        opts,
        focus
    );
    let paper_groups = group_count(papers, gap_key(opts), by_country);
    let committee_groups = group_count(committee, gap_key(opts), by_country);
    let keys: BTreeSet<&(String, Option<i32>)> =
        paper_groups.keys().chain(committee_groups.keys()).collect();

    let denominator = |t: &Tally<String>| {
        if focus.include_unknown {
            t.categorized()
        } else {
            t.categorized() - t.get(&UNKNOWN_COUNTRY.to_string())
        }
    };

    let mut res: Vec<CountryGapItem> = Vec::new();
    for key in keys {
        let p = paper_groups.get(key);
        let c = committee_groups.get(key);
        let p_total = p.map(denominator).unwrap_or(0.0);
        let c_total = c.map(denominator).unwrap_or(0.0);
        if p_total <= 0.0 && c_total <= 0.0 {
            debug!("country_gap: dropping empty key {:?}", key);
            continue;
        }
        let p_weights = p.map(|t| focus_weights(&t.counts, focus)).unwrap_or_default();
        let c_weights = c.map(|t| focus_weights(&t.counts, focus)).unwrap_or_default();
        let labels: BTreeSet<&String> = p_weights.keys().chain(c_weights.keys()).collect();
        for label in labels {
            let papers_percent = percentage(p_weights.get(label).cloned().unwrap_or(0.0), p_total);
            let committee_percent =
                percentage(c_weights.get(label).cloned().unwrap_or(0.0), c_total);
            res.push(CountryGapItem {
                conference: key.0.clone(),
                year: key.1,
                country: label.clone(),
                papers_percent,
                committee_percent,
                gap: round2(committee_percent - papers_percent),
            });
        }
    }
    res
}
