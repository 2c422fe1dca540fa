// ********* Categorical data structures ***********

use std::fmt::Display;

/// The continent bucket assigned to a record.
///
/// The declaration order is the fixed order used by every continent-keyed view.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Continent {
    NorthAmerica,
    Europe,
    Asia,
    Other,
    Unknown,
}

impl Continent {
    /// All the buckets, in output order.
    pub const ALL: [Continent; 5] = [
        Continent::NorthAmerica,
        Continent::Europe,
        Continent::Asia,
        Continent::Other,
        Continent::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Continent::NorthAmerica => "North America",
            Continent::Europe => "Europe",
            Continent::Asia => "Asia",
            Continent::Other => "Other",
            Continent::Unknown => "Unknown",
        }
    }
}

impl Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A geographic grouping of Big Tech companies.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Bloc {
    NorthAmerica,
    Europe,
    Asia,
}

/// The outcome of classifying the institutions of one record.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Affiliation {
    /// At least one Big Tech company was found. The blocs are sorted and unique.
    BigTech(Vec<Bloc>),
    /// Some institutions were listed, none of them a Big Tech company.
    Academia,
    /// No institution was listed at all.
    Unmapped,
}

impl Affiliation {
    pub fn is_big_tech(&self) -> bool {
        matches!(self, Affiliation::BigTech(_))
    }
}

// ******** Output data structures *********

/// Row counts of one (conference, year) group, by continent.
///
/// `total` counts every row of the group, including the `unmapped` rows whose
/// continent could not be resolved. `others` merges the Other and Unknown buckets.
#[derive(PartialEq, Debug, Clone)]
pub struct ContinentDistributionItem {
    pub conference: String,
    pub year: i32,
    pub north_america: u64,
    pub europe: u64,
    pub asia: u64,
    pub others: u64,
    pub unmapped: u64,
    pub total: u64,
}

/// Percentages of a continent distribution, relative to the full total.
///
/// The four continents and `unmapped` sum to 100.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ContinentShares {
    pub north_america: f64,
    pub europe: f64,
    pub asia: f64,
    pub others: f64,
    pub unmapped: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AsianTrendItem {
    pub conference: String,
    pub year: i32,
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct BigTechItem {
    pub conference: String,
    pub year: i32,
    pub big_tech: f64,
    pub academia: f64,
    pub unmapped: f64,
}

/// Big Tech share split by the region of the companies.
///
/// The four regional shares always add up to `big_tech`.
#[derive(PartialEq, Debug, Clone)]
pub struct BigTechRegionItem {
    pub conference: String,
    pub year: i32,
    pub big_tech: f64,
    pub academia: f64,
    pub unmapped: f64,
    pub north_america: f64,
    pub asia: f64,
    pub europe: f64,
    pub others: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CommitteeVsPapersItem {
    pub conference: String,
    /// Only set when the comparison is done per year.
    pub year: Option<i32>,
    pub continent: Continent,
    pub papers_percent: f64,
    pub committee_percent: f64,
    /// Signed percentage points: committee minus papers.
    pub gap: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CountryGapItem {
    pub conference: String,
    pub year: Option<i32>,
    pub country: String,
    pub papers_percent: f64,
    pub committee_percent: f64,
    pub gap: f64,
}

/// Gini-Simpson indices of one conference.
#[derive(PartialEq, Debug, Clone)]
pub struct DiversityData {
    pub conference: String,
    pub committee: f64,
    pub papers: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CountryShare {
    pub country: String,
    /// Fractional number of records.
    pub weight: f64,
    pub percent: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CountryDistributionItem {
    pub conference: String,
    pub year: i32,
    /// Sorted by decreasing weight, then by name.
    pub countries: Vec<CountryShare>,
    pub total: u64,
}

/// A mean +/- standard deviation band over one group of values.
#[derive(PartialEq, Debug, Clone)]
pub struct TrendBand<K> {
    pub key: K,
    pub mean: f64,
    pub upper: f64,
    pub lower: f64,
    pub count: usize,
}

// ********* Options **********

/// An inclusive range of years.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct YearWindow {
    pub start: i32,
    pub end: i32,
}

impl YearWindow {
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct GapOptions {
    /// Compare per (conference, year) instead of per conference.
    pub by_year: bool,
    pub window: Option<YearWindow>,
}

/// Controls which countries are reported by the country-level views.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FocusOptions {
    /// If set, only these countries are reported individually.
    pub focus_countries: Option<Vec<String>>,
    /// Collapse the countries outside of the focus list into "Other".
    pub include_other: bool,
    /// Report the records without any resolvable country as "Unknown".
    pub include_unknown: bool,
}

impl FocusOptions {
    pub const ALL_COUNTRIES: FocusOptions = FocusOptions {
        focus_countries: None,
        include_other: false,
        include_unknown: false,
    };
}

impl Default for FocusOptions {
    fn default() -> Self {
        FocusOptions::ALL_COUNTRIES
    }
}
