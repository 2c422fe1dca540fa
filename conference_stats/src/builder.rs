use crate::records::{ingest, RawRow, Record};

/// A builder for assembling raw rows in memory.
///
/// The rows go through the same normalization as the ones read from files.
///
/// ```
/// use conference_stats::builder::DatasetBuilder;
/// use conference_stats::aggregate::asian_trend;
///
/// let papers = DatasetBuilder::new()
///     .paper("OSDI", "2020", "AS", "Huawei (China)")
///     .paper("OSDI", "2020", "EU", "ETH Zurich (Switzerland)")
///     .records();
///
/// assert_eq!(asian_trend(&papers)[0].percentage, 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    rows: Vec<RawRow>,
}

impl DatasetBuilder {
    pub fn new() -> DatasetBuilder {
        DatasetBuilder { rows: Vec::new() }
    }

    /// Adds a paper row.
    pub fn paper(self, conference: &str, year: &str, continent: &str, institutions: &str) -> Self {
        self.row(&[
            ("conference", conference),
            ("year", year),
            ("predominant_continent", continent),
            ("institutions", institutions),
        ])
    }

    /// Adds a committee member row.
    pub fn member(self, conference: &str, year: &str, continent: &str) -> Self {
        self.row(&[
            ("conference", conference),
            ("year", year),
            ("continent", continent),
        ])
    }

    /// Adds a paper row of the country datasets.
    pub fn country_paper(self, conference: &str, year: &str, countries: &str) -> Self {
        self.row(&[
            ("conference", conference),
            ("year", year),
            ("countries", countries),
        ])
    }

    pub fn country_member(self, conference: &str, year: &str, countries: &str) -> Self {
        self.row(&[
            ("Conference", conference),
            ("Year", year),
            ("Countries", countries),
        ])
    }

    /// Adds an arbitrary row. Empty cells are left out.
    pub fn row(mut self, cells: &[(&str, &str)]) -> Self {
        let row: RawRow = cells
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.rows.push(row);
        self
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// The valid rows, normalized.
    pub fn records(&self) -> Vec<Record> {
        ingest(&self.rows)
    }
}
