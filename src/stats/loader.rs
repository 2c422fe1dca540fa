// Reading of the CSV datasets.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::thread;

use conference_stats::RawRow;
use log::{debug, info};
use snafu::prelude::*;

use crate::stats::*;

/// The datasets that the views read.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Dataset {
    Papers,
    Committee,
    PaperCountries,
    CommitteeCountries,
    /// Older extraction of the papers, only used by the Big Tech views.
    BigCompanies,
}

impl Dataset {
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Papers => "unifiedPaperData.csv",
            Dataset::Committee => "unifiedCommitteeData.csv",
            Dataset::PaperCountries => "unifiedPaperCountryData.csv",
            Dataset::CommitteeCountries => "unifiedCommitteeCountryData.csv",
            Dataset::BigCompanies => "big_companies_analysis_papers_new.csv",
        }
    }
}

/// Reads a CSV file with a header row into rows keyed by column name.
///
/// Rows may be shorter or longer than the header. Cells are trimmed.
pub fn read_rows(path: &Path) -> StatsResult<Vec<RawRow>> {
    let path_s = path.display().to_string();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path: &path_s })?;
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvParseSnafu {
            path: &path_s,
            lineno: 1_usize,
        })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    debug!("read_rows: {:?} headers: {:?}", path_s, headers);

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvParseSnafu {
            path: &path_s,
            lineno,
        })?;
        let row: RawRow = headers
            .iter()
            .zip(line.iter())
            .map(|(h, v)| (h.clone(), v.trim().to_string()))
            .collect();
        res.push(row);
    }
    Ok(res)
}

pub fn load_dataset(dir: &Path, dataset: Dataset) -> StatsResult<Vec<RawRow>> {
    let path = dir.join(dataset.file_name());
    if !path.is_file() {
        return MissingDatasetSnafu {
            dataset: dataset.file_name(),
            path: path.display().to_string(),
        }
        .fail();
    }
    let rows = read_rows(&path)?;
    info!("load_dataset: {:?}: {} rows", path, rows.len());
    Ok(rows)
}

/// Loads the datasets concurrently. The first failure, in dataset order, is
/// returned.
pub fn load_datasets(
    dir: &Path,
    datasets: &BTreeSet<Dataset>,
) -> StatsResult<BTreeMap<Dataset, Vec<RawRow>>> {
    let results: Vec<(Dataset, StatsResult<Vec<RawRow>>)> = thread::scope(|s| {
        let handles: Vec<_> = datasets
            .iter()
            .map(|d| {
                let d = *d;
                (d, s.spawn(move || load_dataset(dir, d)))
            })
            .collect();
        handles
            .into_iter()
            .map(|(d, h)| match h.join() {
                Ok(r) => (d, r),
                Err(_) => (
                    d,
                    LoaderPanicSnafu {
                        dataset: d.file_name(),
                    }
                    .fail(),
                ),
            })
            .collect()
    });

    let mut res: BTreeMap<Dataset, Vec<RawRow>> = BTreeMap::new();
    for (d, r) in results {
        res.insert(d, r?);
    }
    Ok(res)
}
