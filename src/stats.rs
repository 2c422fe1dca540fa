use log::{debug, info, warn};

use conference_stats::*;
use snafu::{prelude::*, Snafu};

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::stats::config_reader::*;
use crate::stats::loader::*;
use crate::stats::summary::*;

pub mod config_reader;
pub mod loader;
pub mod summary;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StatsError {
    #[snafu(display("Dataset {dataset} not found at {path}"))]
    MissingDataset { dataset: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Malformed CSV in {path} at line {lineno}"))]
    CsvParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Loading of dataset {dataset} was interrupted"))]
    LoaderPanic { dataset: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown view {name}"))]
    UnknownView { name: String },
    #[snafu(display("Difference detected between computed summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type StatsResult<T> = Result<T, StatsError>;

/// All the views that can be requested.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum View {
    ContinentDistribution,
    AsianTrend,
    AsianTrendBands,
    BigTech,
    BigTechByRegion,
    BigTechBands,
    CommitteeVsPapers,
    Diversity,
    CountryDistribution,
    CountryGap,
    CountryRanking,
    InstitutionRanking,
}

impl View {
    pub const ALL: [View; 12] = [
        View::ContinentDistribution,
        View::AsianTrend,
        View::AsianTrendBands,
        View::BigTech,
        View::BigTechByRegion,
        View::BigTechBands,
        View::CommitteeVsPapers,
        View::Diversity,
        View::CountryDistribution,
        View::CountryGap,
        View::CountryRanking,
        View::InstitutionRanking,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            View::ContinentDistribution => "continentDistribution",
            View::AsianTrend => "asianTrend",
            View::AsianTrendBands => "asianTrendBands",
            View::BigTech => "bigTech",
            View::BigTechByRegion => "bigTechByRegion",
            View::BigTechBands => "bigTechBands",
            View::CommitteeVsPapers => "committeeVsPapers",
            View::Diversity => "diversity",
            View::CountryDistribution => "countryDistribution",
            View::CountryGap => "countryGap",
            View::CountryRanking => "countryRanking",
            View::InstitutionRanking => "institutionRanking",
        }
    }

    /// Accepts the camelCase names as well as kebab-case ones.
    pub fn from_name(name: &str) -> Option<View> {
        let simplified: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        View::ALL
            .iter()
            .find(|v| v.name().to_lowercase() == simplified)
            .cloned()
    }
}

/// Which rows a single-population view runs on.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Population {
    Papers,
    Committee,
}

/// A validated view request.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ViewRequest {
    pub view: View,
    pub window: Option<YearWindow>,
    pub by_year: bool,
    /// Trend bands per conference across years instead of per year.
    pub by_conference: bool,
    pub focus: FocusOptions,
    pub country: Option<String>,
    pub conference: Option<String>,
    pub top: Option<usize>,
    pub population: Population,
    pub legacy_source: bool,
}

impl ViewRequest {
    /// The datasets this view reads.
    pub fn datasets(&self) -> Vec<Dataset> {
        let papers = if self.legacy_source {
            Dataset::BigCompanies
        } else {
            Dataset::Papers
        };
        match self.view {
            View::ContinentDistribution | View::AsianTrend | View::AsianTrendBands => {
                match self.population {
                    Population::Papers => vec![Dataset::Papers],
                    Population::Committee => vec![Dataset::Committee],
                }
            }
            View::BigTech | View::BigTechByRegion | View::BigTechBands => vec![papers],
            View::InstitutionRanking => vec![papers],
            View::CommitteeVsPapers | View::Diversity => {
                vec![Dataset::Papers, Dataset::Committee]
            }
            View::CountryDistribution | View::CountryRanking => match self.population {
                Population::Papers => vec![Dataset::PaperCountries],
                Population::Committee => vec![Dataset::CommitteeCountries],
            },
            View::CountryGap => vec![Dataset::PaperCountries, Dataset::CommitteeCountries],
        }
    }

    fn gap_options(&self) -> GapOptions {
        GapOptions {
            by_year: self.by_year,
            window: self.window,
        }
    }

    fn ranking_filter(&self) -> RankingFilter {
        RankingFilter {
            window: self.window,
            conference: self.conference.as_deref().map(normalize_conference_name),
        }
    }
}

/// The normalized records of every loaded dataset.
pub struct LoadedData {
    records: BTreeMap<Dataset, Vec<Record>>,
}

impl LoadedData {
    pub fn from_rows(rows: BTreeMap<Dataset, Vec<RawRow>>) -> LoadedData {
        let records = rows
            .into_iter()
            .map(|(d, r)| {
                let recs = ingest(&r);
                info!(
                    "Dataset {}: {} rows, {} valid records",
                    d.file_name(),
                    r.len(),
                    recs.len()
                );
                (d, recs)
            })
            .collect();
        LoadedData { records }
    }

    fn get(&self, d: Dataset) -> &[Record] {
        self.records.get(&d).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Computes one view. The window filter applies to every view.
pub fn compute_view(request: &ViewRequest, data: &LoadedData) -> JSValue {
    debug!("compute_view: {:?}", request);
    let datasets = request.datasets();
    let in_window = |d: Dataset| -> Vec<Record> {
        data.get(d)
            .iter()
            .filter(|r| r.in_window(&request.window))
            .cloned()
            .collect()
    };
    let first = in_window(datasets[0]);
    match request.view {
        View::ContinentDistribution => continent_distribution_to_json(&continent_distribution(&first)),
        View::AsianTrend => asian_trend_to_json(&asian_trend(&first)),
        View::AsianTrendBands => {
            let items = asian_trend(&first);
            if request.by_conference {
                bands_to_json(&asian_trend_bands_by_conference(&items))
            } else {
                bands_to_json(&asian_trend_bands(&items))
            }
        }
        View::BigTech => big_tech_to_json(&big_tech_vs_academia(&first)),
        View::BigTechByRegion => big_tech_region_to_json(&big_tech_by_region(&first)),
        View::BigTechBands => {
            let items = big_tech_vs_academia(&first);
            if request.by_conference {
                bands_to_json(&big_tech_bands_by_conference(&items))
            } else {
                bands_to_json(&big_tech_bands(&items))
            }
        }
        View::CommitteeVsPapers => committee_vs_papers_to_json(&committee_vs_papers(
            data.get(Dataset::Papers),
            data.get(Dataset::Committee),
            request.gap_options(),
        )),
        View::Diversity => diversity_to_json(&diversity(&first, &in_window(Dataset::Committee))),
        View::CountryDistribution => country_distribution_to_json(&country_distribution(
            &first,
            &request.focus,
            request.top,
        )),
        View::CountryGap => country_gap_to_json(&country_gap(
            data.get(Dataset::PaperCountries),
            data.get(Dataset::CommitteeCountries),
            request.gap_options(),
            &request.focus,
        )),
        View::CountryRanking => {
            let table = country_ranking(&first, &request.ranking_filter());
            let entries = match request.top {
                Some(n) => table.top(n),
                None => table.entries.clone(),
            };
            ranking_to_json(&table, &entries, |c| json!({ "country": c }))
        }
        View::InstitutionRanking => {
            let table = institution_ranking(&first, &request.ranking_filter());
            let mut entries = match &request.country {
                Some(c) => table.for_country(c),
                None => table.entries.clone(),
            };
            if let Some(n) = request.top {
                entries.truncate(n);
            }
            ranking_to_json(&table, &entries, |i| {
                json!({ "institution": i.name, "country": i.country })
            })
        }
    }
}

fn build_summary_js(config: &ReportConfig, requests: &[ViewRequest], data: &LoadedData) -> JSValue {
    let results: Vec<JSValue> = requests
        .iter()
        .map(|r| {
            json!({
                "view": r.view.name(),
                "items": compute_view(r, data),
            })
        })
        .collect();
    json!({
        "config": {
            "reportName": config.output_settings.report_name,
            "dataDirectory": config.data_directory,
        },
        "results": results
    })
}

fn write_output(out: &Option<String>, content: &str) -> StatsResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })
        }
    }
}

pub fn run_report(config: &ReportConfig, check_summary_path: Option<String>) -> StatsResult<JSValue> {
    info!("config: {:?}", config);

    // Validate everything before reading any file.
    let requests: Vec<ViewRequest> = config
        .views
        .iter()
        .map(|v| v.validate())
        .collect::<StatsResult<Vec<ViewRequest>>>()?;
    if requests.is_empty() {
        whatever!("No view requested");
    }

    let data_dir: PathBuf = match &config.data_directory {
        Some(d) => PathBuf::from(d),
        None => PathBuf::from("."),
    };
    let needed: BTreeSet<Dataset> = requests.iter().flat_map(|r| r.datasets()).collect();
    info!("Loading datasets {:?} from {:?}", needed, data_dir);
    let rows = load_datasets(Path::new(&data_dir), &needed)?;
    let data = LoadedData::from_rows(rows);

    let result_js = build_summary_js(config, &requests, &data);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_output(&config.output_settings.output_path, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
        info!("Summary matches the reference");
    }

    Ok(result_js)
}
