use crate::stats::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: Option<String>,
    /// A file path. Empty or "stdout" prints the summary.
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// One requested view, as written in the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub view: String,
    #[serde(rename = "startYear")]
    pub start_year: Option<i32>,
    #[serde(rename = "endYear")]
    pub end_year: Option<i32>,
    #[serde(rename = "byYear")]
    pub by_year: Option<bool>,
    #[serde(rename = "byConference")]
    pub by_conference: Option<bool>,
    #[serde(rename = "focusCountries")]
    pub focus_countries: Option<Vec<String>>,
    #[serde(rename = "includeOther")]
    pub include_other: Option<bool>,
    #[serde(rename = "includeUnknown")]
    pub include_unknown: Option<bool>,
    pub country: Option<String>,
    pub conference: Option<String>,
    pub top: Option<usize>,
    /// "papers" (default) or "committee"
    pub population: Option<String>,
    /// Read the Big Tech views from the older extraction of the papers.
    #[serde(rename = "legacySource")]
    pub legacy_source: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    #[serde(default)]
    pub views: Vec<ViewConfig>,
}

impl ViewConfig {
    pub fn validate(&self) -> StatsResult<ViewRequest> {
        let view = match View::from_name(&self.view) {
            Some(v) => v,
            None => {
                return UnknownViewSnafu {
                    name: self.view.clone(),
                }
                .fail()
            }
        };
        let window = match (self.start_year, self.end_year) {
            (None, None) => None,
            (start, end) => {
                let w = YearWindow {
                    start: start.unwrap_or(i32::MIN),
                    end: end.unwrap_or(i32::MAX),
                };
                if w.start > w.end {
                    whatever!(
                        "Invalid year range for view {}: {} > {}",
                        self.view,
                        w.start,
                        w.end
                    );
                }
                Some(w)
            }
        };
        let population = match self.population.as_deref().map(|s| s.to_lowercase()) {
            None => Population::Papers,
            Some(s) if s == "papers" => Population::Papers,
            Some(s) if s == "committee" => Population::Committee,
            Some(s) => whatever!("Unknown population {} for view {}", s, self.view),
        };
        if self.top == Some(0) {
            whatever!("top must be positive for view {}", self.view);
        }
        let focus = FocusOptions {
            focus_countries: self.focus_countries.clone(),
            include_other: self.include_other.unwrap_or(false),
            include_unknown: self.include_unknown.unwrap_or(false),
        };
        Ok(ViewRequest {
            view,
            window,
            by_year: self.by_year.unwrap_or(false),
            by_conference: self.by_conference.unwrap_or(false),
            focus,
            country: self.country.clone(),
            conference: self.conference.clone(),
            top: self.top,
            population,
            legacy_source: self.legacy_source.unwrap_or(false),
        })
    }
}

/// Reads a report configuration. A relative data directory is resolved
/// against the directory of the configuration file.
pub fn read_report_config(path: &str) -> StatsResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let mut config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_report_config: {:?}", config);
    let config_dir = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
    let data_dir = config.data_directory.as_deref().unwrap_or(".");
    if Path::new(data_dir).is_relative() {
        config.data_directory = Some(config_dir.join(data_dir).display().to_string());
    }
    Ok(config)
}

pub fn read_summary(path: String) -> StatsResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("report.json");
        fs::write(
            &p,
            r#"{
  "outputSettings": { "reportName": "SOSP 2023" },
  "dataDirectory": "data",
  "views": [
    { "view": "committeeVsPapers", "startYear": 2015, "endYear": 2023, "byYear": true },
    { "view": "countryDistribution", "focusCountries": ["USA", "China"], "includeOther": true }
  ]
}"#,
        )
        .unwrap();
        let config = read_report_config(&p.display().to_string()).unwrap();
        assert_eq!(config.output_settings.report_name.as_deref(), Some("SOSP 2023"));
        assert_eq!(
            config.data_directory,
            Some(dir.path().join("data").display().to_string())
        );
        assert_eq!(config.views.len(), 2);

        let r = config.views[0].validate().unwrap();
        assert_eq!(r.view, View::CommitteeVsPapers);
        assert_eq!(
            r.window,
            Some(YearWindow {
                start: 2015,
                end: 2023
            })
        );
        assert!(r.by_year);

        let r = config.views[1].validate().unwrap();
        assert_eq!(
            r.focus.focus_countries,
            Some(vec!["USA".to_string(), "China".to_string()])
        );
        assert!(r.focus.include_other);
        assert!(!r.focus.include_unknown);
    }

    #[test]
    fn invalid_views() {
        let v = ViewConfig {
            view: "asianTrend".to_string(),
            start_year: Some(2023),
            end_year: Some(2015),
            ..ViewConfig::default()
        };
        assert!(v.validate().is_err());

        let v = ViewConfig {
            view: "asianTrend".to_string(),
            population: Some("reviewers".to_string()),
            ..ViewConfig::default()
        };
        assert!(v.validate().is_err());

        let v = ViewConfig {
            view: "histogram".to_string(),
            ..ViewConfig::default()
        };
        assert!(matches!(v.validate(), Err(StatsError::UnknownView { .. })));
    }

    #[test]
    fn open_ended_window() {
        let v = ViewConfig {
            view: "countryRanking".to_string(),
            start_year: Some(2018),
            ..ViewConfig::default()
        };
        let w = v.validate().unwrap().window.unwrap();
        assert!(w.contains(2030));
        assert!(!w.contains(2017));
    }
}
