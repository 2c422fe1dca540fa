use clap::Parser;

/// Statistics about the papers and program committees of systems conferences.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the report: the data directory and the views.
    /// The command line options below override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory) The directory containing the CSV datasets. Overrides the dataDirectory of the configuration.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (repeatable) The views to compute, for example committeeVsPapers. If specified, the views of the
    /// configuration file are ignored and all the options below apply to every view.
    #[clap(long, value_parser)]
    pub view: Vec<String>,

    /// (file path) A reference summary in JSON format. If provided, confstats will check that the computed
    /// summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// First year included.
    #[clap(long, value_parser)]
    pub start_year: Option<i32>,

    /// Last year included.
    #[clap(long, value_parser)]
    pub end_year: Option<i32>,

    /// Compare committees and papers per year instead of per conference.
    #[clap(long, takes_value = false)]
    pub by_year: bool,

    /// Compute the trend bands per conference across years instead of per year.
    #[clap(long, takes_value = false)]
    pub by_conference: bool,

    /// (list of comma-separated values) The countries reported individually by the country views.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub focus_countries: Option<Vec<String>>,

    /// Group the countries outside of the focus list under Other.
    #[clap(long, takes_value = false)]
    pub include_other: bool,

    /// Report the rows without country as Unknown.
    #[clap(long, takes_value = false)]
    pub include_unknown: bool,

    /// Restrict the institution ranking to one country.
    #[clap(long, value_parser)]
    pub country: Option<String>,

    /// Restrict the rankings to one conference.
    #[clap(long, value_parser)]
    pub conference: Option<String>,

    /// Only keep the first entries of the rankings and of the country distribution.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    /// (default papers) papers or committee: the rows used by the single-population views.
    #[clap(long, value_parser)]
    pub population: Option<String>,

    /// Read the Big Tech views from big_companies_analysis_papers_new.csv.
    #[clap(long, takes_value = false)]
    pub legacy_source: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
