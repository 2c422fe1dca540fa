mod args;
mod stats;

use clap::Parser;
use log::{info, warn};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::stats::config_reader::*;
use crate::stats::{run_report, StatsResult};

/// Merges the command line arguments into the configuration file, if any.
fn build_config(args: &Args) -> StatsResult<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => read_report_config(path)?,
        None => ReportConfig::default(),
    };
    if let Some(d) = &args.data_dir {
        config.data_directory = Some(d.clone());
    }
    if let Some(o) = &args.out {
        config.output_settings.output_path = Some(o.clone());
    }
    if !args.view.is_empty() {
        config.views = args
            .view
            .iter()
            .map(|v| ViewConfig {
                view: v.clone(),
                start_year: args.start_year,
                end_year: args.end_year,
                by_year: Some(args.by_year),
                by_conference: Some(args.by_conference),
                focus_countries: args.focus_countries.clone(),
                include_other: Some(args.include_other),
                include_unknown: Some(args.include_unknown),
                country: args.country.clone(),
                conference: args.conference.clone(),
                top: args.top,
                population: args.population.clone(),
                legacy_source: Some(args.legacy_source),
            })
            .collect();
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }
    info!("args: {:?}", args);

    let res = build_config(&args).and_then(|config| run_report(&config, args.reference.clone()));
    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
