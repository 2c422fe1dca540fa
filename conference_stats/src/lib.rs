/*!
Statistics about academic systems and networking conferences.

This crate turns raw tabular rows (papers, program committee members, and their
country variants) into the analytical views of a conference dashboard:
continent distributions, the share of Asian papers, Big Tech versus academia,
committee versus papers representation gaps, diversity indices and fractional
rankings of countries and institutions.

All the functions are pure: they take rows that were already loaded and return
fresh result records. Rows that cannot be understood (no conference, no valid
year) are skipped, they never cause an error.

```
use conference_stats::*;

let papers = DatasetBuilder::new()
    .paper("OSDI", "2020", "NA", "Google; MIT")
    .paper("OSDI", "2020", "EU", "ETH Zurich")
    .records();
let committee = DatasetBuilder::new().member("OSDI", "2020", "AS").records();

let gaps = committee_vs_papers(&papers, &committee, GapOptions::default());
assert_eq!(gaps.len(), 5);
```

See the [manual] for the description of every view.
*/

mod config;

pub mod aggregate;
pub mod builder;
pub mod classify;
pub mod manual;
pub mod normalize;
pub mod ranking;
pub mod records;
pub mod trends;

pub use crate::aggregate::{
    asian_trend, big_tech_by_region, big_tech_vs_academia, committee_vs_papers,
    continent_distribution, country_distribution, country_gap, diversity, gini_simpson,
    percentage, round2,
};
pub use crate::builder::DatasetBuilder;
pub use crate::classify::{classify_affiliation, parse_institutions, Institution};
pub use crate::config::*;
pub use crate::normalize::{
    normalize_conference_name, normalize_continent, normalize_country_list,
    normalize_country_name, parse_delimited_list,
};
pub use crate::ranking::{
    country_ranking, institution_ranking, tabulate, RankEntry, Ranked, RankingFilter,
    RankingTable,
};
pub use crate::records::{ingest, RawRow, Record};
pub use crate::trends::{
    asian_trend_bands, asian_trend_bands_by_conference, bands_by, big_tech_bands,
    big_tech_bands_by_conference, mean_band,
};
