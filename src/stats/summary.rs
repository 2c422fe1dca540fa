// JSON rendering of the results.

use conference_stats::*;
use serde_json::json;
use serde_json::Value as JSValue;

pub fn continent_distribution_to_json(items: &[ContinentDistributionItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            let shares = i.percentages();
            json!({
                "conference": i.conference,
                "year": i.year,
                "northAmerica": i.north_america,
                "europe": i.europe,
                "asia": i.asia,
                "others": i.others,
                "unmapped": i.unmapped,
                "total": i.total,
                "percentages": {
                    "northAmerica": shares.north_america,
                    "europe": shares.europe,
                    "asia": shares.asia,
                    "others": shares.others,
                    "unmapped": shares.unmapped,
                },
            })
        })
        .collect()
}

pub fn asian_trend_to_json(items: &[AsianTrendItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            json!({
                "conference": i.conference,
                "year": i.year,
                "percentage": i.percentage,
            })
        })
        .collect()
}

pub fn big_tech_to_json(items: &[BigTechItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            json!({
                "conference": i.conference,
                "year": i.year,
                "bigTech": i.big_tech,
                "academia": i.academia,
                "unmapped": i.unmapped,
            })
        })
        .collect()
}

pub fn big_tech_region_to_json(items: &[BigTechRegionItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            json!({
                "conference": i.conference,
                "year": i.year,
                "bigTech": i.big_tech,
                "academia": i.academia,
                "unmapped": i.unmapped,
                "northAmerica": i.north_america,
                "europe": i.europe,
                "asia": i.asia,
                "others": i.others,
            })
        })
        .collect()
}

pub fn committee_vs_papers_to_json(items: &[CommitteeVsPapersItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            json!({
                "conference": i.conference,
                "year": i.year,
                "continent": i.continent.label(),
                "papersPercent": i.papers_percent,
                "committeePercent": i.committee_percent,
                "gap": i.gap,
            })
        })
        .collect()
}

pub fn country_gap_to_json(items: &[CountryGapItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            json!({
                "conference": i.conference,
                "year": i.year,
                "country": i.country,
                "papersPercent": i.papers_percent,
                "committeePercent": i.committee_percent,
                "gap": i.gap,
            })
        })
        .collect()
}

pub fn diversity_to_json(items: &[DiversityData]) -> JSValue {
    items
        .iter()
        .map(|i| {
            json!({
                "conference": i.conference,
                "committee": i.committee,
                "papers": i.papers,
            })
        })
        .collect()
}

pub fn country_distribution_to_json(items: &[CountryDistributionItem]) -> JSValue {
    items
        .iter()
        .map(|i| {
            let countries: Vec<JSValue> = i
                .countries
                .iter()
                .map(|c| {
                    json!({
                        "country": c.country,
                        "weight": c.weight,
                        "percent": c.percent,
                    })
                })
                .collect();
            json!({
                "conference": i.conference,
                "year": i.year,
                "total": i.total,
                "countries": countries,
            })
        })
        .collect()
}

pub fn bands_to_json<K: serde::Serialize>(bands: &[TrendBand<K>]) -> JSValue {
    bands
        .iter()
        .map(|b| {
            json!({
                "key": b.key,
                "mean": b.mean,
                "upper": b.upper,
                "lower": b.lower,
                "count": b.count,
            })
        })
        .collect()
}

/// Renders the selected entries of a ranking, with the statistics of the
/// whole table.
pub fn ranking_to_json<I, F>(table: &RankingTable<I>, entries: &[RankEntry<I>], identity: F) -> JSValue
where
    F: Fn(&I) -> JSValue,
{
    let entries_js: Vec<JSValue> = entries
        .iter()
        .map(|e| {
            let mut js = identity(&e.identity);
            js["weight"] = json!(e.weight);
            js["percent"] = json!(e.percent);
            js["rank"] = json!(e.rank);
            js
        })
        .collect();
    json!({
        "entries": entries_js,
        "totalWeight": table.total_weight,
        "mappedRows": table.mapped_rows,
        "unmappedRows": table.unmapped_rows,
        "unmappedRowPercent": table.unmapped_row_percent(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_rendering() {
        let records = DatasetBuilder::new()
            .country_paper("OSDI", "2020", "France; Germany")
            .country_paper("OSDI", "2020", "France")
            .country_paper("OSDI", "2020", "")
            .records();
        let table = country_ranking(&records, &RankingFilter::default());
        let js = ranking_to_json(&table, &table.top(1), |c| json!({ "country": c }));
        assert_eq!(
            js,
            json!({
                "entries": [{"country": "France", "weight": 1.5, "percent": 75.0, "rank": 1}],
                "totalWeight": 2.0,
                "mappedRows": 2,
                "unmappedRows": 1,
                "unmappedRowPercent": 33.33,
            })
        );
    }

    #[test]
    fn continent_labels() {
        let papers = DatasetBuilder::new()
            .paper("OSDI", "2020", "AS", "")
            .records();
        let js = committee_vs_papers_to_json(&committee_vs_papers(
            &papers,
            &[],
            GapOptions::default(),
        ));
        assert_eq!(js[2]["continent"], "Asia");
        assert_eq!(js[2]["papersPercent"], 100.0);
        assert_eq!(js[2]["gap"], -100.0);
        assert_eq!(js[2]["year"], JSValue::Null);
    }
}
