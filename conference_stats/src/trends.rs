//! Mean +/- standard deviation bands, used to draw an aggregate trend next to
//! the individual series.

use std::collections::BTreeMap;

use log::debug;

use crate::aggregate::round2;
use crate::config::{AsianTrendItem, BigTechItem, TrendBand};

/// Population mean and standard deviation of the values, rounded to 2 decimals.
pub fn mean_band<K>(key: K, values: &[f64]) -> TrendBand<K> {
    let n = values.len();
    if n == 0 {
        return TrendBand {
            key,
            mean: 0.0,
            upper: 0.0,
            lower: 0.0,
            count: 0,
        };
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let sd = variance.sqrt();
    TrendBand {
        key,
        mean: round2(mean),
        upper: round2(mean + sd),
        lower: round2(mean - sd),
        count: n,
    }
}

/// Groups the values by key and computes one band per key, in key order.
pub fn bands_by<K, I>(points: I) -> Vec<TrendBand<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (k, v) in points {
        groups.entry(k).or_insert_with(Vec::new).push(v);
    }
    debug!("bands_by: {} groups", groups.len());
    groups
        .into_iter()
        .map(|(k, values)| mean_band(k, &values))
        .collect()
}

/// Per year, across conferences.
pub fn asian_trend_bands(items: &[AsianTrendItem]) -> Vec<TrendBand<i32>> {
    bands_by(items.iter().map(|i| (i.year, i.percentage)))
}

/// Per conference, across years.
pub fn asian_trend_bands_by_conference(items: &[AsianTrendItem]) -> Vec<TrendBand<String>> {
    bands_by(items.iter().map(|i| (i.conference.clone(), i.percentage)))
}

pub fn big_tech_bands(items: &[BigTechItem]) -> Vec<TrendBand<i32>> {
    bands_by(items.iter().map(|i| (i.year, i.big_tech)))
}

pub fn big_tech_bands_by_conference(items: &[BigTechItem]) -> Vec<TrendBand<String>> {
    bands_by(items.iter().map(|i| (i.conference.clone(), i.big_tech)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_standard_deviation() {
        let b = mean_band(2020, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(b.mean, 5.0);
        assert_eq!(b.upper, 7.0);
        assert_eq!(b.lower, 3.0);
        assert_eq!(b.count, 8);
    }

    #[test]
    fn empty_and_single() {
        let b = mean_band("none", &[]);
        assert_eq!((b.mean, b.upper, b.lower, b.count), (0.0, 0.0, 0.0, 0));
        let b = mean_band("one", &[12.346]);
        assert_eq!((b.mean, b.upper, b.lower), (12.35, 12.35, 12.35));
    }

    #[test]
    fn grouped_by_year() {
        let items = vec![
            AsianTrendItem {
                conference: "OSDI".to_string(),
                year: 2021,
                percentage: 10.0,
            },
            AsianTrendItem {
                conference: "NSDI".to_string(),
                year: 2020,
                percentage: 20.0,
            },
            AsianTrendItem {
                conference: "OSDI".to_string(),
                year: 2020,
                percentage: 40.0,
            },
        ];
        let bands = asian_trend_bands(&items);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].key, 2020);
        assert_eq!((bands[0].mean, bands[0].upper, bands[0].lower), (30.0, 40.0, 20.0));
        assert_eq!(bands[1].key, 2021);
        assert_eq!(bands[1].mean, 10.0);

        let by_conf = asian_trend_bands_by_conference(&items);
        assert_eq!(by_conf[0].key, "NSDI");
        assert_eq!(by_conf[1].key, "OSDI");
        assert_eq!(by_conf[1].mean, 25.0);
    }

    #[test]
    fn big_tech_series() {
        let items = vec![
            BigTechItem {
                conference: "ATC".to_string(),
                year: 2019,
                big_tech: 30.0,
                academia: 70.0,
                unmapped: 0.0,
            },
            BigTechItem {
                conference: "EUROSYS".to_string(),
                year: 2019,
                big_tech: 10.0,
                academia: 80.0,
                unmapped: 10.0,
            },
        ];
        let bands = big_tech_bands(&items);
        assert_eq!((bands[0].mean, bands[0].upper, bands[0].lower), (20.0, 30.0, 10.0));
        assert_eq!(big_tech_bands_by_conference(&items).len(), 2);
    }
}
