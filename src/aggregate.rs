use std::collections::{BTreeMap, BTreeSet};

use crate::models::Observation;

/// Per-hero level series plus the set of distinct levels seen across
/// the whole dataset (used for the global level bounds).
pub struct Aggregation {
    /// Hero name to `(level, median value)` points, levels ascending.
    pub series: BTreeMap<String, Vec<(i64, f64)>>,
    /// All distinct levels observed anywhere, ascending.
    pub levels: Vec<i64>,
}

/// Groups observations by hero then by level and reduces each bucket
/// to the median of its values. Heroes without any observation never
/// appear; levels a hero was never observed at are simply absent from
/// its series (no zero-fill). Hero names match exactly, case included.
pub fn aggregate(observations: &[Observation]) -> Aggregation {
    let mut buckets: BTreeMap<String, BTreeMap<i64, Vec<f64>>> = BTreeMap::new();
    let mut levels: BTreeSet<i64> = BTreeSet::new();

    for obs in observations {
        buckets
            .entry(obs.hero.clone())
            .or_default()
            .entry(obs.level)
            .or_default()
            .push(obs.value);
        levels.insert(obs.level);
    }

    let series = buckets
        .into_iter()
        .map(|(hero, by_level)| {
            let points = by_level
                .into_iter()
                .map(|(level, values)| (level, median(values)))
                .collect();
            (hero, points)
        })
        .collect();

    Aggregation {
        series,
        levels: levels.into_iter().collect(),
    }
}

/// Median of a non-empty value list. For an even count this is the
/// mean of the two middle values after sorting. Chosen over the mean
/// for robustness against outlier measurements.
pub fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
