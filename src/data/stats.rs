use std::collections::BTreeMap;

use super::model::{Category, Dataset, Region};

/// Headline numbers for a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Score statistics for one latitude band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    pub region: Region,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two countries.
    pub std_dev: Option<f64>,
}

/// Count, mean and extent of the scores, or `None` for an empty table.
pub fn summary(dataset: &Dataset) -> Option<Summary> {
    let (min, max) = dataset.score_extent()?;
    let count = dataset.len();
    let sum: f64 = dataset.records().iter().map(|r| r.score()).sum();
    Some(Summary {
        count,
        mean: sum / count as f64,
        min,
        max,
    })
}

/// Countries per regime type, most common first. Only categories present
/// in the table are listed; equal counts follow legend order.
pub fn category_counts(dataset: &Dataset) -> Vec<(Category, usize)> {
    let mut counts: Vec<(Category, usize)> = Category::ALL
        .iter()
        .map(|&c| {
            let n = dataset.records().iter().filter(|r| r.category() == c).count();
            (c, n)
        })
        .filter(|&(_, n)| n > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Per-band statistics, ordered by band label.
pub fn region_stats(dataset: &Dataset) -> Vec<RegionStats> {
    let mut groups: BTreeMap<&'static str, (Region, Vec<f64>)> = BTreeMap::new();
    for r in dataset.records() {
        groups
            .entry(r.region().label())
            .or_insert_with(|| (r.region(), Vec::new()))
            .1
            .push(r.score());
    }

    groups
        .into_values()
        .map(|(region, scores)| {
            let count = scores.len();
            let mean = scores.iter().sum::<f64>() / count as f64;
            let std_dev = (count > 1).then(|| {
                let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>()
                    / (count - 1) as f64;
                var.sqrt()
            });
            RegionStats {
                region,
                count,
                mean,
                std_dev,
            }
        })
        .collect()
}

/// Equal-width bin counts over `[lo, hi]`. The top edge falls in the last
/// bin; values outside the range are ignored.
pub fn histogram(
    values: impl IntoIterator<Item = f64>,
    lo: f64,
    hi: f64,
    bins: usize,
) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 || !(hi > lo) {
        return counts;
    }
    let width = (hi - lo) / bins as f64;
    for v in values {
        if !(lo..=hi).contains(&v) {
            continue;
        }
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog;
    use crate::data::model::{Position, Record};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summary_full_table() {
        let s = summary(&catalog::load()).unwrap();
        assert_eq!(s.count, 35);
        assert_eq!(s.min, 1.08);
        assert_eq!(s.max, 9.81);
        assert!(s.mean > 7.0 && s.mean < 7.5);
        assert!(summary(&Dataset::default()).is_none());
    }

    #[test]
    fn test_category_counts_full_table() {
        let counts = category_counts(&catalog::load());
        assert_eq!(
            counts,
            vec![
                (Category::FullDemocracy, 19),
                (Category::FlawedDemocracy, 9),
                (Category::Authoritarian, 5),
                (Category::HybridRegime, 2),
            ]
        );
    }

    #[test]
    fn test_region_stats() {
        let table = Dataset::from_records(vec![
            Record::new("A", 8.0, Position::new(60.0, 0.0)),
            Record::new("B", 6.0, Position::new(55.0, 0.0)),
            Record::new("C", 3.0, Position::new(-30.0, 0.0)),
        ])
        .unwrap();
        let stats = region_stats(&table);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].region, Region::Northern);
        assert_eq!(stats[0].count, 2);
        assert!(approx(stats[0].mean, 7.0));
        assert!(approx(stats[0].std_dev.unwrap(), 2f64.sqrt()));

        assert_eq!(stats[1].region, Region::Southern);
        assert_eq!(stats[1].std_dev, None);
    }

    #[test]
    fn test_region_stats_cover_every_country() {
        let stats = region_stats(&catalog::load());
        assert_eq!(stats.iter().map(|s| s.count).sum::<usize>(), 35);
        let labels: Vec<&str> = stats.iter().map(|s| s.region.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_histogram() {
        let counts = histogram([0.0, 0.5, 4.9, 5.0, 10.0, 11.0, -1.0], 0.0, 10.0, 2);
        assert_eq!(counts, vec![3, 2]);
        assert_eq!(histogram([1.0], 0.0, 0.0, 4), vec![0, 0, 0, 0]);
        assert!(histogram([1.0], 0.0, 1.0, 0).is_empty());
    }
}
