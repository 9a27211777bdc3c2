use std::collections::BTreeSet;
use std::fmt;

use super::classify::{classify_region, classify_score};
use super::error::LoadError;

// ---------------------------------------------------------------------------
// Category – regime type derived from the score
// ---------------------------------------------------------------------------

/// Regime type. Ordered from most to least democratic so that a `BTreeSet`
/// of categories iterates in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    FullDemocracy,
    FlawedDemocracy,
    HybridRegime,
    Authoritarian,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::FullDemocracy,
        Category::FlawedDemocracy,
        Category::HybridRegime,
        Category::Authoritarian,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::FullDemocracy => "Full Democracy",
            Category::FlawedDemocracy => "Flawed Democracy",
            Category::HybridRegime => "Hybrid Regime",
            Category::Authoritarian => "Authoritarian",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Region – latitude band
// ---------------------------------------------------------------------------

/// Coarse latitude band, north to south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Northern,
    MidNorthern,
    Equatorial,
    Southern,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Northern,
        Region::MidNorthern,
        Region::Equatorial,
        Region::Southern,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Northern => "Northern Europe/North America",
            Region::MidNorthern => "Europe/North America/Asia",
            Region::Equatorial => "Africa/Asia/Central America",
            Region::Southern => "Southern Africa/Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Position {
            latitude,
            longitude,
        }
    }

    /// Planar distance in degree space. No great-circle geometry and no
    /// wraparound at ±180°, so New Zealand and Uruguay look far apart.
    pub fn planar_distance(&self, other: &Position) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Record – one country
// ---------------------------------------------------------------------------

/// One country row. `category` and `region` are derived in [`Record::new`]
/// and cannot be set independently of `score` / `latitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    score: f64,
    position: Position,
    category: Category,
    region: Region,
}

impl Record {
    pub fn new(name: impl Into<String>, score: f64, position: Position) -> Self {
        Record {
            name: name.into(),
            score,
            position,
            category: classify_score(score),
            region: classify_region(position.latitude),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

/// A record annotated with its distance to a reference record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub record: &'a Record,
    pub distance: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the immutable table
// ---------------------------------------------------------------------------

/// The country table. Never mutated after construction; queries return new
/// tables or borrowed views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a table, rejecting empty or duplicate country names.
    /// Row numbers in errors are 1-based.
    pub fn from_records(records: Vec<Record>) -> Result<Self, LoadError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for (i, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(LoadError::EmptyName { row: i + 1 });
            }
            if !seen.insert(record.name.as_str()) {
                return Err(LoadError::DuplicateName {
                    row: i + 1,
                    name: record.name.clone(),
                });
            }
        }
        Ok(Dataset { records })
    }

    /// Sub-table of the given rows, in the order given. Names stay unique
    /// because every row comes from an already validated table.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            records: indices
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Lowest and highest score, or `None` for an empty table.
    pub fn score_extent(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.score).fold(None, |acc, s| match acc {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        })
    }

    /// Categories that occur in the table, in legend order.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.records.iter().map(|r| r.category).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Auxiliary tables
// ---------------------------------------------------------------------------

/// One row of the renewable-energy table.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyShare {
    pub country: String,
    /// Share of electricity from renewable sources, 0..=100.
    pub renewable_percentage: f64,
    pub position: Option<Position>,
}

/// Renewable-energy shares in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyTable {
    pub rows: Vec<EnergyShare>,
}

impl EnergyTable {
    /// Rows sorted by share, highest first; ties keep file order.
    pub fn ranked(&self) -> Vec<&EnergyShare> {
        let mut rows: Vec<&EnergyShare> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.renewable_percentage.total_cmp(&a.renewable_percentage));
        rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One entry of the population ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationEntry {
    pub country: &'static str,
    pub millions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_derives_category_and_region() {
        let r = Record::new("Norway", 9.81, Position::new(60.472, 8.468));
        assert_eq!(r.category(), Category::FullDemocracy);
        assert_eq!(r.region(), Region::Northern);

        let r = Record::new("Uruguay", 8.85, Position::new(-32.522, -55.765));
        assert_eq!(r.region(), Region::Southern);
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let err = Dataset::from_records(vec![
            Record::new("Norway", 9.81, Position::new(60.0, 8.0)),
            Record::new("Norway", 1.0, Position::new(0.0, 0.0)),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateName { row: 2, .. }));
    }

    #[test]
    fn test_from_records_rejects_empty_name() {
        let err =
            Dataset::from_records(vec![Record::new("  ", 5.0, Position::new(0.0, 0.0))])
                .unwrap_err();
        assert!(matches!(err, LoadError::EmptyName { row: 1 }));
    }

    #[test]
    fn test_subset_keeps_requested_order() {
        let ds = Dataset::from_records(vec![
            Record::new("A", 1.0, Position::new(0.0, 0.0)),
            Record::new("B", 2.0, Position::new(0.0, 0.0)),
            Record::new("C", 3.0, Position::new(0.0, 0.0)),
        ])
        .unwrap();
        let sub = ds.subset(&[0, 2, 7]);
        assert_eq!(sub.names().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(ds.score_extent(), Some((1.0, 3.0)));
        assert_eq!(Dataset::default().score_extent(), None);
    }

    #[test]
    fn test_planar_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.planar_distance(&b), 5.0);
        // no wraparound at the antimeridian
        let east = Position::new(0.0, 179.0);
        let west = Position::new(0.0, -179.0);
        assert_eq!(east.planar_distance(&west), 358.0);
    }

    #[test]
    fn test_energy_ranked_is_stable() {
        let table = EnergyTable {
            rows: vec![
                EnergyShare {
                    country: "A".into(),
                    renewable_percentage: 30.0,
                    position: None,
                },
                EnergyShare {
                    country: "B".into(),
                    renewable_percentage: 80.0,
                    position: None,
                },
                EnergyShare {
                    country: "C".into(),
                    renewable_percentage: 30.0,
                    position: None,
                },
            ],
        };
        let order: Vec<&str> = table.ranked().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }
}
