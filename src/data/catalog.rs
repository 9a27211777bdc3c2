use std::cell::OnceCell;

use super::model::{Dataset, PopulationEntry, Position, Record};

// ---------------------------------------------------------------------------
// Compiled-in datasets
// ---------------------------------------------------------------------------

/// 2023 democracy index: (country, score, latitude, longitude).
const DEMOCRACY_INDEX_2023: [(&str, f64, f64, f64); 35] = [
    ("Norway", 9.81, 60.472, 8.468),
    ("Iceland", 9.37, 64.963, -19.020),
    ("Sweden", 9.26, 60.128, 18.643),
    ("New Zealand", 9.25, -40.900, 174.885),
    ("Finland", 9.20, 61.924, 25.748),
    ("Denmark", 9.09, 56.263, 9.501),
    ("Ireland", 9.00, 53.413, -8.243),
    ("Taiwan", 8.99, 23.697, 120.960),
    ("Australia", 8.90, -25.274, 133.775),
    ("Switzerland", 8.89, 46.818, 8.227),
    ("Netherlands", 8.88, 52.132, 5.291),
    ("Canada", 8.87, 56.130, -106.346),
    ("Uruguay", 8.85, -32.522, -55.765),
    ("United Kingdom", 8.28, 55.378, -3.435),
    ("Luxembourg", 8.68, 49.815, 6.129),
    ("Germany", 8.67, 51.165, 10.451),
    ("South Korea", 8.09, 35.907, 127.766),
    ("Japan", 8.15, 36.204, 138.252),
    ("United States", 7.85, 37.090, -95.712),
    ("France", 7.99, 46.227, 2.213),
    ("Israel", 7.93, 31.046, 34.851),
    ("Italy", 7.69, 41.871, 12.567),
    ("Spain", 8.07, 40.463, -3.749),
    ("Botswana", 7.83, -22.328, 24.684),
    ("South Africa", 7.24, -30.559, 22.937),
    ("India", 7.04, 20.593, 78.962),
    ("Brazil", 6.86, -14.235, -51.925),
    ("Poland", 6.93, 51.919, 19.145),
    ("Hungary", 5.49, 47.162, 19.503),
    ("Turkey", 4.35, 38.963, 35.243),
    ("Russia", 2.28, 61.524, 105.318),
    ("China", 2.21, 35.861, 104.195),
    ("Iran", 2.20, 32.427, 53.688),
    ("North Korea", 1.08, 40.339, 127.510),
    ("Saudi Arabia", 1.98, 23.885, 45.079),
];

/// World population top 10, 2024, in millions.
const POPULATION_TOP10_2024: [PopulationEntry; 10] = [
    PopulationEntry { country: "India", millions: 1420 },
    PopulationEntry { country: "China", millions: 1410 },
    PopulationEntry { country: "United States", millions: 339 },
    PopulationEntry { country: "Indonesia", millions: 277 },
    PopulationEntry { country: "Pakistan", millions: 240 },
    PopulationEntry { country: "Nigeria", millions: 223 },
    PopulationEntry { country: "Brazil", millions: 216 },
    PopulationEntry { country: "Bangladesh", millions: 172 },
    PopulationEntry { country: "Russia", millions: 144 },
    PopulationEntry { country: "Mexico", millions: 129 },
];

/// Build the democracy table from the compiled-in literal.
///
/// Pure: every call returns an identical table with derived fields freshly
/// computed. Use [`SessionTable`] to avoid rebuilding it on every frame.
pub fn load() -> Dataset {
    let records = DEMOCRACY_INDEX_2023
        .iter()
        .map(|&(name, score, lat, lon)| Record::new(name, score, Position::new(lat, lon)))
        .collect();
    match Dataset::from_records(records) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Built-in democracy table is invalid: {e}");
            Dataset::default()
        }
    }
}

pub fn population_ranking() -> &'static [PopulationEntry] {
    &POPULATION_TOP10_2024
}

// ---------------------------------------------------------------------------
// Per-session cache
// ---------------------------------------------------------------------------

/// Lazily loaded democracy table owned by one dashboard session.
///
/// Built on first access, never invalidated, dropped with its owner.
#[derive(Debug, Default)]
pub struct SessionTable {
    table: OnceCell<Dataset>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &Dataset {
        self.table.get_or_init(|| {
            let table = load();
            log::info!("Loaded democracy table with {} countries", table.len());
            table
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Category, Region};

    #[test]
    fn test_literal_names_are_unique() {
        let records: Vec<Record> = DEMOCRACY_INDEX_2023
            .iter()
            .map(|&(n, s, lat, lon)| Record::new(n, s, Position::new(lat, lon)))
            .collect();
        assert!(Dataset::from_records(records).is_ok());
    }

    #[test]
    fn test_load_is_idempotent() {
        let a = load();
        let b = load();
        assert_eq!(a.len(), 35);
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_populates_derived_fields() {
        let table = load();
        let norway = table.get("Norway").unwrap();
        assert_eq!(norway.category(), Category::FullDemocracy);
        assert_eq!(norway.region(), Region::Northern);

        let us = table.get("United States").unwrap();
        assert_eq!(us.category(), Category::FlawedDemocracy);
        assert_eq!(us.region(), Region::MidNorthern);

        let hungary = table.get("Hungary").unwrap();
        assert_eq!(hungary.category(), Category::HybridRegime);

        // -25.274 is below the -25 boundary
        let australia = table.get("Australia").unwrap();
        assert_eq!(australia.region(), Region::Southern);
    }

    #[test]
    fn test_session_table_loads_once() {
        let session = SessionTable::new();
        assert!(!session.is_loaded());
        let first: *const Dataset = session.get();
        let second: *const Dataset = session.get();
        assert!(session.is_loaded());
        assert_eq!(first, second);
    }

    #[test]
    fn test_population_ranking_is_descending() {
        let ranking = population_ranking();
        assert_eq!(ranking.len(), 10);
        assert_eq!(ranking[0].country, "India");
        assert!(ranking.windows(2).all(|w| w[0].millions >= w[1].millions));
    }
}
