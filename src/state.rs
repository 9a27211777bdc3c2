use std::path::Path;

use democracy_atlas::config::AtlasConfig;
use democracy_atlas::data::catalog::SessionTable;
use democracy_atlas::data::error::NotFoundError;
use democracy_atlas::data::filter::{filtered_indices, search_indices, FilterState};
use democracy_atlas::data::model::{Category, Dataset, EnergyTable, Neighbor};
use democracy_atlas::data::{export, loader, query};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Map,
    Statistics,
    Search,
    Table,
    Population,
    Energy,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::Map,
        View::Statistics,
        View::Search,
        View::Table,
        View::Population,
        View::Energy,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Map => "Map",
            View::Statistics => "Statistics",
            View::Search => "Search",
            View::Table => "Data table",
            View::Population => "Population ranking",
            View::Energy => "Renewable energy",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state of one session, independent of rendering.
pub struct AppState {
    pub config: AtlasConfig,

    /// Democracy table, loaded on first access and kept for the session.
    session: SessionTable,

    /// Regime-type and score-range selection.
    pub filters: FilterState,

    /// Indices of countries passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Active page.
    pub view: View,

    /// Origin for the nearest-neighbour list.
    pub reference: String,

    /// Text in the search box.
    pub search_query: String,

    /// Renewable-energy table, once the user opens one.
    pub energy: Option<EnergyTable>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AtlasConfig) -> Self {
        let session = SessionTable::new();
        let table = session.get();
        let filters = FilterState::all(table);
        let visible_indices = (0..table.len()).collect();
        let reference = table.names().next().unwrap_or_default().to_string();

        Self {
            config,
            session,
            filters,
            visible_indices,
            view: View::Dashboard,
            reference,
            search_query: String::new(),
            energy: None,
            status_message: None,
        }
    }

    pub fn table(&self) -> &Dataset {
        self.session.get()
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.session.get(), &self.filters);
    }

    /// Sub-table of the countries passing the filters.
    pub fn filtered(&self) -> Dataset {
        self.table().subset(&self.visible_indices)
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.filters.categories.remove(&category) {
            self.filters.categories.insert(category);
        }
        self.refilter();
    }

    /// Select every regime type.
    pub fn select_all(&mut self) {
        self.filters.categories = Category::ALL.into_iter().collect();
        self.refilter();
    }

    /// Deselect every regime type.
    pub fn select_none(&mut self) {
        self.filters.categories.clear();
        self.refilter();
    }

    /// Set the score window; bounds are swapped if given out of order.
    pub fn set_score_range(&mut self, lo: f64, hi: f64) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.filters.score_min = lo;
        self.filters.score_max = hi;
        self.refilter();
    }

    /// Reset filters to show the full table.
    pub fn reset_filters(&mut self) {
        self.filters = FilterState::all(self.session.get());
        self.refilter();
    }

    pub fn neighbors(&self) -> Result<Vec<Neighbor<'_>>, NotFoundError> {
        query::nearest(self.table(), &self.reference, self.config.neighbor_count)
    }

    pub fn search_results(&self) -> Vec<usize> {
        search_indices(self.table(), &self.search_query)
    }

    /// Export the filtered table (or the full one) to CSV/JSON.
    pub fn export(&mut self, path: &Path, filtered_only: bool) {
        let table = if filtered_only {
            self.filtered()
        } else {
            self.table().clone()
        };
        match export::export_file(&table, path) {
            Ok(()) => {
                self.status_message = Some(format!(
                    "Saved {} countries to {}",
                    table.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load the renewable-energy table. A malformed file leaves the previous
    /// table in place.
    pub fn load_energy(&mut self, path: &Path) {
        match loader::load_energy_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} renewable-energy rows from {}",
                    table.len(),
                    path.display()
                );
                self.energy = Some(table);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
