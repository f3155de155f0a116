use std::path::Path;

use crate::chart::plan::{Chart, PlanError, RenderPlan};
use crate::config::{ChartConfig, Theme};
use crate::data::aggregate::country_names;
use crate::data::loader::load_file;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ChartConfig,
    pub theme: Theme,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Selector options: distinct country names in first-seen order.
    pub countries: Vec<String>,

    /// Drill-down country; None shows the world view.
    pub selected_country: Option<String>,

    /// Plan for the current view (None when nothing can be drawn).
    pub plan: Option<RenderPlan>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ChartConfig, theme: Theme) -> Self {
        Self {
            config,
            theme,
            dataset: None,
            countries: Vec::new(),
            selected_country: None,
            plan: None,
            status_message: None,
        }
    }

    /// Load a CSV from disk; failures are logged and shown, never retried.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path, self.config.row_policy) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records ({} rows dropped) from {}",
                    dataset.len(),
                    dataset.issues.len(),
                    path.display()
                );
                if dataset.is_empty() {
                    log::warn!("{} has no usable records", path.display());
                }
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and show the world view.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.countries = country_names(&dataset.records);
        self.dataset = Some(dataset);
        self.selected_country = None;
        self.status_message = None;
        self.rebuild_plan();
    }

    /// Switch between the world view (None) and a country drill-down.
    pub fn select_country(&mut self, country: Option<String>) {
        if self.selected_country == country {
            return;
        }
        self.selected_country = country;
        self.rebuild_plan();
    }

    /// Recompute the plan for the current selection from scratch.
    pub fn rebuild_plan(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.plan = None;
            return;
        };

        match build_plan(dataset, &self.config, &self.theme, self.selected_country.as_deref()) {
            Ok(plan) => {
                self.status_message = (!plan.warnings.is_empty())
                    .then(|| format!("{} value(s) could not be drawn", plan.warnings.len()));
                self.plan = Some(plan);
            }
            Err(e) => {
                log::error!("Failed to build chart: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.plan = None;
            }
        }
    }
}

/// World view when `country` is None, drill-down otherwise.
pub fn build_plan(
    dataset: &Dataset,
    config: &ChartConfig,
    theme: &Theme,
    country: Option<&str>,
) -> Result<RenderPlan, PlanError> {
    let chart = Chart::new(dataset, &config.layout, theme);
    match country {
        Some(name) => chart.set_country_filter(name),
        None => chart.world(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_text;
    use crate::data::model::RowPolicy;

    fn state() -> AppState {
        let config = ChartConfig::default();
        let theme = config.theme().unwrap();
        AppState::new(config, theme)
    }

    const ROWS: &str = "h\nWorld,WLD,1990,10,5,5\nWorld,WLD,1991,12,6,6\nChad,TCD,1990,1,1,1\n";

    #[test]
    fn loading_a_dataset_shows_the_world() {
        let mut state = state();
        state.set_dataset(parse_text(ROWS, RowPolicy::Propagate).unwrap());
        assert_eq!(state.countries, vec!["World", "Chad"]);
        let plan = state.plan.as_ref().unwrap();
        assert_eq!(plan.title, "World");
        assert_eq!(plan.series[0].1.values, vec![23.0, 24.0]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selecting_a_country_replaces_the_plan() {
        let mut state = state();
        state.set_dataset(parse_text(ROWS, RowPolicy::Propagate).unwrap());
        state.select_country(Some("Chad".into()));
        assert_eq!(state.plan.as_ref().unwrap().title, "Chad");
        assert_eq!(state.plan.as_ref().unwrap().years(), &[1990]);

        state.select_country(None);
        assert_eq!(state.plan.as_ref().unwrap().title, "World");
    }

    #[test]
    fn plan_failures_surface_in_the_status_line() {
        let mut state = state();
        state.set_dataset(parse_text("h\nNil,NIL,2000,0,0,0\n", RowPolicy::Propagate).unwrap());
        assert!(state.plan.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("cannot scale"));
    }

    #[test]
    fn load_failure_keeps_the_chart_empty() {
        let mut state = state();
        state.load_path(Path::new("/no/such/death-rates.csv"));
        assert!(state.dataset.is_none());
        assert!(state.plan.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }
}
