use std::collections::{BTreeMap, BTreeSet};

use crate::chart::{ChartKind, Measure};
use crate::data::filter::{matching_indices, unique_values, FilterSpec};
use crate::data::model::{Dataset, FieldValue};

// ---------------------------------------------------------------------------
// View routing
// ---------------------------------------------------------------------------

/// The three dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Data,
    Comparison,
    Statistics,
}

impl View {
    pub const ALL: [View; 3] = [View::Data, View::Comparison, View::Statistics];

    pub fn label(&self) -> &'static str {
        match self {
            View::Data => "Data",
            View::Comparison => "Comparison",
            View::Statistics => "Statistics",
        }
    }
}

// ---------------------------------------------------------------------------
// Year selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Year {
    Y2025,
    Y2026,
}

impl Year {
    pub const ALL: [Year; 2] = [Year::Y2025, Year::Y2026];

    pub fn label(&self) -> &'static str {
        match self {
            Year::Y2025 => "2025",
            Year::Y2026 => "2026",
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Value written to the persistent key-value store.
    pub fn storage_value(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_storage_value(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Rows-per-page choices offered in the side panel.
pub const PER_PAGE_CHOICES: [usize; 3] = [10, 25, 50];

/// The full UI state, independent of rendering: both yearly datasets plus
/// everything the original kept in its store (current year, filters,
/// pagination, selected columns, theme) and the chart field selections.
pub struct AppState {
    pub data_2025: Dataset,
    pub data_2026: Dataset,
    pub current_year: Year,

    pub view: View,
    pub theme: Theme,

    /// Per-column filter constraints for the current year's dataset.
    pub filters: FilterSpec,
    /// Dropdown options per filterable column (cached per dataset).
    pub filter_options: BTreeMap<String, Vec<String>>,
    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Pagination for the data table.
    pub per_page: usize,
    pub page: usize,

    /// Columns shown in the data table.
    pub selected_columns: BTreeSet<String>,

    /// Chart field selections (statistics and comparison views).
    pub group_field: String,
    pub value_field: String,
    pub compare_field: String,
    pub chart_kind: ChartKind,
    pub measure: Measure,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_2025: Dataset, data_2026: Dataset, theme: Theme) -> Self {
        let mut state = AppState {
            data_2025,
            data_2026,
            current_year: Year::Y2025,
            view: View::Data,
            theme,
            filters: FilterSpec::new(),
            filter_options: BTreeMap::new(),
            visible_indices: Vec::new(),
            per_page: PER_PAGE_CHOICES[0],
            page: 0,
            selected_columns: BTreeSet::new(),
            group_field: String::new(),
            value_field: String::new(),
            compare_field: String::new(),
            chart_kind: ChartKind::Bar,
            measure: Measure::Total,
            status_message: None,
        };
        state.reset_for_dataset();
        state
    }

    pub fn current_dataset(&self) -> &Dataset {
        match self.current_year {
            Year::Y2025 => &self.data_2025,
            Year::Y2026 => &self.data_2026,
        }
    }

    /// Columns that get a filter dropdown: those carrying text values.
    pub fn categorical_columns(&self) -> Vec<String> {
        columns_with(self.current_dataset(), |v| {
            matches!(v, FieldValue::Text(s) if !s.is_empty())
        })
    }

    /// Columns eligible as value/compare fields: those carrying numbers.
    pub fn numeric_columns(&self) -> Vec<String> {
        columns_with(self.current_dataset(), |v| {
            matches!(v, FieldValue::Number(_))
        })
    }

    /// Re-derive filters, options, columns, and chart fields after the
    /// active dataset changed (year switch or file load).
    pub fn reset_for_dataset(&mut self) {
        let categorical = self.categorical_columns();
        let numeric = self.numeric_columns();

        let dataset = self.current_dataset();
        let filter_options: BTreeMap<String, Vec<String>> = categorical
            .iter()
            .map(|col| (col.clone(), unique_values(&dataset.records, col)))
            .collect();
        let selected_columns: BTreeSet<String> =
            dataset.column_names.iter().cloned().collect();

        self.filters = categorical
            .iter()
            .map(|col| (col.clone(), String::new()))
            .collect();
        self.filter_options = filter_options;
        self.selected_columns = selected_columns;

        if !categorical.iter().any(|c| *c == self.group_field) {
            self.group_field = categorical.first().cloned().unwrap_or_default();
        }
        if !numeric.iter().any(|c| *c == self.value_field) {
            self.value_field = numeric.first().cloned().unwrap_or_default();
        }
        if !numeric.iter().any(|c| *c == self.compare_field) {
            self.compare_field = numeric.first().cloned().unwrap_or_default();
        }

        self.page = 0;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = matching_indices(self.current_dataset(), &self.filters);
        self.clamp_page();
    }

    pub fn set_year(&mut self, year: Year) {
        if self.current_year != year {
            self.current_year = year;
            self.reset_for_dataset();
        }
    }

    pub fn set_filter(&mut self, column: &str, value: String) {
        self.filters.insert(column.to_string(), value);
        self.page = 0;
        self.refilter();
    }

    /// Clear every constraint (the original store's RESET_FILTERS action).
    pub fn reset_filters(&mut self) {
        for value in self.filters.values_mut() {
            value.clear();
        }
        self.page = 0;
        self.refilter();
    }

    /// Replace the currently selected year's dataset (File → Open).
    pub fn replace_current_dataset(&mut self, dataset: Dataset) {
        match self.current_year {
            Year::Y2025 => self.data_2025 = dataset,
            Year::Y2026 => self.data_2026 = dataset,
        }
        self.reset_for_dataset();
    }

    // ---- pagination ----

    pub fn page_count(&self) -> usize {
        self.visible_indices.len().div_ceil(self.per_page).max(1)
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.clamp_page();
    }

    /// Visible record indices for the current page.
    pub fn page_indices(&self) -> &[usize] {
        let start = self.page * self.per_page;
        let end = (start + self.per_page).min(self.visible_indices.len());
        if start >= self.visible_indices.len() {
            &[]
        } else {
            &self.visible_indices[start..end]
        }
    }

    /// Display columns in dataset order, restricted to the selected set.
    pub fn display_columns(&self) -> Vec<String> {
        self.current_dataset()
            .column_names
            .iter()
            .filter(|c| self.selected_columns.contains(*c))
            .cloned()
            .collect()
    }
}

fn columns_with(dataset: &Dataset, pred: impl Fn(&FieldValue) -> bool) -> Vec<String> {
    dataset
        .column_names
        .iter()
        .filter(|col| {
            dataset
                .records
                .iter()
                .filter_map(|rec| rec.get(col))
                .any(|v| pred(v))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use pretty_assertions::assert_eq;

    fn rec(isp: &str, amount: f64) -> Record {
        [
            ("isp".to_string(), FieldValue::Text(isp.to_string())),
            ("amount".to_string(), FieldValue::Number(amount)),
        ]
        .into_iter()
        .collect()
    }

    fn state() -> AppState {
        let d25 = Dataset::from_records(vec![rec("A", 1.0), rec("B", 2.0), rec("A", 3.0)]);
        let d26 = Dataset::from_records(vec![rec("C", 4.0)]);
        AppState::new(d25, d26, Theme::Dark)
    }

    #[test]
    fn initial_state_shows_everything() {
        let s = state();
        assert_eq!(s.visible_indices, vec![0, 1, 2]);
        assert_eq!(s.categorical_columns(), vec!["isp"]);
        assert_eq!(s.numeric_columns(), vec!["amount"]);
        assert_eq!(s.group_field, "isp");
        assert_eq!(s.value_field, "amount");
    }

    #[test]
    fn filter_set_and_reset_round_trip() {
        let mut s = state();
        s.set_filter("isp", "A".into());
        assert_eq!(s.visible_indices, vec![0, 2]);
        s.reset_filters();
        assert_eq!(s.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn year_switch_rebuilds_options_and_filters() {
        let mut s = state();
        s.set_filter("isp", "A".into());
        s.set_year(Year::Y2026);
        assert_eq!(s.visible_indices, vec![0]);
        assert_eq!(s.filter_options.get("isp").unwrap(), &vec!["C"]);
        assert!(!crate::data::filter::has_active_constraints(&s.filters));
    }

    #[test]
    fn pagination_clamps_to_last_page() {
        let mut s = state();
        s.set_per_page(2);
        assert_eq!(s.page_count(), 2);
        s.page = 5;
        s.set_filter("isp", "A".into());
        assert!(s.page < s.page_count());
        assert_eq!(s.page_indices().len(), 2);
    }

    #[test]
    fn display_columns_respect_selection() {
        let mut s = state();
        s.selected_columns.remove("amount");
        assert_eq!(s.display_columns(), vec!["isp"]);
    }
}
