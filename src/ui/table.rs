use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::{self, Measure, SeriesConfig};
use crate::data::aggregate::group_records;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Data view – paginated record table + distribution chart
// ---------------------------------------------------------------------------

/// Render the data view: pagination controls, the record table for the
/// current page (selected columns only), and the grouped distribution of
/// all filtered records charted underneath.
pub fn data_view(ui: &mut Ui, state: &mut AppState) {
    let group_options = state.categorical_columns();
    let numeric_options = state.numeric_columns();

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.page > 0, egui::Button::new("◀ Prev"))
            .clicked()
        {
            state.page -= 1;
        }
        if ui
            .add_enabled(
                state.page + 1 < state.page_count(),
                egui::Button::new("Next ▶"),
            )
            .clicked()
        {
            state.page += 1;
        }
        ui.label(format!(
            "Page {} of {}  ·  {} matching records",
            state.page + 1,
            state.page_count(),
            state.visible_indices.len()
        ));

        ui.separator();
        panels::field_selector(ui, "Group by", &mut state.group_field, &group_options);
        panels::field_selector(ui, "Value", &mut state.value_field, &numeric_options);
    });
    ui.separator();

    // Chart of the filtered records (every page, not just the visible one).
    let config = distribution_config(state);
    egui::TopBottomPanel::bottom("data_distribution")
        .resizable(true)
        .default_height(ui.available_height() * 0.4)
        .show_inside(ui, |ui| {
            ui.add_space(4.0);
            plot::bar_chart(ui, &config);
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        record_table(ui, state);
    });
}

/// Grouped distribution of the filtered current-year records, for the chart
/// under the table.
fn distribution_config(state: &AppState) -> SeriesConfig {
    let dataset = state.current_dataset();
    let filtered = state.visible_indices.iter().map(|&i| &dataset.records[i]);
    let grouped = group_records(filtered, &state.group_field, &state.value_field);

    let y_axis = match state.measure {
        Measure::Count => "Records".to_string(),
        Measure::Total => state.value_field.clone(),
    };
    chart::series_config(
        &grouped,
        state.measure,
        format!("{} by {}", y_axis, state.group_field),
        y_axis,
    )
}

fn record_table(ui: &mut Ui, state: &AppState) {
    let columns = state.display_columns();
    if columns.is_empty() {
        ui.label("No columns selected.");
        return;
    }

    let dataset = state.current_dataset();
    let page_indices = state.page_indices();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(80.0), columns.len())
        .header(22.0, |mut header| {
            for col in &columns {
                header.col(|ui| {
                    ui.label(RichText::new(col).strong());
                });
            }
        })
        .body(|body| {
            body.rows(20.0, page_indices.len(), |mut row| {
                let record = &dataset.records[page_indices[row.index()]];
                for col in &columns {
                    row.col(|ui| {
                        ui.label(record.display(col));
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, FieldValue, Record};
    use crate::state::Theme;
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
        let d25 = Dataset::from_records(vec![
            rec("A", 10.0),
            rec("B", 4.0),
            rec("A", 5.0),
        ]);
        let d26 = Dataset::from_records(vec![rec("C", 1.0)]);
        AppState::new(d25, d26, Theme::Dark)
    }

    #[test]
    fn distribution_chart_covers_all_matching_records() {
        let mut s = state();
        s.set_per_page(1);
        let cfg = distribution_config(&s);
        // Every filtered record contributes, not just the current page.
        assert_eq!(cfg.categories, vec!["A", "B"]);
        assert_eq!(cfg.values, vec![15.0, 4.0]);
    }

    #[test]
    fn distribution_chart_follows_the_active_filters() {
        let mut s = state();
        s.set_filter("isp", "A".into());
        let cfg = distribution_config(&s);
        assert_eq!(cfg.categories, vec!["A"]);
        assert_eq!(cfg.values, vec![15.0]);
    }

    #[test]
    fn count_measure_charts_record_counts() {
        let mut s = state();
        s.measure = Measure::Count;
        let cfg = distribution_config(&s);
        assert_eq!(cfg.values, vec![2.0, 1.0]);
        assert_eq!(cfg.y_axis_label, "Records");
    }
}
