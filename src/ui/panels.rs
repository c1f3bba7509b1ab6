use eframe::egui::{self, Color32, ComboBox, RichText, ScrollArea, Ui};

use crate::chart::{self, ChartKind, Measure};
use crate::data::aggregate::{compare_records, group_records};
use crate::data::filter::{filter_records, has_active_constraints};
use crate::state::{AppState, Theme, View, Year, PER_PAGE_CHOICES};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: file menu, view switcher, year selector,
/// theme toggle, record counts, status message.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let label = format!("Open {} dataset…", state.current_year.label());
            if ui.button(label).clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for view in View::ALL {
            if ui
                .selectable_label(state.view == view, view.label())
                .clicked()
            {
                state.view = view;
            }
        }

        ui.separator();

        ui.label("Year:");
        for year in Year::ALL {
            if ui
                .selectable_label(state.current_year == year, year.label())
                .clicked()
            {
                state.set_year(year);
            }
        }

        ui.separator();

        ui.label(format!(
            "{} records, {} visible",
            state.current_dataset().len(),
            state.visible_indices.len()
        ));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = match state.theme {
                Theme::Dark => "☀ Light",
                Theme::Light => "🌙 Dark",
            };
            if ui.button(theme_label).clicked() {
                state.theme = state.theme.toggled();
            }

            if let Some(msg) = &state.status_message {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel: one dropdown per categorical column, a reset
/// button, pagination size, and column visibility.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.current_dataset().is_empty() {
        ui.label("No records loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let options = state.filter_options.clone();
            for (col, values) in &options {
                let mut selection = state
                    .filters
                    .get(col)
                    .cloned()
                    .unwrap_or_default();
                let display = if selection.is_empty() {
                    "(all)".to_string()
                } else {
                    selection.clone()
                };

                ui.label(RichText::new(col).strong());
                let mut changed = false;
                ComboBox::from_id_salt(col)
                    .selected_text(display)
                    .width(ui.available_width() - 8.0)
                    .show_ui(ui, |ui: &mut Ui| {
                        changed |= ui
                            .selectable_value(&mut selection, String::new(), "(all)")
                            .changed();
                        for value in values {
                            changed |= ui
                                .selectable_value(&mut selection, value.clone(), value)
                                .changed();
                        }
                    });
                if changed {
                    state.set_filter(col, selection);
                }
                ui.add_space(4.0);
            }

            if ui
                .add_enabled(
                    has_active_constraints(&state.filters),
                    egui::Button::new("Reset filters"),
                )
                .clicked()
            {
                state.reset_filters();
            }

            ui.separator();
            ui.label(RichText::new("Rows per page").strong());
            let mut per_page = state.per_page;
            ComboBox::from_id_salt("per_page")
                .selected_text(per_page.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for choice in PER_PAGE_CHOICES {
                        ui.selectable_value(&mut per_page, choice, choice.to_string());
                    }
                });
            if per_page != state.per_page {
                state.set_per_page(per_page);
            }

            ui.separator();
            ui.label(RichText::new("Columns").strong());
            let columns = state.current_dataset().column_names.clone();
            for col in columns {
                let mut shown = state.selected_columns.contains(&col);
                if ui.checkbox(&mut shown, &col).changed() {
                    if shown {
                        state.selected_columns.insert(col);
                    } else {
                        state.selected_columns.remove(&col);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Comparison view
// ---------------------------------------------------------------------------

/// Year-over-year comparison: field selectors, paired bar chart, and the
/// per-category difference table.
pub fn comparison_view(ui: &mut Ui, state: &mut AppState) {
    let group_options = state.categorical_columns();
    let numeric_options = state.numeric_columns();
    ui.horizontal(|ui: &mut Ui| {
        field_selector(ui, "Group by", &mut state.group_field, &group_options);
        field_selector(ui, "Compare", &mut state.compare_field, &numeric_options);
    });
    ui.separator();

    let comparison = compare_records(
        &state.data_2025.records,
        &state.data_2026.records,
        &state.group_field,
        &state.compare_field,
    );
    let config = chart::comparison_config(
        &comparison,
        Year::Y2025.label(),
        Year::Y2026.label(),
        &state.compare_field,
    );

    let chart_height = ui.available_height() * 0.55;
    ui.allocate_ui(egui::vec2(ui.available_width(), chart_height), |ui| {
        plot::comparison_chart(ui, &config);
    });
    ui.separator();

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        egui::Grid::new("comparison_table")
            .striped(true)
            .num_columns(5)
            .show(ui, |ui: &mut Ui| {
                ui.strong(&state.group_field);
                ui.strong(Year::Y2025.label());
                ui.strong(Year::Y2026.label());
                ui.strong("Difference");
                ui.strong("Change");
                ui.end_row();

                for (key, entry) in comparison.iter() {
                    ui.label(key);
                    ui.label(format!("{:.2}", entry.value_a));
                    ui.label(format!("{:.2}", entry.value_b));
                    ui.label(signed_text(entry.difference, ""));
                    ui.label(signed_text(entry.percent_change, "%"));
                    ui.end_row();
                }
            });
    });
}

/// Green for growth, red for decline, plain for no change.
fn signed_text(value: f64, suffix: &str) -> RichText {
    let text = RichText::new(format!("{value:+.2}{suffix}"));
    if value > 0.0 {
        text.color(Color32::from_rgb(76, 175, 80))
    } else if value < 0.0 {
        text.color(Color32::from_rgb(255, 99, 132))
    } else {
        text
    }
}

// ---------------------------------------------------------------------------
// Statistics view
// ---------------------------------------------------------------------------

/// Grouped distribution of the filtered current-year data as bar or pie.
pub fn statistics_view(ui: &mut Ui, state: &mut AppState) {
    let group_options = state.categorical_columns();
    let numeric_options = state.numeric_columns();
    ui.horizontal(|ui: &mut Ui| {
        field_selector(ui, "Group by", &mut state.group_field, &group_options);
        field_selector(ui, "Value", &mut state.value_field, &numeric_options);

        ui.label("Measure:");
        for measure in Measure::ALL {
            ui.selectable_value(&mut state.measure, measure, measure.label());
        }

        ui.label("Chart:");
        for kind in ChartKind::ALL {
            ui.selectable_value(&mut state.chart_kind, kind, kind.label());
        }
    });
    ui.separator();

    let dataset = state.current_dataset();
    let filtered = filter_records(&dataset.records, &state.filters);
    let grouped = group_records(filtered, &state.group_field, &state.value_field);
    let y_axis = match state.measure {
        Measure::Count => "Records".to_string(),
        Measure::Total => state.value_field.clone(),
    };
    let config = chart::series_config(
        &grouped,
        state.measure,
        format!("{} by {}", y_axis, state.group_field),
        y_axis,
    );

    match state.chart_kind {
        ChartKind::Bar => plot::bar_chart(ui, &config),
        ChartKind::Pie => {
            ui.vertical_centered(|ui: &mut Ui| {
                plot::pie_chart(ui, &config);
            });
        }
    }
}

pub(crate) fn field_selector(
    ui: &mut Ui,
    label: &str,
    selection: &mut String,
    options: &[String],
) {
    ui.label(format!("{label}:"));
    ComboBox::from_id_salt(label)
        .selected_text(selection.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                ui.selectable_value(selection, option.clone(), option);
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick a JSON/CSV file and swap it in as the current year's dataset.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open settlement data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                state.status_message = None;
                state.replace_current_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
