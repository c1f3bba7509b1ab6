use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::chart::{ComparisonConfig, SeriesConfig};

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Render a single-series bar chart, one colored bar per category.
pub fn bar_chart(ui: &mut Ui, config: &SeriesConfig) {
    if config.categories.is_empty() {
        empty_chart_message(ui);
        return;
    }

    let bars: Vec<Bar> = config
        .values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Bar::new(i as f64, value)
                .width(0.6)
                .name(&config.categories[i])
                .fill(config.colors[i])
        })
        .collect();

    let categories = config.categories.clone();
    Plot::new("bar_chart")
        .y_axis_label(&config.y_axis_label)
        .x_axis_formatter(move |mark, _range| category_tick(&categories, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&config.label));
        });
}

// ---------------------------------------------------------------------------
// Comparison chart (two series, shared categories)
// ---------------------------------------------------------------------------

/// Render the year-over-year chart: paired bars per category.
pub fn comparison_chart(ui: &mut Ui, config: &ComparisonConfig) {
    if config.categories.is_empty() {
        empty_chart_message(ui);
        return;
    }

    let bars_a: Vec<Bar> = config
        .values_a
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64 - 0.2, v)
                .width(0.35)
                .name(&config.categories[i])
                .fill(config.color_a)
        })
        .collect();
    let bars_b: Vec<Bar> = config
        .values_b
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64 + 0.2, v)
                .width(0.35)
                .name(&config.categories[i])
                .fill(config.color_b)
        })
        .collect();

    let categories = config.categories.clone();
    Plot::new("comparison_chart")
        .legend(Legend::default())
        .y_axis_label(&config.y_axis_label)
        .x_axis_formatter(move |mark, _range| category_tick(&categories, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars_a).name(&config.label_a));
            plot_ui.bar_chart(BarChart::new(bars_b).name(&config.label_b));
        });
}

/// Label integer ticks with their category name; everything else stays blank.
fn category_tick(categories: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    categories
        .get(value as usize)
        .cloned()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart (painted; egui_plot has no pie primitive)
// ---------------------------------------------------------------------------

/// Render a pie chart with per-slice share labels.
pub fn pie_chart(ui: &mut Ui, config: &SeriesConfig) {
    let total: f64 = config.values.iter().sum();
    if config.categories.is_empty() || total <= 0.0 {
        empty_chart_message(ui);
        return;
    }

    let size = ui.available_size().min_elem().max(120.0);
    let (response, painter) =
        ui.allocate_painter(egui::vec2(size, size), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.38;
    let percentages = config.percentages();

    let mut start = -TAU / 4.0; // 12 o'clock
    for (i, &value) in config.values.iter().enumerate() {
        let sweep = (value / total) as f32 * TAU;
        if sweep <= 0.0 {
            continue;
        }
        paint_slice(&painter, center, radius, start, sweep, config.colors[i]);

        // Slice label at the wedge midpoint.
        let mid = start + sweep / 2.0;
        let label_pos = center
            + egui::vec2(mid.cos(), mid.sin()) * radius * 1.25;
        painter.text(
            label_pos,
            egui::Align2::CENTER_CENTER,
            format!("{} ({}%)", config.categories[i], percentages[i]),
            egui::FontId::proportional(12.0),
            ui.visuals().text_color(),
        );

        start += sweep;
    }
}

/// Fill one wedge as a fan of thin triangles; robust for any sweep angle.
fn paint_slice(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / TAU * 96.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 1);
    for s in 0..=steps {
        let angle = start + sweep * s as f32 / steps as f32;
        points.push(center + egui::vec2(angle.cos(), angle.sin()) * radius);
    }
    for window in points.windows(2) {
        painter.add(Shape::convex_polygon(
            vec![center, window[0], window[1]],
            color,
            Stroke::NONE,
        ));
    }
}

fn empty_chart_message(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No data matches the current selection");
    });
}
