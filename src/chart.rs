use eframe::egui::Color32;

use crate::color::{series_colors, CHART_PALETTE};
use crate::data::aggregate::{ComparisonResult, GroupResult};

// ---------------------------------------------------------------------------
// Chart configuration builders
// ---------------------------------------------------------------------------
//
// Pure data: the ui layer renders these, nothing here touches egui widgets.

/// How a single-series chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Bar, ChartKind::Pie];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
        }
    }
}

/// Which aggregate a single-series chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Records per group.
    Count,
    /// Summed value field per group.
    Total,
}

impl Measure {
    pub const ALL: [Measure; 2] = [Measure::Count, Measure::Total];

    pub fn label(&self) -> &'static str {
        match self {
            Measure::Count => "Record count",
            Measure::Total => "Total",
        }
    }
}

/// A single-series chart: one value and one color per category.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesConfig {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color32>,
    pub label: String,
    pub y_axis_label: String,
}

impl SeriesConfig {
    /// Whole-percent share per slice, for pie labels and tooltips.
    pub fn percentages(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().sum();
        if total == 0.0 {
            return vec![0.0; self.values.len()];
        }
        self.values
            .iter()
            .map(|v| (v / total * 100.0).round())
            .collect()
    }
}

/// Build a bar/pie config from a grouped aggregation. Category order follows
/// the group result's first-seen order; colors are assigned by index.
pub fn series_config(
    grouped: &GroupResult,
    measure: Measure,
    label: impl Into<String>,
    y_axis_label: impl Into<String>,
) -> SeriesConfig {
    let categories: Vec<String> = grouped.keys().cloned().collect();
    let values: Vec<f64> = grouped
        .iter()
        .map(|(_, entry)| match measure {
            Measure::Count => entry.count as f64,
            Measure::Total => entry.total,
        })
        .collect();
    let colors = series_colors(categories.len());

    SeriesConfig {
        categories,
        values,
        colors,
        label: label.into(),
        y_axis_label: y_axis_label.into(),
    }
}

/// A two-series comparison chart sharing one category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub categories: Vec<String>,
    pub label_a: String,
    pub label_b: String,
    pub values_a: Vec<f64>,
    pub values_b: Vec<f64>,
    pub color_a: Color32,
    pub color_b: Color32,
    pub y_axis_label: String,
}

/// Build the year-over-year chart config from a comparison result. The two
/// series keep fixed palette colors so the years are always recognizable.
pub fn comparison_config(
    comparison: &ComparisonResult,
    label_a: impl Into<String>,
    label_b: impl Into<String>,
    y_axis_label: impl Into<String>,
) -> ComparisonConfig {
    let categories: Vec<String> = comparison.keys().cloned().collect();
    let values_a: Vec<f64> = comparison.iter().map(|(_, e)| e.value_a).collect();
    let values_b: Vec<f64> = comparison.iter().map(|(_, e)| e.value_b).collect();

    ComparisonConfig {
        categories,
        label_a: label_a.into(),
        label_b: label_b.into(),
        values_a,
        values_b,
        color_a: CHART_PALETTE[1],
        color_b: CHART_PALETTE[4],
        y_axis_label: y_axis_label.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{compare_records, group_records};
    use crate::data::model::{FieldValue, Record};
    use pretty_assertions::assert_eq;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn series_config_follows_group_order() {
        let rows = vec![
            rec(&[("isp", "Zeta"), ("amt", "10")]),
            rec(&[("isp", "Alpha"), ("amt", "5")]),
            rec(&[("isp", "Zeta"), ("amt", "2")]),
        ];
        let grouped = group_records(&rows, "isp", "amt");
        let cfg = series_config(&grouped, Measure::Total, "Amount by ISP", "Amount");

        assert_eq!(cfg.categories, vec!["Zeta", "Alpha"]);
        assert_eq!(cfg.values, vec![12.0, 5.0]);
        assert_eq!(cfg.colors, vec![CHART_PALETTE[0], CHART_PALETTE[1]]);
    }

    #[test]
    fn count_measure_plots_record_counts() {
        let rows = vec![
            rec(&[("isp", "A"), ("amt", "10")]),
            rec(&[("isp", "A"), ("amt", "5")]),
            rec(&[("isp", "B"), ("amt", "3")]),
        ];
        let grouped = group_records(&rows, "isp", "amt");
        let cfg = series_config(&grouped, Measure::Count, "Records", "Count");
        assert_eq!(cfg.values, vec![2.0, 1.0]);
    }

    #[test]
    fn pie_percentages_are_whole_and_zero_safe() {
        let cfg = SeriesConfig {
            categories: vec!["a".into(), "b".into(), "c".into()],
            values: vec![1.0, 1.0, 1.0],
            colors: series_colors(3),
            label: String::new(),
            y_axis_label: String::new(),
        };
        assert_eq!(cfg.percentages(), vec![33.0, 33.0, 33.0]);

        let empty = SeriesConfig {
            values: vec![0.0, 0.0],
            categories: vec!["a".into(), "b".into()],
            colors: series_colors(2),
            label: String::new(),
            y_axis_label: String::new(),
        };
        assert_eq!(empty.percentages(), vec![0.0, 0.0]);
    }

    #[test]
    fn comparison_config_pairs_series_over_shared_categories() {
        let a = vec![rec(&[("isp", "A"), ("amt", "10")])];
        let b = vec![
            rec(&[("isp", "A"), ("amt", "15")]),
            rec(&[("isp", "B"), ("amt", "4")]),
        ];
        let cmp = compare_records(&a, &b, "isp", "amt");
        let cfg = comparison_config(&cmp, "2025", "2026", "Amount");

        assert_eq!(cfg.categories, vec!["A", "B"]);
        assert_eq!(cfg.values_a, vec![10.0, 0.0]);
        assert_eq!(cfg.values_b, vec![15.0, 4.0]);
        assert_eq!(cfg.label_a, "2025");
        assert_ne!(cfg.color_a, cfg.color_b);
    }
}
