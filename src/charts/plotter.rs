//! Chart Plotter Module
//! Draws the interactive dashboard charts using egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

pub const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const STARTUP_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const INDUSTRY_COLOR: Color32 = Color32::from_rgb(155, 89, 182); // Purple

pub const NO_DATA_MESSAGE: &str = "No data available for the selected filter.";

const CHART_HEIGHT: f32 = 320.0;

/// Short USD label: `$1.2B`, `$3.5M`, `$250K`, `$900`.
pub fn format_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("${:.0}K", value / 1e3)
    } else {
        format!("${:.0}", value)
    }
}

/// Label for a category axis tick; blank between integer positions.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > f64::EPSILON || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Warning shown in place of a chart with nothing to draw.
    pub fn draw_no_data(ui: &mut egui::Ui) {
        ui.label(
            RichText::new(format!("⚠ {}", NO_DATA_MESSAGE))
                .size(13.0)
                .color(Color32::from_rgb(255, 193, 7)),
        );
    }

    /// Funding per month as a line, months on the x-axis in order.
    pub fn draw_monthly_chart(ui: &mut egui::Ui, monthly: &[(String, f64)]) {
        if monthly.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        let labels: Vec<String> = monthly.iter().map(|(month, _)| month.clone()).collect();
        let points: Vec<[f64; 2]> = monthly
            .iter()
            .enumerate()
            .map(|(i, (_, total))| [i as f64, *total])
            .collect();

        Plot::new("monthly_funding")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Month")
            .y_axis_label("Amount (USD)")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| format_amount(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name("Amount in USD"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(LINE_COLOR),
                );
            });
    }

    /// Vertical bars, one per group in ranking order.
    pub fn draw_top_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        groups: &[(String, f64)],
        color: Color32,
    ) {
        if groups.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        let labels: Vec<String> = groups.iter().map(|(key, _)| key.clone()).collect();
        let bars: Vec<Bar> = groups
            .iter()
            .enumerate()
            .map(|(i, (key, total))| Bar::new(i as f64, *total).name(key).fill(color))
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .y_axis_label("Amount (USD)")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| format_amount(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color).width(0.7));
            });
    }

    /// Horizontal bars with the largest group on top.
    pub fn draw_horizontal_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        groups: &[(String, f64)],
        color: Color32,
    ) {
        if groups.is_empty() {
            Self::draw_no_data(ui);
            return;
        }

        let n = groups.len();
        // Rank 0 is drawn at the highest y position.
        let labels: Vec<String> = groups.iter().rev().map(|(key, _)| key.clone()).collect();
        let bars: Vec<Bar> = groups
            .iter()
            .enumerate()
            .map(|(rank, (key, total))| {
                Bar::new((n - 1 - rank) as f64, *total).name(key).fill(color)
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Funding Amount (USD)")
            .x_axis_formatter(|mark, _range| format_amount(mark.value))
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .y_axis_min_width(180.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(color)
                        .width(0.7)
                        .horizontal(),
                );
            });
    }
}
