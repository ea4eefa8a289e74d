//! Chart Viewer Widget
//! Central scrollable panel: raw data preview and the three funding charts.

use crate::charts::{ChartPlotter, INDUSTRY_COLOR, STARTUP_COLOR};
use crate::data::{FundingSummary, ProcessorError};
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;

const PREVIEW_ROWS: usize = 5;
const SECTION_SPACING: f32 = 15.0;

/// Scrollable dashboard body.
#[derive(Default)]
pub struct ChartViewer {
    pub summary: Option<FundingSummary>,
    /// Why the last summary could not be computed.
    pub summary_error: Option<String>,
    preview: Vec<Vec<String>>,
    preview_columns: Vec<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear charts and preview
    pub fn clear(&mut self) {
        self.summary = None;
        self.summary_error = None;
        self.preview.clear();
        self.preview_columns.clear();
    }

    /// Cache the first rows of the table as display strings.
    pub fn set_preview(&mut self, df: &DataFrame) {
        let head = df.head(Some(PREVIEW_ROWS));
        self.preview_columns = head
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.preview = (0..head.height())
            .map(|i| {
                head.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(AnyValue::Null) | Err(_) => String::new(),
                        Ok(val) => val.to_string().trim_matches('"').to_string(),
                    })
                    .collect()
            })
            .collect();
    }

    /// Show a freshly computed summary, or drop the stale charts on failure.
    ///
    /// Returns whether there is anything to export.
    pub fn apply_summary(&mut self, result: Result<FundingSummary, ProcessorError>) -> bool {
        match result {
            Ok(summary) => {
                let exportable = !summary.is_empty();
                self.summary = Some(summary);
                self.summary_error = None;
                exportable
            }
            Err(e) => {
                self.summary = None;
                self.summary_error = Some(e.to_string());
                false
            }
        }
    }

    /// Draw the dashboard body
    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new("🚀 Startup Investment Analysis Dashboard")
                        .size(24.0)
                        .strong(),
                );
                ui.label(
                    "Welcome to the Startup Investment Analysis Dashboard! This dashboard \
                     provides insights into startup funding trends and patterns.",
                );
                ui.label("You can use the filters on the left sidebar to explore different aspects of the data.");
                ui.add_space(SECTION_SPACING);

                if let Some(error) = &self.summary_error {
                    self.draw_preview(ui);
                    ui.add_space(SECTION_SPACING);
                    ui.label(
                        RichText::new(format!("❌ Could not build charts: {}", error))
                            .size(14.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                    return;
                }

                let Some(summary) = &self.summary else {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No Data").size(20.0));
                    });
                    return;
                };

                self.draw_preview(ui);
                ui.add_space(SECTION_SPACING);

                ui.label(
                    RichText::new(format!(
                        "{} of {} rows selected",
                        summary.filtered_rows, summary.total_rows
                    ))
                    .size(12.0)
                    .color(Color32::GRAY),
                );
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "📈 Investment Over Time");
                match &summary.monthly {
                    Some(monthly) if !summary.is_empty() => {
                        ChartPlotter::draw_monthly_chart(ui, monthly)
                    }
                    _ => ChartPlotter::draw_no_data(ui),
                }
                ui.add_space(SECTION_SPACING);

                if let Some(startups) = &summary.top_startups {
                    Self::section(ui, &format!("🏆 Top {} Funded Startups", summary.top));
                    ChartPlotter::draw_top_bar_chart(ui, "top_startups", startups, STARTUP_COLOR);
                    ui.add_space(SECTION_SPACING);
                }

                if let Some(industries) = &summary.top_industries {
                    Self::section(ui, &format!("🏭 Top {} Funded Industries", summary.top));
                    ChartPlotter::draw_horizontal_bar_chart(
                        ui,
                        "top_industries",
                        industries,
                        INDUSTRY_COLOR,
                    );
                }
            });
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(5.0);
    }

    fn draw_preview(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("📄 Show Raw Data")
            .default_open(false)
            .show(ui, |ui| {
                ScrollArea::horizontal().show(ui, |ui| {
                    egui::Grid::new("raw_data_preview")
                        .striped(true)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for name in &self.preview_columns {
                                ui.label(RichText::new(name).strong().size(11.0));
                            }
                            ui.end_row();

                            for row in &self.preview {
                                for cell in row {
                                    ui.label(RichText::new(cell).size(11.0));
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }
}
