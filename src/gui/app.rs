//! Funding Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::ChartRenderer;
use crate::data::{DataLoader, DataNormalizer, DataProcessor, FundingSummary};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, LoadStatus};
use egui::SidePanel;
use log::{error, info, warn};
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// Main application window.
///
/// Owns the re-render trigger: the summary is recomputed whenever the
/// year selection changes, while the loader keeps each file's table cached.
pub struct DashboardApp {
    loader: DataLoader,
    table: Option<DataFrame>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            table: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        app.load_data(data_path);
        app
    }

    /// Load and normalize `path`, then rebuild the filter and charts.
    fn load_data(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.table = None;
        self.control_panel.update_years(Vec::new());
        self.control_panel.export_enabled = false;
        self.control_panel.export_status = None;
        self.control_panel.csv_path = Some(path.clone());

        let loaded = match self.loader.load(&path) {
            Ok(Some(df)) => df,
            Ok(None) => {
                self.control_panel.load_status = LoadStatus::NotFound(path);
                return;
            }
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                self.control_panel.load_status = LoadStatus::Failed(e.to_string());
                return;
            }
        };

        let table = match DataNormalizer::normalize(&loaded) {
            Ok(df) => df,
            Err(e) => {
                error!("Failed to normalize {}: {}", path.display(), e);
                self.control_panel.load_status = LoadStatus::Failed(e.to_string());
                return;
            }
        };

        self.control_panel.load_status = LoadStatus::Loaded {
            rows: table.height(),
            columns: loaded.width(),
        };
        self.control_panel
            .update_years(DataProcessor::available_years(&table));
        self.chart_viewer.set_preview(&table);
        self.table = Some(table);
        self.refresh_summary();
    }

    /// Recompute the charts for the current selection.
    fn refresh_summary(&mut self) {
        let Some(table) = &self.table else {
            return;
        };

        let selected = self.control_panel.selected_years();
        let result = FundingSummary::compute(table, &selected, self.control_panel.top_n);
        if let Err(e) = &result {
            error!("Failed to summarize data: {}", e);
        }
        self.control_panel.export_enabled = self.chart_viewer.apply_summary(result);
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load_data(path);
        }
    }

    /// Handle chart export - render PNGs and summary.json into a chosen folder
    fn handle_export(&mut self) {
        let Some(summary) = &self.chart_viewer.summary else {
            self.control_panel.export_status = Some("No charts to export".to_string());
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match ChartRenderer::export_all(summary, &dir) {
            Ok(files) => {
                info!("Exported {} files to {}", files.len(), dir.display());
                self.control_panel.export_status =
                    Some(format!("Exported {} files", files.len()));
                if let Err(e) = open::that(&dir) {
                    warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.export_status = Some(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged => self.refresh_summary(),
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            if let LoadStatus::NotFound(path) = &self.control_panel.load_status {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(format!("❌ File not found at: {}", path.display()))
                            .size(18.0)
                            .color(egui::Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
            self.chart_viewer.show(ui);
        });
    }
}
