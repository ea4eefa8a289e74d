//! Control Panel Widget
//! Left side panel with the data source, year filter and export controls.

use crate::data::DEFAULT_TOP_N;
use egui::{Color32, RichText, ScrollArea};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Outcome of the most recent load, shown under the data source.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loaded { rows: usize, columns: usize },
    NotFound(PathBuf),
    Failed(String),
}

/// Left side control panel with file selection and filters.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub years: Vec<i32>,
    pub selected_years: Vec<bool>,
    pub top_n: usize,
    pub load_status: LoadStatus,
    pub export_status: Option<String>,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            years: Vec::new(),
            selected_years: Vec::new(),
            top_n: DEFAULT_TOP_N,
            load_status: LoadStatus::Idle,
            export_status: None,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the year list after a load; every year starts selected.
    pub fn update_years(&mut self, years: Vec<i32>) {
        self.selected_years = vec![true; years.len()];
        self.years = years;
    }

    /// Years currently ticked.
    pub fn selected_years(&self) -> BTreeSet<i32> {
        self.years
            .iter()
            .zip(self.selected_years.iter())
            .filter(|(_, &selected)| selected)
            .map(|(year, _)| *year)
            .collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚀 Funding Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(5.0);
        let (status, color) = self.load_status_line();
        ui.label(RichText::new(status).size(11.0).color(color));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Select Year(s):");

        if self.years.is_empty() {
            ui.label(RichText::new("No years available").size(11.0).color(Color32::GRAY));
        } else {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                        for (year, selected) in self.years.iter().zip(self.selected_years.iter_mut()) {
                            if ui.checkbox(selected, year.to_string()).changed() {
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
                });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    self.selected_years.iter_mut().for_each(|v| *v = true);
                    action = ControlPanelAction::SelectionChanged;
                }
                if ui.small_button("Clear All").clicked() {
                    self.selected_years.iter_mut().for_each(|v| *v = false);
                    action = ControlPanelAction::SelectionChanged;
                }
            });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Top N:");
            if ui
                .add(egui::Slider::new(&mut self.top_n, 1..=25))
                .changed()
            {
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        if let Some(status) = &self.export_status {
            ui.add_space(5.0);
            let color = if status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(status).size(11.0).color(color));
        }

        action
    }

    fn load_status_line(&self) -> (String, Color32) {
        match &self.load_status {
            LoadStatus::Idle => ("Ready".to_string(), Color32::GRAY),
            LoadStatus::Loaded { rows, columns } => (
                format!("✅ Data loaded successfully! {} rows, {} columns", rows, columns),
                Color32::from_rgb(40, 167, 69),
            ),
            LoadStatus::NotFound(path) => (
                format!("❌ File not found at: {}", path.display()),
                Color32::from_rgb(220, 53, 69),
            ),
            LoadStatus::Failed(error) => (
                format!("❌ Error: {}", error),
                Color32::from_rgb(220, 53, 69),
            ),
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectionChanged,
    ExportCharts,
}
