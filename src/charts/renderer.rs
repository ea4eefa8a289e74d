//! Static Chart Renderer
//! Writes the dashboard charts as PNG images with plotters.
//!
//! Export layout:
//! 1. `monthly_funding.png`: line chart of funding per calendar month
//! 2. `top_startups.png`: horizontal bars, largest total on top
//! 3. `top_industries.png`: horizontal bars, largest total on top
//! 4. `summary.json`: the serialized summary the charts were drawn from

use super::plotter::format_amount;
use crate::data::FundingSummary;
use log::info;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MONTHLY_FILE: &str = "monthly_funding.png";
pub const STARTUPS_FILE: &str = "top_startups.png";
pub const INDUSTRIES_FILE: &str = "top_industries.png";
pub const SUMMARY_FILE: &str = "summary.json";

const CHART_SIZE: (u32, u32) = (1400, 800);
const LINE_COLOR: RGBColor = RGBColor(52, 152, 219);
const STARTUP_COLOR: RGBColor = RGBColor(46, 204, 113);
const INDUSTRY_COLOR: RGBColor = RGBColor(155, 89, 182);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render every non-empty chart of `summary` plus `summary.json` into `dir`.
    ///
    /// Returns the written paths in layout order.
    pub fn export_all(summary: &FundingSummary, dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        if let Some(monthly) = summary.monthly.as_deref().filter(|s| !s.is_empty()) {
            let path = dir.join(MONTHLY_FILE);
            Self::render_monthly(monthly, &path)?;
            written.push(path);
        }
        if let Some(startups) = summary.top_startups.as_deref().filter(|s| !s.is_empty()) {
            let path = dir.join(STARTUPS_FILE);
            Self::render_bars(
                "Top Funded Startups",
                startups,
                STARTUP_COLOR,
                &path,
            )?;
            written.push(path);
        }
        if let Some(industries) = summary.top_industries.as_deref().filter(|s| !s.is_empty()) {
            let path = dir.join(INDUSTRIES_FILE);
            Self::render_bars(
                "Top Industries by Investment",
                industries,
                INDUSTRY_COLOR,
                &path,
            )?;
            written.push(path);
        }

        written.push(Self::write_summary_json(summary, dir)?);
        info!("Exported {} files to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Serialize `summary` as pretty JSON into `dir/summary.json`.
    pub fn write_summary_json(summary: &FundingSummary, dir: &Path) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(SUMMARY_FILE);
        fs::write(&path, serde_json::to_string_pretty(summary)?)?;
        Ok(path)
    }

    /// Line chart of funding per month.
    pub fn render_monthly(monthly: &[(String, f64)], path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let y_max = axis_max(monthly);
        let x_max = monthly.len().saturating_sub(1).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Investment Over Time", ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(90)
            .build_cartesian_2d(0usize..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_labels(monthly.len().min(24))
            .x_label_formatter(&|i| {
                monthly
                    .get(*i)
                    .map(|(month, _)| month.clone())
                    .unwrap_or_default()
            })
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&|v| format_amount(*v))
            .y_desc("Amount (USD)")
            .draw()
            .map_err(draw_err)?;

        let points = monthly.iter().enumerate().map(|(i, (_, total))| (i, *total));
        chart
            .draw_series(LineSeries::new(points.clone(), LINE_COLOR.stroke_width(2)))
            .map_err(draw_err)?;
        chart
            .draw_series(points.map(|p| Circle::new(p, 3, LINE_COLOR.filled())))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Horizontal bar chart, first group drawn on top.
    pub fn render_bars(
        title: &str,
        groups: &[(String, f64)],
        color: RGBColor,
        path: &Path,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let n = groups.len();
        let x_max = axis_max(groups);
        // Row 0 sits at the bottom of the axis, so rank i maps to row n - 1 - i.
        let label_for = |row: usize| -> String {
            n.checked_sub(row + 1)
                .and_then(|rank| groups.get(rank))
                .map(|(key, _)| key.clone())
                .unwrap_or_default()
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(260)
            .build_cartesian_2d(0f64..x_max, (0usize..n.max(1)).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(row) => label_for(*row),
                _ => String::new(),
            })
            .x_label_formatter(&|v| format_amount(*v))
            .x_desc("Funding Amount (USD)")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(groups.iter().enumerate().map(|(rank, (_, total))| {
                let row = n - 1 - rank;
                Rectangle::new(
                    [(0.0, SegmentValue::Exact(row)), (*total, SegmentValue::Exact(row + 1))],
                    color.mix(0.85).filled(),
                )
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

/// Upper axis bound with 10% headroom; 1.0 when every value is zero.
fn axis_max(series: &[(String, f64)]) -> f64 {
    let max = series.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
