//! Startup Funding Dashboard - CSV loader & interactive funding charts
//!
//! Opens the dashboard window, or with `--export DIR` writes the charts headlessly.

use clap::Parser;
use eframe::egui;
use funding_dashboard::config::Args;
use funding_dashboard::export::run_export;
use funding_dashboard::gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Some(dir) = &args.export {
        run_export(&args, dir)?;
        return Ok(());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Startup Investment Dashboard"),
        ..Default::default()
    };

    let data_path = args.data.clone();
    eframe::run_native(
        "Startup Investment Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, data_path)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {}", e))
}
