//! Headless export: load, normalize, summarize and write the charts without a window.

use crate::charts::{format_amount, ChartRenderer};
use crate::config::Args;
use crate::data::{DataLoader, DataNormalizer, FundingSummary};
use anyhow::{bail, Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Build the summary for `args` and write it, with its charts, into `dir`.
pub fn run_export(args: &Args, dir: &Path) -> Result<Vec<PathBuf>> {
    let summary = summarize(&mut DataLoader::new(), args)?;
    print_summary(&summary);

    let files = ChartRenderer::export_all(&summary, dir)
        .with_context(|| format!("exporting charts to {}", dir.display()))?;
    for file in &files {
        println!("  wrote {}", file.display());
    }
    Ok(files)
}

/// Load and normalize the configured file and summarize the selected years.
pub fn summarize(loader: &mut DataLoader, args: &Args) -> Result<FundingSummary> {
    let Some(raw) = loader
        .load(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?
    else {
        bail!("File not found at: {}", args.data.display());
    };

    let table = DataNormalizer::normalize(&raw).context("normalizing funding data")?;
    let summary = FundingSummary::compute(&table, &args.selected_years(), args.top)
        .context("summarizing funding data")?;
    info!(
        "{} of {} rows match the year selection",
        summary.filtered_rows, summary.total_rows
    );
    Ok(summary)
}

fn print_summary(summary: &FundingSummary) {
    println!(
        "Rows: {} of {} | Total funding: {}",
        summary.filtered_rows,
        summary.total_rows,
        format_amount(summary.total_amount)
    );
    if summary.is_empty() {
        println!("No data available for the selected filter.");
        return;
    }

    let sections = [
        ("Top funded startups", &summary.top_startups),
        ("Top funded industries", &summary.top_industries),
    ];
    for (title, groups) in sections {
        let Some(groups) = groups else { continue };
        println!("{}:", title);
        for (rank, (key, total)) in groups.iter().enumerate() {
            println!("  {:>2}. {:<40} {}", rank + 1, key, format_amount(*total));
        }
    }
}
