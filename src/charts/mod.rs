//! Charts module - Interactive plots and static PNG export

mod plotter;
mod renderer;

pub use plotter::{
    format_amount, ChartPlotter, INDUSTRY_COLOR, LINE_COLOR, NO_DATA_MESSAGE, STARTUP_COLOR,
};
pub use renderer::{
    ChartRenderer, RenderError, INDUSTRIES_FILE, MONTHLY_FILE, STARTUPS_FILE, SUMMARY_FILE,
};
