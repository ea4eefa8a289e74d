//! Startup Funding Dashboard
//!
//! Loads a startup-funding CSV, derives typed date and amount columns, and
//! aggregates them into the series shown by the dashboard charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
