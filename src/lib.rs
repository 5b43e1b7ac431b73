//! Interactive analysis of one-dimensional photoionization spectra: load
//! two-column text data, remove a linear background picked with two clicks,
//! and integrate a clicked energy window with the trapezoidal rule.

pub mod analysis;
pub mod app;
pub mod collector;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod session;
pub mod state;
pub mod ui;
