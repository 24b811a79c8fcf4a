//! Chart aggregation pipeline.
//!
//! This module groups probe files from the input folders according to the
//! generation mode, aligns same-position series of grouped files into chart
//! payloads, assigns colors, and collects per-series statistics for the
//! report.

pub mod assemble;
pub mod color;
pub mod mode;
pub mod types;

pub use mode::{PlotContext, run_mode};
