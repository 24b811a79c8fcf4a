pub mod aggregation;
pub mod config;
pub mod error;
pub mod grouper;
pub mod naming;
pub mod output;
pub mod parser;
pub mod render;
pub mod stats;
