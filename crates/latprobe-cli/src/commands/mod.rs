//! CLI command implementations.

pub mod common;
pub mod config;
pub mod devices;
pub mod estimate;
pub mod generate;
pub mod info;
pub mod measure;
