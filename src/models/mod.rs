// src/models/mod.rs

//! Domain models for the lead builder.

mod config;
mod lead;
mod niche;
mod summary;

// Re-export all public types
pub use config::{CategoryConfig, Config, FilesConfig, OutputConfig};
pub use lead::{LeadRecord, LeadRow};
pub use niche::Niche;
pub use summary::BuildSummary;
