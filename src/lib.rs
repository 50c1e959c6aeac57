// src/lib.rs

//! Lead Builder Library
//!
//! Merges per-city enriched lead files for a niche, deduplicates them and
//! exports a fixed-column CSV.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;
