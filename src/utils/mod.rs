//! Utility functions and helpers.

pub mod fs;
pub mod slug;

pub use slug::slugify;
