//! Niche identifier.

use std::fmt;

use crate::error::{AppError, Result};
use crate::utils::slugify;

/// The business type scoping one batch of leads (e.g. "cafes").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Niche {
    name: String,
    slug: String,
}

impl Niche {
    /// Create a niche, rejecting names that produce an empty slug.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::validation(format!(
                "niche '{name}' has no usable characters"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            slug,
        })
    }

    /// Name as given by the operator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File-name slug used in input and output paths.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_niche() {
        let niche = Niche::new("  Coffee Shops ").unwrap();
        assert_eq!(niche.name(), "Coffee Shops");
        assert_eq!(niche.slug(), "coffee-shops");
        assert_eq!(niche.to_string(), "Coffee Shops");
    }

    #[test]
    fn test_empty_niche_rejected() {
        assert!(matches!(Niche::new("   "), Err(AppError::Validation(_))));
        assert!(Niche::new("???").is_err());
    }
}
