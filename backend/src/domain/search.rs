//! Catalogue-wide text search.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{Brand, Part, Supplier, VehicleModel};

/// A validated, trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchTermError {
    #[error("search query must not be empty")]
    Empty,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Result<Self, SearchTermError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchTermError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern matching the term anywhere, with wildcards escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Case-insensitive containment check used by in-memory adapters.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }

    pub fn matches_opt(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|value| self.matches(value))
    }
}

/// Search hits grouped by entity kind. Buckets are unranked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub brands: Vec<Brand>,
    pub models: Vec<VehicleModel>,
    pub parts: Vec<Part>,
    pub suppliers: Vec<Supplier>,
}
