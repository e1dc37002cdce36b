//! Query types.
//!
//! This module contains the input side of the pipeline:
//! - [`LocaleFilter`] - Language/region constraint for search relevance
//! - [`SearchQuery`] - Keywords plus locale plus result cap

use serde::{Deserialize, Serialize};

// ============================================================================
// Locale Filter
// ============================================================================

/// Language/region pair constraining search relevance.
///
/// Passed through unmodified to every search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleFilter {
    /// Relevance language code (e.g. "en").
    pub language: String,
    /// Region code (e.g. "US").
    pub region: String,
}

impl LocaleFilter {
    /// Creates a locale filter.
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
        }
    }
}

// ============================================================================
// Search Query
// ============================================================================

/// Validated input for one discovery invocation.
///
/// Keywords are trimmed on construction and empty ones dropped; order is
/// preserved because it determines the search sequence. Duplicate keywords
/// are permitted (wasteful but not incorrect). A `limit` of zero is a legal
/// query that yields an empty result without any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Keywords to search, in order.
    pub keywords: Vec<String>,
    /// Locale constraint applied to every search call.
    pub locale: LocaleFilter,
    /// Hard upper bound on the number of unique channels discovered.
    pub limit: usize,
}

impl SearchQuery {
    /// Creates a query, trimming keywords and dropping empty ones.
    pub fn new(keywords: Vec<String>, locale: LocaleFilter, limit: usize) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            keywords,
            locale,
            limit,
        }
    }

    /// Returns true if this query can only produce an empty result.
    pub fn is_trivially_empty(&self) -> bool {
        self.keywords.is_empty() || self.limit == 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_trimmed_and_filtered() {
        let query = SearchQuery::new(
            vec![
                "  cats  ".to_string(),
                String::new(),
                "   ".to_string(),
                "dogs".to_string(),
            ],
            LocaleFilter::new("en", "US"),
            10,
        );

        assert_eq!(query.keywords, vec!["cats", "dogs"]);
    }

    #[test]
    fn test_duplicate_keywords_preserved() {
        let query = SearchQuery::new(
            vec!["cats".to_string(), "cats".to_string()],
            LocaleFilter::new("en", "US"),
            10,
        );

        assert_eq!(query.keywords.len(), 2);
    }

    #[test]
    fn test_trivially_empty() {
        let locale = LocaleFilter::new("en", "US");

        let no_keywords = SearchQuery::new(vec![], locale.clone(), 10);
        assert!(no_keywords.is_trivially_empty());

        let zero_limit = SearchQuery::new(vec!["cats".to_string()], locale.clone(), 0);
        assert!(zero_limit.is_trivially_empty());

        let ok = SearchQuery::new(vec!["cats".to_string()], locale, 10);
        assert!(!ok.is_trivially_empty());
    }
}
