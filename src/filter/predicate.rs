//! Row visibility predicate.
//!
//! Complexity: O(n) over the rows; each check lowercases at most three fields.

use crate::model::subcontractor::SubcontractorRow;

/// Current values of the two filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected trade; empty = any trade.
    pub trade: String,
    /// Free-text search; empty = no text filter.
    pub search: String,
}

impl FilterState {
    pub fn new(trade: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            trade: trade.into(),
            search: search.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trade.trim().is_empty() && self.search.trim().is_empty()
    }

    /// Whether `row` passes both the trade and the search filter.
    pub fn matches(&self, row: &SubcontractorRow) -> bool {
        let trade = self.trade.trim().to_lowercase();
        let search = self.search.trim().to_lowercase();

        let trade_ok = trade.is_empty() || contains_ci(&row.trade, &trade);
        if !trade_ok {
            return false;
        }

        search.is_empty()
            || contains_ci(&row.company, &search)
            || contains_ci(&row.trade, &search)
            || contains_ci(&row.office_location, &search)
    }
}

/// Case-insensitive containment. `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(company: &str, trade: &str, office: &str) -> SubcontractorRow {
        SubcontractorRow::new("1", company, trade, office)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let f = FilterState::default();
        assert!(f.is_empty());
        assert!(f.matches(&row("Acme", "Plumbing", "York")));
    }

    #[test]
    fn test_trade_filter_is_substring_and_case_insensitive() {
        let f = FilterState::new("ELECTR", "");
        assert!(f.matches(&row("Sparks Ltd", "Electrical", "Hull")));
        assert!(!f.matches(&row("Acme", "Plumbing", "York")));
    }

    #[test]
    fn test_search_checks_company_trade_and_office() {
        let f = FilterState::new("", "york");
        assert!(f.matches(&row("Acme", "Plumbing", "York")));
        let f = FilterState::new("", "acme");
        assert!(f.matches(&row("ACME", "Plumbing", "")));
        let f = FilterState::new("", "plumb");
        assert!(f.matches(&row("Acme", "Plumbing", "")));
        let f = FilterState::new("", "roof");
        assert!(!f.matches(&row("Acme", "Plumbing", "York")));
    }

    #[test]
    fn test_both_filters_must_pass() {
        let f = FilterState::new("Plumbing", "leeds");
        assert!(f.matches(&row("Acme", "Plumbing", "Leeds")));
        assert!(!f.matches(&row("Acme", "Plumbing", "York")));
        assert!(!f.matches(&row("Leeds Electric", "Electrical", "Leeds")));
    }
}
