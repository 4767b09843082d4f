pub mod filters;
pub mod holdings;

pub use filters::{DateRange, OrderFilter, SideFilter};
pub use holdings::HoldingRow;

use crate::orders::OrderRecord;

/// A table row that free-text search can look into.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for OrderRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.symbol.as_str(), self.order_type.as_str(), self.status.as_str()]
    }
}

/// Normalised search-box contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether the query is long enough to be worth a lookup.
    pub fn is_actionable(&self, min_len: usize) -> bool {
        self.needle.chars().count() >= min_len
    }

    pub fn matches<R: Searchable + ?Sized>(&self, row: &R) -> bool {
        self.needle.is_empty()
            || row
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn filter<'a, R: Searchable>(&self, rows: &'a [R]) -> Vec<&'a R> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(symbol: &str, name: &str) -> HoldingRow {
        HoldingRow {
            symbol: symbol.into(),
            name: name.into(),
            market_value: None,
            change_percent: None,
        }
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let rows = vec![holding("AAPL", "Apple Inc."), holding("MSFT", "Microsoft")];
        let query = TextQuery::new("  apple ");
        assert_eq!(query.as_str(), "apple");
        let hits = query.filter(&rows);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "AAPL");
    }

    #[test]
    fn empty_query_matches_everything() {
        let rows = vec![holding("AAPL", "Apple Inc."), holding("MSFT", "Microsoft")];
        assert_eq!(TextQuery::new("   ").filter(&rows).len(), 2);
    }

    #[test]
    fn actionable_needs_minimum_length() {
        assert!(!TextQuery::new(" a ").is_actionable(2));
        assert!(TextQuery::new("ab").is_actionable(2));
        assert!(TextQuery::new("").is_actionable(0));
    }
}
