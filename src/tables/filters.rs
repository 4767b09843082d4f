use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::orders::{OrderRecord, OrderSide};
use crate::tables::TextQuery;
use crate::utils::time::{end_of_day, start_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideFilter {
    #[default]
    All,
    Only(OrderSide),
}

impl SideFilter {
    pub fn matches(&self, side: OrderSide) -> bool {
        match self {
            SideFilter::All => true,
            SideFilter::Only(wanted) => *wanted == side,
        }
    }
}

impl FromStr for SideFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SideFilter::All);
        }
        s.parse::<OrderSide>()
            .map(SideFilter::Only)
            .map_err(|_| AppError::InvalidFilter(format!("unknown order type filter '{s}'")))
    }
}

/// Inclusive calendar-day range. The end day counts up to 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    /// Both bounds must be chosen; a half-open range is rejected.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::new(start, end)),
            _ => Err(AppError::InvalidFilter(
                "both start and end dates are required".into(),
            )),
        }
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// Combined order-table filter; every configured criterion must hold.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub query: TextQuery,
    pub side: SideFilter,
    pub dates: Option<DateRange>,
}

impl OrderFilter {
    pub fn matches(&self, order: &OrderRecord) -> bool {
        self.side.matches(order.order_type)
            && self.dates.is_none_or(|range| range.contains(order.created_at))
            && self.query.matches(order)
    }

    pub fn apply<'a>(&self, orders: &'a [OrderRecord]) -> Vec<&'a OrderRecord> {
        let kept: Vec<_> = orders.iter().filter(|o| self.matches(o)).collect();
        debug!(total = orders.len(), kept = kept.len(), "orders filtered");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderStatus;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn order(id: u64, symbol: &str, side: OrderSide, status: OrderStatus, at: &str) -> OrderRecord {
        OrderRecord {
            id: Some(id),
            symbol: symbol.into(),
            order_type: side,
            quantity: 1,
            price: 10.0,
            status,
            created_at: at.parse().unwrap(),
        }
    }

    fn book() -> Vec<OrderRecord> {
        vec![
            order(1, "AAPL", OrderSide::Buy, OrderStatus::Completed, "2024-03-01T09:30:00"),
            order(2, "MSFT", OrderSide::Sell, OrderStatus::Pending, "2024-03-05T23:59:59"),
            order(3, "AAPL", OrderSide::Sell, OrderStatus::Cancelled, "2024-03-06T00:00:00"),
        ]
    }

    fn ids(rows: Vec<&OrderRecord>) -> Vec<u64> {
        rows.into_iter().filter_map(|o| o.id).collect()
    }

    #[test]
    fn side_filter_parses() {
        assert_eq!("ALL".parse::<SideFilter>().unwrap(), SideFilter::All);
        assert_eq!(
            "sell".parse::<SideFilter>().unwrap(),
            SideFilter::Only(OrderSide::Sell)
        );
        assert!(matches!(
            "short".parse::<SideFilter>(),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn filters_by_side() {
        let filter = OrderFilter {
            side: SideFilter::Only(OrderSide::Sell),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&book())), vec![2, 3]);
    }

    #[test]
    fn date_range_includes_whole_end_day() {
        let range = DateRange::new(date("2024-03-01"), date("2024-03-05"));
        let filter = OrderFilter {
            dates: Some(range),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&book())), vec![1, 2]);
    }

    #[test]
    fn date_range_needs_both_bounds() {
        assert!(DateRange::from_bounds(Some(date("2024-03-01")), None).is_err());
        assert!(DateRange::from_bounds(None, Some(date("2024-03-01"))).is_err());
        assert!(DateRange::from_bounds(None, None).is_err());
        assert!(DateRange::from_bounds(Some(date("2024-03-01")), Some(date("2024-03-01"))).is_ok());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = DateRange::new(date("2024-03-06"), date("2024-03-01"));
        assert!(!range.contains("2024-03-03T12:00:00".parse().unwrap()));
    }

    #[test]
    fn query_searches_symbol_side_and_status() {
        let rows = book();
        let by_status = OrderFilter {
            query: TextQuery::new("PEND"),
            ..Default::default()
        };
        assert_eq!(ids(by_status.apply(&rows)), vec![2]);

        let by_side = OrderFilter {
            query: TextQuery::new("buy"),
            ..Default::default()
        };
        assert_eq!(ids(by_side.apply(&rows)), vec![1]);
    }

    #[test]
    fn criteria_combine() {
        let filter = OrderFilter {
            query: TextQuery::new("aapl"),
            side: SideFilter::Only(OrderSide::Sell),
            dates: Some(DateRange::new(date("2024-03-06"), date("2024-03-06"))),
        };
        assert_eq!(ids(filter.apply(&book())), vec![3]);
    }
}
