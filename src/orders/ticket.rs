use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{AppError, AppResult};
use crate::orders::model::OrderSide;

/// A buy/sell request that passed validation, in the shape the order endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub symbol: String,
    pub order_type: OrderSide,
    pub quantity: u32,
    pub price: f64,
}

impl OrderTicket {
    /// Validates raw form input. Unparseable numbers are rejected rather than read as zero.
    #[instrument(level = "debug")]
    pub fn parse(
        symbol: &str,
        order_type: OrderSide,
        quantity_raw: &str,
        price_raw: &str,
    ) -> AppResult<Self> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AppError::InvalidOrder("symbol is required".into()));
        }

        let quantity = parse_quantity(quantity_raw)?;
        let price = parse_price(price_raw)?;
        let ticket = Self {
            symbol,
            order_type,
            quantity,
            price,
        };
        debug!(total = ticket.total(), "ticket validated");
        Ok(ticket)
    }

    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total())
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} {} @ {}",
            self.order_type, self.quantity, self.symbol, self.price
        )
    }
}

fn parse_quantity(raw: &str) -> AppResult<u32> {
    let raw = raw.trim();
    let value: i64 = raw.parse().map_err(|_| {
        AppError::InvalidOrder(format!("quantity '{raw}' is not a whole number"))
    })?;
    if value <= 0 {
        return Err(AppError::InvalidOrder("quantity must be positive".into()));
    }
    u32::try_from(value)
        .map_err(|_| AppError::InvalidOrder(format!("quantity {value} is too large")))
}

fn parse_price(raw: &str) -> AppResult<f64> {
    let raw = raw.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::InvalidOrder(format!("price '{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(AppError::InvalidOrder("price must be finite".into()));
    }
    if value <= 0.0 {
        return Err(AppError::InvalidOrder("price must be positive".into()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ticket() {
        let ticket = OrderTicket::parse(" aapl ", OrderSide::Buy, "10", "12.345").unwrap();
        assert_eq!(ticket.symbol, "AAPL");
        assert_eq!(ticket.quantity, 10);
        assert_eq!(ticket.total_display(), "123.45");
        assert_eq!(ticket.describe(), "BUY 10 AAPL @ 12.345");
    }

    #[test]
    fn rejects_bad_quantities() {
        for raw in ["abc", "", "0", "-3", "1.5", "12abc"] {
            let err = OrderTicket::parse("MSFT", OrderSide::Sell, raw, "10").unwrap_err();
            assert!(matches!(err, AppError::InvalidOrder(_)), "{raw}");
        }
    }

    #[test]
    fn distinguishes_unparseable_from_zero() {
        let garbage = OrderTicket::parse("MSFT", OrderSide::Buy, "x", "10").unwrap_err();
        let zero = OrderTicket::parse("MSFT", OrderSide::Buy, "0", "10").unwrap_err();
        assert!(garbage.to_string().contains("not a whole number"));
        assert!(zero.to_string().contains("must be positive"));
    }

    #[test]
    fn rejects_bad_prices() {
        for raw in ["", "abc", "0", "-1.25", "NaN", "inf"] {
            assert!(OrderTicket::parse("MSFT", OrderSide::Buy, "1", raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn rejects_missing_symbol() {
        assert!(OrderTicket::parse("  ", OrderSide::Buy, "1", "1").is_err());
    }

    #[test]
    fn serialises_request_body() {
        let ticket = OrderTicket::parse("tsla", OrderSide::Sell, "2", "200.5").unwrap();
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["symbol"], "TSLA");
        assert_eq!(json["order_type"], "SELL");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["price"], 200.5);
    }
}
