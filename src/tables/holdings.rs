use serde::{Deserialize, Serialize};

use crate::tables::Searchable;
use crate::utils::math::{format_currency, format_percentage};

/// Portfolio or watchlist row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market_value: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
}

impl HoldingRow {
    pub fn display_line(&self) -> String {
        let mut line = format!("{:<8} {}", self.symbol, self.name);
        if let Some(value) = self.market_value {
            line.push_str(&format!("  {}", format_currency(value)));
        }
        if let Some(change) = self.change_percent {
            line.push_str(&format!("  {}", format_percentage(change)));
        }
        line
    }
}

impl Searchable for HoldingRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.symbol.as_str(), self.name.as_str()]
    }
}
