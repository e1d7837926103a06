use serde::{Deserialize, Serialize};

use super::entities::Currency;

pub const DEFAULT_USD_RATE: f64 = 133.5;
pub const DEFAULT_CNY_RATE: f64 = 18.5;

/// Value of one unit of each currency in NPR. The base currency is always 1 and is not stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRateTable {
    usd: f64,
    cny: f64,
}

impl Default for CurrencyRateTable {
    fn default() -> Self {
        Self {
            usd: DEFAULT_USD_RATE,
            cny: DEFAULT_CNY_RATE,
        }
    }
}

impl CurrencyRateTable {
    /// Builds a table from foreign rates. Returns `None` unless both are finite and positive.
    pub fn new(usd: f64, cny: f64) -> Option<Self> {
        let valid = |rate: f64| rate.is_finite() && rate > 0.0;
        if valid(usd) && valid(cny) {
            Some(Self { usd, cny })
        } else {
            None
        }
    }

    pub fn rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Npr => 1.0,
            Currency::Usd => self.usd,
            Currency::Cny => self.cny,
        }
    }

    /// Persisted tables are validated again on load; anything invalid falls back to defaults.
    pub fn sanitized(self) -> Self {
        Self::new(self.usd, self.cny).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_currency_is_always_one() {
        let table = CurrencyRateTable::new(140.0, 19.0).unwrap();
        assert_eq!(table.rate(Currency::Npr), 1.0);
        assert_eq!(table.rate(Currency::Usd), 140.0);
        assert_eq!(table.rate(Currency::Cny), 19.0);
    }

    #[test]
    fn defaults_match_published_rates() {
        let table = CurrencyRateTable::default();
        assert_eq!(table.rate(Currency::Usd), 133.5);
        assert_eq!(table.rate(Currency::Cny), 18.5);
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert!(CurrencyRateTable::new(0.0, 18.5).is_none());
        assert!(CurrencyRateTable::new(133.5, f64::NAN).is_none());
        let broken: CurrencyRateTable =
            serde_json::from_str(r#"{"usd": -1.0, "cny": 18.5}"#).unwrap();
        assert_eq!(broken.sanitized(), CurrencyRateTable::default());
    }
}
