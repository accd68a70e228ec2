//! Money types
//!
//! Claim amounts are held as `rust_decimal::Decimal` and paired with a
//! currency only when they are presented, e.g. in a car's history.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits shown and stored for every supported currency
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Currencies claim amounts can be shown in (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    CHF,
    RON,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CHF => "CHF",
            Currency::RON => "lei",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::RON => "RON",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Case-insensitive ISO code, surrounding blanks ignored
impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "CHF" => Ok(Currency::CHF),
            "RON" => Ok(Currency::RON),
            _ => Err(MoneyError::UnknownCurrency(s.to_string())),
        }
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// An amount paired with the currency it is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// `"$ 12.50"`: symbol, a space, then the amount with exactly two decimals
///
/// Extra digits are rounded half away from zero, which is what PostgreSQL
/// does when it stores a `NUMERIC(_, 2)`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self
            .amount
            .round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        write!(
            f,
            "{} {:.digits$}",
            self.currency.symbol(),
            shown,
            digits = MINOR_UNIT_DIGITS as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_pads_to_two_decimals() {
        assert_eq!(Money::new(dec!(1500), Currency::EUR).to_string(), "€ 1500.00");
        assert_eq!(Money::new(dec!(99.5), Currency::USD).to_string(), "$ 99.50");
        assert_eq!(Money::new(dec!(0), Currency::RON).to_string(), "lei 0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Money::new(dec!(10.555), Currency::USD).to_string(), "$ 10.56");
        assert_eq!(Money::new(dec!(10.545), Currency::USD).to_string(), "$ 10.55");
        assert_eq!(Money::new(dec!(10.554), Currency::USD).to_string(), "$ 10.55");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("ron".parse::<Currency>().unwrap(), Currency::RON);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert!(matches!(
            "XYZ".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_currency_serde_uses_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::GBP).unwrap(), "\"GBP\"");
        assert_eq!(serde_json::from_str::<Currency>("\"chf\"").unwrap(), Currency::CHF);
        assert!(serde_json::from_str::<Currency>("\"BTC\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_of_whole_cents_is_exact(cents in 0i64..1_000_000_000_000) {
            let money = Money::new(Decimal::new(cents, 2), Currency::USD);
            prop_assert_eq!(money.to_string(), format!("$ {}.{:02}", cents / 100, cents % 100));
        }

        #[test]
        fn display_never_moves_more_than_half_a_cent(mills in 0i64..1_000_000_000) {
            let amount = Decimal::new(mills, 3);
            let shown: Decimal = Money::new(amount, Currency::EUR).to_string()
                .trim_start_matches("€ ")
                .parse()
                .unwrap();
            prop_assert!((shown - amount).abs() <= Decimal::new(5, 3));
        }
    }
}
