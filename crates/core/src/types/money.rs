//! Monetary amounts and their on-screen formatting.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currencies shown by the panel.
///
/// Purchase totals are quoted in US dollars; staff payments in Chilean pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Clp,
}

impl Currency {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Clp => "CLP",
        }
    }

    /// Digits after the decimal separator when displayed.
    #[must_use]
    pub const fn scale(self) -> u32 {
        match self {
            Self::Usd => 2,
            Self::Clp => 0,
        }
    }

    const fn separators(self) -> (char, char) {
        match self {
            Self::Usd => (',', '.'),
            Self::Clp => ('.', ','),
        }
    }
}

/// An amount together with the currency it is expressed in.
///
/// ```
/// use farmalink_core::{Currency, Money};
/// use rust_decimal::Decimal;
///
/// let total = Money::new(Decimal::new(123_450, 2), Currency::Usd);
/// assert_eq!(total.to_string(), "$1,234.50");
///
/// let sueldo = Money::new(Decimal::from(450_000), Currency::Clp);
/// assert_eq!(sueldo.to_string(), "$450.000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::Usd)
    }

    #[must_use]
    pub const fn clp(amount: Decimal) -> Self {
        Self::new(amount, Currency::Clp)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.currency.scale();
        let (group_sep, decimal_sep) = self.currency.separators();
        let rounded = self
            .amount
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.*}", scale as usize, rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }

        write!(f, "{sign}${grouped}")?;
        if !fraction.is_empty() {
            write!(f, "{decimal_sep}{fraction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_display() {
        assert_eq!(Money::usd(Decimal::ZERO).to_string(), "$0.00");
        assert_eq!(Money::usd(Decimal::new(5, 1)).to_string(), "$0.50");
        assert_eq!(Money::usd(Decimal::new(99_999, 2)).to_string(), "$999.99");
        assert_eq!(
            Money::usd(Decimal::new(1_234_567_891, 3)).to_string(),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_clp_display() {
        assert_eq!(Money::clp(Decimal::from(999)).to_string(), "$999");
        assert_eq!(Money::clp(Decimal::from(1_000)).to_string(), "$1.000");
        assert_eq!(Money::clp(Decimal::new(4_500_005, 1)).to_string(), "$450.001");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(Money::usd(Decimal::new(-150_000, 2)).to_string(), "-$1,500.00");
    }
}
