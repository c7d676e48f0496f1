use std::fmt;
use std::str::FromStr;

use crate::domain::Decimal;

/// Currency amounts carry at most this many fractional digits.
const MAX_SCALE: u32 = 2;

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum MoneyError {
    #[error("`{0}` is not a decimal amount")]
    Unparsable(String),
    #[error("Amount `{0}` is negative")]
    Negative(Decimal),
    #[error("Amount `{0}` has more than two decimal places")]
    TooPrecise(Decimal),
    #[error("Amount `{0}` is too large")]
    TooLarge(Decimal),
    #[error("Amount must be greater than zero")]
    NotPositive,
}

/// A non-negative currency amount with exactly two fractional digits.
///
/// Values are rescaled at construction so arithmetic stays exact and
/// `Display` always prints cents, e.g. `60.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Money {
        Money(Decimal::new(0, MAX_SCALE))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Addition that fails instead of rounding when the exact scale-2 sum
    /// cannot be represented.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        let sum = self.0.checked_add(other.0)?;
        (sum.scale() == MAX_SCALE).then_some(Money(sum))
    }

    /// Subtraction that refuses to go below zero. `None` means the
    /// subtrahend was larger than `self`.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        if other.0 > self.0 {
            None
        } else {
            Some(Money(self.0 - other.0))
        }
    }
}

impl Default for Money {
    fn default() -> Money {
        Money::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(raw: Decimal) -> Result<Money, MoneyError> {
        if raw.is_zero() {
            return Ok(Money::zero());
        }
        if raw.is_sign_negative() {
            return Err(MoneyError::Negative(raw));
        }
        // Trailing zeros don't count against the precision limit: `1.230`
        // normalizes to `1.23` and is accepted.
        let mut value = raw.normalize();
        if value.scale() > MAX_SCALE {
            return Err(MoneyError::TooPrecise(raw));
        }
        value.rescale(MAX_SCALE);
        // rescale stops short of the target when the mantissa cannot carry
        // the extra digits, which is how oversized amounts are detected.
        if value.scale() != MAX_SCALE {
            return Err(MoneyError::TooLarge(raw));
        }
        Ok(Money(value))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Money, MoneyError> {
        let raw = Decimal::from_str(s.trim())
            .map_err(|_| MoneyError::Unparsable(s.to_string()))?;
        Money::try_from(raw)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> serde::Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Path syntax would pick Decimal's inherent `deserialize([u8; 16])`
        // over the serde trait method, so the trait must be named.
        let raw = <Decimal as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Money::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_accepts_whole_and_two_decimal_amounts() {
        assert_eq!("10".parse::<Money>().unwrap(), Money::try_from(dec!(10)).unwrap());
        assert_eq!("10.5".parse::<Money>().unwrap(), Money::try_from(dec!(10.50)).unwrap());
        assert_eq!("0.01".parse::<Money>().unwrap(), Money::try_from(dec!(0.01)).unwrap());
    }

    #[test]
    fn test_parse_rescales_display_to_two_digits() {
        assert_eq!("5".parse::<Money>().unwrap().to_string(), "5.00");
        assert_eq!("5.1".parse::<Money>().unwrap().to_string(), "5.10");
        assert_eq!("0".parse::<Money>().unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_parse_accepts_trailing_zeros_beyond_two_digits() {
        let money = "1.230".parse::<Money>().unwrap();
        assert_eq!(money.to_string(), "1.23");
    }

    #[test]
    fn test_parse_rejects_more_than_two_decimal_places() {
        let result = "1.234".parse::<Money>();
        assert_eq!(result, Err(MoneyError::TooPrecise(dec!(1.234))));
    }

    #[test]
    fn test_parse_rejects_amounts_that_cannot_carry_cents() {
        let result = "800000000000000000000000000".parse::<Money>();
        assert_eq!(
            result,
            Err(MoneyError::TooLarge(dec!(800000000000000000000000000)))
        );
        assert!("700000000000000000000000000".parse::<Money>().is_ok());
    }

    #[test]
    fn test_parse_rejects_negative_amounts() {
        let result = "-1.00".parse::<Money>();
        assert_eq!(result, Err(MoneyError::Negative(dec!(-1.00))));
    }

    #[test]
    fn test_parse_rejects_non_numeric_input() {
        assert_eq!("abc".parse::<Money>(), Err(MoneyError::Unparsable("abc".to_string())));
        assert_eq!("".parse::<Money>(), Err(MoneyError::Unparsable("".to_string())));
        assert_eq!("1,50".parse::<Money>(), Err(MoneyError::Unparsable("1,50".to_string())));
    }

    #[test]
    fn test_checked_add_is_exact() {
        // The classic binary-float trap: 0.1 + 0.2 must be exactly 0.3.
        let sum = "0.10".parse::<Money>().unwrap()
            .checked_add("0.20".parse::<Money>().unwrap())
            .unwrap();
        assert_eq!(sum, "0.30".parse::<Money>().unwrap());
        assert_eq!(sum.to_string(), "0.30");
    }

    #[test]
    fn test_checked_add_refuses_an_unrepresentable_sum() {
        let huge = "600000000000000000000000000.00".parse::<Money>().unwrap();
        assert_eq!(huge.checked_add(huge), None);
        assert!(huge.checked_add("0.01".parse::<Money>().unwrap()).is_some());
    }

    #[test]
    fn test_checked_sub_is_exact() {
        let result = "100.00".parse::<Money>().unwrap()
            .checked_sub("40.00".parse::<Money>().unwrap());
        assert_eq!(result, Some("60.00".parse::<Money>().unwrap()));
    }

    #[test]
    fn test_checked_sub_refuses_negative_results() {
        let result = "1.00".parse::<Money>().unwrap()
            .checked_sub("1.01".parse::<Money>().unwrap());
        assert_eq!(result, None);
    }

    #[test]
    fn test_checked_sub_to_exactly_zero() {
        let result = "1.00".parse::<Money>().unwrap()
            .checked_sub("1.00".parse::<Money>().unwrap());
        assert_eq!(result, Some(Money::zero()));
    }

    #[test]
    fn test_ordering_compares_by_value() {
        let small = "9.99".parse::<Money>().unwrap();
        let large = "10.00".parse::<Money>().unwrap();
        assert!(small < large);
        assert!(large > small);
        assert_eq!(large, "10".parse::<Money>().unwrap());
    }

    #[test]
    fn test_zero_is_zero() {
        assert!(Money::zero().is_zero());
        assert!(!"0.01".parse::<Money>().unwrap().is_zero());
    }

    #[test]
    fn test_deserialize_validates_like_parse() {
        use serde::de::value::{Error as ValueError, StrDeserializer};
        use serde::de::IntoDeserializer;
        use serde::Deserialize;

        let accepted: StrDeserializer<ValueError> = "10.00".into_deserializer();
        assert_eq!(
            Money::deserialize(accepted).unwrap(),
            "10.00".parse::<Money>().unwrap()
        );

        let too_precise: StrDeserializer<ValueError> = "1.234".into_deserializer();
        assert_eq!(
            Money::deserialize(too_precise).unwrap_err().to_string(),
            "Amount `1.234` has more than two decimal places"
        );

        let negative: StrDeserializer<ValueError> = "-5.00".into_deserializer();
        assert!(Money::deserialize(negative).is_err());
    }
}
