use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-precision transfer amount, stored as integer hundredths.
///
/// Transaction ids hash the canonical decimal rendering of the amount
/// (`units.fraction`, always two fractional digits), so the byte form must
/// be identical across platforms. Binary floating point never enters the
/// hash path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Build from minor units (hundredths), e.g. `from_minor(250)` == 2.50
    pub fn from_minor(minor: i64) -> Self {
        Amount(minor)
    }

    /// Build from whole units, e.g. `from_units(3)` == 3.00
    pub fn from_units(units: i64) -> Self {
        Amount(units * 100)
    }

    pub fn minor(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Canonical rendering: `units.ff` with exactly two fractional digits.
/// This string is what transaction hashing consumes.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Decimal string parsing with at most two fractional digits.
impl FromStr for Amount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (units_part, frac_part) = match digits.split_once('.') {
            Some((u, f)) => (u, f),
            None => (digits, ""),
        };

        if units_part.is_empty() && frac_part.is_empty() {
            return Err(format!("empty amount: {:?}", s));
        }
        if frac_part.len() > 2 {
            return Err(format!(
                "amount {:?} has more than two fractional digits",
                s
            ));
        }
        if !units_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(format!("malformed amount: {:?}", s));
        }

        let units: i64 = if units_part.is_empty() {
            0
        } else {
            units_part
                .parse()
                .map_err(|_| format!("amount {:?} out of range", s))?
        };
        let frac: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| s.to_string())? * 10,
            _ => frac_part.parse().map_err(|_| s.to_string())?,
        };

        let minor = units
            .checked_mul(100)
            .and_then(|m| m.checked_add(frac))
            .ok_or_else(|| format!("amount {:?} out of range", s))?;

        Ok(Amount(if negative { -minor } else { minor }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(Amount::from_minor(100).to_string(), "1.00");
        assert_eq!(Amount::from_minor(250).to_string(), "2.50");
        assert_eq!(Amount::from_minor(75).to_string(), "0.75");
        assert_eq!(Amount::from_minor(5).to_string(), "0.05");
        assert_eq!(Amount::from_minor(0).to_string(), "0.00");
        assert_eq!(Amount::from_minor(-130).to_string(), "-1.30");
    }

    #[test]
    fn test_parse_round_trip() {
        for s in ["1.00", "2.50", "0.75", "0.05", "0.00", "-1.30", "12345.67"] {
            let amount: Amount = s.parse().unwrap();
            assert_eq!(amount.to_string(), s);
        }
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("1".parse::<Amount>().unwrap(), Amount::from_minor(100));
        assert_eq!("2.5".parse::<Amount>().unwrap(), Amount::from_minor(250));
        assert_eq!(".75".parse::<Amount>().unwrap(), Amount::from_minor(75));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Amount>().is_err());
        assert!("-".parse::<Amount>().is_err());
        assert!("1.234".parse::<Amount>().is_err());
        assert!("1.2.3".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
    }
}
