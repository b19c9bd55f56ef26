use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::KpiError;

/// Number of decimals kept on growth percentages.
pub const GROWTH_DECIMALS: u32 = 3;

/// Rounds to the nearest integer (ties to even) and groups digits by three.
///
/// `1234567.0` becomes `"1,234,567"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round_ties_even();
    if !rounded.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Rounds a growth percentage to three decimals, half to even.
///
/// Rounding runs on the shortest decimal form of the float, so `2.3455`
/// is treated as written rather than as its binary approximation.
pub fn round_growth(value: f64) -> Result<f64, KpiError> {
    if !value.is_finite() {
        return Err(KpiError::InvalidData(format!(
            "growth value {value} is not a finite number"
        )));
    }

    let Ok(decimal) = Decimal::from_str(&value.to_string()) else {
        // Outside of the 96-bit decimal range.
        let scaled = value * 1000.0;
        return Ok(if scaled.is_finite() {
            scaled.round_ties_even() / 1000.0
        } else {
            value
        });
    };

    decimal
        .round_dp_with_strategy(GROWTH_DECIMALS, RoundingStrategy::MidpointNearestEven)
        .to_string()
        .parse::<f64>()
        .map_err(|e| KpiError::CalculationError(format!("cannot round {value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(-0.2), "0");
        assert_eq!(format_thousands(-9_876_543.4), "-9,876,543");
        assert_eq!(format_thousands(1_234_567.5), "1,234,568");
        assert_eq!(format_thousands(2.5), "2");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(100_000), "100,000");
    }

    #[test]
    fn test_round_growth() {
        assert_eq!(round_growth(2.34567).unwrap(), 2.346);
        assert_eq!(round_growth(-1.2344).unwrap(), -1.234);
        assert_eq!(round_growth(12.0).unwrap(), 12.0);
        // Ties go to the even neighbour.
        assert_eq!(round_growth(1.0025).unwrap(), 1.002);
        assert_eq!(round_growth(1.0035).unwrap(), 1.004);
        assert_eq!(round_growth(0.0005).unwrap(), 0.0);
    }

    #[test]
    fn test_round_growth_rejects_non_finite() {
        assert!(matches!(
            round_growth(f64::NAN),
            Err(KpiError::InvalidData(_))
        ));
        assert!(round_growth(f64::INFINITY).is_err());
    }
}
