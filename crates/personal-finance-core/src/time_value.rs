use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PersonalFinanceError;
use crate::types::{to_rate, Money, Percent, Rate};
use crate::PersonalFinanceResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly rate for an annual percentage compounded monthly (cagr / 12).
pub fn monthly_rate(annual: Percent) -> Rate {
    to_rate(annual) / MONTHS_PER_YEAR
}

pub(crate) fn checked_add(a: Money, b: Money, context: &str) -> PersonalFinanceResult<Money> {
    a.checked_add(b)
        .ok_or_else(|| PersonalFinanceError::overflow(context))
}

pub(crate) fn checked_sub(a: Money, b: Money, context: &str) -> PersonalFinanceResult<Money> {
    a.checked_sub(b)
        .ok_or_else(|| PersonalFinanceError::overflow(context))
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal, context: &str) -> PersonalFinanceResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| PersonalFinanceError::overflow(context))
}

pub(crate) fn checked_div(a: Decimal, b: Decimal, context: &str) -> PersonalFinanceResult<Decimal> {
    a.checked_div(b)
        .ok_or_else(|| PersonalFinanceError::overflow(context))
}

/// Sum that reports overflow instead of panicking.
pub(crate) fn checked_sum<I>(values: I, context: &str) -> PersonalFinanceResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| checked_add(acc, v, context))
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> PersonalFinanceResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = checked_mul(result, factor, "compound factor")?;
    }
    Ok(result)
}

/// Effective annual rate of a monthly-compounded nominal annual percentage,
/// returned as a percentage.
pub fn effective_annual_rate(nominal: Percent) -> PersonalFinanceResult<Percent> {
    let factor = compound(monthly_rate(nominal), 12)?;
    checked_mul(factor - Decimal::ONE, dec!(100), "effective annual rate")
}

/// Deflate a nominal value `years` years out: real = nominal / (1 + inflation)^years.
pub fn deflate(nominal: Money, inflation: Percent, years: u32) -> PersonalFinanceResult<Money> {
    let factor = compound(to_rate(inflation), years)?;
    if factor.is_zero() {
        return Err(PersonalFinanceError::invalid(
            "inflation_rate",
            "Inflation of -100% makes every future value unbounded",
        ));
    }
    checked_div(nominal, factor, "inflation deflator")
}

/// Whole calendar months from `from` to `to`, floored at zero.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let months = if to.day() < from.day() { months - 1 } else { months };
    months.max(0) as u32
}

/// Number of whole years needed to cover `months`, rounding up.
pub fn years_covering(months: u32) -> u32 {
    months.div_ceil(12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
    }

    #[test]
    fn test_compound_basic() {
        let f = compound(dec!(0.10), 2).unwrap();
        assert_eq!(f, dec!(1.21));
        assert_eq!(compound(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_effective_annual_rate_above_nominal() {
        let ear = effective_annual_rate(dec!(12)).unwrap();
        // (1.01)^12 - 1 = 12.6825...%
        assert!((ear - dec!(12.6825)).abs() < dec!(0.001));
    }

    #[test]
    fn test_effective_annual_rate_zero() {
        assert_eq!(effective_annual_rate(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_deflate() {
        let real = deflate(dec!(121), dec!(10), 2).unwrap();
        assert_eq!(real, dec!(100));
        assert_eq!(deflate(dec!(500), dec!(5), 0).unwrap(), dec!(500));
    }

    #[test]
    fn test_deflate_rejects_total_inflation() {
        assert!(deflate(dec!(100), dec!(-100), 1).is_err());
    }

    #[test]
    fn test_compound_overflow_is_reported() {
        let err = compound(dec!(1000000), 10).unwrap_err();
        assert!(matches!(err, PersonalFinanceError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_months_between() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(months_between(a, b), 14);
        let c = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(months_between(a, c), 13);
        assert_eq!(months_between(b, a), 0);
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([dec!(1), dec!(2.5)], "t").unwrap(), dec!(3.5));
        assert!(checked_sum([Decimal::MAX, Decimal::MAX], "t").is_err());
    }

    #[test]
    fn test_years_covering() {
        assert_eq!(years_covering(0), 0);
        assert_eq!(years_covering(12), 1);
        assert_eq!(years_covering(13), 2);
    }
}
