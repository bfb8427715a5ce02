use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanAmortError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanAmortResult;

/// Months per year for term conversion.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Terms of a fixed-rate instalment loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual interest rate, in percent (10 = 10%)
    pub annual_rate_pct: Decimal,
    /// Total number of monthly payments
    pub months: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_pct: Decimal, months: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            months,
        }
    }

    /// Build terms from a tenure in years. Partial months are truncated,
    /// so the term must cover at least one whole month.
    pub fn from_years(
        principal: Money,
        annual_rate_pct: Decimal,
        years: Decimal,
    ) -> LoanAmortResult<Self> {
        if years <= Decimal::ZERO {
            return Err(LoanAmortError::InvalidInput {
                field: "years".into(),
                reason: "Tenure must be positive".into(),
            });
        }

        let months = (years * MONTHS_PER_YEAR).trunc().to_u32().unwrap_or(0);
        if months == 0 {
            return Err(LoanAmortError::InvalidInput {
                field: "years".into(),
                reason: "Tenure must cover at least one whole month".into(),
            });
        }

        Ok(Self::new(principal, annual_rate_pct, months))
    }

    /// Monthly fractional rate: annual percent / (12 * 100)
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate_pct / dec!(1200)
    }

    pub(crate) fn validate(&self) -> LoanAmortResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanAmortError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.months == 0 {
            return Err(LoanAmortError::InvalidInput {
                field: "months".into(),
                reason: "Term must be at least 1 month".into(),
            });
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(LoanAmortError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
        Ok(())
    }
}

/// Periodic payment for a loan, plus the inputs it was derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub periodic_payment: Money,
    pub months: u32,
    pub periodic_rate: Rate,
}

/// Equated monthly instalment for the given terms.
///
/// Zero-rate loans amortise straight-line; the annuity formula divides
/// by zero at r = 0 and must not be applied there.
pub fn compute_payment(terms: &LoanTerms) -> LoanAmortResult<Money> {
    terms.validate()?;

    let r = terms.periodic_rate();
    let n = Decimal::from(terms.months);

    if r.is_zero() {
        return Ok(terms.principal / n);
    }

    let factor = (Decimal::ONE + r).powd(n);
    let denom = factor - Decimal::ONE;
    if denom <= Decimal::ZERO {
        return Err(LoanAmortError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    Ok(terms.principal * r * factor / denom)
}

/// Compute the instalment and wrap it in the standard output envelope.
pub fn quote_payment(terms: &LoanTerms) -> LoanAmortResult<ComputationOutput<PaymentQuote>> {
    let start = Instant::now();

    let periodic_payment = compute_payment(terms)?;
    let quote = PaymentQuote {
        periodic_payment,
        months: terms.months,
        periodic_rate: terms.periodic_rate(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated Monthly Instalment (ordinary annuity)",
        terms,
        Vec::new(),
        elapsed,
        quote,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_one_month_term() {
        // 50000 at 12% for 1 month: 50000 * 0.01 * 1.01 / 0.01 = 50500
        let terms = LoanTerms::new(dec!(50000), dec!(12), 1);
        let payment = compute_payment(&terms).unwrap();
        assert_eq!(payment, dec!(50500));
    }

    #[test]
    fn test_emi_twelve_months() {
        // 100000 at 10% for 12 months => ~8791.59
        let terms = LoanTerms::new(dec!(100000), dec!(10), 12);
        let payment = compute_payment(&terms).unwrap();
        assert!((payment - dec!(8791.59)).abs() < dec!(0.01));
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let terms = LoanTerms::new(dec!(12000), dec!(0), 12);
        let payment = compute_payment(&terms).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_thirty_year_mortgage() {
        // 300000 at 6% for 360 months => ~1798.65
        let terms = LoanTerms::new(dec!(300000), dec!(6), 360);
        let payment = compute_payment(&terms).unwrap();
        assert!((payment - dec!(1798.65)).abs() < dec!(0.01));
    }

    #[test]
    fn test_from_years_whole() {
        let terms = LoanTerms::from_years(dec!(100000), dec!(10), dec!(2)).unwrap();
        assert_eq!(terms.months, 24);
    }

    #[test]
    fn test_from_years_truncates_partial_month() {
        let terms = LoanTerms::from_years(dec!(100000), dec!(10), dec!(1.7)).unwrap();
        // 1.7 * 12 = 20.4 => 20 whole months
        assert_eq!(terms.months, 20);
    }

    #[test]
    fn test_from_years_sub_month_rejected() {
        assert!(LoanTerms::from_years(dec!(100000), dec!(10), dec!(0.05)).is_err());
    }

    #[test]
    fn test_negative_principal_rejected() {
        let terms = LoanTerms::new(dec!(-1), dec!(10), 12);
        assert!(matches!(
            compute_payment(&terms),
            Err(LoanAmortError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_months_rejected() {
        let terms = LoanTerms::new(dec!(1000), dec!(10), 0);
        assert!(compute_payment(&terms).is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let terms = LoanTerms::new(dec!(1000), dec!(-0.5), 12);
        assert!(compute_payment(&terms).is_err());
    }

    #[test]
    fn test_quote_envelope() {
        let terms = LoanTerms::new(dec!(12000), dec!(0), 12);
        let quote = quote_payment(&terms).unwrap();
        assert_eq!(quote.result.periodic_payment, dec!(1000));
        assert_eq!(quote.result.months, 12);
        assert_eq!(quote.result.periodic_rate, Decimal::ZERO);
        assert!(quote.warnings.is_empty());
    }
}
