use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortisation::payment::{compute_payment, LoanTerms};
use crate::error::LoanAmortError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanAmortResult;

/// Lifetime cost of a loan, split between principal and interest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    pub periodic_payment: Money,
    pub months: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    /// Principal as a percentage of everything paid
    pub principal_share_pct: Decimal,
    /// Interest as a percentage of everything paid
    pub interest_share_pct: Decimal,
}

/// Summarise the total cost of the loan without building the full schedule.
pub fn calculate_summary(terms: &LoanTerms) -> LoanAmortResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();

    let periodic_payment = compute_payment(terms)?;
    let total_paid = periodic_payment * Decimal::from(terms.months);
    let total_interest = total_paid - terms.principal;

    if total_paid.is_zero() {
        return Err(LoanAmortError::DivisionByZero {
            context: "loan summary total paid".into(),
        });
    }

    let principal_share_pct = terms.principal / total_paid * dec!(100);
    let interest_share_pct = dec!(100) - principal_share_pct;

    let summary = LoanSummary {
        periodic_payment,
        months: terms.months,
        total_paid,
        total_interest,
        principal_share_pct,
        interest_share_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Cost Breakdown",
        terms,
        Vec::new(),
        elapsed,
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_zero_rate() {
        let terms = LoanTerms::new(dec!(12000), dec!(0), 12);
        let output = calculate_summary(&terms).unwrap();
        let s = &output.result;

        assert_eq!(s.periodic_payment, dec!(1000));
        assert_eq!(s.total_paid, dec!(12000));
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.principal_share_pct, dec!(100));
        assert_eq!(s.interest_share_pct, Decimal::ZERO);
    }

    #[test]
    fn test_summary_with_interest() {
        let terms = LoanTerms::new(dec!(100000), dec!(10), 12);
        let output = calculate_summary(&terms).unwrap();
        let s = &output.result;

        // ~8791.59 * 12 ≈ 105499.06 total, ~5499.06 of it interest
        assert!((s.total_paid - dec!(105499.06)).abs() < dec!(0.05));
        assert!((s.total_interest - dec!(5499.06)).abs() < dec!(0.05));
        assert_eq!(s.principal_share_pct + s.interest_share_pct, dec!(100));
        assert!(s.principal_share_pct > dec!(90));
    }

    #[test]
    fn test_summary_invalid_terms() {
        let terms = LoanTerms::new(dec!(-100), dec!(10), 12);
        assert!(calculate_summary(&terms).is_err());
    }
}
