use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortisation::payment::{compute_payment, LoanTerms};
use crate::error::LoanAmortError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanAmortResult;

/// Residual balances within a cent of zero count as paid off.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month in the amortisation schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub month: u32,
    /// Interest accrued on the opening balance
    pub interest: Money,
    /// Portion of the instalment applied to principal
    pub principal: Money,
    /// Remaining balance after the instalment, never negative
    pub balance: Money,
}

/// Full payment plan: the instalment plus the month-by-month schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub periodic_payment: Money,
    pub periods: Vec<PeriodEntry>,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
}

// ---------------------------------------------------------------------------
// Schedule construction
// ---------------------------------------------------------------------------

/// Build the month-by-month schedule for a given instalment.
///
/// Each month's interest accrues on the previous month's closing balance,
/// so the loop is inherently sequential. Balances accumulate unrounded;
/// rounding belongs at the presentation boundary.
pub fn build_schedule(
    terms: &LoanTerms,
    periodic_payment: Money,
) -> LoanAmortResult<Vec<PeriodEntry>> {
    terms.validate()?;

    if periodic_payment <= Decimal::ZERO {
        return Err(LoanAmortError::InvalidInput {
            field: "periodic_payment".into(),
            reason: "Instalment must be positive".into(),
        });
    }

    let r = terms.periodic_rate();
    let mut balance = terms.principal;
    let mut entries = Vec::with_capacity(terms.months as usize);

    for month in 1..=terms.months {
        let interest = balance * r;
        let principal = periodic_payment - interest;
        balance -= principal;

        // An overshooting instalment is pinned at zero; the principal
        // portion keeps its unadjusted value.
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        entries.push(PeriodEntry {
            month,
            interest,
            principal,
            balance,
        });
    }

    Ok(entries)
}

/// Compute the instalment, build the full schedule and wrap both in the
/// standard output envelope.
pub fn amortise(terms: &LoanTerms) -> LoanAmortResult<ComputationOutput<PaymentPlan>> {
    let periodic_payment = compute_payment(terms)?;
    amortise_with(terms, periodic_payment)
}

/// Amortise with a caller-supplied instalment, e.g. one rounded to whole
/// cents before being applied.
pub fn amortise_with(
    terms: &LoanTerms,
    periodic_payment: Money,
) -> LoanAmortResult<ComputationOutput<PaymentPlan>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let periods = build_schedule(terms, periodic_payment)?;

    // Flag months where the instalment materially overshot the balance.
    let mut opening = terms.principal;
    for entry in &periods {
        if opening - entry.principal < -BALANCE_EPSILON {
            warnings.push(format!(
                "Month {}: instalment exceeds the remaining balance; closing balance clamped to zero",
                entry.month
            ));
        }
        opening = entry.balance;
    }

    let total_interest_paid: Money = periods.iter().map(|p| p.interest).sum();
    let total_principal_paid: Money = periods.iter().map(|p| p.principal).sum();

    let plan = PaymentPlan {
        periodic_payment,
        periods,
        total_interest_paid,
        total_principal_paid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated Monthly Instalment Amortisation Schedule",
        terms,
        warnings,
        elapsed,
        plan,
    ))
}
