//! Fixed-rate loan amortisation: instalment derivation, month-by-month
//! schedule construction and lifetime cost breakdown. All math in
//! `rust_decimal::Decimal`.

pub mod payment;
pub mod schedule;
pub mod summary;

pub use payment::{compute_payment, quote_payment, LoanTerms, PaymentQuote};
pub use schedule::{amortise, amortise_with, build_schedule, PaymentPlan, PeriodEntry};
pub use summary::{calculate_summary, LoanSummary};
