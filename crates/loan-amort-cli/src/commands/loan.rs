use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_amort_core::amortisation::{self, LoanTerms};

use crate::input;

/// Loan terms shared by every subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate, in percent
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Tenure in years (partial months are dropped)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Tenure in months (takes precedence over --years)
    #[arg(long)]
    pub months: Option<u32>,
}

/// Arguments for CSV export of the schedule
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Destination file; ".csv" is appended when missing
    #[arg(long)]
    pub file: String,
}

impl LoanArgs {
    /// Resolve terms with the usual precedence: input file, piped stdin,
    /// then individual flags.
    fn resolve(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }

        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let annual_rate = self
            .annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?;

        if let Some(months) = self.months {
            Ok(LoanTerms::new(principal, annual_rate, months))
        } else if let Some(years) = self.years {
            Ok(LoanTerms::from_years(principal, annual_rate, years)?)
        } else {
            Err("--months or --years is required (or provide --input)".into())
        }
    }
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.resolve()?;
    let result = amortisation::quote_payment(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.resolve()?;
    let result = amortisation::amortise(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.resolve()?;
    let result = amortisation::calculate_summary(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.loan.resolve()?;
    let envelope = amortisation::amortise(&terms)?;
    let plan = &envelope.result;

    let path = if args.file.ends_with(".csv") {
        args.file.clone()
    } else {
        format!("{}.csv", args.file)
    };

    // Values are rounded to 2 decimals at this boundary only; the schedule
    // itself accumulates unrounded.
    let mut wtr = csv::Writer::from_path(&path)
        .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    wtr.write_record(["month", "interest", "principal", "balance"])?;
    for entry in &plan.periods {
        wtr.write_record([
            entry.month.to_string(),
            entry.interest.round_dp(2).to_string(),
            entry.principal.round_dp(2).to_string(),
            entry.balance.round_dp(2).to_string(),
        ])?;
    }
    wtr.flush()?;

    let rows = plan.periods.len();
    let periodic_payment = plan.periodic_payment.to_string();

    Ok(json!({
        "result": {
            "file": path,
            "rows": rows,
            "periodic_payment": periodic_payment,
        },
        "warnings": envelope.warnings,
        "methodology": envelope.methodology,
    }))
}
