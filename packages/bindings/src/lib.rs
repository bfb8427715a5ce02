use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_payment(input_json: String) -> NapiResult<String> {
    let terms: loan_amort_core::amortisation::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_amort_core::amortisation::quote_payment(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_amortisation(input_json: String) -> NapiResult<String> {
    let terms: loan_amort_core::amortisation::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_amort_core::amortisation::amortise(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    let terms: loan_amort_core::amortisation::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_amort_core::amortisation::calculate_summary(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
