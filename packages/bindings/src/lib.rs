use napi::Result as NapiResult;
use napi_derive::napi;

use personal_finance_core::investments::Sip;
use personal_finance_core::loans::Loan;
use personal_finance_core::{EngineConfig, ProjectionInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Full projection
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct ReportBindingInput {
    #[serde(flatten)]
    input: ProjectionInput,
    #[serde(default)]
    config: EngineConfig,
}

#[napi]
pub fn compute_report(input_json: String) -> NapiResult<String> {
    let binding_input: ReportBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        personal_finance_core::run_projection(&binding_input.input, &binding_input.config)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Single components
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    let input: Loan = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        personal_finance_core::loans::build_loan_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_sip(input_json: String) -> NapiResult<String> {
    let input: Sip = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        personal_finance_core::investments::project_sip_growth(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ArbitrageBindingInput {
    #[serde(default)]
    loans: Vec<Loan>,
    #[serde(default)]
    sips: Vec<Sip>,
    #[serde(default)]
    config: EngineConfig,
}

#[napi]
pub fn arbitrage_advice(input_json: String) -> NapiResult<String> {
    let binding_input: ArbitrageBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = personal_finance_core::advisory::advise(
        &binding_input.loans,
        &binding_input.sips,
        &binding_input.config,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
