use thiserror::Error;

use crate::services::forecast_output::ForecastOutputError;
use crate::services::plan_yaml::PlanYamlError;
use crate::services::tax_rate::TaxRateError;

pub mod base_commands;
pub mod completions_cmd;
pub mod forecast_cmd;
pub mod goal_cmd;
pub mod report_format;
pub mod take_home_cmd;
pub mod tax_rate_cmd;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("invalid start date: {0} (expected YYYY-MM-DD)")]
    InvalidStartDate(String),
    #[error(transparent)]
    Plan(#[from] PlanYamlError),
    #[error("failed to resolve tax rate: {0}")]
    TaxRate(#[from] TaxRateError),
    #[error(transparent)]
    Output(#[from] ForecastOutputError),
}
