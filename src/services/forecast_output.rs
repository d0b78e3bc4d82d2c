use std::io;
use std::path::Path;

use chrono::{Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::domain::financial_inputs::FinancialInputs;
use crate::services::summary::{FinancialPlan, FinancialSummary, GoalProgress};

#[derive(Error, Debug)]
pub enum ForecastOutputError {
    #[error("failed to write forecast output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to serialize forecast yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize forecast json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("forecast date out of range: {0} + {1} years")]
    DateOutOfRange(NaiveDate, u32),
}

#[derive(Serialize, Debug, Clone)]
pub struct ForecastReport {
    pub currency: String,
    pub currency_symbol: String,
    pub start_date: String,
    pub annual_salary: f64,
    pub tax_rate: f64,
    pub forecast_years: u32,
    pub annual_inflation_rate: f64,
    pub annual_salary_growth_rate: f64,
    pub summary: FinancialSummary,
    pub goals: Vec<GoalProgress>,
}

#[derive(Serialize, Debug, Clone)]
pub struct YearlyRecord {
    pub year: u32,
    pub date: String,
    pub salary: f64,
    pub expenses: f64,
    pub cumulative_savings: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct MonthlyRecord {
    pub salary: Vec<f64>,
    pub expenses: Vec<f64>,
    pub savings: Vec<f64>,
    pub cumulative_savings: Vec<f64>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ForecastOutput {
    pub report: ForecastReport,
    pub yearly: Vec<YearlyRecord>,
    pub monthly: MonthlyRecord,
}

pub fn build_forecast_output(
    inputs: &FinancialInputs,
    plan: &FinancialPlan,
    start_date: NaiveDate,
) -> Result<ForecastOutput, ForecastOutputError> {
    let mut yearly = Vec::with_capacity(plan.forecast.years.len());
    for point in plan.yearly_points() {
        let date = start_date
            .checked_add_months(Months::new(point.year * 12))
            .ok_or(ForecastOutputError::DateOutOfRange(start_date, point.year))?;
        yearly.push(YearlyRecord {
            year: point.year,
            date: date.format("%Y-%m-%d").to_string(),
            salary: point.salary,
            expenses: point.expenses,
            cumulative_savings: point.cumulative_savings,
        });
    }

    Ok(ForecastOutput {
        report: ForecastReport {
            currency: inputs.currency.clone(),
            currency_symbol: inputs.currency_symbol().to_string(),
            start_date: start_date.format("%Y-%m-%d").to_string(),
            annual_salary: inputs.annual_salary,
            tax_rate: inputs.tax_rate,
            forecast_years: inputs.forecast_years,
            annual_inflation_rate: inputs.annual_inflation_rate,
            annual_salary_growth_rate: inputs.annual_salary_growth_rate,
            summary: plan.summary.clone(),
            goals: plan.goals.clone(),
        },
        yearly,
        monthly: MonthlyRecord {
            salary: plan.forecast.monthly_salary.clone(),
            expenses: plan.forecast.monthly_expenses.clone(),
            savings: plan.forecast.monthly_savings.clone(),
            cumulative_savings: plan.forecast.cumulative_savings.clone(),
        },
    })
}

/// Serializes as JSON for `*.json` paths and as YAML otherwise.
pub fn serialize_forecast_output(
    path: &str,
    output: &ForecastOutput,
) -> Result<String, ForecastOutputError> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::to_string_pretty(output)?)
    } else {
        Ok(serde_yaml::to_string(output)?)
    }
}

pub fn write_forecast_output(path: &str, output: &ForecastOutput) -> Result<(), ForecastOutputError> {
    let contents = serialize_forecast_output(path, output)?;
    std::fs::write(path, contents)?;
    Ok(())
}
