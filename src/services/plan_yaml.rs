use std::collections::BTreeMap;
use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::expense::{ExpenseCategory, MonthlyExpenses};
use crate::domain::financial_inputs::FinancialInputs;
use crate::domain::savings_goal::SavingsGoal;
use crate::services::tax_rate::{
    FallbackTaxRate, ManualTaxRate, RemoteTaxRate, TaxLookupConfig, TaxRateError,
    TaxRateProvider, percent_to_fraction,
};

pub const MAX_FORECAST_YEARS: u32 = 100;

#[derive(Error, Debug)]
pub enum PlanYamlError {
    #[error("failed to read plan yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse plan yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: f64 },
    #[error("forecast.years must be at most {MAX_FORECAST_YEARS} (got {0})")]
    HorizonTooLong(i64),
    #[error("unknown expense category: {0}")]
    UnknownCategory(String),
    #[error("expense category {0} is listed more than once")]
    DuplicateCategory(String),
    #[error("tax section must set exactly one of rate_percent or lookup")]
    AmbiguousTax,
    #[error("invalid tax setting: {0}")]
    Tax(#[from] TaxRateError),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanRecord {
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    annual_salary: f64,
    #[serde(default)]
    tax: TaxRecord,
    #[serde(default)]
    expenses: BTreeMap<String, f64>,
    #[serde(default)]
    forecast: ForecastRecord,
    #[serde(default)]
    goals: Vec<GoalRecord>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TaxRecord {
    rate_percent: Option<f64>,
    lookup: Option<TaxLookupRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxLookupRecord {
    url_template: Option<String>,
    marker: Option<String>,
    #[serde(default)]
    fallback_percent: f64,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ForecastRecord {
    #[serde(default)]
    years: i64,
    #[serde(default)]
    inflation_percent: f64,
    #[serde(default)]
    salary_growth_percent: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GoalRecord {
    name: String,
    target_amount: f64,
    #[serde(default)]
    current_amount: f64,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// How the tax rate for a plan is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum TaxSetting {
    Manual {
        percent: f64,
    },
    Lookup {
        url_template: Option<String>,
        marker: Option<String>,
        fallback_percent: f64,
    },
}

impl TaxSetting {
    /// Remote lookups are always wrapped so a failed request yields the fallback.
    /// A lookup without any URL template uses the fallback directly.
    pub fn provider(&self) -> Result<Box<dyn TaxRateProvider>, TaxRateError> {
        match self {
            TaxSetting::Manual { percent } => Ok(Box::new(ManualTaxRate::from_percent(*percent)?)),
            TaxSetting::Lookup {
                url_template,
                marker,
                fallback_percent,
            } => {
                let fallback = percent_to_fraction(*fallback_percent)?;
                match TaxLookupConfig::resolve(url_template.clone(), marker.clone()) {
                    Ok(config) => {
                        let remote = RemoteTaxRate::new(config)?;
                        Ok(Box::new(FallbackTaxRate::new(remote, fallback)))
                    }
                    Err(e @ TaxRateError::MissingUrlTemplate) => {
                        tracing::warn!(error = %e, fallback, "tax lookup not configured, using fallback");
                        Ok(Box::new(ManualTaxRate::from_percent(*fallback_percent)?))
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}

/// A parsed plan whose tax rate has not been resolved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDefinition {
    pub inputs: FinancialInputs,
    pub tax: TaxSetting,
}

impl PlanDefinition {
    pub fn resolve_with(self, provider: &dyn TaxRateProvider) -> Result<FinancialInputs, TaxRateError> {
        let tax_rate = provider.tax_rate(&self.inputs.currency)?;
        Ok(FinancialInputs {
            tax_rate,
            ..self.inputs
        })
    }

    pub fn resolve(self) -> Result<FinancialInputs, TaxRateError> {
        let provider = self.tax.provider()?;
        self.resolve_with(provider.as_ref())
    }
}

pub fn load_plan_from_yaml_file(path: &str) -> Result<PlanDefinition, PlanYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_plan_from_yaml_str(&contents)
}

pub fn deserialize_plan_from_yaml_str(input: &str) -> Result<PlanDefinition, PlanYamlError> {
    let record: PlanRecord = serde_yaml::from_str(input)?;

    ensure_non_negative("annual_salary", record.annual_salary)?;
    ensure_non_negative("forecast.years", record.forecast.years as f64)?;
    ensure_non_negative("forecast.inflation_percent", record.forecast.inflation_percent)?;
    ensure_non_negative(
        "forecast.salary_growth_percent",
        record.forecast.salary_growth_percent,
    )?;

    let mut monthly_expenses = MonthlyExpenses::new();
    for (name, amount) in record.expenses {
        let category: ExpenseCategory = name
            .parse()
            .map_err(PlanYamlError::UnknownCategory)?;
        ensure_non_negative(&format!("expenses.{}", category.key()), amount)?;
        if monthly_expenses.contains(category) {
            return Err(PlanYamlError::DuplicateCategory(category.key().to_string()));
        }
        monthly_expenses.set(category, amount);
    }

    let mut goals = Vec::with_capacity(record.goals.len());
    for goal in record.goals {
        ensure_non_negative(&format!("goals.{}.target_amount", goal.name), goal.target_amount)?;
        ensure_non_negative(&format!("goals.{}.current_amount", goal.name), goal.current_amount)?;
        goals.push(SavingsGoal::new(goal.name, goal.target_amount, goal.current_amount));
    }

    let tax = tax_setting_from_record(record.tax)?;
    let forecast_years = u32::try_from(record.forecast.years)
        .ok()
        .filter(|years| *years <= MAX_FORECAST_YEARS)
        .ok_or(PlanYamlError::HorizonTooLong(record.forecast.years))?;

    Ok(PlanDefinition {
        inputs: FinancialInputs {
            currency: record.currency.trim().to_ascii_uppercase(),
            annual_salary: record.annual_salary,
            tax_rate: 0.0,
            monthly_expenses,
            forecast_years,
            annual_inflation_rate: record.forecast.inflation_percent / 100.0,
            annual_salary_growth_rate: record.forecast.salary_growth_percent / 100.0,
            goals,
        },
        tax,
    })
}

fn tax_setting_from_record(record: TaxRecord) -> Result<TaxSetting, PlanYamlError> {
    match (record.rate_percent, record.lookup) {
        (Some(_), Some(_)) => Err(PlanYamlError::AmbiguousTax),
        (Some(percent), None) => {
            percent_to_fraction(percent)?;
            Ok(TaxSetting::Manual { percent })
        }
        (None, Some(lookup)) => {
            percent_to_fraction(lookup.fallback_percent)?;
            Ok(TaxSetting::Lookup {
                url_template: lookup.url_template,
                marker: lookup.marker,
                fallback_percent: lookup.fallback_percent,
            })
        }
        (None, None) => Ok(TaxSetting::Manual { percent: 0.0 }),
    }
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), PlanYamlError> {
    if value.is_nan() || value < 0.0 {
        return Err(PlanYamlError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
