use crate::domain::expense::{ExpenseCategory, MonthlyExpenses};
use crate::domain::financial_inputs::FinancialInputs;
use crate::services::tax_rate::{TaxRateError, TaxRateProvider};

// A provider that always fails, for exercising fallbacks
pub struct FailingTaxRate;
impl TaxRateProvider for FailingTaxRate {
    fn tax_rate(&self, _currency: &str) -> Result<f64, TaxRateError> {
        Err(TaxRateError::RateNotFound)
    }
}

/// Inputs with the whole monthly spend booked under `Others`.
pub fn build_inputs(
    annual_salary: f64,
    tax_rate: f64,
    monthly_expenses: f64,
    forecast_years: u32,
    annual_inflation_rate: f64,
    annual_salary_growth_rate: f64,
) -> FinancialInputs {
    let expenses = if monthly_expenses > 0.0 {
        MonthlyExpenses::new().with(ExpenseCategory::Others, monthly_expenses)
    } else {
        MonthlyExpenses::new()
    };
    FinancialInputs {
        annual_salary,
        tax_rate,
        monthly_expenses: expenses,
        forecast_years,
        annual_inflation_rate,
        annual_salary_growth_rate,
        ..FinancialInputs::default()
    }
}
