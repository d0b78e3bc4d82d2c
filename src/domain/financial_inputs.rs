use crate::domain::currency::currency_symbol;
use crate::domain::expense::MonthlyExpenses;
use crate::domain::savings_goal::SavingsGoal;

/// Snapshot of everything the user entered for one calculation.
///
/// Rates are fractions (`0.03` for 3%). Values are expected to be validated
/// as non-negative before they get here; nothing downstream checks again.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialInputs {
    pub currency: String,
    pub annual_salary: f64,
    pub tax_rate: f64,
    pub monthly_expenses: MonthlyExpenses,
    pub forecast_years: u32,
    pub annual_inflation_rate: f64,
    pub annual_salary_growth_rate: f64,
    pub goals: Vec<SavingsGoal>,
}

impl FinancialInputs {
    pub fn currency_symbol(&self) -> &'static str {
        currency_symbol(&self.currency)
    }
}

impl Default for FinancialInputs {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            annual_salary: 0.0,
            tax_rate: 0.0,
            monthly_expenses: MonthlyExpenses::new(),
            forecast_years: 0,
            annual_inflation_rate: 0.0,
            annual_salary_growth_rate: 0.0,
            goals: Vec::new(),
        }
    }
}
