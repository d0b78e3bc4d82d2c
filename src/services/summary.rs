use serde::Serialize;

use crate::domain::financial_inputs::FinancialInputs;
use crate::domain::forecast::{ForecastSeries, YearlyPoint};
use crate::services::forecast::{ForecastParameters, compute_forecast};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub monthly_take_home: f64,
    pub total_monthly_expenses: f64,
    pub net_monthly_savings: f64,
    pub total_forecast_savings: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub progress_percent: Option<f64>,
}

/// Everything derived from one [`FinancialInputs`] snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialPlan {
    pub summary: FinancialSummary,
    pub forecast: ForecastSeries,
    pub goals: Vec<GoalProgress>,
}

impl FinancialPlan {
    pub fn yearly_points(&self) -> Vec<YearlyPoint> {
        self.forecast.yearly_points(
            self.summary.monthly_take_home,
            self.summary.total_monthly_expenses,
        )
    }
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Monthly salary after tax, rounded to cents. The forecast starts from this
/// rounded value.
pub fn monthly_take_home(annual_salary: f64, tax_rate: f64) -> f64 {
    round_to_cents(annual_salary * (1.0 - tax_rate) / 12.0)
}

pub fn build_plan(inputs: &FinancialInputs) -> FinancialPlan {
    let monthly_take_home = monthly_take_home(inputs.annual_salary, inputs.tax_rate);
    let total_monthly_expenses = inputs.monthly_expenses.total();

    let forecast = compute_forecast(&ForecastParameters {
        monthly_take_home,
        total_monthly_expenses,
        forecast_years: inputs.forecast_years,
        annual_inflation_rate: inputs.annual_inflation_rate,
        annual_salary_growth_rate: inputs.annual_salary_growth_rate,
    });

    let summary = FinancialSummary {
        monthly_take_home,
        total_monthly_expenses,
        net_monthly_savings: monthly_take_home - total_monthly_expenses,
        total_forecast_savings: forecast.total_forecast_savings(),
    };

    let goals = inputs
        .goals
        .iter()
        .map(|goal| GoalProgress {
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            progress_percent: goal.progress_percent(),
        })
        .collect();

    FinancialPlan {
        summary,
        forecast,
        goals,
    }
}
