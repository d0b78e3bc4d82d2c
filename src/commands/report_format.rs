use crate::domain::currency::format_amount;
use crate::domain::financial_inputs::FinancialInputs;
use crate::services::summary::{FinancialPlan, GoalProgress};

pub fn format_financial_report(inputs: &FinancialInputs, plan: &FinancialPlan) -> String {
    let symbol = inputs.currency_symbol();
    let summary = &plan.summary;

    let mut lines = Vec::new();
    lines.push("Reports".to_string());

    if inputs.annual_salary > 0.0 && summary.total_monthly_expenses > 0.0 {
        lines.push(String::new());
        lines.push("Income and Expenses Overview".to_string());
        lines.push(format!(
            "Annual Salary: {}",
            format_amount(symbol, inputs.annual_salary)
        ));
        lines.push(format!(
            "Monthly Take-Home Salary: {}",
            format_amount(symbol, summary.monthly_take_home)
        ));
        for (category, amount) in inputs.monthly_expenses.iter() {
            lines.push(format!(
                "  {category} Expenses: {}",
                format_amount(symbol, amount)
            ));
        }
        lines.push(format!(
            "Total Monthly Expenses: {}",
            format_amount(symbol, summary.total_monthly_expenses)
        ));
        lines.push(format!(
            "Net Savings: {}",
            format_amount(symbol, summary.net_monthly_savings)
        ));

        if let Some(total) = summary.total_forecast_savings {
            lines.push(String::new());
            lines.push("Forecast Overview".to_string());
            lines.push(format!(
                "Estimated Savings Over {} Year(s):",
                inputs.forecast_years
            ));
            lines.push(format!(
                "Total Forecast Savings: {}",
                format_amount(symbol, total)
            ));
        }
    } else {
        lines.push("Please enter your income and expense details to generate reports.".to_string());
    }

    let goal_lines: Vec<String> = plan.goals.iter().filter_map(format_goal_progress).collect();
    if !goal_lines.is_empty() {
        lines.push(String::new());
        lines.push("Savings Goals".to_string());
        lines.extend(goal_lines);
    }

    lines.join("\n")
}

/// `None` for goals without a positive target.
pub fn format_goal_progress(goal: &GoalProgress) -> Option<String> {
    goal.progress_percent.map(|progress| {
        format!(
            "You have achieved {progress:.2}% of your goal '{name}'.",
            name = goal.name
        )
    })
}
