use serde::Serialize;

/// Month-by-month projection. All monthly vectors have `12 * years.last()` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastSeries {
    pub years: Vec<u32>,
    pub monthly_salary: Vec<f64>,
    pub monthly_expenses: Vec<f64>,
    pub monthly_savings: Vec<f64>,
    pub cumulative_savings: Vec<f64>,
}

/// The forecast sampled at a year boundary so it lines up with the year axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyPoint {
    pub year: u32,
    pub salary: f64,
    pub expenses: f64,
    pub cumulative_savings: f64,
}

impl ForecastSeries {
    pub fn forecast_months(&self) -> usize {
        self.monthly_salary.len()
    }

    pub fn total_forecast_savings(&self) -> Option<f64> {
        self.cumulative_savings.last().copied()
    }

    /// One point per entry of `years`.
    ///
    /// Year 0 is the starting baseline with nothing saved yet. Year `y` takes
    /// the last month of that year (index `12 * y - 1`).
    pub fn yearly_points(&self, baseline_salary: f64, baseline_expenses: f64) -> Vec<YearlyPoint> {
        self.years
            .iter()
            .map(|&year| {
                if year == 0 {
                    return YearlyPoint {
                        year,
                        salary: baseline_salary,
                        expenses: baseline_expenses,
                        cumulative_savings: 0.0,
                    };
                }
                let idx = year as usize * 12 - 1;
                YearlyPoint {
                    year,
                    salary: self.monthly_salary.get(idx).copied().unwrap_or(baseline_salary),
                    expenses: self
                        .monthly_expenses
                        .get(idx)
                        .copied()
                        .unwrap_or(baseline_expenses),
                    cumulative_savings: self.cumulative_savings.get(idx).copied().unwrap_or(0.0),
                }
            })
            .collect()
    }
}
