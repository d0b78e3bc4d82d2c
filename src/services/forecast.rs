use crate::domain::forecast::ForecastSeries;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Scalars the projection is built from. Rates are annual fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastParameters {
    pub monthly_take_home: f64,
    pub total_monthly_expenses: f64,
    pub forecast_years: u32,
    pub annual_inflation_rate: f64,
    pub annual_salary_growth_rate: f64,
}

/// Monthly rate that compounds to `annual_rate` over twelve months.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
}

/// `factor[i] = (1 + rate)^(i + 1)`, built as a running product.
pub fn growth_factors(monthly_rate: f64, months: usize) -> Vec<f64> {
    let step = 1.0 + monthly_rate;
    std::iter::successors(Some(step), |factor| Some(factor * step))
        .take(months)
        .collect()
}

/// Projects salary, expenses and savings month by month.
///
/// Inputs must already be non-negative; a zero horizon gives empty monthly
/// series and a single year marker.
pub fn compute_forecast(params: &ForecastParameters) -> ForecastSeries {
    let forecast_months = (MONTHS_PER_YEAR * params.forecast_years) as usize;

    let inflation_factors =
        growth_factors(monthly_rate(params.annual_inflation_rate), forecast_months);
    let salary_factors =
        growth_factors(monthly_rate(params.annual_salary_growth_rate), forecast_months);

    let monthly_expenses: Vec<f64> = inflation_factors
        .iter()
        .map(|factor| params.total_monthly_expenses * factor)
        .collect();
    let monthly_salary: Vec<f64> = salary_factors
        .iter()
        .map(|factor| params.monthly_take_home * factor)
        .collect();
    let monthly_savings: Vec<f64> = monthly_salary
        .iter()
        .zip(&monthly_expenses)
        .map(|(salary, expenses)| salary - expenses)
        .collect();
    let cumulative_savings = monthly_savings
        .iter()
        .scan(0.0, |total, savings| {
            *total += savings;
            Some(*total)
        })
        .collect();

    tracing::debug!(
        forecast_months,
        years = params.forecast_years,
        "computed forecast series"
    );

    ForecastSeries {
        years: (0..=params.forecast_years).collect(),
        monthly_salary,
        monthly_expenses,
        monthly_savings,
        cumulative_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(years: u32, inflation: f64, growth: f64) -> ForecastParameters {
        ForecastParameters {
            monthly_take_home: 7500.0,
            total_monthly_expenses: 3000.0,
            forecast_years: years,
            annual_inflation_rate: inflation,
            annual_salary_growth_rate: growth,
        }
    }

    #[test]
    fn zero_years_gives_empty_series() {
        let series = compute_forecast(&params(0, 0.03, 0.05));

        assert!(series.monthly_salary.is_empty());
        assert!(series.monthly_expenses.is_empty());
        assert!(series.monthly_savings.is_empty());
        assert!(series.cumulative_savings.is_empty());
        assert_eq!(series.years, vec![0]);
        assert_eq!(series.total_forecast_savings(), None);
    }

    #[test]
    fn series_lengths_follow_horizon() {
        let series = compute_forecast(&params(3, 0.03, 0.05));

        assert_eq!(series.forecast_months(), 36);
        assert_eq!(series.monthly_expenses.len(), 36);
        assert_eq!(series.cumulative_savings.len(), 36);
        assert_eq!(series.years, vec![0, 1, 2, 3]);
    }

    #[test]
    fn zero_rates_keep_values_flat() {
        let series = compute_forecast(&params(2, 0.0, 0.0));

        for (idx, cumulative) in series.cumulative_savings.iter().enumerate() {
            assert_eq!(series.monthly_salary[idx], 7500.0);
            assert_eq!(series.monthly_expenses[idx], 3000.0);
            assert!((cumulative - 4500.0 * (idx as f64 + 1.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn inflation_of_twelve_percent_adds_twelve_percent_after_a_year() {
        let rate = monthly_rate(0.12);
        assert!((rate - 0.00949).abs() < 1e-5);

        let series = compute_forecast(&ForecastParameters {
            monthly_take_home: 0.0,
            total_monthly_expenses: 3000.0,
            forecast_years: 1,
            annual_inflation_rate: 0.12,
            annual_salary_growth_rate: 0.0,
        });

        assert!((series.monthly_expenses[11] - 3360.0).abs() < 1e-6);
        assert!((series.monthly_expenses[0] - 3000.0 * (1.0 + rate)).abs() < 1e-9);
    }

    #[test]
    fn growth_factors_start_at_exponent_one() {
        let factors = growth_factors(0.01, 3);

        assert_eq!(factors.len(), 3);
        assert!((factors[0] - 1.01).abs() < 1e-12);
        assert!((factors[1] - 1.01_f64.powi(2)).abs() < 1e-12);
        assert!((factors[2] - 1.01_f64.powi(3)).abs() < 1e-12);
        assert!(growth_factors(0.01, 0).is_empty());
    }

    #[test]
    fn savings_are_non_decreasing_when_growth_beats_inflation() {
        let series = compute_forecast(&params(10, 0.03, 0.06));

        for pair in series.monthly_savings.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn cumulative_savings_is_running_sum() {
        let series = compute_forecast(&params(1, 0.02, 0.04));

        let mut total = 0.0;
        for (savings, cumulative) in series.monthly_savings.iter().zip(&series.cumulative_savings)
        {
            total += savings;
            assert!((total - cumulative).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn monthly_rate_compounds_back_to_annual(annual_rate in 0.0f64..2.0) {
            let compounded = (1.0 + monthly_rate(annual_rate)).powi(12);
            prop_assert!((compounded - (1.0 + annual_rate)).abs() < 1e-9);
        }

        #[test]
        fn flat_rates_accumulate_linearly(
            take_home in 0.0f64..50_000.0,
            expenses in 0.0f64..50_000.0,
            years in 0u32..5,
        ) {
            let series = compute_forecast(&ForecastParameters {
                monthly_take_home: take_home,
                total_monthly_expenses: expenses,
                forecast_years: years,
                annual_inflation_rate: 0.0,
                annual_salary_growth_rate: 0.0,
            });

            prop_assert_eq!(series.forecast_months(), 12 * years as usize);
            for (idx, cumulative) in series.cumulative_savings.iter().enumerate() {
                let expected = (take_home - expenses) * (idx as f64 + 1.0);
                prop_assert!((cumulative - expected).abs() < 1e-6 * expected.abs().max(1.0));
            }
        }
    }
}
