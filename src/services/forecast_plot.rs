use crate::domain::forecast::YearlyPoint;
use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastPlotError {
    #[error("forecast horizon is empty, nothing to plot")]
    EmptyForecast,
    #[error("failed to render forecast chart: {0}")]
    Render(String),
}

pub fn write_forecast_png(
    output_path: &str,
    points: &[YearlyPoint],
    currency_symbol: &str,
) -> Result<(), ForecastPlotError> {
    if points.len() < 2 {
        return Err(ForecastPlotError::EmptyForecast);
    }
    render_forecast_png(output_path, points, currency_symbol)
}

fn render_forecast_png(
    output_path: &str,
    points: &[YearlyPoint],
    currency_symbol: &str,
) -> Result<(), ForecastPlotError> {
    let values = points
        .iter()
        .flat_map(|point| [point.salary, point.expenses, point.cumulative_savings]);
    let (min_value, max_value) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    let padding = ((max_value - min_value) * 0.05).max(1.0);
    let max_year = points.last().map(|point| point.year).unwrap_or(1).max(1);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("Forecast Salary, Expenses & Savings Over the Years ({currency_symbol})"),
            ("sans-serif", 26),
        )
        .x_label_area_size(55)
        .y_label_area_size(90)
        .build_cartesian_2d(0..max_year, (min_value - padding)..(max_value + padding))
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Year")
        .y_desc(format!("Amount ({currency_symbol})"))
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels((max_year as usize + 1).min(12))
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    let salary_color = RGBColor(30, 80, 220);
    let expenses_color = RGBColor(210, 40, 40);
    let savings_color = RGBColor(30, 150, 60);

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|point| (point.year, point.salary)),
            salary_color.stroke_width(2),
        ))
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?
        .label("Forecast Salary")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], salary_color));

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|point| (point.year, point.expenses)),
            expenses_color.stroke_width(2),
        ))
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?
        .label("Forecast Expenses")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], expenses_color));

    chart
        .draw_series(
            LineSeries::new(
                points.iter().map(|point| (point.year, point.cumulative_savings)),
                savings_color.stroke_width(2),
            )
            .point_size(4),
        )
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?
        .label("Forecast Savings")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], savings_color));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ForecastPlotError::Render(e.to_string()))?;
    tracing::debug!(output_path, points = points.len(), "forecast chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::summary::build_plan;
    use crate::test_support::build_inputs;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[test]
    fn write_forecast_png_creates_file() {
        let inputs = build_inputs(120000.0, 0.25, 3000.0, 3, 0.03, 0.05);
        let plan = build_plan(&inputs);
        let output_file = assert_fs::NamedTempFile::new("forecast.png").unwrap();

        write_forecast_png(output_file.path().to_str().unwrap(), &plan.yearly_points(), "$")
            .unwrap();

        output_file.assert(predicate::path::exists());
        let metadata = std::fs::metadata(output_file.path()).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn write_forecast_png_rejects_empty_horizon() {
        let inputs = build_inputs(120000.0, 0.25, 3000.0, 0, 0.03, 0.05);
        let plan = build_plan(&inputs);
        let output_file = assert_fs::NamedTempFile::new("empty.png").unwrap();

        let error =
            write_forecast_png(output_file.path().to_str().unwrap(), &plan.yearly_points(), "$")
                .expect_err("expected empty forecast error");

        assert!(matches!(error, ForecastPlotError::EmptyForecast));
    }
}
