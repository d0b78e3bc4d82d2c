use chrono::NaiveDate;

use crate::commands::CommandError;
use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_financial_report;
use crate::services::forecast_output::{build_forecast_output, write_forecast_output};
use crate::services::forecast_plot::{ForecastPlotError, write_forecast_png};
use crate::services::plan_yaml::load_plan_from_yaml_file;
use crate::services::summary::build_plan;

pub fn forecast_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Forecast {
        input,
        output,
        chart,
        start_date,
    } = cmd
    {
        let start_date = NaiveDate::parse_from_str(&start_date, "%Y-%m-%d")
            .map_err(|_| CommandError::InvalidStartDate(start_date.clone()))?;

        let definition = load_plan_from_yaml_file(&input)?;
        let inputs = definition.resolve()?;
        tracing::info!(
            currency = %inputs.currency,
            tax_rate = inputs.tax_rate,
            years = inputs.forecast_years,
            "plan loaded"
        );

        let plan = build_plan(&inputs);
        let forecast = build_forecast_output(&inputs, &plan, start_date)?;
        write_forecast_output(&output, &forecast)?;

        let chart_path = chart.unwrap_or_else(|| format!("{output}.png"));
        let chart_written =
            match write_forecast_png(&chart_path, &plan.yearly_points(), inputs.currency_symbol()) {
                Ok(()) => true,
                Err(ForecastPlotError::EmptyForecast) => {
                    println!("Forecast horizon is zero years, chart skipped");
                    false
                }
                Err(e) => {
                    eprintln!("Failed to write forecast chart: {e}");
                    false
                }
            };

        println!("{}", format_financial_report(&inputs, &plan));
        println!();
        println!("Forecast result written to {output}");
        if chart_written {
            println!("Forecast chart written to {chart_path}");
        }
    }
    Ok(())
}
