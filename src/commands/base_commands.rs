use clap::{Parser, Subcommand};
use clap_complete::Shell;
use chrono::Local;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast salary, expenses and savings from a plan YAML file
    Forecast {
        /// Plan YAML file
        #[arg(short, long)]
        input: String,
        /// Output file (YAML, or JSON when it ends in .json)
        #[arg(short, long)]
        output: String,
        /// Output PNG chart (defaults to <output>.png)
        #[arg(short, long)]
        chart: Option<String>,
        /// Forecast start date (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_start_date())]
        start_date: String,
    },
    /// Compute the monthly take-home salary
    TakeHome {
        /// Annual salary before tax
        #[arg(long, value_parser = non_negative_amount)]
        salary: f64,
        /// Tax rate in percent
        #[arg(short, long, default_value_t = 0.0, value_parser = percentage)]
        tax_rate: f64,
        /// Currency code used for formatting
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Show progress towards a savings goal
    Goal {
        /// Name of the goal
        #[arg(short, long)]
        name: String,
        /// Target amount
        #[arg(short, long, value_parser = non_negative_amount)]
        target: f64,
        /// Amount saved so far
        #[arg(short, long, default_value_t = 0.0, value_parser = non_negative_amount)]
        current: f64,
    },
    /// Look up the tax rate for a currency from the configured web page
    TaxRate {
        /// Currency code substituted into the URL template
        #[arg(long, default_value = "USD")]
        currency: String,
        /// URL with a {currency} placeholder (falls back to FINPLAN_TAX_URL_TEMPLATE)
        #[arg(short, long)]
        url_template: Option<String>,
        /// Text after which the percentage is searched (falls back to FINPLAN_TAX_MARKER)
        #[arg(short, long)]
        marker: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn default_start_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn non_negative_amount(value: &str) -> Result<f64, String> {
    let amount: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if amount.is_nan() || amount < 0.0 {
        return Err(format!("`{value}` must not be negative"));
    }
    Ok(amount)
}

fn percentage(value: &str) -> Result<f64, String> {
    let percent = non_negative_amount(value)?;
    if percent > 100.0 {
        return Err(format!("`{value}` must be between 0 and 100"));
    }
    Ok(percent)
}
