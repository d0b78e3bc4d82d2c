pub mod forecast;
pub mod forecast_output;
pub mod forecast_plot;
pub mod plan_yaml;
pub mod summary;
pub mod tax_rate;
