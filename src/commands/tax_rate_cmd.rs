use crate::commands::CommandError;
use crate::commands::base_commands::Commands;
use crate::services::tax_rate::{RemoteTaxRate, TaxLookupConfig, TaxRateProvider};

pub fn tax_rate_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::TaxRate {
        currency,
        url_template,
        marker,
    } = cmd
    {
        let config = TaxLookupConfig::resolve(url_template, marker)?;
        let provider = RemoteTaxRate::new(config)?;
        let rate = provider.tax_rate(&currency)?;
        println!(
            "Tax rate for {}: {:.2}%",
            currency.trim().to_ascii_uppercase(),
            rate * 100.0
        );
    }
    Ok(())
}
