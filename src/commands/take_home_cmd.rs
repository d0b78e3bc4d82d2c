use crate::commands::CommandError;
use crate::commands::base_commands::Commands;
use crate::domain::currency::{currency_symbol, format_amount};
use crate::services::summary::monthly_take_home;
use crate::services::tax_rate::percent_to_fraction;

pub fn take_home_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::TakeHome {
        salary,
        tax_rate,
        currency,
    } = cmd
    {
        let tax_rate = percent_to_fraction(tax_rate)?;
        let take_home = monthly_take_home(salary, tax_rate);
        println!(
            "Monthly Take-Home Income: {}",
            format_amount(currency_symbol(&currency), take_home)
        );
    }
    Ok(())
}
