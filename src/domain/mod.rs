pub mod currency;
pub mod expense;
pub mod financial_inputs;
pub mod forecast;
pub mod savings_goal;
