use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpenseCategory {
    Housing,
    Food,
    Transport,
    Utilities,
    Entertainment,
    Others,
}

impl ExpenseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Housing Rent",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Others => "Others",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Others => "others",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "housing" | "housing_rent" | "rent" => Ok(ExpenseCategory::Housing),
            "food" => Ok(ExpenseCategory::Food),
            "transport" => Ok(ExpenseCategory::Transport),
            "utilities" => Ok(ExpenseCategory::Utilities),
            "entertainment" => Ok(ExpenseCategory::Entertainment),
            "others" | "other" => Ok(ExpenseCategory::Others),
            _ => Err(value.to_string()),
        }
    }
}

/// Monthly spending per category. Categories that were never entered count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyExpenses {
    amounts: BTreeMap<ExpenseCategory, f64>,
}

impl MonthlyExpenses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: ExpenseCategory, amount: f64) -> Self {
        self.set(category, amount);
        self
    }

    /// Sets the amount for a category, replacing any earlier value.
    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        self.amounts.insert(category, amount);
    }

    pub fn contains(&self, category: ExpenseCategory) -> bool {
        self.amounts.contains_key(&category)
    }

    pub fn get(&self, category: ExpenseCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        self.amounts.iter().map(|(category, amount)| (*category, *amount))
    }

    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }
}
