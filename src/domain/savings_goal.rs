#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: f64, current_amount: f64) -> Self {
        Self {
            name: name.into(),
            target_amount,
            current_amount,
        }
    }

    /// Percentage of the target already saved. `None` when the target is not positive.
    pub fn progress_percent(&self) -> Option<f64> {
        if self.target_amount > 0.0 {
            Some(self.current_amount / self.target_amount * 100.0)
        } else {
            None
        }
    }
}
