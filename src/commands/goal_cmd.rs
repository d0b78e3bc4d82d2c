use crate::commands::CommandError;
use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_goal_progress;
use crate::domain::savings_goal::SavingsGoal;
use crate::services::summary::GoalProgress;

pub fn goal_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Goal {
        name,
        target,
        current,
    } = cmd
    {
        let goal = SavingsGoal::new(name, target, current);
        let progress = GoalProgress {
            progress_percent: goal.progress_percent(),
            name: goal.name,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
        };
        match format_goal_progress(&progress) {
            Some(line) => println!("{line}"),
            None => println!("Set a target amount above zero to track '{}'.", progress.name),
        }
    }
    Ok(())
}
