//! Console output formatting for CLI commands

use crate::{maze::Maze, pipeline::TrainingResult, q_learning::MazeAgent};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:22} {}", format!("{}:", key), value);
}

/// Print the result of a training run.
pub fn print_training_summary(result: &TrainingResult, agent: &MazeAgent) {
    print_section("Training Summary");
    print_kv("episodes", &result.episodes.to_string());
    print_kv(
        "goals reached",
        &format!("{} ({:.1}%)", result.goals_reached, result.goal_rate * 100.0),
    );
    print_kv("step-cap resets", &result.step_cap_hits.to_string());
    match result.mean_steps_to_goal {
        Some(mean) => print_kv("mean steps to goal", &format!("{mean:.1}")),
        None => print_kv("mean steps to goal", "n/a"),
    }
    print_kv("policy", agent.policy_name());
    if let Some(epsilon) = agent.exploration_rate() {
        print_kv("final epsilon", &format!("{epsilon:.4}"));
    }
}

/// Print per-block goal rates.
pub fn print_block_rates(rates: &[f64], block_size: usize) {
    if rates.is_empty() {
        return;
    }
    println!("\nGoal rate per block of {block_size} episodes:");
    let formatted: Vec<String> = rates.iter().map(|r| format!("{r:.2}")).collect();
    println!("  {}", formatted.join(" "));
}

/// Render the maze with the agent's greedy path overlaid and report whether
/// the path reaches the goal.
pub fn print_greedy_path(agent: &MazeAgent, maze: &Maze) {
    let path = agent.greedy_path(maze);
    let reached = path.last() == Some(&agent.goal());

    print_section("Greedy Path");
    print!("{}", maze.render_with_path(&path));
    if reached {
        println!("reaches the goal in {} steps", path.len() - 1);
    } else {
        println!("does not reach the goal within the step cap");
    }
}
