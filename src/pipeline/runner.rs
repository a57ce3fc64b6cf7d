//! Training pipeline for maze agents

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    maze::Maze,
    ports::EpisodeObserver,
    q_learning::MazeAgent,
    types::Termination,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to run
    pub episodes: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { episodes: 500 }
    }
}

/// Per-episode record delivered to observers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index (0-based)
    pub episode: usize,
    /// Steps taken, the terminating step included
    pub steps: usize,
    /// How the episode ended
    pub termination: Termination,
    /// Sum of step rewards over the episode
    pub total_reward: i64,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes run
    pub episodes: usize,

    /// Episodes that ended at the goal
    pub goals_reached: usize,

    /// Episodes that exhausted the step cap
    pub step_cap_hits: usize,

    /// Fraction of episodes that reached the goal
    pub goal_rate: f64,

    /// Mean steps over goal-terminated episodes, if there were any
    pub mean_steps_to_goal: Option<f64>,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        episodes: usize,
        goals_reached: usize,
        step_cap_hits: usize,
        steps_in_goal_episodes: usize,
    ) -> Self {
        let goal_rate = if episodes > 0 {
            goals_reached as f64 / episodes as f64
        } else {
            0.0
        };
        let mean_steps_to_goal = if goals_reached > 0 {
            Some(steps_in_goal_episodes as f64 / goals_reached as f64)
        } else {
            None
        };

        Self {
            episodes,
            goals_reached,
            step_cap_hits,
            goal_rate,
            mean_steps_to_goal,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives an agent through a configured number of episodes, notifying
/// composable observers along the way.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn EpisodeObserver>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn EpisodeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and maze
    pub fn run(&mut self, agent: &mut MazeAgent, maze: &Maze) -> Result<TrainingResult> {
        let mut goals_reached = 0;
        let mut step_cap_hits = 0;
        let mut steps_in_goal_episodes = 0;

        // Notify observers of run start
        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let mut steps = 0;
            let mut total_reward: i64 = 0;
            let termination = loop {
                let outcome = agent.step(maze);
                steps += 1;
                total_reward += i64::from(outcome.reward);

                for observer in &mut self.observers {
                    observer.on_step(&outcome)?;
                }

                if let Some(termination) = outcome.termination {
                    break termination;
                }
            };

            match termination {
                Termination::Goal => {
                    goals_reached += 1;
                    steps_in_goal_episodes += steps;
                }
                Termination::StepCap => step_cap_hits += 1,
            }

            let summary = EpisodeSummary {
                episode,
                steps,
                termination,
                total_reward,
            };
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
        }

        // Notify observers of run end
        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            goals_reached,
            step_cap_hits,
            steps_in_goal_episodes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{q_learning::AgentConfig, types::Coordinate};

    #[test]
    fn test_training_pipeline_counts_every_episode() {
        let maze: Maze = "@..\n..G\n".parse().unwrap();
        let config = AgentConfig::default()
            .with_seed(42)
            .with_max_steps_per_episode(20);
        let mut agent = MazeAgent::new(&maze, Coordinate::new(0, 0), config).unwrap();

        let mut pipeline = TrainingPipeline::new(TrainingConfig { episodes: 10 });
        let result = pipeline.run(&mut agent, &maze).unwrap();

        assert_eq!(result.episodes, 10);
        assert_eq!(result.goals_reached + result.step_cap_hits, 10);
        assert_eq!(agent.episodes_completed(), 10);
    }

    #[test]
    fn test_result_rates() {
        let result = TrainingResult::new(10, 4, 6, 40);
        assert_eq!(result.goal_rate, 0.4);
        assert_eq!(result.mean_steps_to_goal, Some(10.0));

        let empty = TrainingResult::new(0, 0, 0, 0);
        assert_eq!(empty.goal_rate, 0.0);
        assert_eq!(empty.mean_steps_to_goal, None);
    }
}
