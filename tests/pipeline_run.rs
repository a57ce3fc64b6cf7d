//! Integration tests for the training pipeline, observers, export, and the
//! convergence sanity property.

use qmaze::{
    AgentConfig, MazeAgent, StepOutcome, Termination, TrainingConfig, TrainingPipeline,
    TrainingResult,
    analysis::block_success_rates,
    export::episodes_csv,
    maze::layouts,
    pipeline::{SharedMetrics, TraceObserver},
};

#[test]
fn pipeline_collects_metrics_and_traces() {
    let maze = layouts::builtin("open").unwrap();
    let start = maze.start_marker().unwrap();
    let config = AgentConfig::default()
        .with_seed(5)
        .with_max_steps_per_episode(60);
    let mut agent = MazeAgent::new(&maze, start, config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.jsonl");

    let metrics = SharedMetrics::new();
    let mut pipeline = TrainingPipeline::new(TrainingConfig { episodes: 20 })
        .with_observer(Box::new(metrics.clone()))
        .with_observer(Box::new(TraceObserver::create(&trace_path).unwrap()));

    let result = pipeline.run(&mut agent, &maze).unwrap();

    let episodes = metrics.episodes();
    assert_eq!(episodes.len(), 20);
    assert_eq!(result.goals_reached + result.step_cap_hits, 20);

    // Each metrics entry matches the pipeline's accounting.
    let goals = episodes
        .iter()
        .filter(|e| e.termination == Termination::Goal)
        .count();
    assert_eq!(goals, result.goals_reached);

    // The trace holds one JSON object per step taken.
    let total_steps: usize = episodes.iter().map(|e| e.steps).sum();
    let trace_text = std::fs::read_to_string(&trace_path).unwrap();
    let outcomes: Vec<StepOutcome> = trace_text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(outcomes.len(), total_steps);

    // Terminating steps in the trace line up with the episode summaries.
    let terminations = outcomes.iter().filter(|o| o.termination.is_some()).count();
    assert_eq!(terminations, 20);
}

#[test]
fn episode_csv_roundtrips_through_disk() {
    let maze = layouts::builtin("open").unwrap();
    let start = maze.start_marker().unwrap();
    let config = AgentConfig::default()
        .with_seed(11)
        .with_max_steps_per_episode(40);
    let mut agent = MazeAgent::new(&maze, start, config).unwrap();

    let metrics = SharedMetrics::new();
    let mut pipeline = TrainingPipeline::new(TrainingConfig { episodes: 8 })
        .with_observer(Box::new(metrics.clone()));
    pipeline.run(&mut agent, &maze).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("episodes.csv");
    episodes_csv::write_episodes_to_path(&csv_path, &metrics.episodes()).unwrap();

    let text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("episode,steps,termination,total_reward")
    );
    assert_eq!(lines.count(), 8);
}

#[test]
fn training_result_json_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let result = TrainingResult::new(40, 30, 10, 450);
    result.save(&path).unwrap();
    let loaded = TrainingResult::load(&path).unwrap();

    assert_eq!(loaded.episodes, 40);
    assert_eq!(loaded.goals_reached, 30);
    assert_eq!(loaded.step_cap_hits, 10);
    assert_eq!(loaded.goal_rate, result.goal_rate);
    assert_eq!(loaded.mean_steps_to_goal, Some(15.0));
}

#[test]
fn goal_rate_is_nondecreasing_with_decaying_epsilon() {
    // Convergence sanity: on an unobstructed maze with epsilon decaying
    // toward zero, per-block goal rates trend upward. A small tolerance
    // absorbs sampling noise between blocks.
    let maze = layouts::builtin("open").unwrap();
    let start = maze.start_marker().unwrap();
    let config = AgentConfig::default()
        .with_learning_rate(0.5)
        .with_epsilon(0.8)
        .with_epsilon_decay(0.97)
        .with_min_epsilon(0.01)
        .with_max_steps_per_episode(100)
        .with_seed(2024);
    let mut agent = MazeAgent::new(&maze, start, config).unwrap();

    let metrics = SharedMetrics::new();
    let mut pipeline = TrainingPipeline::new(TrainingConfig { episodes: 300 })
        .with_observer(Box::new(metrics.clone()));
    pipeline.run(&mut agent, &maze).unwrap();

    let rates = block_success_rates(&metrics.episodes(), 100);
    assert_eq!(rates.len(), 3);
    for window in rates.windows(2) {
        assert!(
            window[1] >= window[0] - 0.05,
            "goal rate regressed across blocks: {rates:?}"
        );
    }
    assert!(
        rates.last().copied().unwrap() >= 0.9,
        "late blocks should almost always reach the goal: {rates:?}"
    );

    // After training, the greedy policy walks straight to the goal.
    let path = agent.greedy_path(&maze);
    assert_eq!(path.last(), Some(&agent.goal()));
}
