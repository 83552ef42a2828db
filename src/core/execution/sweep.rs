use crate::core::execution::config::{ConcurrencyMode, SimulationConfig};
use crate::core::execution::simulation_engine::{RunOutcome, SimulationEngine};
use crate::core::types::DayInput;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// One independent run in a sweep
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub initial_backlog: u64,
    pub days: Vec<DayInput>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, initial_backlog: u64, days: Vec<DayInput>) -> Self {
        Self {
            name: name.into(),
            initial_backlog,
            days,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub run_id: Uuid,
    pub name: String,
    pub outcome: RunOutcome,
}

fn run_scenario(scenario: &Scenario, config: &SimulationConfig) -> ScenarioResult {
    let run_config = config.clone().with_initial_backlog(scenario.initial_backlog);
    let outcome = SimulationEngine::new(&run_config).run(&scenario.days);
    ScenarioResult {
        run_id: Uuid::new_v4(),
        name: scenario.name.clone(),
        outcome,
    }
}

/// Run every scenario on its own isolated state.
///
/// Results come back in scenario order whatever the concurrency mode.
pub fn run_sweep(scenarios: &[Scenario], config: &SimulationConfig) -> Vec<ScenarioResult> {
    info!(
        "Sweeping {} scenarios ({:?})",
        scenarios.len(),
        config.concurrency_mode
    );

    match config.concurrency_mode {
        ConcurrencyMode::Sequential => scenarios
            .iter()
            .map(|scenario| run_scenario(scenario, config))
            .collect(),
        ConcurrencyMode::Rayon => {
            let sweep = || -> Vec<ScenarioResult> {
                scenarios
                    .par_iter()
                    .map(|scenario| run_scenario(scenario, config))
                    .collect()
            };
            match config.thread_pool_size {
                Some(size) => match rayon::ThreadPoolBuilder::new().num_threads(size).build() {
                    Ok(pool) => pool.install(sweep),
                    Err(err) => {
                        warn!("Failed to build {}-thread pool ({}), using the global pool", size, err);
                        sweep()
                    }
                },
                None => sweep(),
            }
        }
    }
}
