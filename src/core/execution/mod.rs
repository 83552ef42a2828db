pub mod config;
pub mod simulation_engine;
pub mod sweep;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use simulation_engine::{DayObserver, RunOutcome, SimulationEngine, SkippedDay};
pub use sweep::{run_sweep, Scenario, ScenarioResult};
