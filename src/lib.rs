pub mod core;
pub mod io;

// Re-export commonly used types
pub use crate::core::engine::{advance_day, advance_day_input, estimate_days_to_clear};
pub use crate::core::errors::SimError;
pub use crate::core::execution::{
    run_sweep, ConcurrencyMode, DayObserver, RunOutcome, Scenario, ScenarioResult,
    SimulationConfig, SimulationEngine,
};
pub use crate::core::report::{DailyReport, RunSummary};
pub use crate::core::state::SimulationState;
pub use crate::core::types::{DayInput, OrderId};
