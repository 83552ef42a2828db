use crate::core::state::SimulationState;
use serde::Serialize;

/// Immutable record produced for every applied day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    /// 1-based index of the applied day
    pub day: u64,
    pub label: String,
    pub cycle_time: u32,
    pub num_lines: u32,
    pub backlog_before: f64,
    pub new_orders: f64,
    pub wip_count: usize,
    /// `Order<id>:<days left>` for each order in progress, `; `-separated
    pub remaining_work_days: String,
    pub completed_today: usize,
    pub pulled_from_backlog: usize,
    pub idle_lines: u32,
    /// Mean total wait of the orders completed today
    pub observed_wait_days: Option<f64>,
    /// Upper-bound wait for an order arriving today: time to clear the
    /// backlog ahead of it plus one cycle
    pub estimated_wait_days: f64,
    pub backlog_after: f64,
    pub estimated_days_to_clear: f64,
}

/// End-of-run aggregates handed to the output sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub days_simulated: u64,
    pub days_skipped: u64,
    pub total_completed: u64,
    pub starting_backlog: f64,
    pub ending_backlog: f64,
    pub ending_wip: usize,
    pub peak_wip: usize,
    pub idle_line_days: u64,
    pub min_wait_days: Option<u32>,
    pub max_wait_days: Option<u32>,
    pub average_wait_days: Option<f64>,
}

impl RunSummary {
    pub fn from_run(
        state: &SimulationState,
        starting_backlog: f64,
        reports: &[DailyReport],
        days_skipped: u64,
    ) -> Self {
        let waits = state.customer_wait_times();
        let average_wait_days = if waits.is_empty() {
            None
        } else {
            let total: u64 = waits.iter().map(|&w| w as u64).sum();
            Some(total as f64 / waits.len() as f64)
        };

        Self {
            days_simulated: state.current_day(),
            days_skipped,
            total_completed: state.completed(),
            starting_backlog,
            ending_backlog: state.backlog_size(),
            ending_wip: state.wip_count(),
            peak_wip: reports.iter().map(|r| r.wip_count).max().unwrap_or(0),
            idle_line_days: reports.iter().map(|r| r.idle_lines as u64).sum(),
            min_wait_days: waits.iter().copied().min(),
            max_wait_days: waits.iter().copied().max(),
            average_wait_days,
        }
    }
}
