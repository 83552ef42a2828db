//! Daily state-advance rule for the production queue.
//!
//! Each applied day runs these steps in a fixed order:
//!
//! 1. age every order waiting in the backlog by one day
//! 2. advance every order in progress by one day and release finished ones
//! 3. compute idle lines from the capacity left after releases
//! 4. pull the oldest backlog orders onto idle lines
//! 5. append today's arrivals to the tail of the backlog
//! 6. emit the day's report
//!
//! Lines freed by today's completions can start backlog work today. Orders
//! arriving today cannot start before tomorrow.

use crate::core::errors::SimError;
use crate::core::report::DailyReport;
use crate::core::state::SimulationState;
use crate::core::types::{DayInput, WipEntry};

/// Days needed to drain `backlog_size` orders, assuming every line stays busy.
///
/// Returns `f64::INFINITY` when there are no lines. This is an upper-bound
/// heuristic, not a forecast.
pub fn estimate_days_to_clear(backlog_size: f64, num_lines: u32, cycle_time: u32) -> f64 {
    if num_lines == 0 {
        return f64::INFINITY;
    }
    (backlog_size / num_lines as f64).ceil() * cycle_time as f64
}

/// Apply one day to `state` and return its report.
///
/// On `InvalidInput` the state is left untouched.
pub fn advance_day(
    state: &mut SimulationState,
    cycle_time: i64,
    num_lines: i64,
    new_orders: f64,
) -> Result<DailyReport, SimError> {
    let label = (state.current_day() + 1).to_string();
    transition(state, label, cycle_time, num_lines, new_orders)
}

/// Same as [`advance_day`], keeping the caller's label on the report
pub fn advance_day_input(
    state: &mut SimulationState,
    input: &DayInput,
) -> Result<DailyReport, SimError> {
    transition(
        state,
        input.label.clone(),
        input.cycle_time,
        input.num_lines,
        input.new_orders,
    )
}

/// Checked day parameters
#[derive(Debug, Clone, Copy)]
struct DayParams {
    cycle_time: u32,
    num_lines: u32,
    new_orders: f64,
}

fn validate(label: &str, cycle_time: i64, num_lines: i64, new_orders: f64) -> Result<DayParams, SimError> {
    if cycle_time <= 0 {
        return Err(SimError::invalid(
            label,
            format!("production cycle time must be greater than zero, got {}", cycle_time),
        ));
    }
    let cycle_time = u32::try_from(cycle_time).map_err(|_| {
        SimError::invalid(label, format!("production cycle time {} is too large", cycle_time))
    })?;

    if num_lines < 0 {
        return Err(SimError::invalid(
            label,
            format!("number of production lines must be non-negative, got {}", num_lines),
        ));
    }
    let num_lines = u32::try_from(num_lines).map_err(|_| {
        SimError::invalid(label, format!("number of production lines {} is too large", num_lines))
    })?;

    if !new_orders.is_finite() || new_orders < 0.0 {
        return Err(SimError::invalid(
            label,
            format!("new orders must be a non-negative number, got {}", new_orders),
        ));
    }

    Ok(DayParams {
        cycle_time,
        num_lines,
        new_orders,
    })
}

fn transition(
    state: &mut SimulationState,
    label: String,
    cycle_time: i64,
    num_lines: i64,
    new_orders: f64,
) -> Result<DailyReport, SimError> {
    let params = validate(&label, cycle_time, num_lines, new_orders)?;
    let backlog_before = state.backlog_size();

    state.age_backlog();

    let mut finished = Vec::new();
    state.wip.retain_mut(|entry| {
        entry.remaining_cycle_days = entry.remaining_cycle_days.saturating_sub(1);
        if entry.remaining_cycle_days == 0 {
            finished.push(entry.age_in_backlog.saturating_add(entry.cycle_time));
            false
        } else {
            true
        }
    });
    state.completed += finished.len() as u64;
    state.customer_wait_times.extend_from_slice(&finished);

    let mut idle_lines = params.num_lines.saturating_sub(state.wip.len() as u32);
    let mut pulled = 0;
    while idle_lines > 0 {
        let Some(order) = state.pop_order() else {
            break;
        };
        state.wip.push(WipEntry {
            id: order.id,
            remaining_cycle_days: params.cycle_time,
            cycle_time: params.cycle_time,
            age_in_backlog: order.age_in_backlog,
        });
        idle_lines -= 1;
        pulled += 1;
    }

    state.admit(params.new_orders);
    state.day += 1;

    let backlog_after = state.backlog_size();
    let estimated_days_to_clear =
        estimate_days_to_clear(backlog_after, params.num_lines, params.cycle_time);
    let observed_wait_days = if finished.is_empty() {
        None
    } else {
        let total: u64 = finished.iter().map(|&w| w as u64).sum();
        Some(total as f64 / finished.len() as f64)
    };

    Ok(DailyReport {
        day: state.day,
        label,
        cycle_time: params.cycle_time,
        num_lines: params.num_lines,
        backlog_before,
        new_orders: params.new_orders,
        wip_count: state.wip.len(),
        remaining_work_days: format_remaining_work(&state.wip),
        completed_today: finished.len(),
        pulled_from_backlog: pulled,
        idle_lines,
        observed_wait_days,
        estimated_wait_days: estimated_days_to_clear + params.cycle_time as f64,
        backlog_after,
        estimated_days_to_clear,
    })
}

fn format_remaining_work(wip: &[WipEntry]) -> String {
    wip.iter()
        .map(|entry| format!("{}:{}", entry.id, entry.remaining_cycle_days))
        .collect::<Vec<_>>()
        .join("; ")
}
