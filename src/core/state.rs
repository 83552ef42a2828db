use crate::core::types::{BacklogCohort, BacklogOrder, OrderId, WipEntry};
use std::collections::VecDeque;

/// Fractional carries closer than this to a whole order are rounded up, so
/// rates like 0.1/day materialise an order after ten days despite f64 drift.
const FRACTION_EPSILON: f64 = 1e-9;

/// Mutable state of one simulation run.
///
/// Holds the FIFO backlog, the orders currently occupying production lines and
/// the completion log. Each run owns its own state; nothing here is shared
/// between runs.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Waiting orders grouped by arrival day, oldest cohort first
    pub(crate) backlog: VecDeque<BacklogCohort>,
    /// Total orders across all cohorts
    pub(crate) backlog_len: u64,
    /// Fractional part of arrivals not yet materialised as a discrete order
    pub(crate) pending_fraction: f64,
    pub(crate) wip: Vec<WipEntry>,
    pub(crate) completed: u64,
    /// Total wait (backlog age + cycle time) of every completed order, in completion order
    pub(crate) customer_wait_times: Vec<u32>,
    pub(crate) next_order_id: u64,
    /// Number of days applied so far
    pub(crate) day: u64,
}

impl SimulationState {
    /// Create a fresh state with `initial_backlog` orders waiting and no WIP
    pub fn new(initial_backlog: u64) -> Self {
        let mut state = Self {
            backlog: VecDeque::new(),
            backlog_len: 0,
            pending_fraction: 0.0,
            wip: Vec::new(),
            completed: 0,
            customer_wait_times: Vec::new(),
            next_order_id: 1,
            day: 0,
        };
        state.push_cohort(initial_backlog);
        state
    }

    /// Backlog size including any fractional carry
    pub fn backlog_size(&self) -> f64 {
        self.backlog_len as f64 + self.pending_fraction
    }

    /// Number of discrete orders waiting
    pub fn backlog_len(&self) -> u64 {
        self.backlog_len
    }

    pub fn backlog(&self) -> impl Iterator<Item = &BacklogCohort> {
        self.backlog.iter()
    }

    pub fn wip(&self) -> &[WipEntry] {
        &self.wip
    }

    pub fn wip_count(&self) -> usize {
        self.wip.len()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn customer_wait_times(&self) -> &[u32] {
        &self.customer_wait_times
    }

    /// Number of days applied to this state
    pub fn current_day(&self) -> u64 {
        self.day
    }

    pub(crate) fn age_backlog(&mut self) {
        for cohort in self.backlog.iter_mut() {
            cohort.age_in_backlog = cohort.age_in_backlog.saturating_add(1);
        }
    }

    /// Take the oldest waiting order off the backlog
    pub(crate) fn pop_order(&mut self) -> Option<BacklogOrder> {
        let cohort = self.backlog.front_mut()?;
        let order = BacklogOrder {
            id: cohort.first_id,
            age_in_backlog: cohort.age_in_backlog,
        };
        cohort.first_id = OrderId(cohort.first_id.0.wrapping_add(1));
        cohort.count -= 1;
        if cohort.count == 0 {
            self.backlog.pop_front();
        }
        self.backlog_len -= 1;
        Some(order)
    }

    /// Append `count` arrivals to the tail of the backlog.
    ///
    /// Whole orders enter immediately as one cohort; the fractional remainder
    /// is carried until it adds up to a whole order.
    pub(crate) fn admit(&mut self, count: f64) -> u64 {
        let total = self.pending_fraction + count;
        let mut whole = total.floor();
        let mut fraction = total - whole;
        if 1.0 - fraction < FRACTION_EPSILON {
            whole += 1.0;
            fraction = 0.0;
        }
        self.pending_fraction = fraction;

        // Saturates for arrivals beyond u64::MAX
        let whole = whole as u64;
        self.push_cohort(whole)
    }

    fn push_cohort(&mut self, count: u64) -> u64 {
        let count = count.min(u64::MAX - self.backlog_len);
        if count == 0 {
            return 0;
        }
        self.backlog.push_back(BacklogCohort {
            first_id: OrderId(self.next_order_id),
            count,
            age_in_backlog: 0,
        });
        self.next_order_id = self.next_order_id.saturating_add(count);
        self.backlog_len += count;
        count
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(0)
    }
}
