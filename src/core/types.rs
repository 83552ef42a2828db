use serde::{Deserialize, Serialize};

/// Monotonic order identifier, assigned when an order enters the backlog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub(crate) u64);

impl OrderId {
    /// Get the raw numeric id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Order{}", self.0)
    }
}

/// An order taken off the front of the backlog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogOrder {
    pub id: OrderId,
    /// Days spent in the backlog so far
    pub age_in_backlog: u32,
}

/// A run of consecutive orders that entered the backlog on the same day.
///
/// Orders in a cohort share one age, so the backlog holds one entry per
/// arrival day instead of one per order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogCohort {
    /// Id of the oldest order still waiting in the cohort
    pub first_id: OrderId,
    pub count: u64,
    pub age_in_backlog: u32,
}

impl BacklogCohort {
    /// Ids of the orders in the cohort, oldest first
    pub fn ids(&self) -> impl Iterator<Item = OrderId> {
        let first = self.first_id.0;
        (0..self.count).map(move |offset| OrderId(first.wrapping_add(offset)))
    }
}

/// An order occupying a production line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WipEntry {
    pub id: OrderId,
    pub remaining_cycle_days: u32,
    /// Cycle time the order was started with
    pub cycle_time: u32,
    /// Days the order waited in the backlog before it was started
    pub age_in_backlog: u32,
}

/// Caller-supplied parameters for one simulated day.
///
/// Values arrive already typed but unchecked; `advance_day` rejects anything
/// outside the allowed ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayInput {
    /// Date or other caller label for the day
    pub label: String,
    pub cycle_time: i64,
    pub num_lines: i64,
    pub new_orders: f64,
}

impl DayInput {
    pub fn new(label: impl Into<String>, cycle_time: i64, num_lines: i64, new_orders: f64) -> Self {
        Self {
            label: label.into(),
            cycle_time,
            num_lines,
            new_orders,
        }
    }
}
