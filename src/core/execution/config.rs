//! Configuration for prodsim simulation runs
//!
//! This module provides configuration types for controlling how a run starts and
//! how batches of independent runs are executed.

use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes for scenario sweeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Sequential execution mode - scenarios run one after another on the calling thread
    Sequential,
    /// Parallel execution mode using Rayon - each scenario runs on a pool worker
    Rayon,
}

impl Default for ConcurrencyMode {
    fn default() -> Self {
        ConcurrencyMode::Sequential
    }
}

/// Configuration for simulation execution
///
/// A single run is always sequential; the concurrency settings only apply when
/// many runs are swept in one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Orders waiting in the backlog before day 1
    pub initial_backlog: u64,
    /// Stop after this many input records, if set
    pub max_days: Option<u64>,
    /// The concurrency mode to use for sweeps
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel sweeps
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// Default configuration starts with an empty backlog, no day limit and
    /// sequential sweeps
    pub fn new() -> Self {
        Self {
            initial_backlog: 0,
            max_days: None,
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
        }
    }

    pub fn with_initial_backlog(mut self, orders: u64) -> Self {
        self.initial_backlog = orders;
        self
    }

    pub fn with_max_days(mut self, days: u64) -> Self {
        self.max_days = Some(days);
        self
    }

    /// Set the concurrency mode for sweeps
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel sweeps
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
