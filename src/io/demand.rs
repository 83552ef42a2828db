use crate::core::errors::SimError;
use crate::core::types::DayInput;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

/// How daily arrivals are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrivalModel {
    /// Every day receives exactly the mean, fractional rates included
    Fixed,
    /// Whole-order arrivals drawn from a Poisson distribution around the mean
    Poisson,
}

impl Default for ArrivalModel {
    fn default() -> Self {
        ArrivalModel::Fixed
    }
}

/// Synthetic demand with constant capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    pub cycle_time: i64,
    pub num_lines: i64,
    pub mean_daily_orders: f64,
    pub arrival_model: ArrivalModel,
    pub seed: u64,
}

impl DemandProfile {
    pub fn new(cycle_time: i64, num_lines: i64, mean_daily_orders: f64) -> Self {
        Self {
            cycle_time,
            num_lines,
            mean_daily_orders,
            arrival_model: ArrivalModel::default(),
            seed: 42,
        }
    }

    pub fn with_arrival_model(mut self, model: ArrivalModel) -> Self {
        self.arrival_model = model;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate `days` inputs labelled `day-1`, `day-2`, ...
    ///
    /// The same seed always yields the same sequence.
    pub fn generate(&self, days: u64) -> Result<Vec<DayInput>, SimError> {
        let mut next_arrivals: Box<dyn FnMut() -> f64> = match self.arrival_model {
            ArrivalModel::Fixed => {
                let mean = self.mean_daily_orders;
                Box::new(move || mean)
            }
            ArrivalModel::Poisson if self.mean_daily_orders == 0.0 => Box::new(|| 0.0),
            ArrivalModel::Poisson => {
                let poisson = Poisson::new(self.mean_daily_orders).map_err(|e| {
                    SimError::Config(format!("invalid Poisson mean {}: {}", self.mean_daily_orders, e))
                })?;
                let mut rng = StdRng::seed_from_u64(self.seed);
                Box::new(move || poisson.sample(&mut rng))
            }
        };

        Ok((1..=days)
            .map(|day| {
                DayInput::new(
                    format!("day-{}", day),
                    self.cycle_time,
                    self.num_lines,
                    next_arrivals(),
                )
            })
            .collect())
    }
}
