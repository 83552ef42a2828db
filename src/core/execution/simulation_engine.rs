use crate::core::engine::advance_day_input;
use crate::core::errors::SimError;
use crate::core::execution::config::SimulationConfig;
use crate::core::report::{DailyReport, RunSummary};
use crate::core::state::SimulationState;
use crate::core::types::DayInput;
use log::{debug, info, warn};
use serde::Serialize;

/// Observer trait for simulation days
pub trait DayObserver {
    /// Called after a day has been applied
    fn on_day_complete(&mut self, report: &DailyReport);

    /// Called when a day was rejected and skipped
    fn on_day_skipped(&mut self, _record_index: usize, _error: &SimError) {}
}

/// A day that was rejected and left out of the run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDay {
    /// Position of the record in the input sequence
    pub record_index: usize,
    pub reason: String,
}

/// Everything a finished run hands to the output sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub reports: Vec<DailyReport>,
    pub skipped: Vec<SkippedDay>,
    pub summary: RunSummary,
}

/// Drives one simulation run over a sequence of day inputs.
///
/// Invalid days are skipped; the run continues with the existing state.
pub struct SimulationEngine {
    state: SimulationState,
    starting_backlog: f64,
    max_days: Option<u64>,
    reports: Vec<DailyReport>,
    skipped: Vec<SkippedDay>,
    records_seen: usize,
    observers: Vec<Box<dyn DayObserver>>,
}

impl SimulationEngine {
    pub fn new(config: &SimulationConfig) -> Self {
        let state = SimulationState::new(config.initial_backlog);
        Self {
            starting_backlog: state.backlog_size(),
            state,
            max_days: config.max_days,
            reports: Vec::new(),
            skipped: Vec::new(),
            records_seen: 0,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn DayObserver>) {
        self.observers.push(observer);
    }

    /// Process one input record
    pub fn step(&mut self, input: &DayInput) -> Result<DailyReport, SimError> {
        let record_index = self.records_seen;
        self.records_seen += 1;

        match advance_day_input(&mut self.state, input) {
            Ok(report) => {
                debug!(
                    "=== Day {} ({}) === backlog {:.2} -> {:.2}, wip {}, done {}, pulled {}, idle {}",
                    report.day,
                    report.label,
                    report.backlog_before,
                    report.backlog_after,
                    report.wip_count,
                    report.completed_today,
                    report.pulled_from_backlog,
                    report.idle_lines
                );
                for observer in &mut self.observers {
                    observer.on_day_complete(&report);
                }
                self.reports.push(report.clone());
                Ok(report)
            }
            Err(err) => {
                self.record_skip(record_index, &err);
                Err(err)
            }
        }
    }

    /// Record a day the input source could not type, without touching state
    pub fn skip(&mut self, err: &SimError) {
        let record_index = self.records_seen;
        self.records_seen += 1;
        self.record_skip(record_index, err);
    }

    fn record_skip(&mut self, record_index: usize, err: &SimError) {
        warn!("Skipping record {}: {}", record_index, err);
        for observer in &mut self.observers {
            observer.on_day_skipped(record_index, err);
        }
        self.skipped.push(SkippedDay {
            record_index,
            reason: err.to_string(),
        });
    }

    /// Run every input through the engine, honouring `max_days`
    pub fn run<'a, I>(mut self, inputs: I) -> RunOutcome
    where
        I: IntoIterator<Item = &'a DayInput>,
    {
        for input in inputs {
            if self.limit_reached() {
                break;
            }
            // Invalid days are already recorded in `skipped`
            if let Err(err) = self.step(input) {
                if !err.is_recoverable() {
                    break;
                }
            }
        }
        self.finish()
    }

    /// Whether the configured record limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.max_days
            .map_or(false, |max| self.records_seen as u64 >= max)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn reports(&self) -> &[DailyReport] {
        &self.reports
    }

    pub fn skipped(&self) -> &[SkippedDay] {
        &self.skipped
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_run(
            &self.state,
            self.starting_backlog,
            &self.reports,
            self.skipped.len() as u64,
        )
    }

    /// Consume the engine and produce the run outcome
    pub fn finish(self) -> RunOutcome {
        let summary = self.summary();
        info!(
            "Run finished: {} days simulated, {} skipped, {} orders completed, backlog {:.2} -> {:.2}",
            summary.days_simulated,
            summary.days_skipped,
            summary.total_completed,
            summary.starting_backlog,
            summary.ending_backlog
        );
        match (summary.min_wait_days, summary.max_wait_days, summary.average_wait_days) {
            (Some(min), Some(max), Some(avg)) => {
                info!("Customer wait (days): min {}, max {}, average {:.2}", min, max, avg)
            }
            _ => info!("Customer wait (days): no orders completed"),
        }
        RunOutcome {
            reports: self.reports,
            skipped: self.skipped,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        completed: Vec<u64>,
        skipped: Vec<usize>,
    }

    struct RecordingObserver(Rc<RefCell<Recorder>>);

    impl DayObserver for RecordingObserver {
        fn on_day_complete(&mut self, report: &DailyReport) {
            self.0.borrow_mut().completed.push(report.day);
        }

        fn on_day_skipped(&mut self, record_index: usize, _error: &SimError) {
            self.0.borrow_mut().skipped.push(record_index);
        }
    }

    fn sample_days() -> Vec<DayInput> {
        vec![
            DayInput::new("2023-01-01", 5, 3, 10.0),
            DayInput::new("2023-01-02", 0, 3, 8.0),
            DayInput::new("2023-01-03", 5, 3, 12.0),
        ]
    }

    #[test]
    fn test_run_skips_invalid_days() {
        let config = SimulationConfig::new().with_initial_backlog(20);
        let outcome = SimulationEngine::new(&config).run(&sample_days());

        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[0].label, "2023-01-01");
        assert_eq!(outcome.reports[1].label, "2023-01-03");
        assert_eq!(outcome.reports[1].day, 2);
        // Skipped day changed nothing: day 3 starts from day 1's backlog
        assert_eq!(outcome.reports[1].backlog_before, 27.0);
        assert_eq!(outcome.reports[1].backlog_after, 39.0);

        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].record_index, 1);
        assert!(outcome.skipped[0].reason.contains("2023-01-02"));

        assert_eq!(outcome.summary.days_simulated, 2);
        assert_eq!(outcome.summary.days_skipped, 1);
        assert_eq!(outcome.summary.starting_backlog, 20.0);
        assert_eq!(outcome.summary.ending_backlog, 39.0);
    }

    #[test]
    fn test_max_days_limits_records() {
        let config = SimulationConfig::new().with_max_days(2);
        let outcome = SimulationEngine::new(&config).run(&sample_days());

        // The limit counts records, including the skipped one
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn test_observers_are_notified() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut engine = SimulationEngine::new(&SimulationConfig::new());
        engine.add_observer(Box::new(RecordingObserver(recorder.clone())));

        for day in sample_days() {
            let _ = engine.step(&day);
        }
        engine.skip(&SimError::invalid("2023-01-04", "missing field"));

        let recorder = recorder.borrow();
        assert_eq!(recorder.completed, vec![1, 2]);
        assert_eq!(recorder.skipped, vec![1, 3]);
        assert_eq!(engine.skipped().len(), 2);
        assert_eq!(engine.reports().len(), 2);
    }
}
