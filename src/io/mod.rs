pub mod csv_source;
pub mod demand;
pub mod report_sink;

// Re-export commonly used types
pub use csv_source::{load_days, read_days, DayRecord, SAMPLE_CSV};
pub use demand::{ArrivalModel, DemandProfile};
pub use report_sink::{write_outcome, write_outcome_file, ReportFormat};
