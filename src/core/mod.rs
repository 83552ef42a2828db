pub mod engine;
pub mod errors;
pub mod execution;
pub mod report;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
