//! Data module - CSV loading, cleaning and diagnostics

pub mod columns;
mod diagnostics;
mod loader;
mod processor;

pub use diagnostics::{ColumnInfo, DiagnosticReport};
pub use loader::DataLoader;
pub use processor::DataProcessor;
