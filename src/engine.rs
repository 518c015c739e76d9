//! File discovery and per-file configuration calculation

pub mod executor;
pub mod file_walker;

pub use executor::{CalculationResult, ConfigCalculator, FileReport};
pub use file_walker::{FileEntry, FileWalker, FileWalkerError};
