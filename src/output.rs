//! Output formatters (human and JSON/JSONL)

pub mod human;
pub mod jsonl;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
