pub mod flat_file;

pub use flat_file::{LineError, Loaded, SkippedLine};
