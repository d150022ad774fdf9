pub mod error;
pub mod profile;
pub mod stats;
pub mod types;

pub use error::*;
pub use profile::*;
pub use stats::SampleSummary;
pub use types::*;
