pub mod backtrack;
pub mod error;
pub mod feasibility;
pub mod frequency;
pub mod growth;
pub mod insertion;
pub mod metric;

pub use error::{Error, Result};
pub use frequency::{observed_frequency, FrequencyPartition};
pub use growth::{grow, DiscardSink, GrowthConfig, GrowthPolicy, GrowthRecord, RecordSink};
