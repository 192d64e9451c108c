//! Win-probability inputs: the external source seam, the ordered-pair cache
//! built once per run, and the dense matrix read by the trial loop.

pub mod cache;
pub mod source;

pub use cache::{CacheOptions, ProbabilityCache, ProbabilityMatrix};
pub use source::{ProbabilityEntry, ProbabilitySource, TableSource};
