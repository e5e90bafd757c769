/// Fixed-size candidate index sets
pub mod bitset;
/// Eager parallel classification of the candidate pool
pub mod classification;
/// Caches and progress display owned by one run
pub mod context;
/// Run configuration and the composition state machine
pub mod executor;
/// Nearest-color matching with neighbor consistency and usage tie-breaks
pub mod selection;
