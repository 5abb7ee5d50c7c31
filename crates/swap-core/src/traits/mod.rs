//! Trait seams between subjects and the labelers that describe them.

pub mod reliability_source;

pub use reliability_source::ReliabilitySource;
