//! Keyed stores of agents (the bureau) and subjects (the collection).
//! Members are created lazily on first sight and never deleted online.

pub mod bureau;
pub mod collection;

pub use bureau::Bureau;
pub use collection::{Census, Collection};
