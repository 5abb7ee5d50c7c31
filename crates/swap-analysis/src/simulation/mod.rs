//! Synthetic classification streams for dry runs.

pub mod toy;

pub use toy::{ToyConfig, ToyLabeler, ToyStream};
