pub mod builder;
pub mod config;
pub mod container;
pub mod error;
pub mod harness;
pub mod key;
pub mod memory_usage;
pub mod presence;
pub mod random;
pub mod similarity;
pub mod workload;

pub use error::*;
pub use random::{RandomSource, SeededRandom};
