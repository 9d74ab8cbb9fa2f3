pub mod metrics;
pub mod rng;
pub mod scroll;
