//! Use-case layer: drives a session against the generation gateway with the
//! availability-over-fidelity fallback policy.

pub mod fallback;
pub mod training;

pub use training::TrainingService;
