//! Core building blocks: pipeline parameters, depth sampling, and the
//! accumulator that merges samples into the persisted table. These are
//! consumed by the high-level `api` module.
pub mod accumulate;
pub mod params;
pub mod sampling;
