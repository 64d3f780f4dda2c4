//! Team Optimizer
//!
//! Picks one scored player for each of the five roles so that the total
//! price stays within a budget and the summed metric is as high as possible.
//! The search is bounded by per-role shortlists; when nothing fits the
//! result carries a status explaining why.

pub mod assembly;
pub mod config;
pub mod error;
pub mod metric;
pub mod optimizer;
pub mod ranking;

#[cfg(test)]
mod tests;

pub use assembly::{evaluate_custom, TeamAssembly};
pub use config::OptimizerConfig;
pub use error::{OptimizerError, Result};
pub use metric::Metric;
pub use optimizer::{
    NamedAssemblies, OptimizationResult, OptimizationStatus, RegionalAssemblies, TeamOptimizer,
};
pub use ranking::top_by_role;
