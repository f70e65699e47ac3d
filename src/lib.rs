// textsim: multi-metric text similarity
//
// This is the library root. `similarity` is the pure scoring engine; the
// other modules are the plumbing around it (accounts, config, terminal
// output, and the optional web API).

pub mod auth;
pub mod config;
pub mod output;
pub mod similarity;

#[cfg(feature = "web")]
pub mod web;

pub use similarity::comparer::{ComparisonReport, ComparisonResult, TextComparer};
