//! Analytics module for tourism aggregates
//!
//! Filters record subsets, groups them by country, region, or month,
//! derives economic intensity, and produces ranked and compared views.
//!
//! ## Architecture
//!
//! - **Filter**: region / year / month-range predicates
//! - **Aggregator**: keyed partitions with summed counts and reduced stays
//! - **Calculator**: derived metrics and headline figures
//! - **Ranker / Comparison**: top-N selection and side-by-side alignment
//!
//! Every stage is a pure function of its input; nothing is cached between
//! filter changes.

mod types;

#[cfg(test)]
mod types_tests;

pub use types::*;

pub mod aggregator;
pub mod calculator;
pub mod comparison;
pub mod distribution;
pub mod filter;
pub mod insights;
pub mod ranker;


#[cfg(test)]
mod calculator_tests;




#[cfg(test)]
mod ranker_tests;
