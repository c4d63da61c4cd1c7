//! Core domain models for space-weather forecasting.
//!
//! This module defines the value types passed between the normalizer, the activity
//! aggregator, the forecaster and the statistics roll-up.

pub mod domain;

#[cfg(test)]
mod domain_tests;
