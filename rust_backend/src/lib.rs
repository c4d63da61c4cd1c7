//! # Aurora Rust Backend
//!
//! Space-weather aggregation and aurora visibility estimation engine.
//!
//! This crate turns NASA DONKI solar-event feeds (solar flares, coronal mass
//! ejections and high-speed solar wind streams) into a heuristic geomagnetic
//! activity estimate (a Kp-index proxy) and converts it into per-location
//! aurora visibility forecasts.
//!
//! ## Architecture
//!
//! - [`core`]: Value types shared by every stage (events, snapshots, forecasts)
//! - [`parsing`]: Normalization of raw DONKI records into unified events
//! - [`algorithms`]: Selection of significant events and activity estimation
//! - [`services`]: Visibility forecasting, historical statistics and chart series
//! - [`time`]: Timestamp handling for DONKI payloads
//! - [`config`]: TOML configuration for the ingestion collaborator and watch-list
//! - [`ingest`]: Feed fetching (HTTP and file sources), behind the `donki-client` feature
//!
//! Data flows one way: raw records are normalized into a [`core::domain::SolarActivity`]
//! snapshot, which feeds the activity estimate and the forecaster. All computations in
//! `parsing`, `algorithms` and `services` are pure and hold no shared state.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
pub mod services;
pub mod time;

#[cfg(feature = "donki-client")]
pub mod ingest;
