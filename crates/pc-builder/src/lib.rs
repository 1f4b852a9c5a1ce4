//! Hardware catalog and build assessment for PC assembly.
//!
//! [`catalog`] hydrates typed component records from CSV exports, [`builds`] turns a user's
//! selection into compatibility findings and power, price, and performance metrics.

pub mod builds;
pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod telemetry;
