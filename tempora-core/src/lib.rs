//! Core shared library for the tempora crates.
//!
//! This crate exposes the primitives every other tempora crate depends on:
//! the common error type, the duration and interpolation tags, configuration
//! loading, literal (de)serialization helpers and logging setup.

pub mod config;
pub mod errors;
pub mod kinds;
pub mod logging;
pub mod serde_utils;

pub use config::TemporaConfig;
pub use errors::{ConfigError, Result, TemporalError};
pub use kinds::{Interpolation, TemporalDuration};
