//! IPO Common - Shared configuration, error types, and logging for the IPO Monitor.
//!
//! This crate provides:
//! - Configuration types read from the process environment
//! - Error types and handling utilities
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, EmailConfig, ObservabilityConfig};
pub use error::{Error, Result};
