//! Core types, errors, and configuration for the mangen manifest generator.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - [`ExtensionSet`]: normalized, case-insensitive file extension filter
//! - [`SplitSpec`]: validated train/val/test split ratios
//! - [`ScanRequest`], [`OutputConfig`], [`Config`]: immutable run configuration
//! - [`ConfigError`]: configuration validation failures
//!
//! Everything here is validated at construction time, so downstream crates
//! can assume a well-formed configuration.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod config;
mod error;
mod extensions;
mod split;

pub use config::{Config, OutputConfig, ScanRequest};
pub use error::ConfigError;
pub use extensions::{DEFAULT_EXTENSIONS, ExtensionSet, normalize_extension};
pub use split::{SPLIT_SUM_TOLERANCE, SplitSpec};
