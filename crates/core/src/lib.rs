//! Core utilities for Carrot build-configuration tools
//!
//! This crate provides the shared functionality of the Carrot Android tooling:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Properties files**: Java-properties decoding and `local.properties` loading
//! - **Configuration**: TOML-based tool configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use carrot_core::properties::LocalProperties;
//!
//! // A missing local.properties is not an error: the set is simply empty.
//! let props = LocalProperties::load("local.properties".as_ref()).expect("parse failed");
//! let key = props.get("google.maps.apiKey").unwrap_or("");
//! println!("maps key: {key}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod properties;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::properties::{LocalProperties, PropertySet};
}
