//! Android build-configuration behavior for Carrot
//!
//! This crate provides the Android-specific pieces of the build tooling:
//! - Maps API-key resolution and string-resource generation
//! - Signing-config resolution with the debug fallback for release builds

#![warn(missing_docs)]

pub mod res_value;
pub mod signing;
