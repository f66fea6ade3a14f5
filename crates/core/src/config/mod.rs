//! Configuration loading and schema definitions
//!
//! Tool configuration for the Carrot Android build tooling.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
