// src/core/mod.rs
pub mod config;
pub mod policy;

pub use config::{Config, ConfigError};
pub use policy::{PolicyError, PolicyState};
