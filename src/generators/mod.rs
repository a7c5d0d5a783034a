// src/generators/mod.rs
pub mod charset;
pub mod password;
pub mod strength;

pub use password::{GenError, PasswordGenerator};
