// src/lib.rs
//! Random password generation from a character class policy, with a coarse
//! strength rating and a cancellable scrambled reveal for display hosts.

pub mod cli;
pub mod core;
pub mod engine;
pub mod generators;
pub mod models;
pub mod reveal;
pub mod utils;

pub use crate::core::config::Config;
pub use crate::core::policy::{PolicyError, PolicyState};
pub use crate::engine::{Engine, EngineError, SharedEngine};
pub use crate::generators::GenError;
pub use crate::models::{CharClass, ClassSet, StrengthTier};
pub use crate::reveal::{RevealEvent, RevealScheduler, RevealState, SessionHandle};
