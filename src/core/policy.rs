// src/core/policy.rs
use thiserror::Error;

use crate::models::{CharClass, ClassSet};

pub const MIN_LENGTH: usize = 1;
pub const MAX_LENGTH: usize = 20;
pub const DEFAULT_LENGTH: usize = 10;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    #[error("at least one character class must stay enabled")]
    LastClassProtected,
}

/// Which character classes are enabled and how long passwords should be.
///
/// At least one class is always enabled and the length always lies in
/// `[MIN_LENGTH, MAX_LENGTH]`. The type is `Copy`, so readers work on a
/// snapshot and never observe a half-applied toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyState {
    length: usize,
    classes: ClassSet,
}

impl Default for PolicyState {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            classes: [CharClass::Upper].into_iter().collect(),
        }
    }
}

impl PolicyState {
    /// Builds a policy from raw values. Returns `None` for an empty class set.
    pub fn new(length: usize, classes: ClassSet) -> Option<Self> {
        if classes.is_empty() {
            return None;
        }
        Some(Self {
            length: clamp_length(length),
            classes,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn classes(&self) -> ClassSet {
        self.classes
    }

    pub fn is_enabled(&self, class: CharClass) -> bool {
        self.classes.contains(class)
    }

    /// Flips `class`. Disabling the only enabled class is refused and leaves
    /// the policy untouched.
    pub fn toggle(&mut self, class: CharClass) -> Result<(), PolicyError> {
        let enabled = !self.classes.contains(class);
        self.set_enabled(class, enabled)
    }

    pub fn set_enabled(&mut self, class: CharClass, enabled: bool) -> Result<(), PolicyError> {
        if enabled {
            self.classes.insert(class);
            return Ok(());
        }

        if self.classes.contains(class) && self.classes.len() == 1 {
            log::debug!("Refusing to disable {}: last enabled class", class);
            return Err(PolicyError::LastClassProtected);
        }

        self.classes.remove(class);
        Ok(())
    }

    /// Range-slider semantics: out of range values are clamped, never rejected.
    pub fn set_length(&mut self, length: usize) {
        self.length = clamp_length(length);
    }

    /// Position of the length slider, 0.0 at `MIN_LENGTH` and 1.0 at `MAX_LENGTH`.
    pub fn length_fraction(&self) -> f64 {
        (self.length - MIN_LENGTH) as f64 / (MAX_LENGTH - MIN_LENGTH) as f64
    }
}

pub fn clamp_length(length: usize) -> usize {
    length.clamp(MIN_LENGTH, MAX_LENGTH)
}
