// src/engine.rs
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand_chacha::{ChaCha20Rng, ChaCha8Rng};
use thiserror::Error;

use crate::core::config::{Config, ConfigError};
use crate::core::policy::{PolicyError, PolicyState};
use crate::generators::{GenError, PasswordGenerator};
use crate::models::{CharClass, GenerationReport, StrengthTier};
use crate::reveal::{self, RevealEvent, RevealScheduler, RevealState, SessionHandle};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Engine guarded for hosts that touch it from several threads.
pub type SharedEngine = Arc<Mutex<Engine>>;

/// The host facing side of the generator: policy edits, strength lookups
/// and generation with an animated reveal.
///
/// The engine keeps no copy of generated passwords beyond the reveal
/// session that is disclosing them.
pub struct Engine {
    policy: PolicyState,
    generator: PasswordGenerator<ChaCha20Rng>,
    scheduler: RevealScheduler<ChaCha8Rng>,
    tick_interval: Duration,
}

impl Engine {
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::from_parts(
            config,
            PasswordGenerator::new(),
            RevealScheduler::new(config.reveal_ticks_per_char),
        ))
    }

    /// Builds an engine around caller supplied generators, e.g. seeded ones.
    pub fn from_parts(
        config: &Config,
        generator: PasswordGenerator<ChaCha20Rng>,
        scheduler: RevealScheduler<ChaCha8Rng>,
    ) -> Self {
        Self {
            policy: config.initial_policy(),
            generator,
            scheduler,
            tick_interval: config.reveal_interval,
        }
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    /// Snapshot of the current policy.
    pub fn policy(&self) -> PolicyState {
        self.policy
    }

    pub fn set_class_enabled(&mut self, class: CharClass, enabled: bool) -> Result<(), PolicyError> {
        self.policy.set_enabled(class, enabled)?;
        log::debug!(
            "Class {} {}; strength now {:?}",
            class,
            if enabled { "enabled" } else { "disabled" },
            self.current_strength()
        );
        Ok(())
    }

    pub fn toggle_class(&mut self, class: CharClass) -> Result<(), PolicyError> {
        let enabled = !self.policy.is_enabled(class);
        self.set_class_enabled(class, enabled)
    }

    pub fn set_length(&mut self, length: usize) {
        self.policy.set_length(length);
        log::debug!("Password length set to {}", self.policy.length());
    }

    pub fn current_strength(&self) -> StrengthTier {
        self.generator.analyze_strength(&self.policy)
    }

    /// Generates a password for the current policy and starts revealing it.
    /// A reveal still in flight is cancelled first.
    pub fn request_generation(&mut self) -> Result<SessionHandle, EngineError> {
        let password = self.generate()?;
        Ok(self.scheduler.start(&password))
    }

    /// Generates a password without any reveal.
    pub fn generate(&mut self) -> Result<String, EngineError> {
        let policy = self.policy;
        log::info!(
            "Generating {}-character password from {} class(es)",
            policy.length(),
            policy.classes().len()
        );
        self.generator
            .generate_password(&policy)
            .map_err(|e| {
                log::error!("Password generation failed: {}", e);
                EngineError::from(e)
            })
    }

    /// Generates a password and summarises it for machine readable output.
    pub fn generate_report(&mut self) -> Result<GenerationReport, EngineError> {
        let password = self.generate()?;
        Ok(GenerationReport {
            length: password.chars().count(),
            password,
            classes: self.policy.classes(),
            strength: self.current_strength(),
            generated_at: Utc::now(),
        })
    }

    /// Advances the active reveal by one step.
    pub fn tick(&mut self) -> Option<RevealEvent> {
        self.scheduler.tick()
    }

    pub fn cancel(&mut self, handle: SessionHandle) -> bool {
        self.scheduler.cancel(handle)
    }

    pub fn reveal_state(&self) -> RevealState {
        self.scheduler.state()
    }

    /// Paces the active reveal on the tokio timer until it completes or
    /// `cancel` is raised.
    pub async fn animate<F>(&mut self, cancel: &AtomicBool, on_event: F) -> Option<String>
    where
        F: FnMut(&RevealEvent),
    {
        reveal::drive(&mut self.scheduler, self.tick_interval, cancel, on_event).await
    }
}
