// src/reveal/mod.rs
//! Time-sliced disclosure of a freshly generated password.
//!
//! A [`RevealScheduler`] owns at most one session. Every call to
//! [`RevealScheduler::tick`] advances the active session by one step and
//! yields either a scrambled frame or, once every character is resolved,
//! the final value. The scheduler never sleeps; [`driver::drive`] paces the
//! ticks on a tokio timer.

pub mod driver;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::NOISE;

pub use driver::drive;

pub const DEFAULT_TICKS_PER_CHAR: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Idle,
    Revealing,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// Intermediate frame, same length as the target.
    Frame(String),
    /// Terminal event carrying the target, emitted once per session.
    Completed(String),
}

/// Identifies one session started on a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

// The target is dropped as soon as the session completes or is cancelled;
// only its id, length and state outlive it.
#[derive(Debug)]
struct RevealSession {
    id: u64,
    target: Vec<char>,
    len: usize,
    steps: u64,
    state: RevealState,
    completion_sent: bool,
}

impl RevealSession {
    fn revealed_count(&self, ticks_per_char: u32) -> usize {
        (self.steps / u64::from(ticks_per_char)) as usize
    }

    fn take_target(&mut self) -> String {
        std::mem::take(&mut self.target).into_iter().collect()
    }
}

pub struct RevealScheduler<R = ChaCha8Rng> {
    ticks_per_char: u32,
    session: Option<RevealSession>,
    // final state of every superseded session, indexed by id
    ended: Vec<RevealState>,
    noise_rng: R,
}

impl RevealScheduler<ChaCha8Rng> {
    pub fn new(ticks_per_char: u32) -> Self {
        Self::with_rng(ticks_per_char, ChaCha8Rng::from_entropy())
    }
}

impl Default for RevealScheduler<ChaCha8Rng> {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_CHAR)
    }
}

impl<R: Rng> RevealScheduler<R> {
    /// `ticks_per_char` of zero is treated as one.
    pub fn with_rng(ticks_per_char: u32, noise_rng: R) -> Self {
        Self {
            ticks_per_char: ticks_per_char.max(1),
            session: None,
            ended: Vec::new(),
            noise_rng,
        }
    }

    pub fn ticks_per_char(&self) -> u32 {
        self.ticks_per_char
    }

    /// Starts revealing `target`, superseding any session still in flight.
    pub fn start(&mut self, target: &str) -> SessionHandle {
        if let Some(previous) = self.active_handle() {
            self.cancel(previous);
        }
        if let Some(previous) = self.session.take() {
            self.ended.push(previous.state);
        }

        let id = self.ended.len() as u64;

        let target: Vec<char> = target.chars().collect();
        // Nothing to reveal: done at once, completion still pending
        let state = if target.is_empty() {
            RevealState::Done
        } else {
            RevealState::Revealing
        };

        log::debug!("Reveal session {} started ({} chars)", id, target.len());
        self.session = Some(RevealSession {
            id,
            len: target.len(),
            target,
            steps: 0,
            state,
            completion_sent: false,
        });
        SessionHandle(id)
    }

    /// Advances the current session by one step.
    ///
    /// Returns `None` when there is nothing left to emit: no session, a
    /// cancelled one, or one whose completion was already delivered.
    pub fn tick(&mut self) -> Option<RevealEvent> {
        let ticks_per_char = self.ticks_per_char;
        let session = self.session.as_mut()?;

        match session.state {
            RevealState::Idle | RevealState::Cancelled => None,
            RevealState::Done if session.completion_sent => None,
            RevealState::Done => {
                session.completion_sent = true;
                Some(RevealEvent::Completed(session.take_target()))
            }
            RevealState::Revealing => {
                let revealed = session.revealed_count(ticks_per_char);
                if revealed >= session.len {
                    session.state = RevealState::Done;
                    session.completion_sent = true;
                    log::debug!("Reveal session {} complete", session.id);
                    return Some(RevealEvent::Completed(session.take_target()));
                }

                let noise = NOISE.as_bytes();
                let frame = session
                    .target
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| {
                        if i < revealed {
                            c
                        } else {
                            noise[self.noise_rng.gen_range(0..noise.len())] as char
                        }
                    })
                    .collect();
                session.steps += 1;
                Some(RevealEvent::Frame(frame))
            }
        }
    }

    /// Stops `handle` if it is the session currently revealing. Returns
    /// whether anything was cancelled.
    pub fn cancel(&mut self, handle: SessionHandle) -> bool {
        match self.session.as_mut() {
            Some(session) if session.id == handle.0 && session.state == RevealState::Revealing => {
                session.state = RevealState::Cancelled;
                session.target = Vec::new();
                log::debug!("Reveal session {} cancelled", session.id);
                true
            }
            _ => false,
        }
    }

    /// Handle of the session that still has events to emit.
    pub fn active_handle(&self) -> Option<SessionHandle> {
        self.session.as_ref().and_then(|session| match session.state {
            RevealState::Revealing => Some(SessionHandle(session.id)),
            RevealState::Done if !session.completion_sent => Some(SessionHandle(session.id)),
            _ => None,
        })
    }

    pub fn state(&self) -> RevealState {
        self.session
            .as_ref()
            .map_or(RevealState::Idle, |session| session.state)
    }

    /// State of a specific session. Superseded sessions keep the state they
    /// ended in: `Done` if they had finished, `Cancelled` otherwise.
    pub fn state_of(&self, handle: SessionHandle) -> RevealState {
        match self.session.as_ref() {
            Some(session) if session.id == handle.0 => session.state,
            _ => self
                .ended
                .get(handle.0 as usize)
                .copied()
                .unwrap_or(RevealState::Idle),
        }
    }

    /// Number of fully resolved characters in the current session.
    pub fn revealed_count(&self) -> usize {
        self.session.as_ref().map_or(0, |session| {
            session
                .revealed_count(self.ticks_per_char)
                .min(session.len)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(ticks_per_char: u32) -> RevealScheduler {
        RevealScheduler::with_rng(ticks_per_char, ChaCha8Rng::seed_from_u64(42))
    }

    fn run_to_end(scheduler: &mut RevealScheduler) -> (Vec<String>, Option<String>) {
        let mut frames = Vec::new();
        while let Some(event) = scheduler.tick() {
            match event {
                RevealEvent::Frame(frame) => frames.push(frame),
                RevealEvent::Completed(value) => return (frames, Some(value)),
            }
        }
        (frames, None)
    }

    #[test]
    fn test_reveal_completes_with_target() {
        let mut scheduler = scheduler(3);
        let handle = scheduler.start("abc");
        assert_eq!(scheduler.state(), RevealState::Revealing);

        let (frames, completed) = run_to_end(&mut scheduler);
        assert_eq!(completed.as_deref(), Some("abc"));
        // three ticks per character
        assert_eq!(frames.len(), 9);
        assert!(frames.iter().all(|f| f.chars().count() == 3));
        assert_eq!(scheduler.state_of(handle), RevealState::Done);

        // completion is delivered once only
        assert_eq!(scheduler.tick(), None);
    }

    #[test]
    fn test_frames_reveal_prefix_progressively() {
        let mut scheduler = scheduler(3);
        scheduler.start("secret");
        let (frames, _) = run_to_end(&mut scheduler);

        for (tick, frame) in frames.iter().enumerate() {
            let revealed = tick / 3;
            assert_eq!(&frame[..revealed], &"secret"[..revealed]);
            assert!(frame.chars().all(|c| NOISE.contains(c)));
        }
    }

    #[test]
    fn test_one_tick_per_char() {
        let mut scheduler = scheduler(1);
        scheduler.start("xy");
        let (frames, completed) = run_to_end(&mut scheduler);
        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[1][..1], "x");
        assert_eq!(completed.as_deref(), Some("xy"));
    }

    #[test]
    fn test_cancel_suppresses_completion() {
        let mut scheduler = scheduler(3);
        let handle = scheduler.start("abc");
        assert!(matches!(scheduler.tick(), Some(RevealEvent::Frame(_))));

        assert!(scheduler.cancel(handle));
        assert_eq!(scheduler.state(), RevealState::Cancelled);
        assert_eq!(scheduler.tick(), None);
        assert_eq!(scheduler.tick(), None);

        // cancel is only valid while revealing
        assert!(!scheduler.cancel(handle));
    }

    #[test]
    fn test_cancel_after_completion_is_rejected() {
        let mut scheduler = scheduler(1);
        let handle = scheduler.start("a");
        run_to_end(&mut scheduler);
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.state(), RevealState::Done);
    }

    #[test]
    fn test_start_supersedes_active_session() {
        let mut scheduler = scheduler(3);
        let first = scheduler.start("first");
        scheduler.tick();

        let second = scheduler.start("two");
        assert_eq!(scheduler.state_of(first), RevealState::Cancelled);
        assert_eq!(scheduler.active_handle(), Some(second));

        // a stale handle cannot cancel the new session
        assert!(!scheduler.cancel(first));

        let (frames, completed) = run_to_end(&mut scheduler);
        assert!(frames.iter().all(|f| f.len() == 3));
        assert_eq!(completed.as_deref(), Some("two"));
    }

    fn retained_target(scheduler: &RevealScheduler) -> usize {
        scheduler.session.as_ref().map_or(0, |session| session.target.len())
    }

    #[test]
    fn test_target_is_dropped_after_completion() {
        let mut scheduler = scheduler(1);
        scheduler.start("hunter2");
        let (_, completed) = run_to_end(&mut scheduler);
        assert_eq!(completed.as_deref(), Some("hunter2"));
        assert_eq!(retained_target(&scheduler), 0);
        assert_eq!(scheduler.revealed_count(), 7);
    }

    #[test]
    fn test_target_is_dropped_after_cancel() {
        let mut scheduler = scheduler(3);
        let handle = scheduler.start("s3cret");
        scheduler.tick();
        assert_eq!(retained_target(&scheduler), 6);

        assert!(scheduler.cancel(handle));
        assert_eq!(retained_target(&scheduler), 0);
        assert_eq!(scheduler.state_of(handle), RevealState::Cancelled);
    }

    #[test]
    fn test_superseded_sessions_keep_their_final_state() {
        let mut scheduler = scheduler(1);
        let finished = scheduler.start("a");
        run_to_end(&mut scheduler);
        assert_eq!(scheduler.state_of(finished), RevealState::Done);

        let interrupted = scheduler.start("bc");
        scheduler.tick();
        let latest = scheduler.start("d");

        assert_eq!(scheduler.state_of(finished), RevealState::Done);
        assert_eq!(scheduler.state_of(interrupted), RevealState::Cancelled);
        assert_eq!(scheduler.state_of(latest), RevealState::Revealing);
    }

    #[test]
    fn test_empty_target_completes_without_frames() {
        let mut scheduler = scheduler(3);
        let handle = scheduler.start("");
        assert_eq!(scheduler.state_of(handle), RevealState::Done);
        assert_eq!(scheduler.tick(), Some(RevealEvent::Completed(String::new())));
        assert_eq!(scheduler.tick(), None);
    }

    #[test]
    fn test_idle_scheduler_emits_nothing() {
        let mut scheduler = scheduler(3);
        assert_eq!(scheduler.state(), RevealState::Idle);
        assert_eq!(scheduler.tick(), None);
        assert_eq!(scheduler.revealed_count(), 0);
    }

    #[test]
    fn test_zero_ticks_per_char_is_raised_to_one() {
        let scheduler = scheduler(0);
        assert_eq!(scheduler.ticks_per_char(), 1);
    }
}
