use std::sync::{Arc, Mutex};
use std::time::Duration;

use quest_core::model::{ChallengeId, PracticeMode, SessionTicket};
use quest_core::Clock;

/// Length of the preparation countdown, in seconds.
pub const COUNTDOWN_SECONDS: u8 = 3;

/// Where a launcher is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    Idle,
    CountingDown,
    Launched,
}

/// Proof that a tick belongs to the countdown that scheduled it.
///
/// `cancel` and completion invalidate the live token, so a timer callback
/// that fires late holds a stale token and its tick is a no-op. This is how
/// "no effect after cancel returns" is enforced without having to tear down
/// the timer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

type BeginCallback = Box<dyn FnMut(SessionTicket) + Send>;

/// Countdown-gated session start.
///
/// One instance per launch surface; the hosting modal creates a fresh
/// launcher when it opens, so no state survives re-entry. Drives a fixed
/// 3-second countdown between user confirmation and the begin callback,
/// which fires exactly once. Ticks arrive from [`run_countdown`] in
/// production and directly from tests.
pub struct SessionLauncher {
    clock: Clock,
    challenge_id: ChallengeId,
    mode: PracticeMode,
    phase: LaunchPhase,
    seconds_remaining: u8,
    generation: u64,
    begin: Option<BeginCallback>,
}

impl SessionLauncher {
    #[must_use]
    pub fn new(clock: Clock, challenge_id: ChallengeId, mode: PracticeMode) -> Self {
        Self {
            clock,
            challenge_id,
            mode,
            phase: LaunchPhase::Idle,
            seconds_remaining: COUNTDOWN_SECONDS,
            generation: 0,
            begin: None,
        }
    }

    /// Registers the begin callback, replacing any previous one.
    ///
    /// Panics raised by the callback are the caller's problem; the launcher
    /// does not catch them.
    #[must_use]
    pub fn on_begin(mut self, callback: impl FnMut(SessionTicket) + Send + 'static) -> Self {
        self.begin = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u8 {
        self.seconds_remaining
    }

    /// True while `token` still controls an active countdown.
    #[must_use]
    pub fn is_live(&self, token: TickToken) -> bool {
        self.phase == LaunchPhase::CountingDown && token.0 == self.generation
    }

    /// Begin the countdown. Valid only from `Idle`; repeated clicks while
    /// counting down or after launch are no-ops and get no token.
    pub fn confirm_start(&mut self) -> Option<TickToken> {
        if self.phase != LaunchPhase::Idle {
            return None;
        }
        self.phase = LaunchPhase::CountingDown;
        self.seconds_remaining = COUNTDOWN_SECONDS;
        self.generation += 1;
        Some(TickToken(self.generation))
    }

    /// Advance the countdown by one second.
    ///
    /// Ignored unless counting down and `token` is the live one. On reaching
    /// zero the launcher moves to `Launched`, invalidates the token, and
    /// invokes the begin callback with a ticket stamped from its clock.
    pub fn tick(&mut self, token: TickToken) {
        if !self.is_live(token) {
            return;
        }

        self.seconds_remaining -= 1;
        if self.seconds_remaining > 0 {
            return;
        }

        self.phase = LaunchPhase::Launched;
        self.generation += 1;
        let ticket = SessionTicket::new(self.challenge_id.clone(), self.mode, self.clock.now());
        if let Some(begin) = self.begin.as_mut() {
            begin(ticket);
        }
    }

    /// Abort the countdown and return to `Idle` with a full clock.
    ///
    /// Synchronous and total: the live token is invalidated before this
    /// returns, so an already-scheduled tick can no longer mutate state or
    /// reach the callback. No-op once launched.
    pub fn cancel(&mut self) {
        if self.phase == LaunchPhase::Launched {
            return;
        }
        self.phase = LaunchPhase::Idle;
        self.seconds_remaining = COUNTDOWN_SECONDS;
        self.generation += 1;
    }
}

/// Drives a confirmed countdown with real one-second ticks.
///
/// The lock is released across each sleep so the UI task can call `cancel`
/// (or a second `confirm_start`) between ticks; either bumps the generation
/// and this loop notices the stale token and stops.
pub async fn run_countdown(launcher: Arc<Mutex<SessionLauncher>>, token: TickToken) {
    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let Ok(mut guard) = launcher.lock() else {
            return;
        };
        guard.tick(token);
        if !guard.is_live(token) {
            return;
        }
    }
}
