#![forbid(unsafe_code)]

pub mod api;
pub mod challenge_source;
pub mod error;
pub mod launcher;

pub use quest_core::Clock;

pub use api::{ApiConfig, ChallengeApi, HttpChallengeApi};
pub use challenge_source::{ChallengeSource, FetchOptions};
pub use error::ChallengeSourceError;
pub use launcher::{
    run_countdown, LaunchPhase, SessionLauncher, TickToken, COUNTDOWN_SECONDS,
};
