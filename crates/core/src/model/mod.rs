mod challenge;
mod ids;
mod session;

pub use challenge::{
    Challenge, DependencySpec, Implementation, RawChallenge, Scenario, Stakeholder, StarterFile,
    TestCase, DEFAULT_TEAM_SIZE, DEFAULT_TIME_LIMIT_MINUTES, DEFAULT_XP_REWARD,
};
pub use ids::ChallengeId;
pub use session::{PracticeMode, SessionTicket};
