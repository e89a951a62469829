use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChallengeError;
use crate::model::ChallengeId;

/// Minutes allotted when the remote payload carries no usable `timeLimit`.
pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 30;
/// XP granted when the remote payload carries no usable score.
pub const DEFAULT_XP_REWARD: u32 = 100;
/// Team size assumed when the remote payload does not state one.
pub const DEFAULT_TEAM_SIZE: u32 = 1;

//
// ─── RAW PAYLOAD ───────────────────────────────────────────────────────────────
//

/// A challenge record as the remote API returns it.
///
/// Every field is optional; the API is duck-typed JSON and any subset may be
/// absent. Unknown fields are ignored. This type exists only to be fed into
/// [`Challenge::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawChallenge {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub difficulty: Option<String>,
    /// Number or numeric string in the wild.
    #[serde(rename = "timeLimit")]
    pub time_limit: Option<Value>,
    #[serde(rename = "teamSize")]
    pub team_size: Option<Value>,
    pub stats: Option<RawStats>,
    pub scenario: Option<RawScenario>,
    pub author: Option<RawAuthor>,
    pub content: Option<RawContent>,
    pub code: Option<RawCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    pub average_score: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawScenario {
    pub background: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub distractions: Option<Vec<RawDistraction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDistraction {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAuthor {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawContent {
    pub constraints: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCode {
    pub test_cases: Option<Vec<RawTestCase>>,
    /// Keyed by language; `IndexMap` keeps the document's key order so
    /// generated starter files come out in the order the author wrote them.
    pub starter_code: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestCase {
    pub description: Option<String>,
    pub input: Option<String>,
    pub expected_output: Option<String>,
}

//
// ─── NORMALIZED CHALLENGE ──────────────────────────────────────────────────────
//

/// Narrative framing for a challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub background: String,
    pub business_context: String,
    pub stakeholders: Vec<Stakeholder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stakeholder {
    pub name: String,
    pub role: String,
    pub avatar_url: String,
}

/// What the solver is asked to build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Implementation {
    pub requirements: Vec<String>,
    pub constraints: Vec<String>,
    pub dependencies: Vec<DependencySpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySpec {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub description: String,
    pub input: String,
    pub expected_output: String,
}

/// A starter-code file, named `solution.<language-key>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarterFile {
    pub name: String,
    pub content: String,
}

/// A challenge in the app's own schema, decoupled from remote shape drift.
///
/// Every field is always present: absence in the raw payload degrades to a
/// documented default at the normalization boundary, never to a missing
/// field, so consumers branch on values and never on presence. The only way
/// to construct one is [`Challenge::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Challenge {
    id: ChallengeId,
    title: String,
    description: String,
    kind: String,
    difficulty: String,
    time_limit_minutes: u32,
    xp_reward: u32,
    team_size: u32,
    distraction_tags: Vec<String>,
    scenario: Scenario,
    implementation: Implementation,
    test_cases: Vec<TestCase>,
    files: Vec<StarterFile>,
}

impl Challenge {
    /// Map a raw remote record into the local schema.
    ///
    /// Pure and order-preserving: every list keeps the raw payload's order,
    /// and each field is defaulted independently, so a missing `scenario`
    /// never suppresses `code`-derived fields or vice versa. Normalizing the
    /// same payload twice yields equal values.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::MissingId` if `_id` is absent or blank.
    pub fn normalize(raw: RawChallenge) -> Result<Self, ChallengeError> {
        let id = raw
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ChallengeError::MissingId)?;

        let time_limit_minutes = parse_count(raw.time_limit.as_ref(), DEFAULT_TIME_LIMIT_MINUTES);
        let team_size = parse_count(raw.team_size.as_ref(), DEFAULT_TEAM_SIZE);
        // The upstream app hands out stats.averageScore as the XP reward.
        // Looks like a naming mismatch at the source, kept as-is.
        let xp_reward = parse_count(
            raw.stats.as_ref().and_then(|s| s.average_score.as_ref()),
            DEFAULT_XP_REWARD,
        );

        let scenario_raw = raw.scenario.unwrap_or_default();
        let distraction_tags = scenario_raw
            .distractions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|d| d.kind)
            .collect();
        let stakeholders = raw
            .author
            .and_then(|a| a.username)
            .map(|name| Stakeholder {
                name,
                role: scenario_raw.role.unwrap_or_default(),
                avatar_url: String::new(),
            })
            .into_iter()
            .collect();
        let scenario = Scenario {
            background: scenario_raw.background.unwrap_or_default(),
            business_context: scenario_raw.company.unwrap_or_default(),
            stakeholders,
        };

        let implementation = Implementation {
            requirements: Vec::new(),
            constraints: raw
                .content
                .and_then(|c| c.constraints)
                .unwrap_or_default(),
            dependencies: Vec::new(),
        };

        let code = raw.code.unwrap_or_default();
        let test_cases = code
            .test_cases
            .unwrap_or_default()
            .into_iter()
            .map(|tc| TestCase {
                description: tc.description.unwrap_or_default(),
                input: tc.input.unwrap_or_default(),
                expected_output: tc.expected_output.unwrap_or_default(),
            })
            .collect();
        let files = code
            .starter_code
            .unwrap_or_default()
            .into_iter()
            .map(|(language, content)| StarterFile {
                name: format!("solution.{language}"),
                content,
            })
            .collect();

        Ok(Self {
            id: ChallengeId::new(id),
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            kind: raw.kind.unwrap_or_default(),
            difficulty: raw.difficulty.unwrap_or_default(),
            time_limit_minutes,
            xp_reward,
            team_size,
            distraction_tags,
            scenario,
            implementation,
            test_cases,
            files,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ChallengeId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Challenge category (the remote `type` field, e.g. "dsa").
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    #[must_use]
    pub fn team_size(&self) -> u32 {
        self.team_size
    }

    #[must_use]
    pub fn distraction_tags(&self) -> &[String] {
        &self.distraction_tags
    }

    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    #[must_use]
    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    #[must_use]
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    #[must_use]
    pub fn files(&self) -> &[StarterFile] {
        &self.files
    }
}

/// Reads a non-negative count that may arrive as a JSON number or a numeric
/// string; anything else degrades to `default`.
fn parse_count(value: Option<&Value>, default: u32) -> u32 {
    let Some(value) = value else {
        return default;
    };
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                v
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite() && *f >= 0.0) {
                f as u32
            } else {
                default
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map_or(default, |f| f as u32),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawChallenge {
        serde_json::from_str(json).expect("raw payload should parse")
    }

    #[test]
    fn minimal_payload_gets_every_default() {
        let challenge = Challenge::normalize(raw(
            r#"{ "_id": "c1", "title": "Two Sum", "type": "dsa", "difficulty": "Easy" }"#,
        ))
        .unwrap();

        assert_eq!(challenge.id().as_str(), "c1");
        assert_eq!(challenge.title(), "Two Sum");
        assert_eq!(challenge.kind(), "dsa");
        assert_eq!(challenge.difficulty(), "Easy");
        assert_eq!(challenge.description(), "");
        assert_eq!(challenge.time_limit_minutes(), DEFAULT_TIME_LIMIT_MINUTES);
        assert_eq!(challenge.xp_reward(), DEFAULT_XP_REWARD);
        assert_eq!(challenge.team_size(), DEFAULT_TEAM_SIZE);
        assert!(challenge.distraction_tags().is_empty());
        assert_eq!(challenge.scenario(), &Scenario::default());
        assert_eq!(challenge.implementation(), &Implementation::default());
        assert!(challenge.test_cases().is_empty());
        assert!(challenge.files().is_empty());
    }

    #[test]
    fn starter_code_becomes_files_in_document_order() {
        // "py" before "js" on purpose: document order, not key order.
        let challenge = Challenge::normalize(raw(
            r##"{ "_id": "c2", "code": { "starterCode": { "py": "# start", "js": "// start" } } }"##,
        ))
        .unwrap();

        let files = challenge.files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "solution.py");
        assert_eq!(files[0].content, "# start");
        assert_eq!(files[1].name, "solution.js");
        assert_eq!(files[1].content, "// start");
    }

    #[test]
    fn missing_or_blank_id_is_rejected() {
        assert_eq!(
            Challenge::normalize(raw(r#"{ "title": "No id" }"#)),
            Err(ChallengeError::MissingId)
        );
        assert_eq!(
            Challenge::normalize(raw(r#"{ "_id": "   " }"#)),
            Err(ChallengeError::MissingId)
        );
    }

    #[test]
    fn sibling_defaults_are_independent() {
        // code present, scenario absent
        let with_code = Challenge::normalize(raw(
            r#"{ "_id": "c3", "code": { "testCases": [ { "input": "1", "expectedOutput": "2" } ] } }"#,
        ))
        .unwrap();
        assert_eq!(with_code.test_cases().len(), 1);
        assert_eq!(with_code.scenario(), &Scenario::default());

        // scenario present, code absent
        let with_scenario = Challenge::normalize(raw(
            r#"{ "_id": "c4", "scenario": { "background": "A startup", "company": "Acme" } }"#,
        ))
        .unwrap();
        assert!(with_scenario.test_cases().is_empty());
        assert_eq!(with_scenario.scenario().background, "A startup");
        assert_eq!(with_scenario.scenario().business_context, "Acme");
    }

    #[test]
    fn list_fields_preserve_input_order() {
        let challenge = Challenge::normalize(raw(
            r#"{
                "_id": "c5",
                "scenario": {
                    "distractions": [ { "type": "slack" }, { "type": "meeting" }, { "type": "email" } ]
                },
                "content": { "constraints": [ "O(n)", "no recursion" ] },
                "code": {
                    "testCases": [
                        { "description": "b", "input": "2", "expectedOutput": "4" },
                        { "description": "a", "input": "1", "expectedOutput": "2" }
                    ]
                }
            }"#,
        ))
        .unwrap();

        assert_eq!(challenge.distraction_tags(), ["slack", "meeting", "email"]);
        assert_eq!(
            challenge.implementation().constraints,
            ["O(n)", "no recursion"]
        );
        assert_eq!(challenge.test_cases()[0].description, "b");
        assert_eq!(challenge.test_cases()[1].description, "a");
    }

    #[test]
    fn author_and_role_become_a_stakeholder() {
        let challenge = Challenge::normalize(raw(
            r#"{
                "_id": "c6",
                "author": { "username": "grace" },
                "scenario": { "role": "Tech Lead" }
            }"#,
        ))
        .unwrap();

        let stakeholders = &challenge.scenario().stakeholders;
        assert_eq!(stakeholders.len(), 1);
        assert_eq!(stakeholders[0].name, "grace");
        assert_eq!(stakeholders[0].role, "Tech Lead");
        assert_eq!(stakeholders[0].avatar_url, "");

        // No author, no stakeholders, even with a role present.
        let without_author = Challenge::normalize(raw(
            r#"{ "_id": "c7", "scenario": { "role": "Tech Lead" } }"#,
        ))
        .unwrap();
        assert!(without_author.scenario().stakeholders.is_empty());
    }

    #[test]
    fn counts_accept_numbers_and_numeric_strings() {
        let numeric = Challenge::normalize(raw(
            r#"{ "_id": "c8", "timeLimit": 45, "teamSize": 2, "stats": { "averageScore": 72.5 } }"#,
        ))
        .unwrap();
        assert_eq!(numeric.time_limit_minutes(), 45);
        assert_eq!(numeric.team_size(), 2);
        assert_eq!(numeric.xp_reward(), 72);

        let stringly = Challenge::normalize(raw(
            r#"{ "_id": "c9", "timeLimit": "45", "stats": { "averageScore": "150" } }"#,
        ))
        .unwrap();
        assert_eq!(stringly.time_limit_minutes(), 45);
        assert_eq!(stringly.xp_reward(), 150);

        let garbage = Challenge::normalize(raw(
            r#"{ "_id": "c10", "timeLimit": "soon", "teamSize": [3], "stats": { "averageScore": null } }"#,
        ))
        .unwrap();
        assert_eq!(garbage.time_limit_minutes(), DEFAULT_TIME_LIMIT_MINUTES);
        assert_eq!(garbage.team_size(), DEFAULT_TEAM_SIZE);
        assert_eq!(garbage.xp_reward(), DEFAULT_XP_REWARD);
    }

    #[test]
    fn normalization_is_idempotent_on_equal_input() {
        let payload = r#"{
            "_id": "c11",
            "title": "Rate Limiter",
            "timeLimit": "60",
            "scenario": { "background": "b", "company": "c", "role": "r" },
            "author": { "username": "ada" },
            "code": { "starterCode": { "rs": "fn main() {}" } }
        }"#;

        let first = Challenge::normalize(raw(payload)).unwrap();
        let second = Challenge::normalize(raw(payload)).unwrap();
        assert_eq!(first, second);
    }
}
