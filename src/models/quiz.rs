// src/models/quiz.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Points awarded to one or more entities by a single answer.
/// Key: entity key (house, patronus form, `wood|core` pair, character...).
/// Value: positive weight.
pub type ScoreAward = IndexMap<String, u32>;

/// Accumulated score per entity key.
/// Iteration order is the order in which entities were first scored.
pub type ScoreTally = IndexMap<String, u32>;

/// How a tally is turned into a result for a given quiz part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Resolution {
    /// Highest score wins, ties broken at random.
    Highest,

    /// Like `Highest`, but every canonical key takes part in the draw (defaulting to 0),
    /// so a winner always exists.
    Canonical { keys: Vec<String> },

    /// Entity keys are `first<separator>second` pairs. Both halves are tallied and
    /// resolved independently, first-encountered on ties.
    Composite {
        separator: String,
        first: String,
        second: String,
    },

    /// The raw tally is the whole result; no winner is ever picked.
    ProfileOnly,
}

/// Names of the fields a quiz part fills in the combined profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    /// Field holding the resolved result. `None` for parts without a winner.
    #[serde(default)]
    pub result: Option<String>,

    /// Field holding the tally.
    pub scores: String,

    /// Field holding the description of the resolved winner.
    #[serde(default)]
    pub description: Option<String>,
}

/// A prompt plus its options, each option mapped to the points it awards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q")]
    pub prompt: String,

    /// Option label -> award. Order is display order only.
    pub options: IndexMap<String, ScoreAward>,
}

/// One self-contained questionnaire ("house", "wand", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub name: String,

    #[serde(rename = "desc", default)]
    pub description: String,

    pub questions: Vec<Question>,

    pub resolution: Resolution,

    pub profile: ProfileFields,

    /// Entity key -> descriptive sentence shown with the profile.
    #[serde(default)]
    pub descriptions: IndexMap<String, String>,
}

impl QuizDefinition {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// The full set of quiz parts, keyed by short part key.
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub parts: IndexMap<String, QuizDefinition>,
}

impl Catalog {
    pub fn get(&self, key: &str) -> Option<&QuizDefinition> {
        self.parts.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }
}

/// DTO for sending a question to the client (option labels only, no weights).
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicQuestion {
    pub q: String,
    pub options: Vec<String>,
}

/// DTO for sending a quiz part to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicPart {
    pub name: String,
    pub desc: String,
    pub questions: Vec<PublicQuestion>,
}

impl From<&QuizDefinition> for PublicPart {
    fn from(def: &QuizDefinition) -> Self {
        Self {
            name: def.name.clone(),
            desc: def.description.clone(),
            questions: def
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    q: q.prompt.clone(),
                    options: q.options.keys().cloned().collect(),
                })
                .collect(),
        }
    }
}
