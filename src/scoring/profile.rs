// src/scoring/profile.rs

use indexmap::IndexMap;
use rand::Rng;
use serde_json::{Map, Value, json};

use super::{PartOutcome, ScoringEngine, ScoringError};

/// Flat profile object: one result/scores pair per quiz part plus description fields,
/// in insertion order.
pub type Profile = Map<String, Value>;

impl ScoringEngine {
    /// Scores a multi-part submission into one profile.
    ///
    /// Every catalog part gets its fields: attempted parts carry their outcome, omitted
    /// parts carry `null` and `{}`. Keys not in the catalog are skipped. The first
    /// attempted part with a wrong answer count fails the whole submission.
    pub fn build_profile<R: Rng + ?Sized>(
        &self,
        answers_by_part: &IndexMap<String, Vec<Option<String>>>,
        rng: &mut R,
    ) -> Result<Profile, ScoringError> {
        for key in answers_by_part.keys() {
            if self.catalog().get(key).is_none() {
                tracing::warn!(part = %key, "Ignoring answers for unknown quiz part");
            }
        }

        let mut profile = Profile::new();
        let mut descriptions = Vec::new();

        for (key, def) in &self.catalog().parts {
            let outcome = match answers_by_part.get(key) {
                Some(answers) => Some(self.score_part(key, answers, rng)?),
                None => None,
            };

            if let Some(field) = &def.profile.description {
                let text = outcome
                    .as_ref()
                    .and_then(|o| o.result.as_ref())
                    .and_then(|winner| def.descriptions.get(winner))
                    .cloned()
                    .unwrap_or_default();
                descriptions.push((field.clone(), Value::String(text)));
            }

            let (result, scores) = match outcome {
                Some(PartOutcome { result, scores }) => (json!(result), json!(scores)),
                None => (Value::Null, json!({})),
            };

            if let Some(field) = &def.profile.result {
                profile.insert(field.clone(), result);
            }
            profile.insert(def.profile.scores.clone(), scores);
        }

        profile.extend(descriptions);
        Ok(profile)
    }
}
