// src/catalog.rs

use std::{fs, path::Path};

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::quiz::{
    Catalog, ProfileFields, Question, QuizDefinition, Resolution, ScoreAward,
};

/// The four houses. Every house result is one of these.
pub const HOUSE_KEYS: [&str; 4] = ["Gryffindor", "Hufflepuff", "Ravenclaw", "Slytherin"];

/// Separator between the wood and the core of a wand entity key.
pub const WAND_SEPARATOR: &str = "|";

/// Errors raised while loading or checking a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no quiz parts")]
    Empty,

    #[error("quiz part '{0}' has no questions")]
    NoQuestions(String),

    #[error("question {index} of quiz part '{part}' has no options")]
    NoOptions { part: String, index: usize },

    #[error("option '{option}' of quiz part '{part}' awards zero points to '{entity}'")]
    ZeroWeight {
        part: String,
        option: String,
        entity: String,
    },

    #[error("quiz part '{0}' uses canonical resolution without keys")]
    NoCanonicalKeys(String),

    #[error("quiz part '{0}' uses composite resolution with an empty separator")]
    EmptySeparator(String),

    #[error("quiz part '{0}' can award more points than a score can hold")]
    ScoreOverflow(String),

    #[error("quiz part '{part}' awards '{entity}' which lacks the separator '{separator}'")]
    MissingSeparator {
        part: String,
        entity: String,
        separator: String,
    },
}

// Static tables: (prompt, [(option label, [(entity, points)])]).
type OptionTable = &'static [(&'static str, &'static [(&'static str, u32)])];
type QuestionTable = &'static [(&'static str, OptionTable)];

const HOUSE_QUESTIONS: QuestionTable = &[
    (
        "What's more important to you?",
        &[
            ("Bravery and daring", &[("Gryffindor", 2)]),
            ("Loyalty and hard work", &[("Hufflepuff", 2)]),
            ("Learning and wisdom", &[("Ravenclaw", 2)]),
            ("Ambition and cunning", &[("Slytherin", 2)]),
        ],
    ),
    (
        "Pick a magical pet:",
        &[
            ("Phoenix", &[("Gryffindor", 2)]),
            ("Badger", &[("Hufflepuff", 2)]),
            ("Owl", &[("Ravenclaw", 2)]),
            ("Snake", &[("Slytherin", 2)]),
        ],
    ),
    (
        "At a party you are:",
        &[
            ("Standing up for others", &[("Gryffindor", 2)]),
            ("Helping the host and chatting with everyone", &[("Hufflepuff", 2)]),
            ("Discussing ideas in a small group", &[("Ravenclaw", 2)]),
            ("Making connections and securing a future advantage", &[("Slytherin", 2)]),
        ],
    ),
    (
        "Pick a color:",
        &[
            ("Scarlet", &[("Gryffindor", 1)]),
            ("Yellow", &[("Hufflepuff", 1)]),
            ("Blue", &[("Ravenclaw", 1)]),
            ("Green", &[("Slytherin", 1)]),
        ],
    ),
    (
        "You value:",
        &[
            ("Courage", &[("Gryffindor", 2)]),
            ("Patience", &[("Hufflepuff", 2)]),
            ("Curiosity", &[("Ravenclaw", 2)]),
            ("Resourcefulness", &[("Slytherin", 2)]),
        ],
    ),
    (
        "When faced with a difficult choice, you:",
        &[
            ("Act boldly without hesitation", &[("Gryffindor", 2)]),
            ("Consider the feelings of others", &[("Hufflepuff", 2)]),
            ("Analyze every possible outcome", &[("Ravenclaw", 2)]),
            ("Choose the option that benefits you most", &[("Slytherin", 2)]),
        ],
    ),
];

const HOUSE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Gryffindor", "Brave, daring, and bold—stands up for others."),
    ("Hufflepuff", "Loyal, patient, and kind—values fairness."),
    ("Ravenclaw", "Wise, curious, and clever—loves knowledge."),
    ("Slytherin", "Ambitious, resourceful, and cunning—seeks success."),
];

const PATRONUS_QUESTIONS: QuestionTable = &[
    (
        "What calms you in dark times?",
        &[
            ("Memories of loved ones", &[("Doe", 2), ("Stag", 1)]),
            ("Quiet by a river", &[("Otter", 2)]),
            ("Running free", &[("Hare", 2), ("Stag", 1)]),
            ("Curling up with a book", &[("Cat", 2)]),
        ],
    ),
    (
        "Pick a place at Hogwarts:",
        &[
            ("The Forbidden Forest (carefully)", &[("Stag", 2), ("Fox", 1)]),
            ("By the Black Lake", &[("Otter", 2)]),
            ("The Astronomy Tower", &[("Hare", 1), ("Stag", 1)]),
            ("The Gryffindor Common Room", &[("Dog", 1)]),
        ],
    ),
    (
        "Your happiest memory is:",
        &[
            ("A family moment", &[("Doe", 2)]),
            ("A clever discovery", &[("Otter", 1), ("Cat", 1)]),
            ("A day outdoors running/flying", &[("Stag", 2), ("Hare", 1)]),
            ("An unexpected rescue or courage", &[("Stag", 1), ("Dog", 1)]),
        ],
    ),
];

const WAND_QUESTIONS: QuestionTable = &[
    (
        "Which quality matters most in a wand?",
        &[
            ("Loyalty to its owner", &[("Holly|Phoenix", 1), ("Yew|Phoenix", 2)]),
            ("Power and longevity", &[("Yew|Phoenix", 2), ("Oak|Dragon", 1)]),
            ("Versatility", &[("Elm|Unicorn", 2), ("Ash|Unicorn", 1)]),
            ("Subtlety and connection", &[("Willow|Unicorn", 1), ("Vine|Dragon", 1)]),
        ],
    ),
    (
        "Choose a material vibe:",
        &[
            ("Strong, dark wood (yew/ebony)", &[("Yew|Phoenix", 2), ("Ebony|Dragon", 1)]),
            ("Light, noble wood (holly/ash)", &[("Holly|Phoenix", 2), ("Ash|Unicorn", 1)]),
            ("Ancient and wise (oak)", &[("Oak|Dragon", 2)]),
            ("Quick and clever (willow/vine)", &[("Willow|Unicorn", 1), ("Vine|Dragon", 1)]),
        ],
    ),
];

const BESTIE_QUESTIONS: QuestionTable = &[
    (
        "You value a friend who:",
        &[
            ("Is fiercely loyal and funny", &[("Ron", 2)]),
            ("Is studious and reliable", &[("Hermione", 2)]),
            ("Is eccentric and supportive", &[("Luna", 2)]),
            ("Is brave and protective", &[("Neville", 1), ("Harry", 1)]),
        ],
    ),
    (
        "In downtime at Hogwarts you:",
        &[
            ("Play chess or socialize loudly", &[("Ron", 2)]),
            ("Study in the library", &[("Hermione", 2)]),
            ("Explore quirks and talk about creatures", &[("Luna", 2)]),
            ("Tend to plants or practice spells", &[("Neville", 2)]),
        ],
    ),
];

const ENEMY_QUESTIONS: QuestionTable = &[
    (
        "If you are outspoken and honest, who would clash with you?",
        &[
            ("Someone who values status and lineage", &[("Draco", 2)]),
            ("An overbearing bureaucrat", &[("Umbridge", 2)]),
            ("Someone competitive but principled", &[("Pansy", 1), ("Blaise", 1)]),
            ("A secretive schemer", &[("Crabbe", 1), ("Goyle", 1)]),
        ],
    ),
    (
        "Which behavior annoys you most?",
        &[
            ("Cruelty or bullying", &[("Draco", 2)]),
            ("Arrogant rule-following", &[("Umbridge", 2)]),
            ("Backstabbing", &[("Draco", 1), ("Blaise", 1)]),
            ("Dismissiveness of others", &[("Pansy", 1)]),
        ],
    ),
];

const SKILLS_QUESTIONS: QuestionTable = &[
    (
        "What appeals to you in magic?",
        &[
            ("Creating and performing charms", &[("Charms", 2)]),
            ("Understanding potions and mixtures", &[("Potions", 2)]),
            ("Study of creatures and care", &[("Care of Magical Creatures", 2)]),
            ("Strategy and cunning spells", &[("Defense", 1), ("Transfiguration", 1)]),
        ],
    ),
    (
        "In class you prefer:",
        &[
            ("Precise, practiced technique", &[("Charms", 1), ("Transfiguration", 1)]),
            ("Experimenting carefully", &[("Potions", 2)]),
            ("Hands-on outside learning", &[("Care of Magical Creatures", 2)]),
            ("Tactical thinking", &[("Defense", 2)]),
        ],
    ),
];

const QUIDDITCH_QUESTIONS: QuestionTable = &[
    (
        "Your strongest play style:",
        &[
            ("Quick, nimble, attention to detail", &[("Seeker", 2)]),
            ("Team-oriented, scoring focus", &[("Chaser", 2)]),
            ("Sturdy, calm under pressure", &[("Keeper", 2)]),
            ("Aggressive, protective", &[("Beater", 2)]),
        ],
    ),
    (
        "Pick a training focus:",
        &[
            ("Speed drills", &[("Seeker", 2)]),
            ("Shooting practice", &[("Chaser", 2)]),
            ("Goal defense drills", &[("Keeper", 2)]),
            ("Strength & striking", &[("Beater", 2)]),
        ],
    ),
];

const EXTRAS_QUESTIONS: QuestionTable = &[
    (
        "Choose a dream career:",
        &[
            ("Auror (combat & law)", &[("Auror", 2)]),
            ("Healer (St Mungo's)", &[("Healer", 2)]),
            ("Magical researcher or scholar", &[("Researcher", 2)]),
            ("Magizoologist or wandmaker", &[("Magizoologist", 2)]),
        ],
    ),
    (
        "Choose a favorite spell type:",
        &[
            ("Protective & defensive", &[("Protego", 2)]),
            ("Useful everyday magic", &[("Accio", 2)]),
            ("Healing or restorative", &[("Episkey", 2)]),
            ("Illusory or clever tricks", &[("Lumos/Obscuro", 2)]),
        ],
    ),
];

fn build_questions(table: QuestionTable) -> Vec<Question> {
    table
        .iter()
        .map(|(prompt, options)| Question {
            prompt: prompt.to_string(),
            options: options
                .iter()
                .map(|(label, award)| {
                    let award: ScoreAward = award.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                    (label.to_string(), award)
                })
                .collect(),
        })
        .collect()
}

fn profile(result: Option<&str>, scores: &str) -> ProfileFields {
    ProfileFields {
        result: result.map(str::to_string),
        scores: scores.to_string(),
        description: None,
    }
}

fn part(
    name: &str,
    description: &str,
    table: QuestionTable,
    resolution: Resolution,
    profile: ProfileFields,
) -> QuizDefinition {
    QuizDefinition {
        name: name.to_string(),
        description: description.to_string(),
        questions: build_questions(table),
        resolution,
        profile,
        descriptions: IndexMap::new(),
    }
}

impl Catalog {
    /// The built-in Hogwarts catalog.
    pub fn builtin() -> Self {
        let mut house = part(
            "House sorting",
            "Find your Hogwarts house by values and instinct.",
            HOUSE_QUESTIONS,
            Resolution::Canonical {
                keys: HOUSE_KEYS.iter().map(|k| k.to_string()).collect(),
            },
            profile(Some("house"), "house_scores"),
        );
        house.profile.description = Some("house_desc".to_string());
        house.descriptions = HOUSE_DESCRIPTIONS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let parts = [
            ("house", house),
            (
                "patronus",
                part(
                    "Patronus",
                    "Which Patronus might you conjure?",
                    PATRONUS_QUESTIONS,
                    Resolution::Highest,
                    profile(Some("patronus"), "patronus_scores"),
                ),
            ),
            (
                "wand",
                part(
                    "Wand finder",
                    "Get a book-respecting style of wand (wood/core/theme).",
                    WAND_QUESTIONS,
                    Resolution::Composite {
                        separator: WAND_SEPARATOR.to_string(),
                        first: "wood".to_string(),
                        second: "core".to_string(),
                    },
                    profile(Some("wand"), "wand_raw"),
                ),
            ),
            (
                "bestie",
                part(
                    "Hogwarts bestie",
                    "Which character would be your closest friend?",
                    BESTIE_QUESTIONS,
                    Resolution::Highest,
                    profile(Some("bestie"), "bestie_scores"),
                ),
            ),
            (
                "enemy",
                part(
                    "Rival",
                    "Who would be your rival or frequent foil?",
                    ENEMY_QUESTIONS,
                    Resolution::Highest,
                    profile(Some("enemy"), "enemy_scores"),
                ),
            ),
            (
                "skills",
                part(
                    "Magical skill focus",
                    "Which magical branch would you naturally excel at?",
                    SKILLS_QUESTIONS,
                    Resolution::Highest,
                    profile(Some("skill"), "skill_scores"),
                ),
            ),
            (
                "quidditch",
                part(
                    "Quidditch role",
                    "What Quidditch role fits you best?",
                    QUIDDITCH_QUESTIONS,
                    Resolution::Highest,
                    profile(Some("quidditch_role"), "quidditch_scores"),
                ),
            ),
            (
                "extras",
                part(
                    "Extras",
                    "Add a few fun profile details.",
                    EXTRAS_QUESTIONS,
                    Resolution::ProfileOnly,
                    profile(None, "extras"),
                ),
            ),
        ];

        Catalog {
            parts: parts
                .into_iter()
                .map(|(key, def)| (key.to_string(), def))
                .collect(),
        }
    }

    /// Parses and validates a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the structural rules every catalog must satisfy before it is served.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.parts.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (key, def) in &self.parts {
            if def.questions.is_empty() {
                return Err(CatalogError::NoQuestions(key.clone()));
            }

            match &def.resolution {
                Resolution::Canonical { keys } if keys.is_empty() => {
                    return Err(CatalogError::NoCanonicalKeys(key.clone()));
                }
                Resolution::Composite { separator, .. } if separator.is_empty() => {
                    return Err(CatalogError::EmptySeparator(key.clone()));
                }
                _ => {}
            }

            if max_total(def).is_none_or(|total| total > u64::from(u32::MAX)) {
                return Err(CatalogError::ScoreOverflow(key.clone()));
            }

            for (index, question) in def.questions.iter().enumerate() {
                if question.options.is_empty() {
                    return Err(CatalogError::NoOptions {
                        part: key.clone(),
                        index,
                    });
                }

                for (option, award) in &question.options {
                    for (entity, points) in award {
                        if *points == 0 {
                            return Err(CatalogError::ZeroWeight {
                                part: key.clone(),
                                option: option.clone(),
                                entity: entity.clone(),
                            });
                        }
                        if let Resolution::Composite { separator, .. } = &def.resolution {
                            if !entity.contains(separator.as_str()) {
                                return Err(CatalogError::MissingSeparator {
                                    part: key.clone(),
                                    entity: entity.clone(),
                                    separator: separator.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Upper bound on any score a submission can reach: the richest option of every question.
/// Also bounds the halves of a composite split.
fn max_total(def: &QuizDefinition) -> Option<u64> {
    def.questions.iter().try_fold(0u64, |total, question| {
        let richest = question
            .options
            .values()
            .map(|award| award.values().map(|p| u64::from(*p)).sum::<u64>())
            .max()
            .unwrap_or(0);
        total.checked_add(richest)
    })
}
