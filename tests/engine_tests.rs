// tests/engine_tests.rs

use std::{collections::HashMap, sync::Arc};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use sorting_quiz::{
    catalog::HOUSE_KEYS,
    models::quiz::{Catalog, ScoreTally},
    scoring::{PartScores, ScoringEngine, ScoringError},
};

fn engine() -> ScoringEngine {
    ScoringEngine::new(Arc::new(Catalog::builtin()))
}

/// Picks one random option per question, returning labels and the expected sum.
fn random_submission(engine: &ScoringEngine, key: &str, rng: &mut StdRng) -> (Vec<Option<String>>, ScoreTally) {
    let def = engine.catalog().get(key).unwrap();
    let mut answers = Vec::new();
    let mut expected = ScoreTally::new();
    for question in &def.questions {
        let labels: Vec<&String> = question.options.keys().collect();
        let label = *labels.choose(rng).unwrap();
        for (entity, points) in &question.options[label] {
            *expected.entry(entity.clone()).or_insert(0) += points;
        }
        answers.push(Some(label.clone()));
    }
    (answers, expected)
}

#[test]
fn tally_equals_sum_of_awards_for_every_part() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(2024);
    let keys: Vec<String> = engine.catalog().keys().map(str::to_string).collect();

    for key in &keys {
        for _ in 0..25 {
            let (answers, expected) = random_submission(&engine, key, &mut rng);
            let tally = engine.tally(key, &answers).unwrap();
            assert_eq!(tally, expected, "part {key}");
        }
    }
}

#[test]
fn tally_is_independent_of_award_order() {
    let engine = engine();
    let def = engine.catalog().get("patronus").unwrap();
    let answers: Vec<Option<String>> = def
        .questions
        .iter()
        .map(|q| q.options.keys().last().cloned())
        .collect();

    // Same awards, accumulated in reverse question order.
    let mut reversed = ScoreTally::new();
    for (question, answer) in def.questions.iter().zip(&answers).rev() {
        for (entity, points) in &question.options[answer.as_deref().unwrap()] {
            *reversed.entry(entity.clone()).or_insert(0) += points;
        }
    }

    assert_eq!(engine.tally("patronus", &answers).unwrap(), reversed);
}

#[test]
fn wrong_length_always_fails() {
    let engine = engine();
    let keys: Vec<String> = engine.catalog().keys().map(str::to_string).collect();

    for key in &keys {
        let expected = engine.catalog().get(key).unwrap().question_count();
        for len in (0..expected + 4).filter(|len| *len != expected) {
            let answers = vec![None; len];
            assert_eq!(
                engine.tally(key, &answers),
                Err(ScoringError::LengthMismatch {
                    part: key.clone(),
                    expected,
                    actual: len,
                }),
                "part {key} with {len} answers"
            );
        }
    }
}

#[test]
fn house_always_yields_a_house() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..200 {
        let (mut answers, _) = random_submission(&engine, "house", &mut rng);
        // Blank out a random subset, down to an all-empty submission.
        for slot in answers.iter_mut() {
            if rand::Rng::gen_bool(&mut rng, 0.4) {
                *slot = None;
            }
        }
        let outcome = engine.score_part("house", &answers, &mut rng).unwrap();
        assert!(HOUSE_KEYS.contains(&outcome.result.unwrap().as_str()));
    }
}

#[test]
fn wand_example_resolves_to_yew_and_phoenix() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(0);
    let answers = vec![
        Some("Loyalty to its owner".to_string()),
        Some("Strong, dark wood (yew/ebony)".to_string()),
    ];

    let outcome = engine.score_part("wand", &answers, &mut rng).unwrap();

    assert_eq!(outcome.result.as_deref(), Some("Yew (wood) with Phoenix core"));
    let PartScores::Split(halves) = outcome.scores else {
        panic!("expected wood/core tallies");
    };
    assert_eq!(
        halves["wood"],
        ScoreTally::from([("Holly".into(), 1), ("Yew".into(), 4), ("Ebony".into(), 1)])
    );
    assert_eq!(
        halves["core"],
        ScoreTally::from([("Phoenix".into(), 3), ("Dragon".into(), 1)])
    );
}

#[test]
fn ties_split_evenly_and_clear_winners_never_vary() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(31337);
    let trials = 4000;

    // Ron 2, Hermione 2
    let tied = vec![
        Some("Is fiercely loyal and funny".to_string()),
        Some("Study in the library".to_string()),
    ];
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..trials {
        let outcome = engine.score_part("bestie", &tied, &mut rng).unwrap();
        *counts.entry(outcome.result.unwrap()).or_default() += 1;
    }
    assert_eq!(counts.len(), 2);
    for name in ["Ron", "Hermione"] {
        let share = counts[name] as f64 / trials as f64;
        assert!((share - 0.5).abs() < 0.05, "{name} won {share}");
    }

    // Ron 4
    let clear = vec![
        Some("Is fiercely loyal and funny".to_string()),
        Some("Play chess or socialize loudly".to_string()),
    ];
    for _ in 0..500 {
        let outcome = engine.score_part("bestie", &clear, &mut rng).unwrap();
        assert_eq!(outcome.result.as_deref(), Some("Ron"));
    }
}

#[test]
fn unrecognized_answers_contribute_nothing() {
    let engine = engine();
    let answers = vec![
        Some("Bravery  and daring".to_string()),
        Some("Owls".to_string()),
        Some("standing up for others!".to_string()),
        Some("Crimson".to_string()),
        Some(" ".to_string()),
        Some("Patience".to_string()),
    ];

    let tally = engine.tally("house", &answers).unwrap();

    assert_eq!(tally, ScoreTally::from([("Hufflepuff".into(), 2)]));
}

#[test]
fn unknown_part_is_rejected_before_length_check() {
    let engine = engine();
    assert_eq!(
        engine.tally("horcrux", &[None, None]),
        Err(ScoringError::UnknownQuiz {
            key: "horcrux".to_string()
        })
    );
}
