use super::Answered;
use crate::types::profile::{AxisConfidence, TypeResult};
use crate::types::question::{Preference, ResponseKind};
use crate::types::traits::{Trait, TraitScores};
use std::collections::BTreeMap;
use tracing::debug;

pub const FORCED_CHOICE_WEIGHT: f64 = 0.7;
pub const BIG_FIVE_WEIGHT: f64 = 0.3;
/// Below this overall probability a runner-up type is reported.
pub const SECONDARY_TYPE_THRESHOLD: f64 = 0.8;

/// Trait feeding each axis; the first letter receives `score / 100`.
const TRAIT_AXES: [(Trait, Preference, Preference); 4] = [
    (Trait::Extraversion, Preference::E, Preference::I),
    (Trait::Openness, Preference::N, Preference::S),
    (Trait::Agreeableness, Preference::F, Preference::T),
    (Trait::Conscientiousness, Preference::J, Preference::P),
];

pub fn classify(answered: &[Answered<'_>], big_five: &TraitScores) -> TypeResult {
    let mut totals: BTreeMap<Preference, f64> = BTreeMap::new();

    for (question, response) in answered {
        if question.response_type != ResponseKind::ForcedChoice {
            continue;
        }
        let Some(option) = response.selected_option.and_then(|tag| question.option(tag)) else {
            continue;
        };
        for (&letter, &score) in &option.scores {
            *totals.entry(letter).or_insert(0.0) += score * FORCED_CHOICE_WEIGHT;
        }
    }

    for (t, high, low) in TRAIT_AXES {
        let share = big_five.get(t) / 100.0;
        *totals.entry(high).or_insert(0.0) += BIG_FIVE_WEIGHT * share;
        *totals.entry(low).or_insert(0.0) += BIG_FIVE_WEIGHT * (1.0 - share);
    }

    let axes: Vec<AxisConfidence> = Preference::AXES
        .into_iter()
        .map(|(first, second)| {
            let first_score = totals.get(&first).copied().unwrap_or(0.0);
            let second_score = totals.get(&second).copied().unwrap_or(0.0);
            resolve_axis(first, second, first_score, second_score)
        })
        .collect();

    let primary_type: String = axes.iter().map(|axis| axis.winner.letter()).collect();
    let probability: f64 = axes.iter().map(|axis| axis.confidence).product();

    let secondary_type = if probability < SECONDARY_TYPE_THRESHOLD {
        least_certain_axis(&axes).map(|flip| {
            axes.iter()
                .enumerate()
                .map(|(i, axis)| {
                    if i == flip {
                        axis.winner.opposite().letter()
                    } else {
                        axis.winner.letter()
                    }
                })
                .collect()
        })
    } else {
        None
    };

    let mut dimension_probabilities = BTreeMap::new();
    for axis in &axes {
        dimension_probabilities.insert(axis.winner, axis.confidence);
        dimension_probabilities.insert(axis.winner.opposite(), 1.0 - axis.confidence);
    }

    debug!(
        primary = %primary_type,
        probability,
        secondary = ?secondary_type,
        "classified type"
    );

    TypeResult {
        primary_type,
        probability,
        secondary_type,
        dimension_probabilities,
        axes,
    }
}

/// Ties (including 0/0) go to the first letter of the pair.
fn resolve_axis(
    first: Preference,
    second: Preference,
    first_score: f64,
    second_score: f64,
) -> AxisConfidence {
    let total = first_score + second_score;
    let (winner, confidence) = if total <= 0.0 {
        (first, 0.5)
    } else if second_score > first_score {
        (second, second_score / total)
    } else {
        (first, first_score / total)
    };
    AxisConfidence {
        first,
        second,
        first_score,
        second_score,
        winner,
        confidence,
    }
}

fn least_certain_axis(axes: &[AxisConfidence]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, axis) in axes.iter().enumerate() {
        let margin = axis.margin();
        if best.map_or(true, |(_, lowest)| margin < lowest) {
            best = Some((i, margin));
        }
    }
    best.map(|(i, _)| i)
}
