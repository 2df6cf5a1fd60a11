use super::Answered;
use crate::types::traits::{Trait, TraitScores};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean-based ability estimate for one trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrtEstimate {
    pub theta: f64,
    pub standard_error: f64,
    pub items: usize,
}

impl IrtEstimate {
    pub const EMPTY: IrtEstimate = IrtEstimate {
        theta: 0.0,
        standard_error: 1.0,
        items: 0,
    };
}

/// Classical factor-weighted score per trait on 0-100. Traits with no loaded items score 0.
pub fn raw_scores(answered: &[Answered<'_>]) -> TraitScores {
    let mut weighted = [0.0_f64; 5];
    let mut total_weight = [0.0_f64; 5];

    for (question, response) in answered {
        let Some(value) = question.normalized_value(response) else {
            continue;
        };
        for (t, loading) in question.trait_loadings() {
            let slot = trait_slot(t);
            weighted[slot] += value * loading;
            total_weight[slot] += loading.abs();
        }
    }

    TraitScores::from_fn(|t| {
        let slot = trait_slot(t);
        if total_weight[slot] > 0.0 {
            weighted[slot] / total_weight[slot] * 100.0
        } else {
            0.0
        }
    })
}

/// θ = (mean − midpoint) / (scale_max / 4), computed per item so mixed scales share one
/// metric; SE = 1/√n.
pub fn irt_estimates(answered: &[Answered<'_>]) -> BTreeMap<Trait, IrtEstimate> {
    let mut centered: BTreeMap<Trait, Vec<f64>> = BTreeMap::new();

    for (question, response) in answered {
        let (Some(t), Some(scale_max)) =
            (question.trait_dimension(), question.response_type.scale_max())
        else {
            continue;
        };
        if let Some(value) = question.scaled_value(response) {
            let midpoint = scale_max / 2.0;
            let scale_factor = scale_max / 4.0;
            centered
                .entry(t)
                .or_default()
                .push((value - midpoint) / scale_factor);
        }
    }

    Trait::ALL
        .into_iter()
        .map(|t| {
            let estimate = match centered.get(&t) {
                Some(values) if !values.is_empty() => {
                    let n = values.len() as f64;
                    IrtEstimate {
                        theta: values.iter().sum::<f64>() / n,
                        standard_error: 1.0 / n.sqrt(),
                        items: values.len(),
                    }
                }
                _ => IrtEstimate::EMPTY,
            };
            (t, estimate)
        })
        .collect()
}

fn trait_slot(t: Trait) -> usize {
    match t {
        Trait::Openness => 0,
        Trait::Conscientiousness => 1,
        Trait::Extraversion => 2,
        Trait::Agreeableness => 3,
        Trait::Neuroticism => 4,
    }
}
