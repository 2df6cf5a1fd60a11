use super::Answered;
use crate::types::profile::{DepthProfile, IndividuationStage};
use std::collections::BTreeMap;

pub const SHADOW_DIMENSION: &str = "Shadow_Integration";
pub const ARCHETYPE_DIMENSION: &str = "Archetype";
pub const INDIVIDUATION_DIMENSION: &str = "Individuation";
/// Used for the shadow index and individuation score when no items were answered.
pub const NEUTRAL_DEPTH: f64 = 0.5;

pub fn is_depth_dimension(dimension: &str) -> bool {
    [SHADOW_DIMENSION, ARCHETYPE_DIMENSION, INDIVIDUATION_DIMENSION]
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(dimension))
}

pub fn depth_profile(answered: &[Answered<'_>]) -> DepthProfile {
    let mut shadow = Vec::new();
    let mut individuation = Vec::new();
    let mut archetypes: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for (question, response) in answered {
        let Some(dimension) = question.dimension.as_deref() else {
            continue;
        };
        if dimension.eq_ignore_ascii_case(SHADOW_DIMENSION) {
            shadow.extend(question.normalized_value(response));
        } else if dimension.eq_ignore_ascii_case(INDIVIDUATION_DIMENSION) {
            individuation.extend(question.normalized_value(response));
        } else if dimension.eq_ignore_ascii_case(ARCHETYPE_DIMENSION) {
            let (Some(archetype), Some(points)) =
                (question.archetype.as_deref(), question.response_type.points())
            else {
                continue;
            };
            if let Some(value) = question.keyed_value(response) {
                archetypes
                    .entry(archetype)
                    .or_default()
                    .push(value / points as f64);
            }
        }
    }

    let archetype_profile: BTreeMap<String, f64> = archetypes
        .into_iter()
        .map(|(name, values)| (name.to_string(), average(&values)))
        .collect();

    let mut primary_archetype: Option<(&String, f64)> = None;
    for (name, &score) in &archetype_profile {
        if primary_archetype.map_or(true, |(_, best)| score > best) {
            primary_archetype = Some((name, score));
        }
    }
    let primary_archetype = primary_archetype.map(|(name, _)| name.clone());

    let individuation_score = if individuation.is_empty() {
        NEUTRAL_DEPTH
    } else {
        average(&individuation)
    };

    DepthProfile {
        shadow_integration: if shadow.is_empty() {
            NEUTRAL_DEPTH
        } else {
            average(&shadow)
        },
        archetype_profile,
        primary_archetype,
        individuation_stage: IndividuationStage::from_score(individuation_score),
    }
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
