use crate::types::profile::{ExtremeScore, Extremity, TraitInteraction, Uniqueness};
use crate::types::traits::TraitScores;

/// A named two- or three-trait combination with its own strength rule.
pub struct InteractionPattern {
    pub pattern: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub applies: fn(&TraitScores) -> bool,
    pub strength: fn(&TraitScores) -> f64,
}

fn moderate(_: &TraitScores) -> f64 {
    0.5
}

pub const PATTERNS: [InteractionPattern; 8] = [
    InteractionPattern {
        pattern: "creative_chaos",
        name: "Creative Chaos",
        description: "High creativity combined with low structure",
        applies: |s| s.openness > 70.0 && s.conscientiousness < 30.0,
        strength: |s| {
            let excess = (s.openness - 70.0).max(0.0) / 30.0;
            let deficit = (30.0 - s.conscientiousness).max(0.0) / 30.0;
            excess.min(deficit)
        },
    },
    InteractionPattern {
        pattern: "turbulent_extravert",
        name: "Turbulent Extravert",
        description: "High social energy paired with emotional sensitivity",
        applies: |s| s.extraversion > 70.0 && s.neuroticism > 70.0,
        strength: |s| {
            let energy = (s.extraversion - 70.0).max(0.0) / 30.0;
            let sensitivity = (s.neuroticism - 70.0).max(0.0) / 30.0;
            energy.min(sensitivity)
        },
    },
    InteractionPattern {
        pattern: "diplomatic_mediator",
        name: "Diplomatic Mediator",
        description: "Exceptional agreeableness held steady by emotional stability",
        applies: |s| s.agreeableness > 80.0 && s.neuroticism < 30.0,
        strength: moderate,
    },
    InteractionPattern {
        pattern: "analytical_perfectionist",
        name: "Analytical Perfectionist",
        description: "High standards driven by intellectual curiosity",
        applies: |s| s.conscientiousness > 80.0 && s.openness > 70.0,
        strength: moderate,
    },
    InteractionPattern {
        pattern: "stoic_guardian",
        name: "Stoic Guardian",
        description: "Stability, reliability and care for others in one dependable profile",
        applies: |s| s.conscientiousness > 70.0 && s.neuroticism < 20.0 && s.agreeableness > 60.0,
        strength: moderate,
    },
    InteractionPattern {
        pattern: "intense_idealist",
        name: "Intense Idealist",
        description: "Deeply felt ideals with a wide emotional range",
        applies: |s| s.openness > 80.0 && s.neuroticism > 60.0 && s.agreeableness > 70.0,
        strength: moderate,
    },
    InteractionPattern {
        pattern: "practical_skeptic",
        name: "Practical Skeptic",
        description: "Preference for proven methods with healthy skepticism",
        applies: |s| s.openness < 30.0 && s.agreeableness < 40.0,
        strength: moderate,
    },
    InteractionPattern {
        pattern: "social_architect",
        name: "Social Architect",
        description: "Brings structure to people and social settings",
        applies: |s| s.extraversion > 70.0 && s.conscientiousness > 70.0,
        strength: moderate,
    },
];

/// Matching patterns, strongest first.
pub fn trait_interactions(scores: &TraitScores) -> Vec<TraitInteraction> {
    let mut matched: Vec<TraitInteraction> = PATTERNS
        .iter()
        .filter(|pattern| (pattern.applies)(scores))
        .map(|pattern| TraitInteraction {
            pattern: pattern.pattern,
            name: pattern.name,
            strength: (pattern.strength)(scores).clamp(0.0, 1.0),
            description: pattern.description,
        })
        .collect();
    matched.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    matched
}

pub const EXTREME_WEIGHT: f64 = 15.0;
pub const RARE_WEIGHT: f64 = 10.0;
pub const PARADOX_WEIGHT: f64 = 20.0;

const RARE_COMBINATIONS: [(&str, fn(&TraitScores) -> bool); 2] = [
    ("High Openness + High Conscientiousness", |s| {
        s.openness > 70.0 && s.conscientiousness > 70.0
    }),
    ("High Extraversion + Low Neuroticism", |s| {
        s.extraversion > 70.0 && s.neuroticism < 30.0
    }),
];

const PARADOXES: [(&str, fn(&TraitScores) -> bool); 1] = [("The Unshakeable Altruist", |s| {
    s.agreeableness > 80.0 && s.neuroticism < 20.0
})];

pub fn uniqueness(scores: &TraitScores, percentiles: &TraitScores) -> Uniqueness {
    let extreme_scores: Vec<ExtremeScore> = percentiles
        .iter()
        .filter_map(|(t, percentile)| {
            let level = if percentile > 90.0 {
                Extremity::High
            } else if percentile < 10.0 {
                Extremity::Low
            } else {
                return None;
            };
            Some(ExtremeScore {
                trait_name: t,
                percentile,
                level,
            })
        })
        .collect();

    let rare_combinations: Vec<&'static str> = RARE_COMBINATIONS
        .iter()
        .filter(|(_, applies)| applies(scores))
        .map(|(label, _)| *label)
        .collect();
    let paradoxical_patterns: Vec<&'static str> = PARADOXES
        .iter()
        .filter(|(_, applies)| applies(scores))
        .map(|(label, _)| *label)
        .collect();

    let uniqueness_score = (extreme_scores.len() as f64 * EXTREME_WEIGHT
        + rare_combinations.len() as f64 * RARE_WEIGHT
        + paradoxical_patterns.len() as f64 * PARADOX_WEIGHT)
        .min(100.0);

    Uniqueness {
        extreme_scores,
        rare_combinations,
        paradoxical_patterns,
        uniqueness_score,
    }
}
