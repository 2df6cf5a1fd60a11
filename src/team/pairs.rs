use super::composition::{mean_of, TraitRange};
use super::TeamMember;
use crate::types::traits::{Trait, TraitScores};
use serde::Serialize;
use std::collections::BTreeMap;

pub const BASE_COMPATIBILITY: f64 = 70.0;
pub const TIP_DIFFERENCE: f64 = 40.0;
pub const MAX_TIPS: usize = 5;
pub const MAX_CONFLICTS: usize = 5;
pub const MAX_MITIGATIONS: usize = 3;
/// Trait spread below which the whole team is flagged as too similar.
pub const LOW_DIVERSITY_STD: f64 = 10.0;

#[derive(Debug, Clone, Serialize)]
pub struct PairInsight {
    pub members: [String; 2],
    pub types: [String; 2],
    pub compatibility_score: f64,
    pub tips: Vec<&'static str>,
}

pub fn compatibility(a: &TraitScores, b: &TraitScores) -> f64 {
    let diff = |t| (a.get(t) - b.get(t)).abs();
    let mut score = BASE_COMPATIBILITY;

    let agreeableness = diff(Trait::Agreeableness);
    if agreeableness < 20.0 {
        score += 10.0;
    } else if agreeableness > 40.0 {
        score -= 10.0;
    }

    let conscientiousness = diff(Trait::Conscientiousness);
    if conscientiousness > 20.0 && conscientiousness < 40.0 {
        score += 5.0;
    }

    if diff(Trait::Neuroticism) > 50.0 {
        score -= 15.0;
    }

    let extraversion = diff(Trait::Extraversion);
    if extraversion > 60.0 {
        score -= 10.0;
    } else if extraversion < 30.0 {
        score += 5.0;
    }

    score.clamp(0.0, 100.0)
}

/// Advice for `from` when working with `to`. Each row: trait, tips when `from` scores
/// higher, tips when `from` scores lower.
const TRAIT_TIPS: [(Trait, [&str; 2], [&str; 2]); 4] = [
    (
        Trait::Extraversion,
        [
            "Give them time to process before expecting responses",
            "Consider written communication for complex topics",
        ],
        [
            "Be prepared for more energetic, verbal communication",
            "Don't mistake enthusiasm for aggression",
        ],
    ),
    (
        Trait::Agreeableness,
        [
            "Be direct and logical in your communication",
            "Focus on facts over feelings when making arguments",
        ],
        [
            "Show appreciation and acknowledge their contributions",
            "Use collaborative language ('we' instead of 'you')",
        ],
    ),
    (
        Trait::Conscientiousness,
        [
            "Be flexible with deadlines and processes",
            "Focus on outcomes rather than methods",
        ],
        [
            "Provide clear timelines and expectations",
            "Follow through on commitments consistently",
        ],
    ),
    (
        Trait::Openness,
        [
            "Ground abstract ideas in practical examples",
            "Respect their preference for proven methods",
        ],
        [
            "Be open to brainstorming and 'what if' discussions",
            "Don't dismiss ideas as impractical too quickly",
        ],
    ),
];

pub fn communication_tips(from: &TeamMember, to: &TeamMember) -> Vec<&'static str> {
    let mut tips = Vec::new();
    for (t, when_higher, when_lower) in TRAIT_TIPS {
        let (mine, theirs) = (from.scores.get(t), to.scores.get(t));
        if (mine - theirs).abs() > TIP_DIFFERENCE {
            tips.extend(if mine > theirs { when_higher } else { when_lower });
        }
    }

    if from.has_letter('T') && to.has_letter('F') {
        tips.push("Acknowledge the personal impact of decisions");
    } else if from.has_letter('F') && to.has_letter('T') {
        tips.push("Present logical reasoning for your positions");
    }
    if from.has_letter('J') && to.has_letter('P') {
        tips.push("Allow for flexibility in plans and schedules");
    } else if from.has_letter('P') && to.has_letter('J') {
        tips.push("Respect their need for closure and decisions");
    }

    tips.truncate(MAX_TIPS);
    tips
}

/// One entry per unordered pair, in member order.
pub fn communication_map(members: &[TeamMember]) -> Vec<PairInsight> {
    let mut map = Vec::new();
    for (i, first) in members.iter().enumerate() {
        for second in &members[i + 1..] {
            map.push(PairInsight {
                members: [first.name.clone(), second.name.clone()],
                types: [first.type_code.clone(), second.type_code.clone()],
                compatibility_score: compatibility(&first.scores, &second.scores),
                tips: communication_tips(first, second),
            });
        }
    }
    map
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    WorkStyle,
    CommunicationStyle,
    DecisionMaking,
    StressResponse,
    LackOfDiversity,
    LowAgreeableness,
}

impl ConflictKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::WorkStyle => "work style",
            Self::CommunicationStyle => "communication style",
            Self::DecisionMaking => "decision making",
            Self::StressResponse => "stress response",
            Self::LackOfDiversity => "lack of diversity",
            Self::LowAgreeableness => "low agreeableness",
        }
    }

    fn mitigations(self) -> [&'static str; 2] {
        match self {
            Self::WorkStyle => [
                "Establish clear project roles and responsibilities",
                "Use project management tools to track progress",
            ],
            Self::CommunicationStyle => [
                "Use multiple communication channels (written and verbal)",
                "Schedule regular check-ins with clear agendas",
            ],
            Self::DecisionMaking => [
                "Create decision-making frameworks that balance all perspectives",
                "Rotate who leads different types of decisions",
            ],
            Self::StressResponse => [
                "Develop team stress signals and support protocols",
                "Build in buffer time for high-pressure projects",
            ],
            Self::LackOfDiversity => [
                "Bring in external viewpoints",
                "Practice devil's advocate exercises",
            ],
            Self::LowAgreeableness => [
                "Agree on team values and a conflict resolution process",
                "Practice active listening and celebrate collaborative wins",
            ],
        }
    }

    /// Extra severity on top of the per-area base.
    fn weight(self) -> f64 {
        match self {
            Self::WorkStyle => 10.0,
            Self::StressResponse => 15.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    pub members: Vec<String>,
    pub areas: Vec<ConflictKind>,
    #[serde(rename = "trait", skip_serializing_if = "Option::is_none")]
    pub trait_name: Option<Trait>,
    pub severity: f64,
    pub mitigation: Vec<&'static str>,
}

/// Pair thresholds: trait, difference that must be exceeded, resulting area.
const PAIR_CONFLICTS: [(Trait, f64, ConflictKind); 4] = [
    (Trait::Conscientiousness, 50.0, ConflictKind::WorkStyle),
    (Trait::Extraversion, 60.0, ConflictKind::CommunicationStyle),
    (Trait::Agreeableness, 50.0, ConflictKind::DecisionMaking),
    (Trait::Neuroticism, 50.0, ConflictKind::StressResponse),
];

pub fn conflict_areas(a: &TraitScores, b: &TraitScores) -> Vec<ConflictKind> {
    PAIR_CONFLICTS
        .iter()
        .filter(|(t, threshold, _)| (a.get(*t) - b.get(*t)).abs() > *threshold)
        .map(|(_, _, kind)| *kind)
        .collect()
}

pub fn conflict_severity(areas: &[ConflictKind]) -> f64 {
    let base = areas.len() as f64 * 20.0;
    let extra: f64 = areas.iter().map(|kind| kind.weight()).sum();
    (base + extra).min(100.0)
}

fn mitigation(areas: &[ConflictKind]) -> Vec<&'static str> {
    areas
        .iter()
        .flat_map(|kind| kind.mitigations())
        .take(MAX_MITIGATIONS)
        .collect()
}

/// Pairwise and team-wide conflicts, most severe first, at most five.
pub fn potential_conflicts(
    members: &[TeamMember],
    ranges: &BTreeMap<Trait, TraitRange>,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, first) in members.iter().enumerate() {
        for second in &members[i + 1..] {
            let areas = conflict_areas(&first.scores, &second.scores);
            if areas.is_empty() {
                continue;
            }
            conflicts.push(Conflict {
                members: vec![first.name.clone(), second.name.clone()],
                severity: conflict_severity(&areas),
                mitigation: mitigation(&areas),
                trait_name: None,
                areas,
            });
        }
    }

    for (&t, range) in ranges {
        if range.std_dev < LOW_DIVERSITY_STD {
            conflicts.push(team_wide(ConflictKind::LackOfDiversity, Some(t), 40.0));
        }
    }
    if mean_of(ranges, Trait::Agreeableness) < 35.0 {
        conflicts.push(team_wide(ConflictKind::LowAgreeableness, None, 60.0));
    }

    conflicts.sort_by(|a, b| b.severity.total_cmp(&a.severity));
    conflicts.truncate(MAX_CONFLICTS);
    conflicts
}

fn team_wide(kind: ConflictKind, trait_name: Option<Trait>, severity: f64) -> Conflict {
    Conflict {
        members: vec!["Entire team".to_string()],
        areas: vec![kind],
        trait_name,
        severity,
        mitigation: kind.mitigations().to_vec(),
    }
}
