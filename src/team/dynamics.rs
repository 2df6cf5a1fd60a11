use super::composition::{mean_of, mean_std, TraitRange};
use super::TeamMember;
use crate::types::traits::Trait;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const MAX_STRENGTHS: usize = 5;
pub const MAX_BLIND_SPOTS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct TeamStrength {
    pub strength: &'static str,
    pub leverage: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlindSpot {
    pub blind_spot: &'static str,
    pub mitigation: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<Trait>,
}

impl BlindSpot {
    fn new(blind_spot: &'static str, mitigation: &'static str) -> Self {
        Self {
            blind_spot,
            mitigation,
            traits: Vec::new(),
        }
    }
}

pub fn strengths(members: &[TeamMember], ranges: &BTreeMap<Trait, TraitRange>) -> Vec<TeamStrength> {
    let avg = |t| mean_of(ranges, t);
    let mut found = Vec::new();
    let mut add = |strength, leverage| found.push(TeamStrength { strength, leverage });

    if avg(Trait::Openness) > 65.0 {
        add(
            "Innovation and Creativity",
            "Take on projects that need creative problem-solving",
        );
    }
    if avg(Trait::Conscientiousness) > 65.0 {
        add(
            "Reliability and Execution",
            "Handle complex projects that demand attention to detail",
        );
    }
    if avg(Trait::Extraversion) > 65.0 {
        add(
            "Dynamic Collaboration",
            "Lead client-facing and highly collaborative work",
        );
    }
    if avg(Trait::Agreeableness) > 65.0 {
        add(
            "Harmonious Cooperation",
            "Build partnerships and manage sensitive stakeholders",
        );
    }
    if avg(Trait::Neuroticism) < 35.0 {
        add(
            "Emotional Stability",
            "Take on high-stakes projects and crisis management",
        );
    }
    if mean_std(ranges) > 20.0 {
        add(
            "Diverse Perspectives",
            "Tackle multifaceted problems that need different angles",
        );
    }
    let distinct_types: BTreeSet<&str> = members.iter().map(|m| m.type_code.as_str()).collect();
    if distinct_types.len() as f64 >= members.len() as f64 * 0.7 {
        add(
            "Cognitive Diversity",
            "Use complementary thinking styles for thorough analysis",
        );
    }

    found.truncate(MAX_STRENGTHS);
    found
}

pub fn blind_spots(ranges: &BTreeMap<Trait, TraitRange>) -> Vec<BlindSpot> {
    let avg = |t| mean_of(ranges, t);
    let mut found = Vec::new();

    if avg(Trait::Openness) < 35.0 {
        found.push(BlindSpot::new(
            "Resistance to Innovation",
            "Schedule regular innovation days and invite outside speakers",
        ));
    }
    if avg(Trait::Conscientiousness) < 35.0 {
        found.push(BlindSpot::new(
            "Execution Challenges",
            "Introduce rigorous project tracking and accountability",
        ));
    }
    let extraversion = avg(Trait::Extraversion);
    if extraversion < 30.0 {
        found.push(BlindSpot::new(
            "Limited External Engagement",
            "Assign ambassador roles for external engagement",
        ));
    } else if extraversion > 70.0 {
        found.push(BlindSpot::new(
            "Insufficient Deep Work Time",
            "Schedule protected quiet time for focused work",
        ));
    }
    if avg(Trait::Agreeableness) > 75.0 {
        found.push(BlindSpot::new(
            "Conflict Avoidance",
            "Practice structured debate and rotate a devil's advocate role",
        ));
    }
    if avg(Trait::Neuroticism) > 65.0 {
        found.push(BlindSpot::new(
            "Stress Amplification",
            "Agree on stress management protocols and celebrate wins",
        ));
    }

    let similar: Vec<Trait> = ranges
        .iter()
        .filter(|(_, range)| range.std_dev < 15.0)
        .map(|(&t, _)| t)
        .collect();
    if similar.len() >= 3 {
        found.push(BlindSpot {
            traits: similar,
            ..BlindSpot::new(
                "Homogeneous Thinking",
                "Seek out contrarian views and diverse input",
            )
        });
    }

    found.truncate(MAX_BLIND_SPOTS);
    found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variability {
    High,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnergyFlow {
    pub flow: &'static str,
    pub variability: Variability,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionStyle {
    pub thinking_style: &'static str,
    pub closure_style: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredLevel {
    pub score: f64,
    pub level: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDynamics {
    pub energy_flow: EnergyFlow,
    pub decision_style: DecisionStyle,
    pub innovation_potential: ScoredLevel,
    pub stability_index: ScoredLevel,
}

fn dominance(
    first: usize,
    second: usize,
    first_label: &'static str,
    second_label: &'static str,
    even: &'static str,
) -> &'static str {
    let (first, second) = (first as f64, second as f64);
    if first > second * 1.5 {
        first_label
    } else if second > first * 1.5 {
        second_label
    } else {
        even
    }
}

pub fn analyze(members: &[TeamMember], ranges: &BTreeMap<Trait, TraitRange>) -> TeamDynamics {
    let avg = |t| mean_of(ranges, t);
    let extraversion = ranges.get(&Trait::Extraversion).copied();
    let (e_mean, e_std) = extraversion
        .map(|range| (range.mean, range.std_dev))
        .unwrap_or((0.0, 0.0));

    let energy_flow = EnergyFlow {
        flow: if e_mean > 60.0 {
            "High Energy Collaborative"
        } else if e_mean < 40.0 {
            "Focused Independent"
        } else {
            "Balanced Flow"
        },
        variability: if e_std > 25.0 {
            Variability::High
        } else {
            Variability::Low
        },
    };

    let count = |letter| members.iter().filter(|m| m.has_letter(letter)).count();
    let decision_style = DecisionStyle {
        thinking_style: dominance(
            count('T'),
            count('F'),
            "Logic-driven",
            "Values-driven",
            "Balanced",
        ),
        closure_style: dominance(
            count('J'),
            count('P'),
            "Quick closure",
            "Exploratory",
            "Flexible",
        ),
    };

    let innovation = avg(Trait::Openness) * 0.7 + (100.0 - avg(Trait::Neuroticism)) * 0.3;
    let stability = (100.0 - avg(Trait::Neuroticism)) * 0.6 + avg(Trait::Conscientiousness) * 0.4;

    TeamDynamics {
        energy_flow,
        decision_style,
        innovation_potential: ScoredLevel {
            score: innovation,
            level: if innovation > 70.0 {
                "High Innovation Potential"
            } else if innovation < 40.0 {
                "Incremental Innovation"
            } else {
                "Moderate Innovation"
            },
        },
        stability_index: ScoredLevel {
            score: stability,
            level: if stability > 70.0 {
                "High Stability"
            } else if stability < 40.0 {
                "Variable Stability"
            } else {
                "Moderate Stability"
            },
        },
    }
}
