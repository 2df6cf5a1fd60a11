use super::TeamMember;
use crate::scoring::stats;
use crate::types::profile::Extremity;
use crate::types::traits::Trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean standard deviation that maps to a diversity score of 100.
pub const DIVERSITY_SCALE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraitRange {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingPerspective {
    pub perspective: &'static str,
    pub impact: &'static str,
    pub suggestion: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DominantTrait {
    #[serde(rename = "trait")]
    pub trait_name: Trait,
    pub level: Extremity,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamComposition {
    pub trait_ranges: BTreeMap<Trait, TraitRange>,
    pub diversity_score: f64,
    pub balance_score: f64,
    pub missing_perspectives: Vec<MissingPerspective>,
    pub dominant_traits: Vec<DominantTrait>,
    pub type_distribution: BTreeMap<String, usize>,
    pub team_profile: &'static str,
}

pub fn trait_ranges(members: &[TeamMember]) -> BTreeMap<Trait, TraitRange> {
    Trait::ALL
        .into_iter()
        .map(|t| {
            let values: Vec<f64> = members.iter().map(|m| m.scores.get(t)).collect();
            let range = TraitRange {
                mean: stats::mean(&values).unwrap_or(0.0),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                std_dev: stats::population_std(&values),
            };
            (t, range)
        })
        .collect()
}

pub(crate) fn mean_of(ranges: &BTreeMap<Trait, TraitRange>, t: Trait) -> f64 {
    ranges.get(&t).map(|range| range.mean).unwrap_or(0.0)
}

pub(crate) fn mean_std(ranges: &BTreeMap<Trait, TraitRange>) -> f64 {
    let stds: Vec<f64> = ranges.values().map(|range| range.std_dev).collect();
    stats::mean(&stds).unwrap_or(0.0)
}

pub fn diversity_score(ranges: &BTreeMap<Trait, TraitRange>) -> f64 {
    (mean_std(ranges) / DIVERSITY_SCALE * 100.0).min(100.0)
}

/// 100 when trait means span high, moderate and low bands; 66.7 for two; 33.3 for one.
pub fn balance_score(ranges: &BTreeMap<Trait, TraitRange>) -> f64 {
    let (mut high, mut moderate, mut low) = (false, false, false);
    for range in ranges.values() {
        if range.mean > 60.0 {
            high = true;
        } else if range.mean < 40.0 {
            low = true;
        } else {
            moderate = true;
        }
    }
    match [high, moderate, low].iter().filter(|present| **present).count() {
        3 => 100.0,
        2 => 66.7,
        _ => 33.3,
    }
}

pub fn missing_perspectives(ranges: &BTreeMap<Trait, TraitRange>) -> Vec<MissingPerspective> {
    let avg = |t| mean_of(ranges, t);
    let mut missing = Vec::new();

    if avg(Trait::Conscientiousness) < 40.0 {
        missing.push(MissingPerspective {
            perspective: "Conscientiousness",
            impact: "Follow-through, organization and deadlines may suffer",
            suggestion: "Adopt external project tracking or add detail-oriented members",
        });
    }
    if avg(Trait::Openness) < 40.0 {
        missing.push(MissingPerspective {
            perspective: "Openness",
            impact: "New ideas may meet resistance",
            suggestion: "Schedule regular brainstorming and invite outside perspectives",
        });
    }
    let extraversion = avg(Trait::Extraversion);
    if extraversion < 35.0 {
        missing.push(MissingPerspective {
            perspective: "Extraversion",
            impact: "Networking, presentations and external communication may lag",
            suggestion: "Designate outgoing allies for external-facing work",
        });
    } else if extraversion > 65.0 {
        missing.push(MissingPerspective {
            perspective: "Introversion",
            impact: "Deep focus time and reflective thinking may be scarce",
            suggestion: "Protect quiet work time and offer written channels",
        });
    }
    if avg(Trait::Agreeableness) < 35.0 {
        missing.push(MissingPerspective {
            perspective: "Agreeableness",
            impact: "Conflict may be frequent and harmony hard to keep",
            suggestion: "Agree on a conflict resolution process",
        });
    }
    if avg(Trait::Neuroticism) > 65.0 {
        missing.push(MissingPerspective {
            perspective: "Emotional Stability",
            impact: "Stress and emotional volatility may run high",
            suggestion: "Introduce stress management practices and clear communication protocols",
        });
    }
    missing
}

fn team_profile(ranges: &BTreeMap<Trait, TraitRange>, diversity: f64) -> &'static str {
    let avg = |t| mean_of(ranges, t);
    let (o, c, e, a, n) = (
        avg(Trait::Openness),
        avg(Trait::Conscientiousness),
        avg(Trait::Extraversion),
        avg(Trait::Agreeableness),
        avg(Trait::Neuroticism),
    );

    if o > 60.0 && c < 40.0 {
        "Creative Innovators"
    } else if c > 60.0 && a > 60.0 {
        "Reliable Collaborators"
    } else if e > 60.0 && o > 60.0 {
        "Dynamic Explorers"
    } else if c > 60.0 && n < 40.0 {
        "Steady Achievers"
    } else if diversity > 70.0 {
        "Diverse Perspectives"
    } else {
        "Balanced Team"
    }
}

pub fn analyze(members: &[TeamMember], ranges: &BTreeMap<Trait, TraitRange>) -> TeamComposition {
    let diversity = diversity_score(ranges);

    let dominant_traits = ranges
        .iter()
        .filter_map(|(&t, range)| {
            let level = if range.mean > 65.0 {
                Extremity::High
            } else if range.mean < 35.0 {
                Extremity::Low
            } else {
                return None;
            };
            Some(DominantTrait {
                trait_name: t,
                level,
            })
        })
        .collect();

    let mut type_distribution = BTreeMap::new();
    for member in members {
        *type_distribution.entry(member.type_code.clone()).or_insert(0) += 1;
    }

    TeamComposition {
        trait_ranges: ranges.clone(),
        diversity_score: diversity,
        balance_score: balance_score(ranges),
        missing_perspectives: missing_perspectives(ranges),
        dominant_traits,
        type_distribution,
        team_profile: team_profile(ranges, diversity),
    }
}
