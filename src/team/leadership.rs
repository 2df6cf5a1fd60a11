use super::TeamMember;
use crate::scoring::stats;
use crate::types::traits::TraitScores;
use serde::Serialize;
use std::collections::BTreeMap;

pub const NATURAL_LEADER_THRESHOLD: f64 = 70.0;
pub const HIGH_POTENTIAL_THRESHOLD: f64 = 60.0;
/// Population variance of potentials above which the team reads as hierarchical.
pub const HIERARCHY_VARIANCE: f64 = 400.0;

const COMMANDING_TYPES: [&str; 4] = ["ENTJ", "ESTJ", "ENFJ", "INTJ"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LeadershipStyle {
    Inspirational,
    Strategic,
    Servant,
    Visionary,
    Steady,
    Adaptive,
}

impl LeadershipStyle {
    pub fn label(self) -> &'static str {
        match self {
            Self::Inspirational => "Inspirational",
            Self::Strategic => "Strategic",
            Self::Servant => "Servant",
            Self::Visionary => "Visionary",
            Self::Steady => "Steady",
            Self::Adaptive => "Adaptive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeadershipModel {
    Distributed,
    Hierarchical,
    Collaborative,
}

impl LeadershipModel {
    pub fn description(self) -> &'static str {
        match self {
            Self::Distributed => "Multiple members can step into leadership roles",
            Self::Hierarchical => "Clear leadership hierarchy with distinct leaders",
            Self::Collaborative => "Leadership emerges from consensus and shared ownership",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NaturalLeader {
    pub member: String,
    pub score: f64,
    pub style: LeadershipStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadershipAnalysis {
    pub natural_leaders: Vec<NaturalLeader>,
    pub style_distribution: BTreeMap<LeadershipStyle, usize>,
    pub primary_style: Option<LeadershipStyle>,
    pub model: LeadershipModel,
    pub high_potential_ratio: f64,
}

pub fn leadership_potential(scores: &TraitScores, type_code: &str) -> f64 {
    let mut potential = 50.0
        + (scores.extraversion - 50.0) * 0.3
        + (scores.conscientiousness - 50.0) * 0.25
        + (50.0 - scores.neuroticism) * 0.2
        - (scores.agreeableness - 55.0).abs() * 0.1;

    if COMMANDING_TYPES.contains(&type_code) {
        potential += 10.0;
    } else if type_code.contains('J') {
        potential += 5.0;
    }
    potential.clamp(0.0, 100.0)
}

pub fn leadership_style(scores: &TraitScores, type_code: &str) -> LeadershipStyle {
    let TraitScores {
        openness: o,
        conscientiousness: c,
        extraversion: e,
        agreeableness: a,
        neuroticism: n,
    } = *scores;

    if e > 65.0 && a > 65.0 {
        LeadershipStyle::Inspirational
    } else if c > 70.0 && type_code.contains('T') {
        LeadershipStyle::Strategic
    } else if a > 70.0 && type_code.contains('F') {
        LeadershipStyle::Servant
    } else if o > 70.0 && e > 60.0 {
        LeadershipStyle::Visionary
    } else if c > 65.0 && n < 40.0 {
        LeadershipStyle::Steady
    } else {
        LeadershipStyle::Adaptive
    }
}

pub fn analyze(members: &[TeamMember]) -> LeadershipAnalysis {
    let potentials: Vec<f64> = members
        .iter()
        .map(|m| leadership_potential(&m.scores, &m.type_code))
        .collect();

    let mut natural_leaders: Vec<NaturalLeader> = members
        .iter()
        .zip(&potentials)
        .filter(|(_, &score)| score > NATURAL_LEADER_THRESHOLD)
        .map(|(m, &score)| NaturalLeader {
            member: m.name.clone(),
            score,
            style: leadership_style(&m.scores, &m.type_code),
        })
        .collect();
    natural_leaders.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut style_distribution: BTreeMap<LeadershipStyle, usize> = BTreeMap::new();
    let mut primary_style: Option<(LeadershipStyle, usize)> = None;
    for leader in &natural_leaders {
        let count = style_distribution.entry(leader.style).or_insert(0);
        *count += 1;
    }
    // Ties go to the style of the strongest leader.
    for leader in &natural_leaders {
        let count = style_distribution[&leader.style];
        if primary_style.map_or(true, |(_, best)| count > best) {
            primary_style = Some((leader.style, count));
        }
    }

    let n = members.len().max(1) as f64;
    let high_potential = potentials
        .iter()
        .filter(|&&score| score > HIGH_POTENTIAL_THRESHOLD)
        .count();
    let model = if high_potential as f64 >= n * 0.5 {
        LeadershipModel::Distributed
    } else if stats::population_variance(&potentials) > HIERARCHY_VARIANCE {
        LeadershipModel::Hierarchical
    } else {
        LeadershipModel::Collaborative
    };

    LeadershipAnalysis {
        natural_leaders,
        style_distribution,
        primary_style: primary_style.map(|(style, _)| style),
        model,
        high_potential_ratio: high_potential as f64 / n,
    }
}
