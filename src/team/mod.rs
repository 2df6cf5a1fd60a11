//! Statistical comparison of independently scored team members.

pub mod composition;
pub mod dynamics;
pub mod leadership;
pub mod pairs;

use crate::error::{PersonaError, Result};
use crate::types::profile::ProfileSummary;
use crate::types::traits::TraitScores;
use serde::Serialize;
use tracing::info;

pub use composition::{TeamComposition, TraitRange};
pub use dynamics::{BlindSpot, TeamDynamics, TeamStrength};
pub use leadership::LeadershipAnalysis;
pub use pairs::{Conflict, PairInsight};

pub const MIN_TEAM_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub scores: TraitScores,
    pub type_code: String,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, scores: TraitScores, type_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores,
            type_code: type_code.into(),
        }
    }

    pub fn from_summary(name: impl Into<String>, summary: ProfileSummary) -> Self {
        Self::new(name, summary.big_five.scores, summary.mbti.primary_type)
    }

    pub(crate) fn has_letter(&self, letter: char) -> bool {
        self.type_code.contains(letter)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamInsights {
    pub team_size: usize,
    pub composition: TeamComposition,
    pub communication_map: Vec<PairInsight>,
    pub potential_conflicts: Vec<Conflict>,
    pub team_strengths: Vec<TeamStrength>,
    pub blind_spots: Vec<BlindSpot>,
    pub dynamics: TeamDynamics,
    pub leadership: LeadershipAnalysis,
}

pub fn generate(members: &[TeamMember]) -> Result<TeamInsights> {
    if members.len() < MIN_TEAM_SIZE {
        return Err(PersonaError::InsufficientData {
            observed: members.len(),
            required: MIN_TEAM_SIZE,
        });
    }

    let ranges = composition::trait_ranges(members);
    let composition = composition::analyze(members, &ranges);
    let insights = TeamInsights {
        team_size: members.len(),
        communication_map: pairs::communication_map(members),
        potential_conflicts: pairs::potential_conflicts(members, &ranges),
        team_strengths: dynamics::strengths(members, &ranges),
        blind_spots: dynamics::blind_spots(&ranges),
        dynamics: dynamics::analyze(members, &ranges),
        leadership: leadership::analyze(members),
        composition,
    };

    info!(
        members = insights.team_size,
        diversity = insights.composition.diversity_score,
        conflicts = insights.potential_conflicts.len(),
        "generated team insights"
    );
    Ok(insights)
}


#[cfg(test)]
mod tests {
    use super::fixtures::member;
    use super::*;

    #[test]
    fn single_member_is_insufficient() {
        let result = generate(&[member("ana", [50.0; 5], "INTJ")]);
        match result {
            Err(PersonaError::InsufficientData { observed, required }) => {
                assert_eq!((observed, required), (1, 2));
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
    }

    #[test]
    fn generates_every_section_for_a_pair() {
        let team = [
            member("ana", [80.0, 20.0, 90.0, 30.0, 80.0], "ENFP"),
            member("bo", [20.0, 85.0, 15.0, 85.0, 20.0], "ISTJ"),
        ];
        let insights = generate(&team).expect("team of two should be analyzed");

        assert_eq!(insights.team_size, 2);
        assert_eq!(insights.communication_map.len(), 1);
        assert!(!insights.potential_conflicts.is_empty());
        assert_eq!(insights.composition.type_distribution.len(), 2);
    }

    #[test]
    fn summary_converts_into_member() {
        let summary: ProfileSummary = serde_json::from_str(
            r#"{"big_five": {"scores": {"Extraversion": 72.5}}, "mbti": {"primary_type": "ENTJ"}}"#,
        )
        .expect("summary should parse");
        let member = TeamMember::from_summary("cy", summary);
        assert_eq!(member.scores.extraversion, 72.5);
        assert!(member.has_letter('J'));
    }
}
