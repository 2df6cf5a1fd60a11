use super::question::Preference;
use super::traits::{Trait, TraitScores};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMode {
    Core,
    Discovery,
}

impl AssessmentMode {
    pub const DEFAULT_MIN_CORE: usize = 160;
    pub const DEFAULT_MIN_DISCOVERY: usize = 48;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub confidence_level: f64,
}

pub type FacetScores = BTreeMap<Trait, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Serialize)]
pub struct BigFiveResult {
    pub scores: TraitScores,
    pub percentiles: TraitScores,
    pub standard_errors: TraitScores,
    pub confidence_intervals: BTreeMap<Trait, ConfidenceInterval>,
    pub facet_scores: FacetScores,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub high_uncertainty_traits: Vec<Trait>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_warning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisConfidence {
    pub first: Preference,
    pub second: Preference,
    pub first_score: f64,
    pub second_score: f64,
    pub winner: Preference,
    pub confidence: f64,
}

impl AxisConfidence {
    pub fn margin(&self) -> f64 {
        (self.first_score - self.second_score).abs()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeResult {
    pub primary_type: String,
    pub probability: f64,
    pub secondary_type: Option<String>,
    pub dimension_probabilities: BTreeMap<Preference, f64>,
    pub axes: Vec<AxisConfidence>,
}

/// Jungian cognitive functions: perceiving/judging axis letter plus attitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CognitiveFunction {
    Ni,
    Ne,
    Si,
    Se,
    Ti,
    Te,
    Fi,
    Fe,
}

impl CognitiveFunction {
    pub fn code(self) -> &'static str {
        match self {
            Self::Ni => "Ni",
            Self::Ne => "Ne",
            Self::Si => "Si",
            Self::Se => "Se",
            Self::Ti => "Ti",
            Self::Te => "Te",
            Self::Fi => "Fi",
            Self::Fe => "Fe",
        }
    }

    pub fn is_introverted(self) -> bool {
        matches!(self, Self::Ni | Self::Si | Self::Ti | Self::Fi)
    }

    /// Cognitive axis letter: N, S, T or F.
    pub fn axis(self) -> char {
        match self {
            Self::Ni | Self::Ne => 'N',
            Self::Si | Self::Se => 'S',
            Self::Ti | Self::Te => 'T',
            Self::Fi | Self::Fe => 'F',
        }
    }

    pub fn opposite_attitude(self) -> Self {
        match self {
            Self::Ni => Self::Ne,
            Self::Ne => Self::Ni,
            Self::Si => Self::Se,
            Self::Se => Self::Si,
            Self::Ti => Self::Te,
            Self::Te => Self::Ti,
            Self::Fi => Self::Fe,
            Self::Fe => Self::Fi,
        }
    }
}

impl fmt::Display for CognitiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionStack {
    pub primary_stack: Vec<CognitiveFunction>,
    pub development_levels: BTreeMap<CognitiveFunction, f64>,
    pub shadow_functions: Vec<CognitiveFunction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterAssignment {
    pub primary_cluster: usize,
    pub cluster_probabilities: [f64; 4],
    pub cluster_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum IndividuationStage {
    #[serde(rename = "Early Development")]
    EarlyDevelopment,
    #[serde(rename = "Emerging Awareness")]
    EmergingAwareness,
    #[serde(rename = "Active Integration")]
    ActiveIntegration,
    #[serde(rename = "Advanced Integration")]
    AdvancedIntegration,
}

impl IndividuationStage {
    pub fn from_score(score: f64) -> Self {
        if score < 0.25 {
            Self::EarlyDevelopment
        } else if score < 0.5 {
            Self::EmergingAwareness
        } else if score < 0.75 {
            Self::ActiveIntegration
        } else {
            Self::AdvancedIntegration
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EarlyDevelopment => "Early Development",
            Self::EmergingAwareness => "Emerging Awareness",
            Self::ActiveIntegration => "Active Integration",
            Self::AdvancedIntegration => "Advanced Integration",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepthProfile {
    pub shadow_integration: f64,
    pub archetype_profile: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_archetype: Option<String>,
    pub individuation_stage: IndividuationStage,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitInteraction {
    pub pattern: &'static str,
    pub name: &'static str,
    pub strength: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremity {
    High,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtremeScore {
    #[serde(rename = "trait")]
    pub trait_name: Trait,
    pub percentile: f64,
    pub level: Extremity,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Uniqueness {
    pub extreme_scores: Vec<ExtremeScore>,
    pub rare_combinations: Vec<&'static str>,
    pub paradoxical_patterns: Vec<&'static str>,
    pub uniqueness_score: f64,
}

/// The record handed to any narrative or report layer.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentProfile {
    pub mode: AssessmentMode,
    pub answered_items: usize,
    pub big_five: BigFiveResult,
    pub mbti: TypeResult,
    pub cognitive_functions: FunctionStack,
    pub personality_cluster: ClusterAssignment,
    pub jungian_depth: DepthProfile,
    pub trait_interactions: Vec<TraitInteraction>,
    pub uniqueness: Uniqueness,
}

/// The slice of a stored profile that downstream instruments read back.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSummary {
    pub big_five: StoredBigFive,
    pub mbti: StoredType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredBigFive {
    pub scores: TraitScores,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredType {
    pub primary_type: String,
}
