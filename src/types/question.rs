use super::traits::Trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    #[serde(rename = "likert_7")]
    Likert7,
    #[serde(rename = "likert_5")]
    Likert5,
    #[serde(rename = "forced_choice")]
    ForcedChoice,
}

impl ResponseKind {
    /// Number of answer points on a Likert scale.
    pub fn points(self) -> Option<i64> {
        match self {
            Self::Likert7 => Some(7),
            Self::Likert5 => Some(5),
            Self::ForcedChoice => None,
        }
    }

    /// Highest 0-based value on the scale (6 for seven points).
    pub fn scale_max(self) -> Option<f64> {
        self.points().map(|points| (points - 1) as f64)
    }
}

/// MBTI preference letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Preference {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Preference {
    /// Axis pairs in type-code order; the first letter wins ties.
    pub const AXES: [(Preference, Preference); 4] = [
        (Preference::E, Preference::I),
        (Preference::S, Preference::N),
        (Preference::T, Preference::F),
        (Preference::J, Preference::P),
    ];

    pub fn letter(self) -> char {
        match self {
            Self::E => 'E',
            Self::I => 'I',
            Self::S => 'S',
            Self::N => 'N',
            Self::T => 'T',
            Self::F => 'F',
            Self::J => 'J',
            Self::P => 'P',
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::E => Self::I,
            Self::I => Self::E,
            Self::S => Self::N,
            Self::N => Self::S,
            Self::T => Self::F,
            Self::F => Self::T,
            Self::J => Self::P,
            Self::P => Self::J,
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'E' => Some(Self::E),
            'I' => Some(Self::I),
            'S' => Some(Self::S),
            'N' => Some(Self::N),
            'T' => Some(Self::T),
            'F' => Some(Self::F),
            'J' => Some(Self::J),
            'P' => Some(Self::P),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForcedChoiceOption {
    pub text: String,
    #[serde(default)]
    pub scores: BTreeMap<Preference, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceTag {
    A,
    B,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub facet: Option<String>,
    #[serde(default)]
    pub reverse_scored: bool,
    #[serde(rename = "assessment_layer")]
    pub tier: Tier,
    pub response_type: ResponseKind,
    #[serde(default)]
    pub factor_loadings: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub option_a: Option<ForcedChoiceOption>,
    #[serde(default)]
    pub option_b: Option<ForcedChoiceOption>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub riasec_type: Option<String>,
    #[serde(default)]
    pub assessment_type: Option<String>,
}

impl Question {
    pub fn trait_dimension(&self) -> Option<Trait> {
        self.dimension.as_deref().and_then(Trait::parse)
    }

    pub fn is_likert(&self) -> bool {
        self.response_type.points().is_some()
    }

    /// Reverse-adjusted 0-based value, or `None` when the response carries no usable
    /// Likert value for this question (wrong kind, missing, or off the scale).
    pub fn scaled_value(&self, response: &Response) -> Option<f64> {
        let points = self.response_type.points()?;
        let value = response.response_value?;
        if !(1..=points).contains(&value) {
            return None;
        }
        let zero_based = (value - 1) as f64;
        let scale_max = (points - 1) as f64;
        Some(if self.reverse_scored {
            scale_max - zero_based
        } else {
            zero_based
        })
    }

    /// `scaled_value` divided by the scale maximum, so 7- and 5-point items mix cleanly.
    pub fn normalized_value(&self, response: &Response) -> Option<f64> {
        let scale_max = self.response_type.scale_max()?;
        self.scaled_value(response).map(|value| value / scale_max)
    }

    /// Raw 1-based value with the reverse flag applied on the item's own scale.
    pub fn keyed_value(&self, response: &Response) -> Option<f64> {
        self.scaled_value(response).map(|value| value + 1.0)
    }

    pub fn option(&self, tag: ChoiceTag) -> Option<&ForcedChoiceOption> {
        match tag {
            ChoiceTag::A => self.option_a.as_ref(),
            ChoiceTag::B => self.option_b.as_ref(),
        }
    }

    /// Loadings keyed by trait; keys that are not Big Five traits are dropped.
    pub fn trait_loadings(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        self.factor_loadings
            .iter()
            .flatten()
            .filter_map(|(name, loading)| Trait::parse(name).map(|t| (t, *loading)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    #[serde(default)]
    pub response_value: Option<i64>,
    #[serde(default)]
    pub selected_option: Option<ChoiceTag>,
}

impl Response {
    pub fn likert(question_id: impl Into<String>, value: i64) -> Self {
        Self {
            question_id: question_id.into(),
            response_value: Some(value),
            selected_option: None,
        }
    }

    pub fn choice(question_id: impl Into<String>, tag: ChoiceTag) -> Self {
        Self {
            question_id: question_id.into(),
            response_value: None,
            selected_option: Some(tag),
        }
    }

    pub fn is_answered(&self) -> bool {
        self.response_value.is_some() || self.selected_option.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    pub responses: Vec<Response>,
}

impl Submission {
    pub fn answered(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter().filter(|response| response.is_answered())
    }

    pub fn answered_count(&self) -> usize {
        self.answered().count()
    }
}
