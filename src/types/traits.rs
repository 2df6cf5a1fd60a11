use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Big Five dimensions. Canonical spelling is capitalized everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Trait::Openness,
        Trait::Conscientiousness,
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Neuroticism,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Openness => "Openness",
            Self::Conscientiousness => "Conscientiousness",
            Self::Extraversion => "Extraversion",
            Self::Agreeableness => "Agreeableness",
            Self::Neuroticism => "Neuroticism",
        }
    }

    /// Case-insensitive lookup; catalogs in the wild mix `openness` and `Openness`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn neutral() -> f64 {
    TraitScores::NEUTRAL
}

/// One value per trait. Used for 0-100 scores as well as percentiles and standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TraitScores {
    #[serde(default = "neutral")]
    pub openness: f64,
    #[serde(default = "neutral")]
    pub conscientiousness: f64,
    #[serde(default = "neutral")]
    pub extraversion: f64,
    #[serde(default = "neutral")]
    pub agreeableness: f64,
    #[serde(default = "neutral")]
    pub neuroticism: f64,
}

impl TraitScores {
    pub const NEUTRAL: f64 = 50.0;

    pub fn new(
        openness: f64,
        conscientiousness: f64,
        extraversion: f64,
        agreeableness: f64,
        neuroticism: f64,
    ) -> Self {
        Self {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn from_fn(mut f: impl FnMut(Trait) -> f64) -> Self {
        Self::new(
            f(Trait::Openness),
            f(Trait::Conscientiousness),
            f(Trait::Extraversion),
            f(Trait::Agreeableness),
            f(Trait::Neuroticism),
        )
    }

    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }

    pub fn set(&mut self, t: Trait, value: f64) {
        match t {
            Trait::Openness => self.openness = value,
            Trait::Conscientiousness => self.conscientiousness = value,
            Trait::Extraversion => self.extraversion = value,
            Trait::Agreeableness => self.agreeableness = value,
            Trait::Neuroticism => self.neuroticism = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        Trait::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

impl Default for TraitScores {
    fn default() -> Self {
        Self::uniform(Self::NEUTRAL)
    }
}
