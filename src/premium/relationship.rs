use crate::catalog::QuestionCatalog;
use crate::scoring::{resolve, stats};
use crate::types::question::Submission;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const ANXIETY_DIMENSION: &str = "attachment_anxiety";
pub const AVOIDANCE_DIMENSION: &str = "attachment_avoidance";
pub const LOVE_LANGUAGE_PREFIX: &str = "love_language_";
/// Mean at or above this on the seven-point scale counts as elevated.
pub const ATTACHMENT_CUTOFF: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentStyle {
    Secure,
    Anxious,
    Avoidant,
    FearfulAvoidant,
}

impl AttachmentStyle {
    pub fn classify(anxiety: f64, avoidance: f64) -> Self {
        match (anxiety >= ATTACHMENT_CUTOFF, avoidance >= ATTACHMENT_CUTOFF) {
            (false, false) => Self::Secure,
            (true, false) => Self::Anxious,
            (false, true) => Self::Avoidant,
            (true, true) => Self::FearfulAvoidant,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Secure => "secure",
            Self::Anxious => "anxious",
            Self::Avoidant => "avoidant",
            Self::FearfulAvoidant => "fearful-avoidant",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Secure => "Comfortable with both intimacy and independence",
            Self::Anxious => "Seeks closeness but worries about rejection",
            Self::Avoidant => "Values independence over intimacy",
            Self::FearfulAvoidant => "Wants close relationships but fears being hurt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveLanguage {
    WordsOfAffirmation,
    QualityTime,
    ReceivingGifts,
    ActsOfService,
    PhysicalTouch,
}

impl LoveLanguage {
    pub const ALL: [LoveLanguage; 5] = [
        LoveLanguage::WordsOfAffirmation,
        LoveLanguage::QualityTime,
        LoveLanguage::ReceivingGifts,
        LoveLanguage::ActsOfService,
        LoveLanguage::PhysicalTouch,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::WordsOfAffirmation => "words_of_affirmation",
            Self::QualityTime => "quality_time",
            Self::ReceivingGifts => "receiving_gifts",
            Self::ActsOfService => "acts_of_service",
            Self::PhysicalTouch => "physical_touch",
        }
    }

    fn from_dimension(dimension: &str) -> Option<Self> {
        let key = dimension.strip_prefix(LOVE_LANGUAGE_PREFIX)?;
        Self::ALL.into_iter().find(|language| language.key() == key)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResult {
    pub style: AttachmentStyle,
    pub anxiety_score: f64,
    pub avoidance_score: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoveLanguageScore {
    pub language: LoveLanguage,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoveLanguageRanking {
    pub primary: Option<LoveLanguage>,
    pub secondary: Option<LoveLanguage>,
    pub rankings: Vec<LoveLanguageScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipResult {
    pub attachment: AttachmentResult,
    pub love_languages: LoveLanguageRanking,
}

/// Scores the attachment and love-language items of a submission. Subscales with no
/// answered items score 0, so an empty submission reads as secure.
pub fn score_relationship(catalog: &QuestionCatalog, submission: &Submission) -> RelationshipResult {
    let mut anxiety = Vec::new();
    let mut avoidance = Vec::new();
    let mut languages: BTreeMap<LoveLanguage, Vec<f64>> = BTreeMap::new();

    for (question, response) in resolve(catalog, submission) {
        let (Some(dimension), Some(value)) =
            (question.dimension.as_deref(), question.keyed_value(response))
        else {
            continue;
        };
        if dimension == ANXIETY_DIMENSION {
            anxiety.push(value);
        } else if dimension == AVOIDANCE_DIMENSION {
            avoidance.push(value);
        } else if let Some(language) = LoveLanguage::from_dimension(dimension) {
            languages.entry(language).or_default().push(value);
        }
    }

    let anxiety_score = stats::mean(&anxiety).unwrap_or(0.0);
    let avoidance_score = stats::mean(&avoidance).unwrap_or(0.0);
    let style = AttachmentStyle::classify(anxiety_score, avoidance_score);

    // Stable sort keeps the canonical language order on ties.
    let mut rankings: Vec<LoveLanguageScore> = LoveLanguage::ALL
        .into_iter()
        .filter_map(|language| {
            let values = languages.get(&language)?;
            stats::mean(values).map(|score| LoveLanguageScore { language, score })
        })
        .collect();
    rankings.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(style = style.label(), languages = rankings.len(), "scored relationship instrument");

    RelationshipResult {
        attachment: AttachmentResult {
            style,
            anxiety_score,
            avoidance_score,
            description: style.description(),
        },
        love_languages: LoveLanguageRanking {
            primary: rankings.first().map(|entry| entry.language),
            secondary: rankings.get(1).map(|entry| entry.language),
            rankings,
        },
    }
}
