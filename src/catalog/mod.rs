pub mod norms;

use crate::error::{PersonaError, Result};
use crate::types::question::{Question, Tier};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub use norms::{Norm, NormTable};

/// Primary and secondary items taken when no discovery bank is installed.
pub const DISCOVERY_PRIMARY_ITEMS: usize = 48;
pub const DISCOVERY_SECONDARY_ITEMS: usize = 12;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
}

/// Read-only question bank keyed by question id, preserving file order.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl QuestionCatalog {
    pub fn from_questions(questions: Vec<Question>) -> Result<Self> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id.clone(), position).is_some() {
                return Err(PersonaError::CatalogParse(format!(
                    "duplicate question id: {}",
                    question.id
                )));
            }
        }
        Ok(Self { questions, index })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PersonaError::CatalogNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&content)
            .map_err(|e| PersonaError::CatalogParse(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_questions(file.questions)?;
        info!(
            path = %path.display(),
            questions = catalog.len(),
            "loaded question catalog"
        );
        Ok(catalog)
    }

    /// Loads the discovery bank if one is installed, otherwise derives it from `main`.
    pub fn load_discovery(path: Option<&Path>, main: &QuestionCatalog) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("no discovery bank installed; deriving from main catalog");
                main.discovery_subset()
            }
        }
    }

    pub fn discovery_subset(&self) -> Result<Self> {
        let primary = self
            .all_by_tier(Tier::Primary)
            .into_iter()
            .take(DISCOVERY_PRIMARY_ITEMS);
        let secondary = self
            .all_by_tier(Tier::Secondary)
            .into_iter()
            .take(DISCOVERY_SECONDARY_ITEMS);
        Self::from_questions(primary.chain(secondary).cloned().collect())
    }

    pub fn lookup(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&position| &self.questions[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn all_by_tier(&self, tier: Tier) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.tier == tier)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::question::{ForcedChoiceOption, Preference, Question, ResponseKind, Tier};
    use std::collections::BTreeMap;

    pub fn likert(id: &str, dimension: &str, reverse: bool) -> Question {
        Question {
            id: id.to_string(),
            text: format!("item {id}"),
            dimension: Some(dimension.to_string()),
            facet: None,
            reverse_scored: reverse,
            tier: Tier::Primary,
            response_type: ResponseKind::Likert7,
            factor_loadings: Some(BTreeMap::from([(dimension.to_string(), 1.0)])),
            option_a: None,
            option_b: None,
            archetype: None,
            riasec_type: None,
            assessment_type: None,
        }
    }

    pub fn likert5(id: &str, dimension: &str) -> Question {
        Question {
            response_type: ResponseKind::Likert5,
            factor_loadings: None,
            tier: Tier::Tertiary,
            ..likert(id, dimension, false)
        }
    }

    pub fn forced_choice(id: &str, a: Preference, b: Preference) -> Question {
        let option = |letter: Preference| ForcedChoiceOption {
            text: format!("prefers {}", letter.letter()),
            scores: BTreeMap::from([(letter, 1.0)]),
        };
        Question {
            id: id.to_string(),
            text: format!("choice {id}"),
            dimension: None,
            facet: None,
            reverse_scored: false,
            tier: Tier::Secondary,
            response_type: ResponseKind::ForcedChoice,
            factor_loadings: None,
            option_a: Some(option(a)),
            option_b: Some(option(b)),
            archetype: None,
            riasec_type: None,
            assessment_type: None,
        }
    }
}
