use crate::error::PersonaError;
use crate::types::profile::AssessmentMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonaConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_questions")]
    pub questions: PathBuf,
    #[serde(default = "default_discovery_questions")]
    pub discovery_questions: Option<PathBuf>,
    #[serde(default = "default_norms")]
    pub norms: PathBuf,
}

fn default_questions() -> PathBuf {
    PathBuf::from("data/questions.json")
}

fn default_discovery_questions() -> Option<PathBuf> {
    Some(PathBuf::from("data/discovery_questions.json"))
}

fn default_norms() -> PathBuf {
    PathBuf::from("data/norms.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            discovery_questions: default_discovery_questions(),
            norms: default_norms(),
        }
    }
}

impl DataConfig {
    /// Relative paths are resolved against the directory holding `persona.toml`.
    pub fn resolve(&self, root: &Path) -> ResolvedDataPaths {
        let join = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        ResolvedDataPaths {
            questions: join(&self.questions),
            discovery_questions: self.discovery_questions.as_deref().map(join),
            norms: join(&self.norms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDataPaths {
    pub questions: PathBuf,
    pub discovery_questions: Option<PathBuf>,
    pub norms: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

fn default_confidence_level() -> f64 {
    0.95
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            confidence_level: default_confidence_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    pub min_core_responses: Option<usize>,
    pub min_discovery_responses: Option<usize>,
}

impl PersonaConfig {
    pub fn minimum_responses(&self, mode: AssessmentMode) -> usize {
        match mode {
            AssessmentMode::Core => self
                .policy
                .min_core_responses
                .unwrap_or(AssessmentMode::DEFAULT_MIN_CORE),
            AssessmentMode::Discovery => self
                .policy
                .min_discovery_responses
                .unwrap_or(AssessmentMode::DEFAULT_MIN_DISCOVERY),
        }
    }

    pub fn validate(&self) -> Result<(), PersonaError> {
        let level = self.scoring.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(PersonaError::ConfigParse(format!(
                "scoring.confidence_level must be strictly between 0.0 and 1.0 (found {level})"
            )));
        }

        for (key, value) in [
            ("policy.min_core_responses", self.policy.min_core_responses),
            (
                "policy.min_discovery_responses",
                self.policy.min_discovery_responses,
            ),
        ] {
            if value == Some(0) {
                return Err(PersonaError::ConfigParse(format!(
                    "{key} must be greater than 0"
                )));
            }
        }

        let core = self.minimum_responses(AssessmentMode::Core);
        let discovery = self.minimum_responses(AssessmentMode::Discovery);
        if discovery > core {
            return Err(PersonaError::ConfigParse(format!(
                "policy.min_discovery_responses ({discovery}) cannot exceed policy.min_core_responses ({core})"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config_uses_defaults() {
        let cfg: PersonaConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.data.questions, PathBuf::from("data/questions.json"));
        assert_eq!(cfg.scoring.confidence_level, 0.95);
        assert_eq!(cfg.minimum_responses(AssessmentMode::Core), 160);
        assert_eq!(cfg.minimum_responses(AssessmentMode::Discovery), 48);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_data_table_keeps_default_discovery_bank() {
        let cfg: PersonaConfig =
            toml::from_str("[data]\nquestions = \"q.json\"\n").expect("config should parse");
        let defaults: PersonaConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.data.questions, PathBuf::from("q.json"));
        assert_eq!(cfg.data.discovery_questions, defaults.data.discovery_questions);
        assert_eq!(
            cfg.data.discovery_questions,
            Some(PathBuf::from("data/discovery_questions.json"))
        );
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[data]
questions = "bank/questions.json"
discovery_questions = "bank/discovery.json"
norms = "/opt/norms.json"

[scoring]
confidence_level = 0.90

[policy]
min_core_responses = 120
min_discovery_responses = 30
"#;
        let cfg: PersonaConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.minimum_responses(AssessmentMode::Core), 120);

        let resolved = cfg.data.resolve(Path::new("/srv/persona"));
        assert_eq!(
            resolved.questions,
            PathBuf::from("/srv/persona/bank/questions.json")
        );
        assert_eq!(resolved.norms, PathBuf::from("/opt/norms.json"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_confidence_level_outside_open_interval() {
        for level in ["1.0", "0.0", "1.5"] {
            let cfg: PersonaConfig =
                toml::from_str(&format!("[scoring]\nconfidence_level = {level}\n"))
                    .expect("config should parse");
            assert!(cfg.validate().is_err(), "level {level} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_zero_and_inverted_minimums() {
        let zero: PersonaConfig =
            toml::from_str("[policy]\nmin_core_responses = 0\n").expect("config should parse");
        assert!(zero.validate().is_err());

        let inverted: PersonaConfig = toml::from_str(
            "[policy]\nmin_core_responses = 40\nmin_discovery_responses = 48\n",
        )
        .expect("config should parse");
        assert!(inverted.validate().is_err());
    }
}
