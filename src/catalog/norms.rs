use crate::error::{PersonaError, Result};
use crate::types::traits::Trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// Population mean and standard deviation on the 0-100 score scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Norm {
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Deserialize)]
struct NormsFile {
    norms: HashMap<String, NormGroups>,
}

#[derive(Debug, Deserialize)]
struct NormGroups {
    general_population: Option<Norm>,
}

#[derive(Debug, Clone, Default)]
pub struct NormTable {
    norms: BTreeMap<Trait, Norm>,
}

impl NormTable {
    /// Every trait must carry a norm with a positive standard deviation.
    pub fn from_entries(entries: impl IntoIterator<Item = (Trait, Norm)>) -> Result<Self> {
        let norms: BTreeMap<Trait, Norm> = entries.into_iter().collect();
        for t in Trait::ALL {
            match norms.get(&t) {
                Some(norm) if norm.std_dev > 0.0 && norm.std_dev.is_finite() => {}
                _ => return Err(PersonaError::MissingNorm(t.name().to_string())),
            }
        }
        Ok(Self { norms })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PersonaError::NormsNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let file: NormsFile = serde_json::from_str(&content)
            .map_err(|e| PersonaError::NormsParse(format!("{}: {}", path.display(), e)))?;

        let entries = file.norms.into_iter().filter_map(|(name, groups)| {
            let t = Trait::parse(&name)?;
            groups.general_population.map(|norm| (t, norm))
        });
        let table = Self::from_entries(entries)?;
        info!(path = %path.display(), "loaded norm table");
        Ok(table)
    }

    pub fn lookup(&self, t: Trait) -> Option<Norm> {
        self.norms.get(&t).copied()
    }
}

#[cfg(test)]
pub(crate) fn standard_norms() -> NormTable {
    NormTable {
        norms: Trait::ALL
            .into_iter()
            .map(|t| {
                (
                    t,
                    Norm {
                        mean: 50.0,
                        std_dev: 15.0,
                    },
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_norms(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("norms.json");
        fs::write(&path, body).expect("norms should write");
        path
    }

    #[test]
    fn load_accepts_lowercase_trait_keys() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_norms(
            &dir,
            r#"{"norms": {
                "openness": {"general_population": {"mean": 55.0, "std_dev": 12.0}},
                "Conscientiousness": {"general_population": {"mean": 50.0, "std_dev": 15.0}},
                "Extraversion": {"general_population": {"mean": 50.0, "std_dev": 15.0}},
                "Agreeableness": {"general_population": {"mean": 50.0, "std_dev": 15.0}},
                "Neuroticism": {"general_population": {"mean": 45.0, "std_dev": 14.0}}
            }}"#,
        );

        let table = NormTable::load(&path).expect("norms should load");
        assert_eq!(
            table.lookup(Trait::Openness),
            Some(Norm {
                mean: 55.0,
                std_dev: 12.0
            })
        );
    }

    #[test]
    fn load_rejects_table_missing_a_trait() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_norms(
            &dir,
            r#"{"norms": {"Openness": {"general_population": {"mean": 50.0, "std_dev": 15.0}}}}"#,
        );
        let result = NormTable::load(&path);
        assert!(matches!(result, Err(PersonaError::MissingNorm(_))));
    }

    #[test]
    fn zero_std_dev_is_not_a_usable_norm() {
        let entries = Trait::ALL.into_iter().map(|t| {
            (
                t,
                Norm {
                    mean: 50.0,
                    std_dev: if t == Trait::Neuroticism { 0.0 } else { 15.0 },
                },
            )
        });
        let result = NormTable::from_entries(entries);
        assert!(matches!(result, Err(PersonaError::MissingNorm(name)) if name == "Neuroticism"));
    }

    #[test]
    fn missing_file_is_distinct_from_catalog_errors() {
        let dir = TempDir::new().expect("temp dir should be created");
        let result = NormTable::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PersonaError::NormsNotFound(_))));
    }

    #[test]
    fn malformed_file_is_a_norms_parse_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = write_norms(&dir, "{ not json");
        match NormTable::load(&path) {
            Err(PersonaError::NormsParse(message)) => {
                assert!(message.contains("norms.json"));
            }
            other => panic!("expected norms parse error, got {other:?}"),
        }
    }
}
