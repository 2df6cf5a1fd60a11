use crate::types::traits::{Trait, TraitScores};

pub const FULL_ITEM_COUNT: f64 = 200.0;
pub const DISCOVERY_ITEM_COUNT: f64 = 60.0;
/// Scaled standard error above which a discovery trait estimate is flagged.
pub const HIGH_UNCERTAINTY_SE: f64 = 10.0;

pub const PRECISION_WARNING: &str = "This is a shortened assessment. Results are indicative but less precise than the full 200-question assessment.";

/// Multiplier applied to θ standard errors for the shortened bank.
pub fn se_inflation() -> f64 {
    (FULL_ITEM_COUNT / DISCOVERY_ITEM_COUNT).sqrt()
}

pub fn high_uncertainty_traits(standard_errors: &TraitScores) -> Vec<Trait> {
    standard_errors
        .iter()
        .filter(|(_, se)| *se > HIGH_UNCERTAINTY_SE)
        .map(|(t, _)| t)
        .collect()
}
