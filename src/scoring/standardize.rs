use super::raw::IrtEstimate;
use super::stats::{normal_cdf, normal_ppf};
use crate::catalog::NormTable;
use crate::types::profile::ConfidenceInterval;
use crate::types::traits::{Trait, TraitScores};
use std::collections::BTreeMap;

pub const IRT_WEIGHT: f64 = 0.7;
pub const RAW_WEIGHT: f64 = 0.3;
/// θ standard error to 0-100 points.
pub const SE_SCALE: f64 = 15.0;
/// Reported when a trait had no items to estimate from.
pub const NOMINAL_SE: f64 = 15.0;
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardized {
    pub scores: TraitScores,
    pub percentiles: TraitScores,
    pub standard_errors: TraitScores,
}

/// Blends IRT and raw scores and places them against the population norms.
/// `se_inflation` multiplies every standard error, nominal ones included (1.0 for core mode).
pub fn standardize(
    raw: &TraitScores,
    irt: &BTreeMap<Trait, IrtEstimate>,
    norms: &NormTable,
    se_inflation: f64,
) -> Standardized {
    let mut scores = TraitScores::default();
    let mut percentiles = TraitScores::default();
    let mut standard_errors = TraitScores::default();

    for t in Trait::ALL {
        let raw_score = raw.get(t);
        let (score, percentile, se) = match irt.get(&t) {
            Some(estimate) if estimate.items > 0 => {
                let irt_score = (estimate.theta + 2.0) * 25.0;
                let blended =
                    (IRT_WEIGHT * irt_score + RAW_WEIGHT * raw_score).clamp(0.0, 100.0);
                let percentile = norms
                    .lookup(t)
                    .map(|norm| normal_cdf((blended - norm.mean) / norm.std_dev) * 100.0)
                    .unwrap_or(NEUTRAL_PERCENTILE);
                (
                    blended,
                    percentile.clamp(0.0, 100.0),
                    estimate.standard_error * se_inflation * SE_SCALE,
                )
            }
            _ => (
                raw_score.clamp(0.0, 100.0),
                NEUTRAL_PERCENTILE,
                NOMINAL_SE * se_inflation,
            ),
        };
        scores.set(t, score);
        percentiles.set(t, percentile);
        standard_errors.set(t, se);
    }

    Standardized {
        scores,
        percentiles,
        standard_errors,
    }
}

/// Two-sided interval around `score`, clamped to the 0-100 scale.
pub fn confidence_interval(score: f64, standard_error: f64, level: f64) -> ConfidenceInterval {
    let z = normal_ppf((1.0 + level) / 2.0);
    let margin = z * standard_error;
    ConfidenceInterval {
        point_estimate: score,
        lower_bound: (score - margin).clamp(0.0, 100.0),
        upper_bound: (score + margin).clamp(0.0, 100.0),
        confidence_level: level,
    }
}

pub fn confidence_intervals(
    standardized: &Standardized,
    level: f64,
) -> BTreeMap<Trait, ConfidenceInterval> {
    Trait::ALL
        .into_iter()
        .map(|t| {
            (
                t,
                confidence_interval(
                    standardized.scores.get(t),
                    standardized.standard_errors.get(t),
                    level,
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::norms::standard_norms;

    fn estimates(theta: f64, items: usize) -> BTreeMap<Trait, IrtEstimate> {
        Trait::ALL
            .into_iter()
            .map(|t| {
                (
                    t,
                    IrtEstimate {
                        theta,
                        standard_error: 1.0 / (items.max(1) as f64).sqrt(),
                        items,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn empty_estimate_falls_back_to_neutral_percentile_and_nominal_se() {
        let result = standardize(
            &TraitScores::uniform(0.0),
            &estimates(0.0, 0),
            &standard_norms(),
            1.0,
        );
        assert_eq!(result.scores, TraitScores::uniform(0.0));
        assert_eq!(result.percentiles, TraitScores::uniform(50.0));
        assert_eq!(result.standard_errors, TraitScores::uniform(NOMINAL_SE));
    }

    #[test]
    fn nominal_se_is_inflated_for_shortened_bank() {
        let inflation = 1.8;
        let result = standardize(
            &TraitScores::uniform(0.0),
            &estimates(0.0, 0),
            &standard_norms(),
            inflation,
        );
        assert_eq!(result.percentiles, TraitScores::uniform(50.0));
        assert_eq!(
            result.standard_errors,
            TraitScores::uniform(NOMINAL_SE * inflation)
        );
    }

    #[test]
    fn blend_is_seventy_thirty_and_percentile_follows_norm() {
        let result = standardize(
            &TraitScores::uniform(50.0),
            &estimates(1.0, 4),
            &standard_norms(),
            1.0,
        );
        // irt score 75, raw 50
        assert!((result.scores.openness - 67.5).abs() < 1e-9);
        let expected = normal_cdf((67.5 - 50.0) / 15.0) * 100.0;
        assert!((result.percentiles.openness - expected).abs() < 1e-9);
        assert!((result.standard_errors.openness - 7.5).abs() < 1e-9);
    }

    #[test]
    fn blended_score_is_clamped() {
        let result = standardize(
            &TraitScores::uniform(100.0),
            &estimates(2.0, 9),
            &standard_norms(),
            1.0,
        );
        assert_eq!(result.scores.neuroticism, 100.0);
        assert!(result.percentiles.neuroticism <= 100.0);
    }

    #[test]
    fn inflation_never_lowers_standard_error() {
        let core = standardize(
            &TraitScores::uniform(40.0),
            &estimates(0.5, 12),
            &standard_norms(),
            1.0,
        );
        let discovery = standardize(
            &TraitScores::uniform(40.0),
            &estimates(0.5, 12),
            &standard_norms(),
            (200.0_f64 / 60.0).sqrt(),
        );
        for t in Trait::ALL {
            assert!(discovery.standard_errors.get(t) >= core.standard_errors.get(t));
        }
    }

    #[test]
    fn interval_brackets_point_and_stays_on_scale() {
        for (score, se) in [(0.0, 15.0), (98.0, 7.5), (50.0, 0.0), (3.0, 4.0)] {
            for level in [0.5, 0.9, 0.95, 0.99] {
                let ci = confidence_interval(score, se, level);
                assert!(ci.lower_bound <= score && score <= ci.upper_bound);
                assert!(ci.lower_bound >= 0.0 && ci.upper_bound <= 100.0);
            }
        }
        let ci = confidence_interval(50.0, 5.0, 0.95);
        assert!((ci.upper_bound - (50.0 + 1.959964 * 5.0)).abs() < 1e-3);
    }
}
