pub mod cluster;
pub mod depth;
pub mod discovery;
pub mod facets;
pub mod functions;
pub mod interactions;
pub mod raw;
pub mod standardize;
pub mod stats;
pub mod typing;

use crate::catalog::{NormTable, QuestionCatalog};
use crate::error::{PersonaError, Result};
use crate::types::profile::{AssessmentMode, AssessmentProfile, BigFiveResult};
use crate::types::question::{Question, Response, Submission};
use tracing::{debug, info, warn};

/// A response paired with the catalog question it answers.
pub type Answered<'a> = (&'a Question, &'a Response);

/// Pairs answered responses with their questions. Unknown ids are skipped.
pub fn resolve<'a>(catalog: &'a QuestionCatalog, submission: &'a Submission) -> Vec<Answered<'a>> {
    submission
        .answered()
        .filter_map(|response| match catalog.lookup(&response.question_id) {
            Some(question) => Some((question, response)),
            None => {
                debug!(question_id = %response.question_id, "skipping response for unknown question");
                None
            }
        })
        .collect()
}

/// Caller-side gate; scoring itself accepts any number of responses.
pub fn check_response_count(submission: &Submission, required: usize) -> Result<()> {
    let observed = submission.answered_count();
    if observed < required {
        return Err(PersonaError::InsufficientData { observed, required });
    }
    Ok(())
}

/// Runs every scoring stage over one submission. In discovery mode `catalog` should be
/// the discovery bank so that items outside it carry no weight.
pub fn score_assessment(
    catalog: &QuestionCatalog,
    norms: &NormTable,
    submission: &Submission,
    mode: AssessmentMode,
    confidence_level: f64,
) -> AssessmentProfile {
    let answered = resolve(catalog, submission);

    let raw = raw::raw_scores(&answered);
    let irt = raw::irt_estimates(&answered);
    let se_inflation = match mode {
        AssessmentMode::Core => 1.0,
        AssessmentMode::Discovery => discovery::se_inflation(),
    };
    let standardized = standardize::standardize(&raw, &irt, norms, se_inflation);
    let confidence_intervals = standardize::confidence_intervals(&standardized, confidence_level);

    let (high_uncertainty_traits, confidence_warning) = match mode {
        AssessmentMode::Core => (Vec::new(), None),
        AssessmentMode::Discovery => {
            let flagged = discovery::high_uncertainty_traits(&standardized.standard_errors);
            if !flagged.is_empty() {
                warn!(traits = ?flagged, "high uncertainty in shortened assessment");
            }
            (flagged, Some(discovery::PRECISION_WARNING.to_string()))
        }
    };

    let scores = standardized.scores;
    let mbti = typing::classify(&answered, &scores);
    let depth_answered: Vec<Answered<'_>> = answered
        .iter()
        .copied()
        .filter(|(question, _)| {
            question
                .dimension
                .as_deref()
                .is_some_and(depth::is_depth_dimension)
        })
        .collect();
    let cognitive_functions =
        functions::resolve_stack(&mbti.primary_type, &scores, &depth_answered);
    let personality_cluster = cluster::assign_cluster(&scores);
    let jungian_depth = depth::depth_profile(&depth_answered);
    let trait_interactions = interactions::trait_interactions(&scores);
    let uniqueness = interactions::uniqueness(&scores, &standardized.percentiles);

    info!(
        mode = ?mode,
        answered = answered.len(),
        primary_type = %mbti.primary_type,
        cluster = %personality_cluster.cluster_description,
        "scored assessment"
    );

    AssessmentProfile {
        mode,
        answered_items: answered.len(),
        big_five: BigFiveResult {
            scores,
            percentiles: standardized.percentiles,
            standard_errors: standardized.standard_errors,
            confidence_intervals,
            facet_scores: facets::facet_scores(&answered),
            high_uncertainty_traits,
            confidence_warning,
        },
        mbti,
        cognitive_functions,
        personality_cluster,
        jungian_depth,
        trait_interactions,
        uniqueness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{forced_choice, likert, likert5};
    use crate::catalog::norms::standard_norms;
    use crate::types::question::{ChoiceTag, Preference};
    use crate::types::traits::Trait;

    fn catalog() -> QuestionCatalog {
        let mut questions = Vec::new();
        for t in Trait::ALL {
            for i in 0..4 {
                questions.push(likert(&format!("{}{i}", t.name()), t.name(), i % 2 == 1));
            }
        }
        questions.push(forced_choice("FC_EI", Preference::E, Preference::I));
        questions.push(forced_choice("FC_TF", Preference::T, Preference::F));
        questions.push(likert5("SH1", "Shadow_Integration"));
        QuestionCatalog::from_questions(questions).expect("catalog should build")
    }

    #[test]
    fn zero_responses_produce_neutral_profile() {
        let profile = score_assessment(
            &catalog(),
            &standard_norms(),
            &Submission::default(),
            AssessmentMode::Core,
            0.95,
        );

        assert_eq!(profile.answered_items, 0);
        let big_five = &profile.big_five;
        for t in Trait::ALL {
            assert_eq!(big_five.scores.get(t), 0.0);
            assert_eq!(big_five.percentiles.get(t), 50.0);
            assert_eq!(big_five.standard_errors.get(t), standardize::NOMINAL_SE);
        }
        assert!(big_five.facet_scores.is_empty());
        assert_eq!(profile.jungian_depth.shadow_integration, 0.5);
        assert_eq!(profile.cognitive_functions.primary_stack.len(), 4);
    }

    #[test]
    fn unknown_questions_are_skipped() {
        let submission = Submission {
            responses: vec![
                Response::likert("Openness0", 7),
                Response::likert("NOT_IN_CATALOG", 7),
                Response::choice("FC_EI", ChoiceTag::B),
            ],
        };
        let catalog = catalog();
        assert_eq!(resolve(&catalog, &submission).len(), 2);
    }

    #[test]
    fn discovery_mode_widens_errors_and_attaches_warning() {
        let responses: Vec<_> = Trait::ALL
            .into_iter()
            .map(|t| Response::likert(format!("{}0", t.name()), 6))
            .collect();
        let submission = Submission { responses };

        let core = score_assessment(
            &catalog(),
            &standard_norms(),
            &submission,
            AssessmentMode::Core,
            0.95,
        );
        let discovery = score_assessment(
            &catalog(),
            &standard_norms(),
            &submission,
            AssessmentMode::Discovery,
            0.95,
        );

        for t in Trait::ALL {
            assert!(
                discovery.big_five.standard_errors.get(t) > core.big_five.standard_errors.get(t)
            );
        }
        // one item each: 15 × 1.83 exceeds the threshold
        assert_eq!(discovery.big_five.high_uncertainty_traits.len(), 5);
        assert!(discovery.big_five.confidence_warning.is_some());
        assert!(core.big_five.confidence_warning.is_none());
    }

    #[test]
    fn strong_introvert_answers_drive_type_and_bounds() {
        let mut responses = Vec::new();
        for i in 0..4 {
            // even items keyed forward, odd items reversed
            let value = if i % 2 == 0 { 1 } else { 7 };
            responses.push(Response::likert(format!("Extraversion{i}"), value));
        }
        responses.push(Response::choice("FC_EI", ChoiceTag::B));
        let submission = Submission { responses };

        let profile = score_assessment(
            &catalog(),
            &standard_norms(),
            &submission,
            AssessmentMode::Core,
            0.95,
        );
        assert_eq!(profile.big_five.scores.extraversion, 0.0);
        assert!(profile.mbti.primary_type.starts_with('I'));
        for ci in profile.big_five.confidence_intervals.values() {
            assert!(ci.lower_bound <= ci.point_estimate && ci.point_estimate <= ci.upper_bound);
            assert!(ci.lower_bound >= 0.0 && ci.upper_bound <= 100.0);
        }
    }

    #[test]
    fn response_gate_reports_observed_and_required() {
        let submission = Submission {
            responses: vec![Response::likert("Openness0", 4)],
        };
        match check_response_count(&submission, 160) {
            Err(PersonaError::InsufficientData { observed, required }) => {
                assert_eq!((observed, required), (1, 160));
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
        assert!(check_response_count(&submission, 1).is_ok());
    }
}
