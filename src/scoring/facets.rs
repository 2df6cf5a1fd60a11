use super::Answered;
use crate::types::profile::FacetScores;
use crate::types::traits::Trait;
use std::collections::BTreeMap;

/// Mean reverse-adjusted value per (trait, facet) on 0-100. Facets with no usable
/// responses are absent rather than zero.
pub fn facet_scores(answered: &[Answered<'_>]) -> FacetScores {
    let mut sums: BTreeMap<(Trait, &str), (f64, usize)> = BTreeMap::new();

    for (question, response) in answered {
        let (Some(t), Some(facet)) = (question.trait_dimension(), question.facet.as_deref())
        else {
            continue;
        };
        if let Some(value) = question.normalized_value(response) {
            let entry = sums.entry((t, facet)).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let mut facets = FacetScores::new();
    for ((t, facet), (sum, count)) in sums {
        facets
            .entry(t)
            .or_default()
            .insert(facet.to_string(), sum / count as f64 * 100.0);
    }
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::likert;
    use crate::types::question::Response;

    #[test]
    fn groups_by_trait_and_facet() {
        let mut anxiety_a = likert("N1", "Neuroticism", false);
        anxiety_a.facet = Some("Anxiety".to_string());
        let mut anxiety_b = likert("N2", "Neuroticism", true);
        anxiety_b.facet = Some("Anxiety".to_string());
        let mut anger = likert("N3", "Neuroticism", false);
        anger.facet = Some("Anger".to_string());
        let unfaceted = likert("N4", "Neuroticism", false);

        let responses = [
            Response::likert("N1", 7),
            Response::likert("N2", 4),
            Response::likert("N3", 1),
            Response::likert("N4", 7),
        ];
        let answered = vec![
            (&anxiety_a, &responses[0]),
            (&anxiety_b, &responses[1]),
            (&anger, &responses[2]),
            (&unfaceted, &responses[3]),
        ];

        let facets = facet_scores(&answered);
        let neuroticism = &facets[&Trait::Neuroticism];
        assert_eq!(neuroticism.len(), 2);
        assert!((neuroticism["Anxiety"] - 75.0).abs() < 1e-9);
        assert_eq!(neuroticism["Anger"], 0.0);
    }

    #[test]
    fn facets_without_usable_responses_are_omitted() {
        let mut question = likert("O1", "Openness", false);
        question.facet = Some("Fantasy".to_string());
        let response = Response::likert("O1", 9);

        let facets = facet_scores(&[(&question, &response)]);
        assert!(facets.is_empty());
    }
}
