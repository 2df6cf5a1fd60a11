use crate::types::profile::ClusterAssignment;
use crate::types::traits::TraitScores;

pub struct Prototype {
    pub name: &'static str,
    /// Extraversion, Agreeableness, Conscientiousness, Neuroticism, Openness.
    pub centroid: [f64; 5],
}

pub const PROTOTYPES: [Prototype; 4] = [
    Prototype {
        name: "Resilient",
        centroid: [65.0, 60.0, 65.0, 35.0, 60.0],
    },
    Prototype {
        name: "Overcontrolled",
        centroid: [35.0, 50.0, 55.0, 70.0, 45.0],
    },
    Prototype {
        name: "Undercontrolled",
        centroid: [55.0, 35.0, 35.0, 60.0, 55.0],
    },
    Prototype {
        name: "Average",
        centroid: [50.0, 50.0, 50.0, 50.0, 50.0],
    },
];

/// Nearest prototype plus inverse-distance probabilities, `1 / (d + 1)` normalized.
pub fn assign_cluster(scores: &TraitScores) -> ClusterAssignment {
    let point = [
        scores.extraversion,
        scores.agreeableness,
        scores.conscientiousness,
        scores.neuroticism,
        scores.openness,
    ];

    let distances: [f64; 4] = std::array::from_fn(|i| {
        PROTOTYPES[i]
            .centroid
            .iter()
            .zip(point)
            .map(|(c, p)| (c - p).powi(2))
            .sum::<f64>()
            .sqrt()
    });

    let mut primary = 0;
    for (i, distance) in distances.iter().enumerate() {
        if *distance < distances[primary] {
            primary = i;
        }
    }

    let weights = distances.map(|distance| 1.0 / (distance + 1.0));
    let total: f64 = weights.iter().sum();
    let cluster_probabilities = weights.map(|weight| weight / total);

    ClusterAssignment {
        primary_cluster: primary,
        cluster_probabilities,
        cluster_description: PROTOTYPES[primary].name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_scores_land_in_average_cluster() {
        let result = assign_cluster(&TraitScores::uniform(50.0));
        assert_eq!(result.primary_cluster, 3);
        assert_eq!(result.cluster_description, "Average");
        for (i, probability) in result.cluster_probabilities.iter().enumerate() {
            if i != 3 {
                assert!(result.cluster_probabilities[3] > *probability);
            }
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        for scores in [
            TraitScores::new(0.0, 100.0, 0.0, 100.0, 0.0),
            TraitScores::new(60.0, 65.0, 65.0, 60.0, 35.0),
            TraitScores::new(12.5, 87.0, 44.0, 3.0, 91.0),
        ] {
            let result = assign_cluster(&scores);
            let sum: f64 = result.cluster_probabilities.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn prototype_vector_maps_to_its_own_cluster() {
        // Resilient: E 65, A 60, C 65, N 35, O 60
        let resilient = TraitScores::new(60.0, 65.0, 65.0, 60.0, 35.0);
        let result = assign_cluster(&resilient);
        assert_eq!(result.cluster_description, "Resilient");
    }
}
