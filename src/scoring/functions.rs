use super::Answered;
use crate::types::profile::{CognitiveFunction, FunctionStack};
use crate::types::traits::TraitScores;
use std::collections::BTreeMap;

use CognitiveFunction::{Fe, Fi, Ne, Ni, Se, Si, Te, Ti};

/// Development before trait modifiers, dominant first.
pub const BASE_DEVELOPMENT: [f64; 4] = [0.8, 0.6, 0.4, 0.2];

const STACKS: [(&str, [CognitiveFunction; 4]); 16] = [
    ("INTJ", [Ni, Te, Fi, Se]),
    ("INTP", [Ti, Ne, Si, Fe]),
    ("ENTJ", [Te, Ni, Se, Fi]),
    ("ENTP", [Ne, Ti, Fe, Si]),
    ("INFJ", [Ni, Fe, Ti, Se]),
    ("INFP", [Fi, Ne, Si, Te]),
    ("ENFJ", [Fe, Ni, Se, Ti]),
    ("ENFP", [Ne, Fi, Te, Si]),
    ("ISTJ", [Si, Te, Fi, Ne]),
    ("ISFJ", [Si, Fe, Ti, Ne]),
    ("ESTJ", [Te, Si, Ne, Fi]),
    ("ESFJ", [Fe, Si, Ne, Ti]),
    ("ISTP", [Ti, Se, Ni, Fe]),
    ("ISFP", [Fi, Se, Ni, Te]),
    ("ESTP", [Se, Ti, Fe, Ni]),
    ("ESFP", [Se, Fi, Te, Ni]),
];

pub fn stack_for(type_code: &str) -> Option<[CognitiveFunction; 4]> {
    STACKS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(type_code))
        .map(|(_, stack)| *stack)
}

/// Resolves the stack for `type_code` and weights it by the trait scores.
///
/// `_depth_responses` is accepted for callers that collect depth items alongside the
/// type, but shadow functions are always the attitude flips of the dominant and
/// auxiliary functions. Unknown codes give an empty stack.
pub fn resolve_stack(
    type_code: &str,
    big_five: &TraitScores,
    _depth_responses: &[Answered<'_>],
) -> FunctionStack {
    let Some(stack) = stack_for(type_code) else {
        return FunctionStack::default();
    };

    let development_levels: BTreeMap<CognitiveFunction, f64> = stack
        .iter()
        .zip(BASE_DEVELOPMENT)
        .map(|(&function, base)| (function, (base + modifier(function, big_five)).min(1.0)))
        .collect();

    FunctionStack {
        primary_stack: stack.to_vec(),
        development_levels,
        shadow_functions: stack[..2]
            .iter()
            .map(|function| function.opposite_attitude())
            .collect(),
    }
}

fn modifier(function: CognitiveFunction, scores: &TraitScores) -> f64 {
    let attitude = if function.is_introverted() {
        (100.0 - scores.extraversion) / 200.0
    } else {
        scores.extraversion / 200.0
    };
    let axis = match function.axis() {
        'N' => scores.openness / 200.0,
        'S' => (100.0 - scores.openness) / 200.0,
        'T' => (100.0 - scores.agreeableness) / 200.0,
        _ => scores.agreeableness / 200.0,
    };
    attitude + axis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stack_alternates_attitude_and_uses_four_axes() {
        for (code, stack) in STACKS {
            let mut axes: Vec<char> = stack.iter().map(|f| f.axis()).collect();
            axes.sort_unstable();
            axes.dedup();
            assert_eq!(axes.len(), 4, "{code}");
            for pair in stack.windows(2) {
                assert_ne!(pair[0].is_introverted(), pair[1].is_introverted(), "{code}");
            }
            assert_eq!(stack[0].is_introverted(), code.starts_with('I'), "{code}");
        }
    }

    #[test]
    fn intj_stack_builds_on_base_levels() {
        let stack = stack_for("INTJ").expect("INTJ should resolve");
        assert_eq!(stack, [Ni, Te, Fi, Se]);
        assert_eq!(BASE_DEVELOPMENT, [0.8, 0.6, 0.4, 0.2]);

        let result = resolve_stack("intj", &TraitScores::uniform(50.0), &[]);
        assert_eq!(result.primary_stack, vec![Ni, Te, Fi, Se]);
        for (function, base) in stack.iter().zip(BASE_DEVELOPMENT) {
            // neutral traits add 0.25 + 0.25
            assert!((result.development_levels[function] - (base + 0.5).min(1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn modifiers_follow_attitude_and_axis() {
        let scores = TraitScores::new(80.0, 50.0, 20.0, 30.0, 50.0);
        let result = resolve_stack("INTJ", &scores, &[]);

        // Ni: 0.8 + 0.4 + 0.4 capped
        assert_eq!(result.development_levels[&Ni], 1.0);
        // Te: 0.6 + 0.1 + 0.35
        assert_eq!(result.development_levels[&Te], 1.0);
        // Fi: 0.4 + 0.4 + 0.15
        assert!((result.development_levels[&Fi] - 0.95).abs() < 1e-12);
        // Se: 0.2 + 0.1 + 0.1
        assert!((result.development_levels[&Se] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn shadows_flip_dominant_and_auxiliary() {
        let result = resolve_stack("ENFP", &TraitScores::default(), &[]);
        assert_eq!(result.shadow_functions, vec![Ni, Fe]);
    }

    #[test]
    fn unknown_type_yields_empty_stack() {
        let result = resolve_stack("XXXX", &TraitScores::default(), &[]);
        assert!(result.primary_stack.is_empty());
        assert!(result.development_levels.is_empty());
        assert!(result.shadow_functions.is_empty());
    }
}
