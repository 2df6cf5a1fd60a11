use super::Report;
use crate::premium::{CareerResult, RelationshipResult};
use crate::scoring::cluster::PROTOTYPES;
use crate::team::TeamInsights;
use crate::types::profile::{AssessmentProfile, Extremity};
use crate::types::traits::Trait;

pub fn to_markdown(report: Report<'_>) -> String {
    match report {
        Report::Profile(profile) => profile_markdown(profile),
        Report::Relationship(result) => relationship_markdown(result),
        Report::Career(result) => career_markdown(result),
        Report::Team(insights) => team_markdown(insights),
    }
}

fn none_line(output: &mut String) {
    output.push_str("- none\n\n");
}

fn extremity(level: Extremity) -> &'static str {
    match level {
        Extremity::High => "high",
        Extremity::Low => "low",
    }
}

fn profile_markdown(profile: &AssessmentProfile) -> String {
    let big_five = &profile.big_five;
    let mut output = String::new();
    output.push_str("# Personality Profile\n\n");
    output.push_str(&format!(
        "Mode: {:?}, answered items: {}\n\n",
        profile.mode, profile.answered_items
    ));

    if let Some(warning) = &big_five.confidence_warning {
        output.push_str(&format!("> {warning}\n\n"));
    }
    if !big_five.high_uncertainty_traits.is_empty() {
        let names: Vec<&str> = big_five
            .high_uncertainty_traits
            .iter()
            .map(|t| t.name())
            .collect();
        output.push_str(&format!("High uncertainty: {}\n\n", names.join(", ")));
    }

    output.push_str("## Big Five\n\n");
    output.push_str("| Trait | Score | Percentile | SE | Interval |\n");
    output.push_str("|---|---:|---:|---:|---|\n");
    for t in Trait::ALL {
        let interval = big_five
            .confidence_intervals
            .get(&t)
            .map(|ci| format!("{:.1} to {:.1}", ci.lower_bound, ci.upper_bound))
            .unwrap_or_default();
        output.push_str(&format!(
            "| {} | {:.1} | {:.1} | {:.2} | {} |\n",
            t,
            big_five.scores.get(t),
            big_five.percentiles.get(t),
            big_five.standard_errors.get(t),
            interval
        ));
    }
    output.push('\n');

    if !big_five.facet_scores.is_empty() {
        output.push_str("## Facets\n\n");
        for (t, facets) in &big_five.facet_scores {
            for (facet, score) in facets {
                output.push_str(&format!("- {t} / {facet}: {score:.1}\n"));
            }
        }
        output.push('\n');
    }

    let mbti = &profile.mbti;
    output.push_str("## Type\n\n");
    output.push_str(&format!(
        "{} (probability {:.3})\n\n",
        mbti.primary_type, mbti.probability
    ));
    if let Some(secondary) = &mbti.secondary_type {
        output.push_str(&format!("Secondary: {secondary}\n\n"));
    }
    for axis in &mbti.axes {
        output.push_str(&format!(
            "- {}/{}: {} {:.3}\n",
            axis.first.letter(),
            axis.second.letter(),
            axis.winner.letter(),
            axis.confidence
        ));
    }
    output.push('\n');

    let stack = &profile.cognitive_functions;
    output.push_str("## Cognitive Functions\n\n");
    if stack.primary_stack.is_empty() {
        none_line(&mut output);
    } else {
        for function in &stack.primary_stack {
            let level = stack.development_levels.get(function).copied().unwrap_or(0.0);
            output.push_str(&format!("- {function}: {level:.2}\n"));
        }
        let shadow: Vec<String> = stack.shadow_functions.iter().map(|f| f.to_string()).collect();
        output.push_str(&format!("- shadow: {}\n\n", shadow.join(", ")));
    }

    let cluster = &profile.personality_cluster;
    output.push_str("## Cluster\n\n");
    output.push_str(&format!("{}\n\n", cluster.cluster_description));
    for (prototype, probability) in PROTOTYPES.iter().zip(cluster.cluster_probabilities) {
        output.push_str(&format!("- {}: {:.3}\n", prototype.name, probability));
    }
    output.push('\n');

    let depth = &profile.jungian_depth;
    output.push_str("## Depth\n\n");
    output.push_str(&format!(
        "- shadow integration: {:.2}\n- individuation: {}\n",
        depth.shadow_integration,
        depth.individuation_stage.label()
    ));
    if let Some(archetype) = &depth.primary_archetype {
        output.push_str(&format!("- primary archetype: {archetype}\n"));
    }
    output.push('\n');

    output.push_str("## Trait Interactions\n\n");
    if profile.trait_interactions.is_empty() {
        none_line(&mut output);
    } else {
        for interaction in &profile.trait_interactions {
            output.push_str(&format!(
                "- {} ({}): {:.2}\n",
                interaction.name, interaction.pattern, interaction.strength
            ));
        }
        output.push('\n');
    }

    let uniqueness = &profile.uniqueness;
    output.push_str("## Uniqueness\n\n");
    output.push_str(&format!("Score: {:.1}\n\n", uniqueness.uniqueness_score));
    for extreme in &uniqueness.extreme_scores {
        output.push_str(&format!(
            "- {} {} (percentile {:.1})\n",
            extreme.trait_name,
            extremity(extreme.level),
            extreme.percentile
        ));
    }
    for label in uniqueness
        .rare_combinations
        .iter()
        .chain(&uniqueness.paradoxical_patterns)
    {
        output.push_str(&format!("- {label}\n"));
    }

    output
}

fn relationship_markdown(result: &RelationshipResult) -> String {
    let attachment = &result.attachment;
    let mut output = String::new();
    output.push_str("# Relationship Profile\n\n");
    output.push_str("## Attachment\n\n");
    output.push_str(&format!(
        "{}: anxiety {:.2}, avoidance {:.2}\n\n{}\n\n",
        attachment.style.label(),
        attachment.anxiety_score,
        attachment.avoidance_score,
        attachment.description
    ));

    output.push_str("## Love Languages\n\n");
    if result.love_languages.rankings.is_empty() {
        output.push_str("- none\n");
    } else {
        for entry in &result.love_languages.rankings {
            output.push_str(&format!("- {}: {:.2}\n", entry.language.key(), entry.score));
        }
    }
    output
}

fn career_markdown(result: &CareerResult) -> String {
    let mut output = String::new();
    output.push_str("# Career Profile\n\n");
    output.push_str(&format!("Holland code: {}\n\n", result.holland_code));

    output.push_str("## Interests\n\n");
    for (code, score) in &result.riasec_scores {
        output.push_str(&format!("- {}: {:.2}\n", code.name(), score));
    }
    output.push('\n');

    output.push_str("## Themes\n\n");
    for theme in &result.career_themes {
        output.push_str(&format!("- {theme}\n"));
    }
    output.push('\n');

    output.push_str("## Suggested Careers\n\n");
    for career in &result.suggested_careers {
        output.push_str(&format!("- {} ({:.1})\n", career.title, career.fit_score));
    }
    output
}

fn team_markdown(insights: &TeamInsights) -> String {
    let composition = &insights.composition;
    let mut output = String::new();
    output.push_str("# Team Insights\n\n");
    output.push_str(&format!(
        "Members: {}, profile: {}\n\nDiversity {:.1}, balance {:.1}\n\n",
        insights.team_size,
        composition.team_profile,
        composition.diversity_score,
        composition.balance_score
    ));

    output.push_str("## Trait Ranges\n\n");
    output.push_str("| Trait | Mean | Min | Max | SD |\n");
    output.push_str("|---|---:|---:|---:|---:|\n");
    for (t, range) in &composition.trait_ranges {
        output.push_str(&format!(
            "| {} | {:.1} | {:.1} | {:.1} | {:.1} |\n",
            t, range.mean, range.min, range.max, range.std_dev
        ));
    }
    output.push('\n');

    output.push_str("## Types\n\n");
    for (code, count) in &composition.type_distribution {
        output.push_str(&format!("- {code}: {count}\n"));
    }
    output.push('\n');

    output.push_str("## Missing Perspectives\n\n");
    if composition.missing_perspectives.is_empty() {
        none_line(&mut output);
    } else {
        for missing in &composition.missing_perspectives {
            output.push_str(&format!("- {}: {}\n", missing.perspective, missing.suggestion));
        }
        output.push('\n');
    }

    output.push_str("## Communication\n\n");
    for pair in &insights.communication_map {
        output.push_str(&format!(
            "- {} & {}: {:.0}\n",
            pair.members[0], pair.members[1], pair.compatibility_score
        ));
    }
    output.push('\n');

    output.push_str("## Potential Conflicts\n\n");
    if insights.potential_conflicts.is_empty() {
        none_line(&mut output);
    } else {
        for conflict in &insights.potential_conflicts {
            let areas: Vec<&str> = conflict.areas.iter().map(|area| area.label()).collect();
            let scope = match conflict.trait_name {
                Some(t) => t.to_string(),
                None => conflict.members.join(" & "),
            };
            output.push_str(&format!(
                "- {} [{}]: severity {:.0}\n",
                scope,
                areas.join(", "),
                conflict.severity
            ));
        }
        output.push('\n');
    }

    output.push_str("## Strengths\n\n");
    if insights.team_strengths.is_empty() {
        none_line(&mut output);
    } else {
        for strength in &insights.team_strengths {
            output.push_str(&format!("- {}: {}\n", strength.strength, strength.leverage));
        }
        output.push('\n');
    }

    output.push_str("## Blind Spots\n\n");
    if insights.blind_spots.is_empty() {
        none_line(&mut output);
    } else {
        for spot in &insights.blind_spots {
            output.push_str(&format!("- {}: {}\n", spot.blind_spot, spot.mitigation));
        }
        output.push('\n');
    }

    let dynamics = &insights.dynamics;
    output.push_str("## Dynamics\n\n");
    output.push_str(&format!(
        "- energy: {}\n- decisions: {}, {}\n- innovation: {:.1} ({})\n- stability: {:.1} ({})\n\n",
        dynamics.energy_flow.flow,
        dynamics.decision_style.thinking_style,
        dynamics.decision_style.closure_style,
        dynamics.innovation_potential.score,
        dynamics.innovation_potential.level,
        dynamics.stability_index.score,
        dynamics.stability_index.level
    ));

    let leadership = &insights.leadership;
    output.push_str("## Leadership\n\n");
    output.push_str(&format!(
        "Model: {}\n\n",
        leadership.model.description()
    ));
    if let Some(style) = leadership.primary_style {
        output.push_str(&format!("Primary style: {}\n\n", style.label()));
    }
    for leader in &leadership.natural_leaders {
        output.push_str(&format!(
            "- {} ({:.1}, {})\n",
            leader.member,
            leader.score,
            leader.style.label()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::likert;
    use crate::catalog::norms::standard_norms;
    use crate::catalog::QuestionCatalog;
    use crate::scoring::score_assessment;
    use crate::team::{self, fixtures::member};
    use crate::types::profile::AssessmentMode;
    use crate::types::question::{Response, Submission};

    #[test]
    fn profile_markdown_contains_sections() {
        let catalog = QuestionCatalog::from_questions(vec![
            likert("O1", "Openness", false),
            likert("E1", "Extraversion", false),
        ])
        .expect("catalog should build");
        let submission = Submission {
            responses: vec![Response::likert("O1", 7), Response::likert("E1", 2)],
        };
        let profile = score_assessment(
            &catalog,
            &standard_norms(),
            &submission,
            AssessmentMode::Discovery,
            0.95,
        );

        let rendered = to_markdown(Report::Profile(&profile));
        assert!(rendered.contains("# Personality Profile"));
        assert!(rendered.contains("| Openness |"));
        assert!(rendered.contains("## Type"));
        assert!(rendered.contains("## Cluster"));
        assert!(rendered.contains("High uncertainty:"));
    }

    #[test]
    fn team_markdown_lists_members_and_dynamics() {
        let insights = team::generate(&[
            member("ana", [80.0, 20.0, 90.0, 30.0, 80.0], "ENFP"),
            member("bo", [20.0, 85.0, 15.0, 85.0, 20.0], "ISTJ"),
        ])
        .expect("pair should be analyzed");

        let rendered = to_markdown(Report::Team(&insights));
        assert!(rendered.contains("# Team Insights"));
        assert!(rendered.contains("- ana & bo:"));
        assert!(rendered.contains("## Dynamics"));
        assert!(rendered.contains("## Leadership"));
    }
}
