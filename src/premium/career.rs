use crate::catalog::QuestionCatalog;
use crate::scoring::{resolve, stats};
use crate::types::question::Submission;
use crate::types::traits::TraitScores;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const CAREER_ASSESSMENT: &str = "career";
pub const BASE_FIT: f64 = 70.0;
pub const MAX_SUGGESTIONS: usize = 5;

/// Holland's six interest codes, in canonical RIASEC order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Riasec {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Riasec {
    pub const ALL: [Riasec; 6] = [
        Riasec::Realistic,
        Riasec::Investigative,
        Riasec::Artistic,
        Riasec::Social,
        Riasec::Enterprising,
        Riasec::Conventional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Investigative => "Investigative",
            Self::Artistic => "Artistic",
            Self::Social => "Social",
            Self::Enterprising => "Enterprising",
            Self::Conventional => "Conventional",
        }
    }

    pub fn initial(self) -> char {
        match self {
            Self::Realistic => 'R',
            Self::Investigative => 'I',
            Self::Artistic => 'A',
            Self::Social => 'S',
            Self::Enterprising => 'E',
            Self::Conventional => 'C',
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn theme(self) -> &'static str {
        match self {
            Self::Realistic => "Working with things, tools, or machines",
            Self::Investigative => "Solving complex problems and discovering new knowledge",
            Self::Artistic => "Creating, designing, and expressing ideas",
            Self::Social => "Helping, teaching, and connecting with people",
            Self::Enterprising => "Leading, persuading, and achieving business goals",
            Self::Conventional => "Organizing, structuring, and maintaining systems",
        }
    }

    /// Additive personality term on top of the item mean.
    pub fn adjustment(self, big_five: &TraitScores) -> f64 {
        let o = big_five.openness;
        let c = big_five.conscientiousness;
        let e = big_five.extraversion;
        let a = big_five.agreeableness;
        match self {
            Self::Realistic => (100.0 - o) * 0.002 + c * 0.001,
            Self::Investigative => o * 0.002 + (100.0 - e) * 0.001,
            Self::Artistic => o * 0.003 + (100.0 - c) * 0.001,
            Self::Social => e * 0.002 + a * 0.002,
            Self::Enterprising => e * 0.002 + (100.0 - a) * 0.001,
            Self::Conventional => c * 0.002 + (100.0 - o) * 0.001,
        }
    }
}

static CAREER_MAP: [(&str, [&str; 3]); 10] = [
    ("RIA", ["Engineer", "Architect", "Research Scientist"]),
    ("RIS", ["Medical Technician", "Computer Programmer", "Electrician"]),
    ("AIR", ["Industrial Designer", "Technical Writer", "Web Developer"]),
    ("AIS", ["Graphic Designer", "Musician", "Writer"]),
    ("SAI", ["Art Teacher", "Counselor", "Librarian"]),
    ("SIA", ["Psychologist", "Social Worker", "Teacher"]),
    ("ESA", ["Sales Manager", "Public Relations", "Marketing Director"]),
    ("EAS", ["Advertising Executive", "Event Planner", "Brand Manager"]),
    ("CER", ["Accountant", "Financial Analyst", "Project Manager"]),
    ("CEI", ["Data Analyst", "Actuary", "Compliance Officer"]),
];

static FALLBACK_CAREERS: [&str; 3] = ["Consultant", "Analyst", "Specialist"];

/// Title keywords and their personality adjustment. The first matching rule wins.
const FIT_RULES: [(&[&str], fn(&TraitScores) -> f64); 3] = [
    (&["Manager", "Director"], |s| {
        (s.extraversion - 50.0) * 0.3 + (s.conscientiousness - 50.0) * 0.2
    }),
    (&["Analyst", "Scientist"], |s| {
        (s.openness - 50.0) * 0.3 + (50.0 - s.extraversion) * 0.2
    }),
    (&["Designer", "Artist"], |s| {
        (s.openness - 50.0) * 0.4 + (50.0 - s.conscientiousness) * 0.1
    }),
];

#[derive(Debug, Clone, Serialize)]
pub struct CareerSuggestion {
    pub title: &'static str,
    pub fit_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerResult {
    pub holland_code: String,
    pub riasec_scores: BTreeMap<Riasec, f64>,
    pub career_themes: Vec<&'static str>,
    pub suggested_careers: Vec<CareerSuggestion>,
}

pub fn careers_for(holland_code: &str) -> &'static [&'static str] {
    CAREER_MAP
        .iter()
        .find(|(code, _)| *code == holland_code)
        .map(|(_, careers)| careers.as_slice())
        .unwrap_or(&FALLBACK_CAREERS)
}

pub fn career_fit(title: &str, big_five: &TraitScores) -> f64 {
    let adjustment = FIT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, rule)| rule(big_five))
        .unwrap_or(0.0);
    (BASE_FIT + adjustment).clamp(0.0, 100.0)
}

/// Scores the career-tagged items of a submission against a Big Five profile.
pub fn score_career(
    catalog: &QuestionCatalog,
    submission: &Submission,
    big_five: &TraitScores,
) -> CareerResult {
    let mut items: BTreeMap<Riasec, Vec<f64>> = BTreeMap::new();
    for (question, response) in resolve(catalog, submission) {
        if question.assessment_type.as_deref() != Some(CAREER_ASSESSMENT) {
            continue;
        }
        let (Some(code), Some(value)) = (
            question.riasec_type.as_deref().and_then(Riasec::parse),
            question.keyed_value(response),
        ) else {
            continue;
        };
        items.entry(code).or_default().push(value);
    }

    let riasec_scores: BTreeMap<Riasec, f64> = Riasec::ALL
        .into_iter()
        .map(|code| {
            let mean = items
                .get(&code)
                .and_then(|values| stats::mean(values))
                .unwrap_or(0.0);
            (code, mean + code.adjustment(big_five))
        })
        .collect();

    // Stable sort keeps RIASEC order on ties.
    let mut ranked: Vec<(Riasec, f64)> = riasec_scores.iter().map(|(&c, &s)| (c, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top: Vec<Riasec> = ranked.iter().take(3).map(|(code, _)| *code).collect();
    let holland_code: String = top.iter().map(|code| code.initial()).collect();

    let mut suggested_careers: Vec<CareerSuggestion> = careers_for(&holland_code)
        .iter()
        .map(|&title| CareerSuggestion {
            title,
            fit_score: career_fit(title, big_five),
        })
        .collect();
    suggested_careers.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
    suggested_careers.truncate(MAX_SUGGESTIONS);

    debug!(holland_code = %holland_code, "scored career instrument");

    CareerResult {
        holland_code,
        riasec_scores,
        career_themes: top.iter().map(|code| code.theme()).collect(),
        suggested_careers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::likert;
    use crate::types::question::{Question, Response};

    fn career_item(id: &str, code: &str, reverse: bool) -> Question {
        let mut question = likert(id, "career_interest", reverse);
        question.factor_loadings = None;
        question.assessment_type = Some(CAREER_ASSESSMENT.to_string());
        question.riasec_type = Some(code.to_string());
        question
    }

    #[test]
    fn adjustments_match_documented_terms() {
        let scores = TraitScores::new(80.0, 40.0, 30.0, 60.0, 50.0);
        assert!((Riasec::Realistic.adjustment(&scores) - (0.04 + 0.04)).abs() < 1e-12);
        assert!((Riasec::Investigative.adjustment(&scores) - (0.16 + 0.07)).abs() < 1e-12);
        assert!((Riasec::Artistic.adjustment(&scores) - (0.24 + 0.06)).abs() < 1e-12);
        assert!((Riasec::Social.adjustment(&scores) - (0.06 + 0.12)).abs() < 1e-12);
        assert!((Riasec::Enterprising.adjustment(&scores) - (0.06 + 0.04)).abs() < 1e-12);
        assert!((Riasec::Conventional.adjustment(&scores) - (0.08 + 0.02)).abs() < 1e-12);
    }

    #[test]
    fn holland_code_takes_top_three_and_looks_up_careers() {
        let catalog = QuestionCatalog::from_questions(vec![
            career_item("R1", "Realistic", false),
            career_item("I1", "investigative", false),
            career_item("A1", "Artistic", false),
            career_item("S1", "Social", true),
            likert("E1", "Extraversion", false),
        ])
        .expect("catalog should build");
        let submission = Submission {
            responses: vec![
                Response::likert("R1", 7),
                Response::likert("I1", 6),
                Response::likert("A1", 5),
                Response::likert("S1", 7),
                Response::likert("E1", 7),
            ],
        };

        let result = score_career(&catalog, &submission, &TraitScores::uniform(50.0));
        assert_eq!(result.holland_code, "RIA");
        assert_eq!(result.career_themes.len(), 3);
        assert_eq!(result.career_themes[0], Riasec::Realistic.theme());
        let titles: Vec<_> = result.suggested_careers.iter().map(|c| c.title).collect();
        assert_eq!(titles.len(), 3);
        assert!(titles.contains(&"Research Scientist"));
        // reversed 7 on the social item lands at 1
        assert!((result.riasec_scores[&Riasec::Social] - (1.0 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn fit_applies_first_matching_rule() {
        let extravert = TraitScores::new(50.0, 100.0, 100.0, 50.0, 50.0);
        assert_eq!(career_fit("Sales Manager", &extravert), 95.0);
        assert_eq!(career_fit("Electrician", &extravert), BASE_FIT);

        let wild = TraitScores::new(100.0, 0.0, 0.0, 50.0, 50.0);
        // analyst rule: 70 + 15 + 10
        assert_eq!(career_fit("Data Analyst", &wild), 95.0);
        // designer rule: 70 + 20 + 5
        assert_eq!(career_fit("Graphic Designer", &wild), 95.0);
        let low = TraitScores::new(0.0, 0.0, 0.0, 50.0, 50.0);
        assert_eq!(career_fit("Marketing Director", &low), 45.0);
    }

    #[test]
    fn unknown_holland_code_uses_fallback_list() {
        assert_eq!(careers_for("ZZZ"), &FALLBACK_CAREERS);
        assert_eq!(careers_for("SIA")[0], "Psychologist");
    }

    #[test]
    fn suggestions_sort_by_fit() {
        let catalog = QuestionCatalog::from_questions(vec![
            career_item("E1", "Enterprising", false),
            career_item("S1", "Social", false),
            career_item("A1", "Artistic", false),
        ])
        .expect("catalog should build");
        let submission = Submission {
            responses: vec![
                Response::likert("E1", 7),
                Response::likert("S1", 6),
                Response::likert("A1", 5),
            ],
        };
        let scores = TraitScores::new(50.0, 90.0, 90.0, 50.0, 50.0);
        let result = score_career(&catalog, &submission, &scores);

        assert_eq!(result.holland_code, "ESA");
        assert_eq!(result.suggested_careers[0].title, "Sales Manager");
        assert_eq!(result.suggested_careers[2].title, "Public Relations");
    }
}
