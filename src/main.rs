mod catalog;
mod cli;
mod config;
mod error;
mod premium;
mod report;
mod scoring;
mod team;
mod types;

use crate::catalog::{NormTable, QuestionCatalog};
use crate::error::{PersonaError, Result};
use crate::team::TeamMember;
use crate::types::config::{PersonaConfig, ResolvedDataPaths};
use crate::types::profile::{AssessmentMode, ProfileSummary};
use crate::types::question::{Submission, Tier};
use clap::Parser;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const INSUFFICIENT_DATA: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct Workspace {
    config: PersonaConfig,
    paths: ResolvedDataPaths,
}

fn load_workspace(root: &Path) -> Result<Workspace> {
    if !root.exists() {
        return Err(PersonaError::PathNotFound(root.display().to_string()));
    }
    let config = match config::load_config(root)? {
        Some(config) => config,
        None => {
            warn!(
                root = %root.display(),
                "no {} found, using defaults",
                config::DEFAULT_CONFIG_FILE
            );
            PersonaConfig::default()
        }
    };
    let paths = config.data.resolve(root);
    Ok(Workspace { config, paths })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PersonaError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

/// Profile files named on the command line, with directories expanded to their `*.json`
/// files in path order.
fn profile_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(PersonaError::PathNotFound(path.display().to_string()));
        }
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_path_buf())
            .filter(|file| file.extension().is_some_and(|ext| ext == "json"))
            .collect();
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn tier_name(tier: Tier) -> &'static str {
    match tier {
        Tier::Primary => "primary",
        Tier::Secondary => "secondary",
        Tier::Tertiary => "tertiary",
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let workspace = load_workspace(&cli.root)?;
            let mode = match cmd.mode {
                cli::Mode::Core => AssessmentMode::Core,
                cli::Mode::Discovery => AssessmentMode::Discovery,
            };

            let main_catalog = QuestionCatalog::load(&workspace.paths.questions)?;
            let norms = NormTable::load(&workspace.paths.norms)?;
            let catalog = match mode {
                AssessmentMode::Core => main_catalog,
                AssessmentMode::Discovery => QuestionCatalog::load_discovery(
                    workspace.paths.discovery_questions.as_deref(),
                    &main_catalog,
                )?,
            };

            let submission: Submission = read_json(&cmd.submission)?;
            if cmd.skip_minimum {
                debug!("minimum response check skipped");
            } else {
                scoring::check_response_count(
                    &submission,
                    workspace.config.minimum_responses(mode),
                )?;
            }

            let confidence_level = cmd
                .confidence
                .unwrap_or(workspace.config.scoring.confidence_level);
            if !(confidence_level > 0.0 && confidence_level < 1.0) {
                return Err(PersonaError::ConfigParse(format!(
                    "confidence level must be strictly between 0.0 and 1.0 (found {confidence_level})"
                )));
            }

            let profile =
                scoring::score_assessment(&catalog, &norms, &submission, mode, confidence_level);
            let rendered =
                report::render(report::Report::Profile(&profile), output_format(cmd.format))?;
            println!("{rendered}");

            if profile.big_five.high_uncertainty_traits.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Relationship(cmd) => {
            let workspace = load_workspace(&cli.root)?;
            let catalog = QuestionCatalog::load(&workspace.paths.questions)?;
            let submission: Submission = read_json(&cmd.submission)?;

            let result = premium::score_relationship(&catalog, &submission);
            let rendered = report::render(
                report::Report::Relationship(&result),
                output_format(cmd.format),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Career(cmd) => {
            let workspace = load_workspace(&cli.root)?;
            let catalog = QuestionCatalog::load(&workspace.paths.questions)?;
            let submission: Submission = read_json(&cmd.submission)?;
            let profile: ProfileSummary = read_json(&cmd.profile)?;

            let result =
                premium::score_career(&catalog, &submission, &profile.big_five.scores);
            let rendered =
                report::render(report::Report::Career(&result), output_format(cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Team(cmd) => {
            let mut members = Vec::new();
            for file in profile_files(&cmd.paths)? {
                let summary: ProfileSummary = read_json(&file)?;
                let name = file
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.display().to_string());
                debug!(member = %name, path = %file.display(), "loaded team member");
                members.push(TeamMember::from_summary(name, summary));
            }

            let insights = team::generate(&members)?;
            let rendered =
                report::render(report::Report::Team(&insights), output_format(cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Questions(cmd) => {
            let workspace = load_workspace(&cli.root)?;
            let mut catalog = QuestionCatalog::load(&workspace.paths.questions)?;
            if cmd.discovery {
                catalog = QuestionCatalog::load_discovery(
                    workspace.paths.discovery_questions.as_deref(),
                    &catalog,
                )?;
            }

            let tier = cmd.tier.map(|tier| match tier {
                cli::TierFilter::Primary => Tier::Primary,
                cli::TierFilter::Secondary => Tier::Secondary,
                cli::TierFilter::Tertiary => Tier::Tertiary,
            });
            let questions = match tier {
                Some(tier) => catalog.all_by_tier(tier),
                None => catalog.iter().collect(),
            };

            for question in &questions {
                println!(
                    "{}\t{}\t{}\t{}",
                    question.id,
                    tier_name(question.tier),
                    question.dimension.as_deref().unwrap_or("-"),
                    question.text
                );
            }
            println!("{} questions", questions.len());
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_user_actionable() {
                exit_code::INSUFFICIENT_DATA
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
