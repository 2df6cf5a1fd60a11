pub mod json;
pub mod md;

use crate::error::{PersonaError, Result};
use crate::premium::{CareerResult, RelationshipResult};
use crate::team::TeamInsights;
use crate::types::profile::AssessmentProfile;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Any result the CLI can print.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Profile(&'a AssessmentProfile),
    Relationship(&'a RelationshipResult),
    Career(&'a CareerResult),
    Team(&'a TeamInsights),
}

pub fn render(report: Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PersonaError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
