use super::Report;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a> {
    version: &'static str,
    generated_at: String,
    #[serde(flatten)]
    report: Report<'a>,
}

pub fn to_json(report: Report<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        report,
    })
}
