#![forbid(unsafe_code)]

//! JSON and JSONL output for machine consumers
//!
//! `print-config` emits one pretty-printed JSON document, the shape handed to
//! the consuming engine. Listings emit one JSON object per line, records
//! first and a single summary record last.

use crate::engine::CalculationResult;
use crate::presets::Preset;
use crate::resolver::ResolvedConfig;
use serde::Serialize;

/// JSON/JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Pretty-printed JSON document for a resolved configuration
    pub fn format_config(&self, config: &ResolvedConfig) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        Ok(json)
    }

    /// One `file` record per report, then a `summary` record
    ///
    /// Without `include_all` only configured files are emitted.
    pub fn format_files(
        &self,
        result: &CalculationResult,
        include_all: bool,
    ) -> Result<String, serde_json::Error> {
        let mut output = String::new();

        for report in &result.reports {
            if !include_all && report.status != crate::scope::FileStatus::Configured {
                continue;
            }
            let record = FileRecord {
                record_type: "file",
                path: report.relative.as_str(),
                status: report.status.as_str(),
                rules_enabled: report
                    .config
                    .as_ref()
                    .map(|config| config.enabled_rules().count()),
            };
            push_line(&mut output, &record)?;
        }

        let summary = SummaryRecord {
            record_type: "summary",
            configured: result.configured,
            ignored: result.ignored,
            unconfigured: result.unconfigured,
        };
        push_line(&mut output, &summary)?;

        Ok(output)
    }

    /// One `preset` record per preset
    pub fn format_presets<'a, I>(&self, presets: I) -> Result<String, serde_json::Error>
    where
        I: IntoIterator<Item = &'a Preset>,
    {
        let mut output = String::new();
        for preset in presets {
            let record = PresetRecord {
                record_type: "preset",
                name: &preset.name,
                source: preset.source.as_str(),
                description: &preset.description,
                fragments: preset.fragments.len(),
                rules: preset.fragments.iter().map(|f| f.rules.len()).sum(),
            };
            push_line(&mut output, &record)?;
        }
        Ok(output)
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<T: Serialize>(output: &mut String, record: &T) -> Result<(), serde_json::Error> {
    output.push_str(&serde_json::to_string(record)?);
    output.push('\n');
    Ok(())
}

#[derive(Debug, Serialize)]
struct FileRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    path: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules_enabled: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    configured: usize,
    ignored: usize,
    unconfigured: usize,
}

#[derive(Debug, Serialize)]
struct PresetRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    source: &'static str,
    description: &'a str,
    fragments: usize,
    rules: usize,
}
