//! Report generation
//!
//! Turns per-file decode outcomes into either a C header or a JSON report.

use crate::inputs::Job;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use subghz_decoder::{
    render_failure, render_header, render_missing, ArrayRenderer, CaptureMetadata,
    DecodedCapture, DecoderError, Encoding, Protocol, Timing,
};

/// Decode result for one input file
#[derive(Debug)]
pub struct FileOutcome {
    pub job: Job,
    pub result: std::result::Result<DecodedCapture, DecoderError>,
}

/// Render every outcome as one header block. Failures become comment
/// placeholders so the header stays usable.
pub fn header_blocks(outcomes: &[FileOutcome], renderer: &ArrayRenderer) -> Vec<String> {
    outcomes
        .iter()
        .map(|outcome| {
            let file_name = outcome.job.display_name();
            match &outcome.result {
                Ok(decoded) => renderer
                    .render(&decoded.timings, &outcome.job.name)
                    .unwrap_or_else(|e| {
                        log::warn!("Cannot render {}: {}", file_name, e);
                        render_failure(&file_name, &e)
                    }),
                Err(DecoderError::NotFound(_)) => render_missing(&file_name),
                Err(e) => render_failure(&file_name, e),
            }
        })
        .collect()
}

/// Full header file text
pub fn header_report(outcomes: &[FileOutcome], renderer: &ArrayRenderer) -> String {
    render_header(&header_blocks(outcomes, renderer))
}

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub tool_version: String,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub array_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CaptureMetadata>,
    pub count: usize,
    pub timings: Vec<Timing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn from_outcome(outcome: &FileOutcome) -> Self {
        let path = outcome.job.path.clone();
        let array_name = outcome.job.name.clone();
        match &outcome.result {
            Ok(decoded) => Self {
                path,
                array_name,
                protocol: decoded.protocol.clone(),
                encoding: Some(decoded.encoding),
                metadata: Some(decoded.metadata.clone()),
                count: decoded.timings.len(),
                timings: decoded.timings.clone(),
                error: None,
            },
            Err(e) => Self {
                path,
                array_name,
                protocol: None,
                encoding: None,
                metadata: None,
                count: 0,
                timings: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Build the JSON report
pub fn json_report(outcomes: &[FileOutcome]) -> JsonReport {
    JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        files: outcomes.iter().map(FileReport::from_outcome).collect(),
    }
}

/// JSON report as pretty-printed text
pub fn json_text(outcomes: &[FileOutcome]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&json_report(outcomes))?;
    text.push('\n');
    Ok(text)
}
