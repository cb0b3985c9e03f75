use std::{fs, path::Path};

use serde::Serialize;

use crate::InspectionReport;
use crate::error::{InspectError, Result};
use crate::geo::GeoFix;
use crate::metadata::decoder::{GpsOutcome, MetadataOutcome, NamedTag};

/// Write the two-section plain-text report exactly as displayed.
///
/// Both sections are newline-terminated before the labels so the blank
/// separator line is present whether or not the texts end in a newline.
/// Refuses to write when both sections are blank.
pub fn save_report<P: AsRef<Path>>(path: P, metadata: &str, location: &str) -> Result<()> {
    if metadata.trim().is_empty() && location.trim().is_empty() {
        return Err(InspectError::EmptyReport);
    }
    let mut contents = format!("Metadata:\n{}", metadata);
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&format!("\nGPS Location:\n{}", location));
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}

#[derive(Serialize)]
pub struct JsonReport {
    pub metadata: Vec<NamedTag>,
    pub metadata_error: Option<String>,
    pub gps_tags: Vec<NamedTag>,
    pub gps_status: &'static str,
    pub fix: Option<GeoFix>,
    pub map_url: Option<String>,
}

impl From<&InspectionReport> for JsonReport {
    fn from(report: &InspectionReport) -> Self {
        let metadata_error = match &report.metadata {
            MetadataOutcome::ReadError(details) => Some(details.clone()),
            _ => None,
        };
        let gps_status = match &report.gps.outcome {
            GpsOutcome::Fix(_) => "fix",
            GpsOutcome::NoData => "no_data",
            GpsOutcome::Incomplete => "incomplete",
            GpsOutcome::ReadError(_) => "error",
        };
        Self {
            metadata: report.metadata.tags().to_vec(),
            metadata_error,
            gps_tags: report.gps.tags.clone(),
            gps_status,
            fix: report.gps.fix().cloned(),
            map_url: report.gps.map_url().map(str::to_string),
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
