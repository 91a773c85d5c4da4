//! Submission documents exported from the survey database.
//!
//! A submission holds one panchayat's survey as free-form `formData`. The
//! dashboard always shows the latest submission of the signed-in user; here
//! the same selection runs over an exported JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

static NO_RECORDS: Value = Value::Array(Vec::new());

use crate::errors::{Result, SnapshotError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDocument {
    pub user_id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub form_data: Map<String, Value>,
}

impl SubmissionDocument {
    /// Raw value of `formData.<field>`, or an empty array when absent.
    ///
    /// A present but malformed field is passed on unchanged so the
    /// validation boundary can report it.
    pub fn records_value(&self, field: &str) -> &Value {
        self.form_data.get(field).unwrap_or(&NO_RECORDS)
    }

    /// Villages that have a recorded population, in document order.
    pub fn village_names(&self, demographics_field: &str) -> Vec<String> {
        let Some(demographics) = self.form_data.get(demographics_field).and_then(Value::as_object)
        else {
            return Vec::new();
        };

        demographics
            .iter()
            .filter(|(_, entry)| has_population(entry))
            .map(|(village, _)| village.clone())
            .collect()
    }
}

fn has_population(entry: &Value) -> bool {
    match entry.get("totalPopulation") {
        Some(Value::String(population)) => !population.trim().is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportFile {
    Many(Vec<SubmissionDocument>),
    One(Box<SubmissionDocument>),
}

/// Load an export containing either one document or an array of documents.
pub fn load_documents(path: &Path) -> Result<Vec<SubmissionDocument>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SnapshotError::io("failed to read submission export", path, e))?;
    let documents = parse_documents(&contents).map_err(|e| SnapshotError::json(path, e))?;
    debug!(path = %path.display(), documents = documents.len(), "loaded submission export");
    Ok(documents)
}

pub fn parse_documents(contents: &str) -> serde_json::Result<Vec<SubmissionDocument>> {
    Ok(match serde_json::from_str::<ExportFile>(contents)? {
        ExportFile::Many(documents) => documents,
        ExportFile::One(document) => vec![*document],
    })
}

/// Latest submission of `user_id`, or of anyone when `user_id` is `None`.
pub fn latest_submission<'a>(
    documents: &'a [SubmissionDocument],
    user_id: Option<&str>,
) -> Option<&'a SubmissionDocument> {
    documents
        .iter()
        .filter(|doc| user_id.is_none_or(|user| doc.user_id == user))
        .max_by_key(|doc| doc.submitted_at)
}

/// Like [`latest_submission`] but a missing submission is an error.
pub fn require_latest<'a>(
    documents: &'a [SubmissionDocument],
    user_id: Option<&str>,
) -> Result<&'a SubmissionDocument> {
    latest_submission(documents, user_id).ok_or_else(|| SnapshotError::no_submission(user_id))
}
