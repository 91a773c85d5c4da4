use anyhow::Result;
use std::path::Path;

use crate::config::SnapshotConfig;
use crate::core::ALL_LOCATIONS;
use crate::snapshot::{load_documents, require_latest, SubmissionDocument};

pub fn run(input: &Path, user: Option<&str>, config: &SnapshotConfig) -> Result<()> {
    let documents = load_documents(input)?;
    let submission = require_latest(&documents, user)?;
    for option in village_options(submission, config) {
        println!("{option}");
    }
    Ok(())
}

/// Selector entries: the "All" sentinel followed by villages with a population.
pub fn village_options(submission: &SubmissionDocument, config: &SnapshotConfig) -> Vec<String> {
    std::iter::once(ALL_LOCATIONS.to_string())
        .chain(submission.village_names(&config.snapshot.demographics_field))
        .collect()
}
