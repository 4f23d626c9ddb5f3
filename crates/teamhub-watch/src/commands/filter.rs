//! Offline smart folder evaluation

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::path::Path;
use teamhub::filter_documents;
use teamhub::models::{Document, SmartFolder};
use tracing::info;

pub fn run(smart_folder: &Path, docs: &Path, at: Option<&str>) -> Result<()> {
    let folder: SmartFolder = read_json(smart_folder)?;
    let docs: Vec<Document> = read_json(docs)?;

    let ids = match at {
        Some(at) => {
            let now = DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("Invalid --at instant: {}", at))?;
            matching_ids(&docs, &folder, &now)
        }
        None => matching_ids(&docs, &folder, &Local::now()),
    };

    info!(
        "Smart folder {} ({}) selects {} of {} documents",
        folder.id,
        folder.condition.combinator,
        ids.len(),
        docs.len()
    );
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

fn matching_ids<Tz: TimeZone>(docs: &[Document], folder: &SmartFolder, now: &DateTime<Tz>) -> Vec<String> {
    filter_documents(docs, folder, now)
        .into_iter()
        .map(|doc| doc.id.clone())
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
