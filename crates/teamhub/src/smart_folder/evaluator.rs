//! Smart folder membership

use super::date::date_relation_holds;
use crate::models::{Combinator, DocStatus, Document, LeafCondition, SmartFolder};
use chrono::{DateTime, TimeZone};
use std::collections::HashSet;

/// Result of evaluating one leaf condition against one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafOutcome {
    Match,
    NoMatch,
    /// The leaf type is unknown; it neither matches nor fails the folder
    Skipped,
}

impl From<bool> for LeafOutcome {
    fn from(value: bool) -> Self {
        if value {
            LeafOutcome::Match
        } else {
            LeafOutcome::NoMatch
        }
    }
}

/// Evaluate a single leaf condition
pub fn evaluate_leaf<Tz: TimeZone>(
    doc: &Document,
    leaf: &LeafCondition,
    now: &DateTime<Tz>,
) -> LeafOutcome {
    match leaf {
        // A status this client does not know never matches, not even itself
        LeafCondition::Status {
            value: Some(DocStatus::Other(_)),
        } => LeafOutcome::NoMatch,
        LeafCondition::Status { value } => (doc.status == *value).into(),
        LeafCondition::Assignees { value } => {
            if doc.assignees.is_empty() {
                return LeafOutcome::NoMatch;
            }
            let targets: HashSet<&str> = value.iter().map(String::as_str).collect();
            doc.assignees
                .iter()
                .any(|a| targets.contains(a.user_id.as_str()))
                .into()
        }
        LeafCondition::Labels { value } => {
            if doc.tags.is_empty() {
                return LeafOutcome::NoMatch;
            }
            let targets: HashSet<&str> = value.iter().map(String::as_str).collect();
            doc.tags
                .iter()
                .any(|t| targets.contains(t.id.as_str()))
                .into()
        }
        LeafCondition::DueDate { value } => doc
            .due_date
            .map(|due| date_relation_holds(&due, value, now))
            .unwrap_or(false)
            .into(),
        LeafCondition::CreationDate { value } => {
            date_relation_holds(&doc.created_at, value, now).into()
        }
        LeafCondition::UpdateDate { value } => doc
            .updated_at
            .map(|updated| date_relation_holds(&updated, value, now))
            .unwrap_or(false)
            .into(),
        LeafCondition::Unknown => LeafOutcome::Skipped,
    }
}

/// Whether `doc` belongs to `folder` at instant `now`.
///
/// Leaves are visited in order. With `and` the first failing leaf decides
/// `false`; with `or` the first matching leaf decides `true`. Skipped leaves
/// never decide. A folder without conditions matches nothing.
pub fn matches<Tz: TimeZone>(doc: &Document, folder: &SmartFolder, now: &DateTime<Tz>) -> bool {
    let condition = &folder.condition;
    if condition.conditions.is_empty() {
        return false;
    }

    for leaf in &condition.conditions {
        match (condition.combinator, evaluate_leaf(doc, leaf, now)) {
            (Combinator::And, LeafOutcome::NoMatch) => return false,
            (Combinator::Or, LeafOutcome::Match) => return true,
            _ => {}
        }
    }

    condition.combinator == Combinator::And
}

/// Documents of `docs` that belong to `folder`
pub fn filter_documents<'a, Tz, I>(docs: I, folder: &SmartFolder, now: &DateTime<Tz>) -> Vec<&'a Document>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a Document>,
{
    if folder.condition.conditions.is_empty() {
        return Vec::new();
    }
    docs.into_iter()
        .filter(|doc| matches(doc, folder, now))
        .collect()
}
