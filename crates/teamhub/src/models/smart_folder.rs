//! Smart folder model: a saved, declarative filter over documents

use super::{DocStatus, Entity, ExtraFields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How leaf conditions are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    And,
    Or,
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combinator::And => write!(f, "and"),
            Combinator::Or => write!(f, "or"),
        }
    }
}

/// Relation between a document timestamp and the condition's date(s)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DateConditionValue {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7_days")]
    Last7Days,
    #[serde(rename = "30_days")]
    Last30Days,
    #[serde(rename = "after")]
    After { date: DateTime<Utc> },
    #[serde(rename = "before")]
    Before { date: DateTime<Utc> },
    #[serde(rename = "specific")]
    Specific { date: DateTime<Utc> },
    #[serde(rename = "between")]
    Between {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    /// A relation this client does not know; it never holds
    #[serde(other)]
    Unknown,
}

/// One atomic predicate of a smart folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeafCondition {
    Status {
        #[serde(default)]
        value: Option<DocStatus>,
    },
    Assignees {
        #[serde(default)]
        value: Vec<String>,
    },
    Labels {
        #[serde(default)]
        value: Vec<String>,
    },
    DueDate {
        value: DateConditionValue,
    },
    CreationDate {
        value: DateConditionValue,
    },
    UpdateDate {
        value: DateConditionValue,
    },
    /// A condition type this client does not know
    #[serde(other)]
    Unknown,
}

/// Two-level rule: a combinator over an ordered list of leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartFolderCondition {
    #[serde(rename = "type")]
    pub combinator: Combinator,
    #[serde(default)]
    pub conditions: Vec<LeafCondition>,
}

impl SmartFolderCondition {
    pub fn and(conditions: Vec<LeafCondition>) -> Self {
        Self {
            combinator: Combinator::And,
            conditions,
        }
    }

    pub fn or(conditions: Vec<LeafCondition>) -> Self {
        Self {
            combinator: Combinator::Or,
            conditions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartFolder {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub condition: SmartFolderCondition,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SmartFolder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, condition: SmartFolderCondition) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            condition,
            extra: ExtraFields::new(),
        }
    }
}

impl Entity for SmartFolder {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_condition_tree() {
        let folder: SmartFolder = serde_json::from_value(json!({
            "id": "sf-1",
            "name": "Due soon",
            "condition": {
                "type": "or",
                "conditions": [
                    { "type": "status", "value": "completed" },
                    { "type": "labels", "value": ["tag-1", "tag-2"] },
                    { "type": "due_date", "value": { "type": "7_days" } },
                    {
                        "type": "creation_date",
                        "value": {
                            "type": "between",
                            "from": "2024-01-01T00:00:00Z",
                            "to": "2024-01-31T00:00:00Z"
                        }
                    }
                ]
            }
        }))
        .unwrap();

        assert_eq!(folder.condition.combinator, Combinator::Or);
        assert_eq!(folder.condition.conditions.len(), 4);
        assert_eq!(
            folder.condition.conditions[0],
            LeafCondition::Status {
                value: Some(DocStatus::Completed)
            }
        );
        assert!(matches!(
            folder.condition.conditions[2],
            LeafCondition::DueDate {
                value: DateConditionValue::Last7Days
            }
        ));
    }

    #[test]
    fn test_unknown_leaf_type_is_kept() {
        let condition: SmartFolderCondition = serde_json::from_value(json!({
            "type": "and",
            "conditions": [{ "type": "priority", "value": "high" }]
        }))
        .unwrap();
        assert_eq!(condition.conditions, vec![LeafCondition::Unknown]);
    }

    #[test]
    fn test_unknown_values_of_known_leaves_decode() {
        let folder: SmartFolder = serde_json::from_value(json!({
            "id": "sf-1",
            "name": "Blocked soon",
            "condition": {
                "type": "and",
                "conditions": [
                    { "type": "status", "value": "blocked" },
                    { "type": "due_date", "value": { "type": "yesterday" } },
                    { "type": "update_date", "value": { "type": "fortnight", "date": "2024-01-01T00:00:00Z" } }
                ]
            }
        }))
        .unwrap();

        assert_eq!(
            folder.condition.conditions,
            vec![
                LeafCondition::Status {
                    value: Some(DocStatus::Other("blocked".into()))
                },
                LeafCondition::DueDate {
                    value: DateConditionValue::Unknown
                },
                LeafCondition::UpdateDate {
                    value: DateConditionValue::Unknown
                },
            ]
        );
    }

    #[test]
    fn test_null_status_value() {
        let leaf: LeafCondition =
            serde_json::from_value(json!({ "type": "status", "value": null })).unwrap();
        assert_eq!(leaf, LeafCondition::Status { value: None });
    }
}
