//! Declarative card configuration: which columns feed which card fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Required field `{field}` did not resolve (column {column:?})")]
    MissingRequiredField { field: &'static str, column: String },
    #[error("Keys in secondaryLabels must be sequential, missing key: {missing}")]
    NonSequentialSecondaryLabels { missing: usize },
    #[error("Internal link configuration needs both row data and a schema")]
    InternalLinkWithoutRow,
}

/// A secondary label: the column to read and an optional display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyToAlias {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl KeyToAlias {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            alias: None,
        }
    }

    pub fn with_alias(key: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            alias: Some(alias.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSchema {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Keyed by display position as written in JSON ("0", "1", ...). Keys are
    /// kept as text so a key that is not a position surfaces as a gap in
    /// [`CardSchema::secondary_labels`], not as a parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_labels: Option<BTreeMap<String, KeyToAlias>>,
}

impl CardSchema {
    pub fn new(card_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            card_type: card_type.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the secondary labels, numbered in iteration order.
    pub fn with_secondary_labels(mut self, labels: impl IntoIterator<Item = KeyToAlias>) -> Self {
        self.secondary_labels = Some(
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| (i.to_string(), label))
                .collect(),
        );
        self
    }

    /// Secondary labels in display order.
    ///
    /// The configured indices must cover `0..N` with no gaps; the first
    /// missing index is reported.
    pub fn secondary_labels(&self) -> Result<Vec<&KeyToAlias>, ConfigurationError> {
        let Some(labels) = &self.secondary_labels else {
            return Ok(Vec::new());
        };

        (0..labels.len())
            .map(|i| {
                labels
                    .get(&i.to_string())
                    .ok_or(ConfigurationError::NonSequentialSecondaryLabels { missing: i })
            })
            .collect()
    }

    pub fn has_secondary_labels(&self) -> bool {
        self.secondary_labels.is_some()
    }
}

/// Builds in-app links of the form `#/{base_url}?col=value&...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalLinkConfig {
    #[serde(rename = "baseURL", alias = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "columnValues", default)]
    pub column_values: Vec<String>,
}

impl InternalLinkConfig {
    pub fn new<S: Into<String>>(base_url: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            base_url: base_url.into(),
            column_values: columns.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_schema() {
        let input = r#"{
            "type": "dataset",
            "title": "datasetName",
            "subTitle": "authors",
            "link": "datasetId",
            "secondaryLabels": {
                "0": { "key": "grant" },
                "1": { "key": "tumorType", "alias": "Tumor Type" }
            }
        }"#;
        let schema: CardSchema = serde_json::from_str(input).unwrap();
        assert_eq!(schema.card_type, "dataset");
        assert_eq!(schema.sub_title.as_deref(), Some("authors"));
        assert_eq!(schema.description, None);

        let labels = schema.secondary_labels().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], &KeyToAlias::new("grant"));
        assert_eq!(labels[1].alias.as_deref(), Some("Tumor Type"));
    }

    #[test]
    fn test_secondary_labels_gap() {
        let input = r#"{
            "type": "t",
            "title": "name",
            "secondaryLabels": { "0": { "key": "a" }, "2": { "key": "b" } }
        }"#;
        let schema: CardSchema = serde_json::from_str(input).unwrap();
        assert_eq!(
            schema.secondary_labels(),
            Err(ConfigurationError::NonSequentialSecondaryLabels { missing: 1 })
        );
    }

    #[test]
    fn test_secondary_labels_non_numeric_key() {
        let input = r#"{
            "type": "t",
            "title": "name",
            "secondaryLabels": { "a": { "key": "x" } }
        }"#;
        let schema: CardSchema = serde_json::from_str(input).unwrap();
        assert_eq!(
            schema.secondary_labels(),
            Err(ConfigurationError::NonSequentialSecondaryLabels { missing: 0 })
        );
    }

    #[test]
    fn test_with_secondary_labels() {
        let schema = CardSchema::new("t", "name")
            .with_secondary_labels([KeyToAlias::new("a"), KeyToAlias::with_alias("b", "B")]);
        let labels = schema.secondary_labels().unwrap();
        assert_eq!(labels[0].key, "a");
        assert_eq!(labels[1].alias.as_deref(), Some("B"));
    }

    #[test]
    fn test_secondary_labels_absent() {
        let schema = CardSchema::new("t", "name");
        assert!(schema.secondary_labels().unwrap().is_empty());
        assert!(!schema.has_secondary_labels());
    }

    #[test]
    fn test_internal_link_keys() {
        let a: InternalLinkConfig =
            serde_json::from_str(r#"{"baseURL": "Explore", "columnValues": ["a", "b"]}"#).unwrap();
        let b: InternalLinkConfig =
            serde_json::from_str(r#"{"baseUrl": "Explore", "columnValues": ["a", "b"]}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, InternalLinkConfig::new("Explore", ["a", "b"]));
    }
}
