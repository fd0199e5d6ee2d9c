//! Project one row into a card view-model.

use crate::card_schema::{CardSchema, ConfigurationError, InternalLinkConfig, KeyToAlias};
use crate::link::{self, ResolvedLink};
use crate::resolve::FieldResolver;
use crate::value::{Row, Schema, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOptions {
    #[serde(default, rename = "internalLinkConfiguration", alias = "internalLinkConfig")]
    pub internal_link: Option<InternalLinkConfig>,
    #[serde(default)]
    pub secondary_label_limit: Option<usize>,
    /// Column name to display name, used for secondary labels without an alias.
    #[serde(default)]
    pub column_aliases: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryValue {
    pub label: String,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardViewModel {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: Value,
    pub sub_title: Option<Value>,
    pub description: Option<Value>,
    pub icon_value: Option<Value>,
    pub link: ResolvedLink,
    /// All configured secondary labels, in order.
    pub secondary_values: Vec<SecondaryValue>,
    pub secondary_label_limit: Option<usize>,
    /// Whether the card schema configured a secondary label block at all.
    pub has_secondary_labels: bool,
}

impl CardViewModel {
    /// The secondary values shown on the card, after the display limit.
    pub fn visible_secondary_values(&self) -> &[SecondaryValue] {
        let n = self
            .secondary_label_limit
            .map_or(self.secondary_values.len(), |limit| limit.min(self.secondary_values.len()));
        &self.secondary_values[..n]
    }

    pub fn hidden_secondary_count(&self) -> usize {
        self.secondary_values.len() - self.visible_secondary_values().len()
    }
}

pub struct CardProjector<'a> {
    card_schema: &'a CardSchema,
    options: &'a ProjectOptions,
}

impl<'a> CardProjector<'a> {
    pub fn new(card_schema: &'a CardSchema, options: &'a ProjectOptions) -> Self {
        Self {
            card_schema,
            options,
        }
    }

    pub fn project(&self, row: &Row, schema: &Schema) -> Result<CardViewModel, ConfigurationError> {
        let cs = self.card_schema;
        // fails before anything is read from the row
        let labels = cs.secondary_labels()?;

        let fields = FieldResolver::new(row, schema);

        let title = fields.required("title", &cs.title)?.clone();
        let sub_title = fields.optional("subTitle", cs.sub_title.as_deref()).cloned();
        let description = fields.optional("description", cs.description.as_deref()).cloned();
        let icon_value = fields.optional("icon", cs.icon.as_deref()).cloned();

        let link_value = fields
            .optional("link", cs.link.as_deref())
            .map(Value::as_text)
            .unwrap_or_default();
        let link = link::classify(&link_value, self.options.internal_link.as_ref(), Some(&fields))?;

        let secondary_values = labels
            .into_iter()
            .map(|label| SecondaryValue {
                label: self.display_label(label),
                value: fields.optional("secondaryLabels", Some(label.key.as_str())).cloned(),
            })
            .collect();

        Ok(CardViewModel {
            card_type: cs.card_type.clone(),
            title,
            sub_title,
            description,
            icon_value,
            link,
            secondary_values,
            secondary_label_limit: self.options.secondary_label_limit,
            has_secondary_labels: cs.has_secondary_labels(),
        })
    }

    fn display_label(&self, label: &KeyToAlias) -> String {
        label
            .alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .or_else(|| self.options.column_aliases.get(&label.key).map(String::as_str))
            .unwrap_or(label.key.as_str())
            .to_string()
    }
}

/// Project with a one-off projector.
pub fn project(
    row: &Row,
    schema: &Schema,
    card_schema: &CardSchema,
    options: &ProjectOptions,
) -> Result<CardViewModel, ConfigurationError> {
    CardProjector::new(card_schema, options).project(row, schema)
}
