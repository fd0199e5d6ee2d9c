//! A self-contained card request: the row, how to read it, and how to show it.

use crate::card::{CardProjector, CardViewModel, ProjectOptions};
use crate::card_schema::{CardSchema, ConfigurationError};
use crate::html::{HtmlRenderer, RenderOptions};
use crate::value::{Row, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub row: Row,
    pub schema: Schema,
    pub card_schema: CardSchema,
    #[serde(default)]
    pub options: ProjectOptions,
    #[serde(default)]
    pub render: RenderOptions,
}

impl CardRequest {
    pub fn from_json(input: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn project(&self) -> Result<CardViewModel, RequestError> {
        let card = CardProjector::new(&self.card_schema, &self.options).project(&self.row, &self.schema)?;
        Ok(card)
    }

    pub fn render(&self, renderer: &HtmlRenderer) -> Result<String, RequestError> {
        let card = self.project()?;
        Ok(renderer.render(&card, &self.render))
    }
}
