//! Classify a raw link cell and turn it into an href plus open target.

use crate::card_schema::{ConfigurationError, InternalLinkConfig};
use crate::resolve::{FieldResolver, MissingColumn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const SYNAPSE_ENTITY_URL: &str = "https://www.synapse.org/#!Synapse:";
pub const DOI_RESOLVER_URL: &str = "https://dx.doi.org/";

// "syn" followed by digits, ending the string
static SYNAPSE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"syn\d+$").unwrap());

// https://www.crossref.org/blog/dois-and-matching-regular-expressions/
static DOI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^10\.\d{4,9}/[-._;()/:a-z0-9]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    #[serde(rename = "self")]
    SelfTab,
    Blank,
}

impl LinkTarget {
    /// Value for an anchor's `target` attribute.
    pub fn as_attr(&self) -> &'static str {
        match self {
            LinkTarget::SelfTab => "_self",
            LinkTarget::Blank => "_blank",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    SynapseId,
    Doi,
    External,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    pub display_url: String,
    pub target: LinkTarget,
}

impl ResolvedLink {
    pub fn is_empty(&self) -> bool {
        self.display_url.is_empty()
    }
}

/// First matching rule wins: identifier, DOI, external URL, internal link.
pub fn kind_of(value: &str, internal: Option<&InternalLinkConfig>) -> LinkKind {
    let lower = value.to_lowercase();
    if SYNAPSE_ID_RE.is_match(&lower) {
        LinkKind::SynapseId
    } else if DOI_RE.is_match(&lower) {
        LinkKind::Doi
    } else if internal.is_none() {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}

/// Resolve a raw link value.
///
/// Identifier and DOI links embed the lower-cased value; external URLs pass
/// through untouched. Internal links need `source` to read column values and
/// fail with [`ConfigurationError::InternalLinkWithoutRow`] without it.
pub fn classify(
    value: &str,
    internal: Option<&InternalLinkConfig>,
    source: Option<&FieldResolver<'_>>,
) -> Result<ResolvedLink, ConfigurationError> {
    let kind = kind_of(value, internal);
    debug!(value, ?kind, "classified link");

    let link = match kind {
        LinkKind::SynapseId => ResolvedLink {
            display_url: format!("{SYNAPSE_ENTITY_URL}{}", value.to_lowercase()),
            target: LinkTarget::SelfTab,
        },
        LinkKind::Doi => ResolvedLink {
            display_url: format!("{DOI_RESOLVER_URL}{}", value.to_lowercase()),
            target: LinkTarget::Blank,
        },
        LinkKind::External => ResolvedLink {
            display_url: value.to_string(),
            target: LinkTarget::Blank,
        },
        LinkKind::Internal => {
            let config = internal.ok_or(ConfigurationError::InternalLinkWithoutRow)?;
            let source = source.ok_or(ConfigurationError::InternalLinkWithoutRow)?;
            ResolvedLink {
                display_url: internal_url(config, source),
                target: LinkTarget::SelfTab,
            }
        }
    };
    Ok(link)
}

/// `#/{base}?a=1&b=2`. Columns missing from the schema are logged and
/// contribute an empty value.
fn internal_url(config: &InternalLinkConfig, source: &FieldResolver<'_>) -> String {
    let params: Vec<String> = config
        .column_values
        .iter()
        .map(|column| {
            let value = match source.resolve(Some(column.as_str())) {
                Ok(v) => v.map(|v| v.as_text()).unwrap_or_default(),
                Err(MissingColumn(column)) => {
                    warn!(%column, base = %config.base_url, "internal link column missing from schema");
                    String::new()
                }
            };
            format!("{column}={value}")
        })
        .collect();

    format!("#/{}?{}", config.base_url, params.join("&"))
}
