use crate::domain::fields;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a card, unique across the whole board
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    pub(crate) const PREFIX: &'static str = "c";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the trimmed input, or `None` when nothing is left
pub(crate) fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A single work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "fields::lenient_id")]
    pub id: CardId,
    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub title: String,
    #[serde(rename = "desc", default, deserialize_with = "fields::lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub tag: String,
}

impl Card {
    pub const FALLBACK_TITLE: &'static str = "Untitled";

    /// Creates a card with an empty description and tag
    pub fn new(id: CardId, title: &str) -> Self {
        Self {
            id,
            title: non_blank(title).unwrap_or_else(|| Self::FALLBACK_TITLE.to_string()),
            description: String::new(),
            tag: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Merges the fields present in `patch`. A blank title is ignored.
    pub fn apply(&mut self, patch: &CardPatch) {
        if let Some(title) = patch.title.as_deref().and_then(non_blank) {
            self.title = title;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(tag) = &patch.tag {
            self.tag = tag.clone();
        }
    }
}

/// Partial update of a card; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl CardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tag.is_none()
    }
}
