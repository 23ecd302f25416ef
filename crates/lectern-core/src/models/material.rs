use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The kind of course material a document represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Document,
    Slides,
    Transcript,
    Notes,
    Assignment,
    Other,
}

/// One unit of course content: a document, slide deck, lecture
/// transcript, note set, or assignment. Immutable once handed to the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Material {
    /// Stable caller-assigned identifier, unique within a corpus.
    pub id: String,
    /// Human-readable title. May be empty.
    pub title: String,
    /// What kind of material this is.
    pub material_type: MaterialType,
    /// Full text content.
    pub content: String,
    /// When the material was uploaded, if known.
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Free-form metadata passed through untouched (course id, week, tags).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Material {
    /// Create a material with no upload timestamp and null metadata.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        material_type: MaterialType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            material_type,
            content: content.into(),
            uploaded_at: None,
            metadata: serde_json::Value::Null,
        }
    }
}

/// Identity equality: two materials are equal if they share an id,
/// whatever their content.
impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
