use serde::{Deserialize, Serialize};

/// A news article as returned by the QuickByte backend.
///
/// Field names map to the backend's camelCase JSON. Articles are immutable
/// once fetched; the controller replaces the whole displayed list on every
/// fetch and never merges result sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable identifier, unique within a result set.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// External link to the full article.
    pub url: String,
    #[serde(default)]
    pub source_name: Option<String>,
    /// Publication timestamp as the backend stores it (RFC 3339 text).
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Full article body stored by the backend; carried but not used here.
    #[serde(default)]
    pub content: Option<String>,
}
