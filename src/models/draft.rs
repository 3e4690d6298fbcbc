use serde::{Deserialize, Serialize};

use super::course::Level;

/// Partially filled create-form values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraftFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CourseDraftFields {
    /// True when any text field holds something besides whitespace.
    /// `level` always has a form default, so it does not count.
    pub fn has_content(&self) -> bool {
        [&self.title, &self.description, &self.instructor, &self.image]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub data: CourseDraftFields,
    /// Epoch milliseconds when the draft was written.
    pub timestamp: i64,
}
