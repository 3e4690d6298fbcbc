use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPrefs {
    pub sidebar_open: bool,
}

impl Default for LayoutPrefs {
    fn default() -> Self {
        Self { sidebar_open: true }
    }
}
