use serde::{Deserialize, Serialize};

/// A value uploaded by `put`: either a literal piece of text or a decoded
/// row/column structure. Raw file bytes are never sent as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Text { value: String },
    Table(TabularData),
}

impl Payload {
    pub fn text(value: impl Into<String>) -> Self {
        Payload::Text {
            value: value.into(),
        }
    }
}

/// Decoded tabular data: a header row plus the data rows, all as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
