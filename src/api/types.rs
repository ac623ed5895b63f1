use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `?type=statute,precedent`
#[derive(Debug, Default, Deserialize)]
pub struct DocumentFilter {
    #[serde(rename = "type")]
    pub document_type: Option<String>,
}

/// `?types=defense_generated,fine_uploaded&limit=20`
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub types: Option<String>,
    pub limit: Option<u64>,
}

/// Splits a comma separated query value, dropping blanks.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
