use shared::domain::LessonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog service returned HTTP {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },
}

impl CatalogError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::InvalidBaseUrl { .. } => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("no cart entry at position {index} (cart holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("lesson {0} is not in the catalog")]
    UnknownLesson(LessonId),
}
