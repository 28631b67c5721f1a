//! Centralized error types for tenderdesk.

use std::path::PathBuf;
use thiserror::Error;

use crate::i18n;

/// All errors produced by the tenderdesk library.
#[derive(Error, Debug)]
pub enum FormError {
    /// Document type or title was left empty.
    #[error("Document type and title are required")]
    MissingFields,

    /// Neither a file nor a link was supplied for an upload.
    #[error("Either a file or a link is required")]
    MissingFileOrLink,

    /// No project identifier could be resolved from the page.
    #[error("Could not determine the project for this page")]
    ProjectNotFound,

    /// The anti-forgery cookie is absent.
    #[error("Security token '{0}' not found in cookies")]
    MissingCsrfToken(String),

    /// The email form was submitted with no subcontractor selected.
    #[error("No subcontractors selected")]
    NoSelection,

    /// The backend answered with a non-success HTTP status.
    #[error("Server returned HTTP {status}{}", reason_suffix(.reason))]
    HttpStatus { status: u16, reason: Option<String> },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A subcontractor row file could not be decoded.
    #[error("Invalid subcontractor rows: {0}")]
    InvalidRows(#[from] serde_json::Error),

    /// A configured or supplied URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

/// Convenience alias for `Result<T, FormError>`.
pub type Result<T> = std::result::Result<T, FormError>;

impl FormError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Blocking alert text for failures caught before any request was sent.
    ///
    /// `None` for everything else, which is reported through a dismissible
    /// notice instead.
    pub fn alert_text(&self) -> Option<&'static str> {
        match self {
            Self::MissingFields => Some(i18n::alert_missing_fields()),
            Self::MissingFileOrLink => Some(i18n::alert_missing_file_or_link()),
            Self::ProjectNotFound => Some(i18n::alert_project_not_found()),
            Self::MissingCsrfToken(_) => Some(i18n::alert_missing_token()),
            Self::NoSelection => Some(i18n::alert_no_selection()),
            _ => None,
        }
    }

    /// Text shown to the user in an error notice.
    ///
    /// Prefers the backend's own reason, falling back to the HTTP status.
    pub fn user_reason(&self) -> String {
        match self {
            Self::HttpStatus {
                reason: Some(reason),
                ..
            } => reason.clone(),
            Self::HttpStatus { status, .. } => format!("HTTP {status}"),
            Self::Rejected(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}
