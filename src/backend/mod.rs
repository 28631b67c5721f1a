//! HTTP contract with the tender backend.
//!
//! The flows only see [`DocumentBackend`]; [`http::HttpBackend`] is the
//! `reqwest` implementation used by the CLI.

pub mod http;

use serde::Deserialize;

use crate::csrf::CsrfToken;
use crate::error::Result;
use crate::model::attachment::{DocumentId, SelectedFile};
use crate::project::ProjectId;

/// Payload of `POST /tenders/upload-document/`.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub document_type: String,
    pub title: String,
    pub project_id: ProjectId,
    pub description: Option<String>,
    pub file: Option<SelectedFile>,
    /// Sent as `sharepoint_link`.
    pub link: Option<String>,
}

/// Body returned by the upload endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body returned by the removal endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Document operations offered by the backend.
///
/// Implementations return `Ok` for any 2xx answer (the caller inspects the
/// `success` flag) and `Err` for non-OK statuses and transport failures.
pub trait DocumentBackend {
    fn upload_document(&self, request: &UploadRequest, token: &CsrfToken) -> Result<UploadResponse>;

    fn remove_document(&self, id: DocumentId, token: &CsrfToken) -> Result<RemoveResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_tolerates_missing_fields() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"success": true, "document_id": 42, "document_type": "Drawing"}"#)
                .unwrap();
        assert!(ok.success);
        assert_eq!(ok.document_id, Some(DocumentId(42)));
        assert_eq!(ok.error, None);

        let failed: UploadResponse = serde_json::from_str(r#"{"error": "bad file"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("bad file"));
    }
}
