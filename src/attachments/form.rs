//! Inputs of the document upload form and their validation.

use crate::backend::UploadRequest;
use crate::error::{FormError, Result};
use crate::model::attachment::SelectedFile;
use crate::project::ProjectId;

/// Values currently entered in the upload form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    /// Selected type value (e.g. `"DRAWING"`); empty = nothing selected.
    pub document_type: String,
    pub title: String,
    pub description: String,
    pub file: Option<SelectedFile>,
    /// SharePoint link, used instead of or alongside a file.
    pub link: String,
}

impl UploadForm {
    /// Check the inputs in the order the user is told about them.
    ///
    /// Type and title come first, then the file/link requirement.
    pub fn validate(&self) -> Result<()> {
        if self.document_type.trim().is_empty() || self.title.trim().is_empty() {
            return Err(FormError::MissingFields);
        }
        if self.file.is_none() && self.link.trim().is_empty() {
            return Err(FormError::MissingFileOrLink);
        }
        Ok(())
    }

    /// Build the request for `project_id`. Call after [`validate`](Self::validate).
    pub fn to_request(&self, project_id: ProjectId) -> UploadRequest {
        UploadRequest {
            document_type: self.document_type.trim().to_string(),
            title: self.title.trim().to_string(),
            project_id,
            description: non_empty(&self.description),
            file: self.file.clone(),
            link: non_empty(&self.link),
        }
    }

    /// Clear every input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
