//! Tender document metadata and the client-side attachment row.

use std::cell::Cell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::error::{FormError, Result};

/// Backend-assigned identifier of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document type choices accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Tender,
    Drawing,
    Specification,
    Contract,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        Self::Tender,
        Self::Drawing,
        Self::Specification,
        Self::Contract,
        Self::Other,
    ];

    /// Form value sent to the backend.
    pub fn code(self) -> &'static str {
        match self {
            Self::Tender => "TENDER",
            Self::Drawing => "DRAWING",
            Self::Specification => "SPECIFICATION",
            Self::Contract => "CONTRACT",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tender => "Tender Document",
            Self::Drawing => "Drawing",
            Self::Specification => "Specification",
            Self::Contract => "Contract Document",
            Self::Other => "Other",
        }
    }

    /// Look up a type by its form value (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Resolve the label to display for a raw type value.
    ///
    /// Known codes map to their label; anything else (usually a label the
    /// backend already resolved) is returned as-is.
    pub fn label_for(raw: &str) -> String {
        match Self::from_code(raw) {
            Some(t) => t.label().to_string(),
            None => raw.trim().to_string(),
        }
    }
}

/// A file chosen for upload, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// Raw contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| FormError::io(path, e))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        Ok(Self { file_name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Icon shown on a row's remove control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIcon {
    Trash,
    Spinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ControlState {
    enabled: bool,
    icon: ControlIcon,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            enabled: true,
            icon: ControlIcon::Trash,
        }
    }
}

/// The per-row remove button. Clones are handles to the same control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveControl {
    state: Rc<Cell<ControlState>>,
}

impl RemoveControl {
    pub fn is_enabled(&self) -> bool {
        self.state.get().enabled
    }

    pub fn icon(&self) -> ControlIcon {
        self.state.get().icon
    }

    /// Disable the control and show the spinner.
    pub(crate) fn set_busy(&self) {
        self.state.set(ControlState {
            enabled: false,
            icon: ControlIcon::Spinner,
        });
    }

    /// Back to enabled with the trash icon.
    pub(crate) fn restore(&self) {
        self.state.set(ControlState::default());
    }
}

/// One uploaded document as listed under the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRow {
    pub document_id: DocumentId,
    pub title: String,
    pub type_label: String,
    pub remove: RemoveControl,
}

impl AttachmentRow {
    pub fn new(document_id: DocumentId, title: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            document_id,
            title: title.into(),
            type_label: type_label.into(),
            remove: RemoveControl::default(),
        }
    }
}
