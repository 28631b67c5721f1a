//! The list of uploaded documents under the upload form.

use crate::model::attachment::{AttachmentRow, DocumentId};

/// Uploaded documents in the order they were added.
///
/// Remove clicks are dispatched by document id rather than by inspecting
/// the clicked element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentList {
    rows: Vec<AttachmentRow>,
}

impl AttachmentList {
    pub fn push(&mut self, row: AttachmentRow) {
        self.rows.push(row);
    }

    pub fn get(&self, id: DocumentId) -> Option<&AttachmentRow> {
        self.rows.iter().find(|r| r.document_id == id)
    }

    /// Remove a row, returning it.
    pub fn remove(&mut self, id: DocumentId) -> Option<AttachmentRow> {
        let pos = self.rows.iter().position(|r| r.document_id == id)?;
        Some(self.rows.remove(pos))
    }

    /// Disable the row's remove control and show the spinner.
    pub(crate) fn mark_removing(&self, id: DocumentId) {
        if let Some(row) = self.get(id) {
            row.remove.set_busy();
        }
    }

    /// Put the row's remove control back to enabled with its trash icon.
    pub(crate) fn restore_control(&self, id: DocumentId) {
        if let Some(row) = self.get(id) {
            row.remove.restore();
        }
    }

    pub fn rows(&self) -> &[AttachmentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
