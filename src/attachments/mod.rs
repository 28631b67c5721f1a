//! Document attachments: background upload and removal.

pub mod button;
pub mod form;
pub mod list;

use crate::backend::{DocumentBackend, UploadRequest};
use crate::config::Config;
use crate::csrf::{self, CsrfToken};
use crate::error::{FormError, Result};
use crate::i18n;
use crate::model::attachment::{AttachmentRow, DocumentId, DocumentType};
use crate::page::{Notice, Page};
use crate::project::{self, PageContext};

use self::button::ActionButton;
use self::form::UploadForm;
use self::list::AttachmentList;

/// Result of a remove click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The backend removed the document and the row is gone.
    Removed,
    /// The user declined the confirmation.
    Cancelled,
    /// No row with that id, or its control is already busy.
    Ignored,
}

/// Upload form, its button and the list of uploaded documents.
#[derive(Debug)]
pub struct AttachmentManager {
    pub form: UploadForm,
    pub button: ActionButton,
    pub list: AttachmentList,
    csrf_cookie: String,
    notice_lifetime: chrono::Duration,
}

impl AttachmentManager {
    pub fn new(config: &Config) -> Self {
        Self {
            form: UploadForm::default(),
            button: ActionButton::new(i18n::button_upload()),
            list: AttachmentList::default(),
            csrf_cookie: config.backend.csrf_cookie.clone(),
            notice_lifetime: config.notices.lifetime(),
        }
    }

    // ── Upload ─────────────────────────────────────────────────────

    /// Handle a click on the upload button.
    ///
    /// Local validation failures raise an alert and send nothing. Backend
    /// and network failures raise an error notice and add no row.
    pub fn upload(
        &mut self,
        ctx: &PageContext,
        cookies: &str,
        backend: &dyn DocumentBackend,
        page: &mut dyn Page,
    ) -> Result<DocumentId> {
        let (request, token) = match self.prepare_upload(ctx, cookies) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(error = %e, "Upload rejected before sending");
                page.alert(alert_for(&e, i18n::notice_upload_failed()));
                return Err(e);
            }
        };

        let response = {
            let _busy = self.button.begin(i18n::button_uploading());
            backend.upload_document(&request, &token)
        };

        let outcome = response.and_then(|body| {
            if !body.success {
                return Err(FormError::Rejected(
                    body.error
                        .unwrap_or_else(|| i18n::reason_upload_not_accepted().to_string()),
                ));
            }
            let id = body.document_id.ok_or_else(|| {
                FormError::Rejected(i18n::reason_missing_document_id().to_string())
            })?;
            let type_label = body
                .document_type
                .as_deref()
                .map(DocumentType::label_for)
                .unwrap_or_else(|| DocumentType::label_for(&request.document_type));
            Ok((id, type_label))
        });

        match outcome {
            Ok((id, type_label)) => {
                tracing::info!(
                    document_id = %id,
                    project_id = %request.project_id,
                    title = %request.title,
                    "Document uploaded"
                );
                self.list
                    .push(AttachmentRow::new(id, request.title.clone(), type_label));
                self.form.reset();
                page.notify(Notice::success(i18n::notice_uploaded()).with_lifetime(self.notice_lifetime));
                Ok(id)
            }
            Err(e) => {
                tracing::error!(title = %request.title, error = %e, "Document upload failed");
                page.notify(
                    Notice::error(format!("{}: {}", i18n::notice_upload_failed(), e.user_reason()))
                        .with_lifetime(self.notice_lifetime),
                );
                Err(e)
            }
        }
    }

    fn prepare_upload(&self, ctx: &PageContext, cookies: &str) -> Result<(UploadRequest, CsrfToken)> {
        self.form.validate()?;
        let project_id = project::resolve_project_id(ctx).ok_or(FormError::ProjectNotFound)?;
        let token = csrf::token_from_cookies(cookies, &self.csrf_cookie)?;
        Ok((self.form.to_request(project_id), token))
    }

    // ── Removal ────────────────────────────────────────────────────

    /// Handle a click on the remove control of row `id`.
    ///
    /// A failed removal leaves the row in place and re-enables its control.
    pub fn remove(
        &mut self,
        id: DocumentId,
        cookies: &str,
        backend: &dyn DocumentBackend,
        page: &mut dyn Page,
    ) -> Result<RemovalOutcome> {
        match self.list.get(id) {
            Some(row) if row.remove.is_enabled() => {}
            Some(_) => {
                tracing::debug!(document_id = %id, "Remove already in progress");
                return Ok(RemovalOutcome::Ignored);
            }
            None => {
                tracing::debug!(document_id = %id, "Remove click for unknown row");
                return Ok(RemovalOutcome::Ignored);
            }
        }

        if !page.confirm(i18n::confirm_remove_document()) {
            return Ok(RemovalOutcome::Cancelled);
        }

        let token = match csrf::token_from_cookies(cookies, &self.csrf_cookie) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(document_id = %id, error = %e, "Removal rejected before sending");
                page.alert(alert_for(&e, i18n::notice_remove_failed()));
                return Err(e);
            }
        };

        self.list.mark_removing(id);
        let outcome = backend.remove_document(id, &token).and_then(|body| {
            if body.success {
                Ok(())
            } else {
                Err(FormError::Rejected(
                    body.error
                        .unwrap_or_else(|| i18n::reason_remove_not_accepted().to_string()),
                ))
            }
        });

        match outcome {
            Ok(()) => {
                self.list.remove(id);
                tracing::info!(document_id = %id, "Document removed");
                page.notify(Notice::success(i18n::notice_removed()).with_lifetime(self.notice_lifetime));
                Ok(RemovalOutcome::Removed)
            }
            Err(e) => {
                self.list.restore_control(id);
                tracing::error!(document_id = %id, error = %e, "Document removal failed");
                page.notify(
                    Notice::error(format!("{}: {}", i18n::notice_remove_failed(), e.user_reason()))
                        .with_lifetime(self.notice_lifetime),
                );
                Err(e)
            }
        }
    }
}

/// Alert text for a failure caught before sending.
fn alert_for(err: &FormError, fallback: &'static str) -> &'static str {
    err.alert_text().unwrap_or(fallback)
}
