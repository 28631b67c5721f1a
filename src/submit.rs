//! Email form submission gate.
//!
//! Intercepts the submit of the email-sending form. Under
//! [`SubmitPolicy::Confirm`] the user confirms a message naming the
//! operation and recipient count, the busy overlay goes up, and the form
//! is submitted after a short delay. Under [`SubmitPolicy::Direct`] the
//! form is synchronised and submitted without a prompt. Both refuse to
//! submit with no subcontractor selected.

use std::time::Duration;

use crate::config::{SubmitConfig, SubmitPolicy};
use crate::error::{FormError, Result};
use crate::filter::SubcontractorList;
use crate::page::{BusyOverlay, Page};

/// Which send operation the page performs, derived from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOperation {
    Invitation,
    Addendum,
    Reminders,
    Generic,
}

impl SendOperation {
    pub fn from_url(url: &str) -> Self {
        if url.contains("send-invitation") {
            Self::Invitation
        } else if url.contains("send-addendum") {
            Self::Addendum
        } else if url.contains("send-reminders") {
            Self::Reminders
        } else {
            Self::Generic
        }
    }

    /// Confirmation prompt for `count` recipients.
    pub fn confirmation(self, count: usize) -> String {
        match self {
            Self::Invitation => crate::i18n::confirm_send_invitation(count),
            Self::Addendum => crate::i18n::confirm_send_addendum(count),
            Self::Reminders => crate::i18n::confirm_send_reminders(count),
            Self::Generic => crate::i18n::confirm_send_generic(count),
        }
    }
}

/// The rich-text editor bound to the message field.
pub trait EditorHandle {
    /// Current editor content (HTML).
    fn content(&self) -> String;
}

impl EditorHandle for String {
    fn content(&self) -> String {
        self.clone()
    }
}

/// The email form as posted to the backend.
#[derive(Debug, Clone)]
pub struct EmailForm {
    /// Form `action`, e.g. `/tenders/project/12/send-invitation/`.
    pub action: String,
    /// URL of the page hosting the form.
    pub page_url: String,
    pub subject: String,
    pub message: String,
    /// Optional override of the project's SharePoint link.
    pub sharepoint_link: String,
    pub subcontractors: SubcontractorList,
}

impl EmailForm {
    pub fn new(action: impl Into<String>, page_url: impl Into<String>, subcontractors: SubcontractorList) -> Self {
        Self {
            action: action.into(),
            page_url: page_url.into(),
            subject: String::new(),
            message: String::new(),
            sharepoint_link: String::new(),
            subcontractors,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.subcontractors.submission().checked_count()
    }

    /// Form-encoded fields, one `subcontractors` entry per checked box.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("subject".to_string(), self.subject.clone()),
            ("message".to_string(), self.message.clone()),
        ];
        if !self.sharepoint_link.trim().is_empty() {
            fields.push(("sharepoint_link".to_string(), self.sharepoint_link.clone()));
        }
        fields.extend(
            self.subcontractors
                .submission()
                .checked_values()
                .into_iter()
                .map(|v| ("subcontractors".to_string(), v.to_string())),
        );
        fields
    }
}

/// Performs the real form submission.
pub trait FormSubmitter {
    fn submit(&mut self, form: &EmailForm) -> Result<()>;
}

/// What happened to a submit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No subcontractor selected; nothing sent.
    Blocked,
    /// The user declined the confirmation.
    Cancelled,
    /// The form was handed to the submitter.
    Submitted,
}

/// Submit handler bound to one email form.
pub struct SubmitGate {
    policy: SubmitPolicy,
    overlay_delay: Duration,
    editor: Option<Box<dyn EditorHandle>>,
}

impl SubmitGate {
    pub fn new(config: &SubmitConfig) -> Self {
        Self {
            policy: config.policy,
            overlay_delay: config.overlay_delay(),
            editor: None,
        }
    }

    /// Bind the editor whose content becomes the form's message.
    pub fn with_editor(mut self, editor: Box<dyn EditorHandle>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    /// Handle a submit event on `form`.
    pub fn on_submit(
        &self,
        form: &mut EmailForm,
        page: &mut dyn Page,
        submitter: &mut dyn FormSubmitter,
    ) -> Result<SubmitOutcome> {
        if self.policy == SubmitPolicy::Direct {
            form.subcontractors.sync_submission();
        }

        let count = form.selected_count();
        if count == 0 {
            let err = FormError::NoSelection;
            tracing::warn!(action = %form.action, error = %err, "Email form submit blocked");
            if let Some(text) = err.alert_text() {
                page.alert(text);
            }
            return Ok(SubmitOutcome::Blocked);
        }

        if self.policy == SubmitPolicy::Confirm {
            let operation = SendOperation::from_url(&form.page_url);
            if !page.confirm(&operation.confirmation(count)) {
                tracing::info!(?operation, count, "Email send declined");
                return Ok(SubmitOutcome::Cancelled);
            }
            page.show_overlay(&BusyOverlay::sending_emails());
            if !self.overlay_delay.is_zero() {
                std::thread::sleep(self.overlay_delay);
            }
        }

        self.sync_editor(form);
        if let Err(e) = submitter.submit(form) {
            tracing::error!(action = %form.action, error = %e, "Email form submission failed");
            return Err(e);
        }
        tracing::info!(action = %form.action, count, policy = ?self.policy, "Email form submitted");
        Ok(SubmitOutcome::Submitted)
    }

    fn sync_editor(&self, form: &mut EmailForm) {
        if let Some(ref editor) = self.editor {
            form.message = editor.content();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::subcontractor::SubcontractorRow;
    use crate::page::HeadlessPage;

    #[derive(Default)]
    struct Capture {
        submitted: Vec<Vec<(String, String)>>,
    }

    impl FormSubmitter for Capture {
        fn submit(&mut self, form: &EmailForm) -> Result<()> {
            self.submitted.push(form.fields());
            Ok(())
        }
    }

    fn form(url: &str) -> EmailForm {
        let list = SubcontractorList::new(vec![
            SubcontractorRow::new("1", "ElectriCo", "Electrical", ""),
            SubcontractorRow::new("2", "Acme", "Plumbing", ""),
        ]);
        EmailForm::new(url, url, list)
    }

    fn gate(policy: SubmitPolicy) -> SubmitGate {
        SubmitGate::new(&SubmitConfig {
            policy,
            overlay_delay_ms: 0,
        })
    }

    #[test]
    fn test_operation_from_url() {
        assert_eq!(
            SendOperation::from_url("/tenders/project/1/send-invitation/"),
            SendOperation::Invitation
        );
        assert_eq!(
            SendOperation::from_url("/tenders/project/1/send-addendum/"),
            SendOperation::Addendum
        );
        assert_eq!(
            SendOperation::from_url("/tenders/project/1/send-reminders/"),
            SendOperation::Reminders
        );
        assert_eq!(SendOperation::from_url("/tenders/"), SendOperation::Generic);
    }

    #[test]
    fn test_confirm_policy_prompts_with_count_and_shows_overlay() {
        let mut form = form("/tenders/project/1/send-addendum/");
        form.subcontractors.set_display_checked("1", true);
        form.subcontractors.set_display_checked("2", true);
        let mut page = HeadlessPage::new(true);
        let mut sink = Capture::default();

        let outcome = gate(SubmitPolicy::Confirm)
            .on_submit(&mut form, &mut page, &mut sink)
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(page.confirmations.len(), 1);
        assert!(page.confirmations[0].contains("addendum"));
        assert!(page.confirmations[0].contains('2'));
        assert!(page.overlay.is_some());
        assert_eq!(sink.submitted.len(), 1);
    }

    #[test]
    fn test_declined_confirmation_sends_nothing() {
        let mut form = form("/tenders/project/1/send-invitation/");
        form.subcontractors.set_display_checked("1", true);
        let mut page = HeadlessPage::new(false);
        let mut sink = Capture::default();

        let outcome = gate(SubmitPolicy::Confirm)
            .on_submit(&mut form, &mut page, &mut sink)
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert!(page.overlay.is_none());
        assert!(sink.submitted.is_empty());
    }

    #[test]
    fn test_direct_policy_skips_prompt_and_syncs_editor() {
        let mut form = form("/tenders/project/1/send-invitation/");
        form.subcontractors.set_display_checked("2", true);
        let mut page = HeadlessPage::new(false);
        let mut sink = Capture::default();

        let outcome = gate(SubmitPolicy::Direct)
            .with_editor(Box::new("<p>Hello</p>".to_string()))
            .on_submit(&mut form, &mut page, &mut sink)
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(page.confirmations.is_empty());
        assert!(page.overlay.is_none());
        assert_eq!(form.message, "<p>Hello</p>");
        assert!(sink.submitted[0].contains(&("subcontractors".to_string(), "2".to_string())));
    }

    #[test]
    fn test_fields_skip_empty_sharepoint_link() {
        let mut form = form("/x/");
        form.subject = "Tender Invitation".into();
        let names: Vec<String> = form.fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["subject", "message"]);

        form.sharepoint_link = "https://sp.example.com/docs".into();
        assert!(form
            .fields()
            .iter()
            .any(|(k, _)| k == "sharepoint_link"));
    }
}
