//! The page surface the form flows talk to.
//!
//! Every flow reports to the user through [`Page`]: blocking alerts for
//! local validation failures, yes/no confirmations, dismissible notices
//! and the full-viewport busy overlay. The CLI renders these in a
//! terminal; [`HeadlessPage`] answers from a preset and records them.

pub mod notice;

pub use notice::{Notice, NoticeBoard, NoticeKind};

/// Full-viewport overlay shown while the email form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyOverlay {
    /// Text shown under the spinner.
    pub label: String,
}

impl BusyOverlay {
    pub fn sending_emails() -> Self {
        Self {
            label: crate::i18n::overlay_sending().to_string(),
        }
    }
}

/// User-facing surface of a form page.
pub trait Page {
    /// Show a blocking message.
    fn alert(&mut self, message: &str);

    /// Ask a blocking yes/no question. Returns `true` for "yes".
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a dismissible notice.
    fn notify(&mut self, notice: Notice);

    /// Cover the page with the busy overlay.
    fn show_overlay(&mut self, overlay: &BusyOverlay);
}

/// A page without a user: confirmations are answered from a preset and
/// everything shown is kept for inspection.
#[derive(Debug)]
pub struct HeadlessPage {
    /// Answer given to every confirmation.
    pub confirm_answer: bool,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
    pub notices: NoticeBoard,
    pub overlay: Option<BusyOverlay>,
}

impl HeadlessPage {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            alerts: Vec::new(),
            confirmations: Vec::new(),
            notices: NoticeBoard::default(),
            overlay: None,
        }
    }
}

impl Page for HeadlessPage {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn show_overlay(&mut self, overlay: &BusyOverlay) {
        self.overlay = Some(overlay.clone());
    }
}
