//! Trigger button state during an in-flight request.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ButtonState {
    label: String,
    enabled: bool,
}

/// A labelled button that can be disabled while its request runs.
///
/// Clones are handles to the same button, so whoever renders it sees the
/// busy state while the request is still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    state: Rc<RefCell<ButtonState>>,
}

impl ActionButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ButtonState {
                label: label.into(),
                enabled: true,
            })),
        }
    }

    pub fn label(&self) -> String {
        self.state.borrow().label.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// Disable the button and show `busy_label` until the guard drops.
    pub fn begin(&self, busy_label: &str) -> BusyButton<'_> {
        let mut state = self.state.borrow_mut();
        let original = std::mem::replace(&mut state.label, busy_label.to_string());
        state.enabled = false;
        BusyButton {
            button: self,
            original: Some(original),
        }
    }
}

/// Restores the button's label and enabled state on drop, whatever the
/// request's outcome.
#[derive(Debug)]
pub struct BusyButton<'a> {
    button: &'a ActionButton,
    original: Option<String>,
}

impl BusyButton<'_> {
    pub fn button(&self) -> &ActionButton {
        self.button
    }
}

impl Drop for BusyButton<'_> {
    fn drop(&mut self) {
        let mut state = self.button.state.borrow_mut();
        if let Some(label) = self.original.take() {
            state.label = label;
        }
        state.enabled = true;
    }
}
