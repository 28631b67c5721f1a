//! Subcontractor list: filtering, counter and checkbox synchronisation.
//!
//! Each subcontractor has two checkboxes. The *display* checkbox sits in
//! the (filterable) list row and is what the user clicks. The *submission*
//! checkbox is what the email form posts. Display changes are mirrored
//! into the submission group by value, never the other way round.

pub mod predicate;

use crate::model::subcontractor::SubcontractorRow;

pub use self::predicate::FilterState;

/// A checkbox identified by its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub value: String,
    pub checked: bool,
}

/// The checkboxes read by the backend when the form is posted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionGroup {
    boxes: Vec<Checkbox>,
}

impl SubmissionGroup {
    /// One unchecked box per value.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            boxes: values
                .into_iter()
                .map(|v| Checkbox {
                    value: v.into(),
                    checked: false,
                })
                .collect(),
        }
    }

    /// Set the box with `value`. Returns `false` if there is none.
    pub fn set(&mut self, value: &str, checked: bool) -> bool {
        match self.boxes.iter_mut().find(|b| b.value == value) {
            Some(b) => {
                b.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn is_checked(&self, value: &str) -> bool {
        self.boxes.iter().any(|b| b.value == value && b.checked)
    }

    pub fn checked_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.checked).count()
    }

    pub fn checked_values(&self) -> Vec<&str> {
        self.boxes
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.value.as_str())
            .collect()
    }

    pub fn boxes(&self) -> &[Checkbox] {
        &self.boxes
    }
}

/// A list row with its derived visibility and display checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub subcontractor: SubcontractorRow,
    pub visible: bool,
    pub display_checked: bool,
}

/// The filterable subcontractor list of the email form.
#[derive(Debug, Clone)]
pub struct SubcontractorList {
    rows: Vec<ListRow>,
    submission: SubmissionGroup,
    filter: FilterState,
    /// Row count captured at setup; the counter's denominator.
    total: usize,
}

impl SubcontractorList {
    /// Build the list with a matching, all-unchecked submission group.
    pub fn new(rows: Vec<SubcontractorRow>) -> Self {
        let submission = SubmissionGroup::from_values(rows.iter().map(|r| r.id.clone()));
        Self::with_submission(rows, submission)
    }

    /// Build the list over an existing submission group (e.g. a form
    /// re-rendered with some boxes already checked).
    ///
    /// Display boxes always start unchecked. Submission state never flows
    /// back into the display.
    pub fn with_submission(rows: Vec<SubcontractorRow>, submission: SubmissionGroup) -> Self {
        let total = rows.len();
        let rows = rows
            .into_iter()
            .map(|subcontractor| ListRow {
                subcontractor,
                visible: true,
                display_checked: false,
            })
            .collect();
        Self {
            rows,
            submission,
            filter: FilterState::default(),
            total,
        }
    }

    // ── Filtering ──────────────────────────────────────────────────

    /// Replace both filter inputs and recompute visibility.
    pub fn apply_filter(&mut self, filter: FilterState) -> usize {
        self.filter = filter;
        self.recompute()
    }

    /// Change the trade input.
    pub fn set_trade(&mut self, trade: impl Into<String>) -> usize {
        self.filter.trade = trade.into();
        self.recompute()
    }

    /// Change the search input.
    pub fn set_search(&mut self, search: impl Into<String>) -> usize {
        self.filter.search = search.into();
        self.recompute()
    }

    /// Empty both inputs, revealing every row.
    pub fn clear_filters(&mut self) -> usize {
        self.apply_filter(FilterState::default())
    }

    fn recompute(&mut self) -> usize {
        for row in &mut self.rows {
            row.visible = self.filter.matches(&row.subcontractor);
        }
        let visible = self.visible_count();
        tracing::debug!(
            trade = %self.filter.trade,
            search = %self.filter.search,
            visible,
            total = self.total,
            "Filter applied"
        );
        visible
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// "Showing X of Y".
    pub fn counter_text(&self) -> String {
        crate::i18n::showing_count(self.visible_count(), self.total)
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ListRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Handle a change of the display checkbox with `value`.
    ///
    /// Every display box carrying `value` takes the new state, and the
    /// submission box with the same value follows. Returns `false` if no
    /// row carries `value`.
    pub fn set_display_checked(&mut self, value: &str, checked: bool) -> bool {
        let mut found = false;
        for row in self.rows.iter_mut().filter(|r| r.subcontractor.id == value) {
            row.display_checked = checked;
            found = true;
        }
        if !found {
            tracing::debug!(value, "No display checkbox with this value");
            return false;
        }
        if !self.submission.set(value, checked) {
            tracing::warn!(value, "Display checkbox has no submission counterpart");
        }
        true
    }

    /// Check every visible row; hidden rows are left alone.
    ///
    /// Returns the number of rows checked.
    pub fn select_all_visible(&mut self) -> usize {
        let mut checked = 0;
        for row in self.rows.iter_mut().filter(|r| r.visible) {
            row.display_checked = true;
            self.submission.set(&row.subcontractor.id, true);
            checked += 1;
        }
        tracing::debug!(checked, "Selected all visible subcontractors");
        checked
    }

    /// Push every display state into the submission group.
    pub fn sync_submission(&mut self) {
        for row in &self.rows {
            self.submission
                .set(&row.subcontractor.id, row.display_checked);
        }
    }

    pub fn submission(&self) -> &SubmissionGroup {
        &self.submission
    }

    pub fn is_display_checked(&self, value: &str) -> bool {
        self.rows
            .iter()
            .any(|r| r.subcontractor.id == value && r.display_checked)
    }
}
