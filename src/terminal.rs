//! Terminal rendering of the page surface for the CLI.

use std::io::{BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::attachments::list::AttachmentList;
use crate::filter::SubcontractorList;
use crate::i18n;
use crate::page::{BusyOverlay, Notice, NoticeKind, Page};

/// Page rendered on stderr, answering confirmations from stdin.
pub struct TerminalPage {
    /// Answer "yes" to every confirmation without asking.
    auto_confirm: bool,
    overlay: Option<ProgressBar>,
}

impl TerminalPage {
    pub fn new(auto_confirm: bool) -> Self {
        Self {
            auto_confirm,
            overlay: None,
        }
    }

    /// Take the overlay down, if it is up.
    pub fn hide_overlay(&mut self) {
        if let Some(pb) = self.overlay.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalPage {
    fn drop(&mut self) {
        self.hide_overlay();
    }
}

impl Page for TerminalPage {
    fn alert(&mut self, message: &str) {
        eprintln!("\n  ! {message}\n");
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.auto_confirm {
            eprintln!("{message} (yes)");
            return true;
        }
        eprint!("{message} {} ", i18n::cli_yes_no());
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn notify(&mut self, notice: Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        eprintln!("  [{tag}] {}", notice.message);
    }

    fn show_overlay(&mut self, overlay: &BusyOverlay) {
        self.hide_overlay();
        self.overlay = Some(spinner(&overlay.label));
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "s\u{ed}"
    )
}

/// Steady spinner with a label, used for in-flight requests.
pub fn spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the visible subcontractor rows with the counter line.
pub fn print_subcontractor_table(list: &SubcontractorList) {
    println!();
    println!("  {}", list.counter_text());
    println!();

    if list.visible_count() == 0 {
        return;
    }

    println!(
        "  {:<3} {:<8} {} {} {}",
        "",
        "ID",
        pad(i18n::cli_company(), 30),
        pad(i18n::cli_trade(), 20),
        i18n::cli_office()
    );
    println!("  {}", "-".repeat(84));

    for row in list.visible_rows() {
        let mark = if row.display_checked { "[x]" } else { "[ ]" };
        println!(
            "  {mark} {:<8} {} {} {}",
            row.subcontractor.id,
            pad(&row.subcontractor.company, 30),
            pad(&row.subcontractor.trade, 20),
            truncate_str(&row.subcontractor.office_location, 20)
        );
    }
    println!();
}

/// Print the uploaded documents.
pub fn print_attachment_list(list: &AttachmentList) {
    for row in list.rows() {
        println!(
            "  #{:<6} {} {}",
            row.document_id,
            pad(&row.title, 40),
            row.type_label
        );
    }
}

/// Truncate to `width` columns, then pad with spaces to exactly `width`.
fn pad(s: &str, width: usize) -> String {
    let truncated = truncate_str(s, width);
    let fill = width.saturating_sub(UnicodeWidthStr::width(truncated.as_str()));
    format!("{truncated}{}", " ".repeat(fill))
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    let width = UnicodeWidthStr::width(s);
    if width <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + 3 > max_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }
        result.push_str("...");
        result
    }
}
