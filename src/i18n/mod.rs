//! Internationalization (i18n) module.
//!
//! Provides localized strings for alerts, confirmation prompts, notices
//! and CLI output. English is the default language; Spanish is available
//! as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from the `TENDERDESK_LANG` / `LC_MESSAGES` / `LANG` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("TENDERDESK_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "tenderdesk", "tenderdesk");
msg!(
    app_about,
    "tenderdesk \u{2014} send tender emails, manage tender documents and filter subcontractors from the terminal.",
    "tenderdesk \u{2014} env\u{ed}a correos de licitaci\u{f3}n, gestiona documentos y filtra subcontratistas desde la terminal."
);

// ── Alerts (blocking) ────────────────────────────────────────────

msg!(
    alert_no_selection,
    "Please select at least one subcontractor.",
    "Selecciona al menos un subcontratista."
);
msg!(
    alert_missing_fields,
    "Please select a document type and enter a title.",
    "Selecciona un tipo de documento e introduce un t\u{ed}tulo."
);
msg!(
    alert_missing_file_or_link,
    "Please choose a file or enter a SharePoint link.",
    "Elige un fichero o introduce un enlace de SharePoint."
);
msg!(
    alert_project_not_found,
    "Could not determine the project. Please reload the page and try again.",
    "No se pudo determinar el proyecto. Recarga la p\u{e1}gina e int\u{e9}ntalo de nuevo."
);
msg!(
    alert_missing_token,
    "Security token missing. Please reload the page and try again.",
    "Falta el token de seguridad. Recarga la p\u{e1}gina e int\u{e9}ntalo de nuevo."
);

// ── Confirmations ────────────────────────────────────────────────

msg!(
    confirm_remove_document,
    "Are you sure you want to remove this document?",
    "\u{bf}Seguro que quieres eliminar este documento?"
);

/// Confirmation text for sending tender invitations.
pub fn confirm_send_invitation(count: usize) -> String {
    match lang() {
        Lang::En => format!(
            "Send tender invitations to {count} subcontractor(s)?\n\nEmails are sent immediately and cannot be recalled."
        ),
        Lang::Es => format!(
            "\u{bf}Enviar invitaciones de licitaci\u{f3}n a {count} subcontratista(s)?\n\nLos correos se env\u{ed}an inmediatamente y no se pueden recuperar."
        ),
    }
}

/// Confirmation text for sending an addendum.
pub fn confirm_send_addendum(count: usize) -> String {
    match lang() {
        Lang::En => format!(
            "Send this addendum to {count} subcontractor(s)?\n\nEmails are sent immediately and cannot be recalled."
        ),
        Lang::Es => format!(
            "\u{bf}Enviar esta adenda a {count} subcontratista(s)?\n\nLos correos se env\u{ed}an inmediatamente y no se pueden recuperar."
        ),
    }
}

/// Confirmation text for sending reminders.
pub fn confirm_send_reminders(count: usize) -> String {
    match lang() {
        Lang::En => format!("Send reminders to {count} subcontractor(s)?"),
        Lang::Es => format!("\u{bf}Enviar recordatorios a {count} subcontratista(s)?"),
    }
}

/// Confirmation text when the page does not name a specific operation.
pub fn confirm_send_generic(count: usize) -> String {
    match lang() {
        Lang::En => format!("Send emails to {count} subcontractor(s)?"),
        Lang::Es => format!("\u{bf}Enviar correos a {count} subcontratista(s)?"),
    }
}

// ── Progress labels ──────────────────────────────────────────────

msg!(overlay_sending, "Sending emails...", "Enviando correos...");
msg!(button_upload, "Upload Document", "Subir documento");
msg!(button_uploading, "Uploading...", "Subiendo...");

// ── Notices ──────────────────────────────────────────────────────

msg!(
    notice_uploaded,
    "Document uploaded successfully.",
    "Documento subido correctamente."
);
msg!(
    notice_removed,
    "Document removed successfully.",
    "Documento eliminado correctamente."
);
msg!(
    notice_upload_failed,
    "Error uploading document",
    "Error al subir el documento"
);
msg!(
    notice_remove_failed,
    "Error removing document",
    "Error al eliminar el documento"
);

// ── Failure reasons (when the server gives none) ─────────────────

msg!(
    reason_upload_not_accepted,
    "the server did not accept the document",
    "el servidor no acept\u{f3} el documento"
);
msg!(
    reason_remove_not_accepted,
    "the server did not remove the document",
    "el servidor no elimin\u{f3} el documento"
);
msg!(
    reason_missing_document_id,
    "the server did not return a document id",
    "el servidor no devolvi\u{f3} un identificador de documento"
);

/// "Showing X of Y" counter shown above the subcontractor list.
pub fn showing_count(visible: usize, total: usize) -> String {
    match lang() {
        Lang::En => format!("Showing {visible} of {total}"),
        Lang::Es => format!("Mostrando {visible} de {total}"),
    }
}

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_cmd_upload,
    "Upload a tender document or SharePoint link",
    "Subir un documento de licitaci\u{f3}n o enlace de SharePoint"
);
msg!(
    help_cmd_remove,
    "Remove an uploaded tender document",
    "Eliminar un documento de licitaci\u{f3}n subido"
);
msg!(
    help_cmd_filter,
    "Filter a subcontractor list by trade and search text",
    "Filtrar una lista de subcontratistas por oficio y texto"
);
msg!(
    help_cmd_send,
    "Submit a tender email form for selected subcontractors",
    "Enviar un formulario de correo a los subcontratistas seleccionados"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(help_cmd_manpage, "Generate a man page", "Generar p\u{e1}gina de manual");

// ── CLI strings ─────────────────────────────────────────────────

msg!(cli_yes_no, "[y/N]", "[s/N]");
msg!(cli_company, "Company", "Empresa");
msg!(cli_trade, "Trade", "Oficio");
msg!(cli_office, "Office", "Oficina");
msg!(cli_cancelled, "Cancelled.", "Cancelado.");
msg!(cli_submitted, "Form submitted.", "Formulario enviado.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_from_code() {
        assert_eq!(Lang::from_code("en"), Some(Lang::En));
        assert_eq!(Lang::from_code("es"), Some(Lang::Es));
        assert_eq!(Lang::from_code("en_GB"), Some(Lang::En));
        assert_eq!(Lang::from_code("es-MX"), Some(Lang::Es));
        assert_eq!(Lang::from_code("fr"), None);
    }

    #[test]
    fn test_lang_code_roundtrip() {
        assert_eq!(Lang::En.code(), "en");
        assert_eq!(Lang::Es.code(), "es");
    }

    #[test]
    fn test_formatted_messages_include_count() {
        // In tests, OnceLock is never set, so English is active
        assert_eq!(showing_count(1, 2), "Showing 1 of 2");
        assert!(confirm_send_invitation(3).contains("3 subcontractor"));
        assert!(confirm_send_addendum(1).contains("addendum"));
        assert!(confirm_send_generic(7).starts_with("Send emails to 7"));
    }

    #[test]
    fn test_messages_return_strings() {
        assert!(!app_about().is_empty());
        assert!(!alert_no_selection().is_empty());
        assert_eq!(overlay_sending(), "Sending emails...");
    }
}
