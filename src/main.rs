//! CLI entry point for `tenderdesk`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};

use tenderdesk::attachments::AttachmentManager;
use tenderdesk::backend::http::{HttpBackend, HttpFormSubmitter};
use tenderdesk::config::{Config, SubmitPolicy};
use tenderdesk::filter::{FilterState, SubcontractorList};
use tenderdesk::i18n;
use tenderdesk::model::attachment::{AttachmentRow, DocumentId, DocumentType, SelectedFile};
use tenderdesk::model::subcontractor::load_rows;
use tenderdesk::project::PageContext;
use tenderdesk::submit::{EmailForm, SubmitGate, SubmitOutcome};
use tenderdesk::terminal::{self, TerminalPage};

#[derive(Parser)]
#[command(name = "tenderdesk", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin (overrides `[backend] base_url`)
    #[arg(long, global = true, env = "TENDERDESK_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Cookie string holding the CSRF token, e.g. "csrftoken=..."
    #[arg(long, global = true, env = "TENDERDESK_COOKIE", default_value = "", hide_env_values = true)]
    cookie: String,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, global = true, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Confirm,
    Direct,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a tender document or SharePoint link
    Upload {
        /// URL of the page the upload form is on
        #[arg(long)]
        page_url: String,
        /// Project id (as the hidden form field would carry it)
        #[arg(long)]
        project_id: Option<String>,
        /// Document type (TENDER, DRAWING, SPECIFICATION, CONTRACT, OTHER)
        #[arg(long = "type", value_name = "TYPE")]
        document_type: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        file: Option<PathBuf>,
        /// SharePoint link
        #[arg(long, default_value = "")]
        link: String,
    },
    /// Remove an uploaded tender document
    Remove {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Filter a subcontractor list by trade and search text
    Filter {
        /// JSON file with subcontractor rows
        rows: PathBuf,
        #[arg(long, default_value = "")]
        trade: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        json: bool,
    },
    /// Submit a tender email form for selected subcontractors
    Send {
        /// JSON file with subcontractor rows
        rows: PathBuf,
        /// URL of the page hosting the form
        #[arg(long)]
        page_url: String,
        /// Form action (defaults to the page URL)
        #[arg(long)]
        action: Option<String>,
        #[arg(long, default_value = "")]
        subject: String,
        /// Message body, as the editor would hold it
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long, default_value = "")]
        sharepoint_link: String,
        /// Subcontractor ids to tick
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        /// Tick every row matching --trade/--search
        #[arg(long)]
        select_visible: bool,
        #[arg(long, default_value = "")]
        trade: String,
        #[arg(long, default_value = "")]
        search: String,
        /// Override `[submit] policy`
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early(config: &Config) -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(lang) = args.get(i + 1).and_then(|code| i18n::Lang::from_code(code)) {
                return lang;
            }
        }
        if let Some(lang) = args[i]
            .strip_prefix("--lang=")
            .and_then(i18n::Lang::from_code)
        {
            return lang;
        }
    }
    i18n::Lang::from_code(&config.general.lang).unwrap_or_else(i18n::detect_system_lang)
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command().about(i18n::app_about());

    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let s = sub.clone();
            match s.get_name() {
                "upload" => s.about(i18n::help_cmd_upload()),
                "remove" => s.about(i18n::help_cmd_remove()),
                "filter" => s.about(i18n::help_cmd_filter()),
                "send" => s.about(i18n::help_cmd_send()),
                "completions" => s.about(i18n::help_cmd_completions()),
                "manpage" => s.about(i18n::help_cmd_manpage()),
                _ => s,
            }
        })
        .collect();

    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    let mut config = tenderdesk::config::load_config();

    // Detect language BEFORE clap parsing so --help is localized
    i18n::set_lang(detect_lang_early(&config));

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let log_level = match cli.verbose {
        0 => config.general.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    setup_logging(&log_level, &config);

    if let Some(code) = cli.lang.as_deref() {
        if i18n::Lang::from_code(code).is_none() {
            tracing::warn!(lang = code, "Unsupported language, using {}", i18n::lang().code());
        }
    }

    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }
    let cookie = cli.cookie;

    match cli.command {
        Commands::Upload {
            page_url,
            project_id,
            document_type,
            title,
            description,
            file,
            link,
        } => {
            let ctx = PageContext {
                url: page_url,
                hidden_project_id: project_id,
                ..PageContext::default()
            };
            let mut manager = AttachmentManager::new(&config);
            manager.form.document_type = document_type;
            manager.form.title = title;
            manager.form.description = description;
            manager.form.link = link;
            if let Some(path) = file {
                manager.form.file = Some(SelectedFile::from_path(&path)?);
            }
            cmd_upload(&config, &ctx, &cookie, manager)
        }
        Commands::Remove { id, yes } => cmd_remove(&config, DocumentId(id), &cookie, yes),
        Commands::Filter {
            rows,
            trade,
            search,
            json,
        } => cmd_filter(&rows, FilterState::new(trade, search), json),
        Commands::Send {
            rows,
            page_url,
            action,
            subject,
            message,
            sharepoint_link,
            select,
            select_visible,
            trade,
            search,
            policy,
            yes,
        } => {
            if let Some(policy) = policy {
                config.submit.policy = match policy {
                    PolicyArg::Confirm => SubmitPolicy::Confirm,
                    PolicyArg::Direct => SubmitPolicy::Direct,
                };
            }
            let mut list = SubcontractorList::new(load_rows(&rows)?);
            list.apply_filter(FilterState::new(trade, search));
            if select_visible {
                list.select_all_visible();
            }
            for id in &select {
                if !list.set_display_checked(id, true) {
                    anyhow::bail!("Unknown subcontractor id: {id}");
                }
            }
            let action = action.unwrap_or_else(|| page_url.clone());
            let mut form = EmailForm::new(action, page_url, list);
            form.subject = subject;
            form.sharepoint_link = sharepoint_link;
            cmd_send(&config, form, message, &cookie, yes)
        }
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Configure logging: stderr + log file in the cache directory.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_path = tenderdesk::config::log_file_path(config);
    let log_dir = log_path.parent().map(Path::to_path_buf).unwrap_or_default();
    let log_name = log_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    if !log_name.is_empty() && std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, &log_name);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Run the upload flow against the backend.
fn cmd_upload(
    config: &Config,
    ctx: &PageContext,
    cookie: &str,
    mut manager: AttachmentManager,
) -> anyhow::Result<()> {
    use humansize::{format_size, BINARY};

    if DocumentType::from_code(&manager.form.document_type).is_none() {
        tracing::warn!(
            document_type = %manager.form.document_type,
            "Unknown document type, sending as given"
        );
    }
    if let Some(ref file) = manager.form.file {
        println!(
            "  {} ({})",
            file.file_name,
            format_size(file.size(), BINARY)
        );
    }

    let backend = HttpBackend::new(&config.backend)?;
    let mut page = TerminalPage::new(true);
    let pb = terminal::spinner(i18n::button_uploading());
    let result = manager.upload(ctx, cookie, &backend, &mut page);
    pb.finish_and_clear();
    result?;

    terminal::print_attachment_list(&manager.list);
    Ok(())
}

/// Run the removal flow for one document.
fn cmd_remove(config: &Config, id: DocumentId, cookie: &str, yes: bool) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend)?;
    let mut page = TerminalPage::new(yes);
    let mut manager = AttachmentManager::new(config);
    manager
        .list
        .push(AttachmentRow::new(id, format!("#{id}"), String::new()));

    let outcome = manager.remove(id, cookie, &backend, &mut page)?;
    tracing::debug!(?outcome, "Remove finished");
    Ok(())
}

/// Filter a row file and print the visible rows.
fn cmd_filter(rows: &Path, filter: FilterState, json: bool) -> anyhow::Result<()> {
    let mut list = SubcontractorList::new(load_rows(rows)?);
    list.apply_filter(filter);

    if json {
        let visible: Vec<_> = list.visible_rows().map(|r| &r.subcontractor).collect();
        let out = serde_json::json!({
            "visible": list.visible_count(),
            "total": list.total(),
            "rows": visible,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        terminal::print_subcontractor_table(&list);
    }
    Ok(())
}

/// Run the submit gate over an email form.
fn cmd_send(
    config: &Config,
    mut form: EmailForm,
    message: String,
    cookie: &str,
    yes: bool,
) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend)?;
    let mut page = TerminalPage::new(yes);

    terminal::print_subcontractor_table(&form.subcontractors);

    let gate = SubmitGate::new(&config.submit).with_editor(Box::new(message));
    let mut submitter = HttpFormSubmitter {
        backend: &backend,
        cookies: cookie.to_string(),
    };

    let outcome = gate.on_submit(&mut form, &mut page, &mut submitter);
    page.hide_overlay();
    match outcome? {
        SubmitOutcome::Submitted => println!("  {}", i18n::cli_submitted()),
        SubmitOutcome::Cancelled => println!("  {}", i18n::cli_cancelled()),
        SubmitOutcome::Blocked => std::process::exit(1),
    }
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "tenderdesk", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
