//! Project identifier resolution.
//!
//! A page can carry its project id in four places. They are tried in a
//! fixed order and the first one that yields an id wins:
//! 1. hidden `project_id` form field
//! 2. page URL path `/project/{digits}/`
//! 3. page-global value
//! 4. the form's `action` URL, same path pattern

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

/// Backend primary key of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the current form lives and what it carries.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Page URL or path, e.g. `/tenders/project/12/send-invitation/`.
    pub url: String,
    /// Value of the hidden `project_id` input, if the page renders one.
    pub hidden_project_id: Option<String>,
    /// Project id exposed globally by the page template.
    pub global_project_id: Option<String>,
    /// The form's `action` attribute.
    pub form_action: Option<String>,
}

impl PageContext {
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A single source of the project id.
pub type Resolver = fn(&PageContext) -> Option<ProjectId>;

/// Resolvers in priority order.
pub const RESOLVERS: [(&str, Resolver); 4] = [
    ("hidden_field", from_hidden_field),
    ("page_url", from_page_url),
    ("page_global", from_page_global),
    ("form_action", from_form_action),
];

/// Resolve the project id; `None` when no source yields one.
pub fn resolve_project_id(ctx: &PageContext) -> Option<ProjectId> {
    RESOLVERS.iter().find_map(|(source, resolve)| {
        let id = resolve(ctx)?;
        tracing::debug!(source, project_id = %id, "Resolved project id");
        Some(id)
    })
}

fn from_hidden_field(ctx: &PageContext) -> Option<ProjectId> {
    ctx.hidden_project_id.as_deref().and_then(parse_id)
}

fn from_page_url(ctx: &PageContext) -> Option<ProjectId> {
    project_id_in_path(&ctx.url)
}

fn from_page_global(ctx: &PageContext) -> Option<ProjectId> {
    ctx.global_project_id.as_deref().and_then(parse_id)
}

fn from_form_action(ctx: &PageContext) -> Option<ProjectId> {
    ctx.form_action.as_deref().and_then(project_id_in_path)
}

fn parse_id(raw: &str) -> Option<ProjectId> {
    raw.trim().parse().ok().map(ProjectId)
}

/// Find the first `/project/{digits}/` segment in the path of a URL.
///
/// Query string and fragment are ignored. Relative paths are accepted.
pub fn project_id_in_path(url: &str) -> Option<ProjectId> {
    static PROJECT_RE: OnceLock<Regex> = OnceLock::new();
    let re = PROJECT_RE.get_or_init(|| Regex::new(r"/project/(\d+)/").expect("valid project regex"));

    let path = url_path(url);
    let caps = re.captures(&path)?;
    caps.get(1)?.as_str().parse().ok().map(ProjectId)
}

fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
