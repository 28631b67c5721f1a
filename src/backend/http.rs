//! Blocking `reqwest` client for the tender backend.

use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::csrf::CsrfToken;
use crate::error::{FormError, Result};
use crate::model::attachment::DocumentId;
use crate::submit::{EmailForm, FormSubmitter};

use super::{DocumentBackend, RemoveResponse, UploadRequest, UploadResponse};

/// Field name Django reads the anti-forgery token from in form posts.
const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

pub struct HttpBackend {
    client: Client,
    base: Url,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| FormError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base,
            config: config.clone(),
        })
    }

    /// Resolve a path (or absolute URL) against the configured origin.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| FormError::InvalidUrl(format!("{path}: {e}")))
    }

    fn remove_url(&self, id: DocumentId) -> Result<Url> {
        self.endpoint(&self.config.remove_path.replace("{id}", &id.to_string()))
    }

    /// Post an email form to its action URL, form-encoded.
    pub fn submit_email_form(&self, form: &EmailForm, token: &CsrfToken) -> Result<()> {
        let url = self.endpoint(&form.action)?;
        let mut fields = form.fields();
        fields.push((CSRF_FORM_FIELD.to_string(), token.as_str().to_string()));

        let response = self
            .client
            .post(url.clone())
            .header(self.config.csrf_header.as_str(), token.as_str())
            .form(&fields)
            .send()?;
        check_status(response)?;
        tracing::info!(url = %url, recipients = form.selected_count(), "Email form submitted");
        Ok(())
    }
}

impl DocumentBackend for HttpBackend {
    fn upload_document(&self, request: &UploadRequest, token: &CsrfToken) -> Result<UploadResponse> {
        let url = self.endpoint(&self.config.upload_path)?;

        let mut form = multipart::Form::new()
            .text("document_type", request.document_type.clone())
            .text("title", request.title.clone())
            .text("project_id", request.project_id.to_string());
        if let Some(ref description) = request.description {
            form = form.text("description", description.clone());
        }
        if let Some(ref file) = request.file {
            let part = multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            form = form.part("file", part);
        }
        if let Some(ref link) = request.link {
            form = form.text("sharepoint_link", link.clone());
        }

        tracing::debug!(url = %url, title = %request.title, "Uploading document");
        let response = self
            .client
            .post(url)
            .header(self.config.csrf_header.as_str(), token.as_str())
            .multipart(form)
            .send()?;
        read_json(response)
    }

    fn remove_document(&self, id: DocumentId, token: &CsrfToken) -> Result<RemoveResponse> {
        let url = self.remove_url(id)?;
        tracing::debug!(url = %url, document_id = %id, "Removing document");
        let response = self
            .client
            .post(url)
            .header(self.config.csrf_header.as_str(), token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()?;
        read_json(response)
    }
}

/// Submits email forms through an [`HttpBackend`].
///
/// The token is read from the cookies at submission time.
pub struct HttpFormSubmitter<'a> {
    pub backend: &'a HttpBackend,
    pub cookies: String,
}

impl FormSubmitter for HttpFormSubmitter<'_> {
    fn submit(&mut self, form: &EmailForm) -> Result<()> {
        let token = crate::csrf::token_from_cookies(&self.cookies, &self.backend.config.csrf_cookie)?;
        self.backend.submit_email_form(form, &token)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turn a non-OK response into `HttpStatus`, keeping the backend's reason if it sent one.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let reason = response
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.error);
    Err(FormError::HttpStatus {
        status: status.as_u16(),
        reason,
    })
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    Ok(check_status(response)?.json()?)
}
