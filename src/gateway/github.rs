//! GitHub-backed rendering gateway.
//!
//! Markdown goes to GitHub's raw Markdown endpoint, which answers with the
//! same HTML fragment github.com shows for a README. Stylesheets come from
//! the github-markdown-css package on cdnjs. One blocking `reqwest` client is
//! built per session and reused for every call, so repeated conversions in
//! the interactive loop share a connection pool.

use super::backend::{GatewayError, RenderGateway};
use crate::settings::Theme;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

pub const GITHUB_MARKDOWN_URL: &str = "https://api.github.com/markdown/raw";
pub const USER_AGENT: &str = concat!("GitHubify/", env!("CARGO_PKG_VERSION"));

/// Where the gateway sends its requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub render: String,
    pub light_css: String,
    pub dark_css: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            render: GITHUB_MARKDOWN_URL.to_string(),
            light_css: Theme::Light.stylesheet_url().to_string(),
            dark_css: Theme::Dark.stylesheet_url().to_string(),
        }
    }
}

impl Endpoints {
    fn stylesheet(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light_css,
            Theme::Dark => &self.dark_css,
        }
    }
}

pub struct GithubGateway {
    http: Client,
    endpoints: Endpoints,
}

impl GithubGateway {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self, GatewayError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, endpoints })
    }
}

impl RenderGateway for GithubGateway {
    fn render_markdown(&self, text: &str) -> Result<String, GatewayError> {
        log::debug!("POST {} ({} bytes)", self.endpoints.render, text.len());
        let resp = self
            .http
            .post(&self.endpoints.render)
            .header(ACCEPT, "text/html")
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(text.to_owned())
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GatewayError::RenderService {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }
        Ok(resp.text()?)
    }

    fn fetch_stylesheet(&self, theme: Theme) -> Result<String, GatewayError> {
        let url = self.endpoints.stylesheet(theme);
        log::debug!("GET {url}");
        let fetch_error = |cause: String| GatewayError::StylesheetFetch {
            url: url.to_string(),
            cause,
        };
        let css = self
            .http
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| fetch_error(e.to_string()))?;
        if css.trim().is_empty() {
            return Err(fetch_error("empty response body".to_string()));
        }
        Ok(css)
    }
}
