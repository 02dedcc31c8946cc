//! Rendering gateway trait and error type.
//!
//! The [`RenderGateway`] trait is the only way the pipeline talks to the
//! outside world: one call renders Markdown to an HTML fragment, the other
//! downloads a theme stylesheet. The production implementation is
//! [`GithubGateway`](super::github::GithubGateway).
//!
//! Failures are surfaced as-is. Nothing here retries; the session decides
//! whether to try the whole conversion again.

use crate::settings::Theme;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("GitHub API request failed: {status} {reason}\nDetails: {body}")]
    RenderService {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("Failed to download CSS from '{url}': {cause}")]
    StylesheetFetch { url: String, cause: String },
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Remote rendering capabilities used by the conversion pipeline.
pub trait RenderGateway {
    /// Render raw Markdown into an HTML fragment.
    fn render_markdown(&self, text: &str) -> Result<String, GatewayError>;

    /// Download the stylesheet for `theme`.
    fn fetch_stylesheet(&self, theme: Theme) -> Result<String, GatewayError>;
}
