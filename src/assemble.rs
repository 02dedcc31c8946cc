//! HTML document assembly.
//!
//! Wraps a rendered Markdown fragment in a complete, standalone page:
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang="en" data-theme="light|dark">
//!   <head>
//!     charset + viewport meta, <title>
//!     CSS: <link> to the theme's CDN stylesheet, or inline <style>
//!     responsive wrapper layout (static/layout.css)
//!   </head>
//!   <body class="markdown-body">
//!     <article class="markdown-content"> fragment </article>
//!   </body>
//! </html>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) so the title is escaped
//! automatically. The fragment and stylesheet are trusted output from the
//! gateway and emitted verbatim. Assembly is a pure function: the same inputs
//! always give byte-identical output.

use crate::settings::{CssMode, Theme};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

const LAYOUT_CSS: &str = include_str!("../static/layout.css");

#[derive(Error, Debug, PartialEq)]
pub enum AssembleError {
    #[error("CSS content must be provided for embed mode")]
    MissingEmbedCss,
}

/// Build the full HTML document.
///
/// `css` is required (and must not be blank) when `css_mode` is
/// [`CssMode::Embed`]; it is ignored for [`CssMode::Cdn`].
pub fn assemble(
    title: &str,
    fragment: &str,
    theme: Theme,
    css_mode: CssMode,
    css: Option<&str>,
) -> Result<String, AssembleError> {
    let stylesheet = stylesheet(theme, css_mode, css)?;
    let doc = html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.attr()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (stylesheet)
                style { (PreEscaped(LAYOUT_CSS)) }
            }
            body.markdown-body {
                article.markdown-content {
                    (PreEscaped(fragment))
                }
            }
        }
    };
    Ok(doc.into_string())
}

/// The github-markdown-css inclusion for the chosen mode.
fn stylesheet(theme: Theme, css_mode: CssMode, css: Option<&str>) -> Result<Markup, AssembleError> {
    match (css_mode, css) {
        (CssMode::Embed, Some(css)) if !css.trim().is_empty() => Ok(html! {
            style { (PreEscaped(css)) }
        }),
        (CssMode::Embed, _) => Err(AssembleError::MissingEmbedCss),
        (CssMode::Cdn, _) => Ok(html! {
            link rel="stylesheet" href=(theme.stylesheet_url());
        }),
    }
}
