//! The conversion settings record and its enumerated options.
//!
//! A [`Settings`] value starts out holding defaults and is filled in by the
//! resolver from CLI flags, the settings file, and prompts. Raw values
//! (`input_path`, `output_path`) are kept separate from the resolved paths
//! the pipeline actually uses, so re-resolving after an amendment always
//! starts from what the user asked for.
//!
//! ## Options
//!
//! | Option | Values | Default |
//! |--------|--------|---------|
//! | [`Theme`] | `Light`, `Dark` | `Light` |
//! | [`CssMode`] | `CDN`, `Embed` | `CDN` |
//!
//! Both parse case-insensitively, so `dark`, `Dark` and `DARK` are the same
//! value on the command line and in `config.json`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const CDN_LIGHT: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/github-markdown-css/5.8.1/github-markdown-light.min.css";
const CDN_DARK: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/github-markdown-css/5.8.1/github-markdown-dark.min.css";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Input file path must be provided via --input or the settings file")]
    MissingInput,
    #[error("Input Markdown file not found: {}", .0.display())]
    InputNotFound(PathBuf),
}

/// Color theme of the generated page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Value of the `data-theme` attribute on the root element.
    pub fn attr(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Fixed github-markdown-css stylesheet for this theme.
    pub fn stylesheet_url(self) -> &'static str {
        match self {
            Theme::Light => CDN_LIGHT,
            Theme::Dark => CDN_DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected Light or Dark)")),
        }
    }
}

/// How the github-markdown-css stylesheet reaches the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CssMode {
    /// `<link>` to the CDN copy; the page needs a network connection to look right.
    #[default]
    Cdn,
    /// Stylesheet downloaded at conversion time and inlined; works offline.
    Embed,
}

impl CssMode {
    pub const ALL: [CssMode; 2] = [CssMode::Cdn, CssMode::Embed];

    /// Longer label used by the selection prompt.
    pub fn description(self) -> &'static str {
        match self {
            CssMode::Cdn => "CDN Link (requires internet to view)",
            CssMode::Embed => "Embed CSS (downloads now, works offline)",
        }
    }
}

impl fmt::Display for CssMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CssMode::Cdn => "CDN",
            CssMode::Embed => "Embed",
        })
    }
}

impl FromStr for CssMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cdn" => Ok(CssMode::Cdn),
            "embed" => Ok(CssMode::Embed),
            other => Err(format!("unknown CSS mode '{other}' (expected CDN or Embed)")),
        }
    }
}

/// One conversion's worth of settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Source Markdown file as supplied by the settings file or a prompt.
    pub input_path: Option<PathBuf>,
    /// Explicit output override. `None` means "next to the input, as `.html`".
    pub output_path: Option<PathBuf>,
    pub theme: Theme,
    pub css_mode: CssMode,
    /// Final input path used by the pipeline. Empty until resolved.
    pub resolved_input: PathBuf,
    /// Final output path used by the pipeline. Empty until resolved.
    pub resolved_output: PathBuf,
}

impl Settings {
    /// Compute the resolved input and output paths.
    ///
    /// `cli_input` takes priority over `input_path`. The output is
    /// `output_path` when set, otherwise the input with its extension
    /// replaced by `.html`. Calling this twice with the same arguments
    /// yields the same result.
    pub fn resolve_paths(&mut self, cli_input: Option<&Path>) -> Result<(), SettingsError> {
        let input = cli_input
            .map(Path::to_path_buf)
            .or_else(|| self.input_path.clone())
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(SettingsError::MissingInput)?;

        if !input.is_file() {
            return Err(SettingsError::InputNotFound(input));
        }

        self.resolved_output = match &self.output_path {
            Some(output) => output.clone(),
            None => input.with_extension("html"),
        };
        self.resolved_input = input;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.resolved_input.as_os_str().is_empty()
            && !self.resolved_output.as_os_str().is_empty()
            && self.resolved_input.is_file()
    }

    /// Document title: the input file name without its extension.
    pub fn title(&self) -> String {
        self.resolved_input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
