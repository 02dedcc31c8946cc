//! CLI output formatting.
//!
//! Every message the tool shows is built here. Each `format_*` function is
//! pure (returns a `String` or `Vec<String>`, no I/O) so wording is testable;
//! [`crate::interact::Terminal`] adds color and prints, and [`print_event`]
//! is the one plain printer, used by the session's progress thread.
//!
//! # Settings summary
//!
//! ```text
//! Current Settings
//!   #  Setting      Value
//!   1  Input File   notes.md
//!   2  Output File  notes.html
//!   3  Theme        Light
//!   4  CSS Mode     CDN
//! ```
//!
//! # Progress
//!
//! ```text
//! Reading notes.md...
//! Downloading Dark theme CSS...
//! Converting Markdown via GitHub API...
//! Generating final HTML structure...
//! Writing HTML to notes.html...
//! ```
//!
//! # Errors
//!
//! A title naming the failure class, then the error message:
//!
//! ```text
//! Error: API Error
//! Failed to communicate with GitHub API or download CSS
//! GitHub API request failed: 403 Forbidden
//! Details: API rate limit exceeded
//! ```

use crate::convert::{ConvertError, ConvertEvent};
use crate::interact::{Notice, ReviewAction};
use crate::resolve::ResolveError;
use crate::session::SessionError;
use crate::settings::{Settings, SettingsError};
use std::path::Path;

/// File name only, for compact display; falls back to the full path.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn format_banner() -> Vec<String> {
    vec![
        "  __  __ ____    __    _   _ _____ __  __ _     ".to_string(),
        " |  \\/  |  _ \\   \\ \\  | | | |_   _|  \\/  | |    ".to_string(),
        " | |\\/| | | | |   > > | |_| | | | | |\\/| | |    ".to_string(),
        " | |  | | |_| |  / /  |  _  | | | | |  | | |___ ".to_string(),
        " |_|  |_|____/  /_/   |_| |_| |_| |_|  |_|_____|".to_string(),
    ]
}

pub fn format_farewell() -> Vec<String> {
    vec![
        "Goodbye!".to_string(),
        "Thanks for using GitHubify! Have a great day!".to_string(),
    ]
}

pub fn format_notice(notice: &Notice) -> String {
    match notice {
        Notice::SettingsLoaded(path) => format!("Loaded settings from {}.", path.display()),
        Notice::SettingsIgnored => {
            "Ignoring config file. Proceeding with manual configuration.".to_string()
        }
        Notice::SettingsCorrupt(reason) => {
            format!("{reason}\nProceeding with manual configuration.")
        }
        Notice::DefaultUsed { setting, value } => {
            format!("No {setting} specified, defaulting to {value}.")
        }
        Notice::InvalidInputPath(raw) if raw.trim().is_empty() => {
            "Invalid path. Must be an existing file.".to_string()
        }
        Notice::InvalidInputPath(raw) => {
            format!("Invalid path '{}'. Must be an existing file.", raw.trim())
        }
        Notice::EmptyOutputPath => "Output path cannot be empty.".to_string(),
    }
}

/// The four-row settings table shown on the review screen.
pub fn format_settings_summary(settings: &Settings) -> Vec<String> {
    let rows = [
        ("1", "Input File", file_name(&settings.resolved_input)),
        ("2", "Output File", file_name(&settings.resolved_output)),
        ("3", "Theme", settings.theme.to_string()),
        ("4", "CSS Mode", settings.css_mode.to_string()),
    ];

    let mut lines = vec![
        "Current Settings".to_string(),
        format!("  {:<2} {:<12} {}", "#", "Setting", "Value"),
    ];
    for (index, setting, value) in rows {
        lines.push(format!("  {index:<2} {setting:<12} {value}"));
    }
    lines
}

pub fn format_review_help() -> Vec<String> {
    vec![
        ">> Choose an action:".to_string(),
        "   Press 1-4 to change settings".to_string(),
        "   Press Enter to proceed with conversion".to_string(),
        "   Press Esc to cancel".to_string(),
    ]
}

pub fn format_review_feedback(action: ReviewAction) -> Option<&'static str> {
    match action {
        ReviewAction::ChangeInput => Some(">> Changing input file..."),
        ReviewAction::ChangeOutput => Some(">> Changing output file..."),
        ReviewAction::ChangeTheme => Some(">> Changing theme..."),
        ReviewAction::ChangeCssMode => Some(">> Changing CSS mode..."),
        ReviewAction::Proceed | ReviewAction::Cancel => None,
    }
}

pub fn format_event(event: &ConvertEvent) -> String {
    match event {
        ConvertEvent::Reading(path) => format!("Reading {}...", file_name(path)),
        ConvertEvent::FetchingStylesheet(theme) => format!("Downloading {theme} theme CSS..."),
        ConvertEvent::Rendering => "Converting Markdown via GitHub API...".to_string(),
        ConvertEvent::Assembling => "Generating final HTML structure...".to_string(),
        ConvertEvent::Writing(path) => format!("Writing HTML to {}...", file_name(path)),
        ConvertEvent::Finished(path) => format!("Done: {}", file_name(path)),
    }
}

pub fn print_event(event: &ConvertEvent) {
    println!("{}", format_event(event));
}

pub fn format_success(output: &Path) -> String {
    format!("Success! HTML file generated at: {}", output.display())
}

/// Error report: a title line naming the failure class, then details.
///
/// Cancellation is not an error and gets a single plain line.
pub fn format_error(error: &SessionError) -> Vec<String> {
    let message = error.to_string();
    match error {
        SessionError::Resolve(ResolveError::Cancelled) => vec![message],
        SessionError::Resolve(ResolveError::Settings(SettingsError::InputNotFound(_)))
        | SessionError::Convert(ConvertError::InputNotFound(_)) => {
            vec!["Error: Input file not found".to_string(), message]
        }
        SessionError::Resolve(ResolveError::Settings(SettingsError::MissingInput))
        | SessionError::Resolve(ResolveError::OutputDir { .. }) => {
            vec!["Error: Configuration Error".to_string(), message]
        }
        SessionError::Convert(ConvertError::Gateway(_)) => {
            let mut lines = vec![
                "Error: API Error".to_string(),
                "Failed to communicate with GitHub API or download CSS".to_string(),
            ];
            lines.extend(message.lines().map(str::to_string));
            lines
        }
        _ => vec!["An unexpected error occurred!".to_string(), format!("{error:?}")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use crate::settings::{CssMode, Theme};
    use std::path::PathBuf;

    #[test]
    fn summary_lists_four_settings_by_file_name() {
        let settings = Settings {
            theme: Theme::Dark,
            css_mode: CssMode::Embed,
            resolved_input: PathBuf::from("/home/me/docs/notes.md"),
            resolved_output: PathBuf::from("/home/me/site/notes.html"),
            ..Settings::default()
        };
        let lines = format_settings_summary(&settings);
        assert_eq!(
            lines,
            vec![
                "Current Settings",
                "  #  Setting      Value",
                "  1  Input File   notes.md",
                "  2  Output File  notes.html",
                "  3  Theme        Dark",
                "  4  CSS Mode     Embed",
            ]
        );
    }

    #[test]
    fn events_read_as_progress_lines() {
        assert_eq!(
            format_event(&ConvertEvent::Reading(PathBuf::from("/tmp/notes.md"))),
            "Reading notes.md..."
        );
        assert_eq!(
            format_event(&ConvertEvent::FetchingStylesheet(Theme::Dark)),
            "Downloading Dark theme CSS..."
        );
        assert_eq!(
            format_event(&ConvertEvent::Writing(PathBuf::from("out/notes.html"))),
            "Writing HTML to notes.html..."
        );
    }

    #[test]
    fn default_notice_names_setting_and_value() {
        let line = format_notice(&Notice::DefaultUsed {
            setting: "CSS mode",
            value: "CDN".to_string(),
        });
        assert_eq!(line, "No CSS mode specified, defaulting to CDN.");
    }

    #[test]
    fn invalid_input_notice_quotes_the_answer() {
        assert_eq!(
            format_notice(&Notice::InvalidInputPath(" nope.md\n".to_string())),
            "Invalid path 'nope.md'. Must be an existing file."
        );
        assert_eq!(
            format_notice(&Notice::InvalidInputPath(String::new())),
            "Invalid path. Must be an existing file."
        );
    }

    #[test]
    fn review_feedback_only_for_amendments() {
        assert_eq!(
            format_review_feedback(ReviewAction::ChangeTheme),
            Some(">> Changing theme...")
        );
        assert_eq!(format_review_feedback(ReviewAction::Proceed), None);
        assert_eq!(format_review_feedback(ReviewAction::Cancel), None);
    }

    #[test]
    fn api_error_includes_status_and_details() {
        let error = SessionError::from(GatewayError::RenderService {
            status: 403,
            reason: "Forbidden".to_string(),
            body: "API rate limit exceeded".to_string(),
        });
        assert_eq!(
            format_error(&error),
            vec![
                "Error: API Error",
                "Failed to communicate with GitHub API or download CSS",
                "GitHub API request failed: 403 Forbidden",
                "Details: API rate limit exceeded",
            ]
        );
    }

    #[test]
    fn missing_input_is_configuration_error() {
        let error = SessionError::from(ResolveError::from(SettingsError::MissingInput));
        let lines = format_error(&error);
        assert_eq!(lines[0], "Error: Configuration Error");
        assert!(lines[1].contains("--input"));
    }

    #[test]
    fn not_found_names_the_file() {
        let error = SessionError::from(ConvertError::InputNotFound(PathBuf::from("a.md")));
        assert_eq!(
            format_error(&error),
            vec!["Error: Input file not found", "Input Markdown file not found: a.md"]
        );
    }

    #[test]
    fn cancellation_is_a_single_plain_line() {
        let error = SessionError::from(ResolveError::Cancelled);
        assert_eq!(format_error(&error), vec!["Configuration cancelled by user"]);
    }

    #[test]
    fn unexpected_errors_show_full_diagnostic() {
        let error = SessionError::from(ConvertError::InvalidSettings);
        let lines = format_error(&error);
        assert_eq!(lines[0], "An unexpected error occurred!");
        assert!(lines[1].contains("InvalidSettings"));
    }

    #[test]
    fn success_shows_full_path() {
        assert_eq!(
            format_success(Path::new("out/notes.html")),
            "Success! HTML file generated at: out/notes.html"
        );
    }
}
