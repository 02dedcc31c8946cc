//! Settings resolution.
//!
//! Turns command-line overrides, the optional settings file, and (in
//! interactive mode) prompts into one complete [`Settings`] value. Each
//! setting is resolved in a fixed order, with sources in strict precedence:
//!
//! ```text
//! 1. Input file   --input  >  settings file input_file  >  prompt
//! 2. Theme        --theme  >  settings file theme       >  prompt | default
//! 3. CSS mode     --css-mode > settings file css_mode   >  prompt | default
//! 4. Output file  --output >  settings file output_file >  <input>.html
//! 5. Review       interactive only: proceed, amend one setting, or cancel
//! ```
//!
//! Input comes first because the default output path is derived from it.
//! In non-interactive mode nothing is ever prompted: a missing input is
//! fatal, a missing theme or CSS mode falls back to its default with a
//! notice.
//!
//! The settings file is read by [`load_settings_file`], once per session,
//! and the record is handed to every [`resolve`] call after that. A corrupt
//! settings file is reported and then treated as absent.
//!
//! An interaction that fails with [`io::ErrorKind::Interrupted`] (Esc or
//! Ctrl-C in a menu) becomes [`ResolveError::Cancelled`].

use crate::interact::{Interaction, Notice, ReviewAction};
use crate::settings::{CssMode, Settings, SettingsError, Theme};
use crate::store::{self, PersistedSettings};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Configuration cancelled by user")]
    Cancelled,
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("Terminal interaction failed: {0}")]
    Interaction(#[source] io::Error),
}

impl From<io::Error> for ResolveError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::Interrupted => ResolveError::Cancelled,
            _ => ResolveError::Interaction(e),
        }
    }
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub theme: Option<Theme>,
    pub css_mode: Option<CssMode>,
    pub output: Option<PathBuf>,
}

/// Read the settings file for a session.
///
/// In interactive mode the user is asked before an existing file is used;
/// declining ignores it entirely. A file that cannot be parsed is reported
/// and treated as absent.
pub fn load_settings_file<U: Interaction>(
    path: &Path,
    interactive: bool,
    ui: &mut U,
) -> Result<Option<PersistedSettings>, ResolveError> {
    if interactive && path.exists() && !ui.confirm_settings_file(path)? {
        ui.notice(&Notice::SettingsIgnored);
        return Ok(None);
    }

    match store::load(path) {
        Ok(Some(persisted)) => {
            ui.notice(&Notice::SettingsLoaded(path.to_path_buf()));
            Ok(Some(persisted))
        }
        Ok(None) => Ok(None),
        Err(e) => {
            log::warn!("{e}");
            ui.notice(&Notice::SettingsCorrupt(e.to_string()));
            Ok(None)
        }
    }
}

/// Resolve a complete, valid set of settings.
///
/// `persisted` is the record returned by [`load_settings_file`], if any. In
/// interactive mode the final settings go through the review loop before
/// being returned.
pub fn resolve<U: Interaction>(
    overrides: &Overrides,
    persisted: Option<&PersistedSettings>,
    interactive: bool,
    ui: &mut U,
) -> Result<Settings, ResolveError> {
    let empty = PersistedSettings::default();
    let persisted = persisted.unwrap_or(&empty);
    let mut settings = Settings {
        input_path: persisted.input_file.clone(),
        output_path: persisted.output_file.clone(),
        ..Settings::default()
    };

    resolve_input(&mut settings, overrides.input.as_deref(), interactive, ui)?;
    settings.theme = resolve_choice(
        "theme",
        overrides.theme,
        persisted.theme,
        interactive,
        ui,
        |ui| ui.select_theme(),
    )?;
    settings.css_mode = resolve_choice(
        "CSS mode",
        overrides.css_mode,
        persisted.css_mode,
        interactive,
        ui,
        |ui| ui.select_css_mode(),
    )?;
    resolve_output(&mut settings, overrides.output.as_deref())?;

    if interactive {
        review(&mut settings, ui)?;
    }

    log::info!(
        "resolved {} -> {} ({}, {})",
        settings.resolved_input.display(),
        settings.resolved_output.display(),
        settings.theme,
        settings.css_mode
    );
    Ok(settings)
}

fn resolve_input<U: Interaction>(
    settings: &mut Settings,
    cli_input: Option<&Path>,
    interactive: bool,
    ui: &mut U,
) -> Result<(), ResolveError> {
    if cli_input.is_some() || settings.input_path.is_some() {
        settings.resolve_paths(cli_input)?;
        return Ok(());
    }

    if !interactive {
        return Err(SettingsError::MissingInput.into());
    }

    settings.input_path = Some(prompt_input_path(ui)?);
    settings.resolve_paths(None)?;
    Ok(())
}

/// Shared precedence for enumerated settings: CLI, then settings file, then
/// prompt (interactive) or default (non-interactive).
fn resolve_choice<T, U>(
    setting: &'static str,
    cli: Option<T>,
    stored: Option<T>,
    interactive: bool,
    ui: &mut U,
    prompt: impl FnOnce(&mut U) -> io::Result<T>,
) -> Result<T, ResolveError>
where
    T: Copy + Default + Display,
    U: Interaction,
{
    if let Some(value) = cli.or(stored) {
        return Ok(value);
    }
    if !interactive {
        let value = T::default();
        ui.notice(&Notice::DefaultUsed {
            setting,
            value: value.to_string(),
        });
        return Ok(value);
    }
    Ok(prompt(ui)?)
}

fn resolve_output(settings: &mut Settings, cli_output: Option<&Path>) -> Result<(), ResolveError> {
    if let Some(output) = cli_output {
        settings.output_path = Some(output.to_path_buf());
        settings.resolved_output = output.to_path_buf();
    }
    ensure_parent_dir(&settings.resolved_output)
}

fn ensure_parent_dir(output: &Path) -> Result<(), ResolveError> {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            log::debug!("creating output directory {}", dir.display());
            fs::create_dir_all(dir).map_err(|source| ResolveError::OutputDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Let the user confirm or amend the settings. Loops until they proceed or
/// cancel; amending one setting leaves the others as they were.
fn review<U: Interaction>(settings: &mut Settings, ui: &mut U) -> Result<(), ResolveError> {
    loop {
        match ui.review(settings)? {
            ReviewAction::Proceed => return Ok(()),
            ReviewAction::Cancel => return Err(ResolveError::Cancelled),
            ReviewAction::ChangeInput => {
                settings.input_path = Some(prompt_input_path(ui)?);
                settings.resolve_paths(None)?;
                ensure_parent_dir(&settings.resolved_output)?;
            }
            ReviewAction::ChangeOutput => {
                let output = prompt_output_path(ui, &settings.resolved_output)?;
                ensure_parent_dir(&output)?;
                settings.output_path = Some(output.clone());
                settings.resolved_output = output;
            }
            ReviewAction::ChangeTheme => settings.theme = ui.select_theme()?,
            ReviewAction::ChangeCssMode => settings.css_mode = ui.select_css_mode()?,
        }
    }
}

/// Remove surrounding whitespace and quotes, as left by drag-and-drop or
/// "copy as path".
pub fn clean_path(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

fn prompt_input_path<U: Interaction>(ui: &mut U) -> Result<PathBuf, ResolveError> {
    loop {
        let raw = ui.ask_input_path()?;
        let path = PathBuf::from(clean_path(&raw));
        if !path.as_os_str().is_empty() && path.is_file() {
            return Ok(path);
        }
        ui.notice(&Notice::InvalidInputPath(raw));
    }
}

fn prompt_output_path<U: Interaction>(ui: &mut U, default: &Path) -> Result<PathBuf, ResolveError> {
    loop {
        let raw = ui.ask_output_path(default)?;
        let cleaned = clean_path(&raw);
        if !cleaned.is_empty() {
            return Ok(PathBuf::from(cleaned));
        }
        ui.notice(&Notice::EmptyOutputPath);
    }
}
