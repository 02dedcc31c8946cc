//! Session control: one conversion, or a loop of them.
//!
//! ```text
//! single-shot (--yes)   resolve → convert → report → exit code
//!
//! interactive           ┌─────────────────────────────────────────┐
//!                       │ resolve → convert → report success      │
//!                       │   ConvertAnother → clear overrides ─────┤
//!                       │   OpenOutput     → open file, exit 0    │
//!                       │   Exit           → farewell, exit 0     │
//!                       │ on error: show it, offer retry          │
//!                       │   yes → clear overrides ────────────────┤
//!                       │   no  → farewell, error's exit code     │
//!                       └─────────────────────────────────────────┘
//! ```
//!
//! The settings file is read once, before the first iteration, and the same
//! record seeds every iteration after it. Command-line overrides only apply
//! to the first iteration; every later one (another file, or a retry)
//! prompts again for whatever the settings file does not supply.
//! Cancelling (Esc at the review screen, Esc or Ctrl-C in a menu) ends the
//! session without an error report.
//!
//! This is the only place errors become exit codes; see
//! [`SessionError::exit_code`].

use crate::convert::{self, ConvertError};
use crate::exit_codes;
use crate::gateway::{GatewayError, RenderGateway};
use crate::interact::{Interaction, PostAction};
use crate::output;
use crate::resolve::{self, Overrides, ResolveError};
use crate::settings::SettingsError;
use crate::store::PersistedSettings;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Terminal interaction failed: {0}")]
    Interaction(#[source] io::Error),
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        match ResolveError::from(e) {
            ResolveError::Interaction(e) => SessionError::Interaction(e),
            other => SessionError::Resolve(other),
        }
    }
}

impl SessionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Resolve(ResolveError::Cancelled))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            SessionError::Resolve(ResolveError::Cancelled) => exit_codes::USER_CANCELLED,
            SessionError::Resolve(ResolveError::Settings(SettingsError::InputNotFound(_)))
            | SessionError::Convert(ConvertError::InputNotFound(_)) => exit_codes::INPUT_NOT_FOUND,
            SessionError::Resolve(ResolveError::Settings(SettingsError::MissingInput))
            | SessionError::Resolve(ResolveError::OutputDir { .. }) => exit_codes::CONFIG_ERROR,
            SessionError::Convert(ConvertError::Gateway(_)) => exit_codes::NETWORK_ERROR,
            SessionError::Resolve(ResolveError::Interaction(_))
            | SessionError::Convert(ConvertError::InvalidSettings)
            | SessionError::Convert(ConvertError::Read { .. })
            | SessionError::Convert(ConvertError::Assemble(_))
            | SessionError::Convert(ConvertError::Write { .. })
            | SessionError::Interaction(_) => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

impl From<GatewayError> for SessionError {
    fn from(e: GatewayError) -> Self {
        SessionError::Convert(ConvertError::Gateway(e))
    }
}

/// How the session should run.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub overrides: Overrides,
    pub settings_file: PathBuf,
    /// `false` for `--yes`: no prompts, no loop.
    pub interactive: bool,
}

/// Run a session to completion and return the process exit code.
pub fn run<G, U>(options: SessionOptions, gateway: &G, ui: &mut U) -> i32
where
    G: RenderGateway + ?Sized,
    U: Interaction,
{
    if options.interactive {
        ui.welcome();
    }
    let persisted =
        match resolve::load_settings_file(&options.settings_file, options.interactive, ui) {
            Ok(persisted) => persisted,
            Err(e) => {
                let e = SessionError::from(e);
                if e.is_cancelled() {
                    ui.farewell();
                } else {
                    ui.show_error(&e);
                }
                return e.exit_code();
            }
        };

    if options.interactive {
        run_interactive(&options, persisted.as_ref(), gateway, ui)
    } else {
        run_single(&options, persisted.as_ref(), gateway, ui)
    }
}

fn run_single<G, U>(
    options: &SessionOptions,
    persisted: Option<&PersistedSettings>,
    gateway: &G,
    ui: &mut U,
) -> i32
where
    G: RenderGateway + ?Sized,
    U: Interaction,
{
    match convert_once(&options.overrides, persisted, false, gateway, ui) {
        Ok(output) => {
            ui.success(&output);
            exit_codes::SUCCESS
        }
        Err(e) => {
            log::debug!("conversion failed: {e:?}");
            ui.show_error(&e);
            e.exit_code()
        }
    }
}

fn run_interactive<G, U>(
    options: &SessionOptions,
    persisted: Option<&PersistedSettings>,
    gateway: &G,
    ui: &mut U,
) -> i32
where
    G: RenderGateway + ?Sized,
    U: Interaction,
{
    let mut overrides = options.overrides.clone();
    let mut first = true;
    loop {
        if !std::mem::take(&mut first) {
            ui.welcome();
        }
        let failure = match convert_once(&overrides, persisted, true, gateway, ui) {
            Ok(output) => {
                ui.success(&output);
                match ui.post_action() {
                    Ok(PostAction::ConvertAnother) => {
                        overrides = Overrides::default();
                        continue;
                    }
                    Ok(PostAction::OpenOutput) => {
                        ui.open_output(&output);
                        return exit_codes::SUCCESS;
                    }
                    Ok(PostAction::Exit) => {
                        ui.farewell();
                        return exit_codes::SUCCESS;
                    }
                    Err(e) => SessionError::from(e),
                }
            }
            Err(e) => e,
        };

        if failure.is_cancelled() {
            ui.farewell();
            return exit_codes::USER_CANCELLED;
        }

        log::debug!("conversion failed: {failure:?}");
        ui.show_error(&failure);
        match ui.confirm_retry() {
            Ok(true) => overrides = Overrides::default(),
            Ok(false) | Err(_) => {
                ui.farewell();
                return failure.exit_code();
            }
        }
    }
}

/// Resolve settings and run one conversion. In interactive mode stage
/// progress is printed from a separate thread while the pipeline runs.
fn convert_once<G, U>(
    overrides: &Overrides,
    persisted: Option<&PersistedSettings>,
    interactive: bool,
    gateway: &G,
    ui: &mut U,
) -> Result<PathBuf, SessionError>
where
    G: RenderGateway + ?Sized,
    U: Interaction,
{
    let settings = resolve::resolve(overrides, persisted, interactive, ui)?;

    if !interactive {
        return Ok(convert::convert(&settings, gateway, None)?);
    }

    let (tx, rx) = mpsc::channel();
    let printer = thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    let result = convert::convert(&settings, gateway, Some(tx));
    // The sender is gone once convert returns, so the printer finishes.
    finish_printer(printer);
    Ok(result?)
}

/// Join the progress printer. A panic there (stdout closed, say) loses
/// progress lines but not the conversion, so it is logged and reported as
/// `false`.
fn finish_printer(printer: thread::JoinHandle<()>) -> bool {
    match printer.join() {
        Ok(()) => true,
        Err(_) => {
            log::warn!("progress printer thread panicked; some progress output was lost");
            false
        }
    }
}
