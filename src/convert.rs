//! The conversion pipeline.
//!
//! Takes resolved [`Settings`] and produces the HTML file in five stages:
//!
//! ```text
//! 1. Read       input .md                      (InputNotFound if it vanished)
//! 2. Stylesheet gateway.fetch_stylesheet       (Embed mode only)
//! 3. Render     gateway.render_markdown
//! 4. Assemble   assemble::assemble             (title = input file stem)
//! 5. Write      output .html                   (overwrites)
//! ```
//!
//! Any failure aborts the remaining stages and nothing is retried. Writing
//! is the last stage, so a failed conversion never leaves a partial output
//! file behind.
//!
//! ## Progress
//!
//! Callers may pass a channel sender; a [`ConvertEvent`] is sent as each
//! stage starts. The session drains it on a printer thread, which keeps this
//! module free of any terminal code.

use crate::assemble::{self, AssembleError};
use crate::gateway::{GatewayError, RenderGateway};
use crate::settings::{CssMode, Settings, Theme};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Settings must be resolved before converting")]
    InvalidSettings,
    #[error("Input Markdown file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Stage progress, sent before each stage starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertEvent {
    Reading(PathBuf),
    FetchingStylesheet(Theme),
    Rendering,
    Assembling,
    Writing(PathBuf),
    Finished(PathBuf),
}

/// Run the pipeline and return the path of the written file.
pub fn convert<G: RenderGateway + ?Sized>(
    settings: &Settings,
    gateway: &G,
    events: Option<Sender<ConvertEvent>>,
) -> Result<PathBuf, ConvertError> {
    if !settings.is_valid() {
        let unresolved = settings.resolved_input.as_os_str().is_empty()
            || settings.resolved_output.as_os_str().is_empty();
        return Err(if unresolved {
            ConvertError::InvalidSettings
        } else {
            ConvertError::InputNotFound(settings.resolved_input.clone())
        });
    }
    let emit = |event: ConvertEvent| {
        if let Some(tx) = &events {
            // A closed receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    };
    let input = &settings.resolved_input;
    let output = &settings.resolved_output;

    emit(ConvertEvent::Reading(input.clone()));
    let markdown = fs::read_to_string(input).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConvertError::InputNotFound(input.clone()),
        _ => ConvertError::Read {
            path: input.clone(),
            source,
        },
    })?;
    log::debug!("read {} bytes from {}", markdown.len(), input.display());

    let css = match settings.css_mode {
        CssMode::Embed => {
            emit(ConvertEvent::FetchingStylesheet(settings.theme));
            Some(gateway.fetch_stylesheet(settings.theme)?)
        }
        CssMode::Cdn => None,
    };

    emit(ConvertEvent::Rendering);
    let fragment = gateway.render_markdown(&markdown)?;

    emit(ConvertEvent::Assembling);
    let document = assemble::assemble(
        &settings.title(),
        &fragment,
        settings.theme,
        settings.css_mode,
        css.as_deref(),
    )?;

    emit(ConvertEvent::Writing(output.clone()));
    fs::write(output, document).map_err(|source| ConvertError::Write {
        path: output.clone(),
        source,
    })?;

    log::info!("wrote {}", output.display());
    emit(ConvertEvent::Finished(output.clone()));
    Ok(output.clone())
}
