//! Shared test utilities for the githubify test suite.
//!
//! Provides temp-dir fixtures and [`ScriptedInteraction`], an
//! [`Interaction`] that answers prompts from a queue and records everything
//! it was asked to show.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let input = write_markdown(tmp.path(), "notes.md", "# Hi");
//! let mut ui = ScriptedInteraction::new(vec![
//!     Answer::Theme(Theme::Dark),
//!     Answer::Review(ReviewAction::Proceed),
//! ]);
//! // ... drive resolve/session with &mut ui ...
//! ui.assert_exhausted();
//! ```

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use crate::interact::{Interaction, Notice, PostAction, ReviewAction};
use crate::session::SessionError;
use crate::settings::{CssMode, Settings, Theme};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a Markdown file into `dir` and return its path.
pub fn write_markdown(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Settings already resolved for `input`, with the default `.html` output.
pub fn resolved_settings(input: &Path, theme: Theme, css_mode: CssMode) -> Settings {
    let mut settings = Settings {
        theme,
        css_mode,
        ..Settings::default()
    };
    settings.resolve_paths(Some(input)).unwrap();
    settings
}

// =========================================================================
// Scripted interaction
// =========================================================================

/// One queued answer. Each prompt pops the front of the queue and panics if
/// it finds an answer of the wrong kind.
#[derive(Debug, Clone)]
pub enum Answer {
    /// Settings-file or retry confirmation.
    Confirm(bool),
    /// Input or output path prompt.
    Text(String),
    Theme(Theme),
    CssMode(CssMode),
    Review(ReviewAction),
    Post(PostAction),
    /// Esc or Ctrl-C at whatever prompt comes next.
    Interrupt,
}

/// Things shown to the user, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Welcome,
    Notice(Notice),
    Success(PathBuf),
    /// Exit code and message of the reported error.
    Error(i32, String),
    Opened(PathBuf),
    Farewell,
}

#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    pub answers: VecDeque<Answer>,
    pub shown: Vec<Shown>,
    /// Settings as they were each time the review screen was shown.
    pub reviewed: Vec<Settings>,
}

impl ScriptedInteraction {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    /// Panics if any scripted answer was left unused.
    pub fn assert_exhausted(&self) {
        assert!(
            self.answers.is_empty(),
            "unused scripted answers: {:?}",
            self.answers
        );
    }

    /// Pop the next answer; an empty queue behaves like a closed terminal.
    fn next(&mut self, prompt: &str) -> io::Result<Answer> {
        match self.answers.pop_front() {
            Some(Answer::Interrupt) => Err(io::Error::new(
                io::ErrorKind::Interrupted,
                format!("interrupted at {prompt}"),
            )),
            Some(answer) => Ok(answer),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("script exhausted at {prompt}"),
            )),
        }
    }
}

macro_rules! expect_answer {
    ($self:ident, $prompt:literal, $variant:ident) => {
        match $self.next($prompt)? {
            Answer::$variant(value) => Ok(value),
            other => panic!("{} expected Answer::{}, got {other:?}", $prompt, stringify!($variant)),
        }
    };
}

impl Interaction for ScriptedInteraction {
    fn welcome(&mut self) {
        self.shown.push(Shown::Welcome);
    }

    fn notice(&mut self, notice: &Notice) {
        self.shown.push(Shown::Notice(notice.clone()));
    }

    fn confirm_settings_file(&mut self, _path: &Path) -> io::Result<bool> {
        expect_answer!(self, "confirm_settings_file", Confirm)
    }

    fn ask_input_path(&mut self) -> io::Result<String> {
        expect_answer!(self, "ask_input_path", Text)
    }

    fn ask_output_path(&mut self, _default: &Path) -> io::Result<String> {
        expect_answer!(self, "ask_output_path", Text)
    }

    fn select_theme(&mut self) -> io::Result<Theme> {
        expect_answer!(self, "select_theme", Theme)
    }

    fn select_css_mode(&mut self) -> io::Result<CssMode> {
        expect_answer!(self, "select_css_mode", CssMode)
    }

    fn review(&mut self, settings: &Settings) -> io::Result<ReviewAction> {
        self.reviewed.push(settings.clone());
        expect_answer!(self, "review", Review)
    }

    fn success(&mut self, output: &Path) {
        self.shown.push(Shown::Success(output.to_path_buf()));
    }

    fn show_error(&mut self, error: &SessionError) {
        self.shown
            .push(Shown::Error(error.exit_code(), error.to_string()));
    }

    fn post_action(&mut self) -> io::Result<PostAction> {
        expect_answer!(self, "post_action", Post)
    }

    fn confirm_retry(&mut self) -> io::Result<bool> {
        expect_answer!(self, "confirm_retry", Confirm)
    }

    fn open_output(&mut self, path: &Path) {
        self.shown.push(Shown::Opened(path.to_path_buf()));
    }

    fn farewell(&mut self) {
        self.shown.push(Shown::Farewell);
    }
}
