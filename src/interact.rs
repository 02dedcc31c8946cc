//! The user-facing side of a session.
//!
//! The resolver and session never touch the terminal directly. Every prompt,
//! confirmation, and message goes through the [`Interaction`] trait, where a
//! prompt is a single blocking call that returns the user's answer.
//! [`Terminal`] is the real implementation; tests use a scripted one.
//!
//! Text for everything shown here comes from [`crate::output`], so the
//! wording can be tested without a terminal.

use crate::output;
use crate::session::SessionError;
use crate::settings::{CssMode, Settings, Theme};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Choice made on the settings review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Proceed,
    ChangeInput,
    ChangeOutput,
    ChangeTheme,
    ChangeCssMode,
    Cancel,
}

/// Choice made after a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    ConvertAnother,
    OpenOutput,
    Exit,
}

/// Informational messages emitted while settings are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    SettingsLoaded(PathBuf),
    SettingsIgnored,
    /// The settings file exists but could not be parsed; carries the reason.
    SettingsCorrupt(String),
    DefaultUsed { setting: &'static str, value: String },
    InvalidInputPath(String),
    EmptyOutputPath,
}

/// Prompts return `io::Result`; a prompt the user aborts (Esc or Ctrl-C in
/// a menu) fails with [`io::ErrorKind::Interrupted`], which callers treat as
/// cancellation.
pub trait Interaction {
    fn welcome(&mut self);

    fn notice(&mut self, notice: &Notice);

    /// Ask whether an existing settings file should be used.
    fn confirm_settings_file(&mut self, path: &Path) -> io::Result<bool>;

    /// Raw answer to "path to the Markdown file"; validated by the caller.
    fn ask_input_path(&mut self) -> io::Result<String>;

    /// Raw answer to "output file path"; an empty answer means `default`.
    fn ask_output_path(&mut self, default: &Path) -> io::Result<String>;

    fn select_theme(&mut self) -> io::Result<Theme>;

    fn select_css_mode(&mut self) -> io::Result<CssMode>;

    /// Show the resolved settings and ask what to do next.
    fn review(&mut self, settings: &Settings) -> io::Result<ReviewAction>;

    fn success(&mut self, output: &Path);

    fn show_error(&mut self, error: &SessionError);

    fn post_action(&mut self) -> io::Result<PostAction>;

    fn confirm_retry(&mut self) -> io::Result<bool>;

    /// Open the generated page in the platform's default viewer.
    fn open_output(&mut self, path: &Path);

    fn farewell(&mut self);
}

/// Interactive terminal backed by stdin/stdout and crossterm key events.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    fn clear(&self) {
        // Not fatal: output still lands below whatever was there.
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        );
    }

    fn read_line(&self, prompt: &str) -> io::Result<String> {
        print!("{} ", prompt.green());
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn confirm(&self, question: &str) -> io::Result<bool> {
        loop {
            let answer = self.read_line(&format!("{question} [y/n]"))?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("{}", "Please answer y or n.".red()),
            }
        }
    }

    /// Numbered menu answered with a single key press. Esc (or Ctrl-C)
    /// fails with [`io::ErrorKind::Interrupted`].
    fn select<T: Copy>(&self, title: &str, choices: &[(T, String)]) -> io::Result<T> {
        println!("{}", title.green());
        for (i, (_, label)) in choices.iter().enumerate() {
            println!("  {} {}", format!("{}.", i + 1).cyan(), label);
        }
        loop {
            match menu_key(read_key()?, choices.len()) {
                MenuKey::Pick(i) => {
                    let (value, label) = &choices[i];
                    println!("{}", format!(">> {label}").cyan());
                    return Ok(*value);
                }
                MenuKey::Abort => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "menu aborted"));
                }
                MenuKey::Invalid => {
                    println!("{}", format!(">> Press 1-{} or Esc", choices.len()).red())
                }
            }
        }
    }
}

/// Meaning of a key press in a numbered menu.
#[derive(Debug, PartialEq, Eq)]
enum MenuKey {
    /// Zero-based index of the chosen entry.
    Pick(usize),
    Abort,
    Invalid,
}

fn menu_key(code: KeyCode, len: usize) -> MenuKey {
    match code {
        KeyCode::Esc => MenuKey::Abort,
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(d) if d >= 1 && (d as usize) <= len => MenuKey::Pick(d as usize - 1),
            _ => MenuKey::Invalid,
        },
        _ => MenuKey::Invalid,
    }
}

/// Block until a key is pressed. Ctrl-C is reported as Esc because raw mode
/// swallows the signal.
fn read_key() -> io::Result<KeyCode> {
    terminal::enable_raw_mode()?;
    let key = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break Ok(KeyCode::Esc);
                }
                break Ok(key.code);
            }
            Ok(_) => continue,
            Err(e) => break Err(e),
        }
    };
    terminal::disable_raw_mode()?;
    key
}

impl Interaction for Terminal {
    fn welcome(&mut self) {
        self.clear();
        for line in output::format_banner() {
            println!("{}", line.cyan());
        }
        println!();
    }

    fn notice(&mut self, notice: &Notice) {
        let line = output::format_notice(notice);
        match notice {
            Notice::SettingsLoaded(_) => println!("{}", line.green()),
            Notice::SettingsCorrupt(_) | Notice::InvalidInputPath(_) | Notice::EmptyOutputPath => {
                eprintln!("{}", line.red())
            }
            Notice::SettingsIgnored => println!("{}", line.yellow()),
            Notice::DefaultUsed { .. } => eprintln!("{}", line.dark_grey()),
        }
    }

    fn confirm_settings_file(&mut self, path: &Path) -> io::Result<bool> {
        self.confirm(&format!(
            "Configuration file '{}' found. Use settings from this file?",
            path.display()
        ))
    }

    fn ask_input_path(&mut self) -> io::Result<String> {
        self.read_line("Enter the path to the Markdown file (.md):")
    }

    fn ask_output_path(&mut self, default: &Path) -> io::Result<String> {
        let answer = self.read_line(&format!(
            "Enter the output file path [{}]:",
            default.display()
        ))?;
        if answer.trim().is_empty() {
            return Ok(default.display().to_string());
        }
        Ok(answer)
    }

    fn select_theme(&mut self) -> io::Result<Theme> {
        let choices: Vec<_> = Theme::ALL.iter().map(|t| (*t, t.to_string())).collect();
        self.select("Select the theme:", &choices)
    }

    fn select_css_mode(&mut self) -> io::Result<CssMode> {
        let choices: Vec<_> = CssMode::ALL
            .iter()
            .map(|m| (*m, m.description().to_string()))
            .collect();
        self.select("How to include GitHub CSS?", &choices)
    }

    fn review(&mut self, settings: &Settings) -> io::Result<ReviewAction> {
        self.clear();
        for line in output::format_settings_summary(settings) {
            println!("{line}");
        }
        println!();
        for line in output::format_review_help() {
            println!("{}", line.dark_grey());
        }

        let action = loop {
            let action = match read_key()? {
                KeyCode::Char('1') => ReviewAction::ChangeInput,
                KeyCode::Char('2') => ReviewAction::ChangeOutput,
                KeyCode::Char('3') => ReviewAction::ChangeTheme,
                KeyCode::Char('4') => ReviewAction::ChangeCssMode,
                KeyCode::Enter => ReviewAction::Proceed,
                KeyCode::Esc => ReviewAction::Cancel,
                _ => {
                    println!("{}", ">> Invalid key! Please use 1-4, Enter, or Esc".red());
                    continue;
                }
            };
            break action;
        };
        if let Some(feedback) = output::format_review_feedback(action) {
            println!("\n{}\n", feedback.cyan());
        }
        Ok(action)
    }

    fn success(&mut self, output: &Path) {
        println!("{}", output::format_success(output).green().bold());
        println!();
    }

    fn show_error(&mut self, error: &SessionError) {
        for line in output::format_error(error) {
            eprintln!("{}", line.red());
        }
    }

    fn post_action(&mut self) -> io::Result<PostAction> {
        let choices = [
            (PostAction::Exit, "Exit application".to_string()),
            (PostAction::ConvertAnother, "Convert another file".to_string()),
            (PostAction::OpenOutput, "Open output file".to_string()),
        ];
        self.select(">> Choose your next action:", &choices)
    }

    fn confirm_retry(&mut self) -> io::Result<bool> {
        self.confirm("Would you like to try again?")
    }

    fn open_output(&mut self, path: &Path) {
        println!(
            "{}",
            format!("Opening {} in your default browser...", path.display()).green()
        );
        if let Err(e) = open::that(path) {
            log::warn!("failed to open {}: {e}", path.display());
            println!("{}", format!("Could not open file automatically: {e}").yellow());
            println!("{}", format!("You can manually open: {}", path.display()).dark_grey());
        }
    }

    fn farewell(&mut self) {
        println!();
        for line in output::format_farewell() {
            println!("{}", line.cyan());
        }
        println!();
    }
}
