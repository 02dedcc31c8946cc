use clap::Parser;
use githubify::gateway::GithubGateway;
use githubify::interact::{Interaction, Terminal};
use githubify::resolve::Overrides;
use githubify::session::{self, SessionError, SessionOptions};
use githubify::settings::{CssMode, Theme};
use githubify::store::DEFAULT_SETTINGS_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "githubify")]
#[command(about = "Converts a Markdown file to a GitHub-styled HTML page.")]
#[command(long_about = "\
Converts a Markdown file to a GitHub-styled HTML page.

The Markdown is rendered by GitHub's Markdown API and wrapped in a standalone
HTML page using the github-markdown-css theme.

Settings are taken from, in order of priority:
  1. command-line flags
  2. config.json in the current directory (input_file, theme, css_mode, output_file)
  3. interactive prompts (skipped with --yes)

Exit codes:
  0 success, 1 cancelled, 2 input file not found, 3 configuration error,
  4 GitHub API / network error, 255 unexpected error")]
#[command(version = env!("GITHUBIFY_VERSION"))]
struct Cli {
    /// Path to the input Markdown (.md) file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Color theme (Light/Dark, case-insensitive)
    #[arg(long)]
    theme: Option<Theme>,

    /// CSS delivery method (CDN/Embed)
    #[arg(long)]
    css_mode: Option<CssMode>,

    /// Path for the output HTML file (defaults to <input_name>.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip interactive prompts and use defaults or provided options
    #[arg(short, long)]
    yes: bool,

    /// Settings file to read
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let options = SessionOptions {
        overrides: Overrides {
            input: cli.input,
            theme: cli.theme,
            css_mode: cli.css_mode,
            output: cli.output,
        },
        settings_file: cli.config,
        interactive: !cli.yes,
    };

    let mut terminal = Terminal::new();
    let code = match GithubGateway::new() {
        Ok(gateway) => session::run(options, &gateway, &mut terminal),
        Err(e) => {
            let error = SessionError::from(e);
            terminal.show_error(&error);
            error.exit_code()
        }
    };
    std::process::exit(code);
}
