//! # GitHubify
//!
//! Turns a Markdown file into a standalone, GitHub-styled HTML page. The
//! Markdown itself is rendered by GitHub's Markdown API, so the page looks
//! exactly like a README on github.com; this crate decides *what* to convert
//! and *how* the result is packaged.
//!
//! # Architecture: Resolve, Then Convert
//!
//! ```text
//! 1. Resolve   CLI flags + config.json + prompts  →  Settings
//! 2. Convert   Settings  →  read → [fetch CSS] → render → assemble → write
//! ```
//!
//! The session runs these once (`--yes`) or in a loop with a review screen,
//! retry on failure, and a "convert another" menu.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`settings`] | `Settings`, `Theme`, `CssMode`; path resolution and validity |
//! | [`store`] | Reads the optional `config.json` settings file |
//! | [`resolve`] | Merges flags, settings file, and prompts in fixed precedence |
//! | [`gateway`] | `RenderGateway` trait and the GitHub/cdnjs implementation |
//! | [`assemble`] | Pure HTML document assembly with Maud |
//! | [`convert`] | The five-stage conversion pipeline |
//! | [`session`] | Single-shot and interactive loop control, exit codes |
//! | [`interact`] | `Interaction` trait and the crossterm `Terminal` |
//! | [`output`] | Pure message formatting for everything the user sees |
//! | [`exit_codes`] | Process exit code registry |
//!
//! # Design Decisions
//!
//! ## Rendering Is Remote
//!
//! There is no local Markdown parser. GitHub's renderer is the reference for
//! "GitHub-flavored", and matching it locally (task lists, alerts, emoji,
//! heading anchors) is a moving target. The cost is that conversion needs a
//! network connection.
//!
//! ## Seams Instead of Singletons
//!
//! The HTTP client lives inside a [`gateway::GithubGateway`] built once in
//! `main` and passed down by reference, and every prompt goes through the
//! [`interact::Interaction`] trait. Resolution, conversion and the session
//! loop are tested end to end with in-memory doubles for both.
//!
//! ## Nothing Is Written Back
//!
//! `config.json` is read-only from the tool's point of view. Settings chosen
//! at the prompts last for one conversion only.

pub mod assemble;
pub mod convert;
pub mod exit_codes;
pub mod gateway;
pub mod interact;
pub mod output;
pub mod resolve;
pub mod session;
pub mod settings;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
