//! Process exit codes.
//!
//! Exit codes are part of the shell contract: scripts running
//! `githubify --yes` branch on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | Cancelled by the user                            |
//! | 2    | Input file not found                             |
//! | 3    | Configuration error (no input, bad output path)  |
//! | 4    | GitHub API or stylesheet download failed         |
//! | -1   | Unexpected error (255 as seen by a Unix shell)   |

pub const SUCCESS: i32 = 0;

pub const USER_CANCELLED: i32 = 1;

/// The input file is missing, at resolution time or when it is read.
pub const INPUT_NOT_FOUND: i32 = 2;

/// No input could be determined, or the output location is unusable.
pub const CONFIG_ERROR: i32 = 3;

/// Rendering request or stylesheet download failed.
pub const NETWORK_ERROR: i32 = 4;

pub const UNEXPECTED_ERROR: i32 = -1;
