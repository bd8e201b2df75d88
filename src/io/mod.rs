//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Go package discovery and loading
//! - JSON output with a configurable indent
//! - Consistent exit codes

pub mod exit_code;
pub mod load;
pub mod output;
pub mod run;

pub use exit_code::ExitCode;
pub use load::{Target, go_files, load_dir, resolve};
pub use output::{to_json_string, write_json};
pub use run::Runner;
