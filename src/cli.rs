// src/cli.rs

use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// Log level written to the log file
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Path-length profile of the target filesystem
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathProfile {
    /// Legacy Windows limit (259 characters)
    Windows,
    /// POSIX `PATH_MAX` (4095 characters)
    Posix,
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
pub struct Cli {
    // --- Account ---
    /// Learn username (falls back to $LEARN_USERNAME, then a prompt)
    #[arg(short, long, help_heading = "Account")]
    pub username: Option<String>,

    // --- Options ---
    /// Courses to mirror, by their number in the course list (e.g. '1,4,5', '2-3', 'all')
    #[arg(short, long, value_name = "SELECTION", help_heading = "Options")]
    pub courses: Option<String>,
    /// Directory the course folders are created in
    #[arg(short, long, value_name = "DIR", help_heading = "Options")]
    pub output: Option<PathBuf>,
    /// Print the courses found on the portal and exit
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub list: bool,
    /// Parse and report everything but write nothing to disk
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub dry_run: bool,
    /// Path-length ceiling applied to every written file
    #[arg(long, value_enum, default_value_t = PathProfile::Windows, help_heading = "Options")]
    pub path_profile: PathProfile,
    /// Portal base URL, overrides the config file
    #[arg(long, value_name = "URL", help_heading = "Options")]
    pub base_url: Option<String>,
    /// Request timeout in seconds, overrides the config file
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64), help_heading = "Options")]
    pub timeout: Option<u64>,

    // --- General ---
    /// Print help and exit
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// Print version and exit
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (hidden) log file verbosity, for debugging
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
