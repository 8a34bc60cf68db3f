//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "eqv",
    version,
    about = "Equipment data visualizer - upload CSV files and analyse equipment parameters",
    long_about = "Upload equipment CSV files, detect name, category and numeric columns,\n\
                  and inspect summary statistics or export PDF reports.\n\n\
                  Each account keeps its five most recent uploads."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Options shared by every command.
#[derive(Args)]
pub struct GlobalArgs {
    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", env = "EQV_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Store file, overriding the configured one.
    #[arg(long = "store", value_name = "PATH", env = "EQV_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Act as this user instead of the logged-in one.
    ///
    /// No password is asked for: anyone who can read the store file can
    /// act as any of its accounts, so `login` only picks a default user.
    /// Commands that delete an account still require its password.
    #[arg(long = "user", value_name = "USERNAME", global = true)]
    pub user: Option<String>,

    /// Print JSON documents instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account.
    Register(RegisterArgs),

    /// Check credentials and remember the user for later commands.
    Login(LoginArgs),

    /// Forget the remembered user.
    Logout,

    /// Show the current user.
    Whoami,

    /// Upload and analyse a CSV file.
    Upload(UploadArgs),

    /// List your most recent datasets.
    List,

    /// Show a dataset with all equipment rows.
    Show(DatasetArgs),

    /// Show summary statistics of a dataset.
    Summary(DatasetArgs),

    /// Export a PDF report of a dataset.
    Report(ReportArgs),

    /// Delete a dataset.
    Delete(DatasetArgs),

    /// Delete your account and all of its datasets.
    DeleteAccount(PasswordArgs),
}

#[derive(Args)]
pub struct RegisterArgs {
    /// 3-20 letters, digits or underscores.
    #[arg(value_name = "USERNAME")]
    pub username: String,

    #[arg(value_name = "EMAIL")]
    pub email: String,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Username or email address.
    #[arg(value_name = "LOGIN")]
    pub login: String,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(Args)]
pub struct PasswordArgs {
    /// Account password.
    #[arg(long = "password", env = "EQV_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct UploadArgs {
    /// CSV file to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset id (see `eqv list`).
    #[arg(value_name = "ID")]
    pub id: u64,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Dataset id (see `eqv list`).
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Output path (default: <dataset name>_complete_report.pdf).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
