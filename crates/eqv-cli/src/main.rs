//! Equipment data visualizer CLI.

use clap::{ColorChoice, Parser};
use eqv_cli::failure::FailureReport;
use eqv_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod output;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Session, run_delete, run_delete_account, run_list, run_login, run_logout, run_register,
    run_report, run_show, run_summary, run_upload, run_whoami,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::debug!(error = ?error, "Command failed");
            FailureReport::from_error(&error).print();
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut session = Session::open(&cli.global)?;
    match cli.command {
        Command::Register(args) => run_register(&session, &args),
        Command::Login(args) => run_login(&mut session, &args),
        Command::Logout => run_logout(&mut session),
        Command::Whoami => run_whoami(&session),
        Command::Upload(args) => run_upload(&session, &args),
        Command::List => run_list(&session),
        Command::Show(args) => run_show(&session, &args),
        Command::Summary(args) => run_summary(&session, &args),
        Command::Report(args) => run_report(&session, &args),
        Command::Delete(args) => run_delete(&session, &args),
        Command::DeleteAccount(args) => run_delete_account(&mut session, &args),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
