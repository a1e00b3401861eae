//! CLI argument definitions for the Cardio Risk client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cardio_cli::form::parse_field_arg;
use cardio_client::ApiEnvironment;

#[derive(Parser)]
#[command(
    name = "cardio",
    version,
    about = "Cardio Risk - heart disease risk prediction client",
    long_about = "Capture 13 clinical measurements, request a heart disease risk\n\
                  prediction, render the result and print a report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow patient values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit one patient record and render the prediction.
    Predict(PredictArgs),

    /// List the form fields and their allowed values.
    Fields,

    /// Show the resolved configuration.
    Config,
}

#[derive(Parser)]
pub struct PredictArgs {
    /// TOML file with one `key = value` entry per field.
    #[arg(long = "form", value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// Field value, overriding the form file (repeatable).
    #[arg(
        short = 'f',
        long = "field",
        value_name = "NAME=VALUE",
        value_parser = parse_field_arg
    )]
    pub fields: Vec<(String, String)>,

    /// Predictor environment.
    #[arg(long = "env", value_enum)]
    pub env: Option<EnvironmentArg>,

    /// Explicit predictor base URL (overrides --env).
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory for the chart and report.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Generate and print the report after a successful prediction.
    #[arg(long = "report")]
    pub report: bool,

    /// Write the report without opening it.
    #[arg(long = "no-open")]
    pub no_open: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EnvironmentArg {
    Local,
    Deployed,
}

impl From<EnvironmentArg> for ApiEnvironment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Local => Self::Local,
            EnvironmentArg::Deployed => Self::Deployed,
        }
    }
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
