//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qaaws_cli::settings::{ConnectionOverrides, parse_param};

#[derive(Parser)]
#[command(
    name = "qaaws",
    version,
    about = "Query a QaaWS report service and print the result as a table",
    long_about = "Query a published QaaWS (Query as a Web Service) report service.\n\n\
                  Runs the default query, a named SOAP action, or a list-of-values\n\
                  lookup, and prints the rows as JSON or as a text table."
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
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML file with connection settings.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection settings; each overrides the config file.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Service endpoint URL.
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Identifier of the published query.
    #[arg(long, global = true)]
    pub cuid: Option<String>,

    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Session token to send instead of a username and password.
    #[arg(long = "serialized-session", value_name = "TOKEN", global = true)]
    pub serialized_session: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            endpoint: self.endpoint.clone(),
            cuid: self.cuid.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            serialized_session: self.serialized_session.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a query and print its rows.
    Request(RequestArgs),

    /// List the operations the service exposes.
    Operations,
}

#[derive(Parser)]
pub struct RequestArgs {
    /// Look up the values of a prompt list (calls `values_of_<NAME>`).
    #[arg(long, value_name = "NAME", conflicts_with = "soap_action")]
    pub lov: Option<String>,

    /// Call this SOAP action instead of the default query.
    #[arg(long = "soap-action", value_name = "NAME")]
    pub soap_action: Option<String>,

    /// Query parameter; repeat for several. Separate multiple values with `;`.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// How to print the rows.
    #[arg(long = "output", value_enum, default_value = "json")]
    pub output: OutputArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// Compact JSON array.
    Json,
    /// Indented JSON array.
    Pretty,
    /// Text table.
    Table,
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
