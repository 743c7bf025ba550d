//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's
//! derive macros. It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Loghound -- log collection and investigation toolkit.
///
/// Use `loghound <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "loghound", version, about, long_about = None)]
pub struct Cli {
    /// Path to the loghound.toml configuration file.
    #[arg(short, long, default_value = "loghound.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and schema if they do not exist.
    InitDb,

    /// Ingest a log file into the store.
    Ingest(IngestArgs),

    /// Show the most recent records.
    Last(LastArgs),

    /// Show global counts and level distribution.
    Stats,

    /// Query records with filters.
    Filter(FilterArgs),

    /// Rank the most frequent messages.
    Top(TopArgs),
}

// ---- ingest ----

/// Ingest a log file into the store.
#[derive(Args, Debug)]
pub struct IngestArgs {
    #[command(subcommand)]
    pub source: IngestSource,
}

#[derive(Subcommand, Debug)]
pub enum IngestSource {
    /// Ingest a BSD syslog file (e.g. /var/log/messages).
    Syslog {
        /// Path to the log file.
        path: PathBuf,

        /// Host alias for lines without a host field.
        #[arg(long)]
        host: Option<String>,
    },
    /// Ingest a zabbix_server.log file.
    ZabbixServer {
        /// Path to the log file.
        path: PathBuf,

        /// Host alias (default: zabbix-server).
        #[arg(long)]
        host: Option<String>,
    },
    /// Ingest a zabbix_proxy.log file.
    ZabbixProxy {
        /// Path to the log file.
        path: PathBuf,

        /// Host alias (default: zabbix-proxy).
        #[arg(long)]
        host: Option<String>,
    },
    /// Ingest an arbitrary uploaded text log (sniffed first).
    Upload {
        /// Path to the log file.
        path: PathBuf,

        /// Host alias for all records from this file.
        #[arg(long)]
        host: Option<String>,
    },
}

// ---- last ----

/// Show the most recent records.
#[derive(Args, Debug)]
pub struct LastArgs {
    /// Number of records to show.
    #[arg(short = 'n', long = "count", default_value_t = 20)]
    pub count: u32,
}

// ---- shared filter options ----

/// Filter options shared by `filter` and `top`.
#[derive(Args, Debug, Default)]
pub struct FilterOpts {
    /// Exact level match (e.g. ERROR, WARNING).
    #[arg(short = 'l', long)]
    pub level: Option<String>,

    /// Message substring match.
    #[arg(short = 'c', long)]
    pub contains: Option<String>,

    /// Exact host match.
    #[arg(long)]
    pub host: Option<String>,

    /// Exact source tag match (e.g. syslog, zabbix_server).
    #[arg(long)]
    pub source: Option<String>,

    /// Inclusive lower timestamp bound (YYYY-MM-DD HH:MM:SS).
    #[arg(long)]
    pub since: Option<String>,

    /// Inclusive upper timestamp bound (YYYY-MM-DD HH:MM:SS).
    #[arg(long)]
    pub until: Option<String>,

    /// Named filter preset (email, network, proxy, agent, db).
    #[arg(long)]
    pub preset: Option<String>,
}

// ---- filter ----

/// Query records with filters.
#[derive(Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub opts: FilterOpts,

    /// Maximum number of rows.
    #[arg(short = 'n', long = "count", default_value_t = 50)]
    pub count: u32,

    /// Sort oldest-first instead of newest-first.
    #[arg(long)]
    pub asc: bool,

    /// Show per-host counts instead of rows.
    #[arg(long)]
    pub distinct_hosts: bool,
}

// ---- top ----

/// Rank the most frequent messages (level defaults to ERROR).
#[derive(Args, Debug)]
pub struct TopArgs {
    #[command(flatten)]
    pub opts: FilterOpts,

    /// Maximum number of messages.
    #[arg(short = 'n', long = "count", default_value_t = 10)]
    pub count: u32,
}
