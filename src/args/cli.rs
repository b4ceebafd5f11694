use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_URL};
use super::parsers::{
    parse_bool_env, parse_count, parse_header, parse_interval_secs, parse_timeout_secs,
};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Continuously poll a REST endpoint and print each response's status, latency, and body."
)]
pub struct PollArgs {
    /// Endpoint to query
    #[arg(long, short, env = "RESTPOLL_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Delay between requests in seconds. Set to 0 to run back-to-back
    #[arg(
        long,
        short = 'i',
        env = "RESTPOLL_INTERVAL",
        value_name = "SECONDS",
        default_value = DEFAULT_INTERVAL,
        value_parser = parse_interval_secs
    )]
    pub interval: Duration,

    /// Per-request timeout in seconds
    #[arg(
        long,
        short = 't',
        env = "RESTPOLL_TIMEOUT",
        value_name = "SECONDS",
        default_value = DEFAULT_TIMEOUT,
        value_parser = parse_timeout_secs
    )]
    pub timeout: Duration,

    /// Stop after N requests. Leave at 0 to keep running until Ctrl+C
    #[arg(
        long,
        short = 'n',
        env = "RESTPOLL_COUNT",
        value_name = "N",
        default_value = "0",
        value_parser = parse_count
    )]
    pub count: u64,

    /// Extra HTTP header in NAME=VALUE format (repeatable)
    #[arg(long = "header", short = 'H', value_name = "NAME=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Skip TLS certificate verification (useful for local HTTPS)
    #[arg(long, short = 'k', env = "RESTPOLL_INSECURE", value_parser = parse_bool_env)]
    pub insecure: bool,

    /// Print raw text bodies instead of attempting to parse JSON
    #[arg(long, env = "RESTPOLL_RAW", value_parser = parse_bool_env)]
    pub raw: bool,

    /// Path to config file (TOML or JSON)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color in log output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
