//! Global options shared by every subcommand: where the API lives, where the
//! session token is kept, request timeout and output format.

use crate::{
    api::{
        config::{DEFAULT_API_BASE_URL, ENV_API_BASE_URL},
        storage::ENV_TOKEN_FILE,
    },
    cli::globals::GlobalArgs,
    components::table::OutputFormat,
};
use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::path::PathBuf;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_TOKEN_FILE: &str = "token-file";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_OUTPUT: &str = "output";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("SmartClaim API base URL")
                .env(ENV_API_BASE_URL)
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_FILE)
                .long(ARG_TOKEN_FILE)
                .help("Session token file (default: platform config dir)")
                .env(ENV_TOKEN_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("SMARTCLAIM_TIMEOUT")
                .default_value("30")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_OUTPUT)
                .short('o')
                .long(ARG_OUTPUT)
                .help("Output format")
                .env("SMARTCLAIM_OUTPUT")
                .value_parser(["table", "json"])
                .default_value("table")
                .global(true),
        )
}

/// Reads the global options.
///
/// # Errors
/// Returns an error if a value is missing or malformed.
pub fn parse(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_base_url = matches
        .get_one::<String>(ARG_API_BASE_URL)
        .cloned()
        .context("missing required argument: --api-base-url")?;
    let token_file = matches.get_one::<PathBuf>(ARG_TOKEN_FILE).cloned();
    let timeout_secs = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(30);
    let output = matches
        .get_one::<String>(ARG_OUTPUT)
        .map_or(Ok(OutputFormat::Table), |value| value.parse::<OutputFormat>())?;

    Ok(GlobalArgs {
        api_base_url,
        token_file,
        timeout_secs,
        output,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        temp_env::with_vars(
            [
                (ENV_API_BASE_URL, None::<&str>),
                (ENV_TOKEN_FILE, None),
                ("SMARTCLAIM_TIMEOUT", None),
                ("SMARTCLAIM_OUTPUT", None),
            ],
            || {
                let matches = with_args(Command::new("test")).get_matches_from(vec!["test"]);
                let globals = parse(&matches).unwrap();
                assert_eq!(globals.api_base_url, DEFAULT_API_BASE_URL);
                assert_eq!(globals.token_file, None);
                assert_eq!(globals.timeout_secs, 30);
                assert_eq!(globals.output, OutputFormat::Table);
            },
        );
    }

    #[test]
    fn env_overrides_defaults() {
        temp_env::with_vars(
            [
                (ENV_API_BASE_URL, Some("https://api.smartclaim.test")),
                (ENV_TOKEN_FILE, Some("/tmp/smartclaim-session.json")),
                ("SMARTCLAIM_TIMEOUT", Some("5")),
                ("SMARTCLAIM_OUTPUT", Some("json")),
            ],
            || {
                let matches = with_args(Command::new("test")).get_matches_from(vec!["test"]);
                let globals = parse(&matches).unwrap();
                assert_eq!(globals.api_base_url, "https://api.smartclaim.test");
                assert_eq!(
                    globals.token_file,
                    Some(PathBuf::from("/tmp/smartclaim-session.json"))
                );
                assert_eq!(globals.timeout_secs, 5);
                assert_eq!(globals.output, OutputFormat::Json);
            },
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        temp_env::with_var("SMARTCLAIM_TIMEOUT", None::<&str>, || {
            let result = with_args(Command::new("test"))
                .try_get_matches_from(vec!["test", "--timeout", "0"]);
            assert!(result.is_err());
        });
    }
}
