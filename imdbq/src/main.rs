//! # imdbq
//!
//! A CLI tool for running fixed lookups against a movie database.
//!
//! ## Overview
//!
//! imdbq is built on top of imdbqlib. Each subcommand binds one value into
//! a fixed query, prints up to `--limit` rows as an aligned table with a
//! leading `#` column, and finishes with a `Total results: N` line.
//!
//! ## Usage
//!
//! ```bash
//! # Titles released in 2022
//! imdbq year 2022
//!
//! # Characters from titles containing "Star Wars"
//! imdbq characters "Star Wars"
//!
//! # Titles in a genre
//! imdbq genre Comedy
//!
//! # Job categories for a person
//! imdbq jobs "Steven Spielberg"
//!
//! # Credentials from the environment, JSON output
//! IMDBQ_USER=postgres IMDBQ_PASSWORD=secret imdbq genre Drama --output json
//! ```

mod render;

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use imdbqlib::config::{
    DEFAULT_DATABASE, DEFAULT_USER, ENV_DATABASE, ENV_PASSWORD, ENV_USER,
};
use imdbqlib::{run_query, ConnectionConfig, QueryKind, RunOptions, DEFAULT_LIMIT};
use log::LevelFilter;

use render::{render_report, summary_style, OutputMode};

/// Subcommand name, the lookup it runs, and its argument.
const LOOKUPS: [(&str, QueryKind, &str, &str); 4] = [
    (
        "year",
        QueryKind::TitlesByYear,
        "YEAR",
        "List primary titles released in a year",
    ),
    (
        "characters",
        QueryKind::CharactersByTitle,
        "TITLE",
        "List character names from titles containing a string",
    ),
    (
        "genre",
        QueryKind::TitlesByGenre,
        "GENRE",
        "List primary titles of a genre",
    ),
    (
        "jobs",
        QueryKind::JobsByName,
        "NAME",
        "List job categories of persons whose name contains a string",
    ),
];

/// Build the clap Command structure
fn build_command() -> Command {
    let mut cmd = Command::new("imdbq")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Run fixed movie-database lookups and print aligned result tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .env(ENV_USER)
                .global(true)
                .default_value(DEFAULT_USER)
                .help("Database user"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .env(ENV_PASSWORD)
                .hide_env_values(true)
                .global(true)
                .help("Database password"),
        )
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .env(ENV_DATABASE)
                .global(true)
                .default_value(DEFAULT_DATABASE)
                .help("Database name"),
        )
        .arg(
            Arg::new("limit")
                .short('n')
                .long("limit")
                .global(true)
                .value_parser(clap::value_parser!(usize))
                .help(format!(
                    "Maximum number of rows to display [default: {}]",
                    DEFAULT_LIMIT
                )),
        )
        .arg(
            Arg::new("no-count")
                .long("no-count")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Report truncated totals as a lower bound instead of counting"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        );

    for (name, _, value_name, about) in LOOKUPS {
        cmd = cmd.subcommand(
            Command::new(name).about(about).arg(
                Arg::new("value")
                    .value_name(value_name)
                    .required(true)
                    .help("Value bound to the query"),
            ),
        );
    }

    cmd
}

/// Install the logger; `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Build connection settings from matches
fn build_config(matches: &ArgMatches) -> ConnectionConfig {
    let mut config = ConnectionConfig::default();
    if let Some(user) = matches.get_one::<String>("user") {
        config = config.user(user);
    }
    if let Some(password) = matches.get_one::<String>("password") {
        config = config.password(password);
    }
    if let Some(database) = matches.get_one::<String>("database") {
        config = config.database(database);
    }
    config
}

/// Build run options from matches
fn build_options(matches: &ArgMatches) -> RunOptions {
    let limit = matches
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(DEFAULT_LIMIT);
    RunOptions::new()
        .limit(limit)
        .exact_total(!matches.get_flag("no-count"))
}

/// Run the selected lookup and render its report.
fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("no lookup given"))?;
    let kind: QueryKind = name.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let value = sub
        .get_one::<String>("value")
        .ok_or_else(|| anyhow::anyhow!("missing value for '{}'", name))?;

    let config = build_config(sub);
    let options = build_options(sub);
    let mode = sub
        .get_one::<String>("output")
        .map(|s| OutputMode::from_arg(s))
        .unwrap_or_default();

    let query = kind.bind(value)?;
    let report = run_query(&config, &query, &options)?;
    Ok(render_report(&report, mode, &summary_style())?)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let verbosity = matches
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbose"))
        .unwrap_or_else(|| matches.get_count("verbose"));
    init_logging(verbosity);

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
