use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process;

use document_io::{read_document, Encoding};
use splice_file::{is_marker_not_found, splice_file, SpliceConfig, SpliceOutcome};
use unescape_sequences::unescape;

const EXIT_FAILURE: i32 = 1;
const EXIT_MARKER_NOT_FOUND: i32 = 3;

fn build_cli() -> Command {
    Command::new("splice_file")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replaces the text between two markers in a file")
        .arg(
            Arg::new("path")
                .long("path")
                .short('p')
                .value_name("FILE")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("File to edit"),
        )
        .arg(
            Arg::new("start_marker")
                .long("start-marker")
                .value_name("TEXT")
                .required(true)
                .allow_hyphen_values(true)
                .value_parser(NonEmptyStringValueParser::new())
                .help("First occurrence starts the replaced span (removed)"),
        )
        .arg(
            Arg::new("end_marker")
                .long("end-marker")
                .value_name("TEXT")
                .required(true)
                .allow_hyphen_values(true)
                .value_parser(NonEmptyStringValueParser::new())
                .help("First occurrence from the start marker on ends the span (kept)"),
        )
        .arg(
            Arg::new("replacement")
                .long("replacement")
                .short('r')
                .value_name("TEXT")
                .allow_hyphen_values(true)
                .help("Text to put in place of the span"),
        )
        .arg(
            Arg::new("replacement_file")
                .long("replacement-file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read the replacement text verbatim from a file"),
        )
        .group(
            ArgGroup::new("replacement_source")
                .args(["replacement", "replacement_file"])
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write the result here instead of overwriting the input"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .value_name("NAME")
                .value_parser(["utf-8", "utf8", "latin-1", "latin1", "iso-8859-1"])
                .ignore_case(true)
                .default_value("utf-8")
                .help("Encoding used to read and write the file"),
        )
        .arg(
            Arg::new("literal")
                .long("literal")
                .action(ArgAction::SetTrue)
                .help(r"Take markers and replacement as-is instead of expanding \n, \r, \t and \\"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the result to stdout and leave the file untouched"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
}

fn config_from_matches(matches: &ArgMatches) -> Result<SpliceConfig> {
    let literal = matches.get_flag("literal");
    let expand = |value: &String| {
        if literal {
            value.clone()
        } else {
            unescape(value)
        }
    };

    let encoding: Encoding = matches
        .get_one::<String>("encoding")
        .map(String::as_str)
        .unwrap_or("utf-8")
        .parse()?;

    let replacement = match matches.get_one::<PathBuf>("replacement_file") {
        Some(file) => read_document(file, encoding)
            .with_context(|| format!("Failed to read replacement from {}", file.display()))?,
        None => matches
            .get_one::<String>("replacement")
            .map(expand)
            .unwrap_or_default(),
    };

    // Required arguments; clap has already rejected a command line without them.
    let path = matches
        .get_one::<PathBuf>("path")
        .cloned()
        .context("Missing --path")?;
    let start_marker = matches
        .get_one::<String>("start_marker")
        .map(expand)
        .context("Missing --start-marker")?;
    let end_marker = matches
        .get_one::<String>("end_marker")
        .map(expand)
        .context("Missing --end-marker")?;

    let mut config = SpliceConfig::new(path, start_marker, end_marker, replacement);
    config.output = matches.get_one::<PathBuf>("output").cloned();
    config.encoding = encoding;
    config.dry_run = matches.get_flag("dry_run");
    Ok(config)
}

fn report(outcome: &SpliceOutcome) {
    println!(
        "Replaced bytes {}..{} ({} -> {} bytes), wrote {}",
        outcome.span.start,
        outcome.span.end,
        outcome.original_len,
        outcome.new_len,
        outcome.destination.display()
    );
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    debug!("{:?}", config);

    let outcome = splice_file(&config)?;
    if config.dry_run {
        print!("{}", outcome.text);
    } else {
        report(&outcome);
    }
    Ok(())
}

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        let code = if is_marker_not_found(&err) {
            EXIT_MARKER_NOT_FOUND
        } else {
            EXIT_FAILURE
        };
        process::exit(code);
    }
}
