use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use slim_opts_core::{
    LenientParse, Lookup, OutputFormat, QueryConfig, RecordedCommandLine, format_outcomes,
    format_value,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Numeric type for the `typed` subcommand.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum NumberKind {
    Float,
    Int,
}

#[derive(Debug, Parser)]
#[command(name = "slim-opts")]
#[command(about = "Read option values back from a recorded command line")]
struct Cli {
    /// Log scanning details to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every value recorded for a flag.
    Values(ValuesArgs),
    /// Print the single value of a flag as a number.
    Typed(TypedArgs),
    /// Evaluate a YAML query file against a recorded command line.
    Query(QueryArgs),
}

/// Where the recorded command line comes from. Defaults to stdin.
#[derive(Debug, Args)]
struct SourceArgs {
    /// Recorded command line text.
    #[arg(long, conflicts_with = "input", allow_hyphen_values = true)]
    command_line: Option<String>,
    /// File containing the recorded command line.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValuesArgs {
    /// Flag to look for, dashes included (e.g. -q or --quadratic).
    #[arg(long, allow_hyphen_values = true)]
    flag: String,
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct TypedArgs {
    /// Flag to look for, dashes included.
    #[arg(long, allow_hyphen_values = true)]
    flag: String,
    /// Numeric type to convert the value to.
    #[arg(long, default_value = "float")]
    kind: NumberKind,
    /// Also report whether the flag was missing or repeated.
    #[arg(long)]
    detailed: bool,
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// YAML query configuration.
    #[arg(long)]
    config: PathBuf,
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(serde::Serialize)]
#[serde(bound(serialize = "T: LenientParse + serde::Serialize"))]
struct TypedOutput<T> {
    flag: String,
    #[serde(serialize_with = "slim_opts_core::serialize_number")]
    value: T,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<Lookup<T>>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Values(args) => run_values(args),
        Command::Typed(args) => run_typed(args),
        Command::Query(args) => run_query(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_command_line(source: SourceArgs) -> Result<String, String> {
    let text = match (source.command_line, source.input) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?,
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            text
        }
    };
    let text = text.trim_end_matches(['\n', '\r']).to_string();
    debug!(length = text.len(), "Read recorded command line");
    Ok(text)
}

fn print_output(output: String) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

fn run_values(args: ValuesArgs) -> Result<(), String> {
    let text = read_command_line(args.source)?;
    let values = RecordedCommandLine::new(&text).values(&args.flag);
    let output = format_value(&values, args.format).map_err(|err| err.to_string())?;
    print_output(output);
    Ok(())
}

fn run_typed(args: TypedArgs) -> Result<(), String> {
    let text = read_command_line(args.source)?;
    let recorded = RecordedCommandLine::new(&text);

    let output = match args.kind {
        NumberKind::Float => {
            typed_output::<f32>(&recorded, &args.flag, args.detailed, args.format)?
        }
        NumberKind::Int => typed_output::<i32>(&recorded, &args.flag, args.detailed, args.format)?,
    };
    print_output(output);
    Ok(())
}

fn typed_output<T>(
    recorded: &RecordedCommandLine<'_>,
    flag: &str,
    detailed: bool,
    format: OutputFormat,
) -> Result<String, String>
where
    T: LenientParse + serde::Serialize,
{
    let lookup = recorded.lookup::<T>(flag);
    let (value, found) = lookup.into_legacy(T::default());
    let output = TypedOutput {
        flag: flag.to_string(),
        value,
        found,
        lookup: detailed.then_some(lookup),
    };
    format_value(&output, format).map_err(|err| err.to_string())
}

fn run_query(args: QueryArgs) -> Result<(), String> {
    let config = QueryConfig::load(&args.config)
        .map_err(|err| format!("Failed to load '{}': {err}", args.config.display()))?;
    let text = read_command_line(args.source)?;
    let outcomes = config.evaluate(&RecordedCommandLine::new(&text));
    let output = format_outcomes(&outcomes, args.format).map_err(|err| err.to_string())?;
    print_output(output);
    Ok(())
}
