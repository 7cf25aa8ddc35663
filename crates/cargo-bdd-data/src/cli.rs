//! Command dispatch for the `cargo bdd-data` entrypoint.

use std::ffi::OsString;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, eyre};
use gherkin::{Feature, GherkinEnv};
use rstest_bdd_data::{SourceResolver, parse_delimiter, resolve_feature, specifications};
use tracing::{debug, info};

use crate::config::{CliConfig, LogLevel, Overrides};
use crate::logging::init_logging;
use crate::output::{
    write_examples, write_examples_json, write_specifications, write_specifications_json,
};

/// Cargo subcommand that expands external CSV data into scenario outline
/// examples.
#[derive(Parser)]
#[command(name = "cargo-bdd-data", bin_name = "cargo bdd-data", author, version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    loader: LoaderArgs,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
}

/// Supported commands.
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Resolve every outline with a data source and print its examples.
    Examples(FeatureArgs),
    /// Print each scenario's data source and field mappings without loading
    /// any data.
    Spec(FeatureArgs),
}

#[derive(Args)]
pub(crate) struct FeatureArgs {
    /// Feature file to inspect.
    feature: Utf8PathBuf,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct LoaderArgs {
    /// CSV delimiter: a single character, or `tab`.
    #[arg(long, global = true, value_parser = parse_delimiter)]
    delimiter: Option<char>,
    /// Trim whitespace around unquoted fields.
    #[arg(long, global = true)]
    trim: bool,
    /// Culture whose list separator is used when no delimiter is given.
    #[arg(long, global = true)]
    culture: Option<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse_from(strip_cargo_subcommand(std::env::args_os()));
    let config = CliConfig::from_env()
        .wrap_err("invalid configuration")?
        .apply_overrides(Overrides {
            log_level: cli.log_level,
            delimiter: cli.loader.delimiter,
            trim_fields: cli.loader.trim.then_some(true),
            culture: cli.loader.culture,
        });
    init_logging(&config);
    debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Examples(args) => handle_examples(&mut stdout, &args, config)?,
        Commands::Spec(args) => handle_spec(&mut stdout, &args)?,
    }
    stdout.flush().wrap_err("failed to flush output to stdout")
}

/// Drop the subcommand name cargo inserts when invoked as `cargo bdd-data`.
fn strip_cargo_subcommand<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    if args.get(1).is_some_and(|arg| arg == "bdd-data") {
        args.remove(1);
    }
    args
}

fn load_feature(path: &Utf8Path) -> Result<Feature> {
    let feature = Feature::parse_path(path, GherkinEnv::default())
        .map_err(|err| eyre!("failed to parse feature file {path}: {err}"))?;
    info!(feature = %path, scenarios = feature.scenarios.len(), "parsed feature");
    Ok(feature)
}

fn handle_examples(writer: &mut dyn Write, args: &FeatureArgs, config: CliConfig) -> Result<()> {
    let feature = load_feature(&args.feature)?;
    let resolver = SourceResolver::new(config.loader);
    let outlines = resolve_feature(&feature, &args.feature, &resolver)
        .wrap_err_with(|| format!("failed to resolve external data for {}", args.feature))?;
    if args.json {
        write_examples_json(writer, &outlines)
    } else {
        write_examples(writer, &outlines)
    }
}

fn handle_spec(writer: &mut dyn Write, args: &FeatureArgs) -> Result<()> {
    let feature = load_feature(&args.feature)?;
    let declared = specifications(&feature, &args.feature)
        .wrap_err_with(|| format!("invalid data tags in {}", args.feature))?;
    if args.json {
        write_specifications_json(writer, &declared)
    } else {
        write_specifications(writer, &declared)
    }
}
