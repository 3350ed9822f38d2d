//! irgen Driver
//!
//! Meant to run from a `//go:generate irgen COMPOSITE CONSUMER` line: the
//! package to read comes from the `GOFILE` and `GOPACKAGE` variables set by
//! `go generate`, unless given explicitly with `--dir` and `--package`.
//!
//! Long flags take two dashes: a Go-style `-out ref.go` parses as `-o ut`,
//! so generate lines must say `--out ref.go` (or `-o ref.go`).

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use irgen_codegen::{emit, BindingStrategy, BindingStyle, Config};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(
    name = "irgen",
    version,
    about = "Generate variant structs and dispatch methods from a composite/consumer interface pair"
)]
struct Args {
    /// Composite interface: a single method taking the consumer
    composite: String,

    /// Consumer interface: one method per variant
    consumer: String,

    /// Output file (computed if empty, stdout if "-"); Go-style `-out` is not accepted, use --out
    #[clap(short, long, default_value = "")]
    out: String,

    /// Also copy the output to stdout when writing a file, and log more
    #[clap(short, long)]
    verbose: bool,

    /// Package directory (defaults to the directory of $GOFILE)
    #[clap(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Package name (defaults to $GOPACKAGE)
    #[clap(long, value_name = "NAME")]
    package: Option<String>,

    /// How receiver names are derived from the composite's name
    #[clap(long, value_enum, default_value_t = Style::Lowercase)]
    binding_style: Style,

    /// Appended to a receiver name that collides with a keyword or field
    #[clap(long, default_value = "_")]
    binding_suffix: String,

    /// Print the loaded package as JSON to stderr
    #[clap(long)]
    dump_unit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Style {
    Lowercase,
    LowercaseFirst,
}

impl From<Style> for BindingStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Lowercase => BindingStyle::Lowercase,
            Style::LowercaseFirst => BindingStyle::LowercaseFirst,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    fn from_flag(out: &str, composite: &str) -> Self {
        match out {
            "-" => OutputTarget::Stdout,
            "" => OutputTarget::File(PathBuf::from(default_output_name(composite))),
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }
}

fn default_output_name(composite: &str) -> String {
    format!("{}_impl.go", composite.to_lowercase())
}

/// Directory of the file `go generate` is running for
fn go_file_dir(gofile: &str) -> PathBuf {
    match Path::new(gofile).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn required_var(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    env(key)
        .filter(|value| !value.is_empty())
        .with_context(|| format!("environment variable {key} missing or empty"))
}

/// Build the run's configuration from flags, falling back to `env` for the
/// package location
fn resolve_config(args: &Args, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let directory = match &args.dir {
        Some(dir) => dir.clone(),
        None => go_file_dir(&required_var(&env, "GOFILE")?),
    };
    let package = match &args.package {
        Some(package) => package.clone(),
        None => required_var(&env, "GOPACKAGE")?,
    };

    let mut config = Config::new(directory, &package, &args.composite, &args.consumer);
    config.binding = BindingStrategy::new(args.binding_style.into(), &args.binding_suffix);
    Ok(config)
}

fn write_output(target: &OutputTarget, code: &[u8], verbose: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => io::stdout().write_all(code)?,
        OutputTarget::File(path) => {
            fs::write(path, code).with_context(|| format!("can't write {}", path.display()))?;
            info!("wrote {}", path.display());
            if verbose {
                io::stdout().write_all(code)?;
            }
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args, |key| std::env::var(key).ok())?;
    debug!("configuration: {config:?}");

    let unit = config
        .load()
        .context("can't parse the composite/consumer type pair")?;
    if args.dump_unit {
        eprintln!("{}", serde_json::to_string_pretty(&unit)?);
    }

    let generated = config.generate_unit(&unit).with_context(|| {
        format!(
            "can't generate variants of {} for {}",
            args.composite, args.consumer
        )
    })?;

    // Render fully before touching the destination
    let mut code = Vec::new();
    emit(&generated, &mut code)?;

    write_output(&OutputTarget::from_flag(&args.out, &args.composite), &code, args.verbose)
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(err) = run(&args) {
        eprintln!("irgen: {err:#}");
        std::process::exit(1);
    }
}
