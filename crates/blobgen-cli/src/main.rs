//! blobgen - Embed a directory of binary files into generated C++ sources
//!
//! Every `*.<ext>` file in the source directory becomes a byte array in
//! `<ClassName>.cpp`, with index-based accessors and an `Items` enumeration
//! declared in `<ClassName>.h`.

use anyhow::{Context, Result};
use blobgen_core::{
    DuplicatePolicy, Error, GenerationReport, Generator, GeneratorConfig, LineEnding,
    MAX_POSITIONAL_ARGS,
};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Embed binary files into a generated C++ header/source pair
#[derive(Parser, Debug)]
#[command(name = "blobgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Extension of the files to embed [default: png]
    extension: Option<String>,

    /// Directory containing the files [default: current directory]
    source_dir: Option<String>,

    /// Directory receiving the .h/.cpp pair [default: current directory]
    dest_dir: Option<String>,

    /// Namespace name and output file stem [default: BinaryData]
    class_name: Option<String>,

    /// Surplus positional parameters, rejected at startup
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry run - don't write files, just show what would be generated
    #[arg(long)]
    dry_run: bool,

    /// Line terminator of the generated files
    #[arg(long, value_enum, default_value = "crlf")]
    line_ending: LineEndingArg,

    /// Emit duplicate symbols instead of failing when two files sanitize to the same identifier
    #[arg(long)]
    allow_duplicate_identifiers: bool,

    /// Also emit a bounds-checked tryGetFile accessor
    #[arg(long)]
    checked_accessors: bool,

    /// Exit with status 1 on failure (by default every outcome exits with 0)
    #[arg(long)]
    strict_exit: bool,
}

/// Line terminator choice
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineEndingArg {
    /// \r\n
    Crlf,
    /// \n
    Lf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Crlf => LineEnding::Crlf,
            LineEndingArg::Lf => LineEnding::Lf,
        }
    }
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let policy = if self.allow_duplicate_identifiers {
            DuplicatePolicy::Allow
        } else {
            DuplicatePolicy::Reject
        };

        GeneratorConfig::new()
            .extension(self.extension.as_deref().unwrap_or_default())
            .class_name(self.class_name.as_deref().unwrap_or_default())
            .line_ending(self.line_ending.into())
            .duplicate_policy(policy)
            .checked_accessors(self.checked_accessors)
    }

    fn positional_count(&self) -> usize {
        [&self.extension, &self.source_dir, &self.dest_dir, &self.class_name]
            .iter()
            .filter(|arg| arg.is_some())
            .count()
            + self.extra.len()
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let strict = env::args().any(|arg| arg == "--strict-exit");
            if e.print().is_err() {
                eprintln!("{e}");
            }
            return ExitCode::from(parse_error_code(&e, strict));
        }
    };

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let outcome = run(&cli);
    match &outcome {
        Ok(report) => print_summary(&cli, report),
        Err(e) => {
            if let Some(err) = e.downcast_ref::<Error>() {
                debug!("Failure kind: {:?}", err.kind());
            }
            println!("{:#}", e);
            println!();
        }
    }

    ExitCode::from(exit_code(outcome.is_ok(), cli.strict_exit))
}

/// Validate arguments and run the generator
fn run(cli: &Cli) -> Result<GenerationReport> {
    if !cli.extra.is_empty() {
        let given = cli.positional_count();
        return Err(Error::invalid_argument_count(given, MAX_POSITIONAL_ARGS).into());
    }

    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let source_dir = resolve_dir(&cwd, cli.source_dir.as_deref());
    let dest_dir = resolve_dir(&cwd, cli.dest_dir.as_deref());

    let generator = Generator::new(cli.config());
    let config = generator.config();

    println!(
        "Creating {} and {} from files in {}...",
        config.header_path(&dest_dir).display(),
        config.source_path(&dest_dir).display(),
        source_dir.display()
    );
    println!();

    if cli.dry_run {
        info!("Dry run: {} will not be modified", dest_dir.display());
        return Ok(generator.dry_run(&source_dir, &dest_dir)?);
    }

    Ok(generator.run(&source_dir, &dest_dir)?)
}

/// Resolve a positional directory against the working directory
fn resolve_dir(cwd: &Path, arg: Option<&str>) -> PathBuf {
    match arg.map(unquote) {
        Some(dir) if !dir.is_empty() => cwd.join(dir),
        _ => cwd.to_path_buf(),
    }
}

/// Strip one pair of surrounding quotes
fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

fn print_summary(cli: &Cli, report: &GenerationReport) {
    if cli.dry_run {
        println!("Would write: {}", report.header_path.display());
        println!("Would write: {}", report.source_path.display());
    } else {
        println!("Wrote {}", report.header_path.display());
        println!("Wrote {}", report.source_path.display());
    }

    info!(
        "Summary: {} embedded, {} skipped, digest {}",
        report.files, report.skipped, report.digest
    );

    println!();
    println!(" Total size of binary data: {} bytes", report.total_size);
}

/// Every outcome exits with 0 unless `--strict-exit` was given
fn exit_code(success: bool, strict: bool) -> u8 {
    if success || !strict {
        0
    } else {
        1
    }
}

/// Usage errors follow the same exit policy as run failures
fn parse_error_code(err: &clap::Error, strict: bool) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => exit_code(false, strict),
    }
}
