mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use aster_core::lexicon::LexiconDocument;
use aster_core::{registry, Canonicalizer, DocumentPack, LocalePack, Registries};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use thiserror::Error;
use tracing::{debug, info};

/// Aster — controlled natural language canonicalizer
///
/// Rewrite Aster source into canonical form, check it, and inspect locale packs.
#[derive(Parser)]
#[command(name = "aster", version, about, long_about = None)]
struct Cli {
    /// Locale used for canonicalization
    #[arg(long, global = true, env = "ASTER_LOCALE", default_value = aster_core::DEFAULT_LOCALE)]
    locale: String,

    /// Extra locale pack (JSON) to register; may be repeated
    #[arg(long = "pack", global = true, value_name = "FILE")]
    packs: Vec<PathBuf>,

    /// More diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a source file
    Canonicalize {
        /// Path to source file, or `-` for stdin
        file: PathBuf,
        /// Output as JSON with locale and fingerprint
        #[arg(long)]
        json: bool,
    },

    /// Print the SHA-256 fingerprint of a file's canonical form
    Hash {
        /// Path to source file, or `-` for stdin
        file: PathBuf,
    },

    /// Exit 1 unless the file is already canonical
    Check {
        /// Path to source file, or `-` for stdin
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a registered lexicon as a locale-pack document
    Lexicon {
        /// Locale id, e.g. en-US
        id: String,
    },

    /// Validate a locale-pack document
    ValidatePack {
        /// Path to locale-pack JSON
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered locales
    Locales,

    /// Show version information
    Version,
}

impl Commands {
    fn uses_locales(&self) -> bool {
        !matches!(self, Commands::ValidatePack { .. } | Commands::Version)
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error("{}: {}", .path.display(), .source)]
    Pack {
        path: PathBuf,
        source: aster_core::Error,
    },

    #[error(transparent)]
    Core(#[from] aster_core::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose, cli.quiet));

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32, CliError> {
    if cli.command.uses_locales() {
        setup_registries(&cli.packs)?;
    }

    match &cli.command {
        Commands::Canonicalize { file, json } => canonicalize(cli, file, *json),
        Commands::Hash { file } => hash(cli, file),
        Commands::Check { file, json } => check(cli, file, *json),
        Commands::Lexicon { id } => lexicon(id),
        Commands::ValidatePack { file, json } => validate_pack(cli, file, *json),
        Commands::Locales => locales(),
        Commands::Version => {
            println!(
                "aster {} (aster-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            Ok(0)
        }
    }
}

/// Built-in packs plus every `--pack`, installed as the process-wide registries
fn setup_registries(packs: &[PathBuf]) -> Result<(), CliError> {
    let mut registries = Registries::builtin();
    for path in packs {
        let json = read_source(path)?;
        let lexicon = registries
            .install(&DocumentPack::new(json))
            .map_err(|source| CliError::Pack {
                path: path.clone(),
                source,
            })?;
        info!(locale = lexicon.id(), path = %path.display(), "registered locale pack");
    }
    registry::install(registries)?;
    Ok(())
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let read = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn canonicalize(cli: &Cli, file: &Path, json: bool) -> Result<i32, CliError> {
    let canonicalizer = Canonicalizer::for_locale(&cli.locale)?;
    let source = read_source(file)?;
    debug!(bytes = source.len(), locale = %cli.locale, "canonicalizing");

    if json {
        let result = canonicalizer.canonicalize_with_fingerprint(&source);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", canonicalizer.canonicalize(&source));
    }
    Ok(0)
}

fn hash(cli: &Cli, file: &Path) -> Result<i32, CliError> {
    let canonicalizer = Canonicalizer::for_locale(&cli.locale)?;
    let source = read_source(file)?;
    let result = canonicalizer.canonicalize_with_fingerprint(&source);
    println!("{}", result.fingerprint);
    Ok(0)
}

fn check(cli: &Cli, file: &Path, json: bool) -> Result<i32, CliError> {
    let canonicalizer = Canonicalizer::for_locale(&cli.locale)?;
    let source = read_source(file)?;
    let canonical = canonicalizer.canonicalize(&source);
    let is_canonical = canonical == source;

    if json {
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "locale": canonicalizer.lexicon().id(),
            "canonical": is_canonical,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if is_canonical {
        if !cli.quiet {
            println!("{} {} is canonical", "✓".green().bold(), file.display());
        }
    } else {
        eprintln!(
            "{} {} is not canonical",
            "✗".red().bold(),
            file.display()
        );
        if let Some((line, expected)) = first_difference(&source, &canonical) {
            eprintln!("  line {}: expected {}", line, expected.trim_end().yellow());
        }
    }

    Ok(if is_canonical { 0 } else { 1 })
}

/// 1-based line number and canonical text of the first line that differs
fn first_difference<'a>(source: &str, canonical: &'a str) -> Option<(usize, &'a str)> {
    let mut ours = source.lines();
    for (index, expected) in canonical.lines().enumerate() {
        if ours.next() != Some(expected) {
            return Some((index + 1, expected));
        }
    }
    None
}

fn lexicon(id: &str) -> Result<i32, CliError> {
    let lexicon = registry::global().lexicons.require(id)?;
    println!("{}", LexiconDocument::from_lexicon(&lexicon).to_json_pretty()?);
    Ok(0)
}

fn locales() -> Result<i32, CliError> {
    let lexicons = &registry::global().lexicons;
    for id in lexicons.ids() {
        if let Some(lexicon) = lexicons.get(id) {
            println!("{}\t{}\t{}", id, lexicon.name(), lexicon.direction());
        }
    }
    Ok(0)
}

fn validate_pack(cli: &Cli, file: &Path, json: bool) -> Result<i32, CliError> {
    let source = read_source(file)?;
    let outcome = DocumentPack::new(source).lexicon();

    if json {
        let report = match &outcome {
            Ok(lexicon) => serde_json::json!({
                "valid": true,
                "locale": lexicon.id(),
                "errors": 0,
            }),
            Err(e) => serde_json::json!({
                "valid": false,
                "errors": 1,
                "message": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &outcome {
            Ok(lexicon) if !cli.quiet => println!(
                "{} {} is a valid locale pack ({})",
                "✓".green().bold(),
                file.display(),
                lexicon.id()
            ),
            Ok(_) => {}
            Err(e) => eprintln!("{} {}: {}", "error:".red().bold(), file.display(), e),
        }
    }

    Ok(if outcome.is_ok() { 0 } else { 1 })
}
