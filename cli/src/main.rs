use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::{debug, info};
use thiserror::Error;

use deck::block::Content;
use deck::compiler::{SlideRecord, compile_with};
use deck::config::{ConfigError, DeckConfig, ResolvedConfig};
use deck::diagnostic::Diagnostic;
use typeset::{BuiltinMetrics, LayoutError, Style};

const SUBCOMMANDS: &[&str] = &["build", "outline", "help"];

/// Options whose value is the next argument.
const VALUE_OPTIONS: &[&str] = &["-c", "--config", "-o", "--output", "-f", "--format"];

#[derive(Parser)]
#[command(name = "slidec", version, about = "Compile Markdown outlines into slide decks")]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a deck and write it as a text proof or JSON
    Build(BuildArgs),

    /// Print the outline (bookmarks) of a deck
    Outline(SourceArgs),
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Markdown deck source
    file: String,

    /// TOML settings file; front matter in the source overrides it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Parse and compile only, don't lay out (exit 0 if valid)
    #[arg(long)]
    check: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("cannot serialize document: {0}")]
    Json(#[from] serde_json::Error),

    /// Diagnostics have already been printed.
    #[error("aborting due to previous errors")]
    Reported,
}

/// A parsed and compiled deck, ready for layout.
struct Compiled {
    config: ResolvedConfig,
    slides: Vec<SlideRecord<Content>>,
}

/// Diagnostic output for one source file.
struct Reporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl Reporter {
    fn new(no_color: bool) -> Self {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Reporter {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(color_choice),
            config: term::Config::default(),
        }
    }

    fn emit(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            let _ = term::emit_to_write_style(
                &mut self.writer.lock(),
                &self.config,
                &self.files,
                &diagnostic.to_codespan(),
            );
        }
    }
}

fn main() {
    env_logger::init();

    let args = with_default_subcommand(std::env::args().collect());
    let cli = Cli::parse_from(&args);
    let mut reporter = Reporter::new(cli.no_color);

    let result = match cli.command {
        Command::Build(build_args) => do_build(&build_args, &mut reporter),
        Command::Outline(source_args) => do_outline(&source_args, &mut reporter),
    };

    match result {
        Ok(()) => {}
        Err(CliError::Reported) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// `slidec [options] deck.md` works like `slidec build [options] deck.md`.
fn with_default_subcommand(mut args: Vec<String>) -> Vec<String> {
    let mut rest = args.iter().skip(1);
    let mut first_positional = None;
    while let Some(arg) = rest.next() {
        if VALUE_OPTIONS.contains(&arg.as_str()) {
            rest.next();
        } else if !arg.starts_with('-') {
            first_positional = Some(arg.as_str());
            break;
        }
    }
    if first_positional.is_some_and(|arg| !SUBCOMMANDS.contains(&arg)) {
        args.insert(1, "build".to_string());
    }
    args
}

/// Read, parse and compile a deck source, printing diagnostics as they arise.
fn load(args: &SourceArgs, reporter: &mut Reporter) -> Result<Compiled, CliError> {
    let source = std::fs::read_to_string(&args.file).map_err(|source| CliError::Read {
        path: args.file.clone(),
        source,
    })?;
    let file_id = reporter.files.add(args.file.clone(), source.clone());

    let parsed = deck::parser::Parser::new(source, file_id)
        .parse()
        .map_err(|errors| {
            reporter.emit(&errors);
            CliError::Reported
        })?;

    let config = match &args.config {
        Some(path) => {
            info!("layering front matter over {}", path.display());
            DeckConfig::layered(DeckConfig::load_table(path)?, parsed.front_matter)?
        }
        None => parsed.config,
    };
    let config = config.resolve()?;

    let mut warnings = Vec::new();
    let slides = compile_with(parsed.blocks, |item| {
        warnings.push(Diagnostic::discarded(item, file_id))
    });
    reporter.emit(&warnings);
    debug!("compiled {} slides from {}", slides.len(), args.file);

    Ok(Compiled { config, slides })
}

fn do_build(args: &BuildArgs, reporter: &mut Reporter) -> Result<(), CliError> {
    let compiled = load(&args.source, reporter)?;

    // --check: parse and compile succeeded, exit
    if args.check {
        eprintln!(
            "ok: {} compiled to {} slides",
            args.source.file,
            compiled.slides.len()
        );
        return Ok(());
    }

    let document = lay_out(&compiled)?;
    let rendered = match args.format {
        Format::Text => typeset::render::text(&document),
        Format::Json => serde_json::to_string_pretty(&document)?,
    };
    write_output(args.output.as_deref(), &rendered)
}

fn do_outline(args: &SourceArgs, reporter: &mut Reporter) -> Result<(), CliError> {
    let compiled = load(args, reporter)?;
    let document = lay_out(&compiled)?;
    for entry in &document.outline {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        println!("{}{} (p. {})", indent, entry.title, entry.page);
    }
    Ok(())
}

fn lay_out(compiled: &Compiled) -> Result<typeset::Document, CliError> {
    let style = Style::from_config(&compiled.config);
    let metrics = BuiltinMetrics::new().with_mono_family(&compiled.config.mono_font);
    Ok(typeset::typeset(&style, &metrics, &compiled.config, &compiled.slides)?)
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, rendered).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}
