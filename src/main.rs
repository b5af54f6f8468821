//! Command-line front end for the WordPress-to-Medium pipeline.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use mediumpress::html::normalize;
use mediumpress::markdown::to_markdown;
use mediumpress::settings::SettingsError;
use mediumpress::translation::TranslateError;
use mediumpress::{AnthropicClient, ArticleId, MemoryStore, Settings, Translator};

/// Article id used for the one-shot article a CLI invocation works on.
const CLI_ARTICLE_ID: ArticleId = 1;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize block markup and sanitize it to the Medium-safe subset
    Prepare(InputArgs),
    /// Render prepared HTML as Markdown
    Markdown(InputArgs),
    /// Translate an article end to end and print the result
    Translate(TranslateArgs),
    /// List the models available to the configured API key
    Models(ModelsArgs),
    /// Check the configured API key against the live API
    ValidateKey(ConfigArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// HTML file to read, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: String,
}

#[derive(Debug, Args)]
struct TranslateArgs {
    /// HTML file to read, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: String,

    /// Title of the original article
    #[arg(long, default_value = "Untitled")]
    title: String,

    /// Print the translation as Markdown instead of HTML
    #[arg(long)]
    markdown: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Args)]
struct ModelsArgs {
    /// Skip the cached catalog and fetch a fresh one
    #[arg(long)]
    refresh: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Settings file (TOML); falls back to mediumpress.toml when present
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Translate(#[from] TranslateError),
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_error(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Prepare(args) => {
            let html = read_input(&args.input)?;
            println!("{}", normalize(&html));
            Ok(())
        }
        Command::Markdown(args) => {
            let html = read_input(&args.input)?;
            println!("{}", to_markdown(&html));
            Ok(())
        }
        Command::Translate(args) => {
            let settings = Settings::load(args.config.config.as_deref())?;
            let html = read_input(&args.input)?;

            let mut store = MemoryStore::new();
            store.insert_post(CLI_ARTICLE_ID, &args.title, &html);

            let mut translator = build_translator(store, settings)?;
            let outcome = translator.translate(CLI_ARTICLE_ID)?;

            if args.markdown {
                println!("{}", translator.copy_markdown(CLI_ARTICLE_ID)?);
            } else {
                println!("{}", outcome.artifact.translated_title);
                println!();
                println!("{}", outcome.artifact.translated_html);
            }
            Ok(())
        }
        Command::Models(args) => {
            let settings = Settings::load(args.config.config.as_deref())?;
            let mut translator = build_translator(MemoryStore::new(), settings)?;

            let catalog = if args.refresh {
                translator.refresh_models()?
            } else {
                translator.models()?
            };
            for model in &catalog {
                if model.display_name.is_empty() {
                    println!("{}", model.id);
                } else {
                    println!("{}  {}", model.id, model.display_name);
                }
            }
            Ok(())
        }
        Command::ValidateKey(args) => {
            let settings = Settings::load(args.config.as_deref())?;
            let translator = build_translator(MemoryStore::new(), settings)?;

            let count = translator.validate_key()?;
            println!("API key is valid. {count} models available.");
            Ok(())
        }
    }
}

fn build_translator(
    store: MemoryStore,
    settings: Settings,
) -> Result<Translator<MemoryStore, AnthropicClient>, CliError> {
    let provider = AnthropicClient::new(settings.api_key.as_str(), settings.base_url.as_str())
        .map_err(TranslateError::from)?;
    Ok(Translator::new(store, provider, settings))
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn report_error(error: &CliError) {
    let message = match error {
        CliError::Translate(inner) => {
            tracing::warn!(error = %inner, "command failed");
            inner.user_message().to_string()
        }
        other => other.to_string(),
    };
    if atty::is(atty::Stream::Stderr) {
        eprintln!("\x1b[31mError:\x1b[0m {message}");
    } else {
        eprintln!("Error: {message}");
    }
}
