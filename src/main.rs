// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use notesage::{
    ChatOptions, Config, GeminiModel, NoteScanner, QueryDispatcher, SessionState, chat,
    extract, import_file, seed_protocols, utils::logging, viewer,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "notesage")]
#[command(version = "0.1.0")]
#[command(about = "Grounded study assistant for class protocol notes", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session over the loaded notes
    Chat {
        /// Additional notes directory to load before starting
        #[arg(long, value_name = "DIR")]
        notes: Option<PathBuf>,
    },

    /// Ask a single question and print the streamed answer
    Ask {
        /// The question to ground in the loaded notes
        question: String,

        #[arg(long, value_name = "DIR")]
        notes: Option<PathBuf>,
    },

    /// List the documents the session would start with
    List,

    /// Print one document's full text and metadata
    Show {
        /// Document id or name prefix
        document: String,
    },

    /// Preview the text extraction for a single file
    Extract {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);
    if !cli.color {
        colored::control::set_override(false);
    }

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Chat { notes } => {
            cmd_chat(&config, notes.as_deref()).await?;
        }
        Commands::Ask { question, notes } => {
            cmd_ask(&config, &question, notes.as_deref()).await?;
        }
        Commands::List => {
            cmd_list(&config)?;
        }
        Commands::Show { document } => {
            cmd_show(&config, &document)?;
        }
        Commands::Extract { file } => {
            cmd_extract(&file)?;
        }
    }

    Ok(())
}

/// Builds the session every command starts from: seed protocols, the
/// configured notes directory, and any directory passed on the command line.
fn build_session(config: &Config, extra_notes: Option<&Path>) -> Result<SessionState> {
    let documents = if config.library.seed_protocols {
        seed_protocols()
    } else {
        Vec::new()
    };
    let mut state = SessionState::with_documents(documents);

    let scanner = NoteScanner::new(config.library.clone());
    for dir in [config.library.notes_dir.as_deref(), extra_notes].into_iter().flatten() {
        if dir.is_dir() {
            scanner
                .scan_into(&mut state, dir)
                .with_context(|| format!("Failed to scan notes directory {}", dir.display()))?;
        } else {
            warn!("Notes directory {} does not exist, skipping", dir.display());
        }
    }

    info!("Session starts with {} documents", state.documents().len());
    Ok(state)
}

fn chat_options(config: &Config) -> ChatOptions {
    ChatOptions {
        temperature: config.provider.temperature,
        history_window: config.chat.history_window,
    }
}

async fn cmd_chat(config: &Config, notes: Option<&Path>) -> Result<()> {
    let mut state = build_session(config, notes)?;
    let model = GeminiModel::new(&config.provider).context("Failed to set up the model client")?;
    let dispatcher = QueryDispatcher::new(model, chat_options(config));

    println!();
    println!("{}", "Welcome to NoteSage".bold());
    println!(
        "I answer strictly based on your class protocol notes. {}",
        format!("({} docs indexed)", state.documents().len()).dimmed()
    );
    println!("{}", "Commands: /add <file>, /list, /show <id>, /help, /quit".dimmed());
    println!("{}", "Try: \"What is the SIRS criteria for adults?\" or \"How do I treat an avulsed tooth?\"".dimmed());
    println!();

    let stdin = io::stdin();
    loop {
        print!("{} ", "you>".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => print_help(),
            "/list" => print_listing(&state),
            _ if line.starts_with("/show") => {
                let key = line.trim_start_matches("/show").trim();
                show_document(&state, key);
            }
            _ if line.starts_with("/add") => {
                let path = line.trim_start_matches("/add").trim();
                add_document(&mut state, path);
            }
            _ if line.starts_with('/') => {
                println!("{}", logging::format_warning(&format!("Unknown command: {line}")));
            }
            question => {
                answer_question(&dispatcher, &mut state, question).await;
            }
        }
    }

    println!("{}", "Session ended. Nothing was persisted.".dimmed());
    Ok(())
}

async fn cmd_ask(config: &Config, question: &str, notes: Option<&Path>) -> Result<()> {
    let mut state = build_session(config, notes)?;
    let model = GeminiModel::new(&config.provider).context("Failed to set up the model client")?;
    let dispatcher = QueryDispatcher::new(model, chat_options(config));

    answer_question(&dispatcher, &mut state, question).await;
    Ok(())
}

/// Streams one answer to the terminal: spinner until the first fragment,
/// fragments as they arrive, then the citation row once the answer settled.
async fn answer_question<M: notesage::ChatModel>(
    dispatcher: &QueryDispatcher<M>,
    state: &mut SessionState,
    question: &str,
) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Reading protocols...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut waiting = true;
    let outcome = dispatcher
        .dispatch(state, question, |fragment| {
            if waiting {
                spinner.finish_and_clear();
                waiting = false;
            }
            print!("{fragment}");
            let _ = io::stdout().flush();
        })
        .await;
    if waiting {
        spinner.finish_and_clear();
    }

    match outcome {
        Ok(report) if report.failed => {
            println!();
            println!("{}", report.answer.red());
        }
        Ok(report) => {
            println!();
            if let Some(trailer) = chat::referenced_trailer(&report.answer) {
                debug!("Model cited: {}", trailer);
            }

            let sources = chat::matching_documents(&report.answer, state.documents());
            if !report.answer.is_empty() && !sources.is_empty() {
                println!();
                println!("{}", viewer::render_source_list(&sources));
            }
            println!();
        }
        Err(e) => {
            println!("{}", logging::format_warning(&e.to_string()));
        }
    }
}

fn add_document(state: &mut SessionState, path: &str) {
    if path.is_empty() {
        println!("{}", logging::format_warning("Usage: /add <file>"));
        return;
    }

    match import_file(state, Path::new(path)) {
        Ok(doc) => {
            println!(
                "{}",
                logging::format_success(&format!("Added {} ({})", doc.name, doc.size))
            );
        }
        Err(e) => {
            // Blocking alert equivalent: the upload is abandoned, nothing
            // was added.
            println!("{}", logging::format_error(&format!("Upload failed: {e}")));
        }
    }
}

fn show_document(state: &SessionState, key: &str) {
    if key.is_empty() {
        println!("{}", logging::format_warning("Usage: /show <id or name>"));
        return;
    }

    match state.find_document(key) {
        Some(doc) => println!("{}", viewer::render_document(doc)),
        None => println!("{}", logging::format_error(&format!("Document not found: {key}"))),
    }
}

fn print_listing(state: &SessionState) {
    if state.documents().is_empty() {
        println!(
            "{}",
            logging::format_info("No documents yet. Add class notes with /add <file>.")
        );
        return;
    }

    println!("{}", "Your Library".bold());
    for doc in state.documents() {
        let active = state.active_doc_id() == Some(doc.id.as_str());
        println!("{}", viewer::render_listing(doc, active));
    }
}

fn print_help() {
    println!("Ask any question about the loaded protocol notes, or:");
    println!("  /add <file>       upload a PDF, Markdown, or text note");
    println!("  /list             list the document library");
    println!("  /show <id|name>   view one document's full text");
    println!("  /quit             end the session");
}

fn cmd_list(config: &Config) -> Result<()> {
    let state = build_session(config, None)?;
    print_listing(&state);
    Ok(())
}

fn cmd_show(config: &Config, document: &str) -> Result<()> {
    let state = build_session(config, None)?;

    let doc = state
        .find_document(document)
        .ok_or_else(|| notesage::AssistantError::DocumentNotFound(document.to_string()))?;
    println!("{}", viewer::render_document(doc));
    Ok(())
}

fn cmd_extract(file: &Path) -> Result<()> {
    let note = extract::extract_file(file)
        .with_context(|| format!("Failed to extract {}", file.display()))?;

    println!("{}", note.name.bold());
    println!(
        "{}",
        format!("{} chars extracted from {} bytes", note.text.len(), note.byte_size).dimmed()
    );
    println!("{}", "=".repeat(60));
    println!("{}", note.text);
    Ok(())
}
