// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use writeflow::utils::logging::{format_document_row, format_info, format_warning};
use writeflow::{
    BatchImporter, Config, DocumentId, EditorSession, ExportFormat, FormatCommand,
    ProgressTracker, Selection, count_metrics,
};

#[derive(Parser)]
#[command(name = "writeflow")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Minimal rich-text writing with DOCX import and export", long_about = None)]
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

    /// Make this document current before running the command
    #[arg(long, global = true, value_name = "ID")]
    doc: Option<DocumentId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents, newest first
    List,

    /// Create an empty document and make it current
    New {
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Print the current document
    Show,

    /// Word and character counts of the current document
    Stats,

    /// Rename the current document
    Rename { title: String },

    /// Replace the current document's content
    #[command(group(ArgGroup::new("source").required(true).args(["file", "content"])))]
    Write {
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long, value_name = "MARKUP")]
        content: Option<String>,
    },

    /// Apply a formatting command (bold, italic, underline, h1, h2, bullet, numbered, quote)
    Format {
        command: FormatCommand,

        #[arg(long, value_name = "INDEX")]
        block: Option<usize>,

        #[arg(long, default_value_t = 0)]
        start: usize,

        #[arg(long, default_value_t = 0)]
        end: usize,
    },

    /// Delete a document by id
    Delete { id: DocumentId },

    /// Import a .docx file, or every .docx file under a directory
    Import { path: PathBuf },

    /// Export the current document as txt, html or docx
    Export {
        format: ExportFormat,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    writeflow::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    let mut session = EditorSession::open(&config).context("Failed to open document store")?;

    if let Some(id) = cli.doc
        && let Err(e) = session.select(id).await
    {
        eprintln!("{}", format_warning(&e.to_string()));
    }

    match cli.command {
        Commands::List => cmd_list(&session).await,
        Commands::New { title } => {
            println!("{}", session.new_document(title.as_deref()).await.render());
        }
        Commands::Show => cmd_show(&session).await?,
        Commands::Stats => cmd_stats(&session).await?,
        Commands::Rename { title } => {
            if !session.change_title(&title).await? {
                bail!("No document selected");
            }
            println!("{}", format_info(&format!("Renamed to '{}'", title)));
        }
        Commands::Write { file, content } => {
            cmd_write(&mut session, file.as_deref(), content).await?;
        }
        Commands::Format {
            command,
            block,
            start,
            end,
        } => {
            if command.is_inline() && start == end {
                eprintln!(
                    "{}",
                    format_warning("Inline formatting needs a --start/--end range")
                );
            }
            let selection = block.map(|block| Selection::new(block, start, end));
            if session.apply_format(command, selection).await {
                println!("{}", format_info(&format!("Applied {:?}", command)));
            } else {
                println!("{}", format_warning("Nothing to format"));
            }
        }
        Commands::Delete { id } => {
            println!("{}", session.delete_document(id).await.render());
        }
        Commands::Import { path } => cmd_import(&mut session, &config, &path, cli.color).await?,
        Commands::Export { format, output } => {
            if let Some(dir) = output {
                session = session.with_export_dir(dir);
            }
            let notice = session.export(format).await;
            println!("{}", notice.render());
            if notice.is_error() {
                bail!("Export did not complete");
            }
        }
    }

    session.flush().await.context("Failed to save documents")?;
    Ok(())
}

async fn cmd_list(session: &EditorSession) {
    let store = session.store();
    let store = store.lock().await;
    let now = Utc::now();

    if store.is_empty() {
        println!("{}", format_info("No documents"));
        return;
    }

    for document in store.documents() {
        println!(
            "{}",
            format_document_row(
                store.current_id() == Some(document.id),
                &document.id.to_string(),
                &document.title,
                &document.updated_label(now),
                document.word_count,
            )
        );
    }
}

async fn cmd_show(session: &EditorSession) -> Result<()> {
    let store = session.store();
    let store = store.lock().await;
    let Some(document) = store.current() else {
        bail!("No document selected");
    };

    println!("# {} ({})", document.title, document.id);
    println!("{}", document.content);
    println!("{}", count_metrics(&document.content).describe());
    Ok(())
}

async fn cmd_stats(session: &EditorSession) -> Result<()> {
    let store = session.store();
    let store = store.lock().await;
    let Some(document) = store.current() else {
        bail!("No document selected");
    };

    let metrics = count_metrics(&document.content);
    println!("{}", metrics.describe());
    info!("Document {} has {} cached words", document.id, document.word_count);
    Ok(())
}

async fn cmd_write(
    session: &mut EditorSession,
    file: Option<&Path>,
    content: Option<String>,
) -> Result<()> {
    let content = match (file, content) {
        (Some(path), _) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(content)) => content,
        (None, None) => bail!("Either --file or --content is required"),
    };

    if !session.change_content(content).await {
        bail!("No document selected");
    }
    Ok(())
}

async fn cmd_import(
    session: &mut EditorSession,
    config: &Config,
    path: &Path,
    colored: bool,
) -> Result<()> {
    if !path.is_dir() {
        println!("{}", session.import_docx(path).await.render());
        return Ok(());
    }

    let batch = BatchImporter::new(&config.import);
    let total = batch
        .scan_directory(path)
        .context("Failed to scan directory")?
        .len();

    let progress = Arc::new(ProgressTracker::with_color(total, colored));
    let stats = batch
        .import_directory(path, &session.store(), Arc::clone(&progress))
        .await
        .context("Batch import failed")?;
    progress.finish();

    println!("{}", format_info(&stats.summary()));
    Ok(())
}
