//! Command-line front end for the writing workspace.
//!
//! # Responsibility
//! - Drive core store/session operations against a SQLite key-value file.
//! - Ask for confirmation on stdin before destructive commands.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use zhixia_core::db::open_db;
use zhixia_core::{
    core_version, default_log_level, default_model_id, init_logging, AnalyzeRequest,
    AssistProvider, ChapterId, ChapterPatch, EditorSession, GenerateRequest, MockAssistProvider,
    ProjectId, ProjectListSession, ProjectRepository, ProjectStore, SqliteKeyValueStore,
    StoreConfig,
};

#[derive(Debug, Parser)]
#[command(name = "zhixia", about = "Project and chapter workspace")]
struct Cli {
    /// SQLite database holding the project list.
    #[arg(long, global = true, default_value = "zhixia.db")]
    db: PathBuf,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists projects.
    List,
    /// Creates a project.
    Create { title: String },
    /// Renames a project.
    Rename { project_id: ProjectId, title: String },
    /// Deletes a project.
    Delete {
        project_id: ProjectId,
        #[arg(long)]
        yes: bool,
    },
    /// Lists a project's chapters.
    Chapters {
        project_id: ProjectId,
        /// Show in descending order.
        #[arg(long)]
        desc: bool,
    },
    /// Appends an empty chapter.
    AddChapter { project_id: ProjectId },
    /// Deletes a chapter and renumbers the rest.
    DeleteChapter {
        project_id: ProjectId,
        chapter_id: ChapterId,
        #[arg(long)]
        yes: bool,
    },
    /// Edits a chapter's title and/or content.
    EditChapter {
        project_id: ProjectId,
        chapter_id: ChapterId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Generates continuation text for the first chapter (or --chapter).
    Generate {
        project_id: ProjectId,
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        chapter: Option<ChapterId>,
        /// Append the text to the chapter.
        #[arg(long)]
        apply: bool,
    },
    /// Produces an analysis report for one chapter.
    Analyze {
        project_id: ProjectId,
        chapter_id: ChapterId,
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Prints the core version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    if let Command::Version = cli.command {
        println!("zhixia_core version={}", core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db).with_context(|| format!("opening {}", cli.db.display()))?;
    let store = ProjectStore::new(SqliteKeyValueStore::try_new(&conn)?, StoreConfig::default());
    run(&store, cli.command)
}

fn run<R: ProjectRepository>(store: &R, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let list = ProjectListSession::open(store)?;
            if list.is_empty() {
                println!("no projects yet");
            }
            for project in list.projects() {
                println!(
                    "{}\t{}\twords={}\tmodified={}",
                    project.id, project.title, project.word_count, project.last_modified
                );
            }
        }
        Command::Create { title } => {
            let project = ProjectListSession::open(store)?.create_project(&title)?;
            println!("{}", project.id);
        }
        Command::Rename { project_id, title } => {
            ProjectListSession::open(store)?.rename_project(&project_id, &title)?;
        }
        Command::Delete { project_id, yes } => {
            let mut list = ProjectListSession::open(store)?;
            let deleted = list.delete_project(&project_id, |project| {
                yes || confirm(&format!("delete project `{}`?", project.title))
            })?;
            report_deleted(deleted);
        }
        Command::Chapters { project_id, desc } => {
            let mut session = open_editor(store, &project_id)?;
            if desc {
                session.toggle_sort_order();
            }
            for chapter in session.display_chapters() {
                println!(
                    "{}\t{}\t{}\tchars={}",
                    chapter.order,
                    chapter.id,
                    chapter.title,
                    chapter.content_length()
                );
            }
        }
        Command::AddChapter { project_id } => {
            let id = open_editor(store, &project_id)?.add_chapter()?;
            println!("{id}");
        }
        Command::DeleteChapter {
            project_id,
            chapter_id,
            yes,
        } => {
            let mut session = open_editor(store, &project_id)?;
            let deleted = session.delete_chapter(&chapter_id, |chapter| {
                yes || confirm(&format!("delete chapter `{}`?", chapter.title))
            })?;
            report_deleted(deleted);
        }
        Command::EditChapter {
            project_id,
            chapter_id,
            title,
            content,
        } => {
            let patch = ChapterPatch { title, content };
            if patch.is_empty() {
                bail!("nothing to edit: pass --title and/or --content");
            }
            let mut session = open_editor(store, &project_id)?;
            if session.chapter(&chapter_id).is_none() {
                bail!("chapter not found: {chapter_id}");
            }
            session.update_chapter(&chapter_id, &patch)?;
        }
        Command::Generate {
            project_id,
            prompt,
            model,
            chapter,
            apply,
        } => {
            let mut session = open_editor(store, &project_id)?;
            if let Some(chapter_id) = chapter {
                if !session.select_chapter(&chapter_id) {
                    bail!("chapter not found: {chapter_id}");
                }
            }
            let referenced_chapter_ids =
                session.selected_chapter_id().into_iter().cloned().collect();
            let request = GenerateRequest {
                model_id: model.unwrap_or_else(|| default_model_id().to_string()),
                prompt,
                referenced_chapter_ids,
            };
            let text = block_on(MockAssistProvider::default().generate(request))??;
            println!("{text}");
            if apply && !session.apply_generated_text(&text)? {
                bail!("no chapter selected to apply generated text to");
            }
        }
        Command::Analyze {
            project_id,
            chapter_id,
            prompt,
            model,
        } => {
            let session = open_editor(store, &project_id)?;
            let chapter = session
                .chapter(&chapter_id)
                .cloned()
                .ok_or_else(|| anyhow!("chapter not found: {chapter_id}"))?;
            let request = AnalyzeRequest {
                model_id: model.unwrap_or_else(|| default_model_id().to_string()),
                prompt,
                chapter,
            };
            let report = block_on(MockAssistProvider::default().analyze(request))??;
            println!("{report}");
        }
        Command::Version => println!("zhixia_core version={}", core_version()),
    }
    Ok(())
}

fn open_editor<'store, R: ProjectRepository>(
    store: &'store R,
    project_id: &ProjectId,
) -> Result<EditorSession<'store, R>> {
    EditorSession::open(store, project_id)?
        .ok_or_else(|| anyhow!("project not found: {project_id}"))
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("starting assist runtime")?;
    Ok(runtime.block_on(future))
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report_deleted(deleted: bool) {
    if deleted {
        println!("deleted");
    } else {
        println!("nothing deleted");
    }
}
