//! memo: command-line front end for memo notes.
//!
//! Every invocation loads the note store first, which also copies any notes
//! left in the superseded on-device cache into an empty remote store.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use memo_core::{Category, CategoryFilter, Note, NoteForm};
use memo_db::{Database, JsonFileCache, NoteStore, PoolConfig};

#[derive(Parser)]
#[command(name = "memo")]
#[command(author, version, about = "Manage memo notes")]
#[command(propagate_version = true)]
struct Cli {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Path of the superseded local note cache
    #[arg(long, env = "MEMO_LOCAL_CACHE", global = true)]
    local_cache: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, newest first
    List(ViewArgs),

    /// Show one note in full
    Show {
        /// Note identifier
        id: Uuid,
    },

    /// Create a note
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short = 'b', long)]
        content: String,

        #[arg(short, long, default_value = "other")]
        category: Category,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Edit a note's fields
    Edit {
        /// Note identifier
        id: Uuid,

        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete a note
    Remove {
        /// Note identifier
        id: Uuid,
    },

    /// Delete every note in the remote store
    Clear {
        /// Confirm deletion of all notes
        #[arg(long)]
        yes: bool,
    },

    /// Show note counts
    Stats(ViewArgs),

    /// Copy the local cache into the remote store if it is empty
    Migrate,
}

/// Category and search filters for the derived view.
#[derive(Args, Debug, Clone)]
struct ViewArgs {
    /// Category to show, or "all"
    #[arg(short, long, default_value = "all")]
    category: CategoryFilter,

    /// Case-insensitive text to match in title, content or tags
    #[arg(short, long, default_value = "")]
    search: String,
}

/// Fields to change; anything omitted keeps its current value.
#[derive(Args, Debug, Clone, Default)]
struct EditFields {
    #[arg(short, long)]
    title: Option<String>,

    #[arg(short = 'b', long)]
    content: Option<String>,

    #[arg(short, long)]
    category: Option<Category>,

    /// Replacement tags (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tags")]
    clear_tags: bool,
}

impl EditFields {
    /// The form for `note` with these changes applied.
    fn apply_to(self, note: &Note) -> NoteForm {
        let mut form = NoteForm::from(note);
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(content) = self.content {
            form.content = content;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if self.clear_tags {
            form.tags.clear();
        } else if !self.tags.is_empty() {
            form.tags = self.tags;
        }
        form
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memo_cli=warn,memo_db=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = cli
        .database_url
        .context("DATABASE_URL is not set (use --database-url)")?;
    let db = Database::connect_with_config(&database_url, PoolConfig::from_env()).await?;
    let cache = match cli.local_cache {
        Some(path) => JsonFileCache::new(path),
        None => JsonFileCache::from_env(),
    };

    let mut store = NoteStore::new(Arc::new(db.notes), Arc::new(cache));
    let migration = store.load().await;
    tracing::debug!(
        subsystem = "cli",
        outcome = %migration,
        result_count = store.all_notes().len(),
        "Store loaded"
    );
    let json = cli.json;

    match cli.command {
        Commands::List(view) => {
            apply_view(&mut store, view);
            let notes = store.notes();
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("No notes.");
            } else {
                for note in notes {
                    println!("{}", output::note_line(note));
                }
            }
        }
        Commands::Show { id } => {
            let Some(note) = store.get_by_id(id) else {
                bail!("Note {} not found", id);
            };
            print_note(note, json)?;
        }
        Commands::Add {
            title,
            content,
            category,
            tags,
        } => {
            let form = NoteForm::new(title, content)
                .with_category(category)
                .with_tags(tags);
            let note = store.create(form).await?;
            print_note(&note, json)?;
        }
        Commands::Edit { id, fields } => {
            let Some(current) = store.get_by_id(id) else {
                bail!("Note {} not found", id);
            };
            let form = fields.apply_to(current);
            match store.update(id, form).await? {
                Some(note) => print_note(&note, json)?,
                None => bail!("Note {} not found", id),
            }
        }
        Commands::Remove { id } => {
            store.delete(id).await?;
            println!("Deleted {}", id);
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every note without --yes");
            }
            let removed = store.clear_all().await?;
            println!("Deleted {} notes", removed);
        }
        Commands::Stats(view) => {
            apply_view(&mut store, view);
            let stats = store.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", output::stats_text(&stats));
            }
        }
        Commands::Migrate => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "migrated": migration.migrated(),
                        "outcome": migration.to_string(),
                    })
                );
            } else {
                println!("{}", migration);
            }
        }
    }

    Ok(())
}

fn apply_view(store: &mut NoteStore, view: ViewArgs) {
    store.filter_by_category(view.category);
    store.search(view.search);
}

fn print_note(note: &Note, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        print!("{}", output::note_detail(note));
    }
    Ok(())
}
