// Book tracker CLI binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use book_tracker::{
    Book, BookFormData, CollectionStore, FileStorage, LoadOutcome, ReadingStatus,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "book_tracker")]
#[command(about = "Track the books you want to read, are reading and have finished", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the collection (defaults to the platform data directory)
    #[arg(long, global = true, env = "BOOK_TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books, optionally one shelf only
    List {
        /// wantToRead, reading or completed
        #[arg(short, long)]
        status: Option<ReadingStatus>,
    },

    /// Show one book in full
    Show {
        /// Book ID
        id: String,
    },

    /// Add a book
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        /// Total pages
        #[arg(short, long)]
        pages: Option<u32>,
        #[arg(short, long)]
        genre: Option<String>,
        /// Initial status (defaults to wantToRead)
        #[arg(short, long)]
        status: Option<ReadingStatus>,
    },

    /// Change a book's reading status
    Status {
        /// Book ID
        id: String,
        /// wantToRead, reading or completed
        status: ReadingStatus,
        /// Finish date (YYYY-MM-DD) when marking completed
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },

    /// Record the page you are on
    Progress {
        /// Book ID
        id: String,
        page: u32,
    },

    /// Remove a book
    Delete {
        /// Book ID
        id: String,
    },

    /// Find books by title or author
    Search { query: String },

    /// Summary of the collection
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = open_store(cli.data_dir)?;

    match cli.command {
        Commands::List { status } => cmd_list(&store, status),
        Commands::Show { id } => cmd_show(&store, &id),
        Commands::Add {
            title,
            author,
            pages,
            genre,
            status,
        } => cmd_add(&store, title, author, pages, genre, status),
        Commands::Status {
            id,
            status,
            end_date,
        } => {
            let book = store.update_status(&id, status, end_date)?;
            print_line(&book);
            Ok(())
        }
        Commands::Progress { id, page } => {
            let book = store.update_progress(&id, page)?;
            print_line(&book);
            Ok(())
        }
        Commands::Delete { id } => {
            if !store.delete(&id)? {
                anyhow::bail!("No book with id {}", id);
            }
            println!("Deleted {}", id);
            Ok(())
        }
        Commands::Search { query } => {
            for book in store.search(&query)? {
                print_line(&book);
            }
            Ok(())
        }
        Commands::Stats => cmd_stats(&store),
    }
}

fn open_store(data_dir: Option<PathBuf>) -> Result<CollectionStore<FileStorage>> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStorage::default_dir()
            .context("Could not determine a data directory; pass --data-dir")?,
    };

    let store = CollectionStore::new(FileStorage::new(&dir));
    if let LoadOutcome::Recovered { reason } = store.load()? {
        eprintln!(
            "Warning: could not read the collection in {} ({}); showing sample books",
            dir.display(),
            reason
        );
    }
    Ok(store)
}

fn cmd_list(store: &CollectionStore<FileStorage>, status: Option<ReadingStatus>) -> Result<()> {
    let books = match status {
        Some(status) => store.by_status(status)?,
        None => store.books()?,
    };
    if books.is_empty() {
        println!("No books.");
    }
    for book in &books {
        print_line(book);
    }
    Ok(())
}

fn cmd_show(store: &CollectionStore<FileStorage>, id: &str) -> Result<()> {
    let book = store
        .get(id)?
        .with_context(|| format!("No book with id {}", id))?;

    println!("{}", book.title);
    println!("  by {}", book.author);
    println!("  id:        {}", book.id);
    println!("  status:    {}", book.status);
    let optional = [
        ("genre", book.genre.clone()),
        ("publisher", book.publisher.clone()),
        ("language", book.language.clone()),
        ("isbn", book.isbn.clone()),
        ("published", book.publication_date.clone()),
        ("pages", book.page_count.map(|p| p.to_string())),
        ("page", book.current_page.map(|p| p.to_string())),
        ("started", book.start_date.map(|d| d.to_string())),
        ("finished", book.end_date.map(|d| d.to_string())),
        ("rating", book.rating.map(|r| format!("{}/5", r))),
        ("notes", book.notes.clone()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("  {:<10} {}", format!("{}:", label), value);
        }
    }
    if let Some(percent) = book.progress_percent() {
        println!("  progress:  {}%", percent);
    }
    Ok(())
}

fn cmd_add(
    store: &CollectionStore<FileStorage>,
    title: String,
    author: String,
    pages: Option<u32>,
    genre: Option<String>,
    status: Option<ReadingStatus>,
) -> Result<()> {
    let data = BookFormData {
        page_count: pages,
        genre,
        status,
        ..BookFormData::new(title, author)
    };
    let book = store.add(data)?;
    println!("Added {}", book.id);
    print_line(&book);
    Ok(())
}

fn cmd_stats(store: &CollectionStore<FileStorage>) -> Result<()> {
    let stats = store.stats()?;
    println!("Books:        {}", stats.total);
    println!("Want to read: {}", stats.want_to_read);
    println!("Reading:      {}", stats.reading);
    println!("Completed:    {}", stats.completed);
    println!("Pages read:   {}", stats.pages_read);
    if let Some(average) = stats.average_rating {
        println!("Avg rating:   {:.1}", average);
    }
    Ok(())
}

fn print_line(book: &Book) {
    let progress = match (book.status, book.progress_percent()) {
        (ReadingStatus::Reading, Some(percent)) => format!(" {}%", percent),
        _ => String::new(),
    };
    println!(
        "{}  [{}{}]  {} - {}",
        book.id, book.status, progress, book.title, book.author
    );
}
