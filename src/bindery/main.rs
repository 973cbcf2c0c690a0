use bindery::api::{BinderyApi, MessageLevel, SearchHit, StatsReport};
use bindery::commands::content::SaveMode;
use bindery::commands::{CmdMessage, MatchKind};
use bindery::error::{BinderyError, Result};
use bindery::model::{BookEntry, ChildKind, Direction, Listing};
use bindery::store::fs::FileStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::io::Read;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands, MoveDirection, OrderKind};

const HOME_ENV: &str = "BINDERY_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: BinderyApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Books { all }) => handle_books(&mut ctx, all),
        Some(Commands::List { path }) => handle_list(&mut ctx, &path),
        Some(Commands::NewBook { name }) => handle_result(ctx.api.create_book(&name)),
        Some(Commands::NewFolder { parent, name }) => {
            handle_result(ctx.api.create_folder(&parent, &name))
        }
        Some(Commands::NewChapter { parent, name }) => {
            handle_result(ctx.api.create_chapter(&parent, &name))
        }
        Some(Commands::Rename { path, new_name }) => {
            handle_result(ctx.api.rename(&path, &new_name))
        }
        Some(Commands::Delete { path }) => handle_result(ctx.api.delete(&path)),
        Some(Commands::Move { path, direction }) => handle_move(&mut ctx, &path, direction),
        Some(Commands::Reorder {
            parent,
            kind,
            names,
        }) => handle_reorder(&mut ctx, &parent, kind, &names),
        Some(Commands::Show { path, plain }) => handle_show(&mut ctx, &path, plain),
        Some(Commands::Write { path, file }) => handle_write(&mut ctx, &path, file),
        Some(Commands::Notes { path, set, file }) => handle_notes(&mut ctx, &path, set, file),
        Some(Commands::Export { path, output }) => handle_export(&mut ctx, &path, output),
        Some(Commands::Stats { path, days }) => handle_stats(&mut ctx, &path, days),
        Some(Commands::Search { query, within }) => handle_search(&mut ctx, &query, &within),
        Some(Commands::Open { book }) => handle_result(ctx.api.open_book(&book)),
        Some(Commands::Close { book }) => handle_result(ctx.api.close_book(&book)),
        Some(Commands::Info {
            book,
            description,
            author,
        }) => handle_info(&mut ctx, &book, description, author),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_books(&mut ctx, false),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => match std::env::var_os(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("com", "bindery", "bindery")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    BinderyError::Store("Could not determine a data directory".to_string())
                })?,
        },
    };
    log::debug!("Using data directory {}", data_dir.display());

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: BinderyApi::new(store, data_dir),
    })
}

fn handle_result(result: Result<bindery::commands::CmdResult>) -> Result<()> {
    let result = result?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_books(ctx: &mut AppContext, all: bool) -> Result<()> {
    let result = ctx.api.list_books(all)?;
    print_books(&result.books);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, path: &str) -> Result<()> {
    let result = ctx.api.list_children(path)?;
    if let Some(listing) = &result.listing {
        print_listing(listing);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, path: &str, direction: MoveDirection) -> Result<()> {
    let direction = match direction {
        MoveDirection::Up => Direction::Up,
        MoveDirection::Down => Direction::Down,
    };
    handle_result(ctx.api.move_node(path, direction))
}

fn handle_reorder(
    ctx: &mut AppContext,
    parent: &str,
    kind: OrderKind,
    names: &[String],
) -> Result<()> {
    let kind = match kind {
        OrderKind::Folders => ChildKind::Folders,
        OrderKind::Chapters => ChildKind::Chapters,
    };
    handle_result(ctx.api.reorder(parent, kind, names))
}

fn handle_show(ctx: &mut AppContext, path: &str, plain: bool) -> Result<()> {
    let result = if plain {
        ctx.api.get_plain_text(path)?
    } else {
        ctx.api.get_content(path)?
    };
    if let Some(text) = &result.text {
        println!("{}", text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_write(ctx: &mut AppContext, path: &str, file: Option<PathBuf>) -> Result<()> {
    let markup = read_input(file)?;
    handle_result(ctx.api.set_content(path, &markup, SaveMode::Save))
}

fn handle_notes(
    ctx: &mut AppContext,
    path: &str,
    set: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let notes = match (set, file) {
        (Some(text), _) => Some(text),
        (None, Some(file)) => Some(read_input(Some(file))?),
        (None, None) => None,
    };

    match notes {
        Some(notes) => handle_result(ctx.api.set_notes(path, &notes, SaveMode::Save)),
        None => {
            let result = ctx.api.get_notes(path)?;
            match result.text.as_deref() {
                Some("") | None => println!("{}", "No notes.".dimmed()),
                Some(text) => println!("{}", text),
            }
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn handle_export(ctx: &mut AppContext, path: &str, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(path)?;
    print_messages(&result.messages);
    if let Some(document) = &result.document {
        let target = output.unwrap_or_else(|| PathBuf::from(&document.file_name));
        std::fs::write(&target, &document.bytes)?;
        println!(
            "{}",
            format!("Exported {}", target.display()).green()
        );
    }
    Ok(())
}

fn handle_stats(ctx: &mut AppContext, path: &str, days: Option<u32>) -> Result<()> {
    let result = ctx.api.stats(path, days)?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, query: &str, within: &str) -> Result<()> {
    let result = ctx.api.search(within, query)?;
    print_hits(&result.hits);
    print_messages(&result.messages);
    Ok(())
}

fn handle_info(
    ctx: &mut AppContext,
    book: &str,
    description: Option<String>,
    author: Option<String>,
) -> Result<()> {
    let result = if description.is_some() || author.is_some() {
        ctx.api
            .set_book_info(book, description.as_deref(), author.as_deref())?
    } else {
        ctx.api.book_info(book)?
    };
    if let Some(info) = &result.book_info {
        println!("{} {}", "Author:".bold(), info.author);
        println!("{}", "Description:".bold());
        println!("{}", info.description);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            if let Some(text) = ctx.api.config_entries().text {
                println!("{}", text);
            }
            Ok(())
        }
        (Some(key), None) => {
            let entries = ctx.api.config().entries();
            match entries.iter().find(|(k, _)| *k == key) {
                Some((k, v)) => println!("{} = {}", k, v),
                None => println!("Unknown config key: {}", key),
            }
            Ok(())
        }
        (Some(key), Some(value)) => handle_result(ctx.api.set_config(&key, &value)),
    }
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn print_books(books: &[BookEntry]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }
    for (i, book) in books.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        if book.is_open {
            println!("{}{}", idx, book.name.bold());
        } else {
            println!("{}{} {}", idx, book.name.dimmed(), "(closed)".dimmed());
        }
    }
}

fn print_listing(listing: &Listing) {
    if listing.subfolders.is_empty() && listing.chapters.is_empty() {
        println!("{}", "Empty.".dimmed());
        return;
    }
    for name in &listing.subfolders {
        println!("  {}/", name.blue().bold());
    }
    for (i, name) in listing.chapters.iter().enumerate() {
        println!("  {}{}", format!("{}. ", i + 1).yellow(), name);
    }
}

const BAR_WIDTH: usize = 40;

fn print_stats(stats: &StatsReport) {
    let max = stats.counts.iter().copied().max().unwrap_or(0);
    for (label, count) in stats.labels.iter().zip(&stats.counts) {
        let bar = if max == 0 {
            0
        } else {
            (count * BAR_WIDTH).div_ceil(max)
        };
        println!("{} {:>7} {}", label, count, "█".repeat(bar).cyan());
    }
    println!("{} {}", "Total words:".bold(), stats.total_words);
}

fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        let kind = match hit.kind {
            MatchKind::Content => "content".normal(),
            MatchKind::Notes => "notes".dimmed(),
        };
        println!("{}  {}", hit.path, kind);
    }
}
