use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bindery")]
#[command(about = "Organize long-form writing into books, folders and chapters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the books (defaults to $BINDERY_HOME, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List books
    Books {
        /// Include closed books
        #[arg(short, long)]
        all: bool,
    },

    /// List the sub-folders and chapters of a folder
    #[command(alias = "ls")]
    List {
        /// Folder path, e.g. "My Book/Part One"
        path: String,
    },

    /// Create a book
    NewBook { name: String },

    /// Create a sub-folder
    NewFolder {
        /// Parent folder path
        parent: String,
        name: String,
    },

    /// Create a chapter
    #[command(alias = "new")]
    NewChapter {
        /// Parent folder path
        parent: String,
        name: String,
    },

    /// Rename a book, folder or chapter
    #[command(alias = "mv")]
    Rename { path: String, new_name: String },

    /// Delete a node and everything under it
    #[command(alias = "rm")]
    Delete { path: String },

    /// Move a node one step up or down among its siblings
    Move {
        path: String,
        #[arg(value_enum)]
        direction: MoveDirection,
    },

    /// Replace the order of a folder's children
    Reorder {
        /// Parent folder path ("" for books)
        parent: String,
        #[arg(value_enum)]
        kind: OrderKind,
        /// Names in the desired order
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Print a chapter's content
    Show {
        path: String,
        /// Print plain text instead of markup
        #[arg(long)]
        plain: bool,
    },

    /// Replace a chapter's content (from --file, or stdin)
    Write {
        path: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print or replace a chapter's notes
    Notes {
        path: String,
        /// New notes text
        #[arg(long, conflicts_with = "file")]
        set: Option<String>,
        /// Read new notes from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Export a chapter, or every chapter under a folder, as .docx
    Export {
        path: String,
        /// Output file (defaults to "<name>.docx" in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Word counts per day
    Stats {
        /// Subtree to count (defaults to everything)
        #[arg(default_value = "")]
        path: String,
        /// Only the last N days (0 = all)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Search chapter text and notes
    Search {
        query: String,
        /// Limit the search to a subtree
        #[arg(long = "in", default_value = "")]
        within: String,
    },

    /// Show a closed book again
    Open { book: String },

    /// Hide a book from listings
    Close { book: String },

    /// Print or update a book's description and author
    Info {
        book: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., heading-size)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderKind {
    Folders,
    Chapters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move() {
        let cli = Cli::try_parse_from(["bindery", "move", "Book/Ch", "up"]).unwrap();
        match cli.command {
            Some(Commands::Move { path, direction }) => {
                assert_eq!(path, "Book/Ch");
                assert_eq!(direction, MoveDirection::Up);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_reorder_names() {
        let cli = Cli::try_parse_from(["bindery", "reorder", "Book", "chapters", "B", "A"]).unwrap();
        match cli.command {
            Some(Commands::Reorder { kind, names, .. }) => {
                assert_eq!(kind, OrderKind::Chapters);
                assert_eq!(names, vec!["B", "A"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["bindery", "books", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }

    #[test]
    fn notes_set_and_file_conflict() {
        assert!(Cli::try_parse_from([
            "bindery", "notes", "B/C", "--set", "x", "--file", "y"
        ])
        .is_err());
    }
}
