use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::{ChecklistItemId, CommentId, ImageId, TaskId, TaskStatus};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A three-stage task board for the terminal", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Store file (defaults to the configured file, then the platform data dir)
    #[arg(short, long, value_name = "FILE", env = "TASKBOARD_FILE", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task operations
    Task(TaskCommand),
    /// Checklist operations
    Checklist(ChecklistCommand),
    /// Image attachment operations
    Image(ImageCommand),
    /// Comment operations
    Comment(CommentCommand),
    /// Show the board: per-column counts and cards
    Board,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the To Do column
    Add {
        /// Task text
        text: String,
    },
    /// List tasks in stored order
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
    /// Get a specific task
    Get {
        #[arg(long)]
        id: TaskId,
    },
    /// Move a task to any column
    Move {
        #[arg(long)]
        id: TaskId,
        #[arg(long, value_parser = parse_status)]
        status: TaskStatus,
    },
    /// To Do -> In Progress
    Start {
        #[arg(long)]
        id: TaskId,
    },
    /// In Progress -> To Do
    Back {
        #[arg(long)]
        id: TaskId,
    },
    /// In Progress -> Done
    Complete {
        #[arg(long)]
        id: TaskId,
    },
    /// Done -> To Do
    Reopen {
        #[arg(long)]
        id: TaskId,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        id: TaskId,
    },
    /// Replace a task's description
    Describe {
        #[arg(long)]
        id: TaskId,
        #[arg(long)]
        text: String,
    },
}

// Checklist commands
#[derive(Args)]
pub struct ChecklistCommand {
    #[command(subcommand)]
    pub action: ChecklistAction,
}

#[derive(Subcommand)]
pub enum ChecklistAction {
    /// Add a checklist item
    Add {
        #[arg(long)]
        task: TaskId,
        #[arg(long)]
        text: String,
    },
    /// Flip an item between open and completed
    Toggle {
        #[arg(long)]
        task: TaskId,
        #[arg(long)]
        item: ChecklistItemId,
    },
    /// Delete a checklist item
    Delete {
        #[arg(long)]
        task: TaskId,
        #[arg(long)]
        item: ChecklistItemId,
    },
}

// Image commands
#[derive(Args)]
pub struct ImageCommand {
    #[command(subcommand)]
    pub action: ImageAction,
}

#[derive(Subcommand)]
pub enum ImageAction {
    /// Attach image files to a task
    Add {
        #[arg(long)]
        task: TaskId,
        /// Image files, decoded concurrently
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove an image attachment
    Delete {
        #[arg(long)]
        task: TaskId,
        #[arg(long)]
        image: ImageId,
    },
}

// Comment commands
#[derive(Args)]
pub struct CommentCommand {
    #[command(subcommand)]
    pub action: CommentAction,
}

#[derive(Subcommand)]
pub enum CommentAction {
    /// Add a timestamped comment
    Add {
        #[arg(long)]
        task: TaskId,
        #[arg(long)]
        text: String,
    },
    /// Delete a comment
    Delete {
        #[arg(long)]
        task: TaskId,
        #[arg(long)]
        comment: CommentId,
    },
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    s.parse()
}
