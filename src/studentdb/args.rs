use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use studentdb::model::{Field, SearchField, StudentId};

#[derive(Parser, Debug)]
#[command(name = "studentdb", version)]
#[command(about = "Student records store backed by SQLite", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file (overrides the configured one)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print students as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default when no command is given)
    Menu,

    /// Display all active students
    #[command(alias = "ls")]
    List,

    /// Show every column of one student
    #[command(alias = "v")]
    Show { id: StudentId },

    /// Add a new student
    #[command(alias = "n")]
    Add(AddArgs),

    /// Update one field of a student
    #[command(alias = "u")]
    Update {
        id: StudentId,

        /// Column to change (e.g. city, gpa, advisor)
        field: Field,

        /// New value; an empty advisor clears it
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Soft-delete one or more students
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<StudentId>,
    },

    /// Search active students by one field
    #[command(alias = "s")]
    Search {
        /// Column to search (e.g. major, gpa, phone)
        field: SearchField,

        /// Substring to look for, or an exact GPA
        query: String,
    },

    /// Bulk-insert students from a CSV file
    Import {
        /// CSV file (defaults to the configured import file)
        path: Option<PathBuf>,
    },

    /// Create the Students table if it does not exist
    Init,

    /// Get or set configuration
    Config {
        /// Configuration key (database, import-file)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub gpa: String,

    #[arg(long)]
    pub major: String,

    #[arg(long, visible_alias = "advisor")]
    pub faculty_advisor: Option<String>,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long, visible_alias = "zip")]
    pub zip_code: String,

    #[arg(long, visible_alias = "phone")]
    pub mobile_phone_number: String,
}
