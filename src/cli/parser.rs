use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rattendance
/// RFID attendance tracker backed by a sheet store
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "RFID attendance tracker: debounce card taps and keep per-student counters in a sheet",
    long_about = None
)]
pub struct Cli {
    /// Override sheet database path (useful for tests or custom setups)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize configuration, database and the attendance sheet
    Init {
        /// Re-seed the sheet even if it already holds attendance data
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Run the scan loop
    Run {
        /// Reader script: one sample per poll (0/-, 1/+, ?/x); "-" reads stdin
        #[arg(long, value_name = "FILE", default_value = "-")]
        script: String,

        /// Stop after this many cycles
        #[arg(long, value_name = "N")]
        cycles: Option<u64>,

        /// Credit this student on every arrival instead of a random one
        #[arg(long, value_name = "ID", allow_negative_numbers = true)]
        student: Option<i64>,

        /// Use a throwaway in-memory sheet instead of the database
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Skip every loop delay
        #[arg(long = "no-wait")]
        no_wait: bool,
    },

    /// Credit one attendance to a student by hand
    Scan {
        /// Student id (0-based)
        #[arg(long, value_name = "ID", allow_negative_numbers = true)]
        student: i64,
    },

    /// Print the attendance table
    Show,

    /// Set every attendance counter back to 0
    Reset {
        /// Do not ask for confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Summarize the internal log, or print it with --print
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Create a backup copy of the sheet database
    Backup {
        /// Destination file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip)
        #[arg(long)]
        compress: bool,

        /// Overwrite without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the attendance table
    Export {
        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
