use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_journal::cli::{handle_entry_command, EntryCommands, Session};
use finance_journal::config::{paths::JournalPaths, settings::Settings};
use finance_journal::storage::Storage;

#[derive(Parser)]
#[command(
    name = "journal",
    version,
    about = "Personal finance journal for income and expense entries",
    long_about = "Records dated income and expense entries in a plain text journal \
                  and computes the balance, lists, searches and edits entries. \
                  Run without a command to use the interactive menu."
)]
struct Cli {
    /// Journal file to use instead of the configured one
    #[arg(long, env = "FINANCE_JOURNAL_FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    #[command(alias = "i")]
    Interactive,

    #[command(flatten)]
    Entry(EntryCommands),

    /// Show recent changes from the audit log
    Log {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = JournalPaths::new()?;
    let settings = Settings::load(&paths)?;

    let mut storage = Storage::open(paths.clone(), &settings, cli.file)?;

    match cli.command {
        None | Some(Commands::Interactive) => {
            let stdin = io::stdin();
            Session::new(&mut storage, stdin.lock(), io::stdout(), settings.date_format.clone())
                .run()?;
        }
        Some(Commands::Entry(cmd)) => {
            handle_entry_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Log { limit }) => match storage.audit() {
            Some(logger) => {
                let records = logger.read_recent(limit)?;
                if records.is_empty() {
                    println!("No changes recorded yet.");
                }
                for record in records {
                    println!("{}", record.format_human_readable());
                }
            }
            None => println!("Audit logging is disabled in {}", paths.settings_file().display()),
        },
        Some(Commands::Config) => {
            println!("Finance Journal Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Journal file:     {}", storage.journal.path().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Atomic writes: {}", settings.atomic_writes);
            println!("  Audit enabled: {}", settings.audit_enabled);
            println!("  Date format:   {}", settings.date_format);
        }
    }

    Ok(())
}
