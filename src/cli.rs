use std::path::{Path, PathBuf};

mod add;
mod batch;
mod check;
mod delete;
mod edit;
mod export;
mod import;
mod init;
mod list;
mod show;
mod siblings;
mod terminal;

use add::Add;
use batch::Batch;
use check::Check;
use clap::ArgAction;
use delete::Delete;
use edit::Edit;
use export::Export;
use import::Import;
use init::Init;
use list::List;
use show::Show;
use siblings::Siblings;
use taxa::domain::{CONFIG_FILENAME, Config};

/// Loads the configuration from the conventional path, falling back to
/// defaults when the file is absent.
fn load_config() -> Config {
    Config::load_or_default(Path::new(CONFIG_FILENAME))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The hierarchy spreadsheet file to operate on
    #[arg(short, long, default_value = "hierarchy.csv", global = true)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run(self.file)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Start a new hierarchy with a single root
    Init(Init),

    /// Add a node beneath a parent
    Add(Add),

    /// Add several entries beneath one parent, read from stdin
    Batch(Batch),

    /// Edit a node's name and definition
    Edit(Edit),

    /// Delete a childless node
    Delete(Delete),

    /// Show a node in detail
    Show(Show),

    /// List the siblings of a node
    Siblings(Siblings),

    /// List nodes, optionally filtered by kind or subtree
    List(List),

    /// Convert a spreadsheet in either accepted shape into the hierarchy file
    Import(Import),

    /// Export the hierarchy to a spreadsheet file
    Export(Export),

    /// Check hierarchy health (cycles, dangling references)
    Check(Check),
}

impl Command {
    fn run(self, file: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(&file),
            Self::Add(cmd) => cmd.run(&file),
            Self::Batch(cmd) => cmd.run(&file),
            Self::Edit(cmd) => cmd.run(&file),
            Self::Delete(cmd) => cmd.run(&file),
            Self::Show(cmd) => cmd.run(&file),
            Self::Siblings(cmd) => cmd.run(&file),
            Self::List(cmd) => cmd.run(&file),
            Self::Import(cmd) => cmd.run(&file),
            Self::Export(cmd) => cmd.run(&file),
            Self::Check(cmd) => cmd.run(&file),
        }
    }
}
