use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod menu;
mod prompt;
mod report;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use menu::Menu;
use petreg::{Animal, Config, Kind, Registry, storage::flat_file};
use prompt::Prompt;
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "pets.toml", global = true)]
    config: PathBuf,

    /// The data file to use, overriding the configuration
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let data_file = self.file.unwrap_or_else(|| {
            Config::load_or_default(&self.config).resolve_data_file(&self.config)
        });

        self.command
            .unwrap_or(Command::Menu)
            .run(&self.config, data_file)
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

        // Diagnostics go to stderr so they never interleave with prompts.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
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
    /// Start an interactive session (default)
    Menu,

    /// Write a default configuration file
    Init,

    /// Register an animal and save it to the data file
    Add(Add),

    /// List every animal in the data file
    List,

    /// Show every animal with the given name
    ///
    /// Names are compared case-insensitively.
    Find(Find),
}

impl Command {
    fn run(self, config: &Path, data_file: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Menu => run_menu(data_file)?,
            Self::Init => init(config)?,
            Self::Add(command) => command.run(&data_file)?,
            Self::List => list(&data_file)?,
            Self::Find(command) => command.run(&data_file)?,
        }
        Ok(())
    }
}

#[instrument]
fn run_menu(data_file: PathBuf) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let prompt = Prompt::new(stdin.lock(), io::stdout().lock());
    Menu::new(prompt, Registry::new(), data_file).run()
}

#[instrument]
fn init(config: &Path) -> anyhow::Result<()> {
    if config.exists() {
        anyhow::bail!(
            "Configuration already exists at {} (refusing to overwrite)",
            config.display()
        );
    }

    Config::default()
        .save(config)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config.display()))?;

    println!("Created {}", config.display());
    Ok(())
}

#[instrument]
fn list(data_file: &Path) -> anyhow::Result<()> {
    let registry = open_registry(data_file)?;
    report::list(&mut io::stdout().lock(), &registry)?;
    Ok(())
}

/// Loads the registry from `data_file`, starting empty if it does not exist
/// yet.
fn open_registry(data_file: &Path) -> anyhow::Result<Registry> {
    let mut registry = Registry::new();
    if !data_file.exists() {
        tracing::info!("No data file at {}, starting empty", data_file.display());
        return Ok(registry);
    }

    let skipped = registry
        .load(data_file)
        .with_context(|| format!("Failed to load {}", data_file.display()))?;
    report::skipped(&mut io::stderr().lock(), data_file, &skipped)?;
    Ok(registry)
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// The kind of animal: 'cat' or 'dog'
    kind: String,

    /// The animal's name
    name: String,

    /// The animal's age in whole years
    #[arg(long, short)]
    age: u32,

    /// Fur colour for a cat, breed for a dog
    #[arg(long, short = 't')]
    attribute: String,
}

impl Add {
    #[instrument]
    fn run(self, data_file: &Path) -> anyhow::Result<()> {
        let kind: Kind = self.kind.parse()?;
        let animal = Animal::new(kind, self.name, self.age, self.attribute);

        // Appending leaves lines the loader would skip untouched on disk.
        flat_file::append(data_file, &animal)
            .with_context(|| format!("Failed to save {}", data_file.display()))?;

        let message = format!("✅ {} '{}' registered.", animal.kind(), animal.name());
        writeln!(io::stdout().lock(), "{}", message.success())?;
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Find {
    /// The name to look for
    name: String,
}

impl Find {
    #[instrument]
    fn run(self, data_file: &Path) -> anyhow::Result<()> {
        let registry = open_registry(data_file)?;
        report::matches(&mut io::stdout().lock(), &registry, &self.name)?;
        Ok(())
    }
}
