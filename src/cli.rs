use std::path::{Path, PathBuf};

mod book;
mod donor_match;
mod init;
mod list;
mod options;
mod register;
mod render;
mod status;
mod terminal;

use anyhow::Context;
use book::Book;
use bloodline::{Config, DirectoryStore, RecordStore, Registry};
use clap::ArgAction;
use donor_match::Match;
use init::Init;
use list::{List, Requests};
use options::Options;
use register::{Register, SubmitRequest};
use status::Status;

/// Name of the directory holding configuration and data.
const WORKSPACE_DIR: &str = ".bloodline";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory containing the `.bloodline` workspace
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(&self.root)
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
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show record counts (default)
    Status(Status),

    /// Initialize a new registry workspace
    Init,

    /// Register a donor or recipient
    #[command(subcommand)]
    Register(Register),

    /// Submit a blood request
    Request(SubmitRequest),

    /// Book a donation appointment
    Book(Book),

    /// List the records of one collection
    List(List),

    /// List blood requests, optionally filtered by blood type and location
    Requests(Requests),

    /// Show requests the most recently registered donor can serve
    Match(Match),

    /// Print the choices for a form field
    Options(Options),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(&Workspace::open(root)?)?,
            Self::Init => Init::run(root)?,
            Self::Register(command) => command.run(&mut Workspace::open(root)?)?,
            Self::Request(command) => command.run(&mut Workspace::open(root)?)?,
            Self::Book(command) => command.run(&mut Workspace::open(root)?)?,
            Self::List(command) => command.run(&Workspace::open(root)?)?,
            Self::Requests(command) => command.run(&Workspace::open(root)?)?,
            Self::Match(command) => command.run(&Workspace::open(root)?)?,
            Self::Options(command) => command.run(&Workspace::open(root)?)?,
        }
        Ok(())
    }
}

/// The registry and configuration found under a root directory.
pub struct Workspace {
    pub config: Config,
    pub registry: Registry<DirectoryStore>,
}

impl Workspace {
    /// Opens the workspace under `root`, using defaults for anything missing.
    ///
    /// Fails if the configured key prefix cannot be used as a storage key.
    fn open(root: &Path) -> anyhow::Result<Self> {
        let dir = root.join(WORKSPACE_DIR);
        let config = Config::load_or_default(&dir.join("config.toml"));

        let store = DirectoryStore::new(config.data_dir(&dir));
        let records = RecordStore::new(store)
            .with_key_prefix(config.key_prefix())
            .context("Invalid key_prefix in config.toml")?;
        tracing::debug!("Opened registry at {}", records.store().root().display());

        Ok(Self {
            config,
            registry: Registry::new(records),
        })
    }
}

#[cfg(test)]
mod tests {
    use bloodline::{Collection, FormFields};

    use super::*;

    #[test]
    fn workspace_honours_key_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(WORKSPACE_DIR);
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = Config::default();
        config.set_key_prefix("north_".to_string());
        config.save(&dir.join("config.toml")).unwrap();

        let mut workspace = Workspace::open(tmp.path()).unwrap();
        workspace
            .registry
            .submit_request(
                &FormFields::new()
                    .with("bloodType", "A+")
                    .with("urgency", "low")
                    .with("location", "Springfield"),
            )
            .unwrap();

        assert_eq!(
            workspace.registry.records().key(Collection::Requests),
            "north_requests"
        );
        assert!(dir.join("data/north_requests.json").is_file());
    }

    #[test]
    fn missing_workspace_opens_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::open(tmp.path()).unwrap();
        assert_eq!(workspace.registry.counts().total(), 0);
    }

    #[test]
    fn workspace_rejects_unusable_key_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(WORKSPACE_DIR);
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = Config::default();
        config.set_key_prefix("site.a_".to_string());
        config.save(&dir.join("config.toml")).unwrap();

        let Err(error) = Workspace::open(tmp.path()) else {
            panic!("expected the key prefix to be rejected");
        };
        assert!(error.to_string().contains("key_prefix"));
        assert!(!dir.join("data").exists());
    }
}
