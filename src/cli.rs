// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Global connection flags, every verb, and the verb-to-command table.

use clap::{Parser, Subcommand};
use podremote::args::{InputAction, PathAction, UsageError, expand_path, help_for};
use podremote::commands::pod::{
    PodCreate, PodCreateArgs, PodInspect, PodInspectArgs, PodKill, PodKillArgs, PodLifecycle,
    PodLifecycleArgs, PodRm, PodRmArgs, PodTop, PodTopArgs, PodVerb,
};
use podremote::commands::*;
use podremote::output::OutputMode;
use podremote::runtime::{RuntimeConfig, RuntimeType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "podremote")]
#[command(about = "Manage containers and pods on a remote Podman or Docker engine")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        value_parser = expand_path,
        value_name = PathAction::METAVAR,
        help = help_for::<PathAction>("Unix socket of the engine.")
    )]
    pub socket: Option<PathBuf>,

    /// Engine URL: unix://PATH, tcp://HOST:PORT or http://HOST:PORT
    #[arg(long)]
    pub url: Option<String>,

    /// Engine flavour, when it cannot be told from the socket
    #[arg(long, value_enum)]
    pub runtime: Option<RuntimeType>,

    #[arg(
        long,
        value_parser = expand_path,
        value_name = PathAction::METAVAR,
        help = help_for::<PathAction>("Configuration file to use instead of the default.")
    )]
    pub config: Option<PathBuf>,

    /// How results and errors are printed
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputMode,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Endpoint settings given on the command line.
    pub fn endpoint(&self) -> RuntimeConfig {
        RuntimeConfig {
            runtime: self.runtime,
            socket: self.socket.as_ref().map(|p| p.display().to_string()),
            url: self.url.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attach to a running container
    Attach(AttachArgs),

    /// Create a new image from a container's changes
    Commit(CommitArgs),

    /// Create a container without starting it
    Create(CreateArgs),

    /// Export a container's filesystem as a tar archive
    Export(ExportArgs),

    /// Show engine and host information
    Info(InfoArgs),

    /// Show the full configuration of containers
    Inspect(InspectArgs),

    /// Send a signal to running containers
    Kill(KillArgs),

    /// Print a container's logs
    Logs(LogsArgs),

    /// Show where container filesystems are mounted
    Mount(MountArgs),

    /// Pause all processes in containers
    Pause(PauseArgs),

    /// Manage pods
    #[command(subcommand)]
    Pod(PodCommands),

    /// Pull images from a registry
    Pull(PullArgs),

    /// Push an image to a registry
    Push(PushArgs),

    /// Restart containers
    Restart(RestartArgs),

    /// Remove containers
    Rm(RmArgs),

    /// Remove images
    Rmi(RmiArgs),

    /// Run a command in a new container
    Run(RunArgs),

    /// Start existing containers
    Start(StartArgs),

    /// Stop running containers
    Stop(StopArgs),

    /// Show the processes of a container
    Top(TopArgs),

    /// Resume paused containers
    Unpause(UnpauseArgs),
}

#[derive(Subcommand)]
pub enum PodCommands {
    /// Create a new pod
    Create(PodCreateArgs),

    /// Show the full configuration of pods
    Inspect(PodInspectArgs),

    /// Send a signal to the containers of pods
    Kill(PodKillArgs),

    /// Pause pods
    Pause(PodLifecycleArgs),

    /// Restart pods
    Restart(PodLifecycleArgs),

    /// Remove pods
    Rm(PodRmArgs),

    /// Stop pods
    Stop(PodLifecycleArgs),

    /// Show the processes of a pod
    Top(PodTopArgs),

    /// Resume paused pods
    Unpause(PodLifecycleArgs),
}

impl Commands {
    /// Build the command, rejecting flag combinations it cannot run with.
    pub fn into_action(self) -> Result<Box<dyn Action>, UsageError> {
        let action: Box<dyn Action> = match self {
            Commands::Attach(args) => Box::new(Attach::new(args)?),
            Commands::Commit(args) => Box::new(Commit::new(args)?),
            Commands::Create(args) => Box::new(Create::new(args)?),
            Commands::Export(args) => Box::new(Export::new(args)?),
            Commands::Info(args) => Box::new(Info::new(args)?),
            Commands::Inspect(args) => Box::new(Inspect::new(args)?),
            Commands::Kill(args) => Box::new(Kill::new(args)?),
            Commands::Logs(args) => Box::new(Logs::new(args)?),
            Commands::Mount(args) => Box::new(Mount::new(args)?),
            Commands::Pause(args) => Box::new(Pause::new(args)?),
            Commands::Pod(pod) => pod.into_action()?,
            Commands::Pull(args) => Box::new(Pull::new(args)?),
            Commands::Push(args) => Box::new(Push::new(args)?),
            Commands::Restart(args) => Box::new(Restart::new(args)?),
            Commands::Rm(args) => Box::new(Rm::new(args)?),
            Commands::Rmi(args) => Box::new(Rmi::new(args)?),
            Commands::Run(args) => Box::new(Run::new(args)?),
            Commands::Start(args) => Box::new(Start::new(args)?),
            Commands::Stop(args) => Box::new(Stop::new(args)?),
            Commands::Top(args) => Box::new(Top::new(args)?),
            Commands::Unpause(args) => Box::new(Unpause::new(args)?),
        };
        Ok(action)
    }
}

impl PodCommands {
    fn into_action(self) -> Result<Box<dyn Action>, UsageError> {
        let action: Box<dyn Action> = match self {
            PodCommands::Create(args) => Box::new(PodCreate::new(args)?),
            PodCommands::Inspect(args) => Box::new(PodInspect::new(args)?),
            PodCommands::Kill(args) => Box::new(PodKill::new(args)?),
            PodCommands::Pause(args) => Box::new(PodLifecycle::new(PodVerb::Pause, args)?),
            PodCommands::Restart(args) => Box::new(PodLifecycle::new(PodVerb::Restart, args)?),
            PodCommands::Rm(args) => Box::new(PodRm::new(args)?),
            PodCommands::Stop(args) => Box::new(PodLifecycle::new(PodVerb::Stop, args)?),
            PodCommands::Top(args) => Box::new(PodTop::new(args)?),
            PodCommands::Unpause(args) => Box::new(PodLifecycle::new(PodVerb::Unpause, args)?),
        };
        Ok(action)
    }
}
