// ABOUTME: create: make a container from an image without starting it.
// ABOUTME: Also defines the container flags shared with run.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::{
    DetachKey, DetachKeyAction, InputAction, PositiveInt, PositiveIntAction, Signal, SignalAction,
    UnitAction, UnitValue, UsageError, help_for,
};
use crate::runtime::{ContainerConfig, PortMapping, Protocol, ResourceLimits, VolumeMount};
use crate::types::ImageRef;
use async_trait::async_trait;
use clap::Args;

/// Container settings accepted by both `create` and `run`.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateOptions {
    /// Assign a name to the container
    #[arg(long)]
    pub name: Option<String>,

    /// Set an environment variable, KEY=VALUE
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_env)]
    pub env: Vec<String>,

    /// Set a label, KEY=VALUE
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_label)]
    pub label: Vec<(String, String)>,

    /// Working directory inside the container
    #[arg(short, long)]
    pub workdir: Option<String>,

    /// User to run as, name or uid[:gid]
    #[arg(short, long)]
    pub user: Option<String>,

    /// Override the image's entrypoint
    #[arg(long)]
    pub entrypoint: Option<String>,

    /// Publish a container port, [[ip:]host_port:]container_port[/protocol]
    #[arg(short, long, value_name = "PORT", value_parser = parse_port)]
    pub publish: Vec<PortMapping>,

    /// Bind mount a volume, source:target[:ro]
    #[arg(short, long, value_name = "VOLUME", value_parser = parse_volume)]
    pub volume: Vec<VolumeMount>,

    /// Allocate a pseudo-TTY
    #[arg(short, long)]
    pub tty: bool,

    /// Keep stdin open and attach it
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(
        long,
        value_name = DetachKeyAction::METAVAR,
        help = help_for::<DetachKeyAction>("Key for detaching from the container.")
    )]
    pub detach_keys: Option<DetachKey>,

    #[arg(
        long,
        value_name = UnitAction::METAVAR,
        help = help_for::<UnitAction>("Memory limit.")
    )]
    pub memory: Option<UnitValue>,

    #[arg(
        long,
        value_name = UnitAction::METAVAR,
        help = help_for::<UnitAction>("Memory soft limit.")
    )]
    pub memory_reservation: Option<UnitValue>,

    #[arg(
        long,
        value_name = UnitAction::METAVAR,
        help = help_for::<UnitAction>("Memory plus swap limit.")
    )]
    pub memory_swap: Option<UnitValue>,

    #[arg(
        long,
        value_name = UnitAction::METAVAR,
        help = help_for::<UnitAction>("Size of /dev/shm.")
    )]
    pub shm_size: Option<UnitValue>,

    #[arg(
        long,
        value_name = PositiveIntAction::METAVAR,
        help = help_for::<PositiveIntAction>("Relative CPU weight.")
    )]
    pub cpu_shares: Option<PositiveInt>,

    #[arg(
        long,
        value_name = SignalAction::METAVAR,
        help = help_for::<SignalAction>("Signal that stops the container.")
    )]
    pub stop_signal: Option<Signal>,

    #[arg(
        long,
        value_name = PositiveIntAction::METAVAR,
        help = help_for::<PositiveIntAction>("Seconds to wait for the container to stop.")
    )]
    pub stop_timeout: Option<PositiveInt>,
}

impl CreateOptions {
    /// Build the engine request. `default_key` applies without --detach-keys.
    pub fn container_config(
        &self,
        image: ImageRef,
        command: Vec<String>,
        default_key: DetachKey,
    ) -> ContainerConfig {
        ContainerConfig {
            name: self.name.clone(),
            command,
            entrypoint: self.entrypoint.clone(),
            env: self.env.clone(),
            labels: self.label.iter().cloned().collect(),
            ports: self.publish.clone(),
            volumes: self.volume.clone(),
            working_dir: self.workdir.clone(),
            user: self.user.clone(),
            tty: self.tty,
            open_stdin: self.interactive,
            detach_key: self.detach_keys.unwrap_or(default_key),
            resources: ResourceLimits {
                memory: self.memory.clone(),
                memory_reservation: self.memory_reservation.clone(),
                memory_swap: self.memory_swap.clone(),
                shm_size: self.shm_size.clone(),
                cpu_shares: self.cpu_shares,
            },
            stop_signal: self.stop_signal,
            stop_timeout: self.stop_timeout,
            ..ContainerConfig::new(image)
        }
    }
}

fn parse_env(raw: &str) -> Result<String, UsageError> {
    match raw.split_once('=') {
        Some((key, _)) if !key.is_empty() => Ok(raw.to_string()),
        _ => Err(UsageError::KeyValue(raw.to_string())),
    }
}

pub(crate) fn parse_label(raw: &str) -> Result<(String, String), UsageError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(UsageError::KeyValue(raw.to_string())),
    }
}

fn parse_port(raw: &str) -> Result<PortMapping, UsageError> {
    let invalid = || UsageError::Port(raw.to_string());
    let number = |s: &str| match s.parse::<u16>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    };

    let (mapping, protocol) = match raw.rsplit_once('/') {
        Some((mapping, "tcp")) => (mapping, Protocol::Tcp),
        Some((mapping, "udp")) => (mapping, Protocol::Udp),
        Some(_) => return Err(invalid()),
        None => (raw, Protocol::Tcp),
    };

    let parts: Vec<&str> = mapping.split(':').collect();
    let (host_ip, host_port, container_port) = match parts[..] {
        [ctr] => (None, None, number(ctr)?),
        [host, ctr] => (None, Some(number(host)?), number(ctr)?),
        [ip, host, ctr] if !ip.is_empty() => {
            let host = if host.is_empty() { None } else { Some(number(host)?) };
            (Some(ip.to_string()), host, number(ctr)?)
        }
        _ => return Err(invalid()),
    };

    Ok(PortMapping {
        host_ip,
        host_port,
        container_port,
        protocol,
    })
}

fn parse_volume(raw: &str) -> Result<VolumeMount, UsageError> {
    let invalid = || UsageError::Volume(raw.to_string());
    let parts: Vec<&str> = raw.split(':').collect();
    let (source, target, read_only) = match parts[..] {
        [source, target] => (source, target, false),
        [source, target, "ro"] => (source, target, true),
        [source, target, "rw"] => (source, target, false),
        _ => return Err(invalid()),
    };
    if source.is_empty() || target.is_empty() {
        return Err(invalid());
    }
    Ok(VolumeMount {
        source: source.to_string(),
        target: target.to_string(),
        read_only,
    })
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub options: CreateOptions,

    /// Image to create the container from
    pub image: ImageRef,

    /// Command and arguments to run in the container
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Debug)]
pub struct Create {
    options: CreateOptions,
    image: ImageRef,
    command: Vec<String>,
}

impl Create {
    pub fn new(args: CreateArgs) -> Result<Self, UsageError> {
        Ok(Self {
            options: args.options,
            image: args.image,
            command: args.command,
        })
    }
}

#[async_trait]
impl Action for Create {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        if let Err(e) = ctx.runtime.get_image(&self.image.to_string()).await {
            return fail(ctx.out, &e);
        }

        let config =
            self.options
                .container_config(self.image.clone(), self.command.clone(), ctx.detach_key);
        match ctx.runtime.create_container(&config).await {
            Ok(id) => {
                tracing::debug!(container = %id, image = %self.image, "created container");
                ctx.out.item(id.as_str());
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}
