// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: Container and pod records, create/commit settings, attach handles.

use super::container::ContainerError;
use crate::args::{ChangeDirective, DetachKey, PositiveInt, Signal, UnitValue};
use crate::types::{ContainerId, ImageId, ImageRef, PodId};
use bytes::Bytes;
use futures::Stream;
use std::collections::BTreeMap;
use std::fmt;
use std::pin::Pin;
use tokio::io::AsyncWrite;

/// Settings for creating a container.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub name: Option<String>,
    pub image: ImageRef,
    /// Command to run (overrides image CMD).
    pub command: Vec<String>,
    /// Entrypoint (overrides image ENTRYPOINT).
    pub entrypoint: Option<String>,
    /// `KEY=VALUE` pairs.
    pub env: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub ports: Vec<PortMapping>,
    pub volumes: Vec<VolumeMount>,
    pub working_dir: Option<String>,
    pub user: Option<String>,
    pub tty: bool,
    /// Keep stdin open even when nothing is attached.
    pub open_stdin: bool,
    pub detach_key: DetachKey,
    pub resources: ResourceLimits,
    pub stop_signal: Option<Signal>,
    pub stop_timeout: Option<PositiveInt>,
}

impl ContainerConfig {
    pub fn new(image: ImageRef) -> Self {
        Self {
            name: None,
            image,
            command: Vec::new(),
            entrypoint: None,
            env: Vec::new(),
            labels: BTreeMap::new(),
            ports: Vec::new(),
            volumes: Vec::new(),
            working_dir: None,
            user: None,
            tty: false,
            open_stdin: false,
            detach_key: DetachKey::default(),
            resources: ResourceLimits::default(),
            stop_signal: None,
            stop_timeout: None,
        }
    }
}

/// Published port, `[[host_ip:]host_port:]container_port[/proto]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub host_ip: Option<String>,
    pub host_port: Option<u16>,
    pub container_port: u16,
    pub protocol: Protocol,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
            Protocol::Udp => f.write_str("udp"),
        }
    }
}

/// Bind mount or named volume, `source:target[:ro]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    pub source: String,
    pub target: String,
    pub read_only: bool,
}

impl VolumeMount {
    /// Docker-style bind string.
    pub fn bind(&self) -> String {
        if self.read_only {
            format!("{}:{}:ro", self.source, self.target)
        } else {
            format!("{}:{}", self.source, self.target)
        }
    }
}

/// Resource limits. Sizes are converted to bytes when the request is built.
#[derive(Debug, Clone, Default)]
pub struct ResourceLimits {
    pub memory: Option<UnitValue>,
    pub memory_reservation: Option<UnitValue>,
    pub memory_swap: Option<UnitValue>,
    pub shm_size: Option<UnitValue>,
    pub cpu_shares: Option<PositiveInt>,
}

/// Container state as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Stopping,
    Exited,
    Dead,
    Unknown,
}

impl ContainerState {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "created" | "configured" | "initialized" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "stopping" => ContainerState::Stopping,
            "exited" | "stopped" => ContainerState::Exited,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Unknown,
        }
    }

    /// Whether `start` can bring this container up.
    pub fn startable(self) -> bool {
        matches!(self, ContainerState::Created | ContainerState::Exited)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Stopping => "stopping",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
            ContainerState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A container as returned by lookup and listing.
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub state: ContainerState,
}

impl Container {
    pub fn running(&self) -> bool {
        self.state == ContainerState::Running
    }

    pub fn paused(&self) -> bool {
        self.state == ContainerState::Paused
    }
}

/// Raw inspect document plus fields commands read from it.
#[derive(Debug, Clone)]
pub struct ContainerDetails {
    pub document: serde_json::Value,
    /// Host path of the mounted root filesystem, if mounted.
    pub merged_dir: Option<String>,
}

/// Process listing, as from `ps` inside the container or pod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessTable {
    pub titles: Vec<String>,
    pub processes: Vec<Vec<String>>,
}

/// Settings for committing a container to an image.
#[derive(Debug, Clone, Default)]
pub struct CommitConfig {
    /// Target `repository[:tag]`.
    pub image: Option<String>,
    pub changes: Vec<ChangeDirective>,
    pub message: Option<String>,
    pub author: Option<String>,
    /// Pause the container while committing.
    pub pause: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: ImageId,
    pub tags: Vec<String>,
}

/// Pod status as reported by libpod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodStatus {
    Created,
    Running,
    Paused,
    Degraded,
    Exited,
    Stopped,
    Unknown,
}

impl PodStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "created" => PodStatus::Created,
            "running" => PodStatus::Running,
            "paused" => PodStatus::Paused,
            "degraded" => PodStatus::Degraded,
            "exited" => PodStatus::Exited,
            "stopped" => PodStatus::Stopped,
            _ => PodStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pod {
    pub id: PodId,
    pub name: String,
    pub status: PodStatus,
}

impl Pod {
    /// Running, or partially running.
    pub fn running(&self) -> bool {
        matches!(self.status, PodStatus::Running | PodStatus::Degraded)
    }

    pub fn paused(&self) -> bool {
        self.status == PodStatus::Paused
    }
}

/// Settings for creating a pod.
#[derive(Debug, Clone, Default)]
pub struct PodConfig {
    pub name: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub cgroup_parent: Option<String>,
    /// Create the pod without an infra container.
    pub no_infra: bool,
    /// Namespaces shared between the pod's containers.
    pub share: Vec<String>,
}

/// Which streams to connect when attaching.
#[derive(Debug, Clone, Copy)]
pub struct AttachOptions {
    pub stdin: bool,
    pub detach_key: DetachKey,
}

pub type OutputStream = Pin<Box<dyn Stream<Item = Result<Bytes, ContainerError>> + Send>>;

/// An attached container: its multiplexed output and its stdin.
pub struct AttachIo {
    pub output: OutputStream,
    pub input: Pin<Box<dyn AsyncWrite + Send>>,
}

impl fmt::Debug for AttachIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachIo").finish_non_exhaustive()
    }
}
