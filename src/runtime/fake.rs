// ABOUTME: In-memory runtime used by unit tests.
// ABOUTME: Records every call and can be told to fail specific ones.

use super::traits::sealed::Sealed;
use super::traits::*;
use crate::args::Signal;
use crate::types::{ContainerId, ImageId, ImageRef, PodId};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// A failure queued for one call, keyed `op:ident`.
#[derive(Debug)]
pub(crate) enum Failure {
    Container(ContainerError),
    Image(ImageError),
    Pod(PodError),
}

impl From<ContainerError> for Failure {
    fn from(e: ContainerError) -> Self {
        Failure::Container(e)
    }
}

impl From<ImageError> for Failure {
    fn from(e: ImageError) -> Self {
        Failure::Image(e)
    }
}

impl From<PodError> for Failure {
    fn from(e: PodError) -> Self {
        Failure::Pod(e)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeContainer {
    pub container: Container,
    pub merged_dir: Option<String>,
    pub logs: Vec<u8>,
    pub attach_output: Vec<Bytes>,
}

#[derive(Default)]
struct State {
    containers: Vec<FakeContainer>,
    images: Vec<Image>,
    pods: Vec<Pod>,
    created: Vec<ContainerConfig>,
    committed: Vec<CommitConfig>,
    pushed: Vec<(String, String, bool)>,
    next_id: usize,
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, Failure>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container whose id and name are both `name`.
    pub fn with_container(self, name: &str, state: ContainerState) -> Self {
        self.state.lock().containers.push(FakeContainer {
            container: Container {
                id: ContainerId::new(name),
                name: name.to_string(),
                image: "alpine:latest".to_string(),
                state,
            },
            merged_dir: None,
            logs: Vec::new(),
            attach_output: Vec::new(),
        });
        self
    }

    pub fn with_logs(self, name: &str, logs: &str) -> Self {
        self.edit(name, |c| c.logs = logs.as_bytes().to_vec());
        self
    }

    pub fn with_merged_dir(self, name: &str, dir: &str) -> Self {
        self.edit(name, |c| c.merged_dir = Some(dir.to_string()));
        self
    }

    pub fn with_attach_output(self, name: &str, chunks: &[&str]) -> Self {
        let chunks: Vec<Bytes> = chunks.iter().map(|c| Bytes::from(c.to_string())).collect();
        self.edit(name, |c| c.attach_output = chunks.clone());
        self
    }

    pub fn with_image(self, name: &str) -> Self {
        self.state.lock().images.push(Image {
            id: ImageId::new(format!("sha256:{name}")),
            tags: vec![name.to_string()],
        });
        self
    }

    /// Add a pod whose id and name are both `name`.
    pub fn with_pod(self, name: &str, status: PodStatus) -> Self {
        self.state.lock().pods.push(Pod {
            id: PodId::new(name),
            name: name.to_string(),
            status,
        });
        self
    }

    /// Make the next `key` call (`op:ident`) fail with `failure`.
    pub fn failing(self, key: &str, failure: impl Into<Failure>) -> Self {
        self.failures.lock().insert(key.to_string(), failure.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Calls whose op is `op`, as their ident parts.
    pub fn calls_to(&self, op: &str) -> Vec<String> {
        let prefix = format!("{op}:");
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn container_state(&self, ident: &str) -> Option<ContainerState> {
        self.find(ident).map(|c| c.container.state)
    }

    pub fn has_container(&self, ident: &str) -> bool {
        self.find(ident).is_some()
    }

    pub fn pod_status(&self, ident: &str) -> Option<PodStatus> {
        let state = self.state.lock();
        state
            .pods
            .iter()
            .find(|p| p.id.as_str() == ident || p.name == ident)
            .map(|p| p.status)
    }

    pub fn created(&self) -> Vec<ContainerConfig> {
        self.state.lock().created.clone()
    }

    pub fn committed(&self) -> Vec<CommitConfig> {
        self.state.lock().committed.clone()
    }

    pub fn pushed(&self) -> Vec<(String, String, bool)> {
        self.state.lock().pushed.clone()
    }

    fn record(&self, op: &str, ident: &str) -> Option<Failure> {
        let key = format!("{op}:{ident}");
        self.calls.lock().push(key.clone());
        self.failures.lock().remove(&key)
    }

    fn find(&self, ident: &str) -> Option<FakeContainer> {
        let state = self.state.lock();
        state
            .containers
            .iter()
            .find(|c| c.container.id.as_str() == ident || c.container.name == ident)
            .cloned()
    }

    fn edit(&self, ident: &str, f: impl FnOnce(&mut FakeContainer)) {
        let mut state = self.state.lock();
        if let Some(c) = state
            .containers
            .iter_mut()
            .find(|c| c.container.id.as_str() == ident || c.container.name == ident)
        {
            f(c);
        }
    }

    fn container_op(&self, op: &str, id: &ContainerId) -> Result<(), ContainerError> {
        if let Some(failure) = self.record(op, id.as_str()) {
            return Err(failure.into_container());
        }
        if self.find(id.as_str()).is_none() {
            return Err(ContainerError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn set_state(&self, id: &ContainerId, state: ContainerState) {
        self.edit(id.as_str(), |c| c.container.state = state);
    }

    fn pod_op(&self, op: &str, id: &PodId, status: Option<PodStatus>) -> Result<(), PodError> {
        if let Some(failure) = self.record(op, id.as_str()) {
            return Err(failure.into_pod());
        }
        let mut state = self.state.lock();
        let pod = state
            .pods
            .iter_mut()
            .find(|p| p.id == *id || p.name == id.as_str())
            .ok_or_else(|| PodError::NotFound(id.to_string()))?;
        if let Some(status) = status {
            pod.status = status;
        }
        Ok(())
    }
}

impl Failure {
    fn into_container(self) -> ContainerError {
        match self {
            Failure::Container(e) => e,
            other => ContainerError::Runtime(other.to_string()),
        }
    }

    fn into_image(self) -> ImageError {
        match self {
            Failure::Image(e) => e,
            other => ImageError::Runtime(other.to_string()),
        }
    }

    fn into_pod(self) -> PodError {
        match self {
            Failure::Pod(e) => e,
            other => PodError::Runtime(other.to_string()),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Container(e) => e.fmt(f),
            Failure::Image(e) => e.fmt(f),
            Failure::Pod(e) => e.fmt(f),
        }
    }
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn get_container(&self, ident: &str) -> Result<Container, ContainerError> {
        if let Some(failure) = self.record("get", ident) {
            return Err(failure.into_container());
        }
        self.find(ident)
            .map(|c| c.container)
            .ok_or_else(|| ContainerError::NotFound(ident.to_string()))
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<Container>, ContainerError> {
        if let Some(failure) = self.record("list", "containers") {
            return Err(failure.into_container());
        }
        let state = self.state.lock();
        Ok(state
            .containers
            .iter()
            .map(|c| c.container.clone())
            .filter(|c| filters.all || c.running())
            .collect())
    }

    async fn create_container(
        &self,
        config: &ContainerConfig,
    ) -> Result<ContainerId, ContainerError> {
        if let Some(failure) = self.record("create", &config.image.to_string()) {
            return Err(failure.into_container());
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = format!("ctr{}", state.next_id);
        state.containers.push(FakeContainer {
            container: Container {
                id: ContainerId::new(id.clone()),
                name: config.name.clone().unwrap_or_else(|| id.clone()),
                image: config.image.to_string(),
                state: ContainerState::Created,
            },
            merged_dir: None,
            logs: Vec::new(),
            attach_output: Vec::new(),
        });
        state.created.push(config.clone());
        Ok(ContainerId::new(id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.container_op("start", id)?;
        self.set_state(id, ContainerState::Running);
        Ok(())
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        _timeout: Duration,
    ) -> Result<(), ContainerError> {
        self.container_op("stop", id)?;
        self.set_state(id, ContainerState::Exited);
        Ok(())
    }

    async fn kill_container(
        &self,
        id: &ContainerId,
        _signal: Signal,
    ) -> Result<(), ContainerError> {
        self.container_op("kill", id)?;
        self.set_state(id, ContainerState::Exited);
        Ok(())
    }

    async fn pause_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.container_op("pause", id)?;
        self.set_state(id, ContainerState::Paused);
        Ok(())
    }

    async fn unpause_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.container_op("unpause", id)?;
        self.set_state(id, ContainerState::Running);
        Ok(())
    }

    async fn restart_container(
        &self,
        id: &ContainerId,
        _timeout: Duration,
    ) -> Result<(), ContainerError> {
        self.container_op("restart", id)?;
        self.set_state(id, ContainerState::Running);
        Ok(())
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        self.container_op("remove", id)?;
        let mut state = self.state.lock();
        let Some(pos) = state
            .containers
            .iter()
            .position(|c| c.container.id == *id || c.container.name == id.as_str())
        else {
            return Err(ContainerError::NotFound(id.to_string()));
        };
        if state.containers[pos].container.running() && !force {
            return Err(ContainerError::Conflict(format!(
                "cannot remove running container {id}"
            )));
        }
        state.containers.remove(pos);
        Ok(())
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        if let Some(failure) = self.record("inspect", id.as_str()) {
            return Err(failure.into_container());
        }
        let c = self
            .find(id.as_str())
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))?;
        Ok(ContainerDetails {
            document: serde_json::json!({
                "Id": c.container.id.as_str(),
                "Name": c.container.name,
                "Image": c.container.image,
            }),
            merged_dir: c.merged_dir,
        })
    }

    async fn top_container(&self, id: &ContainerId) -> Result<ProcessTable, ContainerError> {
        self.container_op("top", id)?;
        Ok(ProcessTable {
            titles: vec!["PID".into(), "CMD".into()],
            processes: vec![vec!["1".into(), "sleep 300".into()]],
        })
    }

    async fn export_container(
        &self,
        id: &ContainerId,
        dest: &Path,
    ) -> Result<(), ContainerError> {
        self.container_op("export", id)?;
        std::fs::write(dest, b"fake tarball").map_err(|e| ContainerError::Io {
            path: dest.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn commit_container(
        &self,
        id: &ContainerId,
        config: &CommitConfig,
    ) -> Result<ImageId, ContainerError> {
        self.container_op("commit", id)?;
        let mut state = self.state.lock();
        state.committed.push(config.clone());
        Ok(ImageId::new(format!("sha256:commit{}", state.committed.len())))
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        let name = reference.to_string();
        if let Some(failure) = self.record("pull", &name) {
            return Err(failure.into_image());
        }
        let mut state = self.state.lock();
        if !state.images.iter().any(|i| i.tags.contains(&name)) {
            state.images.push(Image {
                id: ImageId::new(format!("sha256:{name}")),
                tags: vec![name],
            });
        }
        Ok(())
    }

    async fn get_image(&self, ident: &str) -> Result<Image, ImageError> {
        if let Some(failure) = self.record("get_image", ident) {
            return Err(failure.into_image());
        }
        let state = self.state.lock();
        state
            .images
            .iter()
            .find(|i| i.id.as_str() == ident || i.tags.iter().any(|t| t == ident))
            .cloned()
            .ok_or_else(|| ImageError::NotFound(ident.to_string()))
    }

    async fn push_image(
        &self,
        ident: &str,
        destination: &str,
        tls_verify: bool,
    ) -> Result<(), ImageError> {
        if let Some(failure) = self.record("push", ident) {
            return Err(failure.into_image());
        }
        self.state
            .lock()
            .pushed
            .push((ident.to_string(), destination.to_string(), tls_verify));
        Ok(())
    }

    async fn remove_image(&self, ident: &str, _force: bool) -> Result<(), ImageError> {
        if let Some(failure) = self.record("rmi", ident) {
            return Err(failure.into_image());
        }
        let mut state = self.state.lock();
        let before = state.images.len();
        state
            .images
            .retain(|i| i.id.as_str() != ident && !i.tags.iter().any(|t| t == ident));
        if state.images.len() == before {
            return Err(ImageError::NotFound(ident.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PodOps for FakeRuntime {
    async fn get_pod(&self, ident: &str) -> Result<Pod, PodError> {
        if let Some(failure) = self.record("get_pod", ident) {
            return Err(failure.into_pod());
        }
        let state = self.state.lock();
        state
            .pods
            .iter()
            .find(|p| p.id.as_str() == ident || p.name == ident)
            .cloned()
            .ok_or_else(|| PodError::NotFound(ident.to_string()))
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, PodError> {
        if let Some(failure) = self.record("list", "pods") {
            return Err(failure.into_pod());
        }
        Ok(self.state.lock().pods.clone())
    }

    async fn create_pod(&self, config: &PodConfig) -> Result<PodId, PodError> {
        let name = config.name.clone().unwrap_or_else(|| "pod".to_string());
        if let Some(failure) = self.record("create_pod", &name) {
            return Err(failure.into_pod());
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = PodId::new(format!("pod{}", state.next_id));
        state.pods.push(Pod {
            id: id.clone(),
            name,
            status: PodStatus::Created,
        });
        Ok(id)
    }

    async fn kill_pod(&self, id: &PodId, _signal: Signal) -> Result<(), PodError> {
        self.pod_op("kill_pod", id, Some(PodStatus::Exited))
    }

    async fn pause_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_op("pause_pod", id, Some(PodStatus::Paused))
    }

    async fn unpause_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_op("unpause_pod", id, Some(PodStatus::Running))
    }

    async fn restart_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_op("restart_pod", id, Some(PodStatus::Running))
    }

    async fn stop_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_op("stop_pod", id, Some(PodStatus::Stopped))
    }

    async fn remove_pod(&self, id: &PodId, _force: bool) -> Result<(), PodError> {
        self.pod_op("remove_pod", id, None)?;
        self.state.lock().pods.retain(|p| p.id != *id);
        Ok(())
    }

    async fn inspect_pod(&self, id: &PodId) -> Result<serde_json::Value, PodError> {
        self.pod_op("inspect_pod", id, None)?;
        Ok(serde_json::json!({ "Id": id.as_str() }))
    }

    async fn top_pod(&self, id: &PodId) -> Result<ProcessTable, PodError> {
        self.pod_op("top_pod", id, None)?;
        Ok(ProcessTable {
            titles: vec!["PID".into(), "CMD".into()],
            processes: vec![vec!["1".into(), "pause".into()]],
        })
    }
}

#[async_trait]
impl LogOps for FakeRuntime {
    async fn container_logs(
        &self,
        id: &ContainerId,
        _opts: &LogOptions,
    ) -> Result<LogStream, ContainerError> {
        self.container_op("logs", id)?;
        let logs = self.find(id.as_str()).map(|c| c.logs).unwrap_or_default();
        // Split unevenly so line reassembly is exercised.
        let chunks: Vec<Result<Bytes, ContainerError>> = logs
            .chunks(5)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

#[async_trait]
impl AttachOps for FakeRuntime {
    async fn attach_container(
        &self,
        id: &ContainerId,
        _opts: &AttachOptions,
    ) -> Result<AttachIo, ContainerError> {
        self.container_op("attach", id)?;
        let chunks = self
            .find(id.as_str())
            .map(|c| c.attach_output)
            .unwrap_or_default();
        Ok(AttachIo {
            output: Box::pin(futures::stream::iter(
                chunks.into_iter().map(Ok::<Bytes, ContainerError>),
            )),
            input: Box::pin(tokio::io::sink()),
        })
    }
}

#[async_trait]
impl RuntimeInfo for FakeRuntime {
    async fn info(&self) -> Result<serde_json::Value, RuntimeInfoError> {
        self.calls.lock().push("info:".to_string());
        Ok(serde_json::json!({ "host": { "os": "linux" }, "version": "4.9.0" }))
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        Ok(())
    }
}
