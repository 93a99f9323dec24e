// ABOUTME: Bollard-based engine client implementing every capability trait.
// ABOUTME: Docker-compatible API for containers and images, libpod for pods.

use super::error::{ClientSnafu, ConnectError, UnreachableSnafu};
use super::libpod::{LibpodClient, LibpodError, LibpodResponse, encode};
use super::traits::sealed::Sealed;
use super::traits::{
    AttachIo, AttachOps, AttachOptions, CommitConfig, Container, ContainerConfig,
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerState, Image,
    ImageError, ImageOps, LogOps, LogOptions, LogStream, Pod, PodConfig, PodError, PodOps,
    PodStatus, ProcessTable, RuntimeInfo, RuntimeInfoError,
};
use super::types::{Endpoint, RuntimeType, Transport};
use crate::args::Signal;
use crate::types::{ContainerId, ImageId, ImageRef, PodId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::container::LogOutput;
use bollard::errors::Error as BollardError;
use bollard::models::{ContainerCreateBody, HostConfig, PortBinding};
use bollard::query_parameters::{
    AttachContainerOptions, CommitContainerOptions, CreateContainerOptions, CreateImageOptions,
    InspectContainerOptions, KillContainerOptions, ListContainersOptions, LogsOptions,
    PushImageOptions, RemoveContainerOptions, RemoveImageOptions, RestartContainerOptions,
    StopContainerOptions, TagImageOptions, TopOptions,
};
use bytes::Bytes;
use futures::StreamExt;
use hyper::{Method, StatusCode};
use serde::Deserialize;
use snafu::ResultExt;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

/// The engine could not be reached, as opposed to answering with an error.
fn is_transport_error(e: &BollardError) -> bool {
    matches!(
        e,
        BollardError::IOError { .. }
            | BollardError::HyperResponseError { .. }
            | BollardError::RequestTimeoutError { .. }
            | BollardError::SocketNotFoundError { .. }
    )
}

/// The server's own message when there is one.
fn reason(e: BollardError) -> String {
    match e {
        BollardError::DockerResponseServerError { message, .. } if !message.is_empty() => message,
        BollardError::DockerStreamError { error } => error,
        other => other.to_string(),
    }
}

fn map_container_error(e: BollardError, ident: &str) -> ContainerError {
    match e {
        BollardError::DockerResponseServerError {
            status_code: 404, ..
        } => ContainerError::NotFound(ident.to_string()),
        BollardError::DockerResponseServerError {
            status_code: 304, ..
        } => ContainerError::Conflict(format!("container {ident} is already in that state")),
        BollardError::DockerResponseServerError {
            status_code: 409,
            message,
        } => ContainerError::Conflict(message),
        e if is_transport_error(&e) => ContainerError::Connection(e.to_string()),
        e => ContainerError::Runtime(reason(e)),
    }
}

fn map_create_error(e: BollardError, image: &str) -> ContainerError {
    match e {
        BollardError::DockerResponseServerError {
            status_code: 404, ..
        } => ContainerError::ImageNotFound(image.to_string()),
        e => map_container_error(e, image),
    }
}

fn map_image_error(e: BollardError, ident: &str) -> ImageError {
    match e {
        BollardError::DockerResponseServerError {
            status_code: 404, ..
        } => ImageError::NotFound(ident.to_string()),
        BollardError::DockerStreamError { error }
            if error.contains("not found") || error.contains("manifest unknown") =>
        {
            ImageError::NotFound(ident.to_string())
        }
        e if is_transport_error(&e) => ImageError::Connection(e.to_string()),
        e => ImageError::Runtime(reason(e)),
    }
}

fn map_info_error(e: BollardError) -> RuntimeInfoError {
    if is_transport_error(&e) {
        RuntimeInfoError::ConnectionFailed(e.to_string())
    } else {
        RuntimeInfoError::Runtime(reason(e))
    }
}

fn map_pod_transport(e: LibpodError) -> PodError {
    match e {
        LibpodError::Connect { .. } => PodError::Connection(e.to_string()),
        LibpodError::Http(reason) => PodError::Runtime(reason),
    }
}

/// Resolve a size flag to bytes for the request.
fn bytes_of(value: &Option<crate::args::UnitValue>) -> Option<i64> {
    value.as_ref().and_then(|v| v.bytes())
}

/// Stop grace period in whole seconds, saturating at the API's `i32` field.
fn timeout_secs(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_secs()).unwrap_or(i32::MAX)
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Engine client built on bollard.
///
/// Supports both Docker and Podman through the Docker-compatible API.
/// For Podman reached over its unix socket, pods and TLS-aware push go
/// through the native libpod API.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
    libpod: Option<LibpodClient>,
}

impl BollardRuntime {
    /// Create a client for `endpoint`. Nothing is sent until the first call.
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self, ConnectError> {
        let secs = timeout.as_secs().max(1);
        let client = match &endpoint.transport {
            Transport::Unix(path) => {
                Docker::connect_with_unix(path, secs, bollard::API_DEFAULT_VERSION)
            }
            Transport::Http(url) => {
                Docker::connect_with_http(url, secs, bollard::API_DEFAULT_VERSION)
            }
        }
        .context(ClientSnafu {
            endpoint: endpoint.to_string(),
        })?;

        let libpod = match (&endpoint.transport, endpoint.runtime_type) {
            (Transport::Unix(path), RuntimeType::Podman) => Some(LibpodClient::new(path.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            runtime_type: endpoint.runtime_type,
            libpod,
        })
    }

    /// Create a client and check that the engine answers.
    pub async fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<Self, ConnectError> {
        let runtime = Self::new(endpoint, timeout)?;
        runtime.ping().await.context(UnreachableSnafu {
            endpoint: endpoint.to_string(),
        })?;
        tracing::debug!(%endpoint, "connected");
        Ok(runtime)
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    fn libpod(&self) -> Result<&LibpodClient, PodError> {
        self.libpod.as_ref().ok_or(PodError::Unsupported)
    }

    /// Issue a pod request; 404 becomes `NotFound(ident)`.
    async fn pod_request(
        &self,
        method: Method,
        route: &str,
        body: Option<&serde_json::Value>,
        ident: &str,
    ) -> Result<LibpodResponse, PodError> {
        let resp = self
            .libpod()?
            .request(method, route, body)
            .await
            .map_err(map_pod_transport)?;

        match resp.status {
            s if s.is_success() => Ok(resp),
            StatusCode::NOT_FOUND => Err(PodError::NotFound(ident.to_string())),
            _ => Err(PodError::Runtime(resp.message())),
        }
    }

    async fn pod_action(&self, id: &PodId, action: &str) -> Result<(), PodError> {
        let route = format!("/pods/{}/{action}", encode(id.as_str()));
        self.pod_request(Method::POST, &route, None, id.as_str())
            .await
            .map(drop)
    }

    /// Push through libpod so `tlsVerify` is honoured.
    async fn push_image_libpod(
        &self,
        client: &LibpodClient,
        ident: &str,
        destination: &str,
        tls_verify: bool,
    ) -> Result<(), ImageError> {
        let route = format!(
            "/images/{}/push?destination={}&tlsVerify={tls_verify}",
            encode(ident),
            encode(destination),
        );
        let resp = client
            .request(Method::POST, &route, None)
            .await
            .map_err(|e| match e {
                LibpodError::Connect { .. } => ImageError::Connection(e.to_string()),
                LibpodError::Http(reason) => ImageError::Runtime(reason),
            })?;

        if resp.status == StatusCode::NOT_FOUND {
            return Err(ImageError::NotFound(ident.to_string()));
        }
        if !resp.status.is_success() {
            return Err(ImageError::Runtime(resp.message()));
        }
        match resp.stream_error() {
            Some(error) => Err(ImageError::Runtime(error)),
            None => Ok(()),
        }
    }

    /// Docker-compatible push: tag to the destination, then push it.
    async fn push_image_compat(&self, ident: &str, destination: &str) -> Result<(), ImageError> {
        let target = ImageRef::parse(destination)
            .map_err(|e| ImageError::Runtime(format!("invalid destination: {e}")))?;
        let tag = target.tag().unwrap_or("latest").to_string();
        let repo = target.repository();

        self.client
            .tag_image(
                ident,
                Some(TagImageOptions {
                    repo: Some(repo.clone()),
                    tag: Some(tag.clone()),
                }),
            )
            .await
            .map_err(|e| map_image_error(e, ident))?;

        let opts = PushImageOptions {
            tag: Some(tag),
            ..Default::default()
        };
        let mut stream = self.client.push_image(&repo, Some(opts), None);
        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| map_image_error(e, destination))?;
            if let Some(error) = info.error_detail.and_then(|d| d.message) {
                return Err(ImageError::Runtime(error));
            }
        }
        Ok(())
    }
}

// Implement Sealed trait to allow runtime trait implementations
impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<serde_json::Value, RuntimeInfoError> {
        let info = self.client.info().await.map_err(map_info_error)?;
        serde_json::to_value(info).map_err(|e| RuntimeInfoError::Runtime(e.to_string()))
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client.ping().await.map_err(map_info_error)?;
        Ok(())
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        let image_name = reference.to_string();

        let opts = CreateImageOptions {
            from_image: Some(image_name.clone()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            result.map_err(|e| map_image_error(e, &image_name))?;
        }

        tracing::debug!(image = %image_name, "pulled image");
        Ok(())
    }

    async fn get_image(&self, ident: &str) -> Result<Image, ImageError> {
        let details = self
            .client
            .inspect_image(ident)
            .await
            .map_err(|e| map_image_error(e, ident))?;

        Ok(Image {
            id: ImageId::new(details.id.unwrap_or_else(|| ident.to_string())),
            tags: details.repo_tags.unwrap_or_default(),
        })
    }

    async fn push_image(
        &self,
        ident: &str,
        destination: &str,
        tls_verify: bool,
    ) -> Result<(), ImageError> {
        if let Some(client) = &self.libpod {
            return self
                .push_image_libpod(client, ident, destination, tls_verify)
                .await;
        }
        if !tls_verify {
            tracing::warn!("--no-tlsverify is only honoured by Podman; using engine defaults");
        }
        self.push_image_compat(ident, destination).await
    }

    async fn remove_image(&self, ident: &str, force: bool) -> Result<(), ImageError> {
        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(ident, Some(opts), None)
            .await
            .map_err(|e| map_image_error(e, ident))?;

        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn get_container(&self, ident: &str) -> Result<Container, ContainerError> {
        let details = self
            .client
            .inspect_container(ident, None::<InspectContainerOptions>)
            .await
            .map_err(|e| map_container_error(e, ident))?;

        let state = details
            .state
            .as_ref()
            .and_then(|s| s.status)
            .map(|s| ContainerState::parse(&format!("{s:?}")))
            .unwrap_or(ContainerState::Unknown);

        Ok(Container {
            id: ContainerId::new(details.id.unwrap_or_else(|| ident.to_string())),
            name: details
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            image: details
                .config
                .and_then(|c| c.image)
                .unwrap_or_default(),
            state,
        })
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<Container>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| map_container_error(e, "containers"))?;

        Ok(containers
            .into_iter()
            .map(|c| {
                let name = c
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or_default();
                Container {
                    id: ContainerId::new(c.id.unwrap_or_default()),
                    name,
                    image: c.image.unwrap_or_default(),
                    state: c
                        .state
                        .map(|s| ContainerState::parse(&format!("{s:?}")))
                        .unwrap_or(ContainerState::Unknown),
                }
            })
            .collect())
    }

    async fn create_container(
        &self,
        config: &ContainerConfig,
    ) -> Result<ContainerId, ContainerError> {
        let image_name = config.image.to_string();
        let res = &config.resources;

        let mut host_config = HostConfig {
            memory: bytes_of(&res.memory),
            memory_reservation: bytes_of(&res.memory_reservation),
            memory_swap: bytes_of(&res.memory_swap),
            shm_size: bytes_of(&res.shm_size),
            cpu_shares: res.cpu_shares.map(|n| n.get() as i64),
            ..Default::default()
        };

        if !config.volumes.is_empty() {
            host_config.binds = Some(config.volumes.iter().map(|v| v.bind()).collect());
        }

        // Set port bindings
        let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
        let mut exposed_ports: Vec<String> = Vec::new();
        for port in &config.ports {
            let port_key = format!("{}/{}", port.container_port, port.protocol);
            exposed_ports.push(port_key.clone());

            if let Some(host_port) = port.host_port {
                port_bindings.insert(
                    port_key,
                    Some(vec![PortBinding {
                        host_ip: port.host_ip.clone(),
                        host_port: Some(host_port.to_string()),
                    }]),
                );
            }
        }
        if !port_bindings.is_empty() {
            host_config.port_bindings = Some(port_bindings);
        }

        let labels: HashMap<String, String> = config
            .labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let attach = config.open_stdin || config.tty;
        let body = ContainerCreateBody {
            image: Some(image_name.clone()),
            cmd: (!config.command.is_empty()).then(|| config.command.clone()),
            entrypoint: config.entrypoint.as_ref().map(|e| vec![e.clone()]),
            env: (!config.env.is_empty()).then(|| config.env.clone()),
            labels: (!labels.is_empty()).then_some(labels),
            working_dir: config.working_dir.clone(),
            user: config.user.clone(),
            tty: Some(config.tty),
            open_stdin: Some(config.open_stdin),
            attach_stdin: Some(config.open_stdin),
            attach_stdout: Some(attach),
            attach_stderr: Some(attach),
            exposed_ports: (!exposed_ports.is_empty()).then_some(exposed_ports),
            stop_signal: config.stop_signal.map(|s| s.number().to_string()),
            stop_timeout: config.stop_timeout.map(|t| t.get() as i64),
            host_config: Some(host_config),
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: config.name.clone(),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(|e| map_create_error(e, &image_name))?;

        for warning in &response.warnings {
            tracing::warn!("{warning}");
        }

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .start_container(
                id.as_str(),
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await
            .map_err(|e| map_container_error(e, id.as_str()))
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError> {
        let opts = StopContainerOptions {
            t: Some(timeout_secs(timeout)),
            signal: None,
        };

        self.client
            .stop_container(id.as_str(), Some(opts))
            .await
            .map_err(|e| map_container_error(e, id.as_str()))
    }

    async fn kill_container(
        &self,
        id: &ContainerId,
        signal: Signal,
    ) -> Result<(), ContainerError> {
        let opts = KillContainerOptions {
            signal: signal.number().to_string(),
        };

        self.client
            .kill_container(id.as_str(), Some(opts))
            .await
            .map_err(|e| map_container_error(e, id.as_str()))
    }

    async fn pause_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .pause_container(id.as_str())
            .await
            .map_err(|e| map_container_error(e, id.as_str()))
    }

    async fn unpause_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .unpause_container(id.as_str())
            .await
            .map_err(|e| map_container_error(e, id.as_str()))
    }

    async fn restart_container(
        &self,
        id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError> {
        let opts = RestartContainerOptions {
            t: Some(timeout_secs(timeout)),
            ..Default::default()
        };

        self.client
            .restart_container(id.as_str(), Some(opts))
            .await
            .map_err(|e| map_container_error(e, id.as_str()))
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError> {
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(opts))
            .await
            .map_err(|e| map_container_error(e, id.as_str()))?;

        Ok(())
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(|e| map_container_error(e, id.as_str()))?;

        let merged_dir = details
            .graph_driver
            .as_ref()
            .and_then(|g| g.data.get("MergedDir").cloned());

        let document =
            serde_json::to_value(&details).map_err(|e| ContainerError::Runtime(e.to_string()))?;

        Ok(ContainerDetails {
            document,
            merged_dir,
        })
    }

    async fn top_container(&self, id: &ContainerId) -> Result<ProcessTable, ContainerError> {
        let top = self
            .client
            .top_processes(id.as_str(), None::<TopOptions>)
            .await
            .map_err(|e| map_container_error(e, id.as_str()))?;

        Ok(ProcessTable {
            titles: top.titles.unwrap_or_default(),
            processes: top.processes.unwrap_or_default(),
        })
    }

    async fn export_container(
        &self,
        id: &ContainerId,
        dest: &Path,
    ) -> Result<(), ContainerError> {
        let io_error = |e: std::io::Error| ContainerError::Io {
            path: dest.display().to_string(),
            reason: e.to_string(),
        };

        let mut file = tokio::fs::File::create(dest).await.map_err(io_error)?;
        let mut stream = self.client.export_container(id.as_str());
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| map_container_error(e, id.as_str()))?;
            file.write_all(&chunk).await.map_err(io_error)?;
        }
        file.flush().await.map_err(io_error)?;

        Ok(())
    }

    async fn commit_container(
        &self,
        id: &ContainerId,
        config: &CommitConfig,
    ) -> Result<ImageId, ContainerError> {
        let (repo, tag) = match config.image.as_deref().map(ImageRef::parse) {
            Some(Ok(image)) => (Some(image.repository()), image.tag().map(str::to_string)),
            Some(Err(e)) => return Err(ContainerError::Runtime(format!("invalid image name: {e}"))),
            None => (None, None),
        };

        let changes: Vec<String> = config.changes.iter().map(|c| c.instruction()).collect();

        let opts = CommitContainerOptions {
            container: Some(id.to_string()),
            repo,
            tag,
            comment: config.message.clone(),
            author: config.author.clone(),
            pause: config.pause,
            changes: (!changes.is_empty()).then(|| changes.join("\n")),
            ..Default::default()
        };

        let response = self
            .client
            .commit_container(opts, bollard::models::ContainerConfig::default())
            .await
            .map_err(|e| map_container_error(e, id.as_str()))?;

        Ok(ImageId::new(response.id))
    }
}

#[async_trait]
impl LogOps for BollardRuntime {
    async fn container_logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<LogStream, ContainerError> {
        let log_opts = LogsOptions {
            stdout: opts.stdout,
            stderr: opts.stderr,
            follow: opts.follow,
            timestamps: opts.timestamps,
            tail: "all".to_string(),
            ..Default::default()
        };

        let ident = id.to_string();
        let stream = self
            .client
            .logs(id.as_str(), Some(log_opts))
            .map(move |result| {
                result
                    .map(output_bytes)
                    .map_err(|e| map_container_error(e, &ident))
            });

        Ok(Box::pin(stream))
    }
}

fn output_bytes(output: LogOutput) -> Bytes {
    match output {
        LogOutput::StdOut { message }
        | LogOutput::StdErr { message }
        | LogOutput::StdIn { message }
        | LogOutput::Console { message } => message,
    }
}

#[async_trait]
impl AttachOps for BollardRuntime {
    async fn attach_container(
        &self,
        id: &ContainerId,
        opts: &AttachOptions,
    ) -> Result<AttachIo, ContainerError> {
        let attach_opts = AttachContainerOptions {
            stdin: opts.stdin,
            stdout: true,
            stderr: true,
            stream: true,
            ..Default::default()
        };

        let attached = self
            .client
            .attach_container(id.as_str(), Some(attach_opts))
            .await
            .map_err(|e| map_container_error(e, id.as_str()))?;

        let ident = id.to_string();
        let output = attached.output.map(move |result| {
            result
                .map(output_bytes)
                .map_err(|e| map_container_error(e, &ident))
        });

        Ok(AttachIo {
            output: Box::pin(output),
            input: attached.input,
        })
    }
}

// =============================================================================
// Pods (libpod)
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PodRecord {
    id: String,
    name: String,
    #[serde(default, alias = "Status")]
    state: String,
}

impl From<PodRecord> for Pod {
    fn from(record: PodRecord) -> Self {
        Pod {
            id: PodId::new(record.id),
            name: record.name,
            status: PodStatus::parse(&record.state),
        }
    }
}

#[derive(Deserialize)]
struct IdRecord {
    #[serde(rename = "Id")]
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TopRecord {
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    processes: Vec<Vec<String>>,
}

#[async_trait]
impl PodOps for BollardRuntime {
    async fn get_pod(&self, ident: &str) -> Result<Pod, PodError> {
        let route = format!("/pods/{}/json", encode(ident));
        let resp = self.pod_request(Method::GET, &route, None, ident).await?;
        let record: PodRecord = resp.json().map_err(map_pod_transport)?;
        Ok(record.into())
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, PodError> {
        let resp = self
            .pod_request(Method::GET, "/pods/json", None, "pods")
            .await?;
        let records: Vec<PodRecord> = resp.json().map_err(map_pod_transport)?;
        Ok(records.into_iter().map(Pod::from).collect())
    }

    async fn create_pod(&self, config: &PodConfig) -> Result<PodId, PodError> {
        let mut body = serde_json::json!({
            "labels": config.labels,
            "no_infra": config.no_infra,
        });
        if let Some(name) = &config.name {
            body["name"] = name.clone().into();
        }
        if let Some(parent) = &config.cgroup_parent {
            body["cgroup_parent"] = parent.clone().into();
        }
        if !config.share.is_empty() {
            body["shared_namespaces"] = config.share.clone().into();
        }

        let ident = config.name.as_deref().unwrap_or("pod");
        let resp = self
            .pod_request(Method::POST, "/pods/create", Some(&body), ident)
            .await?;
        let record: IdRecord = resp.json().map_err(map_pod_transport)?;
        Ok(PodId::new(record.id))
    }

    async fn kill_pod(&self, id: &PodId, signal: Signal) -> Result<(), PodError> {
        let route = format!("/pods/{}/kill?signal={}", encode(id.as_str()), signal);
        self.pod_request(Method::POST, &route, None, id.as_str())
            .await
            .map(drop)
    }

    async fn pause_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_action(id, "pause").await
    }

    async fn unpause_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_action(id, "unpause").await
    }

    async fn restart_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_action(id, "restart").await
    }

    async fn stop_pod(&self, id: &PodId) -> Result<(), PodError> {
        self.pod_action(id, "stop").await
    }

    async fn remove_pod(&self, id: &PodId, force: bool) -> Result<(), PodError> {
        let route = format!("/pods/{}?force={force}", encode(id.as_str()));
        self.pod_request(Method::DELETE, &route, None, id.as_str())
            .await
            .map(drop)
    }

    async fn inspect_pod(&self, id: &PodId) -> Result<serde_json::Value, PodError> {
        let route = format!("/pods/{}/json", encode(id.as_str()));
        let resp = self
            .pod_request(Method::GET, &route, None, id.as_str())
            .await?;
        resp.json().map_err(map_pod_transport)
    }

    async fn top_pod(&self, id: &PodId) -> Result<ProcessTable, PodError> {
        let route = format!("/pods/{}/top", encode(id.as_str()));
        let resp = self
            .pod_request(Method::GET, &route, None, id.as_str())
            .await?;
        let record: TopRecord = resp.json().map_err(map_pod_transport)?;
        Ok(ProcessTable {
            titles: record.titles,
            processes: record.processes,
        })
    }
}
