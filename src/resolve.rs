// ABOUTME: Turns explicit identifiers or an --all flag into a work set.
// ABOUTME: Not-found identifiers are collected and skipped, in input order.

use crate::args::UsageError;
use crate::runtime::{
    Container, ContainerError, ContainerFilters, Fault, FaultKind, FullRuntime, Pod, PodError,
};
use async_trait::async_trait;
use nonempty::NonEmpty;

/// What a command was asked to act upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Every entity the collection lists.
    All,
    /// These identifiers, in this order.
    Named(NonEmpty<String>),
}

impl Targets {
    /// For verbs that take identifiers or `--all`, never both, never neither.
    pub fn exclusive(all: bool, idents: Vec<String>, noun: &str) -> Result<Self, UsageError> {
        match (all, NonEmpty::from_vec(idents)) {
            (true, Some(_)) => Err(UsageError::targets_and_all(noun)),
            (true, None) => Ok(Targets::All),
            (false, Some(named)) => Ok(Targets::Named(named)),
            (false, None) => Err(UsageError::no_targets(noun)),
        }
    }

    /// For verbs where no identifiers means everything.
    pub fn or_all(idents: Vec<String>) -> Self {
        NonEmpty::from_vec(idents).map_or(Targets::All, Targets::Named)
    }

    /// For verbs that require at least one identifier.
    pub fn named(idents: Vec<String>, noun: &str) -> Result<Self, UsageError> {
        NonEmpty::from_vec(idents)
            .map(Targets::Named)
            .ok_or_else(|| UsageError::no_targets(noun))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Targets::All)
    }
}

/// Remote objects that can be addressed by identifier.
pub trait Entity {
    /// The engine's identifier for this object.
    fn ident(&self) -> &str;
}

impl Entity for Container {
    fn ident(&self) -> &str {
        self.id.as_str()
    }
}

impl Entity for Pod {
    fn ident(&self) -> &str {
        self.id.as_str()
    }
}

/// A get/list view over one kind of remote object.
#[async_trait]
pub trait Collection: Send + Sync {
    type Entity: Entity + Send;
    type Error: Fault;

    async fn get(&self, ident: &str) -> Result<Self::Entity, Self::Error>;

    async fn list(&self) -> Result<Vec<Self::Entity>, Self::Error>;
}

/// Containers of a runtime, stopped ones included.
pub struct Containers<'a>(pub &'a dyn FullRuntime);

#[async_trait]
impl Collection for Containers<'_> {
    type Entity = Container;
    type Error = ContainerError;

    async fn get(&self, ident: &str) -> Result<Container, ContainerError> {
        self.0.get_container(ident).await
    }

    async fn list(&self) -> Result<Vec<Container>, ContainerError> {
        self.0.list_containers(&ContainerFilters::all()).await
    }
}

/// Pods of a runtime.
pub struct Pods<'a>(pub &'a dyn FullRuntime);

#[async_trait]
impl Collection for Pods<'_> {
    type Entity = Pod;
    type Error = PodError;

    async fn get(&self, ident: &str) -> Result<Pod, PodError> {
        self.0.get_pod(ident).await
    }

    async fn list(&self) -> Result<Vec<Pod>, PodError> {
        self.0.list_pods().await
    }
}

/// An entity together with the identifier it is reported under.
#[derive(Debug, Clone)]
pub struct Found<E> {
    /// The identifier as typed, or the engine id when listed.
    pub ident: String,
    pub entity: E,
}

/// The work set plus the not-found failures met while building it.
#[derive(Debug)]
pub struct Resolved<E, F> {
    pub found: Vec<Found<E>>,
    pub missing: Vec<F>,
}

impl<E, F> Resolved<E, F> {
    /// Keep only entities matching `pred`, preserving order.
    pub fn retain(&mut self, pred: impl Fn(&E) -> bool) {
        self.found.retain(|f| pred(&f.entity));
    }
}

/// Build the work set for `targets`.
///
/// A not-found lookup is recorded and skipped. Any other failure ends
/// resolution and is returned.
pub async fn resolve<C>(
    collection: &C,
    targets: &Targets,
) -> Result<Resolved<C::Entity, C::Error>, C::Error>
where
    C: Collection + ?Sized,
{
    let mut resolved = Resolved {
        found: Vec::new(),
        missing: Vec::new(),
    };

    match targets {
        Targets::All => {
            for entity in collection.list().await? {
                resolved.found.push(Found {
                    ident: entity.ident().to_string(),
                    entity,
                });
            }
        }
        Targets::Named(idents) => {
            for ident in idents {
                match collection.get(ident).await {
                    Ok(entity) => resolved.found.push(Found {
                        ident: ident.clone(),
                        entity,
                    }),
                    Err(e) if e.kind() == FaultKind::NotFound => {
                        tracing::debug!(ident = %ident, "not found");
                        resolved.missing.push(e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }

    Ok(resolved)
}
