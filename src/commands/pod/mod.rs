// ABOUTME: Pod-scoped verbs, reached as `pod <verb>`.
// ABOUTME: They follow the container verbs' batch rules, using the libpod API.

mod create;
mod inspect;
mod kill;
mod lifecycle;
mod rm;
mod top;

pub use create::{PodCreate, PodCreateArgs};
pub use inspect::{PodInspect, PodInspectArgs};
pub use kill::{PodKill, PodKillArgs};
pub use lifecycle::{PodLifecycle, PodLifecycleArgs, PodVerb};
pub use rm::{PodRm, PodRmArgs};
pub use top::{PodTop, PodTopArgs};
