// ABOUTME: pod create: make a new, empty pod.

use crate::args::UsageError;
use crate::commands::create::parse_label;
use crate::commands::{Action, Context, EXIT_OK, fail};
use crate::runtime::PodConfig;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PodCreateArgs {
    /// Assign a name to the pod
    #[arg(long)]
    pub name: Option<String>,

    /// Set a label, KEY=VALUE
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_label)]
    pub label: Vec<(String, String)>,

    /// Cgroup parent for the pod
    #[arg(long)]
    pub cgroup_parent: Option<String>,

    /// Create an infra container for the pod (default)
    #[arg(long, overrides_with = "no_infra")]
    pub infra: bool,

    /// Do not create an infra container
    #[arg(long, overrides_with = "infra")]
    pub no_infra: bool,

    /// Namespace to share among the pod's containers, e.g. net, ipc, uts
    #[arg(long, value_name = "NAMESPACE")]
    pub share: Vec<String>,
}

#[derive(Debug)]
pub struct PodCreate {
    config: PodConfig,
}

impl PodCreate {
    pub fn new(args: PodCreateArgs) -> Result<Self, UsageError> {
        if args.no_infra && !args.share.is_empty() {
            return Err(UsageError::incompatible("--no-infra", "--share"));
        }
        Ok(Self {
            config: PodConfig {
                name: args.name,
                labels: args.label.into_iter().collect(),
                cgroup_parent: args.cgroup_parent,
                no_infra: args.no_infra,
                share: args.share,
            },
        })
    }
}

#[async_trait]
impl Action for PodCreate {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        match ctx.runtime.create_pod(&self.config).await {
            Ok(id) => {
                tracing::debug!(pod = %id, "created pod");
                ctx.out.item(id.as_str());
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Output, OutputMode};
    use crate::runtime::PodStatus;
    use crate::runtime::fake::FakeRuntime;

    fn args() -> PodCreateArgs {
        PodCreateArgs {
            name: Some("db".into()),
            label: vec![("tier".into(), "data".into())],
            cgroup_parent: None,
            infra: false,
            no_infra: false,
            share: vec![],
        }
    }

    #[tokio::test]
    async fn prints_new_pod_id() {
        let rt = FakeRuntime::new();
        let (out, captured) = Output::capture(OutputMode::Text);

        let code = PodCreate::new(args())
            .unwrap()
            .run(&Context::new(&rt, &out))
            .await;

        assert_eq!(code, 0);
        assert_eq!(captured.stdout(), "pod1\n");
        assert_eq!(rt.pod_status("db"), Some(PodStatus::Created));
    }

    #[test]
    fn sharing_needs_infra() {
        let err = PodCreate::new(PodCreateArgs {
            no_infra: true,
            share: vec!["net".into()],
            ..args()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Incompatible options: --no-infra and --share");
    }
}
