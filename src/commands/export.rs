// ABOUTME: export: save a container's filesystem as a tarball on the local host.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::{InputAction, PathAction, UsageError, expand_path, help_for};
use async_trait::async_trait;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[arg(
        short,
        long,
        required = true,
        value_parser = expand_path,
        value_name = PathAction::METAVAR,
        help = help_for::<PathAction>("Write to this file.")
    )]
    pub output: PathBuf,

    /// Container to export
    pub container: String,
}

#[derive(Debug)]
pub struct Export {
    container: String,
    output: PathBuf,
}

impl Export {
    pub fn new(args: ExportArgs) -> Result<Self, UsageError> {
        Ok(Self {
            container: args.container,
            output: args.output,
        })
    }
}

#[async_trait]
impl Action for Export {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let container = match ctx.runtime.get_container(&self.container).await {
            Ok(container) => container,
            Err(e) => return fail(ctx.out, &e),
        };
        tracing::debug!(container = %container.id, path = %self.output.display(), "export");
        match ctx.runtime.export_container(&container.id, &self.output).await {
            Ok(()) => {
                ctx.out.item(&self.output.display().to_string());
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
    use crate::runtime::ContainerState;
    use crate::runtime::fake::FakeRuntime;

    #[tokio::test]
    async fn writes_tarball_to_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web.tar");
        let rt = FakeRuntime::new().with_container("web", ContainerState::Exited);
        let (out, captured) = Output::capture(OutputMode::Text);
        let export = Export::new(ExportArgs {
            output: path.clone(),
            container: "web".into(),
        })
        .unwrap();

        assert_eq!(export.run(&Context::new(&rt, &out)).await, 0);
        assert_eq!(std::fs::read(&path).unwrap(), b"fake tarball");
        assert_eq!(captured.stdout(), format!("{}\n", path.display()));
    }
}
