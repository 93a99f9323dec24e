// ABOUTME: top: show the processes running inside a container.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::UsageError;
use crate::output::Table;
use crate::runtime::ProcessTable;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct TopArgs {
    /// Container to examine
    pub container: String,
}

#[derive(Debug)]
pub struct Top {
    container: String,
}

impl Top {
    pub fn new(args: TopArgs) -> Result<Self, UsageError> {
        Ok(Self {
            container: args.container,
        })
    }
}

#[async_trait]
impl Action for Top {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let container = match ctx.runtime.get_container(&self.container).await {
            Ok(container) => container,
            Err(e) => return fail(ctx.out, &e),
        };
        match ctx.runtime.top_container(&container.id).await {
            Ok(processes) => {
                ctx.out.table(&process_table(processes));
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}

/// Render a process listing with the engine's own column titles.
pub(crate) fn process_table(processes: ProcessTable) -> Table {
    let mut table = Table::new(processes.titles);
    for row in processes.processes {
        table.push(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Output, OutputMode};
    use crate::runtime::ContainerState;
    use crate::runtime::fake::FakeRuntime;

    #[tokio::test]
    async fn renders_process_table() {
        let rt = FakeRuntime::new().with_container("web", ContainerState::Running);
        let (out, captured) = Output::capture(OutputMode::Text);
        let top = Top::new(TopArgs {
            container: "web".into(),
        })
        .unwrap();

        assert_eq!(top.run(&Context::new(&rt, &out)).await, 0);
        assert_eq!(captured.stdout(), "PID  CMD\n1    sleep 300\n");
    }
}
