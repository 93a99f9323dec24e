// ABOUTME: info: show what the engine reports about itself and its host.
// ABOUTME: YAML for people, JSON when the global output mode asks for it.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::UsageError;
use crate::output::OutputMode;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct InfoArgs {}

#[derive(Debug)]
pub struct Info;

impl Info {
    pub fn new(_args: InfoArgs) -> Result<Self, UsageError> {
        Ok(Self)
    }
}

#[async_trait]
impl Action for Info {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        let info = match ctx.runtime.info().await {
            Ok(info) => info,
            Err(e) => return fail(ctx.out, &e),
        };

        match ctx.out.mode() {
            OutputMode::Json => ctx.out.document(&info),
            OutputMode::Text => match serde_yaml::to_string(&info) {
                Ok(yaml) => ctx.out.block(&yaml),
                Err(e) => return fail(ctx.out, &e),
            },
        }
        EXIT_OK
    }
}
