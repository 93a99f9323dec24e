// ABOUTME: push: send a local image to a registry under a destination tag.
// ABOUTME: TLS verification can be turned off for registries without certificates.

use super::{Action, Context, EXIT_OK, fail};
use crate::args::UsageError;
use async_trait::async_trait;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    /// Require HTTPS and verify certificates when contacting registries
    #[arg(long, overrides_with = "no_tlsverify")]
    pub tlsverify: bool,

    /// Do not verify registry certificates
    #[arg(long, overrides_with = "tlsverify")]
    pub no_tlsverify: bool,

    /// Local image to push
    pub image: String,

    /// Destination, e.g. registry.example.com/team/app:1.0
    pub tag: String,
}

#[derive(Debug)]
pub struct Push {
    image: String,
    tag: String,
    tls_verify: bool,
}

impl Push {
    pub fn new(args: PushArgs) -> Result<Self, UsageError> {
        Ok(Self {
            image: args.image,
            tag: args.tag,
            tls_verify: !args.no_tlsverify,
        })
    }
}

#[async_trait]
impl Action for Push {
    async fn run(&self, ctx: &Context<'_>) -> i32 {
        tracing::debug!(
            image = %self.image,
            destination = %self.tag,
            tls_verify = self.tls_verify,
            "push"
        );
        match ctx
            .runtime
            .push_image(&self.image, &self.tag, self.tls_verify)
            .await
        {
            Ok(()) => {
                ctx.out.item(&self.tag);
                EXIT_OK
            }
            Err(e) => fail(ctx.out, &e),
        }
    }
}
