// ABOUTME: Entry point for the podremote CLI application.
// ABOUTME: Parses arguments, connects to the engine and runs one command.

mod cli;

use clap::Parser;
use cli::Cli;
use podremote::commands::Context;
use podremote::config::ClientConfig;
use podremote::error::Result;
use podremote::output::Output;
use podremote::runtime;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let out = Output::new(cli.format);

    match run(cli, &out).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            out.error(&format!("Error: {e}"));
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli, out: &Output) -> Result<i32> {
    let endpoint = cli.endpoint();

    // Flag conflicts are rejected before any file or socket is touched.
    let action = cli.command.into_action()?;

    let config = ClientConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, config.log_level.as_deref());

    let endpoint = config.runtime_config(&endpoint)?;
    let runtime = runtime::connect(&endpoint, config.timeout).await?;

    let ctx = Context::new(&runtime, out).with_detach_key(config.detach_keys.unwrap_or_default());
    Ok(action.run(&ctx).await)
}

/// RUST_LOG wins, then --verbose, then the configured level, then warn.
fn init_tracing(verbose: bool, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose {
            "debug"
        } else {
            configured.unwrap_or("warn")
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
