mod cli;
mod commands;
mod config;
mod http;
mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use sentimation_core::api::TaskClient;
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    if let Err(err) = run(args).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[tracing::instrument(skip_all)]
async fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting sentimation CLI"
    );

    let mut cfg = config::Config::load(cli.config.as_deref())?;
    cfg.apply_env();
    cfg.apply_overrides(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value)))?;
    if let Some(url) = cli.api_url {
        cfg.api_url = url;
    }
    debug!(?cfg, "effective configuration");

    let transport = http::HttpTransport::new(&cfg.api_url)
        .with_context(|| format!("failed to set up HTTP client for {}", cfg.api_url))?;
    let client = TaskClient::new(transport);
    let mut renderer = render::Renderer::new(&cfg);

    commands::dispatch(&client, &cfg, &mut renderer, cli.command).await?;

    info!("done");
    Ok(())
}
