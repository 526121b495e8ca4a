use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Duration;
use tokio::sync::watch;

use geoform::cli::Args;
use geoform::config::{EMAIL_ENV_VAR, TOKEN_ENV_VAR};
use geoform::{Config, CredentialSource, LoadingStatus, Pipeline, PipelineSnapshot};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    geoform::logging::init_tracing();

    if let Err(err) = run(args).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }

    let credentials = CredentialSource::resolve(&config.credentials);
    if !credentials.is_complete() {
        bail!(
            "Missing credentials: set {} and {} (or the [credentials] section of the config file)",
            EMAIL_ENV_VAR,
            TOKEN_ENV_VAR
        );
    }

    let limit = Duration::from_secs(u64::from(config.api.timeout_seconds));
    let pipeline = Pipeline::from_config(&config)?;
    let mut rx = pipeline.subscribe();

    pipeline.set_credentials(credentials);
    let mut snapshot = settle(&pipeline, &mut rx, limit, "states", |s| s.states_status).await?;

    if snapshot.states_status == LoadingStatus::Error {
        bail!("Failed to load states ({:?})", snapshot.states_error);
    }

    if let Some(state) = args.state.filter(|s| !s.is_empty()) {
        if !snapshot.states.contains(&state) {
            tracing::warn!(state = %state, "State is not in the loaded states list");
        }
        pipeline.select_state(state);
        snapshot = settle(&pipeline, &mut rx, limit, "cities", |s| s.cities_status).await?;

        if snapshot.cities_status == LoadingStatus::Error {
            bail!("Failed to load cities ({:?})", snapshot.cities_error);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let names = if pipeline.selected_state().is_empty() {
            &snapshot.states
        } else {
            &snapshot.cities
        };
        for name in names.as_slice() {
            println!("{}", name);
        }
    }

    pipeline.close();
    Ok(())
}

/// Wait until the stage read by `status` reaches `loaded` or `error`.
async fn settle(
    pipeline: &Pipeline,
    rx: &mut watch::Receiver<PipelineSnapshot>,
    limit: Duration,
    what: &str,
    status: fn(&PipelineSnapshot) -> LoadingStatus,
) -> Result<PipelineSnapshot> {
    let waited = tokio::select! {
        waited = tokio::time::timeout(limit, rx.wait_for(|s| status(s).is_settled())) => waited,
        _ = tokio::signal::ctrl_c() => {
            pipeline.close();
            bail!("Interrupted while waiting for {}", what);
        }
    };

    match waited {
        Ok(Ok(snapshot)) => Ok((*snapshot).clone()),
        Ok(Err(_)) => bail!("Pipeline closed while waiting for {}", what),
        Err(_) => bail!(
            "Timed out after {}s waiting for {} (still {})",
            limit.as_secs(),
            what,
            status(&pipeline.snapshot())
        ),
    }
}
