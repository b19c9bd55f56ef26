mod cli;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use plume_api::{ApiService, AppState, docs::ApiDoc, dto::RefreshReportDTO};
use plume_cache::CacheStore;
use plume_kpi::{compute_overview, compute_validator_performance, top_validators_by_stake};

use crate::cli::{Command, PlumeCli};

fn init_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let PlumeCli { cache_dir, command } = PlumeCli::parse();
    let store = Arc::new(CacheStore::new(cache_dir));

    match command {
        Command::Serve {
            dune,
            host,
            port,
            top_validators,
        } => {
            let executor = dune.executor()?;
            if executor.is_none() {
                tracing::warn!("DUNE_API is not set, data refresh is disabled");
            }

            let state = AppState::new(store, executor, dune.query_ids(), top_validators);
            ApiService::new(state, &host, port).serve().await?;
        }
        Command::Refresh { dune } => {
            let executor = dune
                .executor()?
                .context("DUNE_API must be set to refresh data")?;

            let report = store.refresh(executor.as_ref(), dune.query_ids()).await;
            print_json(&RefreshReportDTO::new(&report, false))?;

            if !report.is_complete() {
                let reasons: Vec<String> =
                    report.failures().iter().map(ToString::to_string).collect();
                bail!("Refresh incomplete: {}", reasons.join("; "));
            }
        }
        Command::Overview => {
            let overall = store.load_overall().await?;
            print_json(&compute_overview(&overall)?)?;
        }
        Command::Top { limit } => {
            let overall = store.load_overall().await?;
            print_json(&top_validators_by_stake(&overall, limit))?;
        }
        Command::Validator { name } => {
            let daily = store.load_daily().await?;
            let performance = compute_validator_performance(&daily, &name)?;
            if performance.rows.is_empty() {
                tracing::warn!("No daily data for validator {}", name);
            }
            print_json(&performance)?;
        }
        Command::Openapi { out } => {
            ApiDoc::generate_openapi_json(out)?;
        }
    }

    Ok(())
}
