use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use plume_cache::QueryIds;
use plume_dune::{DuneClient, DuneConfig, QueryExecutor, client::DUNE_API_URL};
use plume_kpi::DEFAULT_TOP_VALIDATORS;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plume validators staking dashboard", long_about = None)]
pub struct PlumeCli {
    /// Directory holding the cached Dune tables
    #[arg(long, env = "CACHE_DIR", default_value = "database", global = true)]
    pub cache_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard API
    Serve {
        #[command(flatten)]
        dune: DuneArgs,

        /// API host
        #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// API port
        #[arg(long, env = "API_PORT", default_value = "8080")]
        port: u16,

        /// Size of the validator selector
        #[arg(long, env = "TOP_VALIDATORS", default_value_t = DEFAULT_TOP_VALIDATORS)]
        top_validators: usize,
    },

    /// Re-run both Dune queries and overwrite the local cache
    Refresh {
        #[command(flatten)]
        dune: DuneArgs,
    },

    /// Print the network overview
    Overview,

    /// Print the validators holding the most stake
    Top {
        #[arg(short = 'n', long, env = "TOP_VALIDATORS", default_value_t = DEFAULT_TOP_VALIDATORS)]
        limit: usize,
    },

    /// Print the daily performance of one validator
    Validator {
        /// Validator name, as shown in the overview
        name: String,
    },

    /// Write the OpenAPI document of the dashboard API
    Openapi {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DuneArgs {
    /// Dune API key
    #[arg(long, env = "DUNE_API", hide_env_values = true)]
    pub dune_api_key: Option<String>,

    /// Dune API base URL
    #[arg(long, env = "DUNE_API_URL", default_value = DUNE_API_URL)]
    pub dune_api_url: Url,

    /// Query backing the overall validators table
    #[arg(long, env = "DUNE_OVERALL_QUERY_ID", default_value_t = QueryIds::default().overall)]
    pub overall_query_id: u64,

    /// Query backing the daily validators table
    #[arg(long, env = "DUNE_DAILY_QUERY_ID", default_value_t = QueryIds::default().daily)]
    pub daily_query_id: u64,

    /// Seconds between two execution status checks
    #[arg(
        long,
        env = "DUNE_POLL_INTERVAL_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_secs: u64,
}

impl DuneArgs {
    pub const fn query_ids(&self) -> QueryIds {
        QueryIds {
            overall: self.overall_query_id,
            daily: self.daily_query_id,
        }
    }

    /// The Dune client, or `None` when no API key is configured.
    pub fn executor(&self) -> Result<Option<Arc<dyn QueryExecutor>>> {
        let Some(api_key) = self.dune_api_key.as_deref().filter(|key| !key.is_empty()) else {
            return Ok(None);
        };

        let config = DuneConfig::new(api_key)?
            .with_base_url(self.dune_api_url.clone())
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs));
        let client: Arc<dyn QueryExecutor> =
            Arc::new(DuneClient::new(config).context("Failed to create the Dune client")?);

        Ok(Some(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refresh_args(extra: &[&str]) -> Result<PlumeCli, clap::Error> {
        let mut args = vec!["plume-dashboard", "refresh"];
        args.extend_from_slice(extra);
        PlumeCli::try_parse_from(args)
    }

    #[test]
    fn test_poll_interval_must_be_positive() {
        assert!(refresh_args(&["--poll-interval-secs", "0"]).is_err());

        let cli = refresh_args(&["--poll-interval-secs", "2"]).unwrap();
        let Command::Refresh { dune } = cli.command else {
            panic!("expected the refresh command");
        };
        assert_eq!(dune.poll_interval_secs, 2);
    }

    #[test]
    fn test_query_ids_from_flags() {
        let cli = refresh_args(&["--overall-query-id", "1", "--daily-query-id", "2"]).unwrap();
        let Command::Refresh { dune } = cli.command else {
            panic!("expected the refresh command");
        };
        assert_eq!(dune.query_ids(), QueryIds { overall: 1, daily: 2 });
    }
}
