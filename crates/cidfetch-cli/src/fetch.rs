//! # Fetch Subcommand
//!
//! Makes a CID available in a cache directory and prints where it landed.
//! The payload is not decoded; `fetch` reports the detected container
//! format so callers can pick their own decode path.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use cidfetch_core::{Cid, GatewayConfig, DEFAULT_ENDPOINT};
use cidfetch_loader::{CachedArtifact, LoadOptions, Loader};

/// Arguments for the `cidfetch fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Content identifier to fetch.
    #[arg(value_name = "CID")]
    pub cid: String,

    /// Gateway RPC base URL.
    #[arg(long, env = "CIDFETCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory holding cached files.
    #[arg(long, env = "CIDFETCH_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: PathBuf,

    /// Cache the payload under this name instead of the CID.
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Verify the payload against the hash embedded in the file name
    /// (`name-<sha256 prefix>.ext`).
    #[arg(long)]
    pub check_hash: bool,

    /// Per-request timeout in seconds. Waits indefinitely when unset.
    #[arg(long, env = "CIDFETCH_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Print a JSON report instead of a status line.
    #[arg(long)]
    pub json: bool,
}

/// JSON report for a completed fetch.
#[derive(Debug, Serialize)]
struct FetchReport<'a> {
    cid: &'a str,
    key: &'a str,
    path: String,
    format: &'static str,
    fetched: bool,
}

impl<'a> FetchReport<'a> {
    fn new(cid: &'a Cid, artifact: &'a CachedArtifact) -> Self {
        Self {
            cid: cid.as_str(),
            key: artifact.key.as_str(),
            path: artifact.path.display().to_string(),
            format: artifact.format.as_str(),
            fetched: artifact.fetched,
        }
    }
}

/// Execute the fetch subcommand.
pub fn run_fetch(args: &FetchArgs) -> Result<u8> {
    let options = load_options(args)?;
    let cid = Cid::new(&args.cid)?;

    tracing::debug!(
        endpoint = %options.gateway.endpoint,
        cache_dir = %options.cache_dir.display(),
        "resolved fetch options"
    );

    let loader = Loader::from_options(&options).context("failed to build gateway client")?;
    let artifact = loader
        .cache(&cid, options.file_name.as_deref(), options.check_hash)
        .with_context(|| format!("failed to fetch {cid}"))?;

    if args.json {
        let report = FetchReport::new(&cid, &artifact);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let source = if artifact.fetched { "fetched" } else { "cached" };
        println!(
            "OK: {source} {cid} path={} format={}",
            artifact.path.display(),
            artifact.format
        );
    }

    Ok(0)
}

/// Translate command-line arguments into load options.
fn load_options(args: &FetchArgs) -> Result<LoadOptions> {
    let gateway = GatewayConfig::from_parts(&args.endpoint, args.timeout_secs)?;
    let mut options = LoadOptions::new(&args.cache_dir)?
        .with_gateway(gateway)
        .with_check_hash(args.check_hash);
    if let Some(name) = &args.file_name {
        options = options.with_file_name(name.as_str());
    }
    Ok(options)
}
