//! Runtime configuration, read entirely from environment variables.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

const DEFAULT_TOP_K: usize = 10;
const DEFAULT_MAX_LATENCY_MS: f64 = 100.0;
const DEFAULT_TTL: u32 = 60;
const DEFAULT_SNAPSHOT: &str = "yx_ips.txt";

/// Everything a single run needs.
#[derive(Debug)]
pub struct Config {
    /// Cloudflare API token (`CF_API_KEY`).
    pub api_token: String,
    /// Legacy auth email (`CF_API_EMAIL`); only needed for Global API keys.
    pub api_email: Option<String>,
    /// Target zone identifier (`CF_ZONE_ID`).
    pub zone_id: String,
    /// Managed hostname the A records live under (`CF_DOMAIN_NAME`).
    pub hostname: String,
    /// Max candidates kept per operator (`YXIP_TOP_K`).
    pub top_k: usize,
    /// Strict latency cutoff in milliseconds (`YXIP_MAX_LATENCY_MS`).
    pub max_latency_ms: f64,
    /// TTL for created records (`YXIP_TTL`).
    pub ttl: u32,
    /// Snapshot file path (`YXIP_SNAPSHOT`).
    pub snapshot_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_token: required("CF_API_KEY")?,
            api_email: optional("CF_API_EMAIL"),
            zone_id: required("CF_ZONE_ID")?,
            hostname: required("CF_DOMAIN_NAME")?,
            top_k: parsed_or("YXIP_TOP_K", DEFAULT_TOP_K)?,
            max_latency_ms: parsed_or("YXIP_MAX_LATENCY_MS", DEFAULT_MAX_LATENCY_MS)?,
            ttl: parsed_or("YXIP_TTL", DEFAULT_TTL)?,
            snapshot_path: optional("YXIP_SNAPSHOT")
                .map_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT), PathBuf::from),
        })
    }
}

fn required(name: &'static str) -> Result<String> {
    let value =
        std::env::var(name).with_context(|| format!("missing environment variable {name}"))?;
    if value.trim().is_empty() {
        bail!("environment variable {name} is empty");
    }
    Ok(value)
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_or<T>(name: &'static str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {name}={raw:?}: {e}")),
        None => Ok(default),
    }
}
