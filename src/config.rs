//! Server configuration.
//!
//! Settings come from three places, strongest first: `-document_root`,
//! `-port` and `-config` command-line flags, then the YAML file named by
//! `-config`, then the `DOCUMENT_ROOT` / `PORT` environment variables.
//! Document root and port are mandatory; everything else has defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::BASE_TIMEOUT;
use crate::transfer::PACKET_SIZE;

const USAGE: &str = "Usage is -document_root <path> -port <int> [-config <file.yaml>]";

/// Optional YAML file contents; any field may be omitted.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    document_root: Option<PathBuf>,
    port: Option<u16>,
    chunk_size: Option<usize>,
    keepalive_base_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path files are served from
    pub document_root: PathBuf,
    /// TCP port the listener binds
    pub port: u16,
    /// Upper bound on one transfer-scheduler chunk
    pub chunk_size: usize,
    /// Base for the adaptive keep-alive timeout
    pub keepalive_base_ms: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut document_root: Option<PathBuf> = None;
        let mut port: Option<u16> = None;
        let mut file_cfg = FileConfig::default();

        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("{flag} requires a value\n{USAGE}"))
            };
            match flag.as_str() {
                "-document_root" => document_root = Some(PathBuf::from(value()?)),
                "-port" => {
                    let raw = value()?;
                    port = Some(raw.parse().with_context(|| format!("invalid port {raw}"))?);
                }
                "-config" => {
                    let path = value()?;
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("cannot read config file {path}"))?;
                    file_cfg = serde_yaml::from_str(&text)
                        .with_context(|| format!("cannot parse config file {path}"))?;
                }
                other => anyhow::bail!("unknown argument {other}\n{USAGE}"),
            }
        }

        let document_root = document_root
            .or(file_cfg.document_root)
            .or_else(|| std::env::var("DOCUMENT_ROOT").ok().map(PathBuf::from))
            .context(USAGE)?;
        let port = port
            .or(file_cfg.port)
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .context(USAGE)?;

        Ok(Config {
            document_root,
            port,
            chunk_size: file_cfg.chunk_size.unwrap_or(PACKET_SIZE),
            keepalive_base_ms: file_cfg
                .keepalive_base_ms
                .unwrap_or(BASE_TIMEOUT.as_millis() as u64),
        })
    }

    pub fn keepalive_base(&self) -> Duration {
        Duration::from_millis(self.keepalive_base_ms)
    }
}
