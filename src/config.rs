use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::files::DocumentRoot;
use crate::http::connection::ConnectionLimits;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "OTUSERVER_CONFIG";

/// Server settings.
///
/// Sources, later ones winning: built-in defaults, the YAML file named by
/// `OTUSERVER_CONFIG`, the `LISTEN` / `DOCUMENT_ROOT` / `WORKERS`
/// environment variables, then the `-r` and `-w` command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen_addr: String,
    pub document_root: PathBuf,
    /// Accepted for compatibility; every connection runs on one thread.
    pub workers: usize,
    pub max_header_bytes: usize,
    pub idle_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let limits = ConnectionLimits::default();
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            document_root: PathBuf::from("."),
            workers: 10,
            max_header_bytes: limits.max_header_bytes,
            idle_timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads the config from the process environment and arguments.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.apply_args(std::env::args().skip(1))?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Overrides fields from environment variables looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = var("LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(root) = var("DOCUMENT_ROOT") {
            self.document_root = PathBuf::from(root);
        }
        if let Some(workers) = var("WORKERS") {
            self.workers = parse_workers(&workers).context("invalid WORKERS")?;
        }
        Ok(())
    }

    /// Applies `-r <document_root>` and `-w <workers>`.
    pub fn apply_args<I>(&mut self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("missing value for {flag}"))
            };
            match flag.as_str() {
                "-r" => self.document_root = PathBuf::from(value()?),
                "-w" => self.workers = parse_workers(&value()?).context("invalid -w")?,
                _ => bail!("unknown argument {flag:?} (usage: otuserver [-r DOCUMENT_ROOT] [-w WORKERS])"),
            }
        }
        Ok(())
    }

    /// Resolves the configured document root to its canonical directory.
    pub fn document_root(&self) -> anyhow::Result<DocumentRoot> {
        DocumentRoot::new(&self.document_root)
    }

    pub fn limits(&self) -> ConnectionLimits {
        ConnectionLimits {
            max_header_bytes: self.max_header_bytes,
            idle_timeout: self.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn parse_workers(value: &str) -> anyhow::Result<usize> {
    let workers: usize = value
        .trim()
        .parse()
        .with_context(|| format!("{value:?} is not a number"))?;
    if workers == 0 {
        bail!("worker count must be at least 1");
    }
    Ok(workers)
}
