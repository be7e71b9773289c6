//! Server configuration.
//!
//! Values come from an optional YAML file (named by `TINY_CONFIG`) and are
//! then overridden by the `LISTEN` and `TINY_ROOT` environment variables.

use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Value of the `Server` response header
    pub name: String,
}

/// Where resources live and how targets map onto them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory every resolved target is prefixed with
    pub root: PathBuf,
    /// Appended to static targets ending in `/`
    pub default_document: String,
    /// Targets containing this substring are programs, not files
    pub dynamic_marker: String,
    /// Environment binding that carries the query string to a program
    pub query_env: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            name: "Tiny Web Server".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            default_document: "home.html".to_string(),
            dynamic_marker: "cgi-bin".to_string(),
            query_env: "QUERY_STRING".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("TINY_CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Some(root) = lookup("TINY_ROOT") {
            cfg.content.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {path}"))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Replaces the port of `listen_addr`, keeping its host part.
    pub fn set_port(&mut self, port: &str) {
        let host = self
            .server
            .listen_addr
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.server.listen_addr = format!("{host}:{port}");
    }
}
