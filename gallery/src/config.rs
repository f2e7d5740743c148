use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::fmt;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct ConfigFile {
    key: String,
    api_host: Option<String>,
    proxy: Option<String>,
    static_dir: Option<PathBuf>,
    host: Option<IpAddr>,
    port: Option<u16>,
    max_sessions: Option<NonZeroUsize>,
    #[serde(default)]
    lightbox: Lightbox,
}

/// Options handed to the lightbox on the page, named the way the script expects them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Lightbox {
    pub captions_data: String,
    pub caption_delay: u32,
    pub enable_keyboard: bool,
    pub doc_close: bool,
    pub overlay: bool,
    pub nav: bool,
    pub close: bool,
    pub show_counter: bool,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self {
            captions_data: "alt".to_owned(),
            caption_delay: 250,
            enable_keyboard: true,
            doc_close: true,
            overlay: true,
            nav: true,
            close: true,
            show_counter: true,
        }
    }
}

pub struct Config {
    pub key: String,
    pub api_host: Option<String>,
    pub proxy: Option<String>,
    pub static_dir: PathBuf,
    pub addr: SocketAddr,
    /// Search sessions kept before the least recently used one is forgotten.
    pub max_sessions: NonZeroUsize,
    pub lightbox: Lightbox,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("key", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("proxy", &self.proxy)
            .field("static_dir", &self.static_dir)
            .field("addr", &self.addr)
            .field("max_sessions", &self.max_sessions)
            .field("lightbox", &self.lightbox)
            .finish()
    }
}

fn parse_config(s: &str) -> Result<Config> {
    let config: ConfigFile = from_str(s)?;
    if config.key.trim().is_empty() {
        anyhow::bail!("api key is empty");
    }

    let host = config.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port = config.port.unwrap_or(5678);
    let max_sessions = match config.max_sessions {
        Some(n) => n,
        None => NonZeroUsize::new(1024).context("default session limit")?,
    };

    Ok(Config {
        key: config.key,
        api_host: config.api_host,
        proxy: config.proxy,
        static_dir: config.static_dir.unwrap_or_else(|| "static".into()),
        addr: SocketAddr::new(host, port),
        max_sessions,
        lightbox: config.lightbox,
    })
}

pub fn read_config_from(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_config() -> Result<Config> {
    read_config_from("config.json".as_ref())
}
