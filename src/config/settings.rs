//! Settings structures for goods-search configuration

use crate::query::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, TryFromFloatSecsError};

/// Main settings structure, loaded from `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub elasticsearch: ElasticsearchSettings,
    pub indices: IndexSettings,
    pub search: SearchSettings,
    pub cache: CacheSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Reject values that would only fail later, at first use
    pub fn validate(&self) -> Result<()> {
        if seconds(self.elasticsearch.request_timeout).is_err() {
            bail!(
                "elasticsearch.request_timeout is not a valid number of seconds: {}",
                self.elasticsearch.request_timeout
            );
        }
        if seconds(self.search.branch_timeout).is_err() {
            bail!(
                "search.branch_timeout is not a valid number of seconds: {}",
                self.search.branch_timeout
            );
        }
        if self.search.max_page_size == 0 {
            bail!("search.max_page_size must be at least 1");
        }
        Ok(())
    }

    /// Merge with environment variables (GOODS_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("GOODS_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("GOODS_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("GOODS_SEARCH_ES_HOST") {
            self.elasticsearch.host = val;
        }
        if let Ok(val) = std::env::var("GOODS_SEARCH_ES_USERNAME") {
            self.elasticsearch.username = val;
        }
        if let Ok(val) = std::env::var("GOODS_SEARCH_ES_PASSWORD") {
            self.elasticsearch.password = val;
        }
        if let Ok(val) = std::env::var("GOODS_SEARCH_CACHE") {
            self.cache.enabled = val.parse().unwrap_or(self.cache.enabled);
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Connection settings for the Elasticsearch cluster.
///
/// Only `host` is ever contacted; node discovery is not performed.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchSettings {
    /// Base URL, e.g. `http://127.0.0.1:9200`
    pub host: String,
    /// Basic auth user name (empty disables auth)
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Ask for gzip compressed responses
    pub gzip: bool,
    /// Max idle connections kept per host
    pub pool_maxsize: usize,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1:9200".to_string(),
            username: String::new(),
            password: String::new(),
            request_timeout: 5.0,
            gzip: true,
            pool_maxsize: 20,
        }
    }
}

// Hand-written so the password never ends up in logs.
impl std::fmt::Debug for ElasticsearchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchSettings")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"***")
            .field("request_timeout", &self.request_timeout)
            .field("gzip", &self.gzip)
            .field("pool_maxsize", &self.pool_maxsize)
            .finish()
    }
}

/// Names of the per-marketplace source indices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IndexSettings {
    pub taobao: String,
    pub jd: String,
    pub pdd: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            taobao: "tbk_tb".to_string(),
            jd: "tbk_jd".to_string(),
            pdd: "tbk_pdd".to_string(),
        }
    }
}

impl IndexSettings {
    /// All source indices, in a stable order
    pub fn all(&self) -> Vec<String> {
        vec![self.taobao.clone(), self.jd.clone(), self.pdd.clone()]
    }

    /// Resolve a requested index name to one of the configured indices
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        [&self.taobao, &self.jd, &self.pdd]
            .into_iter()
            .find(|index| index.as_str() == name)
            .map(|index| index.as_str())
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Deadline in seconds for the exact and fuzzy branches together
    pub branch_timeout: f64,
    /// Hits scoring below this are dropped by the engine
    pub min_score: f64,
    /// Largest page size a caller may ask for
    pub max_page_size: u32,
    /// Page size used when the requested one is out of range
    pub default_page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            branch_timeout: crate::DEFAULT_TIMEOUT as f64,
            min_score: 1.0,
            max_page_size: MAX_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchSettings {
    /// Falls back to the default deadline when the value is not representable;
    /// `Settings::validate` rejects such values at startup.
    pub fn branch_timeout(&self) -> Duration {
        seconds(self.branch_timeout)
            .unwrap_or_else(|_| Duration::from_secs(crate::DEFAULT_TIMEOUT))
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits::new(self.max_page_size, self.default_page_size)
    }
}

/// Convert a configured number of seconds, negative values count as zero
pub fn seconds(value: f64) -> std::result::Result<Duration, TryFromFloatSecsError> {
    Duration::try_from_secs_f64(value.max(0.0))
}

/// Result cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    /// Entry lifetime in seconds
    pub ttl: u64,
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: 60,
            max_capacity: 10_000,
        }
    }
}
